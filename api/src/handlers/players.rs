//! Player handlers
//!
//! Endpoints for registration, profiles, the leaderboard and held
//! achievements.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::app::{HeldAchievement, PlayerProfile};
use crate::domain::entities::{MatchTotals, Player, PlayerId};
use crate::error::AppError;
use crate::AppState;

const DEFAULT_LEADERBOARD_LIMIT: u64 = 100;
const MAX_LEADERBOARD_LIMIT: u64 = 1000;

/// Request body for player registration
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct PlayerResponse {
    pub id: PlayerId,
    pub name: String,
    pub rating: f64,
}

impl From<Player> for PlayerResponse {
    fn from(player: Player) -> Self {
        Self {
            id: player.id,
            name: player.name,
            rating: player.rating,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LeaderboardQuery {
    pub limit: Option<u64>,
}

#[derive(Debug, Serialize)]
pub struct LeaderboardEntry {
    pub rank: usize,
    #[serde(flatten)]
    pub player: PlayerResponse,
}

/// Leaderboard page: ranked players plus totals over every match
#[derive(Debug, Serialize)]
pub struct LeaderboardResponse {
    pub leaderboard: Vec<LeaderboardEntry>,
    pub global_stats: MatchTotals,
}

/// POST /players
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<PlayerResponse>), AppError> {
    let player = state.player_service.register(&request.name).await?;
    Ok((StatusCode::CREATED, Json(player.into())))
}

/// GET /leaderboard
///
/// Players ordered by rating, highest first.
pub async fn leaderboard(
    State(state): State<AppState>,
    Query(query): Query<LeaderboardQuery>,
) -> Result<Json<LeaderboardResponse>, AppError> {
    let limit = query
        .limit
        .unwrap_or(DEFAULT_LEADERBOARD_LIMIT)
        .clamp(1, MAX_LEADERBOARD_LIMIT);

    let players = state.player_service.leaderboard(limit).await?;
    let global_stats = state.player_service.match_totals().await?;

    Ok(Json(LeaderboardResponse {
        leaderboard: players
            .into_iter()
            .enumerate()
            .map(|(i, player)| LeaderboardEntry {
                rank: i + 1,
                player: player.into(),
            })
            .collect(),
        global_stats,
    }))
}

/// GET /players/:id
pub async fn player_profile(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<PlayerProfile>, AppError> {
    let profile = state.player_service.profile(PlayerId(id)).await?;
    Ok(Json(profile))
}

/// GET /players/:id/achievements
pub async fn player_achievements(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<HeldAchievement>>, AppError> {
    let held = state
        .player_service
        .achievements_for(PlayerId(id))
        .await?;
    Ok(Json(held))
}
