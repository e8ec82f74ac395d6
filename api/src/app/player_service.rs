//! Player service
//!
//! Handles player registration, the leaderboard, profiles and held
//! achievements.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::entities::{
    AchievementId, Match, MatchTotals, NewPlayer, Player, PlayerId, MAX_NAME_LEN,
};
use crate::domain::ports::{AchievementRepository, MatchRepository, PlayerRepository};
use crate::error::{AppError, DomainError};

/// An achievement a player holds, with its catalogue text
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeldAchievement {
    pub id: AchievementId,
    pub title: &'static str,
    pub description: &'static str,
    pub earned_at: DateTime<Utc>,
}

/// Most recent matches shown on a profile
pub const RECENT_PROFILE_MATCHES: u64 = 20;

/// A player with their record, latest matches and achievements
#[derive(Debug, Clone, Serialize)]
pub struct PlayerProfile {
    #[serde(flatten)]
    pub player: Player,
    pub games_played: u64,
    pub games_won: u64,
    pub recent_matches: Vec<Match>,
    pub achievements: Vec<HeldAchievement>,
}

/// Service for player operations
pub struct PlayerService<PR, MR, AR>
where
    PR: PlayerRepository + ?Sized,
    MR: MatchRepository + ?Sized,
    AR: AchievementRepository + ?Sized,
{
    players: Arc<PR>,
    matches: Arc<MR>,
    achievements: Arc<AR>,
}

impl<PR, MR, AR> PlayerService<PR, MR, AR>
where
    PR: PlayerRepository + ?Sized,
    MR: MatchRepository + ?Sized,
    AR: AchievementRepository + ?Sized,
{
    pub fn new(players: Arc<PR>, matches: Arc<MR>, achievements: Arc<AR>) -> Self {
        Self {
            players,
            matches,
            achievements,
        }
    }

    /// Register a new player at the starting rating
    pub async fn register(&self, name: &str) -> Result<Player, AppError> {
        let candidate = NewPlayer::new(name);
        let name = candidate.validated_name().ok_or_else(|| {
            DomainError::Validation(format!(
                "Name must be between 1 and {} characters",
                MAX_NAME_LEN
            ))
        })?;

        if self.players.find_by_name(name).await?.is_some() {
            return Err(DomainError::AlreadyExists(format!("Player '{}' already exists", name)).into());
        }

        let player = self.players.create(&NewPlayer::new(name)).await?;
        tracing::info!(player_id = %player.id, name = %player.name, "Player registered");
        Ok(player)
    }

    pub async fn get(&self, player_id: PlayerId) -> Result<Player, AppError> {
        self.players
            .find_by_id(player_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Player {} not found", player_id)))
    }

    /// Players ordered by rating, highest first
    pub async fn leaderboard(&self, limit: u64) -> Result<Vec<Player>, AppError> {
        Ok(self.players.find_top_by_rating(limit).await?)
    }

    /// Match count and score sum across every player
    pub async fn match_totals(&self) -> Result<MatchTotals, AppError> {
        Ok(self.matches.totals().await?)
    }

    /// Profile with record, recent matches (newest first) and achievements
    pub async fn profile(&self, player_id: PlayerId) -> Result<PlayerProfile, AppError> {
        let player = self.get(player_id).await?;
        let record = self.matches.record_for(player_id).await?;
        let recent_matches = self
            .matches
            .find_by_player(player_id, RECENT_PROFILE_MATCHES)
            .await?;
        let achievements = self.held(player_id).await?;

        Ok(PlayerProfile {
            player,
            games_played: record.played,
            games_won: record.won,
            recent_matches,
            achievements,
        })
    }

    /// Achievements the player holds, most recently earned first
    pub async fn achievements_for(
        &self,
        player_id: PlayerId,
    ) -> Result<Vec<HeldAchievement>, AppError> {
        self.get(player_id).await?;
        self.held(player_id).await
    }

    async fn held(&self, player_id: PlayerId) -> Result<Vec<HeldAchievement>, AppError> {
        let held = self.achievements.find_by_player(player_id).await?;
        Ok(held
            .into_iter()
            .map(|a| HeldAchievement {
                id: a.achievement_id,
                title: a.achievement_id.title(),
                description: a.achievement_id.description(),
                earned_at: a.earned_at,
            })
            .collect())
    }
}
