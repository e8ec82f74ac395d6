//! Match handlers
//!
//! Endpoints for submitting results and predicting outcomes.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::app::{HeadToHead, MatchSubmission, WinProbabilities};
use crate::domain::entities::{MatchId, NewMatch, PlayerId, RatingUpdate};
use crate::error::{AppError, DomainError};
use crate::AppState;

/// Rating movement of one participant
#[derive(Debug, Serialize)]
pub struct ParticipantRating {
    pub id: PlayerId,
    pub rating_before: f64,
    pub rating_after: f64,
}

impl ParticipantRating {
    fn from_update(id: PlayerId, update: &RatingUpdate) -> Result<Self, DomainError> {
        Ok(Self {
            id,
            rating_before: update
                .pre_match
                .get(id)
                .ok_or(DomainError::MissingRatingEntry(id))?,
            rating_after: update
                .post_match
                .get(id)
                .ok_or(DomainError::MissingRatingEntry(id))?,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct MatchResponse {
    pub id: MatchId,
    pub played_at: DateTime<Utc>,
    pub winner_score: Option<u8>,
    pub loser_score: Option<u8>,
    pub winner: ParticipantRating,
    pub loser: ParticipantRating,
}

impl TryFrom<&MatchSubmission> for MatchResponse {
    type Error = DomainError;

    fn try_from(submission: &MatchSubmission) -> Result<Self, Self::Error> {
        let recorded = &submission.recorded;
        Ok(Self {
            id: recorded.id,
            played_at: recorded.played_at,
            winner_score: recorded.winner_score,
            loser_score: recorded.loser_score,
            winner: ParticipantRating::from_update(recorded.winner_id, &submission.ratings)?,
            loser: ParticipantRating::from_update(recorded.loser_id, &submission.ratings)?,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct PlayerPairQuery {
    pub player_a: i64,
    pub player_b: i64,
}

/// POST /matches
///
/// Records the match and returns the rating change. Achievements are
/// refreshed in the background.
pub async fn submit_match(
    State(state): State<AppState>,
    Json(request): Json<NewMatch>,
) -> Result<(StatusCode, Json<MatchResponse>), AppError> {
    let submission = state.match_service.submit(&request).await?;
    let response = MatchResponse::try_from(&submission)?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// GET /win-probabilities
pub async fn win_probabilities(
    State(state): State<AppState>,
    Query(query): Query<PlayerPairQuery>,
) -> Result<Json<WinProbabilities>, AppError> {
    let odds = state
        .rating_service
        .win_probabilities(PlayerId(query.player_a), PlayerId(query.player_b))
        .await?;
    Ok(Json(odds))
}

/// GET /head-to-head
pub async fn head_to_head(
    State(state): State<AppState>,
    Query(query): Query<PlayerPairQuery>,
) -> Result<Json<HeadToHead>, AppError> {
    let summary = state
        .match_service
        .head_to_head(PlayerId(query.player_a), PlayerId(query.player_b))
        .await?;
    Ok(Json(summary))
}
