//! Rating service
//!
//! Applies the Elo update for a recorded match and answers win-probability
//! queries. All rating changes go through this service so that updates for
//! the same player are serialised.

use std::sync::Arc;

use serde::Serialize;

use crate::app::elo_config::{K_FACTOR, OUTCOME_LOSS, OUTCOME_WIN};
use crate::app::player_locks::PlayerLocks;
use crate::app::rating_engine::{expected_score, next_rating};
use crate::domain::entities::{PlayerId, RatingSnapshot, RatingUpdate};
use crate::domain::ports::PlayerRepository;
use crate::error::{AppError, DomainError};

/// Chance of each player winning a match between them
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WinProbabilities {
    pub player_a: PlayerId,
    pub player_b: PlayerId,
    pub probability_a: f64,
    pub probability_b: f64,
}

/// Service for Elo rating updates
pub struct RatingService<PR>
where
    PR: PlayerRepository + ?Sized,
{
    players: Arc<PR>,
    locks: PlayerLocks,
}

impl<PR> RatingService<PR>
where
    PR: PlayerRepository + ?Sized,
{
    pub fn new(players: Arc<PR>) -> Self {
        Self {
            players,
            locks: PlayerLocks::new(),
        }
    }

    /// Apply the result of a match to both participants' ratings.
    ///
    /// Returns the ratings before and after the match. The write is atomic:
    /// on failure neither rating changes.
    pub async fn update_after_match(
        &self,
        winner_id: PlayerId,
        loser_id: PlayerId,
    ) -> Result<RatingUpdate, AppError> {
        let _guard = self.locks.lock_pair(winner_id, loser_id).await;

        let pre_match = self.fetch_pair(winner_id, loser_id).await?;
        let (winner_before, loser_before) = pair_ratings(&pre_match, winner_id, loser_id)?;

        let winner_after = next_rating(winner_before, loser_before, OUTCOME_WIN, K_FACTOR);
        let loser_after = next_rating(loser_before, winner_before, OUTCOME_LOSS, K_FACTOR);

        let post_match: RatingSnapshot = [(winner_id, winner_after), (loser_id, loser_after)]
            .into_iter()
            .collect();

        self.players
            .write_ratings(&post_match)
            .await
            .map_err(|e| match e {
                DomainError::RatingPersist(_) => e,
                other => DomainError::RatingPersist(other.to_string()),
            })?;

        tracing::info!(
            winner_id = %winner_id,
            loser_id = %loser_id,
            winner_before = winner_before,
            winner_after = winner_after,
            loser_before = loser_before,
            loser_after = loser_after,
            "Ratings updated"
        );

        Ok(RatingUpdate {
            pre_match,
            post_match,
        })
    }

    /// Probability of each player beating the other at their current ratings.
    ///
    /// Fails like a rating update when the pair does not resolve to two
    /// distinct existing players, including `player_a == player_b`.
    pub async fn win_probabilities(
        &self,
        player_a: PlayerId,
        player_b: PlayerId,
    ) -> Result<WinProbabilities, AppError> {
        let snapshot = self.fetch_pair(player_a, player_b).await?;
        let (rating_a, rating_b) = pair_ratings(&snapshot, player_a, player_b)?;

        Ok(WinProbabilities {
            player_a,
            player_b,
            probability_a: expected_score(rating_a, rating_b),
            probability_b: expected_score(rating_b, rating_a),
        })
    }

    async fn fetch_pair(&self, a: PlayerId, b: PlayerId) -> Result<RatingSnapshot, DomainError> {
        let snapshot = self.players.fetch_ratings(a, b).await?;
        if !snapshot.covers_pair(a, b) {
            return Err(DomainError::RatingCountMismatch {
                expected: 2,
                found: snapshot.len(),
            });
        }
        Ok(snapshot)
    }
}

fn pair_ratings(
    snapshot: &RatingSnapshot,
    a: PlayerId,
    b: PlayerId,
) -> Result<(f64, f64), DomainError> {
    let rating_a = snapshot.get(a).ok_or(DomainError::MissingRatingEntry(a))?;
    let rating_b = snapshot.get(b).ok_or(DomainError::MissingRatingEntry(b))?;
    Ok((rating_a, rating_b))
}
