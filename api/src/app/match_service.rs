//! Match service
//!
//! Records a match result, updates both players' ratings before returning
//! and kicks off the detached achievement refresh. Also summarises the
//! history between two players.

use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::app::achievement_service::AchievementService;
use crate::app::head_to_head::HeadToHead;
use crate::app::rating_service::RatingService;
use crate::domain::entities::{Match, NewMatch, PlayerId, RatingUpdate};
use crate::domain::ports::{AchievementRepository, MatchRepository, PlayerRepository};
use crate::error::{AppError, DomainError};

/// Outcome of submitting a match
#[derive(Debug)]
pub struct MatchSubmission {
    pub recorded: Match,
    pub ratings: RatingUpdate,
    /// One handle per participant. Dropping them does not cancel the refresh.
    pub achievement_refreshes: Vec<JoinHandle<()>>,
}

/// Service for match submission
pub struct MatchService<PR, MR, AR>
where
    PR: PlayerRepository + ?Sized,
    MR: MatchRepository + ?Sized,
    AR: AchievementRepository + ?Sized,
{
    players: Arc<PR>,
    matches: Arc<MR>,
    ratings: Arc<RatingService<PR>>,
    achievements: Arc<AchievementService<MR, AR>>,
}

impl<PR, MR, AR> MatchService<PR, MR, AR>
where
    PR: PlayerRepository + ?Sized,
    MR: MatchRepository + ?Sized + 'static,
    AR: AchievementRepository + ?Sized + 'static,
{
    pub fn new(
        players: Arc<PR>,
        matches: Arc<MR>,
        ratings: Arc<RatingService<PR>>,
        achievements: Arc<AchievementService<MR, AR>>,
    ) -> Self {
        Self {
            players,
            matches,
            ratings,
            achievements,
        }
    }

    /// Record a match and apply its rating change.
    ///
    /// Ratings are updated before this returns. Achievements are refreshed
    /// in the background and their failures never reach the caller.
    ///
    /// The match row is written before the rating update and is not rolled
    /// back if that update fails: the caller sees an error while the match
    /// stays recorded at its old ratings. Resubmitting records it again.
    pub async fn submit(&self, new_match: &NewMatch) -> Result<MatchSubmission, AppError> {
        new_match.validate().map_err(AppError::BadRequest)?;

        self.ensure_exists(new_match.winner_id).await?;
        self.ensure_exists(new_match.loser_id).await?;

        let recorded = self.matches.create(new_match).await?;
        tracing::info!(
            match_id = %recorded.id,
            winner_id = %recorded.winner_id,
            loser_id = %recorded.loser_id,
            "Match recorded"
        );

        let ratings = self
            .ratings
            .update_after_match(recorded.winner_id, recorded.loser_id)
            .await?;

        let achievement_refreshes = self
            .achievements
            .spawn_refresh(recorded.clone(), ratings.clone());

        Ok(MatchSubmission {
            recorded,
            ratings,
            achievement_refreshes,
        })
    }

    /// Head-to-head summary with win probabilities from current ratings.
    ///
    /// Fails like [`RatingService::win_probabilities`] when either player is
    /// unknown or both ids are the same.
    pub async fn head_to_head(
        &self,
        player_a: PlayerId,
        player_b: PlayerId,
    ) -> Result<HeadToHead, AppError> {
        let odds = self.ratings.win_probabilities(player_a, player_b).await?;
        let between = self.matches.find_between(player_a, player_b).await?;

        let mut summary = HeadToHead::tally(player_a, player_b, &between);
        summary.player_a.win_probability = odds.probability_a;
        summary.player_b.win_probability = odds.probability_b;
        Ok(summary)
    }

    async fn ensure_exists(&self, player_id: PlayerId) -> Result<(), AppError> {
        match self.players.find_by_id(player_id).await? {
            Some(_) => Ok(()),
            None => Err(DomainError::NotFound(format!("Player {} not found", player_id)).into()),
        }
    }
}
