//! Achievement service
//!
//! Re-derives a player's achievements after a match and records any new
//! ones. Refreshes run detached from the request that triggered them: one
//! task per participant, bounded by a worker semaphore, with failures and
//! panics logged and dropped.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;

use crate::app::achievement_classifier::AchievementClassifier;
use crate::domain::entities::{AchievementSet, Match, PlayerId, RatingUpdate};
use crate::domain::ports::{AchievementRepository, MatchRepository};
use crate::error::AppError;

/// Service for deriving and persisting achievements
pub struct AchievementService<MR, AR>
where
    MR: MatchRepository + ?Sized,
    AR: AchievementRepository + ?Sized,
{
    matches: Arc<MR>,
    achievements: Arc<AR>,
    classifier: AchievementClassifier,
    history_limit: u64,
    workers: Semaphore,
}

impl<MR, AR> AchievementService<MR, AR>
where
    MR: MatchRepository + ?Sized + 'static,
    AR: AchievementRepository + ?Sized + 'static,
{
    pub fn new(
        matches: Arc<MR>,
        achievements: Arc<AR>,
        classifier: AchievementClassifier,
        history_limit: u64,
        max_workers: usize,
    ) -> Self {
        Self {
            matches,
            achievements,
            classifier,
            history_limit,
            workers: Semaphore::new(max_workers.max(1)),
        }
    }

    /// Classify the player's full history and record what they have earned.
    ///
    /// Recording is insert-if-absent so running this twice for the same
    /// match changes nothing.
    pub async fn refresh_player(
        &self,
        player_id: PlayerId,
        last_match: &Match,
        ratings: &RatingUpdate,
    ) -> Result<AchievementSet, AppError> {
        let mut history = self
            .matches
            .find_by_player(player_id, self.history_limit)
            .await?;
        history.reverse();

        let earned = self.classifier.classify(
            player_id,
            &history,
            last_match,
            &ratings.pre_match,
            &ratings.post_match,
        )?;

        self.achievements
            .record(player_id, &earned.to_vec(), last_match.played_at)
            .await?;

        Ok(earned)
    }

    /// Start a detached refresh for each participant of `recorded`.
    ///
    /// The returned handles never carry an error; callers may await them or
    /// drop them.
    pub fn spawn_refresh(
        self: &Arc<Self>,
        recorded: Match,
        ratings: RatingUpdate,
    ) -> Vec<JoinHandle<()>> {
        let recorded = Arc::new(recorded);
        let ratings = Arc::new(ratings);

        recorded
            .participants()
            .into_iter()
            .map(|player_id| {
                let service = Arc::clone(self);
                let recorded = Arc::clone(&recorded);
                let ratings = Arc::clone(&ratings);
                tokio::spawn(async move {
                    service.run_detached(player_id, &recorded, &ratings).await;
                })
            })
            .collect()
    }

    async fn run_detached(&self, player_id: PlayerId, recorded: &Match, ratings: &RatingUpdate) {
        let _permit = match self.workers.acquire().await {
            Ok(permit) => permit,
            Err(_) => {
                tracing::warn!(player_id = %player_id, "Achievement workers closed, skipping refresh");
                return;
            }
        };

        let refresh = self.refresh_player(player_id, recorded, ratings);
        match AssertUnwindSafe(refresh).catch_unwind().await {
            Ok(Ok(earned)) => {
                tracing::info!(
                    player_id = %player_id,
                    match_id = %recorded.id,
                    held = earned.len(),
                    "Achievements refreshed"
                );
            }
            Ok(Err(e)) => {
                tracing::error!(
                    player_id = %player_id,
                    match_id = %recorded.id,
                    error = %e,
                    "Achievement refresh failed"
                );
            }
            Err(panic) => {
                tracing::error!(
                    player_id = %player_id,
                    match_id = %recorded.id,
                    panic = %panic_message(panic.as_ref()),
                    "Achievement refresh panicked"
                );
            }
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
