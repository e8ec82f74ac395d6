//! Repository port traits
//!
//! These traits define the interface for data persistence.
//! Implementations are provided by adapters (e.g., PostgreSQL).

use async_trait::async_trait;

use chrono::{DateTime, Utc};

use crate::domain::entities::{
    AchievementId, Match, MatchTotals, NewMatch, NewPlayer, Player, PlayerAchievement, PlayerId,
    PlayerRecord, RatingSnapshot,
};
use crate::error::DomainError;

/// Repository for Player entities and their ratings
#[async_trait]
pub trait PlayerRepository: Send + Sync {
    /// Find a player by ID
    async fn find_by_id(&self, id: PlayerId) -> Result<Option<Player>, DomainError>;

    /// Find a player by exact name
    async fn find_by_name(&self, name: &str) -> Result<Option<Player>, DomainError>;

    /// Register a new player with the starting rating
    async fn create(&self, player: &NewPlayer) -> Result<Player, DomainError>;

    /// Get top players by rating
    async fn find_top_by_rating(&self, limit: u64) -> Result<Vec<Player>, DomainError>;

    /// Current ratings of the given pair.
    ///
    /// Returns whichever of the two players exist; callers decide whether a
    /// short snapshot is an error.
    async fn fetch_ratings(&self, a: PlayerId, b: PlayerId)
        -> Result<RatingSnapshot, DomainError>;

    /// Persist every rating in the snapshot atomically.
    ///
    /// Either all rows are updated or none are.
    async fn write_ratings(&self, ratings: &RatingSnapshot) -> Result<(), DomainError>;
}

/// Repository for Match entities
#[async_trait]
pub trait MatchRepository: Send + Sync {
    /// Record a match. The store assigns the id and `played_at`.
    async fn create(&self, new_match: &NewMatch) -> Result<Match, DomainError>;

    /// Matches the player took part in, newest first
    async fn find_by_player(
        &self,
        player_id: PlayerId,
        limit: u64,
    ) -> Result<Vec<Match>, DomainError>;

    /// Every match between the two players, newest first
    async fn find_between(&self, a: PlayerId, b: PlayerId) -> Result<Vec<Match>, DomainError>;

    /// Played and won counts for one player
    async fn record_for(&self, player_id: PlayerId) -> Result<PlayerRecord, DomainError>;

    /// Match count and score sum over all matches
    async fn totals(&self) -> Result<MatchTotals, DomainError>;
}

/// Repository for held achievements
#[async_trait]
pub trait AchievementRepository: Send + Sync {
    /// Insert each badge the player does not hold yet.
    ///
    /// Already-held badges are left untouched (keeping their original
    /// `earned_at`) and an empty list is a no-op.
    async fn record(
        &self,
        player_id: PlayerId,
        achievements: &[AchievementId],
        earned_at: DateTime<Utc>,
    ) -> Result<(), DomainError>;

    /// Badges held by the player, most recently earned first
    async fn find_by_player(
        &self,
        player_id: PlayerId,
    ) -> Result<Vec<PlayerAchievement>, DomainError>;
}
