//! Mock implementations of port traits
//!
//! These are in-memory implementations that can be configured for testing.
//! They store data in memory and allow tests to inject failures.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::{Arc, RwLock};
use std::time::Duration;

use crate::domain::entities::{
    AchievementId, Match, MatchId, MatchTotals, NewMatch, NewPlayer, Player, PlayerAchievement,
    PlayerId, PlayerRecord, RatingSnapshot, STARTING_RATING,
};
use crate::domain::ports::{AchievementRepository, MatchRepository, PlayerRepository};
use crate::error::DomainError;

// ============================================================================
// In-Memory Player Repository
// ============================================================================

pub struct InMemoryPlayerRepository {
    players: Arc<RwLock<HashMap<PlayerId, Player>>>,
    next_id: AtomicI64,
    fail_writes: AtomicBool,
    write_delay: Option<Duration>,
}

impl Default for InMemoryPlayerRepository {
    fn default() -> Self {
        Self {
            players: Arc::default(),
            next_id: AtomicI64::new(1),
            fail_writes: AtomicBool::new(false),
            write_delay: None,
        }
    }
}

impl InMemoryPlayerRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate with a player for testing
    pub fn with_player(self, player: Player) -> Self {
        self.next_id.fetch_max(player.id.0 + 1, Ordering::SeqCst);
        self.players.write().unwrap().insert(player.id, player);
        self
    }

    /// Sleep inside every rating write, widening any race window
    pub fn with_write_delay(mut self, delay: Duration) -> Self {
        self.write_delay = Some(delay);
        self
    }

    /// Make `write_ratings` fail without touching stored ratings
    pub fn fail_rating_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn rating_of(&self, id: PlayerId) -> Option<f64> {
        self.players.read().unwrap().get(&id).map(|p| p.rating)
    }
}

#[async_trait]
impl PlayerRepository for InMemoryPlayerRepository {
    async fn find_by_id(&self, id: PlayerId) -> Result<Option<Player>, DomainError> {
        Ok(self.players.read().unwrap().get(&id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Player>, DomainError> {
        let players = self.players.read().unwrap();
        Ok(players.values().find(|p| p.name == name).cloned())
    }

    async fn create(&self, new_player: &NewPlayer) -> Result<Player, DomainError> {
        let mut players = self.players.write().unwrap();
        if players.values().any(|p| p.name == new_player.name) {
            return Err(DomainError::AlreadyExists(format!(
                "Player '{}' already exists",
                new_player.name
            )));
        }

        let player = Player {
            id: PlayerId(self.next_id.fetch_add(1, Ordering::SeqCst)),
            name: new_player.name.clone(),
            rating: STARTING_RATING,
            created_at: Utc::now(),
        };
        players.insert(player.id, player.clone());
        Ok(player)
    }

    async fn find_top_by_rating(&self, limit: u64) -> Result<Vec<Player>, DomainError> {
        let players = self.players.read().unwrap();
        let mut sorted: Vec<_> = players.values().cloned().collect();
        sorted.sort_by(|a, b| b.rating.total_cmp(&a.rating).then(a.id.cmp(&b.id)));
        Ok(sorted.into_iter().take(limit as usize).collect())
    }

    async fn fetch_ratings(
        &self,
        a: PlayerId,
        b: PlayerId,
    ) -> Result<RatingSnapshot, DomainError> {
        let players = self.players.read().unwrap();
        Ok([a, b]
            .into_iter()
            .filter_map(|id| players.get(&id).map(|p| (id, p.rating)))
            .collect())
    }

    async fn write_ratings(&self, ratings: &RatingSnapshot) -> Result<(), DomainError> {
        if let Some(delay) = self.write_delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(DomainError::RatingPersist("injected write failure".to_string()));
        }

        let mut players = self.players.write().unwrap();
        if let Some((missing, _)) = ratings.iter().find(|(id, _)| !players.contains_key(id)) {
            return Err(DomainError::RatingPersist(format!(
                "Player {} not found while writing ratings",
                missing
            )));
        }
        for (id, rating) in ratings.iter() {
            if let Some(player) = players.get_mut(&id) {
                player.rating = rating;
            }
        }
        Ok(())
    }
}

// ============================================================================
// In-Memory Match Repository
// ============================================================================

pub struct InMemoryMatchRepository {
    matches: Arc<RwLock<Vec<Match>>>,
    next_id: AtomicI64,
    panic_on_history: AtomicBool,
}

impl Default for InMemoryMatchRepository {
    fn default() -> Self {
        Self {
            matches: Arc::default(),
            next_id: AtomicI64::new(1),
            panic_on_history: AtomicBool::new(false),
        }
    }
}

impl InMemoryMatchRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate with a match for testing
    pub fn with_match(self, m: Match) -> Self {
        self.next_id.fetch_max(m.id.0 + 1, Ordering::SeqCst);
        self.matches.write().unwrap().push(m);
        self
    }

    /// Make `find_by_player` panic
    pub fn panic_on_history(&self, panic: bool) {
        self.panic_on_history.store(panic, Ordering::SeqCst);
    }
}

#[async_trait]
impl MatchRepository for InMemoryMatchRepository {
    async fn create(&self, new_match: &NewMatch) -> Result<Match, DomainError> {
        let recorded = Match {
            id: MatchId(self.next_id.fetch_add(1, Ordering::SeqCst)),
            winner_id: new_match.winner_id,
            loser_id: new_match.loser_id,
            winner_score: new_match.winner_score,
            loser_score: new_match.loser_score,
            played_at: Utc::now(),
        };
        self.matches.write().unwrap().push(recorded.clone());
        Ok(recorded)
    }

    async fn find_by_player(
        &self,
        player_id: PlayerId,
        limit: u64,
    ) -> Result<Vec<Match>, DomainError> {
        if self.panic_on_history.load(Ordering::SeqCst) {
            panic!("injected history failure for player {}", player_id);
        }

        let matches = self.matches.read().unwrap();
        let mut found: Vec<_> = matches
            .iter()
            .filter(|m| m.involves(player_id))
            .cloned()
            .collect();
        newest_first(&mut found);
        found.truncate(limit as usize);
        Ok(found)
    }

    async fn find_between(&self, a: PlayerId, b: PlayerId) -> Result<Vec<Match>, DomainError> {
        let matches = self.matches.read().unwrap();
        let mut found: Vec<_> = matches
            .iter()
            .filter(|m| m.involves(a) && m.opponent_of(a) == b)
            .cloned()
            .collect();
        newest_first(&mut found);
        Ok(found)
    }

    async fn record_for(&self, player_id: PlayerId) -> Result<PlayerRecord, DomainError> {
        let matches = self.matches.read().unwrap();
        let played = matches.iter().filter(|m| m.involves(player_id)).count() as u64;
        let won = matches.iter().filter(|m| m.won_by(player_id)).count() as u64;
        Ok(PlayerRecord { played, won })
    }

    async fn totals(&self) -> Result<MatchTotals, DomainError> {
        let matches = self.matches.read().unwrap();
        let total_points = matches
            .iter()
            .flat_map(|m| [m.winner_score, m.loser_score])
            .flatten()
            .map(u64::from)
            .sum();
        Ok(MatchTotals {
            total_matches: matches.len() as u64,
            total_points,
        })
    }
}

fn newest_first(matches: &mut [Match]) {
    matches.sort_by(|a, b| b.played_at.cmp(&a.played_at).then(b.id.cmp(&a.id)));
}

// ============================================================================
// In-Memory Achievement Repository
// ============================================================================

#[derive(Default)]
pub struct InMemoryAchievementRepository {
    held: Arc<RwLock<HashMap<PlayerId, BTreeMap<AchievementId, DateTime<Utc>>>>>,
    fail_records: AtomicBool,
}

impl InMemoryAchievementRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `record` fail
    pub fn fail_records(&self, fail: bool) {
        self.fail_records.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl AchievementRepository for InMemoryAchievementRepository {
    async fn record(
        &self,
        player_id: PlayerId,
        achievements: &[AchievementId],
        earned_at: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        if self.fail_records.load(Ordering::SeqCst) {
            return Err(DomainError::Database("injected record failure".to_string()));
        }
        if achievements.is_empty() {
            return Ok(());
        }

        let mut held = self.held.write().unwrap();
        let player = held.entry(player_id).or_default();
        for id in achievements {
            player.entry(*id).or_insert(earned_at);
        }
        Ok(())
    }

    async fn find_by_player(
        &self,
        player_id: PlayerId,
    ) -> Result<Vec<PlayerAchievement>, DomainError> {
        let held = self.held.read().unwrap();
        let mut found: Vec<_> = held
            .get(&player_id)
            .into_iter()
            .flatten()
            .map(|(id, at)| PlayerAchievement {
                player_id,
                achievement_id: *id,
                earned_at: *at,
            })
            .collect();
        found.sort_by(|a, b| {
            b.earned_at
                .cmp(&a.earned_at)
                .then(a.achievement_id.cmp(&b.achievement_id))
        });
        Ok(found)
    }
}
