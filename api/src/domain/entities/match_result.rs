//! Match domain entity
//!
//! A head-to-head result between two players. Once stored a match is never
//! mutated or deleted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::player::PlayerId;

/// Unique identifier for a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatchId(pub i64);

impl From<i64> for MatchId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for MatchId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A recorded match
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Match {
    pub id: MatchId,
    pub winner_id: PlayerId,
    pub loser_id: PlayerId,
    pub winner_score: Option<u8>,
    pub loser_score: Option<u8>,
    pub played_at: DateTime<Utc>,
}

impl Match {
    /// Check whether the given player took part in this match
    pub fn involves(&self, player_id: PlayerId) -> bool {
        self.winner_id == player_id || self.loser_id == player_id
    }

    /// Check whether the given player won this match
    pub fn won_by(&self, player_id: PlayerId) -> bool {
        self.winner_id == player_id
    }

    /// The other participant, seen from `player_id`
    pub fn opponent_of(&self, player_id: PlayerId) -> PlayerId {
        if self.winner_id == player_id {
            self.loser_id
        } else {
            self.winner_id
        }
    }

    /// Both scores, when both were recorded
    pub fn scoreline(&self) -> Option<(u8, u8)> {
        self.winner_score.zip(self.loser_score)
    }

    pub fn participants(&self) -> [PlayerId; 2] {
        [self.winner_id, self.loser_id]
    }
}

/// Data needed to record a new match
#[derive(Debug, Clone, Deserialize)]
pub struct NewMatch {
    pub winner_id: PlayerId,
    pub loser_id: PlayerId,
    #[serde(default)]
    pub winner_score: Option<u8>,
    #[serde(default)]
    pub loser_score: Option<u8>,
}

impl NewMatch {
    /// Validate the participants. Scores are bounded by their type.
    pub fn validate(&self) -> Result<(), String> {
        if self.winner_id.0 <= 0 || self.loser_id.0 <= 0 {
            return Err("Player ids must be positive".to_string());
        }
        if self.winner_id == self.loser_id {
            return Err("winner_id and loser_id cannot be the same".to_string());
        }
        Ok(())
    }
}
