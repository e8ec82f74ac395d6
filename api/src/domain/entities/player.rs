//! Player domain entity
//!
//! Represents a community member who records matches and holds a rating.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unique identifier for a player (assigned by the store, always positive)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub i64);

impl From<i64> for PlayerId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Rating every new player starts with
pub const STARTING_RATING: f64 = 1000.0;

/// Maximum length of a player name
pub const MAX_NAME_LEN: usize = 63;

/// A registered player
#[derive(Debug, Clone, Serialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub rating: f64,
    pub created_at: DateTime<Utc>,
}

/// Data needed to register a new player
#[derive(Debug, Clone)]
pub struct NewPlayer {
    pub name: String,
}

impl NewPlayer {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Returns the trimmed name if it is acceptable
    pub fn validated_name(&self) -> Option<&str> {
        let name = self.name.trim();
        if name.is_empty() || name.chars().count() > MAX_NAME_LEN {
            None
        } else {
            Some(name)
        }
    }
}
