//! Rating snapshots
//!
//! A snapshot maps player ids to ratings at one point in time. Each match
//! produces two: the participants' ratings before and after the result.

use std::collections::BTreeMap;

use serde::Serialize;

use super::player::PlayerId;

/// Ratings of a set of players at one point in time
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RatingSnapshot(BTreeMap<PlayerId, f64>);

impl RatingSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, player_id: PlayerId, rating: f64) {
        self.0.insert(player_id, rating);
    }

    pub fn get(&self, player_id: PlayerId) -> Option<f64> {
        self.0.get(&player_id).copied()
    }

    pub fn contains(&self, player_id: PlayerId) -> bool {
        self.0.contains_key(&player_id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, f64)> + '_ {
        self.0.iter().map(|(id, rating)| (*id, *rating))
    }

    /// True when the snapshot holds exactly the two given, distinct players
    pub fn covers_pair(&self, a: PlayerId, b: PlayerId) -> bool {
        a != b && self.len() == 2 && self.contains(a) && self.contains(b)
    }
}

impl FromIterator<(PlayerId, f64)> for RatingSnapshot {
    fn from_iter<I: IntoIterator<Item = (PlayerId, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Both snapshots produced by a single rating update
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatingUpdate {
    pub pre_match: RatingSnapshot,
    pub post_match: RatingSnapshot,
}
