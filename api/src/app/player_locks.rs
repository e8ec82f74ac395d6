//! Per-player serialisation of rating updates
//!
//! A rating update reads two rows and writes them back. Two matches that share
//! a player must not interleave between that read and write, so each update
//! holds both players' locks for its whole duration. Locks are always taken in
//! ascending id order, so two updates over the same pair cannot deadlock.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::domain::entities::PlayerId;

/// Holds the locks of both players of a match until dropped
pub struct PairGuard {
    _first: OwnedMutexGuard<()>,
    _second: Option<OwnedMutexGuard<()>>,
}

/// Lazily created async mutex per player
#[derive(Default)]
pub struct PlayerLocks {
    locks: Mutex<HashMap<PlayerId, Arc<Mutex<()>>>>,
}

impl PlayerLocks {
    pub fn new() -> Self {
        Self::default()
    }

    async fn lock_for(&self, player_id: PlayerId) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().await;
        Arc::clone(locks.entry(player_id).or_default())
    }

    /// Acquire the locks of both players
    pub async fn lock_pair(&self, a: PlayerId, b: PlayerId) -> PairGuard {
        let (first, second) = if a <= b { (a, b) } else { (b, a) };

        let first_guard = self.lock_for(first).await.lock_owned().await;
        let second_guard = if first == second {
            None
        } else {
            Some(self.lock_for(second).await.lock_owned().await)
        };

        PairGuard {
            _first: first_guard,
            _second: second_guard,
        }
    }

    /// Number of players that have been locked at least once
    #[cfg(test)]
    pub async fn tracked(&self) -> usize {
        self.locks.lock().await.len()
    }
}
