//! Test fixtures
//!
//! Factory functions for creating test data with sensible defaults.

use chrono::{DateTime, TimeZone, Utc};
use chrono_tz::Europe::London;

use crate::domain::entities::{Match, MatchId, Player, PlayerId, RatingSnapshot};

/// Create a test player with a specific rating
pub fn test_player_with_rating(id: i64, rating: f64) -> Player {
    Player {
        id: PlayerId(id),
        name: format!("player-{}", id),
        rating,
        created_at: Utc::now(),
    }
}

/// Create an unscored match played at `at`
pub fn test_match_at(id: i64, winner: PlayerId, loser: PlayerId, at: DateTime<Utc>) -> Match {
    test_match_scored(id, winner, loser, None, None, at)
}

pub fn test_match_scored(
    id: i64,
    winner: PlayerId,
    loser: PlayerId,
    winner_score: Option<u8>,
    loser_score: Option<u8>,
    at: DateTime<Utc>,
) -> Match {
    Match {
        id: MatchId(id),
        winner_id: winner,
        loser_id: loser,
        winner_score,
        loser_score,
        played_at: at,
    }
}

/// Wall-clock time in London, as UTC
pub fn uk_time(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    London
        .with_ymd_and_hms(year, month, day, hour, minute, 0)
        .earliest()
        .expect("valid London local time")
        .with_timezone(&Utc)
}

pub fn ratings(entries: &[(PlayerId, f64)]) -> RatingSnapshot {
    entries.iter().copied().collect()
}

/// Snapshots for a match between two 1000-rated players
pub fn even_ratings(m: &Match) -> (RatingSnapshot, RatingSnapshot) {
    let pre = ratings(&[(m.winner_id, 1000.0), (m.loser_id, 1000.0)]);
    let post = ratings(&[(m.winner_id, 1020.0), (m.loser_id, 980.0)]);
    (pre, post)
}
