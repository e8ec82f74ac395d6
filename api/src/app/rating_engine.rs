//! Elo rating engine
//!
//! Pure functions over finite ratings; no state and no error conditions.

use crate::app::elo_config::ELO_SCALE;

/// Probability that a player rated `rating` beats one rated `opponent_rating`.
///
/// `expected_score(a, b) + expected_score(b, a)` is 1 up to rounding and
/// equal ratings give exactly 0.5.
pub fn expected_score(rating: f64, opponent_rating: f64) -> f64 {
    1.0 / (1.0 + 10f64.powf((opponent_rating - rating) / ELO_SCALE))
}

/// Rating after a match, seen from one player's side.
///
/// `outcome` is 1.0 for a win and 0.0 for a loss.
pub fn next_rating(rating: f64, opponent_rating: f64, outcome: f64, k: f64) -> f64 {
    rating + k * (outcome - expected_score(rating, opponent_rating))
}
