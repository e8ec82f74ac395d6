//! ELO configuration constants
//!
//! Defines the rating model parameters and the rating-based achievement
//! thresholds.

/// K-factor applied to every match
pub const K_FACTOR: f64 = 40.0;

/// Rating difference at which the stronger player is ten times as likely to win
pub const ELO_SCALE: f64 = 400.0;

/// Outcome value for the winner's side of a match
pub const OUTCOME_WIN: f64 = 1.0;

/// Outcome value for the loser's side of a match
pub const OUTCOME_LOSS: f64 = 0.0;

/// Minimum pre-match rating gap for a win to count as an upset
pub const UPSET_MARGIN: f64 = 100.0;

/// Post-match rating needed for "Rising Star"
pub const RATING_THRESHOLD_1100: f64 = 1100.0;

/// Post-match rating needed for "Big Shot"
pub const RATING_THRESHOLD_1200: f64 = 1200.0;

/// Post-match rating needed for "Final Boss"
pub const RATING_THRESHOLD_1300: f64 = 1300.0;
