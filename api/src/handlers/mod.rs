//! HTTP handlers
//!
//! Axum request handlers for the API endpoints.

pub mod achievements;
pub mod matches;
pub mod players;

pub use achievements::list_achievements;
pub use matches::{head_to_head, submit_match, win_probabilities};
pub use players::{leaderboard, player_achievements, player_profile, register};
