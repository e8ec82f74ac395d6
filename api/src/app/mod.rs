//! Application layer
//!
//! Contains use cases and service orchestration.
//! Services coordinate between domain entities, ports, and the rating and
//! achievement engines.

pub mod achievement_classifier;
pub mod achievement_service;
pub mod elo_config;
pub mod head_to_head;
pub mod match_service;
pub mod player_locks;
pub mod player_service;
pub mod rating_engine;
pub mod rating_service;

pub use achievement_classifier::AchievementClassifier;
pub use achievement_service::AchievementService;
pub use head_to_head::HeadToHead;
pub use match_service::{MatchService, MatchSubmission};
pub use player_service::{HeldAchievement, PlayerProfile, PlayerService};
pub use rating_service::{RatingService, WinProbabilities};
