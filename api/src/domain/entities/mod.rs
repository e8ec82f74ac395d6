//! Domain entities
//!
//! Pure domain models representing core business concepts.
//! These are separate from the SeaORM entities in the `entity` module.

pub mod achievement;
pub mod match_result;
pub mod player;
pub mod rating;
pub mod stats;

pub use achievement::{
    catalogue, AchievementId, AchievementInfo, AchievementSet, PlayerAchievement,
};
pub use match_result::{Match, MatchId, NewMatch};
pub use player::{NewPlayer, Player, PlayerId, MAX_NAME_LEN, STARTING_RATING};
pub use rating::{RatingSnapshot, RatingUpdate};
pub use stats::{MatchTotals, PlayerRecord};
