//! SeaORM entity models
//!
//! One module per table. See `migrations/` for the schema.

pub mod matches;
pub mod player_achievements;
pub mod players;
