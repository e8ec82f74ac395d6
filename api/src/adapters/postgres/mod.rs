//! PostgreSQL adapters
//!
//! Implementations of repository traits using SeaORM and PostgreSQL.

pub mod achievement_repo;
pub mod match_repo;
pub mod player_repo;


pub use achievement_repo::PostgresAchievementRepository;
pub use match_repo::PostgresMatchRepository;
pub use player_repo::PostgresPlayerRepository;
