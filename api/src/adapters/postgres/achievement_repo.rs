//! PostgreSQL adapter for AchievementRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};

use crate::domain::entities::{AchievementId, PlayerAchievement, PlayerId};
use crate::domain::ports::AchievementRepository;
use crate::entity::player_achievements;
use crate::error::DomainError;

/// PostgreSQL implementation of AchievementRepository
pub struct PostgresAchievementRepository {
    db: DatabaseConnection,
}

impl PostgresAchievementRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AchievementRepository for PostgresAchievementRepository {
    async fn record(
        &self,
        player_id: PlayerId,
        achievements: &[AchievementId],
        earned_at: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        if achievements.is_empty() {
            return Ok(());
        }

        let earned_at = earned_at.fixed_offset();
        let models = achievements
            .iter()
            .map(|id| player_achievements::ActiveModel {
                player_id: Set(player_id.0),
                achievement_id: Set(id.code()),
                earned_at: Set(earned_at),
            });

        let inserted = player_achievements::Entity::insert_many(models)
            .on_conflict(
                OnConflict::columns([
                    player_achievements::Column::PlayerId,
                    player_achievements::Column::AchievementId,
                ])
                .do_nothing()
                .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        tracing::debug!(player_id = %player_id, inserted = inserted, "Achievements recorded");
        Ok(())
    }

    async fn find_by_player(
        &self,
        player_id: PlayerId,
    ) -> Result<Vec<PlayerAchievement>, DomainError> {
        let results = player_achievements::Entity::find()
            .filter(player_achievements::Column::PlayerId.eq(player_id.0))
            .order_by_desc(player_achievements::Column::EarnedAt)
            .order_by_asc(player_achievements::Column::AchievementId)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        results.into_iter().map(PlayerAchievement::try_from).collect()
    }
}

/// Convert SeaORM model to domain entity
impl TryFrom<player_achievements::Model> for PlayerAchievement {
    type Error = DomainError;

    fn try_from(model: player_achievements::Model) -> Result<Self, Self::Error> {
        Ok(PlayerAchievement {
            player_id: PlayerId(model.player_id),
            achievement_id: AchievementId::try_from(model.achievement_id)
                .map_err(DomainError::Internal)?,
            earned_at: model.earned_at.with_timezone(&Utc),
        })
    }
}
