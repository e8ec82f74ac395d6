//! PostgreSQL adapter for PlayerRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, NotSet, QueryFilter,
    QueryOrder, QuerySelect, Set, SqlErr, TransactionTrait,
};

use crate::domain::entities::{NewPlayer, Player, PlayerId, RatingSnapshot, STARTING_RATING};
use crate::domain::ports::PlayerRepository;
use crate::entity::players;
use crate::error::DomainError;

/// PostgreSQL implementation of PlayerRepository
pub struct PostgresPlayerRepository {
    db: DatabaseConnection,
}

impl PostgresPlayerRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PlayerRepository for PostgresPlayerRepository {
    async fn find_by_id(&self, id: PlayerId) -> Result<Option<Player>, DomainError> {
        let result = players::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Player>, DomainError> {
        let result = players::Entity::find()
            .filter(players::Column::Name.eq(name))
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }

    async fn create(&self, player: &NewPlayer) -> Result<Player, DomainError> {
        let model = players::ActiveModel {
            id: NotSet,
            name: Set(player.name.clone()),
            rating: Set(STARTING_RATING),
            created_at: Set(Utc::now().fixed_offset()),
        };

        let result = model.insert(&self.db).await.map_err(|e| match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                DomainError::AlreadyExists(format!("Player '{}' already exists", player.name))
            }
            _ => DomainError::Database(e.to_string()),
        })?;

        Ok(result.into())
    }

    async fn find_top_by_rating(&self, limit: u64) -> Result<Vec<Player>, DomainError> {
        let results = players::Entity::find()
            .order_by_desc(players::Column::Rating)
            .order_by_asc(players::Column::Id)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }

    async fn fetch_ratings(
        &self,
        a: PlayerId,
        b: PlayerId,
    ) -> Result<RatingSnapshot, DomainError> {
        let rows: Vec<(i64, f64)> = players::Entity::find()
            .select_only()
            .column(players::Column::Id)
            .column(players::Column::Rating)
            .filter(players::Column::Id.is_in([a.0, b.0]))
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(rows
            .into_iter()
            .map(|(id, rating)| (PlayerId(id), rating))
            .collect())
    }

    async fn write_ratings(&self, ratings: &RatingSnapshot) -> Result<(), DomainError> {
        let persist_err = |e: DbErr| DomainError::RatingPersist(e.to_string());

        let txn = self.db.begin().await.map_err(persist_err)?;

        for (player_id, rating) in ratings.iter() {
            let result = players::Entity::update_many()
                .col_expr(players::Column::Rating, Expr::value(rating))
                .filter(players::Column::Id.eq(player_id.0))
                .exec(&txn)
                .await
                .map_err(persist_err)?;

            // Dropping the transaction rolls back earlier rows
            if result.rows_affected != 1 {
                return Err(DomainError::RatingPersist(format!(
                    "Player {} not found while writing ratings",
                    player_id
                )));
            }
        }

        txn.commit().await.map_err(persist_err)?;
        Ok(())
    }
}

/// Convert SeaORM model to domain entity
impl From<players::Model> for Player {
    fn from(model: players::Model) -> Self {
        Player {
            id: PlayerId(model.id),
            name: model.name,
            rating: model.rating,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}
