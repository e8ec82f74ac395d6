//! PostgreSQL adapter for MatchRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, NotSet,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};

use crate::domain::entities::{Match, MatchId, MatchTotals, NewMatch, PlayerId, PlayerRecord};
use crate::domain::ports::MatchRepository;
use crate::entity::matches;
use crate::error::DomainError;

/// PostgreSQL implementation of MatchRepository
pub struct PostgresMatchRepository {
    db: DatabaseConnection,
}

impl PostgresMatchRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl MatchRepository for PostgresMatchRepository {
    async fn create(&self, new_match: &NewMatch) -> Result<Match, DomainError> {
        let model = matches::ActiveModel {
            id: NotSet,
            winner_id: Set(new_match.winner_id.0),
            loser_id: Set(new_match.loser_id.0),
            winner_score: Set(new_match.winner_score.map(i16::from)),
            loser_score: Set(new_match.loser_score.map(i16::from)),
            played_at: Set(Utc::now().fixed_offset()),
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.into())
    }

    async fn find_by_player(
        &self,
        player_id: PlayerId,
        limit: u64,
    ) -> Result<Vec<Match>, DomainError> {
        let results = matches::Entity::find()
            .filter(
                Condition::any()
                    .add(matches::Column::WinnerId.eq(player_id.0))
                    .add(matches::Column::LoserId.eq(player_id.0)),
            )
            .order_by_desc(matches::Column::PlayedAt)
            .order_by_desc(matches::Column::Id)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }

    async fn find_between(&self, a: PlayerId, b: PlayerId) -> Result<Vec<Match>, DomainError> {
        let pairing = |winner: PlayerId, loser: PlayerId| {
            Condition::all()
                .add(matches::Column::WinnerId.eq(winner.0))
                .add(matches::Column::LoserId.eq(loser.0))
        };

        let results = matches::Entity::find()
            .filter(Condition::any().add(pairing(a, b)).add(pairing(b, a)))
            .order_by_desc(matches::Column::PlayedAt)
            .order_by_desc(matches::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }

    async fn record_for(&self, player_id: PlayerId) -> Result<PlayerRecord, DomainError> {
        let played = matches::Entity::find()
            .filter(
                Condition::any()
                    .add(matches::Column::WinnerId.eq(player_id.0))
                    .add(matches::Column::LoserId.eq(player_id.0)),
            )
            .count(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        let won = matches::Entity::find()
            .filter(matches::Column::WinnerId.eq(player_id.0))
            .count(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(PlayerRecord { played, won })
    }

    async fn totals(&self) -> Result<MatchTotals, DomainError> {
        let row: Option<(i64, i64)> = matches::Entity::find()
            .select_only()
            .column_as(Expr::col(matches::Column::Id).count(), "total_matches")
            .column_as(
                Expr::cust("COALESCE(SUM(winner_score), 0) + COALESCE(SUM(loser_score), 0)"),
                "total_points",
            )
            .into_tuple()
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        let (total_matches, total_points) = row.unwrap_or_default();
        Ok(MatchTotals {
            total_matches: u64::try_from(total_matches).unwrap_or_default(),
            total_points: u64::try_from(total_points).unwrap_or_default(),
        })
    }
}

/// Convert SeaORM model to domain entity
impl From<matches::Model> for Match {
    fn from(model: matches::Model) -> Self {
        Match {
            id: MatchId(model.id),
            winner_id: PlayerId(model.winner_id),
            loser_id: PlayerId(model.loser_id),
            winner_score: model.winner_score.and_then(|s| u8::try_from(s).ok()),
            loser_score: model.loser_score.and_then(|s| u8::try_from(s).ok()),
            played_at: model.played_at.with_timezone(&Utc),
        }
    }
}
