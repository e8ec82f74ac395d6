use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "matches")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub winner_id: i64,
    pub loser_id: i64,
    pub winner_score: Option<i16>,
    pub loser_score: Option<i16>,
    pub played_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::players::Entity",
        from = "Column::WinnerId",
        to = "super::players::Column::Id"
    )]
    Winner,
    #[sea_orm(
        belongs_to = "super::players::Entity",
        from = "Column::LoserId",
        to = "super::players::Column::Id"
    )]
    Loser,
}

impl ActiveModelBehavior for ActiveModel {}
