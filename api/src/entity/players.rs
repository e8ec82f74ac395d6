use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "players")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub name: String,
    #[sea_orm(column_type = "Double")]
    pub rating: f64,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::player_achievements::Entity")]
    PlayerAchievements,
}

impl Related<super::player_achievements::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PlayerAchievements.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
