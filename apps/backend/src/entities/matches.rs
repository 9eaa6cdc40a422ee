use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// One reported match plus the scoring breakdown it produced.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "matches")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_name = "ladder_id")]
    pub ladder_id: i64,
    #[sea_orm(column_name = "match_date")]
    pub match_date: OffsetDateTime,
    #[sea_orm(column_name = "winner_id")]
    pub winner_id: i64,
    #[sea_orm(column_name = "loser_id")]
    pub loser_id: i64,
    #[sea_orm(column_name = "created_at")]
    pub created_at: OffsetDateTime,
    #[sea_orm(column_name = "winner_points")]
    pub winner_points: i32,
    #[sea_orm(column_name = "loser_points")]
    pub loser_points: i32,
    #[sea_orm(column_name = "straight_sets")]
    pub straight_sets: bool,
    #[sea_orm(column_name = "win_streak_bonus")]
    pub win_streak_bonus: bool,
    #[sea_orm(column_name = "bagel_sets_won_by_winner")]
    pub bagel_sets_won_by_winner: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::ladders::Entity",
        from = "Column::LadderId",
        to = "super::ladders::Column::Id"
    )]
    Ladder,
    #[sea_orm(has_many = "super::match_sets::Entity")]
    Sets,
}

impl Related<super::ladders::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Ladder.def()
    }
}

impl Related<super::match_sets::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Sets.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
