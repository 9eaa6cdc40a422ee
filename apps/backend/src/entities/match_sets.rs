use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "match_sets")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_name = "match_id")]
    pub match_id: i64,
    #[sea_orm(column_name = "set_number", column_type = "SmallInteger")]
    pub set_number: i16,
    #[sea_orm(column_name = "winner_games", column_type = "SmallInteger")]
    pub winner_games: i16,
    #[sea_orm(column_name = "loser_games", column_type = "SmallInteger")]
    pub loser_games: i16,
    #[sea_orm(column_name = "winner_tiebreak", column_type = "SmallInteger")]
    pub winner_tiebreak: Option<i16>,
    #[sea_orm(column_name = "loser_tiebreak", column_type = "SmallInteger")]
    pub loser_tiebreak: Option<i16>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::matches::Entity",
        from = "Column::MatchId",
        to = "super::matches::Column::Id"
    )]
    Match,
}

impl Related<super::matches::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Match.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
