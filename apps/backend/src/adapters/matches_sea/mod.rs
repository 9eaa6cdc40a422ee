//! SeaORM adapter for the append-only match log.

use sea_orm::sea_query::Condition;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use time::OffsetDateTime;

use crate::entities::{match_sets, matches};

pub mod dto;

pub use dto::{MatchCreate, SetCreate};

pub async fn insert_match<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: MatchCreate,
    created_at: OffsetDateTime,
) -> Result<matches::Model, sea_orm::DbErr> {
    let active = matches::ActiveModel {
        id: NotSet,
        ladder_id: Set(dto.ladder_id),
        match_date: Set(dto.match_date),
        winner_id: Set(dto.winner_id),
        loser_id: Set(dto.loser_id),
        created_at: Set(created_at),
        winner_points: Set(dto.winner_points),
        loser_points: Set(dto.loser_points),
        straight_sets: Set(dto.straight_sets),
        win_streak_bonus: Set(dto.win_streak_bonus),
        bagel_sets_won_by_winner: Set(dto.bagel_sets_won_by_winner),
    };
    active.insert(conn).await
}

/// Insert set rows in the given order.
pub async fn insert_sets<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    match_id: i64,
    sets: &[SetCreate],
) -> Result<(), sea_orm::DbErr> {
    for set in sets {
        let active = match_sets::ActiveModel {
            id: NotSet,
            match_id: Set(match_id),
            set_number: Set(set.set_number),
            winner_games: Set(set.winner_games),
            loser_games: Set(set.loser_games),
            winner_tiebreak: Set(set.winner_tiebreak),
            loser_tiebreak: Set(set.loser_tiebreak),
        };
        active.insert(conn).await?;
    }
    Ok(())
}

/// `(winner_id, loser_id)` for every match in a ladder.
pub async fn find_results_by_ladder<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    ladder_id: i64,
) -> Result<Vec<(i64, i64)>, sea_orm::DbErr> {
    matches::Entity::find()
        .select_only()
        .column(matches::Column::WinnerId)
        .column(matches::Column::LoserId)
        .filter(matches::Column::LadderId.eq(ladder_id))
        .into_tuple()
        .all(conn)
        .await
}

/// Matches in a ladder where `user_id` played either side.
pub async fn find_by_ladder_and_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    ladder_id: i64,
    user_id: i64,
) -> Result<Vec<matches::Model>, sea_orm::DbErr> {
    matches::Entity::find()
        .filter(matches::Column::LadderId.eq(ladder_id))
        .filter(
            Condition::any()
                .add(matches::Column::WinnerId.eq(user_id))
                .add(matches::Column::LoserId.eq(user_id)),
        )
        .order_by_desc(matches::Column::Id)
        .all(conn)
        .await
}

/// Matches in a ladder between exactly these two players, either way round.
pub async fn find_between<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    ladder_id: i64,
    user_a: i64,
    user_b: i64,
) -> Result<Vec<matches::Model>, sea_orm::DbErr> {
    matches::Entity::find()
        .filter(matches::Column::LadderId.eq(ladder_id))
        .filter(
            Condition::any()
                .add(
                    Condition::all()
                        .add(matches::Column::WinnerId.eq(user_a))
                        .add(matches::Column::LoserId.eq(user_b)),
                )
                .add(
                    Condition::all()
                        .add(matches::Column::WinnerId.eq(user_b))
                        .add(matches::Column::LoserId.eq(user_a)),
                ),
        )
        .order_by_desc(matches::Column::Id)
        .all(conn)
        .await
}

/// Set rows for the given matches, ordered by match then set number.
pub async fn find_sets_for_matches<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    match_ids: Vec<i64>,
) -> Result<Vec<match_sets::Model>, sea_orm::DbErr> {
    if match_ids.is_empty() {
        return Ok(Vec::new());
    }
    match_sets::Entity::find()
        .filter(match_sets::Column::MatchId.is_in(match_ids))
        .order_by_asc(match_sets::Column::MatchId)
        .order_by_asc(match_sets::Column::SetNumber)
        .all(conn)
        .await
}
