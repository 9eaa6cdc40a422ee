//! Match log repository functions for domain layer.

use std::collections::HashMap;

use sea_orm::ConnectionTrait;
use serde::Serialize;
use time::OffsetDateTime;

use crate::adapters::matches_sea as matches_adapter;
use crate::domain::scoring::{ScoreAward, SetScore};
use crate::domain::stats::MatchView;
use crate::entities::{match_sets, matches};
use crate::errors::domain::DomainError;

/// A persisted match with its sets in set-number order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchRecord {
    pub id: i64,
    pub ladder_id: i64,
    #[serde(with = "time::serde::rfc3339")]
    pub match_date: OffsetDateTime,
    pub winner_id: i64,
    pub loser_id: i64,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub award: ScoreAward,
    pub sets: Vec<SetScore>,
}

impl MatchRecord {
    fn from_parts(model: matches::Model, sets: Vec<SetScore>) -> Self {
        Self {
            id: model.id,
            ladder_id: model.ladder_id,
            match_date: model.match_date,
            winner_id: model.winner_id,
            loser_id: model.loser_id,
            created_at: model.created_at,
            award: ScoreAward {
                winner_points: model.winner_points,
                loser_points: model.loser_points,
                straight_sets: model.straight_sets,
                win_streak_bonus: model.win_streak_bonus,
                bagel_sets_won_by_winner: model.bagel_sets_won_by_winner,
            },
            sets,
        }
    }

    pub fn view(&self) -> MatchView {
        MatchView {
            id: self.id,
            match_date: self.match_date,
            winner_id: self.winner_id,
            loser_id: self.loser_id,
            sets: self.sets.clone(),
        }
    }
}

impl From<match_sets::Model> for SetScore {
    fn from(model: match_sets::Model) -> Self {
        Self {
            set_number: model.set_number,
            winner_games: model.winner_games,
            loser_games: model.loser_games,
            winner_tiebreak: model.winner_tiebreak,
            loser_tiebreak: model.loser_tiebreak,
        }
    }
}

/// Input to [`append_match`].
#[derive(Debug, Clone)]
pub struct NewMatch {
    pub ladder_id: i64,
    pub match_date: OffsetDateTime,
    pub winner_id: i64,
    pub loser_id: i64,
    pub sets: Vec<SetScore>,
}

/// Append one match and its sets. Sets are written in input order.
pub async fn append_match<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    new: NewMatch,
    award: ScoreAward,
    now: OffsetDateTime,
) -> Result<MatchRecord, DomainError> {
    let dto = matches_adapter::MatchCreate {
        ladder_id: new.ladder_id,
        match_date: new.match_date,
        winner_id: new.winner_id,
        loser_id: new.loser_id,
        winner_points: award.winner_points,
        loser_points: award.loser_points,
        straight_sets: award.straight_sets,
        win_streak_bonus: award.win_streak_bonus,
        bagel_sets_won_by_winner: award.bagel_sets_won_by_winner,
    };
    let model = matches_adapter::insert_match(conn, dto, now).await?;

    let set_rows: Vec<matches_adapter::SetCreate> = new
        .sets
        .iter()
        .map(|s| matches_adapter::SetCreate {
            set_number: s.set_number,
            winner_games: s.winner_games,
            loser_games: s.loser_games,
            winner_tiebreak: s.winner_tiebreak,
            loser_tiebreak: s.loser_tiebreak,
        })
        .collect();
    matches_adapter::insert_sets(conn, model.id, &set_rows).await?;

    let mut sets = new.sets;
    sets.sort_by_key(|s| s.set_number);
    Ok(MatchRecord::from_parts(model, sets))
}

/// `(winner_id, loser_id)` for every match in the ladder.
pub async fn list_results<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    ladder_id: i64,
) -> Result<Vec<(i64, i64)>, DomainError> {
    Ok(matches_adapter::find_results_by_ladder(conn, ladder_id).await?)
}

async fn attach_sets<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    models: Vec<matches::Model>,
) -> Result<Vec<MatchRecord>, DomainError> {
    let ids = models.iter().map(|m| m.id).collect();
    let mut by_match: HashMap<i64, Vec<SetScore>> = HashMap::new();
    for row in matches_adapter::find_sets_for_matches(conn, ids).await? {
        by_match.entry(row.match_id).or_default().push(SetScore::from(row));
    }

    let mut records: Vec<MatchRecord> = models
        .into_iter()
        .map(|m| {
            let sets = by_match.remove(&m.id).unwrap_or_default();
            MatchRecord::from_parts(m, sets)
        })
        .collect();
    // Newest match date first; later reports win ties
    records.sort_by(|a, b| b.match_date.cmp(&a.match_date).then(b.id.cmp(&a.id)));
    Ok(records)
}

/// A player's matches in the ladder, newest first, with sets.
pub async fn list_for_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    ladder_id: i64,
    user_id: i64,
) -> Result<Vec<MatchRecord>, DomainError> {
    let models = matches_adapter::find_by_ladder_and_player(conn, ladder_id, user_id).await?;
    attach_sets(conn, models).await
}

/// Matches between two players in the ladder, newest first, with sets.
pub async fn list_between<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    ladder_id: i64,
    user_a: i64,
    user_b: i64,
) -> Result<Vec<MatchRecord>, DomainError> {
    let models = matches_adapter::find_between(conn, ladder_id, user_a, user_b).await?;
    attach_sets(conn, models).await
}
