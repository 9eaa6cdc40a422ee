//! Seed helpers built on the public services, so fixtures go through the
//! same validation as production calls.

use std::sync::Arc;

use backend_test_support::unique_helpers::{unique_email, unique_str};
use ladder_backend::clock::FixedClock;
use ladder_backend::config::db::DbProfile;
use ladder_backend::domain::scoring::SetScore;
use ladder_backend::infra::state::build_state;
use ladder_backend::repos::ladders::Ladder;
use ladder_backend::repos::matches::MatchRecord;
use ladder_backend::repos::users::User;
use ladder_backend::services::ladders::{create_ladder, CreateLadder};
use ladder_backend::services::match_reporting::{report_match, MatchReport};
use ladder_backend::services::membership::join_ladder;
use ladder_backend::services::users::ensure_user;
use ladder_backend::state::app_state::AppState;
use ladder_backend::AppError;
use sea_orm::ConnectionTrait;
use time::macros::datetime;
use time::{Duration, OffsetDateTime};

/// Wall-clock instant every suite pins its clock to.
pub const NOW: OffsetDateTime = datetime!(2025-06-01 12:00 UTC);

/// Fresh in-memory database with the clock pinned at [`NOW`].
pub async fn test_state() -> Result<(AppState, Arc<FixedClock>), AppError> {
    let clock = Arc::new(FixedClock::new(NOW));
    let state = build_state()
        .with_db(DbProfile::InMemory)
        .with_clock(clock.clone())
        .build()
        .await?;
    Ok((state, clock))
}

pub async fn seed_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    prefix: &str,
) -> Result<User, AppError> {
    ensure_user(conn, &unique_email(prefix), prefix, None, NOW).await
}

pub struct LadderSeed {
    pub password: Option<String>,
    pub start_date: OffsetDateTime,
    pub end_date: OffsetDateTime,
    pub auto_add_creator: bool,
}

impl Default for LadderSeed {
    fn default() -> Self {
        Self {
            password: None,
            start_date: NOW - Duration::days(30),
            end_date: NOW + Duration::days(90),
            auto_add_creator: false,
        }
    }
}

pub async fn seed_ladder<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    creator: &User,
    seed: LadderSeed,
) -> Result<Ladder, AppError> {
    create_ladder(
        conn,
        CreateLadder {
            name: unique_str("ladder"),
            password: seed.password,
            start_date: seed.start_date,
            end_date: seed.end_date,
            created_by: creator.id,
            auto_add_creator: seed.auto_add_creator,
            algorithm: None,
        },
        NOW,
    )
    .await
}

/// Join through the membership gate, supplying the ladder's password.
pub async fn seed_member<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    ladder: &Ladder,
    user: &User,
) -> Result<i64, AppError> {
    let outcome = join_ladder(
        conn,
        ladder.id,
        Some(user.email.as_str()),
        ladder.password.as_deref(),
        NOW,
    )
    .await?;
    Ok(outcome.membership_id)
}

/// A ladder created by a fresh user, with `n` fresh members.
pub async fn ladder_with_players<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    n: usize,
) -> Result<(Ladder, Vec<User>), AppError> {
    let creator = seed_user(conn, "creator").await?;
    let ladder = seed_ladder(conn, &creator, LadderSeed::default()).await?;
    let mut players = Vec::with_capacity(n);
    for i in 0..n {
        let user = seed_user(conn, &format!("player{i}")).await?;
        seed_member(conn, &ladder, &user).await?;
        players.push(user);
    }
    Ok((ladder, players))
}

/// Report `winner` over `loser` on `date` with the given sets.
pub async fn play<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    ladder: &Ladder,
    winner: &User,
    loser: &User,
    date: OffsetDateTime,
    sets: Vec<SetScore>,
) -> Result<MatchRecord, AppError> {
    report_match(
        conn,
        MatchReport {
            ladder_id: ladder.id,
            match_date: date,
            winner_id: winner.id,
            loser_id: loser.id,
            sets,
        },
        NOW,
    )
    .await
}

/// Three-set win with no bonuses: 50 for the winner, 12 for the loser.
pub fn three_sets() -> Vec<SetScore> {
    vec![
        SetScore::new(1, 6, 4),
        SetScore::new(2, 3, 6),
        SetScore::new(3, 6, 2),
    ]
}
