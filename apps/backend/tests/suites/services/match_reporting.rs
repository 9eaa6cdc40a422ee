use ladder_backend::db::with_txn;
use ladder_backend::domain::scoring::SetScore;
use ladder_backend::repos::memberships::find_membership;
use ladder_backend::services::ladders::set_ladder_active;
use ladder_backend::services::match_history::list_user_matches;
use ladder_backend::services::match_reporting::{
    report_match, report_match_for_open_ladder, MatchReport,
};
use ladder_backend::{AppError, ErrorCode};
use time::Duration;

use crate::support::expect_code;
use crate::support::factory::{
    ladder_with_players, play, seed_user, test_state, three_sets, NOW,
};

#[tokio::test]
async fn report_updates_both_standings() -> Result<(), AppError> {
    let (state, _clock) = test_state().await?;

    with_txn(None, &state, |txn| {
        Box::pin(async move {
            let (ladder, players) = ladder_with_players(txn, 2).await?;
            let (a, b) = (&players[0], &players[1]);
            let date = NOW - Duration::days(1);

            let record = play(txn, &ladder, a, b, date, three_sets()).await?;
            assert_eq!(record.award.winner_points, 50);
            assert_eq!(record.award.loser_points, 12);
            assert!(!record.award.straight_sets);
            assert_eq!(record.sets.len(), 3);

            let winner = find_membership(txn, ladder.id, a.id).await?.unwrap();
            assert_eq!(winner.standing.points, 50);
            assert_eq!(winner.standing.win_streak, 1);
            assert_eq!(winner.standing.last_match_at, Some(date));

            let loser = find_membership(txn, ladder.id, b.id).await?.unwrap();
            assert_eq!(loser.standing.points, 12);
            assert_eq!(loser.standing.win_streak, 0);
            assert_eq!(loser.standing.last_match_at, Some(date));
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn straight_sets_with_bagels() -> Result<(), AppError> {
    let (state, _clock) = test_state().await?;

    with_txn(None, &state, |txn| {
        Box::pin(async move {
            let (ladder, players) = ladder_with_players(txn, 2).await?;
            let sets = vec![SetScore::new(1, 6, 0), SetScore::new(2, 6, 0)];

            let record = play(txn, &ladder, &players[0], &players[1], NOW, sets).await?;
            assert!(record.award.straight_sets);
            assert_eq!(record.award.bagel_sets_won_by_winner, 2);
            assert_eq!(record.award.winner_points, 61);
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn third_consecutive_win_earns_streak_bonus() -> Result<(), AppError> {
    let (state, _clock) = test_state().await?;

    with_txn(None, &state, |txn| {
        Box::pin(async move {
            let (ladder, players) = ladder_with_players(txn, 2).await?;
            let (a, b) = (&players[0], &players[1]);

            let mut awards = Vec::new();
            for day in 1..=4 {
                let date = NOW - Duration::days(10 - day);
                let record = play(txn, &ladder, a, b, date, three_sets()).await?;
                awards.push(record.award.win_streak_bonus);
            }
            assert_eq!(awards, vec![false, false, true, false]);

            let winner = find_membership(txn, ladder.id, a.id).await?.unwrap();
            assert_eq!(winner.standing.points, 50 * 4 + 3);
            assert_eq!(winner.standing.win_streak, 4);
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn loss_resets_streak() -> Result<(), AppError> {
    let (state, _clock) = test_state().await?;

    with_txn(None, &state, |txn| {
        Box::pin(async move {
            let (ladder, players) = ladder_with_players(txn, 2).await?;
            let (a, b) = (&players[0], &players[1]);

            play(txn, &ladder, a, b, NOW - Duration::days(3), three_sets()).await?;
            play(txn, &ladder, a, b, NOW - Duration::days(2), three_sets()).await?;
            play(txn, &ladder, b, a, NOW - Duration::days(1), three_sets()).await?;

            let a_row = find_membership(txn, ladder.id, a.id).await?.unwrap();
            assert_eq!(a_row.standing.points, 50 + 50 + 12);
            assert_eq!(a_row.standing.win_streak, 0);

            let b_row = find_membership(txn, ladder.id, b.id).await?.unwrap();
            assert_eq!(b_row.standing.points, 12 + 12 + 50);
            assert_eq!(b_row.standing.win_streak, 1);
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn non_member_cannot_be_reported() -> Result<(), AppError> {
    let (state, _clock) = test_state().await?;

    with_txn(None, &state, |txn| {
        Box::pin(async move {
            let (ladder, players) = ladder_with_players(txn, 1).await?;
            let outsider = seed_user(txn, "outsider").await?;

            let err = expect_code(
                play(txn, &ladder, &players[0], &outsider, NOW, three_sets()).await,
                ErrorCode::NotAMember,
            );
            assert!(err.to_string().contains(&outsider.id.to_string()));

            expect_code(
                play(txn, &ladder, &outsider, &players[0], NOW, three_sets()).await,
                ErrorCode::NotAMember,
            );

            let member = find_membership(txn, ladder.id, players[0].id).await?.unwrap();
            assert_eq!(member.standing.points, 0);
            assert!(list_user_matches(txn, ladder.id, players[0].id, None)
                .await?
                .is_empty());
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn malformed_sets_are_rejected() -> Result<(), AppError> {
    let (state, _clock) = test_state().await?;

    with_txn(None, &state, |txn| {
        Box::pin(async move {
            let (ladder, players) = ladder_with_players(txn, 2).await?;
            let (a, b) = (&players[0], &players[1]);

            let duplicate = vec![SetScore::new(1, 6, 4), SetScore::new(1, 6, 3)];
            expect_code(
                play(txn, &ladder, a, b, NOW, duplicate).await,
                ErrorCode::InvalidSets,
            );

            let zeroth = vec![SetScore::new(0, 6, 4)];
            expect_code(
                play(txn, &ladder, a, b, NOW, zeroth).await,
                ErrorCode::InvalidSets,
            );

            let negative = vec![SetScore::new(1, 6, -1)];
            expect_code(
                play(txn, &ladder, a, b, NOW, negative).await,
                ErrorCode::InvalidSets,
            );
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn sets_come_back_in_set_number_order() -> Result<(), AppError> {
    let (state, _clock) = test_state().await?;

    with_txn(None, &state, |txn| {
        Box::pin(async move {
            let (ladder, players) = ladder_with_players(txn, 2).await?;
            let sets = vec![SetScore::new(2, 6, 3), SetScore::new(1, 7, 6).with_tiebreak(7, 4)];

            let record = play(txn, &ladder, &players[0], &players[1], NOW, sets).await?;
            let numbers: Vec<i16> = record.sets.iter().map(|s| s.set_number).collect();
            assert_eq!(numbers, vec![1, 2]);

            let stored = list_user_matches(txn, ladder.id, players[0].id, None).await?;
            assert_eq!(stored[0].sets, record.sets);
            assert_eq!(stored[0].sets[0].winner_tiebreak, Some(7));
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn core_transaction_ignores_ladder_state_but_boundary_does_not() -> Result<(), AppError> {
    let (state, _clock) = test_state().await?;

    with_txn(None, &state, |txn| {
        Box::pin(async move {
            let (ladder, players) = ladder_with_players(txn, 2).await?;
            set_ladder_active(txn, ladder.id, false, ladder.created_by).await?;

            let report = MatchReport {
                ladder_id: ladder.id,
                match_date: NOW,
                winner_id: players[0].id,
                loser_id: players[1].id,
                sets: three_sets(),
            };

            expect_code(
                report_match_for_open_ladder(txn, report.clone(), NOW).await,
                ErrorCode::LadderInactive,
            );
            let record = report_match(txn, report, NOW).await?;
            assert_eq!(record.award.winner_points, 50);
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn boundary_refuses_missing_and_ended_ladders() -> Result<(), AppError> {
    let (state, _clock) = test_state().await?;

    with_txn(None, &state, |txn| {
        Box::pin(async move {
            let (ladder, players) = ladder_with_players(txn, 2).await?;
            let report = MatchReport {
                ladder_id: ladder.id,
                match_date: NOW,
                winner_id: players[0].id,
                loser_id: players[1].id,
                sets: three_sets(),
            };

            let after_end = ladder.end_date + Duration::seconds(1);
            expect_code(
                report_match_for_open_ladder(txn, report.clone(), after_end).await,
                ErrorCode::LadderEnded,
            );

            // Exactly at the end date the ladder is still open
            report_match_for_open_ladder(txn, report.clone(), ladder.end_date).await?;

            let missing = MatchReport {
                ladder_id: ladder.id + 1000,
                ..report
            };
            expect_code(
                report_match_for_open_ladder(txn, missing, NOW).await,
                ErrorCode::LadderNotFound,
            );
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn self_reported_match_stacks_both_deltas() -> Result<(), AppError> {
    let (state, _clock) = test_state().await?;

    with_txn(None, &state, |txn| {
        Box::pin(async move {
            let (ladder, players) = ladder_with_players(txn, 1).await?;
            let me = &players[0];

            play(txn, &ladder, me, me, NOW, three_sets()).await?;

            let row = find_membership(txn, ladder.id, me.id).await?.unwrap();
            assert_eq!(row.standing.points, 62);
            assert_eq!(row.standing.win_streak, 0);
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn identical_resubmission_is_recorded_again() -> Result<(), AppError> {
    let (state, _clock) = test_state().await?;

    with_txn(None, &state, |txn| {
        Box::pin(async move {
            let (ladder, players) = ladder_with_players(txn, 2).await?;
            let (a, b) = (&players[0], &players[1]);
            let date = NOW - Duration::days(1);
            let sets = vec![SetScore::new(1, 6, 0), SetScore::new(2, 6, 1)];

            let first = play(txn, &ladder, a, b, date, sets.clone()).await?;
            let second = play(txn, &ladder, a, b, date, sets.clone()).await?;
            let third = play(txn, &ladder, a, b, date, sets).await?;
            assert_ne!(first.id, second.id);
            assert_eq!(first.award.winner_points, 58);
            assert_eq!(second.award.winner_points, 58);
            // Two prior wins on the books, so the repeat earns the streak bonus
            assert_eq!(third.award.winner_points, 61);

            let history = list_user_matches(txn, ladder.id, a.id, None).await?;
            assert_eq!(history.len(), 3);

            let winner = find_membership(txn, ladder.id, a.id).await?.unwrap();
            assert_eq!(winner.standing.points, 177);
            assert_eq!(winner.standing.win_streak, 3);
            let loser = find_membership(txn, ladder.id, b.id).await?.unwrap();
            assert_eq!(loser.standing.points, 36);
            Ok(())
        })
    })
    .await
}
