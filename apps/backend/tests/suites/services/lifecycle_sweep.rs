use ladder_backend::db::with_txn;
use ladder_backend::repos::ladders::{deactivate_many, find_by_id};
use ladder_backend::services::ladders::set_ladder_active;
use ladder_backend::services::lifecycle::sweep_expired_ladders;
use ladder_backend::services::standings::get_standings;
use ladder_backend::AppError;
use time::Duration;

use crate::support::factory::{
    ladder_with_players, play, seed_ladder, seed_user, test_state, three_sets, LadderSeed, NOW,
};

#[tokio::test]
async fn deactivates_only_ended_active_ladders() -> Result<(), AppError> {
    let (state, _clock) = test_state().await?;

    with_txn(None, &state, |txn| {
        Box::pin(async move {
            let creator = seed_user(txn, "creator").await?;
            let short = seed_ladder(
                txn,
                &creator,
                LadderSeed {
                    end_date: NOW + Duration::days(10),
                    ..LadderSeed::default()
                },
            )
            .await?;
            let long = seed_ladder(
                txn,
                &creator,
                LadderSeed {
                    end_date: NOW + Duration::days(200),
                    ..LadderSeed::default()
                },
            )
            .await?;
            let paused = seed_ladder(
                txn,
                &creator,
                LadderSeed {
                    end_date: NOW + Duration::days(5),
                    ..LadderSeed::default()
                },
            )
            .await?;
            set_ladder_active(txn, paused.id, false, creator.id).await?;

            let later = NOW + Duration::days(30);
            let report = sweep_expired_ladders(txn, later).await?;
            assert_eq!(report.deactivated, vec![short.id]);

            assert!(!find_by_id(txn, short.id).await?.unwrap().is_active);
            assert!(find_by_id(txn, long.id).await?.unwrap().is_active);
            assert!(!find_by_id(txn, paused.id).await?.unwrap().is_active);

            let again = sweep_expired_ladders(txn, later).await?;
            assert!(again.deactivated.is_empty());
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn end_date_itself_is_not_expired() -> Result<(), AppError> {
    let (state, _clock) = test_state().await?;

    with_txn(None, &state, |txn| {
        Box::pin(async move {
            let creator = seed_user(txn, "creator").await?;
            let ladder = seed_ladder(txn, &creator, LadderSeed::default()).await?;

            let report = sweep_expired_ladders(txn, ladder.end_date).await?;
            assert!(report.deactivated.is_empty());

            let report = sweep_expired_ladders(txn, ladder.end_date + Duration::seconds(1)).await?;
            assert_eq!(report.deactivated, vec![ladder.id]);
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn standings_survive_deactivation() -> Result<(), AppError> {
    let (state, _clock) = test_state().await?;

    with_txn(None, &state, |txn| {
        Box::pin(async move {
            let (ladder, p) = ladder_with_players(txn, 2).await?;
            play(txn, &ladder, &p[0], &p[1], NOW, three_sets()).await?;
            let before = get_standings(txn, ladder.id).await?;

            sweep_expired_ladders(txn, ladder.end_date + Duration::days(1)).await?;

            assert_eq!(get_standings(txn, ladder.id).await?, before);
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn deactivation_reports_only_rows_it_changed() -> Result<(), AppError> {
    let (state, _clock) = test_state().await?;

    with_txn(None, &state, |txn| {
        Box::pin(async move {
            let creator = seed_user(txn, "creator").await?;
            let open = seed_ladder(txn, &creator, LadderSeed::default()).await?;
            let already_off = seed_ladder(txn, &creator, LadderSeed::default()).await?;
            // Switched off after a sweep would have read it as active
            set_ladder_active(txn, already_off.id, false, creator.id).await?;

            let flipped = deactivate_many(txn, vec![open.id, already_off.id]).await?;
            assert_eq!(flipped, vec![open.id]);

            assert!(deactivate_many(txn, vec![open.id]).await?.is_empty());
            Ok(())
        })
    })
    .await
}
