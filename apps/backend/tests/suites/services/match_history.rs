use ladder_backend::db::with_txn;
use ladder_backend::domain::scoring::SetScore;
use ladder_backend::services::match_history::{head_to_head, list_user_matches, user_ladder_stats};
use ladder_backend::AppError;
use time::Duration;

use crate::support::factory::{ladder_with_players, play, test_state, three_sets, NOW};

#[tokio::test]
async fn user_matches_newest_first_with_limit() -> Result<(), AppError> {
    let (state, _clock) = test_state().await?;

    with_txn(None, &state, |txn| {
        Box::pin(async move {
            let (ladder, p) = ladder_with_players(txn, 3).await?;
            let d1 = NOW - Duration::days(3);
            let d2 = NOW - Duration::days(2);
            let d3 = NOW - Duration::days(1);

            // Reported out of date order
            play(txn, &ladder, &p[0], &p[1], d2, three_sets()).await?;
            play(txn, &ladder, &p[2], &p[0], d3, three_sets()).await?;
            play(txn, &ladder, &p[0], &p[1], d1, three_sets()).await?;
            play(txn, &ladder, &p[1], &p[2], d3, three_sets()).await?;

            let all = list_user_matches(txn, ladder.id, p[0].id, None).await?;
            let dates: Vec<_> = all.iter().map(|m| m.match_date).collect();
            assert_eq!(dates, vec![d3, d2, d1]);

            let capped = list_user_matches(txn, ladder.id, p[0].id, Some(2)).await?;
            assert_eq!(capped.len(), 2);
            assert_eq!(capped[0].match_date, d3);

            let uncapped = list_user_matches(txn, ladder.id, p[0].id, Some(0)).await?;
            assert_eq!(uncapped.len(), 3);

            let generous = list_user_matches(txn, ladder.id, p[0].id, Some(10)).await?;
            assert_eq!(generous, all);
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn stats_from_the_players_perspective() -> Result<(), AppError> {
    let (state, _clock) = test_state().await?;

    with_txn(None, &state, |txn| {
        Box::pin(async move {
            let (ladder, p) = ladder_with_players(txn, 2).await?;
            let (a, b) = (&p[0], &p[1]);
            let first = NOW - Duration::days(2);
            let second = NOW - Duration::days(1);

            let sets = vec![
                SetScore::new(1, 6, 4),
                SetScore::new(2, 3, 6),
                SetScore::new(3, 7, 6).with_tiebreak(7, 5),
            ];
            play(txn, &ladder, a, b, first, sets).await?;
            play(
                txn,
                &ladder,
                b,
                a,
                second,
                vec![SetScore::new(1, 6, 2), SetScore::new(2, 6, 2)],
            )
            .await?;

            let stats = user_ladder_stats(txn, ladder.id, a.id).await?;
            assert_eq!(stats.matches, 2);
            assert_eq!((stats.wins, stats.losses), (1, 1));
            assert_eq!((stats.sets_won, stats.sets_lost), (2, 3));
            // 6+3+7+7 then 2+2
            assert_eq!(stats.games_won, 23 + 4);
            // 4+6+6+5 then 6+6
            assert_eq!(stats.games_lost, 21 + 12);
            assert_eq!(stats.last_match_date, Some(second));

            let empty = user_ladder_stats(txn, ladder.id, a.id + 1000).await?;
            assert_eq!(empty.matches, 0);
            assert_eq!(empty.last_match_date, None);
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn head_to_head_counts_only_the_pair() -> Result<(), AppError> {
    let (state, _clock) = test_state().await?;

    with_txn(None, &state, |txn| {
        Box::pin(async move {
            let (ladder, p) = ladder_with_players(txn, 3).await?;
            let (a, b, c) = (&p[0], &p[1], &p[2]);

            play(txn, &ladder, a, b, NOW - Duration::days(3), three_sets()).await?;
            play(txn, &ladder, b, a, NOW - Duration::days(2), three_sets()).await?;
            play(txn, &ladder, a, b, NOW - Duration::days(1), three_sets()).await?;
            play(txn, &ladder, a, c, NOW, three_sets()).await?;

            let h2h = head_to_head(txn, ladder.id, a.id, b.id).await?;
            assert_eq!(h2h.record.a_wins, 2);
            assert_eq!(h2h.record.b_wins, 1);
            assert_eq!(h2h.record.total, 3);
            assert_eq!(h2h.matches.len(), 3);
            assert_eq!(h2h.matches[0].match_date, NOW - Duration::days(1));

            let mirrored = head_to_head(txn, ladder.id, b.id, a.id).await?;
            assert_eq!((mirrored.record.a_wins, mirrored.record.b_wins), (1, 2));
            Ok(())
        })
    })
    .await
}
