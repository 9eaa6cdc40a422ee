use ladder_backend::db::with_txn;
use ladder_backend::services::ladders::{
    create_ladder, get_ladder, is_member, list_ladders, list_ladders_by_creator,
    list_user_ladders, remove_member, set_ladder_active, CreateLadder,
};
use ladder_backend::services::match_history::list_user_matches;
use ladder_backend::services::standings::get_standings;
use ladder_backend::{AppError, ErrorCode};
use time::Duration;

use crate::support::expect_code;
use crate::support::factory::{
    ladder_with_players, play, seed_ladder, seed_member, seed_user, test_state, three_sets,
    LadderSeed, NOW,
};

fn request(created_by: i64) -> CreateLadder {
    CreateLadder {
        name: "  Summer Singles  ".to_string(),
        password: Some(String::new()),
        start_date: NOW,
        end_date: NOW + Duration::days(60),
        created_by,
        auto_add_creator: false,
        algorithm: None,
    }
}

#[tokio::test]
async fn create_applies_defaults() -> Result<(), AppError> {
    let (state, _clock) = test_state().await?;

    with_txn(None, &state, |txn| {
        Box::pin(async move {
            let creator = seed_user(txn, "creator").await?;
            let ladder = create_ladder(txn, request(creator.id), NOW).await?;

            assert_eq!(ladder.name, "Summer Singles");
            assert!(ladder.is_active);
            assert_eq!(ladder.algorithm, "points_v1");
            assert_eq!(ladder.password, None);
            assert_eq!(ladder.created_at, NOW);
            assert!(!is_member(txn, ladder.id, Some(creator.id)).await?);
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn create_validates_input() -> Result<(), AppError> {
    let (state, _clock) = test_state().await?;

    with_txn(None, &state, |txn| {
        Box::pin(async move {
            let creator = seed_user(txn, "creator").await?;

            let blank = CreateLadder {
                name: "   ".to_string(),
                ..request(creator.id)
            };
            expect_code(create_ladder(txn, blank, NOW).await, ErrorCode::ValidationError);

            let backwards = CreateLadder {
                end_date: NOW,
                ..request(creator.id)
            };
            expect_code(
                create_ladder(txn, backwards, NOW).await,
                ErrorCode::InvalidDateRange,
            );

            let unknown = CreateLadder {
                algorithm: Some("elo".to_string()),
                ..request(creator.id)
            };
            expect_code(
                create_ladder(txn, unknown, NOW).await,
                ErrorCode::UnknownAlgorithm,
            );

            expect_code(
                create_ladder(txn, request(creator.id + 1000), NOW).await,
                ErrorCode::UserNotFound,
            );
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn auto_add_enrolls_creator() -> Result<(), AppError> {
    let (state, _clock) = test_state().await?;

    with_txn(None, &state, |txn| {
        Box::pin(async move {
            let creator = seed_user(txn, "creator").await?;
            let req = CreateLadder {
                auto_add_creator: true,
                ..request(creator.id)
            };
            let ladder = create_ladder(txn, req, NOW).await?;

            assert!(is_member(txn, ladder.id, Some(creator.id)).await?);
            let rows = get_standings(txn, ladder.id).await?;
            assert_eq!(rows.len(), 1);
            assert_eq!(rows[0].points, 0);
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn only_creator_changes_status() -> Result<(), AppError> {
    let (state, _clock) = test_state().await?;

    with_txn(None, &state, |txn| {
        Box::pin(async move {
            let creator = seed_user(txn, "creator").await?;
            let other = seed_user(txn, "other").await?;
            let ladder = seed_ladder(txn, &creator, LadderSeed::default()).await?;

            expect_code(
                set_ladder_active(txn, ladder.id, false, other.id).await,
                ErrorCode::NotLadderCreator,
            );
            expect_code(
                set_ladder_active(txn, ladder.id + 1000, false, creator.id).await,
                ErrorCode::LadderNotFound,
            );

            let off = set_ladder_active(txn, ladder.id, false, creator.id).await?;
            assert!(!off.is_active);
            let on = set_ladder_active(txn, ladder.id, true, creator.id).await?;
            assert!(on.is_active);
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn creator_removes_member_and_history_stays() -> Result<(), AppError> {
    let (state, _clock) = test_state().await?;

    with_txn(None, &state, |txn| {
        Box::pin(async move {
            let (ladder, p) = ladder_with_players(txn, 2).await?;
            play(txn, &ladder, &p[0], &p[1], NOW, three_sets()).await?;

            expect_code(
                remove_member(txn, ladder.id, p[1].id, p[0].id).await,
                ErrorCode::NotLadderCreator,
            );
            let outsider = seed_user(txn, "outsider").await?;
            expect_code(
                remove_member(txn, ladder.id, outsider.id, ladder.created_by).await,
                ErrorCode::NotAMember,
            );

            remove_member(txn, ladder.id, p[1].id, ladder.created_by).await?;
            assert!(!is_member(txn, ladder.id, Some(p[1].id)).await?);

            let rows = get_standings(txn, ladder.id).await?;
            assert_eq!(rows.len(), 1);
            assert_eq!(rows[0].user_id, p[0].id);
            assert_eq!(list_user_matches(txn, ladder.id, p[1].id, None).await?.len(), 1);
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn read_views_never_expose_the_password() -> Result<(), AppError> {
    let (state, _clock) = test_state().await?;

    with_txn(None, &state, |txn| {
        Box::pin(async move {
            let creator = seed_user(txn, "creator").await?;
            let locked = seed_ladder(
                txn,
                &creator,
                LadderSeed {
                    password: Some("pw".to_string()),
                    ..LadderSeed::default()
                },
            )
            .await?;
            let open = seed_ladder(txn, &creator, LadderSeed::default()).await?;
            let player = seed_user(txn, "player").await?;
            seed_member(txn, &locked, &player).await?;

            let all = list_ladders(txn).await?;
            assert_eq!(all.len(), 2);
            let locked_view = all.iter().find(|l| l.id == locked.id).unwrap();
            assert!(locked_view.has_password);
            let creator_view = locked_view.creator.as_ref().unwrap();
            assert_eq!(creator_view.id, creator.id);
            assert_eq!(creator_view.email, creator.email);
            let json = serde_json::to_value(locked_view).unwrap();
            assert!(json.get("password").is_none());

            let single = get_ladder(txn, open.id).await?;
            assert!(!single.has_password);
            expect_code(get_ladder(txn, open.id + 1000).await, ErrorCode::LadderNotFound);

            let created = list_ladders_by_creator(txn, creator.id).await?;
            let counts: Vec<(i64, u64)> =
                created.iter().map(|c| (c.ladder.id, c.member_count)).collect();
            assert!(counts.contains(&(locked.id, 1)));
            assert!(counts.contains(&(open.id, 0)));

            let joined = list_user_ladders(txn, player.id).await?;
            assert_eq!(joined.len(), 1);
            assert_eq!(joined[0].ladder.id, locked.id);
            assert_eq!(joined[0].joined_at, NOW);

            assert!(!is_member(txn, locked.id, None).await?);
            assert!(is_member(txn, locked.id, Some(player.id)).await?);
            Ok(())
        })
    })
    .await
}
