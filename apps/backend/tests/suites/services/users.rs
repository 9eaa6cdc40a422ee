use backend_test_support::unique_helpers::unique_email;
use ladder_backend::db::with_txn;
use ladder_backend::services::users::{ensure_user, require_user, require_user_by_id};
use ladder_backend::{AppError, ErrorCode};
use time::Duration;

use crate::support::expect_code;
use crate::support::factory::{test_state, NOW};

#[tokio::test]
async fn ensure_user_creates_then_refreshes() -> Result<(), AppError> {
    let (state, _clock) = test_state().await?;

    with_txn(None, &state, |txn| {
        Box::pin(async move {
            let email = unique_email("Alice");
            let first = ensure_user(txn, &email, "Alice", None, NOW).await?;
            assert_eq!(first.email, email.to_lowercase());
            assert_eq!(first.name, "Alice");
            assert_eq!(first.last_login, NOW);

            let later = NOW + Duration::hours(2);
            let second = ensure_user(
                txn,
                &email.to_uppercase(),
                "Alice Smith",
                Some("https://img.example.test/a.png"),
                later,
            )
            .await?;
            assert_eq!(second.id, first.id);
            assert_eq!(second.name, "Alice Smith");
            assert_eq!(
                second.image_url.as_deref(),
                Some("https://img.example.test/a.png")
            );
            assert_eq!(second.last_login, later);
            assert_eq!(second.created_at, NOW);
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn blank_name_falls_back_to_local_part() -> Result<(), AppError> {
    let (state, _clock) = test_state().await?;

    with_txn(None, &state, |txn| {
        Box::pin(async move {
            let user = ensure_user(txn, "Sam.Player@Example.test", "  ", None, NOW).await?;
            assert_eq!(user.email, "sam.player@example.test");
            assert_eq!(user.name, "sam.player");

            expect_code(
                ensure_user(txn, "   ", "x", None, NOW).await,
                ErrorCode::ValidationError,
            );
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn require_user_paths() -> Result<(), AppError> {
    let (state, _clock) = test_state().await?;

    with_txn(None, &state, |txn| {
        Box::pin(async move {
            let user = ensure_user(txn, &unique_email("bo"), "Bo", None, NOW).await?;

            assert_eq!(require_user(txn, Some(user.email.as_str())).await?.id, user.id);
            assert_eq!(require_user_by_id(txn, user.id).await?.email, user.email);

            expect_code(require_user(txn, None).await, ErrorCode::UserNotAuthenticated);
            expect_code(
                require_user(txn, Some("ghost@example.test")).await,
                ErrorCode::UserNotFound,
            );
            expect_code(
                require_user_by_id(txn, user.id + 1000).await,
                ErrorCode::UserNotFound,
            );
            Ok(())
        })
    })
    .await
}
