//! Periodic deactivation of ladders whose end date has passed.

use std::time::Duration;

use sea_orm::ConnectionTrait;
use serde::Serialize;
use time::OffsetDateTime;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use crate::db::with_txn;
use crate::error::AppError;
use crate::repos::ladders as ladders_repo;
use crate::state::app_state::AppState;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SweepReport {
    /// Ladders this run flipped to inactive. A ladder switched off by
    /// someone else between the read and the update is not listed.
    pub deactivated: Vec<i64>,
}

/// Deactivate every active ladder with `end_date < now`.
///
/// Idempotent: a second run at the same instant finds nothing to do.
/// Memberships and matches are not touched.
pub async fn sweep_expired_ladders<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    now: OffsetDateTime,
) -> Result<SweepReport, AppError> {
    let expired: Vec<i64> = ladders_repo::list_active(conn)
        .await?
        .into_iter()
        .filter(|l| l.is_ended(now))
        .map(|l| l.id)
        .collect();

    if expired.is_empty() {
        debug!("ladder sweep found nothing to deactivate");
        return Ok(SweepReport::default());
    }

    let candidates = expired.len();
    let deactivated = ladders_repo::deactivate_many(conn, expired).await?;
    for ladder_id in &deactivated {
        info!(ladder_id, reason = "ended", "ladder_deactivated");
    }
    info!(
        candidates,
        deactivated = deactivated.len(),
        "ladder_sweep_completed"
    );

    Ok(SweepReport { deactivated })
}

/// Run the sweep every `interval` on its own task. The first run happens one
/// interval after startup.
pub fn spawn_sweep_loop(state: AppState, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.tick().await;
        loop {
            ticker.tick().await;
            let now = state.now();
            let result = with_txn(None, &state, move |txn| {
                Box::pin(async move { sweep_expired_ladders(txn, now).await })
            })
            .await;
            if let Err(err) = result {
                error!(code = %err.code(), error = %err, "ladder sweep failed");
            }
        }
    })
}
