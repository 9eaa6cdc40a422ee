use std::future::Future;
use std::pin::Pin;

use actix_web::HttpRequest;
use sea_orm::{DatabaseTransaction, TransactionTrait};
use tracing::debug;

use super::txn_policy::{self, TxnPolicy};
use crate::error::AppError;
use crate::state::app_state::AppState;

/// Boxed future borrowed from the transaction handed to a `with_txn` body.
pub type TxnFuture<'a, R> = Pin<Box<dyn Future<Output = Result<R, AppError>> + Send + 'a>>;

/// Run `f` inside one database transaction.
///
/// Begins a transaction on the state's connection, runs the body, then
/// commits or rolls back according to [`txn_policy::current`] on `Ok`.
/// Any `Err` rolls back and is returned unchanged.
///
/// Only the request path is kept from `req`, so the returned future is
/// `Send` and can run on a spawned task.
pub fn with_txn<'s, R, F>(
    req: Option<&HttpRequest>,
    state: &'s AppState,
    f: F,
) -> impl Future<Output = Result<R, AppError>> + 's
where
    F: for<'a> FnOnce(&'a DatabaseTransaction) -> TxnFuture<'a, R> + 's,
    R: 's,
{
    let path = req.map(|r| r.path().to_string());
    run_in_txn(path, state, f)
}

async fn run_in_txn<R, F>(path: Option<String>, state: &AppState, f: F) -> Result<R, AppError>
where
    F: for<'a> FnOnce(&'a DatabaseTransaction) -> TxnFuture<'a, R>,
{
    let txn = state.db().begin().await?;
    let out = f(&txn).await;

    match out {
        Ok(val) => {
            match txn_policy::current() {
                TxnPolicy::CommitOnOk => txn.commit().await?,
                TxnPolicy::RollbackOnOk => txn.rollback().await?,
            }
            Ok(val)
        }
        Err(err) => {
            if let Some(path) = path {
                debug!(path = %path, code = %err.code(), "rolling back request transaction");
            }
            // Best-effort rollback; the body's error wins
            let _ = txn.rollback().await;
            Err(err)
        }
    }
}
