#![allow(dead_code)]

use std::fmt::Debug;

use ladder_backend::{AppError, ErrorCode};

pub mod factory;

/// Unwrap the error of `result` and check its code.
#[track_caller]
pub fn expect_code<T: Debug>(result: Result<T, AppError>, expected: ErrorCode) -> AppError {
    match result {
        Ok(value) => panic!("expected {expected:?}, got Ok({value:?})"),
        Err(err) => {
            assert_eq!(err.code(), expected, "unexpected error: {err}");
            err
        }
    }
}
