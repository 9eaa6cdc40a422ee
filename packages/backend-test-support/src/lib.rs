//! Backend test support utilities
//!
//! Shared by the backend's integration test binaries: unified logging
//! initialization and helpers for generating unique test data.

pub mod logging;
pub mod unique_helpers;
