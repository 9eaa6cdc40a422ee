//! One tracing subscriber per test process.
//!
//! Unit tests (through the library's ctor) and every integration binary call
//! [`init`]; only the first call installs anything.

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

static INITIALIZED: OnceCell<()> = OnceCell::new();

const QUIET: &str = "warn";

/// Filter directive: `TEST_LOG`, then `RUST_LOG`, then `warn`.
fn directive() -> String {
    std::env::var("TEST_LOG")
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_else(|_| QUIET.to_string())
}

/// Install a compact subscriber writing through the test writer so the
/// harness captures output per test. Idempotent.
pub fn init() {
    INITIALIZED.get_or_init(|| {
        let filter = EnvFilter::try_new(directive()).unwrap_or_else(|_| EnvFilter::new(QUIET));
        // Another subscriber may already be installed; that one wins.
        let _ = fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .without_time()
            .with_target(false)
            .try_init();
    });
}
