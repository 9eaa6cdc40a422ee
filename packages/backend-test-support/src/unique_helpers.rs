//! Test helpers for generating unique test data
//!
//! ULID suffixes keep parallel tests from colliding on unique columns
//! (user emails, ladder names).

use ulid::Ulid;

/// Generate a unique string in the format `{prefix}-{ulid}`
///
/// ```
/// use backend_test_support::unique_helpers::unique_str;
///
/// let a = unique_str("ladder");
/// let b = unique_str("ladder");
/// assert_ne!(a, b);
/// assert!(a.starts_with("ladder-"));
/// ```
pub fn unique_str(prefix: &str) -> String {
    format!("{}-{}", prefix, Ulid::new())
}

/// Generate a unique email address in the format `{prefix}-{ulid}@example.test`
///
/// ```
/// use backend_test_support::unique_helpers::unique_email;
///
/// let email = unique_email("player");
/// assert!(email.starts_with("player-"));
/// assert!(email.ends_with("@example.test"));
/// ```
pub fn unique_email(prefix: &str) -> String {
    format!("{}-{}@example.test", prefix, Ulid::new())
}
