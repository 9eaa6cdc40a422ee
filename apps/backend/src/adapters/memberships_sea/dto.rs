//! DTOs for memberships_sea adapter.

use time::OffsetDateTime;

/// How a standing update moves the win streak.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreakUpdate {
    Increment,
    Reset,
}

/// Relative change applied to one membership row in a single UPDATE.
#[derive(Debug, Clone, Copy)]
pub struct StandingPatch {
    pub membership_id: i64,
    pub points_delta: i32,
    pub streak: StreakUpdate,
    pub last_match_at: OffsetDateTime,
}
