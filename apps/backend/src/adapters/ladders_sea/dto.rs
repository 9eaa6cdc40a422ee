//! DTOs for ladders_sea adapter.

use time::OffsetDateTime;

/// DTO for creating a ladder. New ladders are always active.
#[derive(Debug, Clone)]
pub struct LadderCreate {
    pub name: String,
    pub password: Option<String>,
    pub start_date: OffsetDateTime,
    pub end_date: OffsetDateTime,
    pub created_by: i64,
    pub algorithm: String,
}
