//! Error codes for the ladder backend API.
//!
//! This module defines all error codes used throughout the application.
//! Add new codes here; never pass ad-hoc strings as error codes.
//!
//! All error codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings
//! that appear in HTTP responses.

use core::fmt;

/// Centralized error codes for the ladder backend API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Authentication & Authorization
    /// No authenticated identity on the request
    UserNotAuthenticated,
    /// Bearer token present but unusable
    UnauthorizedInvalidJwt,
    /// Bearer token expired
    UnauthorizedExpiredJwt,
    /// Player holds no membership in the ladder
    NotAMember,
    /// Operation reserved for the ladder's creator
    NotLadderCreator,

    // Ladder preconditions
    /// Ladder has been deactivated
    LadderInactive,
    /// Ladder end date has passed
    LadderEnded,
    /// Submitted ladder password does not match
    InvalidPassword,

    // Request Validation
    /// Ladder start date is not before its end date
    InvalidDateRange,
    /// Ladder names a scoring algorithm that does not exist
    UnknownAlgorithm,
    /// Malformed set list in a match report
    InvalidSets,
    /// General validation error
    ValidationError,
    /// General bad request error
    BadRequest,

    // Resource Not Found
    LadderNotFound,
    UserNotFound,
    /// General not found error
    NotFound,

    // Business Logic Conflicts
    /// Player already holds a membership in the ladder
    AlreadyMember,
    /// Unique email constraint
    UniqueEmail,
    /// Generic conflict (fallback for unmatched conflicts)
    Conflict,

    // System Errors
    DbError,
    DbUnavailable,
    DbTimeout,
    Internal,
    ConfigError,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    ///
    /// This is the exact string that appears in HTTP responses.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::UserNotAuthenticated => "USER_NOT_AUTHENTICATED",
            Self::UnauthorizedInvalidJwt => "UNAUTHORIZED_INVALID_JWT",
            Self::UnauthorizedExpiredJwt => "UNAUTHORIZED_EXPIRED_JWT",
            Self::NotAMember => "NOT_A_MEMBER",
            Self::NotLadderCreator => "NOT_LADDER_CREATOR",

            Self::LadderInactive => "LADDER_INACTIVE",
            Self::LadderEnded => "LADDER_ENDED",
            Self::InvalidPassword => "INVALID_PASSWORD",

            Self::InvalidDateRange => "INVALID_DATE_RANGE",
            Self::UnknownAlgorithm => "UNKNOWN_ALGORITHM",
            Self::InvalidSets => "INVALID_SETS",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::BadRequest => "BAD_REQUEST",

            Self::LadderNotFound => "LADDER_NOT_FOUND",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",

            Self::AlreadyMember => "ALREADY_MEMBER",
            Self::UniqueEmail => "UNIQUE_EMAIL",
            Self::Conflict => "CONFLICT",

            Self::DbError => "DB_ERROR",
            Self::DbUnavailable => "DB_UNAVAILABLE",
            Self::DbTimeout => "DB_TIMEOUT",
            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
