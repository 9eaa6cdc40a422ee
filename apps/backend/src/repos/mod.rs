//! Repository functions: domain models over the SeaORM adapters.

pub mod ladders;
pub mod matches;
pub mod memberships;
pub mod users;
