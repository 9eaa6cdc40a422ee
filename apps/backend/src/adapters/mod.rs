//! SeaORM adapters. Each function returns `sea_orm::DbErr`; repos translate.

pub mod ladders_sea;
pub mod matches_sea;
pub mod memberships_sea;
pub mod users_sea;
