pub mod ladders;
pub mod lifecycle;
pub mod match_history;
pub mod match_reporting;
pub mod membership;
pub mod standings;
pub mod users;
