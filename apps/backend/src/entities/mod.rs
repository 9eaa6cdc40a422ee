pub mod ladder_members;
pub mod ladders;
pub mod match_sets;
pub mod matches;
pub mod users;

pub use ladder_members::Entity as LadderMembers;
pub use ladder_members::Model as LadderMember;
pub use ladders::Entity as Ladders;
pub use ladders::Model as Ladder;
pub use match_sets::Entity as MatchSets;
pub use match_sets::Model as MatchSet;
pub use matches::Entity as Matches;
pub use matches::Model as Match;
pub use users::Entity as Users;
pub use users::Model as User;
