use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_query::{ColumnDef, ForeignKeyAction, Index, Table};

#[derive(DeriveMigrationName)]
pub struct Migration;

// ----- Iden enums for tables & columns -----
#[derive(Iden)]
enum Users {
    Table,
    Id,
    Email,
    Name,
    ImageUrl,
    LastLogin,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Ladders {
    Table,
    Id,
    Name,
    Password,
    StartDate,
    EndDate,
    CreatedBy,
    IsActive,
    Algorithm,
    CreatedAt,
}

#[derive(Iden)]
enum LadderMembers {
    Table,
    Id,
    LadderId,
    UserId,
    JoinedAt,
    Points,
    WinStreak,
    LastMatchAt,
}

#[derive(Iden)]
enum Matches {
    Table,
    Id,
    LadderId,
    MatchDate,
    WinnerId,
    LoserId,
    CreatedAt,
    WinnerPoints,
    LoserPoints,
    StraightSets,
    WinStreakBonus,
    BagelSetsWonByWinner,
}

#[derive(Iden)]
enum MatchSets {
    Table,
    Id,
    MatchId,
    SetNumber,
    WinnerGames,
    LoserGames,
    WinnerTiebreak,
    LoserTiebreak,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // users
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(Users::Email).string().not_null())
                    .col(ColumnDef::new(Users::Name).string().not_null())
                    .col(ColumnDef::new(Users::ImageUrl).string().null())
                    .col(
                        ColumnDef::new(Users::LastLogin)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Users::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Users::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_users_email")
                    .table(Users::Table)
                    .col(Users::Email)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // ladders
        manager
            .create_table(
                Table::create()
                    .table(Ladders::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Ladders::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(Ladders::Name).text().not_null())
                    .col(ColumnDef::new(Ladders::Password).text().null())
                    .col(
                        ColumnDef::new(Ladders::StartDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Ladders::EndDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Ladders::CreatedBy).big_integer().not_null())
                    .col(
                        ColumnDef::new(Ladders::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Ladders::Algorithm)
                            .string()
                            .not_null()
                            .default("points_v1"),
                    )
                    .col(
                        ColumnDef::new(Ladders::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_ladders_created_by")
                            .from(Ladders::Table, Ladders::CreatedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_ladders_created_by")
                    .table(Ladders::Table)
                    .col(Ladders::CreatedBy)
                    .to_owned(),
            )
            .await?;

        // ladder_members
        manager
            .create_table(
                Table::create()
                    .table(LadderMembers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(LadderMembers::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(
                        ColumnDef::new(LadderMembers::LadderId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(LadderMembers::UserId).big_integer().not_null())
                    .col(
                        ColumnDef::new(LadderMembers::JoinedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(LadderMembers::Points)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(LadderMembers::WinStreak)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(LadderMembers::LastMatchAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_ladder_members_ladder_id")
                            .from(LadderMembers::Table, LadderMembers::LadderId)
                            .to(Ladders::Table, Ladders::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_ladder_members_user_id")
                            .from(LadderMembers::Table, LadderMembers::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // One membership per (ladder, player); the join gate relies on this under races.
        manager
            .create_index(
                Index::create()
                    .name("ux_ladder_members_ladder_user")
                    .table(LadderMembers::Table)
                    .col(LadderMembers::LadderId)
                    .col(LadderMembers::UserId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_ladder_members_user_id")
                    .table(LadderMembers::Table)
                    .col(LadderMembers::UserId)
                    .to_owned(),
            )
            .await?;

        // matches
        manager
            .create_table(
                Table::create()
                    .table(Matches::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Matches::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(Matches::LadderId).big_integer().not_null())
                    .col(
                        ColumnDef::new(Matches::MatchDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Matches::WinnerId).big_integer().not_null())
                    .col(ColumnDef::new(Matches::LoserId).big_integer().not_null())
                    .col(
                        ColumnDef::new(Matches::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Matches::WinnerPoints).integer().not_null())
                    .col(ColumnDef::new(Matches::LoserPoints).integer().not_null())
                    .col(
                        ColumnDef::new(Matches::StraightSets)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Matches::WinStreakBonus)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Matches::BagelSetsWonByWinner)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_matches_ladder_id")
                            .from(Matches::Table, Matches::LadderId)
                            .to(Ladders::Table, Ladders::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_matches_winner_id")
                            .from(Matches::Table, Matches::WinnerId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_matches_loser_id")
                            .from(Matches::Table, Matches::LoserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        for (name, col) in [
            ("ix_matches_ladder_id", Matches::LadderId),
            ("ix_matches_winner_id", Matches::WinnerId),
            ("ix_matches_loser_id", Matches::LoserId),
        ] {
            manager
                .create_index(
                    Index::create()
                        .name(name)
                        .table(Matches::Table)
                        .col(col)
                        .to_owned(),
                )
                .await?;
        }

        // match_sets
        manager
            .create_table(
                Table::create()
                    .table(MatchSets::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(MatchSets::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(MatchSets::MatchId).big_integer().not_null())
                    .col(ColumnDef::new(MatchSets::SetNumber).small_integer().not_null())
                    .col(ColumnDef::new(MatchSets::WinnerGames).small_integer().not_null())
                    .col(ColumnDef::new(MatchSets::LoserGames).small_integer().not_null())
                    .col(ColumnDef::new(MatchSets::WinnerTiebreak).small_integer().null())
                    .col(ColumnDef::new(MatchSets::LoserTiebreak).small_integer().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_match_sets_match_id")
                            .from(MatchSets::Table, MatchSets::MatchId)
                            .to(Matches::Table, Matches::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_match_sets_match_set_number")
                    .table(MatchSets::Table)
                    .col(MatchSets::MatchId)
                    .col(MatchSets::SetNumber)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // drop in reverse order; indexes go with their tables
        manager
            .drop_table(Table::drop().table(MatchSets::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Matches::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(LadderMembers::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Ladders::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).if_exists().to_owned())
            .await?;
        Ok(())
    }
}
