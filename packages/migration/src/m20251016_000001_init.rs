use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_query::{ColumnDef, ForeignKeyAction, Index, Table};

#[derive(DeriveMigrationName)]
pub struct Migration;

// ----- Iden enums for tables & columns -----
#[derive(Iden)]
enum Users {
    Table,
    Id,
    Username,
    Email,
    PasswordHash,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Courses {
    Table,
    Id,
    Name,
    HoleCount,
    Location,
    CreatedAt,
}

#[derive(Iden)]
enum CourseHoles {
    Table,
    Id,
    CourseId,
    HoleNumber,
    Par,
    Length,
}

#[derive(Iden)]
enum Rounds {
    Table,
    Id,
    UserId,
    CourseId,
    PlayedAt,
    WeatherCode,
}

#[derive(Iden)]
enum RoundScores {
    Table,
    Id,
    RoundId,
    HoleNumber,
    Strokes,
    OutOfBounds,
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
                    .col(ColumnDef::new(Users::Username).string().not_null())
                    .col(ColumnDef::new(Users::Email).string().not_null())
                    .col(ColumnDef::new(Users::PasswordHash).string().not_null())
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
                    .name("ux_users_username")
                    .table(Users::Table)
                    .col(Users::Username)
                    .unique()
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

        // courses
        manager
            .create_table(
                Table::create()
                    .table(Courses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Courses::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(Courses::Name).string().not_null())
                    .col(
                        ColumnDef::new(Courses::HoleCount)
                            .small_integer()
                            .not_null()
                            .check(Expr::col(Courses::HoleCount).gt(0)),
                    )
                    .col(ColumnDef::new(Courses::Location).string().not_null())
                    .col(
                        ColumnDef::new(Courses::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_courses_name")
                    .table(Courses::Table)
                    .col(Courses::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // course_holes
        manager
            .create_table(
                Table::create()
                    .table(CourseHoles::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CourseHoles::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(CourseHoles::CourseId).big_integer().not_null())
                    .col(
                        ColumnDef::new(CourseHoles::HoleNumber)
                            .small_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(CourseHoles::Par).small_integer().not_null())
                    .col(ColumnDef::new(CourseHoles::Length).integer().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_course_holes_course_id")
                            .from(CourseHoles::Table, CourseHoles::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_course_holes_course_hole")
                    .table(CourseHoles::Table)
                    .col(CourseHoles::CourseId)
                    .col(CourseHoles::HoleNumber)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // rounds
        manager
            .create_table(
                Table::create()
                    .table(Rounds::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Rounds::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(Rounds::UserId).big_integer().not_null())
                    .col(ColumnDef::new(Rounds::CourseId).big_integer().not_null())
                    .col(
                        ColumnDef::new(Rounds::PlayedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Rounds::WeatherCode)
                            .string_len(16)
                            .not_null()
                            .default(""),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_rounds_user_id")
                            .from(Rounds::Table, Rounds::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_rounds_course_id")
                            .from(Rounds::Table, Rounds::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_rounds_user_course")
                    .table(Rounds::Table)
                    .col(Rounds::UserId)
                    .col(Rounds::CourseId)
                    .to_owned(),
            )
            .await?;

        // round_scores
        manager
            .create_table(
                Table::create()
                    .table(RoundScores::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RoundScores::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(RoundScores::RoundId).big_integer().not_null())
                    .col(
                        ColumnDef::new(RoundScores::HoleNumber)
                            .small_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(RoundScores::Strokes).small_integer().not_null())
                    .col(
                        ColumnDef::new(RoundScores::OutOfBounds)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_round_scores_round_id")
                            .from(RoundScores::Table, RoundScores::RoundId)
                            .to(Rounds::Table, Rounds::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_round_scores_round_hole")
                    .table(RoundScores::Table)
                    .col(RoundScores::RoundId)
                    .col(RoundScores::HoleNumber)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // drop in reverse order + drop index before table
        manager
            .drop_index(
                Index::drop()
                    .name("ux_round_scores_round_hole")
                    .table(RoundScores::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(RoundScores::Table).to_owned())
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("ix_rounds_user_course")
                    .table(Rounds::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(Rounds::Table).to_owned())
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("ux_course_holes_course_hole")
                    .table(CourseHoles::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(CourseHoles::Table).to_owned())
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("ux_courses_name")
                    .table(Courses::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(Courses::Table).to_owned())
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("ux_users_email")
                    .table(Users::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("ux_users_username")
                    .table(Users::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;

        Ok(())
    }
}
