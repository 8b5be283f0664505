//! Create poll table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Poll::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Poll::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Poll::Question).text().not_null())
                    .col(ColumnDef::new(Poll::OptionA).string_len(256).not_null())
                    .col(ColumnDef::new(Poll::OptionB).string_len(256).not_null())
                    .col(
                        ColumnDef::new(Poll::Category)
                            .string_len(64)
                            .not_null()
                            .default("general"),
                    )
                    .col(ColumnDef::new(Poll::VotesA).integer().not_null().default(0))
                    .col(ColumnDef::new(Poll::VotesB).integer().not_null().default(0))
                    .col(ColumnDef::new(Poll::IsActive).boolean().not_null().default(true))
                    .col(
                        ColumnDef::new(Poll::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: is_active (public listing and random selection)
        manager
            .create_index(
                Index::create()
                    .name("idx_poll_is_active")
                    .table(Poll::Table)
                    .col(Poll::IsActive)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Poll::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Poll {
    Table,
    Id,
    Question,
    OptionA,
    OptionB,
    Category,
    VotesA,
    VotesB,
    IsActive,
    CreatedAt,
}
