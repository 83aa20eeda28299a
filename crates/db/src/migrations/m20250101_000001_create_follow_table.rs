//! Create follow table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Follow::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Follow::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Follow::TargetId).string_len(64).not_null())
                    .col(ColumnDef::new(Follow::TargetType).integer().not_null())
                    .col(ColumnDef::new(Follow::UserId).string_len(64).not_null())
                    .col(
                        ColumnDef::new(Follow::IsCancel)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Follow::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Follow::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Unique natural key: one follow row per (target, type, user) triple.
        // Backs the ON CONFLICT upsert that keeps concurrent activations from
        // inserting duplicates.
        manager
            .create_index(
                Index::create()
                    .name("idx_follow_target_type_user")
                    .table(Follow::Table)
                    .col(Follow::TargetId)
                    .col(Follow::TargetType)
                    .col(Follow::UserId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Index: (target_type, user_id) for by-user counts and listings
        manager
            .create_index(
                Index::create()
                    .name("idx_follow_type_user")
                    .table(Follow::Table)
                    .col(Follow::TargetType)
                    .col(Follow::UserId)
                    .to_owned(),
            )
            .await?;

        // Index: created_at (for pagination)
        manager
            .create_index(
                Index::create()
                    .name("idx_follow_created_at")
                    .table(Follow::Table)
                    .col(Follow::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Follow::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Follow {
    Table,
    Id,
    TargetId,
    TargetType,
    UserId,
    IsCancel,
    CreatedAt,
    UpdatedAt,
}
