//! Create like table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Like::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Like::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Like::TargetId).string_len(64).not_null())
                    .col(ColumnDef::new(Like::TargetType).integer().not_null())
                    .col(ColumnDef::new(Like::UserId).string_len(64).not_null())
                    .col(
                        ColumnDef::new(Like::IsCancel)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Like::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Like::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Unique natural key: one like row per (target, type, user) triple.
        manager
            .create_index(
                Index::create()
                    .name("idx_like_target_type_user")
                    .table(Like::Table)
                    .col(Like::TargetId)
                    .col(Like::TargetType)
                    .col(Like::UserId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Index: (target_type, user_id) for by-user counts and listings
        manager
            .create_index(
                Index::create()
                    .name("idx_like_type_user")
                    .table(Like::Table)
                    .col(Like::TargetType)
                    .col(Like::UserId)
                    .to_owned(),
            )
            .await?;

        // Index: created_at (for pagination)
        manager
            .create_index(
                Index::create()
                    .name("idx_like_created_at")
                    .table(Like::Table)
                    .col(Like::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Like::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Like {
    Table,
    Id,
    TargetId,
    TargetType,
    UserId,
    IsCancel,
    CreatedAt,
    UpdatedAt,
}
