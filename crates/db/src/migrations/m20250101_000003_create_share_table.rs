//! Create share table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Share::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Share::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Share::TargetId).string_len(64).not_null())
                    .col(ColumnDef::new(Share::TargetType).integer().not_null())
                    .col(ColumnDef::new(Share::UserId).string_len(64).not_null())
                    .col(
                        ColumnDef::new(Share::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // No unique natural key: a user may share the same target many times.
        // Index: (target_id, target_type) for by-target counts and listings
        manager
            .create_index(
                Index::create()
                    .name("idx_share_target_type")
                    .table(Share::Table)
                    .col(Share::TargetId)
                    .col(Share::TargetType)
                    .to_owned(),
            )
            .await?;

        // Index: (target_type, user_id) for by-user counts and listings
        manager
            .create_index(
                Index::create()
                    .name("idx_share_type_user")
                    .table(Share::Table)
                    .col(Share::TargetType)
                    .col(Share::UserId)
                    .to_owned(),
            )
            .await?;

        // Index: created_at (for pagination)
        manager
            .create_index(
                Index::create()
                    .name("idx_share_created_at")
                    .table(Share::Table)
                    .col(Share::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Share::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Share {
    Table,
    Id,
    TargetId,
    TargetType,
    UserId,
    CreatedAt,
}
