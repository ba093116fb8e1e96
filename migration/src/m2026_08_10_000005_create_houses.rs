//! Migration to create the houses table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Houses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Houses::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Houses::Name).string_len(255).not_null())
                    .col(ColumnDef::new(Houses::Address).string_len(255).not_null())
                    .col(
                        ColumnDef::new(Houses::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Houses::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Houses::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Houses {
    Table,
    Id,
    Name,
    Address,
    CreatedAt,
    UpdatedAt,
}
