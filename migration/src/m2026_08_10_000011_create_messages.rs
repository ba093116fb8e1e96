//! Migration to create the messages table.
//!
//! Broadcast messages are inert data here (no delivery logic), but the
//! house reference is RESTRICT so a house with messages cannot be deleted.
//! Section/floor references stay nullable SET NULL, otherwise the editor's
//! replace-all of a house's children would be blocked by any message.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Messages::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Messages::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Messages::Subject).string_len(255).not_null())
                    .col(ColumnDef::new(Messages::Body).text().not_null())
                    .col(ColumnDef::new(Messages::HouseId).integer().not_null())
                    .col(ColumnDef::new(Messages::SectionId).integer().null())
                    .col(ColumnDef::new(Messages::FloorId).integer().null())
                    .col(
                        ColumnDef::new(Messages::OnlyDebtors)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Messages::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_messages_house_id")
                            .from(Messages::Table, Messages::HouseId)
                            .to(Houses::Table, Houses::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_messages_section_id")
                            .from(Messages::Table, Messages::SectionId)
                            .to(Sections::Table, Sections::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_messages_floor_id")
                            .from(Messages::Table, Messages::FloorId)
                            .to(Floors::Table, Floors::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Messages::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Messages {
    Table,
    Id,
    Subject,
    Body,
    HouseId,
    SectionId,
    FloorId,
    OnlyDebtors,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Houses {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Sections {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Floors {
    Table,
    Id,
}
