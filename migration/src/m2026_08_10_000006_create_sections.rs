//! Migration to create the sections table.
//!
//! Sections are owned by a house and are fully replaced on every save of
//! the house aggregate, so the FK cascades.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Sections::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Sections::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Sections::HouseId).integer().not_null())
                    .col(ColumnDef::new(Sections::Name).string_len(255).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_sections_house_id")
                            .from(Sections::Table, Sections::HouseId)
                            .to(Houses::Table, Houses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_sections_house_id")
                    .table(Sections::Table)
                    .col(Sections::HouseId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_sections_house_id").to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Sections::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Sections {
    Table,
    Id,
    HouseId,
    Name,
}

#[derive(DeriveIden)]
enum Houses {
    Table,
    Id,
}
