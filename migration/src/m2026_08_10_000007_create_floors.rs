//! Migration to create the floors table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Floors::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Floors::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Floors::SectionId).integer().not_null())
                    .col(ColumnDef::new(Floors::Number).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_floors_section_id")
                            .from(Floors::Table, Floors::SectionId)
                            .to(Sections::Table, Sections::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_floors_section_id")
                    .table(Floors::Table)
                    .col(Floors::SectionId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_floors_section_id").to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Floors::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Floors {
    Table,
    Id,
    SectionId,
    Number,
}

#[derive(DeriveIden)]
enum Sections {
    Table,
    Id,
}
