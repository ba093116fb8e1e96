//! Migration to create the house_images table.
//!
//! Gallery rows reference uploaded files by path; at most 5 per house,
//! enforced at the form layer.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(HouseImages::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(HouseImages::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(HouseImages::HouseId).integer().not_null())
                    .col(ColumnDef::new(HouseImages::FilePath).text().not_null())
                    .col(ColumnDef::new(HouseImages::Position).integer().not_null())
                    .col(
                        ColumnDef::new(HouseImages::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_house_images_house_id")
                            .from(HouseImages::Table, HouseImages::HouseId)
                            .to(Houses::Table, Houses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_house_images_house_id")
                    .table(HouseImages::Table)
                    .col(HouseImages::HouseId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_house_images_house_id").to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(HouseImages::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum HouseImages {
    Table,
    Id,
    HouseId,
    FilePath,
    Position,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Houses {
    Table,
    Id,
}
