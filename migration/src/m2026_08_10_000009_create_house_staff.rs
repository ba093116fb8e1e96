//! Migration to create the house_staff junction table.
//!
//! Assigns staff users to houses (many-to-many, replaced as a set on save).

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(HouseStaff::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(HouseStaff::HouseId).integer().not_null())
                    .col(ColumnDef::new(HouseStaff::UserId).integer().not_null())
                    .primary_key(
                        Index::create()
                            .col(HouseStaff::HouseId)
                            .col(HouseStaff::UserId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_house_staff_house_id")
                            .from(HouseStaff::Table, HouseStaff::HouseId)
                            .to(Houses::Table, Houses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_house_staff_user_id")
                            .from(HouseStaff::Table, HouseStaff::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(HouseStaff::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum HouseStaff {
    Table,
    HouseId,
    UserId,
}

#[derive(DeriveIden)]
enum Houses {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}
