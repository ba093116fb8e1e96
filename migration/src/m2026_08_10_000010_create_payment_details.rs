//! Migration to create the payment_details table (company requisites).

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PaymentDetails::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PaymentDetails::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(PaymentDetails::CompanyName)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PaymentDetails::Requisites)
                            .text()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PaymentDetails::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum PaymentDetails {
    Table,
    Id,
    CompanyName,
    Requisites,
}
