//! Migration to create the master_requests table.
//!
//! Tenant-facing repair requests; inert data in this service, but the
//! requester/role references are RESTRICT, so users and roles with
//! requests cannot be deleted out from under them.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(MasterRequests::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(MasterRequests::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(MasterRequests::UserId).integer().not_null())
                    .col(
                        ColumnDef::new(MasterRequests::MasterTypeId)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(MasterRequests::MasterId).integer().null())
                    .col(
                        ColumnDef::new(MasterRequests::Status)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(ColumnDef::new(MasterRequests::Description).text().not_null())
                    .col(ColumnDef::new(MasterRequests::Comment).text().not_null())
                    .col(
                        ColumnDef::new(MasterRequests::PreferredTime)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_master_requests_user_id")
                            .from(MasterRequests::Table, MasterRequests::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_master_requests_master_type_id")
                            .from(MasterRequests::Table, MasterRequests::MasterTypeId)
                            .to(Roles::Table, Roles::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_master_requests_master_id")
                            .from(MasterRequests::Table, MasterRequests::MasterId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(MasterRequests::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum MasterRequests {
    Table,
    Id,
    UserId,
    MasterTypeId,
    MasterId,
    Status,
    Description,
    Comment,
    PreferredTime,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Roles {
    Table,
    Id,
}
