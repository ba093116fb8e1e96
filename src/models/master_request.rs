//! Master (repair) request entity model
//!
//! Inert data in this service; protects its requester and master type from
//! deletion via RESTRICT references.

use sea_orm::ActiveModelBehavior;
use sea_orm::entity::prelude::*;
use sea_orm::prelude::DateTimeWithTimeZone;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "master_requests")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Tenant who filed the request
    pub user_id: i32,
    /// Role describing which kind of master is needed
    pub master_type_id: i32,
    /// Assigned staff member, if any
    pub master_id: Option<i32>,
    pub status: String,
    pub description: String,
    pub comment: String,
    pub preferred_time: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
    #[sea_orm(
        belongs_to = "super::role::Entity",
        from = "Column::MasterTypeId",
        to = "super::role::Column::Id"
    )]
    MasterType,
}

impl ActiveModelBehavior for ActiveModel {}
