//! House entity model
//!
//! The house is the aggregate root of the section/floor hierarchy, the
//! image gallery and the staff assignment set.

use sea_orm::ActiveModelBehavior;
use sea_orm::entity::prelude::*;
use sea_orm::prelude::DateTimeWithTimeZone;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "houses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Display name of the building
    pub name: String,

    /// Postal address
    pub address: String,

    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::section::Entity")]
    Section,
    #[sea_orm(has_many = "super::house_image::Entity")]
    HouseImage,
    #[sea_orm(has_many = "super::message::Entity")]
    Message,
}

impl Related<super::section::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Section.def()
    }
}

impl Related<super::house_image::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::HouseImage.def()
    }
}

impl Related<super::message::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Message.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        super::house_staff::Relation::User.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::house_staff::Relation::House.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
