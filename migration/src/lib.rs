//! Database migrations for the back-office service.
//!
//! This module contains all database migrations using SeaORM Migration.

pub use sea_orm_migration::prelude::*;

mod m2026_08_10_000001_create_permissions;
mod m2026_08_10_000002_create_roles;
mod m2026_08_10_000003_create_role_permissions;
mod m2026_08_10_000004_create_users;
mod m2026_08_10_000005_create_houses;
mod m2026_08_10_000006_create_sections;
mod m2026_08_10_000007_create_floors;
mod m2026_08_10_000008_create_house_images;
mod m2026_08_10_000009_create_house_staff;
mod m2026_08_10_000010_create_payment_details;
mod m2026_08_10_000011_create_messages;
mod m2026_08_10_000012_create_master_requests;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m2026_08_10_000001_create_permissions::Migration),
            Box::new(m2026_08_10_000002_create_roles::Migration),
            Box::new(m2026_08_10_000003_create_role_permissions::Migration),
            Box::new(m2026_08_10_000004_create_users::Migration),
            Box::new(m2026_08_10_000005_create_houses::Migration),
            Box::new(m2026_08_10_000006_create_sections::Migration),
            Box::new(m2026_08_10_000007_create_floors::Migration),
            Box::new(m2026_08_10_000008_create_house_images::Migration),
            Box::new(m2026_08_10_000009_create_house_staff::Migration),
            Box::new(m2026_08_10_000010_create_payment_details::Migration),
            Box::new(m2026_08_10_000011_create_messages::Migration),
            Box::new(m2026_08_10_000012_create_master_requests::Migration),
        ]
    }
}
