//! User entity model
//!
//! This module contains the SeaORM entity model for the users table, which
//! covers both administrative staff (is_staff) and tenant accounts.

use sea_orm::ActiveModelBehavior;
use sea_orm::entity::prelude::*;
use sea_orm::prelude::DateTimeWithTimeZone;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Login name; normalized from the email at creation (unique)
    pub username: String,

    /// Contact email, lowercased and trimmed (unique)
    pub email: String,

    /// Argon2 password hash; never the raw password
    pub password_hash: String,

    pub first_name: String,
    pub last_name: String,
    pub patronymic: String,
    pub phone: String,
    pub telegram: String,
    pub viber: String,
    pub birth_date: Option<Date>,

    /// Assigned role, if any (SET NULL on role removal)
    pub role_id: Option<i32>,

    /// Whether the account may sign in
    pub is_active: bool,

    /// Whether the user belongs to the administrative staff
    pub is_staff: bool,

    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::role::Entity",
        from = "Column::RoleId",
        to = "super::role::Column::Id"
    )]
    Role,
}

impl Related<super::role::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Role.def()
    }
}

impl Related<super::house::Entity> for Entity {
    fn to() -> RelationDef {
        super::house_staff::Relation::House.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::house_staff::Relation::User.def().rev())
    }
}

impl Model {
    /// Display name shown in grids: full name, falling back to the username.
    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.last_name, self.first_name);
        let full = full.trim();
        if full.is_empty() {
            self.username.clone()
        } else {
            full.to_string()
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::*;

    fn blank_user() -> Model {
        Model {
            id: 1,
            username: "admin@example.com".to_string(),
            email: "admin@example.com".to_string(),
            password_hash: String::new(),
            first_name: String::new(),
            last_name: String::new(),
            patronymic: String::new(),
            phone: String::new(),
            telegram: String::new(),
            viber: String::new(),
            birth_date: None,
            role_id: None,
            is_active: true,
            is_staff: true,
            created_at: chrono::Utc::now().into(),
        }
    }

    #[test]
    fn test_display_name_falls_back_to_username() {
        let user = blank_user();
        assert_eq!(user.display_name(), "admin@example.com");
    }

    #[test]
    fn test_display_name_prefers_full_name() {
        let user = Model {
            first_name: "Olena".to_string(),
            last_name: "Kovalenko".to_string(),
            ..blank_user()
        };
        assert_eq!(user.display_name(), "Kovalenko Olena");
    }

    #[test]
    fn test_display_name_with_single_name_part() {
        let user = Model {
            first_name: "Olena".to_string(),
            ..blank_user()
        };
        assert_eq!(user.display_name(), "Olena");
    }
}
