//! # User Repository
//!
//! Staff account CRUD plus the filterable grid query behind the
//! `/admin/users/data` endpoint. Passwords are hashed with Argon2 before
//! anything touches the database.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, IntoActiveModel,
    ModelTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

use crate::error::RepositoryError;
use crate::forms::{ValidatedUserCreate, ValidatedUserUpdate};
use crate::models::{role, user, Role, User};

/// Filters applied to the staff grid. Absent fields do not constrain the
/// result set.
#[derive(Debug, Clone, Default)]
pub struct UserGridFilter {
    /// Substring matched against first name, last name and username.
    pub name: Option<String>,
    /// Substring matched against the phone column.
    pub phone: Option<String>,
    /// Substring matched against the email column.
    pub email: Option<String>,
    /// Exact role id.
    pub role_id: Option<i32>,
    /// Tri-state: `None` matches both active and disabled accounts.
    pub is_active: Option<bool>,
}

/// One grid row with the role name already joined in.
#[derive(Debug, Clone)]
pub struct UserGridRow {
    pub user: user::Model,
    pub role_name: Option<String>,
}

pub struct UserRepository<'a> {
    db: &'a DatabaseConnection,
}

/// Hashes a raw password with a fresh random salt.
pub fn hash_password(raw: &str) -> Result<String, RepositoryError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(raw.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| RepositoryError::Storage(format!("password hashing failed: {err}")))
}

/// Verifies a raw password against a stored hash.
pub fn verify_password(raw: &str, stored_hash: &str) -> bool {
    PasswordHash::new(stored_hash)
        .map(|parsed| {
            Argon2::default()
                .verify_password(raw.as_bytes(), &parsed)
                .is_ok()
        })
        .unwrap_or(false)
}

impl<'a> UserRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Paged, filtered staff grid. Only staff accounts appear, ordered by id.
    pub async fn grid(
        &self,
        filter: &UserGridFilter,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<UserGridRow>, u64), RepositoryError> {
        let mut condition = Condition::all().add(user::Column::IsStaff.eq(true));

        if let Some(fragment) = filter.name.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            condition = condition.add(
                Condition::any()
                    .add(user::Column::FirstName.contains(fragment))
                    .add(user::Column::LastName.contains(fragment))
                    .add(user::Column::Username.contains(fragment)),
            );
        }
        if let Some(fragment) = filter.phone.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            condition = condition.add(user::Column::Phone.contains(fragment));
        }
        if let Some(fragment) = filter.email.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            condition = condition.add(user::Column::Email.contains(fragment));
        }
        if let Some(role_id) = filter.role_id {
            condition = condition.add(user::Column::RoleId.eq(role_id));
        }
        if let Some(is_active) = filter.is_active {
            condition = condition.add(user::Column::IsActive.eq(is_active));
        }

        let paginator = User::find()
            .filter(condition.clone())
            .find_also_related(Role)
            .order_by_asc(user::Column::Id)
            .paginate(self.db, per_page.max(1));
        let total = paginator.num_items().await?;
        let rows = paginator.fetch_page(page.saturating_sub(1)).await?;

        Ok((
            rows.into_iter()
                .map(|(u, r)| UserGridRow {
                    user: u,
                    role_name: r.map(|r| r.name),
                })
                .collect(),
            total,
        ))
    }

    pub async fn get_user(&self, id: i32) -> Result<Option<UserGridRow>, RepositoryError> {
        let found = User::find_by_id(id)
            .find_also_related(Role)
            .one(self.db)
            .await?;
        Ok(found.map(|(u, r)| UserGridRow {
            user: u,
            role_name: r.map(|r| r.name),
        }))
    }

    /// Creates a staff account. Uniqueness of username and email is enforced
    /// by the database and surfaces as a conflict.
    pub async fn create_user(
        &self,
        input: ValidatedUserCreate,
    ) -> Result<user::Model, RepositoryError> {
        self.ensure_role_exists(input.role_id).await?;
        let password_hash = hash_password(&input.password)?;

        let model = user::ActiveModel {
            username: Set(input.username),
            email: Set(input.email),
            password_hash: Set(password_hash),
            first_name: Set(input.first_name),
            last_name: Set(input.last_name),
            patronymic: Set(String::new()),
            phone: Set(input.phone),
            telegram: Set(String::new()),
            viber: Set(String::new()),
            birth_date: Set(None),
            role_id: Set(input.role_id),
            is_active: Set(input.is_active),
            is_staff: Set(true),
            created_at: Set(Utc::now().into()),
            ..Default::default()
        };
        Ok(model.insert(self.db).await?)
    }

    /// Updates a staff account. The password is rehashed only when a new one
    /// was supplied.
    pub async fn update_user(
        &self,
        id: i32,
        input: ValidatedUserUpdate,
    ) -> Result<user::Model, RepositoryError> {
        self.ensure_role_exists(input.role_id).await?;
        let existing = User::find_by_id(id)
            .one(self.db)
            .await?
            .ok_or_else(|| RepositoryError::NotFound(format!("user {} not found", id)))?;

        let mut active = existing.into_active_model();
        active.username = Set(input.username);
        active.email = Set(input.email);
        active.first_name = Set(input.first_name);
        active.last_name = Set(input.last_name);
        active.phone = Set(input.phone);
        active.role_id = Set(input.role_id);
        active.is_active = Set(input.is_active);
        if let Some(raw) = input.password {
            active.password_hash = Set(hash_password(&raw)?);
        }
        Ok(active.update(self.db).await?)
    }

    /// Deletes an account. Master requests referencing the user block the
    /// delete and surface as a protected-reference conflict.
    pub async fn delete_user(&self, id: i32) -> Result<(), RepositoryError> {
        let existing = User::find_by_id(id)
            .one(self.db)
            .await?
            .ok_or_else(|| RepositoryError::NotFound(format!("user {} not found", id)))?;

        existing.delete(self.db).await.map_err(|err| {
            RepositoryError::database_or_protected(
                err,
                "The user is referenced by master requests and cannot be deleted",
            )
        })?;
        Ok(())
    }

    /// Roles offered in the user form role selector.
    pub async fn role_options(&self) -> Result<Vec<role::Model>, RepositoryError> {
        Ok(Role::find().order_by_asc(role::Column::Id).all(self.db).await?)
    }

    async fn ensure_role_exists(&self, role_id: Option<i32>) -> Result<(), RepositoryError> {
        if let Some(id) = role_id {
            if Role::find_by_id(id).one(self.db).await?.is_none() {
                return Err(RepositoryError::validation_error(format!(
                    "role {} does not exist",
                    id
                )));
            }
        }
        Ok(())
    }
}
