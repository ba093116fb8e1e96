//! # Role Repository
//!
//! Reads and writes the role/permission matrix. The matrix save is a
//! replace-all: the submitted grants become the complete assignment set for
//! every role in one transaction.

use std::collections::{BTreeMap, BTreeSet};

use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, IntoActiveModel, ModelTrait, QueryOrder,
    Set, TransactionTrait,
};

use crate::error::RepositoryError;
use crate::models::{permission, role, role_permission, Permission, Role, RolePermission};

/// The full matrix as read models: every role, every permission, and the
/// grant set as (role_id, permission_id) pairs.
#[derive(Debug, Clone)]
pub struct PermissionMatrix {
    pub roles: Vec<role::Model>,
    pub permissions: Vec<permission::Model>,
    pub grants: BTreeSet<(i32, i32)>,
}

pub struct RoleRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> RoleRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn matrix(&self) -> Result<PermissionMatrix, RepositoryError> {
        let roles = Role::find().order_by_asc(role::Column::Id).all(self.db).await?;
        let permissions = Permission::find()
            .order_by_asc(permission::Column::Id)
            .all(self.db)
            .await?;
        let grants = RolePermission::find()
            .all(self.db)
            .await?
            .into_iter()
            .map(|row| (row.role_id, row.permission_id))
            .collect();

        Ok(PermissionMatrix {
            roles,
            permissions,
            grants,
        })
    }

    /// Replaces the grant set. `grants` maps role id to the permission ids
    /// that role should hold; roles absent from the map lose all grants.
    /// Unknown role or permission ids reject the whole submission.
    pub async fn set_matrix(
        &self,
        grants: &BTreeMap<i32, Vec<i32>>,
    ) -> Result<(), RepositoryError> {
        let known_roles: BTreeSet<i32> = Role::find()
            .all(self.db)
            .await?
            .into_iter()
            .map(|r| r.id)
            .collect();
        let known_permissions: BTreeSet<i32> = Permission::find()
            .all(self.db)
            .await?
            .into_iter()
            .map(|p| p.id)
            .collect();

        for (role_id, permission_ids) in grants {
            if !known_roles.contains(role_id) {
                return Err(RepositoryError::validation_error(format!(
                    "role {} does not exist",
                    role_id
                )));
            }
            for permission_id in permission_ids {
                if !known_permissions.contains(permission_id) {
                    return Err(RepositoryError::validation_error(format!(
                        "permission {} does not exist",
                        permission_id
                    )));
                }
            }
        }

        let txn = self.db.begin().await?;
        RolePermission::delete_many().exec(&txn).await?;
        for (role_id, permission_ids) in grants {
            let unique: BTreeSet<i32> = permission_ids.iter().copied().collect();
            for permission_id in unique {
                role_permission::ActiveModel {
                    role_id: Set(*role_id),
                    permission_id: Set(permission_id),
                }
                .insert(&txn)
                .await?;
            }
        }
        txn.commit().await?;
        Ok(())
    }

    pub async fn create_role(&self, name: &str) -> Result<role::Model, RepositoryError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(RepositoryError::validation_error("role name is required"));
        }
        let model = role::ActiveModel {
            name: Set(name.to_string()),
            ..Default::default()
        };
        Ok(model.insert(self.db).await?)
    }

    pub async fn rename_role(&self, id: i32, name: &str) -> Result<role::Model, RepositoryError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(RepositoryError::validation_error("role name is required"));
        }
        let existing = Role::find_by_id(id)
            .one(self.db)
            .await?
            .ok_or_else(|| RepositoryError::NotFound(format!("role {} not found", id)))?;
        let mut active = existing.into_active_model();
        active.name = Set(name.to_string());
        Ok(active.update(self.db).await?)
    }

    /// Deletes a role. Users pointing at it fall back to no role via
    /// SET NULL; master requests typed by it block the delete.
    pub async fn delete_role(&self, id: i32) -> Result<(), RepositoryError> {
        let existing = Role::find_by_id(id)
            .one(self.db)
            .await?
            .ok_or_else(|| RepositoryError::NotFound(format!("role {} not found", id)))?;

        existing.delete(self.db).await.map_err(|err| {
            RepositoryError::database_or_protected(
                err,
                "The role is referenced by master requests and cannot be deleted",
            )
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::ConnectOptions;

    async fn setup_test_db() -> DatabaseConnection {
        let mut opt = ConnectOptions::new("sqlite::memory:".to_owned());
        opt.max_connections(1).sqlx_logging(false);
        let db = sea_orm::Database::connect(opt)
            .await
            .expect("Failed to init test DB");

        use migration::MigratorTrait;
        migration::Migrator::up(&db, None).await.unwrap();
        db
    }

    async fn insert_permission(db: &DatabaseConnection, name: &str, code: &str) -> i32 {
        permission::ActiveModel {
            name: Set(name.to_string()),
            code: Set(code.to_string()),
            ..Default::default()
        }
        .insert(db)
        .await
        .unwrap()
        .id
    }

    #[tokio::test]
    async fn test_matrix_reflects_grants() {
        let db = setup_test_db().await;
        let repo = RoleRepository::new(&db);

        let admin = repo.create_role("Administrator").await.unwrap();
        let viewer = repo.create_role("Viewer").await.unwrap();
        let read = insert_permission(&db, "Read houses", "houses.read").await;
        let write = insert_permission(&db, "Edit houses", "houses.write").await;

        let mut grants = BTreeMap::new();
        grants.insert(admin.id, vec![read, write]);
        grants.insert(viewer.id, vec![read]);
        repo.set_matrix(&grants).await.unwrap();

        let matrix = repo.matrix().await.unwrap();
        assert_eq!(matrix.roles.len(), 2);
        assert_eq!(matrix.permissions.len(), 2);
        assert_eq!(matrix.grants.len(), 3);
        assert!(matrix.grants.contains(&(viewer.id, read)));
        assert!(!matrix.grants.contains(&(viewer.id, write)));
    }

    #[tokio::test]
    async fn test_set_matrix_replaces_previous_grants() {
        let db = setup_test_db().await;
        let repo = RoleRepository::new(&db);

        let admin = repo.create_role("Administrator").await.unwrap();
        let read = insert_permission(&db, "Read houses", "houses.read").await;
        let write = insert_permission(&db, "Edit houses", "houses.write").await;

        let mut first = BTreeMap::new();
        first.insert(admin.id, vec![read, write]);
        repo.set_matrix(&first).await.unwrap();

        let mut second = BTreeMap::new();
        second.insert(admin.id, vec![write]);
        repo.set_matrix(&second).await.unwrap();

        let matrix = repo.matrix().await.unwrap();
        assert_eq!(matrix.grants.len(), 1);
        assert!(matrix.grants.contains(&(admin.id, write)));
    }

    #[tokio::test]
    async fn test_set_matrix_empty_map_clears_everything() {
        let db = setup_test_db().await;
        let repo = RoleRepository::new(&db);

        let admin = repo.create_role("Administrator").await.unwrap();
        let read = insert_permission(&db, "Read houses", "houses.read").await;
        let mut grants = BTreeMap::new();
        grants.insert(admin.id, vec![read]);
        repo.set_matrix(&grants).await.unwrap();

        repo.set_matrix(&BTreeMap::new()).await.unwrap();
        assert!(repo.matrix().await.unwrap().grants.is_empty());
    }

    #[tokio::test]
    async fn test_set_matrix_rejects_unknown_ids() {
        let db = setup_test_db().await;
        let repo = RoleRepository::new(&db);

        let admin = repo.create_role("Administrator").await.unwrap();
        let read = insert_permission(&db, "Read houses", "houses.read").await;

        let mut unknown_role = BTreeMap::new();
        unknown_role.insert(999, vec![read]);
        assert!(matches!(
            repo.set_matrix(&unknown_role).await.unwrap_err(),
            RepositoryError::Validation(_)
        ));

        let mut unknown_permission = BTreeMap::new();
        unknown_permission.insert(admin.id, vec![999]);
        assert!(matches!(
            repo.set_matrix(&unknown_permission).await.unwrap_err(),
            RepositoryError::Validation(_)
        ));

        // The rejected submissions changed nothing.
        assert!(repo.matrix().await.unwrap().grants.is_empty());
    }

    #[tokio::test]
    async fn test_rename_role() {
        let db = setup_test_db().await;
        let repo = RoleRepository::new(&db);

        let role = repo.create_role("Plumber").await.unwrap();
        let renamed = repo.rename_role(role.id, "  Senior Plumber ").await.unwrap();
        assert_eq!(renamed.name, "Senior Plumber");

        assert!(matches!(
            repo.rename_role(role.id, "   ").await.unwrap_err(),
            RepositoryError::Validation(_)
        ));
    }

    #[tokio::test]
    async fn test_delete_role_nulls_user_assignment() {
        let db = setup_test_db().await;
        let repo = RoleRepository::new(&db);

        let role = repo.create_role("Plumber").await.unwrap();
        let user = crate::models::user::ActiveModel {
            username: Set("olena@example.com".to_string()),
            email: Set("olena@example.com".to_string()),
            password_hash: Set("x".to_string()),
            first_name: Set(String::new()),
            last_name: Set(String::new()),
            patronymic: Set(String::new()),
            phone: Set(String::new()),
            telegram: Set(String::new()),
            viber: Set(String::new()),
            birth_date: Set(None),
            role_id: Set(Some(role.id)),
            is_active: Set(true),
            is_staff: Set(true),
            created_at: Set(chrono::Utc::now().into()),
            ..Default::default()
        }
        .insert(&db)
        .await
        .unwrap();

        repo.delete_role(role.id).await.unwrap();

        let reloaded = crate::models::User::find_by_id(user.id)
            .one(&db)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(reloaded.role_id, None);
    }
}
