//! # Role Handlers
//!
//! This module contains handlers for the role/permission matrix page.

use std::collections::BTreeMap;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::repositories::RoleRepository;
use crate::server::AppState;

/// One role with its granted permission ids
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RoleDto {
    pub id: i32,
    #[schema(example = "Administrator")]
    pub name: String,
    pub permission_ids: Vec<i32>,
}

/// One grantable permission
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PermissionDto {
    pub id: i32,
    #[schema(example = "Edit houses")]
    pub name: String,
    #[schema(example = "houses.write")]
    pub code: String,
}

/// The complete matrix payload
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MatrixDto {
    pub roles: Vec<RoleDto>,
    pub permissions: Vec<PermissionDto>,
}

/// Replace-all matrix submission: role id to permission id list
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MatrixUpdateDto {
    pub grants: BTreeMap<i32, Vec<i32>>,
}

/// Rename a role and set its permission list in one submission
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RoleUpdateDto {
    #[schema(example = "Administrator")]
    pub name: String,
    pub permission_ids: Vec<i32>,
}

/// Role/permission matrix
#[utoipa::path(
    get,
    path = "/admin/roles",
    responses(
        (status = 200, description = "Roles with their permission sets", body = MatrixDto)
    ),
    tag = "roles"
)]
pub async fn roles_matrix(State(state): State<AppState>) -> Result<Json<MatrixDto>, ApiError> {
    let matrix = RoleRepository::new(&state.db).matrix().await?;

    let roles = matrix
        .roles
        .into_iter()
        .map(|role| RoleDto {
            permission_ids: matrix
                .grants
                .iter()
                .filter(|(role_id, _)| *role_id == role.id)
                .map(|(_, permission_id)| *permission_id)
                .collect(),
            id: role.id,
            name: role.name,
        })
        .collect();
    let permissions = matrix
        .permissions
        .into_iter()
        .map(|p| PermissionDto {
            id: p.id,
            name: p.name,
            code: p.code,
        })
        .collect();

    Ok(Json(MatrixDto { roles, permissions }))
}

/// Replace every role's permission set
#[utoipa::path(
    post,
    path = "/admin/roles/matrix",
    request_body = MatrixUpdateDto,
    responses(
        (status = 204, description = "Matrix replaced"),
        (status = 400, description = "Unknown role or permission id", body = ApiError)
    ),
    tag = "roles"
)]
pub async fn update_matrix(
    State(state): State<AppState>,
    Json(update): Json<MatrixUpdateDto>,
) -> Result<StatusCode, ApiError> {
    RoleRepository::new(&state.db).set_matrix(&update.grants).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Rename a role and set its permissions
#[utoipa::path(
    post,
    path = "/admin/roles/{id}",
    params(("id" = i32, Path, description = "Role id")),
    request_body = RoleUpdateDto,
    responses(
        (status = 200, description = "Updated role", body = RoleDto),
        (status = 400, description = "Validation failed", body = ApiError),
        (status = 404, description = "Unknown role", body = ApiError)
    ),
    tag = "roles"
)]
pub async fn update_role(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(update): Json<RoleUpdateDto>,
) -> Result<Json<RoleDto>, ApiError> {
    let repo = RoleRepository::new(&state.db);
    let renamed = repo.rename_role(id, &update.name).await?;

    // Other roles keep their grants; only this role's set is replaced.
    let matrix = repo.matrix().await?;
    let mut grants: BTreeMap<i32, Vec<i32>> = BTreeMap::new();
    for (role_id, permission_id) in &matrix.grants {
        if *role_id != id {
            grants.entry(*role_id).or_default().push(*permission_id);
        }
    }
    grants.insert(id, update.permission_ids.clone());
    repo.set_matrix(&grants).await?;

    Ok(Json(RoleDto {
        id: renamed.id,
        name: renamed.name,
        permission_ids: update.permission_ids,
    }))
}
