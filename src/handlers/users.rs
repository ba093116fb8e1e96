//! # User Handlers
//!
//! This module contains handlers for staff account management: the
//! filterable grid, detail view and create/edit/delete endpoints.

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::{validation_error, ApiError};
use crate::forms::{UserCreateForm, UserUpdateForm};
use crate::repositories::{UserGridFilter, UserGridRow, UserRepository};
use crate::server::AppState;

/// Grid filter and pagination query
#[derive(Debug, Default, Deserialize)]
pub struct GridQuery {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub role_id: Option<i32>,
    /// "active", "disabled" or absent for both
    pub status: Option<String>,
    pub page: Option<u64>,
    pub per_page: Option<u64>,
}

/// One grid row. The HTML fragments are pre-rendered server-side so the
/// grid widget can inject them without templating of its own.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserGridRowDto {
    pub id: i32,
    #[schema(example = "Kovalenko Olena")]
    pub display_name: String,
    pub email: String,
    pub phone: String,
    pub role_name: Option<String>,
    pub is_active: bool,
    /// Anchor linking to the detail page
    pub name_link: String,
    /// Status badge markup
    pub status_badge: String,
    /// Edit/delete action icons markup
    pub actions: String,
}

/// Grid payload
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserGridDto {
    pub rows: Vec<UserGridRowDto>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
}

/// User detail payload
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserDetailDto {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub display_name: String,
    pub role_id: Option<i32>,
    pub role_name: Option<String>,
    pub is_active: bool,
}

/// Minimal HTML attribute escaping for the rendered fragments.
fn escape_html(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn render_row(row: UserGridRow) -> UserGridRowDto {
    let display_name = row.user.display_name();
    let name_link = format!(
        "<a href=\"/admin/users/{}\">{}</a>",
        row.user.id,
        escape_html(&display_name)
    );
    let status_badge = if row.user.is_active {
        "<span class=\"badge badge-success\">Active</span>".to_string()
    } else {
        "<span class=\"badge badge-secondary\">Disabled</span>".to_string()
    };
    let actions = format!(
        "<a class=\"icon-edit\" href=\"/admin/users/{id}/edit\"></a>\
         <a class=\"icon-delete\" href=\"/admin/users/{id}/delete\"></a>",
        id = row.user.id
    );

    UserGridRowDto {
        id: row.user.id,
        display_name,
        email: row.user.email,
        phone: row.user.phone,
        role_name: row.role_name,
        is_active: row.user.is_active,
        name_link,
        status_badge,
        actions,
    }
}

fn grid_filter(query: &GridQuery) -> Result<UserGridFilter, ApiError> {
    let is_active = match query.status.as_deref() {
        None | Some("") => None,
        Some("active") => Some(true),
        Some("disabled") => Some(false),
        Some(other) => {
            return Err(validation_error(
                "Unknown status filter",
                serde_json::json!({ "status": [format!("unknown status: {other}")] }),
            ));
        }
    };
    Ok(UserGridFilter {
        name: query.name.clone(),
        phone: query.phone.clone(),
        email: query.email.clone(),
        role_id: query.role_id,
        is_active,
    })
}

/// Filtered staff grid
#[utoipa::path(
    get,
    path = "/admin/users/data",
    responses(
        (status = 200, description = "Filtered staff grid", body = UserGridDto),
        (status = 400, description = "Bad filter", body = ApiError)
    ),
    tag = "users"
)]
pub async fn users_grid(
    State(state): State<AppState>,
    Query(query): Query<GridQuery>,
) -> Result<Json<UserGridDto>, ApiError> {
    let filter = grid_filter(&query)?;
    let page = query.page.unwrap_or(1).max(1);
    let per_page = query.per_page.unwrap_or(state.config.grid_page_size);

    let (rows, total) = UserRepository::new(&state.db)
        .grid(&filter, page, per_page)
        .await?;
    Ok(Json(UserGridDto {
        rows: rows.into_iter().map(render_row).collect(),
        total,
        page,
        per_page,
    }))
}

/// User detail
#[utoipa::path(
    get,
    path = "/admin/users/{id}",
    params(("id" = i32, Path, description = "User id")),
    responses(
        (status = 200, description = "User detail", body = UserDetailDto),
        (status = 404, description = "Unknown user", body = ApiError)
    ),
    tag = "users"
)]
pub async fn user_detail(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<UserDetailDto>, ApiError> {
    let row = UserRepository::new(&state.db)
        .get_user(id)
        .await?
        .ok_or_else(|| crate::error::not_found("user", id))?;

    Ok(Json(UserDetailDto {
        id: row.user.id,
        display_name: row.user.display_name(),
        username: row.user.username,
        email: row.user.email,
        first_name: row.user.first_name,
        last_name: row.user.last_name,
        phone: row.user.phone,
        role_id: row.user.role_id,
        role_name: row.role_name,
        is_active: row.user.is_active,
    }))
}

/// Create a staff account
#[utoipa::path(
    post,
    path = "/admin/users",
    request_body = UserCreateForm,
    responses(
        (status = 303, description = "Created; Location points at the detail page"),
        (status = 400, description = "Validation failed", body = ApiError),
        (status = 409, description = "Username or email already taken", body = ApiError)
    ),
    tag = "users"
)]
pub async fn create_user(
    State(state): State<AppState>,
    Json(form): Json<UserCreateForm>,
) -> Result<(StatusCode, [(header::HeaderName, String); 1]), ApiError> {
    let validated = form.validate().map_err(|errors| {
        validation_error(
            "User validation failed",
            serde_json::to_value(errors).unwrap_or_default(),
        )
    })?;

    let created = UserRepository::new(&state.db).create_user(validated).await?;
    Ok((
        StatusCode::SEE_OTHER,
        [(header::LOCATION, format!("/admin/users/{}", created.id))],
    ))
}

/// Update a staff account
#[utoipa::path(
    post,
    path = "/admin/users/{id}/edit",
    params(("id" = i32, Path, description = "User id")),
    request_body = UserUpdateForm,
    responses(
        (status = 303, description = "Saved; Location points at the detail page"),
        (status = 400, description = "Validation failed", body = ApiError),
        (status = 404, description = "Unknown user", body = ApiError)
    ),
    tag = "users"
)]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(form): Json<UserUpdateForm>,
) -> Result<(StatusCode, [(header::HeaderName, String); 1]), ApiError> {
    let validated = form.validate().map_err(|errors| {
        validation_error(
            "User validation failed",
            serde_json::to_value(errors).unwrap_or_default(),
        )
    })?;

    let updated = UserRepository::new(&state.db)
        .update_user(id, validated)
        .await?;
    Ok((
        StatusCode::SEE_OTHER,
        [(header::LOCATION, format!("/admin/users/{}", updated.id))],
    ))
}

/// Delete a staff account
#[utoipa::path(
    post,
    path = "/admin/users/{id}/delete",
    params(("id" = i32, Path, description = "User id")),
    responses(
        (status = 303, description = "Deleted; Location points at the grid"),
        (status = 404, description = "Unknown user", body = ApiError),
        (status = 409, description = "Blocked by referencing master requests", body = ApiError)
    ),
    tag = "users"
)]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<(StatusCode, [(header::HeaderName, String); 1]), ApiError> {
    UserRepository::new(&state.db).delete_user(id).await?;
    Ok((
        StatusCode::SEE_OTHER,
        [(header::LOCATION, "/admin/users".to_string())],
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user;

    fn model(id: i32, first: &str, last: &str, active: bool) -> user::Model {
        user::Model {
            id,
            username: "user@example.com".to_string(),
            email: "user@example.com".to_string(),
            password_hash: String::new(),
            first_name: first.to_string(),
            last_name: last.to_string(),
            patronymic: String::new(),
            phone: String::new(),
            telegram: String::new(),
            viber: String::new(),
            birth_date: None,
            role_id: None,
            is_active: active,
            is_staff: true,
            created_at: chrono::Utc::now().into(),
        }
    }

    #[test]
    fn test_render_row_builds_fragments() {
        let dto = render_row(UserGridRow {
            user: model(7, "Olena", "Kovalenko", true),
            role_name: Some("Plumber".to_string()),
        });
        assert_eq!(
            dto.name_link,
            "<a href=\"/admin/users/7\">Kovalenko Olena</a>"
        );
        assert!(dto.status_badge.contains("Active"));
        assert!(dto.actions.contains("/admin/users/7/edit"));
        assert!(dto.actions.contains("/admin/users/7/delete"));
    }

    #[test]
    fn test_render_row_escapes_display_name() {
        let dto = render_row(UserGridRow {
            user: model(1, "<script>", "", false),
            role_name: None,
        });
        assert!(dto.name_link.contains("&lt;script&gt;"));
        assert!(dto.status_badge.contains("Disabled"));
    }

    #[test]
    fn test_grid_filter_maps_status() {
        let active = grid_filter(&GridQuery {
            status: Some("active".to_string()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(active.is_active, Some(true));

        let both = grid_filter(&GridQuery::default()).unwrap();
        assert_eq!(both.is_active, None);

        assert!(grid_filter(&GridQuery {
            status: Some("archived".to_string()),
            ..Default::default()
        })
        .is_err());
    }
}
