//! # House Handlers
//!
//! This module contains handlers for the house editor: listing, the
//! composite create/edit form, the detail view and deletion.

use std::collections::BTreeMap;

use axum::{
    extract::{Multipart, Path, Query, State},
    http::{header, StatusCode},
    response::Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::{validation_error, ApiError};
use crate::forms::{validate_bundle, HouseBundle, HouseBundlePayload, ImageUpload};
use crate::repositories::HouseRepository;
use crate::server::AppState;

/// Pagination query for the house list
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub page: Option<u64>,
    pub per_page: Option<u64>,
}

/// One row of the house list
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HouseListRowDto {
    pub id: i32,
    #[schema(example = "Sunrise Tower")]
    pub name: String,
    #[schema(example = "1 Main St")]
    pub address: String,
}

/// Paged house list payload
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HouseListDto {
    pub rows: Vec<HouseListRowDto>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
}

/// A staff member shown on forms and the detail page
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StaffMemberDto {
    pub user_id: i32,
    #[schema(example = "Kovalenko Olena")]
    pub display_name: String,
    #[schema(example = "Plumber")]
    pub role_name: Option<String>,
}

/// Context served to the create form
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HouseFormContextDto {
    /// Selectable staff users
    pub staff_options: Vec<StaffMemberDto>,
    /// Staff-id to role-name map for client-side auto-fill
    pub staff_roles: BTreeMap<i32, String>,
}

/// Context served to the edit form: the saved bundle plus form options
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HouseEditContextDto {
    pub id: i32,
    pub name: String,
    pub address: String,
    pub section_names: Vec<String>,
    pub floor_numbers: Vec<i32>,
    pub staff_ids: Vec<i32>,
    pub gallery_paths: Vec<String>,
    pub staff_options: Vec<StaffMemberDto>,
    pub staff_roles: BTreeMap<i32, String>,
}

/// House detail payload
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HouseDetailDto {
    pub id: i32,
    pub name: String,
    pub address: String,
    pub sections_count: u64,
    /// Floor count of the first section; see `section_floor_counts` for the
    /// per-section breakdown
    pub floors_per_section: u64,
    pub section_floor_counts: Vec<SectionFloorCountDto>,
    /// First five gallery paths by position
    pub gallery: Vec<String>,
    pub staff: Vec<StaffMemberDto>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SectionFloorCountDto {
    pub section_name: String,
    pub floors: u64,
}

fn staff_dto(members: Vec<crate::repositories::StaffMember>) -> Vec<StaffMemberDto> {
    members
        .into_iter()
        .map(|m| StaffMemberDto {
            user_id: m.user_id,
            display_name: m.display_name,
            role_name: m.role_name,
        })
        .collect()
}

/// Reads the multipart submission: one JSON `payload` part and up to five
/// `image*` file parts, validated into a bundle.
async fn read_bundle(
    state: &AppState,
    mut multipart: Multipart,
) -> Result<HouseBundle, ApiError> {
    let mut payload: Option<HouseBundlePayload> = None;
    let mut images = Vec::new();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        if name == "payload" {
            let text = field.text().await?;
            payload = Some(serde_json::from_str(&text).map_err(|err| {
                validation_error(
                    "Malformed bundle payload",
                    serde_json::json!({ "payload": [err.to_string()] }),
                )
            })?);
        } else if name.starts_with("image") {
            let file_name = field.file_name().unwrap_or_default().to_string();
            let bytes = field.bytes().await?.to_vec();
            // A file input submitted without a selection arrives as an
            // empty part; skip it rather than failing validation.
            if file_name.is_empty() && bytes.is_empty() {
                continue;
            }
            images.push(ImageUpload { file_name, bytes });
        }
    }

    let payload = payload.ok_or_else(|| {
        validation_error(
            "Missing bundle payload",
            serde_json::json!({ "payload": ["the payload part is required"] }),
        )
    })?;

    let known_staff = HouseRepository::new(&state.db)
        .staff_options()
        .await?
        .0
        .into_iter()
        .map(|m| m.user_id)
        .collect();

    validate_bundle(payload, images, &known_staff)
        .map_err(|errors| validation_error("House bundle validation failed", errors.to_details()))
}

/// List houses
#[utoipa::path(
    get,
    path = "/admin/houses",
    responses(
        (status = 200, description = "Paged house list", body = HouseListDto)
    ),
    tag = "houses"
)]
pub async fn list_houses(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<HouseListDto>, ApiError> {
    let page = query.page.unwrap_or(1).max(1);
    let per_page = query.per_page.unwrap_or(state.config.grid_page_size);

    let (rows, total) = HouseRepository::new(&state.db)
        .list_houses(page, per_page)
        .await?;
    Ok(Json(HouseListDto {
        rows: rows
            .into_iter()
            .map(|h| HouseListRowDto {
                id: h.id,
                name: h.name,
                address: h.address,
            })
            .collect(),
        total,
        page,
        per_page,
    }))
}

/// Context for the create form
#[utoipa::path(
    get,
    path = "/admin/houses/new",
    responses(
        (status = 200, description = "Create-form context", body = HouseFormContextDto)
    ),
    tag = "houses"
)]
pub async fn new_house_form(
    State(state): State<AppState>,
) -> Result<Json<HouseFormContextDto>, ApiError> {
    let (options, roles) = HouseRepository::new(&state.db).staff_options().await?;
    Ok(Json(HouseFormContextDto {
        staff_options: staff_dto(options),
        staff_roles: roles,
    }))
}

/// Create a house from a composite bundle
#[utoipa::path(
    post,
    path = "/admin/houses",
    responses(
        (status = 303, description = "Saved; Location points at the detail page"),
        (status = 400, description = "Validation failed", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tag = "houses"
)]
pub async fn create_house(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<(StatusCode, [(header::HeaderName, String); 1]), ApiError> {
    let bundle = read_bundle(&state, multipart).await?;
    let house = HouseRepository::new(&state.db)
        .save_bundle(&state.media, None, bundle)
        .await?;
    Ok((
        StatusCode::SEE_OTHER,
        [(header::LOCATION, format!("/admin/houses/{}", house.id))],
    ))
}

/// House detail
#[utoipa::path(
    get,
    path = "/admin/houses/{id}",
    params(("id" = i32, Path, description = "House id")),
    responses(
        (status = 200, description = "House detail", body = HouseDetailDto),
        (status = 404, description = "Unknown house", body = ApiError)
    ),
    tag = "houses"
)]
pub async fn house_detail(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<HouseDetailDto>, ApiError> {
    let detail = HouseRepository::new(&state.db)
        .house_detail(id)
        .await?
        .ok_or_else(|| crate::error::not_found("house", id))?;

    Ok(Json(HouseDetailDto {
        id: detail.house.id,
        name: detail.house.name,
        address: detail.house.address,
        sections_count: detail.sections_count,
        floors_per_section: detail.floors_per_section,
        section_floor_counts: detail
            .section_floor_counts
            .into_iter()
            .map(|(section_name, floors)| SectionFloorCountDto {
                section_name,
                floors,
            })
            .collect(),
        gallery: detail.gallery.into_iter().map(|g| g.file_path).collect(),
        staff: staff_dto(detail.staff),
    }))
}

/// Context for the edit form, pre-populated from the saved aggregate
#[utoipa::path(
    get,
    path = "/admin/houses/{id}/edit",
    params(("id" = i32, Path, description = "House id")),
    responses(
        (status = 200, description = "Edit-form context", body = HouseEditContextDto),
        (status = 404, description = "Unknown house", body = ApiError)
    ),
    tag = "houses"
)]
pub async fn edit_house_form(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<HouseEditContextDto>, ApiError> {
    let repo = HouseRepository::new(&state.db);
    let editor = repo
        .editor_state(id)
        .await?
        .ok_or_else(|| crate::error::not_found("house", id))?;
    let (options, roles) = repo.staff_options().await?;

    Ok(Json(HouseEditContextDto {
        id: editor.house.id,
        name: editor.house.name,
        address: editor.house.address,
        section_names: editor.section_names,
        floor_numbers: editor.floor_numbers,
        staff_ids: editor.staff_ids,
        gallery_paths: editor.gallery_paths,
        staff_options: staff_dto(options),
        staff_roles: roles,
    }))
}

/// Update a house from a composite bundle
#[utoipa::path(
    post,
    path = "/admin/houses/{id}/edit",
    params(("id" = i32, Path, description = "House id")),
    responses(
        (status = 303, description = "Saved; Location points at the detail page"),
        (status = 400, description = "Validation failed", body = ApiError),
        (status = 404, description = "Unknown house", body = ApiError)
    ),
    tag = "houses"
)]
pub async fn update_house(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    multipart: Multipart,
) -> Result<(StatusCode, [(header::HeaderName, String); 1]), ApiError> {
    let bundle = read_bundle(&state, multipart).await?;
    let house = HouseRepository::new(&state.db)
        .save_bundle(&state.media, Some(id), bundle)
        .await?;
    Ok((
        StatusCode::SEE_OTHER,
        [(header::LOCATION, format!("/admin/houses/{}", house.id))],
    ))
}

/// Delete a house
#[utoipa::path(
    post,
    path = "/admin/houses/{id}/delete",
    params(("id" = i32, Path, description = "House id")),
    responses(
        (status = 303, description = "Deleted; Location points at the listing"),
        (status = 404, description = "Unknown house", body = ApiError),
        (status = 409, description = "Blocked by referencing messages", body = ApiError)
    ),
    tag = "houses"
)]
pub async fn delete_house(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<(StatusCode, [(header::HeaderName, String); 1]), ApiError> {
    HouseRepository::new(&state.db)
        .delete_house(&state.media, id)
        .await?;
    Ok((
        StatusCode::SEE_OTHER,
        [(header::LOCATION, "/admin/houses".to_string())],
    ))
}
