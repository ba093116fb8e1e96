//! # Payment Requisites Handlers
//!
//! Read and update the single payment-details row shown on the settings
//! page.

use axum::{extract::State, response::Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::repositories::PaymentDetailsRepository;
use crate::server::AppState;

/// The payment requisites payload
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RequisitesDto {
    #[schema(example = "Upravdom LLC")]
    pub company_name: String,
    /// Free-form banking requisites text
    #[schema(example = "IBAN UA12 3456 ...")]
    pub requisites: String,
}

/// Current payment requisites
#[utoipa::path(
    get,
    path = "/admin/requisites",
    responses(
        (status = 200, description = "Current requisites; empty strings before first save", body = RequisitesDto)
    ),
    tag = "requisites"
)]
pub async fn get_requisites(State(state): State<AppState>) -> Result<Json<RequisitesDto>, ApiError> {
    let current = PaymentDetailsRepository::new(&state.db).get().await?;
    Ok(Json(match current {
        Some(row) => RequisitesDto {
            company_name: row.company_name,
            requisites: row.requisites,
        },
        None => RequisitesDto {
            company_name: String::new(),
            requisites: String::new(),
        },
    }))
}

/// Save payment requisites
#[utoipa::path(
    post,
    path = "/admin/requisites",
    request_body = RequisitesDto,
    responses(
        (status = 200, description = "Saved requisites", body = RequisitesDto),
        (status = 400, description = "Validation failed", body = ApiError)
    ),
    tag = "requisites"
)]
pub async fn save_requisites(
    State(state): State<AppState>,
    Json(input): Json<RequisitesDto>,
) -> Result<Json<RequisitesDto>, ApiError> {
    let saved = PaymentDetailsRepository::new(&state.db)
        .upsert(&input.company_name, &input.requisites)
        .await?;
    Ok(Json(RequisitesDto {
        company_name: saved.company_name,
        requisites: saved.requisites,
    }))
}
