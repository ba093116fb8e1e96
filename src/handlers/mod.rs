//! # API Handlers
//!
//! This module contains all the HTTP endpoint handlers for the back office.

use crate::models::ServiceInfo;
use axum::response::Json;

pub mod houses;
pub mod requisites;
pub mod roles;
pub mod users;

/// Root handler that returns basic service information
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service information", body = ServiceInfo)
    ),
    tag = "root"
)]
pub async fn root() -> Json<ServiceInfo> {
    Json(ServiceInfo::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_root_handler_returns_service_info() {
        let Json(info) = root().await;
        assert_eq!(info.service, "backoffice");
        assert_eq!(info.version, env!("CARGO_PKG_VERSION"));
    }
}
