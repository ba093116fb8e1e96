//! # Server Configuration
//!
//! This module contains the server setup and router for the back-office
//! API. All shared resources travel in `AppState`; there is no global
//! request state.

use axum::{
    extract::Request,
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
    Router,
};
use sea_orm::DatabaseConnection;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::AppConfig;
use crate::handlers;
use crate::storage::MediaStorage;
use crate::telemetry::{self, TraceContext};

/// Assigns every request a correlation ID, scoped through task-local
/// storage so error responses can echo it, and returned in `X-Trace-Id`.
async fn trace_context_middleware(request: Request, next: Next) -> Response {
    let trace_id = format!("corr-{}", uuid::Uuid::new_v4());
    let context = TraceContext {
        trace_id: trace_id.clone(),
    };

    let mut response = telemetry::with_trace_context(context, next.run(request)).await;
    if let Ok(value) = trace_id.parse() {
        response.headers_mut().insert("x-trace-id", value);
    }
    response
}

/// Application state containing shared resources
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub media: MediaStorage,
    pub config: AppConfig,
}

/// Creates and configures the Axum application router
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route(
            "/admin/houses",
            get(handlers::houses::list_houses).post(handlers::houses::create_house),
        )
        .route("/admin/houses/new", get(handlers::houses::new_house_form))
        .route("/admin/houses/{id}", get(handlers::houses::house_detail))
        .route(
            "/admin/houses/{id}/edit",
            get(handlers::houses::edit_house_form).post(handlers::houses::update_house),
        )
        .route(
            "/admin/houses/{id}/delete",
            post(handlers::houses::delete_house),
        )
        .route("/admin/users", post(handlers::users::create_user))
        .route("/admin/users/data", get(handlers::users::users_grid))
        .route("/admin/users/{id}", get(handlers::users::user_detail))
        .route("/admin/users/{id}/edit", post(handlers::users::update_user))
        .route(
            "/admin/users/{id}/delete",
            post(handlers::users::delete_user),
        )
        .route("/admin/roles", get(handlers::roles::roles_matrix))
        .route("/admin/roles/matrix", post(handlers::roles::update_matrix))
        .route("/admin/roles/{id}", post(handlers::roles::update_role))
        .route(
            "/admin/requisites",
            get(handlers::requisites::get_requisites).post(handlers::requisites::save_requisites),
        )
        .layer(middleware::from_fn(trace_context_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/openapi.json", ApiDoc::openapi()))
}

/// Starts the server with the given configuration
pub async fn run_server(
    config: AppConfig,
    db: DatabaseConnection,
) -> Result<(), Box<dyn std::error::Error>> {
    let addr = config
        .bind_addr()
        .map_err(|e| format!("Invalid server address: {}", e))?;
    let media = MediaStorage::new(&config.media_root);

    let state = AppState { db, media, config };
    let app = create_app(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "server listening");

    axum::serve(listener, app).await?;

    Ok(())
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::root,
        crate::handlers::houses::list_houses,
        crate::handlers::houses::new_house_form,
        crate::handlers::houses::create_house,
        crate::handlers::houses::house_detail,
        crate::handlers::houses::edit_house_form,
        crate::handlers::houses::update_house,
        crate::handlers::houses::delete_house,
        crate::handlers::users::users_grid,
        crate::handlers::users::user_detail,
        crate::handlers::users::create_user,
        crate::handlers::users::update_user,
        crate::handlers::users::delete_user,
        crate::handlers::roles::roles_matrix,
        crate::handlers::roles::update_matrix,
        crate::handlers::roles::update_role,
        crate::handlers::requisites::get_requisites,
        crate::handlers::requisites::save_requisites,
    ),
    components(
        schemas(
            crate::models::ServiceInfo,
            crate::error::ApiError,
            crate::forms::HouseFields,
            crate::forms::SectionRow,
            crate::forms::FloorRow,
            crate::forms::StaffRow,
            crate::forms::HouseBundlePayload,
            crate::forms::UserCreateForm,
            crate::forms::UserUpdateForm,
            crate::handlers::houses::HouseListRowDto,
            crate::handlers::houses::HouseListDto,
            crate::handlers::houses::StaffMemberDto,
            crate::handlers::houses::HouseFormContextDto,
            crate::handlers::houses::HouseEditContextDto,
            crate::handlers::houses::HouseDetailDto,
            crate::handlers::houses::SectionFloorCountDto,
            crate::handlers::users::UserGridRowDto,
            crate::handlers::users::UserGridDto,
            crate::handlers::users::UserDetailDto,
            crate::handlers::roles::RoleDto,
            crate::handlers::roles::PermissionDto,
            crate::handlers::roles::MatrixDto,
            crate::handlers::roles::MatrixUpdateDto,
            crate::handlers::roles::RoleUpdateDto,
            crate::handlers::requisites::RequisitesDto,
        )
    ),
    info(
        title = "Back Office API",
        description = "Administrative API for houses, staff, roles and payment requisites",
        version = env!("CARGO_PKG_VERSION"),
    )
)]
pub struct ApiDoc;
