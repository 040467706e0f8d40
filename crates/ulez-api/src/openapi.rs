//! # OpenAPI Document
//!
//! OpenAPI spec generated from the handler annotations via utoipa,
//! served at `/openapi.json`.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "ULEZ Compliance Checker",
        description = "Vehicle emission-zone compliance lookups: cached upstream checks with a registration-pattern heuristic fallback."
    ),
    paths(
        crate::routes::check::check_registration,
        crate::routes::ops::health,
        crate::routes::ops::stats,
    ),
    components(schemas(
        ulez_core::ComplianceResult,
        ulez_core::EmissionsValue,
        crate::error::ErrorBody,
        crate::routes::ops::HealthResponse,
        crate::routes::ops::StatsResponse,
    )),
    tags(
        (name = "compliance", description = "Compliance lookups"),
        (name = "ops", description = "Health and cache statistics"),
    )
)]
pub struct ApiDoc;

/// Build the OpenAPI router.
pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(serve_openapi))
}

async fn serve_openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
