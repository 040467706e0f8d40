//! # JSON Lookup Endpoint
//!
//! `GET /api/:registration` — resolve one registration and return the
//! flattened [`ComplianceResult`]. Validation failures are 400, the
//! orchestration timeout is 504, anything else is a generic 500; the
//! bodies carry `{"detail": "..."}`.

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};

use ulez_core::ComplianceResult;

use crate::error::AppError;
use crate::resolver;
use crate::state::AppState;

/// Build the JSON API router.
pub fn router() -> Router<AppState> {
    Router::new().route("/api/:registration", get(check_registration))
}

/// GET /api/:registration — check emission-zone compliance.
#[utoipa::path(
    get,
    path = "/api/{registration}",
    params(("registration" = String, Path, description = "Vehicle registration mark, spaces and case ignored")),
    responses(
        (status = 200, description = "Compliance result", body = ComplianceResult),
        (status = 400, description = "Registration fails validation", body = crate::error::ErrorBody),
        (status = 504, description = "Upstream attempt timed out", body = crate::error::ErrorBody),
        (status = 500, description = "Unexpected failure", body = crate::error::ErrorBody),
    ),
    tag = "compliance"
)]
pub(crate) async fn check_registration(
    State(state): State<AppState>,
    Path(registration): Path<String>,
) -> Result<Json<ComplianceResult>, AppError> {
    let result = resolver::resolve(&state, &registration).await?;
    Ok(Json(result))
}
