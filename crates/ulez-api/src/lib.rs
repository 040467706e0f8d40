//! # ulez-api — Axum API service for the ULEZ checker
//!
//! Thin orchestration over one upstream call: normalize the
//! registration, consult the TTL cache, check upstream with a bounded
//! timeout, fall back to the age-identifier heuristic on failure, cache,
//! and render JSON or HTML.
//!
//! ## API Surface
//!
//! | Route                  | Module              | Behavior                       |
//! |------------------------|---------------------|--------------------------------|
//! | `GET /api/:registration` | [`routes::check`] | JSON compliance result         |
//! | `GET /`                | [`routes::pages`]   | HTML search form               |
//! | `GET /:registration`   | [`routes::pages`]   | HTML result page               |
//! | `GET /health`          | [`routes::ops`]     | Liveness probe                 |
//! | `GET /stats`           | [`routes::ops`]     | Cache statistics               |
//! | `GET /metrics`         | `lib.rs`            | Prometheus exposition          |
//! | `GET /openapi.json`    | [`openapi`]         | Generated OpenAPI document     |
//!
//! ## Middleware Stack
//!
//! ```text
//! TraceLayer → CorsLayer → MetricsMiddleware → Handler
//! ```
//!
//! Metrics registration is gated by `ULEZ_METRICS_ENABLED` (default on);
//! `/metrics` is mounted outside the recording middleware so scrapes
//! don't count themselves.

pub mod error;
pub mod html;
pub mod middleware;
pub mod openapi;
pub mod resolver;
pub mod routes;
pub mod state;

pub use error::AppError;
pub use state::{AppConfig, AppState};

use axum::extract::State;
use axum::http::StatusCode;
use axum::middleware::from_fn;
use axum::response::IntoResponse;
use axum::{Extension, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::middleware::metrics::ApiMetrics;

/// Check if metrics are enabled via the `ULEZ_METRICS_ENABLED` env var.
/// Defaults to `true` when the variable is absent or set to anything
/// other than `"false"`.
fn metrics_enabled() -> bool {
    std::env::var("ULEZ_METRICS_ENABLED")
        .map(|v| v.to_lowercase() != "false")
        .unwrap_or(true)
}

/// Assemble the full application router with all routes and middleware.
///
/// The browser capture route `/:registration` coexists with the static
/// routes because the router prefers static matches; `/health`, `/stats`,
/// `/metrics` and `/openapi.json` all win over the capture.
pub fn app(state: AppState) -> Router {
    let metrics = ApiMetrics::new();
    let metrics_on = metrics_enabled();

    let mut api = Router::new()
        .merge(routes::check::router())
        .merge(routes::ops::router())
        .merge(openapi::router())
        .merge(routes::pages::router());

    // Only register the recording middleware when metrics are enabled.
    if metrics_on {
        api = api
            .layer(from_fn(middleware::metrics::metrics_middleware))
            .layer(Extension(metrics.clone()));
    }

    // CORS mirrors the public-checker origin policy: the API is open.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = api
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state.clone());

    if metrics_on {
        let scrape = Router::new()
            .route("/metrics", axum::routing::get(prometheus_metrics))
            .layer(Extension(metrics))
            .with_state(state);
        api.merge(scrape)
    } else {
        api
    }
}

/// GET /metrics — Prometheus scrape endpoint.
///
/// Updates the cache gauge from current state on each scrape (pull
/// model), then encodes the registry in text exposition format.
async fn prometheus_metrics(
    State(state): State<AppState>,
    Extension(metrics): Extension<ApiMetrics>,
) -> impl IntoResponse {
    metrics.cache_entries().set(state.cache.len() as i64);

    match metrics.gather_and_encode() {
        Ok(body) => (
            StatusCode::OK,
            [(
                axum::http::header::CONTENT_TYPE,
                "text/plain; version=0.0.4; charset=utf-8",
            )],
            body,
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "failed to encode Prometheus metrics");
            (StatusCode::INTERNAL_SERVER_ERROR, e).into_response()
        }
    }
}
