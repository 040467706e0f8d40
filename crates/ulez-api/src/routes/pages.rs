//! # Browser Surface
//!
//! `GET /` serves the search form; `GET /:registration` resolves and
//! renders the result as HTML. Errors on the browser flow render into
//! the page with HTTP 200 — the JSON API is the surface that expresses
//! error classes through status codes.
//!
//! Route order matters: the static `/`, `/health`, `/stats` and the
//! `/api` prefix are all registered elsewhere and win over the
//! `/:registration` capture.

use axum::extract::{Path, State};
use axum::response::Html;
use axum::routing::get;
use axum::Router;

use crate::html;
use crate::resolver::{self, ResolveError};
use crate::state::AppState;

/// Build the browser-facing router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/:registration", get(check_html))
}

/// GET / — the search form.
async fn index() -> Html<String> {
    Html(html::index_page())
}

/// GET /:registration — HTML result page.
async fn check_html(
    State(state): State<AppState>,
    Path(registration): Path<String>,
) -> Html<String> {
    match resolver::resolve(&state, &registration).await {
        Ok(result) => Html(html::result_page(&result)),
        Err(ResolveError::InvalidFormat) => Html(html::error_page(
            &registration,
            "Invalid registration format",
        )),
        Err(ResolveError::Timeout) => Html(html::error_page(
            &registration,
            "Request timeout - please try again",
        )),
    }
}
