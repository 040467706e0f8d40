//! # API Route Modules
//!
//! - `check` — the JSON lookup endpoint (`/api/:registration`).
//! - `pages` — the browser surface: search form and HTML result page.
//! - `ops` — health and cache-stats endpoints.

pub mod check;
pub mod ops;
pub mod pages;
