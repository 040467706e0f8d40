//! Browser-identifying request headers.
//!
//! The upstream endpoint serves a public web checker, so requests carry
//! the header set a browser on that page would send, with the user agent
//! drawn from a small fixed pool per request.

use rand::seq::SliceRandom;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

/// User-agent pool. Desktop Chrome/Safari/Firefox agents current enough
/// to be unremarkable.
pub const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/119.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.1 Safari/605.1.15",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:109.0) Gecko/20100101 Firefox/120.0",
];

/// Constant part of the header set, matching what the public checker
/// page sends alongside the XHR.
const COMMON_HEADERS: &[(&str, &str)] = &[
    ("accept", "application/json, text/plain, */*"),
    ("accept-language", "en-US,en;q=0.9"),
    ("accept-encoding", "gzip, deflate, br"),
    ("referer", "https://motorway.co.uk/ulez-checker"),
    ("origin", "https://motorway.co.uk"),
    ("dnt", "1"),
    ("connection", "keep-alive"),
    ("sec-fetch-dest", "empty"),
    ("sec-fetch-mode", "cors"),
    ("sec-fetch-site", "same-site"),
    ("cache-control", "no-cache"),
    ("pragma", "no-cache"),
];

/// Build the header set for one request.
///
/// With `rotate` set, the user agent is chosen uniformly from the pool;
/// otherwise the first pool entry is used, keeping requests reproducible
/// in tests.
pub fn request_headers(rotate: bool) -> HeaderMap {
    let user_agent = if rotate {
        USER_AGENTS
            .choose(&mut rand::thread_rng())
            .copied()
            .unwrap_or(USER_AGENTS[0])
    } else {
        USER_AGENTS[0]
    };

    let mut headers = HeaderMap::with_capacity(COMMON_HEADERS.len() + 1);
    // All values are static ASCII literals, so construction cannot fail.
    headers.insert(
        reqwest::header::USER_AGENT,
        HeaderValue::from_static(user_agent),
    );
    for (name, value) in COMMON_HEADERS {
        headers.insert(HeaderName::from_static(name), HeaderValue::from_static(value));
    }
    headers
}
