//! # ulez-client — Typed client for the upstream ULEZ check API
//!
//! Issues one `POST {check_url}` with body `{"vrm": "<REG>"}` per lookup
//! and classifies the response for the resolver:
//!
//! | Upstream behavior                         | [`CheckOutcome`]      |
//! |-------------------------------------------|-----------------------|
//! | 200, `status == "success"` with `data`    | `Success(result)`     |
//! | 200, unexpected body shape                | `Indeterminate`       |
//! | 404                                       | `NotFound(result)`    |
//! | 429                                       | `RateLimited`         |
//! | any other status                          | `Indeterminate`       |
//! | timeout / transport error                 | `Indeterminate`       |
//!
//! `NotFound` is definitive — the vehicle does not exist upstream and the
//! caller must not fall back to the heuristic. `RateLimited` and
//! `Indeterminate` both mean "no answer"; the distinction exists for
//! logging and metrics only.
//!
//! No retries are attempted here. Retry policy, if any, belongs to the
//! caller — the production resolver performs none and falls back to the
//! heuristic instead.

pub mod config;
pub mod error;
pub mod headers;
mod wire;

pub use config::UpstreamConfig;
pub use error::ClientError;

use std::time::Duration;

use reqwest::StatusCode;
use url::Url;

use ulez_core::{ComplianceResult, Vrm};

/// Classified outcome of one upstream check.
#[derive(Debug, Clone, PartialEq)]
pub enum CheckOutcome {
    /// Upstream answered with vehicle data.
    Success(ComplianceResult),
    /// Upstream definitively reports no such vehicle.
    NotFound(ComplianceResult),
    /// Upstream is rate limiting us; no answer.
    RateLimited,
    /// Transport failure, timeout, or unusable response; no answer.
    Indeterminate,
}

/// Client for the upstream ULEZ check endpoint.
///
/// Holds one connection-pooled `reqwest::Client`; cheap to clone.
#[derive(Debug, Clone)]
pub struct CheckClient {
    http: reqwest::Client,
    check_url: Url,
    rotate_user_agents: bool,
}

impl CheckClient {
    /// Build the client from configuration.
    ///
    /// Applies the total-request and connect timeouts and bounds idle
    /// connections per host at 5.
    pub fn new(config: UpstreamConfig) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .pool_max_idle_per_host(5)
            .build()
            .map_err(ClientError::Build)?;

        Ok(Self {
            http,
            check_url: config.check_url,
            rotate_user_agents: config.rotate_user_agents,
        })
    }

    /// Check one registration against the upstream API.
    ///
    /// Never fails: every request-path problem classifies into an outcome
    /// the resolver can act on.
    pub async fn check(&self, vrm: &Vrm) -> CheckOutcome {
        tracing::info!(registration = %vrm, "making direct API call");

        let response = self
            .http
            .post(self.check_url.clone())
            .headers(headers::request_headers(self.rotate_user_agents))
            .json(&wire::CheckRequest { vrm: vrm.as_str() })
            .send()
            .await;

        let response = match response {
            Ok(response) => response,
            Err(e) if e.is_timeout() => {
                tracing::error!(registration = %vrm, "API request timed out");
                return CheckOutcome::Indeterminate;
            }
            Err(e) => {
                tracing::error!(registration = %vrm, error = %e, "API request failed");
                return CheckOutcome::Indeterminate;
            }
        };

        let status = response.status();
        tracing::info!(registration = %vrm, status = %status, "API response status");

        match status {
            StatusCode::OK => match response.json::<wire::CheckResponse>().await {
                Ok(wire::CheckResponse {
                    status,
                    data: Some(data),
                }) if status == "success" => {
                    tracing::info!(registration = %vrm, "successfully parsed API response");
                    CheckOutcome::Success(data.into_result(vrm))
                }
                Ok(_) => {
                    tracing::warn!(registration = %vrm, "API returned unexpected format");
                    CheckOutcome::Indeterminate
                }
                Err(e) => {
                    tracing::warn!(registration = %vrm, error = %e, "API response not decodable");
                    CheckOutcome::Indeterminate
                }
            },
            StatusCode::NOT_FOUND => {
                tracing::warn!(registration = %vrm, "vehicle not found");
                CheckOutcome::NotFound(not_found_result(vrm))
            }
            StatusCode::TOO_MANY_REQUESTS => {
                tracing::warn!(registration = %vrm, "rate limited");
                CheckOutcome::RateLimited
            }
            other => {
                tracing::warn!(registration = %vrm, status = %other, "unexpected API status");
                CheckOutcome::Indeterminate
            }
        }
    }
}

/// The definitive result for a registration the upstream does not know.
///
/// Non-compliant with no charge: an unknown vehicle cannot be charged a
/// known amount, and the message directs the caller to re-check the mark.
fn not_found_result(vrm: &Vrm) -> ComplianceResult {
    ComplianceResult {
        registration: vrm.as_str().to_string(),
        compliant: false,
        make_model: None,
        year: None,
        engine_category: None,
        co2_emissions: None,
        charge: None,
        message: Some(
            "Vehicle not found in database. Please check the registration number.".to_string(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::routing::post;
    use axum::Router;

    fn vrm(s: &str) -> Vrm {
        Vrm::normalize(s).unwrap()
    }

    /// Spawn a one-route stub upstream returning a fixed status and body.
    async fn spawn_stub(status: StatusCode, body: &'static str) -> u16 {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let app = Router::new().route(
            "/platform/v3/ulez/check",
            post(move || std::future::ready((status, body))),
        );
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        port
    }

    fn client_for(port: u16) -> CheckClient {
        CheckClient::new(UpstreamConfig::local_mock(port).unwrap()).unwrap()
    }

    #[tokio::test]
    async fn success_response_classifies_and_parses() {
        let port = spawn_stub(
            StatusCode::OK,
            r#"{"status":"success","data":{"make":{"displayName":"Toyota"},"model":"Prius","year":2019,"euroStatus":"Euro 6","emissions":104,"isCompliant":true}}"#,
        )
        .await;
        let client = client_for(port);

        match client.check(&vrm("AB12CDE")).await {
            CheckOutcome::Success(result) => {
                assert_eq!(result.registration, "AB12CDE");
                assert!(result.compliant);
                assert_eq!(result.make_model.as_deref(), Some("Toyota Prius"));
                assert_eq!(result.year, Some(2019));
                assert_eq!(result.engine_category.as_deref(), Some("Euro 6"));
                assert!(result.charge.is_none());
                assert!(result.message.unwrap().contains("compliant"));
            }
            other => panic!("expected Success, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn non_compliant_success_carries_charge() {
        let port = spawn_stub(
            StatusCode::OK,
            r#"{"status":"success","data":{"make":"FORD","model":"Focus","year":2004,"euroStatus":"Euro 3","emissions":"180 g/km","isCompliant":false}}"#,
        )
        .await;
        let client = client_for(port);

        match client.check(&vrm("AB04CDE")).await {
            CheckOutcome::Success(result) => {
                assert!(!result.compliant);
                assert_eq!(result.charge, Some(ulez_core::DAILY_CHARGE_GBP));
                assert_eq!(result.make_model.as_deref(), Some("FORD Focus"));
                assert_eq!(
                    result.co2_emissions,
                    Some(ulez_core::EmissionsValue::Label("180 g/km".to_string()))
                );
                assert!(result.message.unwrap().contains("not compliant"));
            }
            other => panic!("expected Success, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn unexpected_body_is_indeterminate() {
        let port = spawn_stub(StatusCode::OK, r#"{"status":"error"}"#).await;
        let client = client_for(port);
        assert_eq!(
            client.check(&vrm("AB12CDE")).await,
            CheckOutcome::Indeterminate
        );
    }

    #[tokio::test]
    async fn non_json_body_is_indeterminate() {
        let port = spawn_stub(StatusCode::OK, "<html>maintenance</html>").await;
        let client = client_for(port);
        assert_eq!(
            client.check(&vrm("AB12CDE")).await,
            CheckOutcome::Indeterminate
        );
    }

    #[tokio::test]
    async fn not_found_is_definitive() {
        let port = spawn_stub(StatusCode::NOT_FOUND, "").await;
        let client = client_for(port);
        match client.check(&vrm("ZZ99ZZZ")).await {
            CheckOutcome::NotFound(result) => {
                assert!(!result.compliant);
                assert!(result.message.unwrap().contains("not found in database"));
            }
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn rate_limit_classifies() {
        let port = spawn_stub(StatusCode::TOO_MANY_REQUESTS, "").await;
        let client = client_for(port);
        assert_eq!(
            client.check(&vrm("AB12CDE")).await,
            CheckOutcome::RateLimited
        );
    }

    #[tokio::test]
    async fn server_error_is_indeterminate() {
        let port = spawn_stub(StatusCode::INTERNAL_SERVER_ERROR, "oops").await;
        let client = client_for(port);
        assert_eq!(
            client.check(&vrm("AB12CDE")).await,
            CheckOutcome::Indeterminate
        );
    }

    #[tokio::test]
    async fn unreachable_upstream_is_indeterminate() {
        // Nothing listens on this port.
        let client = client_for(1);
        assert_eq!(
            client.check(&vrm("AB12CDE")).await,
            CheckOutcome::Indeterminate
        );
    }
}
