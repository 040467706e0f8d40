//! Wire types for the upstream check endpoint.
//!
//! The response schema is observed, not contracted, so every field is
//! tolerant: unknown fields are ignored, missing fields default, and the
//! `make` field decodes as either an object with `displayName` or a bare
//! string. The rest of the system only ever sees the normalized
//! [`ComplianceResult`].

use serde::{Deserialize, Serialize};

use ulez_core::{ComplianceResult, EmissionsValue, Vrm, DAILY_CHARGE_GBP};

/// Request body: `{"vrm": "<REG>"}`.
#[derive(Debug, Serialize)]
pub(crate) struct CheckRequest<'a> {
    pub vrm: &'a str,
}

/// Top-level response envelope.
#[derive(Debug, Deserialize)]
pub(crate) struct CheckResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub data: Option<VehicleData>,
}

/// The `make` field arrives as `{"displayName": "..."}` or a plain string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum MakeField {
    Object {
        #[serde(rename = "displayName", default)]
        display_name: String,
    },
    Plain(String),
}

/// Vehicle payload under `data`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct VehicleData {
    #[serde(default)]
    pub make: Option<MakeField>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub euro_status: Option<String>,
    #[serde(default)]
    pub emissions: Option<EmissionsValue>,
    #[serde(default)]
    pub is_compliant: bool,
}

impl VehicleData {
    /// Normalize the upstream payload into the domain entity.
    pub(crate) fn into_result(self, vrm: &Vrm) -> ComplianceResult {
        let make_display = match self.make {
            Some(MakeField::Object { display_name }) => display_name,
            Some(MakeField::Plain(s)) => s,
            None => String::new(),
        };
        let model = self.model.unwrap_or_default();
        let joined = format!("{make_display} {model}");
        let make_model = match joined.trim() {
            "" => None,
            s => Some(s.to_string()),
        };

        let compliant = self.is_compliant;
        let standing = if compliant { "compliant" } else { "not compliant" };

        ComplianceResult {
            registration: vrm.as_str().to_string(),
            compliant,
            make_model,
            year: self.year,
            engine_category: self.euro_status,
            co2_emissions: self.emissions,
            charge: (!compliant).then_some(DAILY_CHARGE_GBP),
            message: Some(format!("Vehicle is {standing} with ULEZ standards")),
        }
    }
}
