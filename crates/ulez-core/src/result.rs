//! # Compliance Result Entity
//!
//! [`ComplianceResult`] is the single domain entity: every resolution
//! path (upstream success, definitive not-found, heuristic estimate)
//! produces one, and the HTTP surface serializes it directly.
//!
//! The entity is never mutated after creation — re-resolution replaces
//! the cached value wholesale.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Daily charge for a non-compliant vehicle, in pounds sterling.
pub const DAILY_CHARGE_GBP: f64 = 12.50;

/// Reported CO2 emissions. The upstream API returns either a numeric
/// value or a free-text label, so both shapes are accepted and carried
/// through unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum EmissionsValue {
    Numeric(i64),
    Label(String),
}

/// Outcome of a compliance check for one registration.
///
/// Invariant: `charge` is present if and only if `compliant` is false.
/// Both the upstream parser and the heuristic uphold this; the fixed
/// charge is [`DAILY_CHARGE_GBP`].
///
/// All optional fields serialize as explicit `null` when absent — the
/// JSON API exposes the full field set on every response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ComplianceResult {
    /// Normalized registration mark the result was resolved for.
    pub registration: String,
    /// Whether the vehicle meets the emission-zone standard.
    pub compliant: bool,
    /// Make and model, when known (upstream-reported only).
    pub make_model: Option<String>,
    /// First-registration year, upstream-reported or estimated.
    pub year: Option<i32>,
    /// Emissions-standard label (e.g. "Euro 6"), when known.
    pub engine_category: Option<String>,
    /// Reported CO2 emissions, numeric or free text.
    pub co2_emissions: Option<EmissionsValue>,
    /// Daily charge in pounds; absent when compliant.
    pub charge: Option<f64>,
    /// Human-readable explanation of the verdict.
    pub message: Option<String>,
}

impl ComplianceResult {
    /// The charge-iff-non-compliant invariant, used by tests.
    pub fn charge_invariant_holds(&self) -> bool {
        self.charge.is_some() != self.compliant
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emissions_decodes_numeric_and_label() {
        let n: EmissionsValue = serde_json::from_str("142").unwrap();
        assert_eq!(n, EmissionsValue::Numeric(142));
        let l: EmissionsValue = serde_json::from_str("\"N/A\"").unwrap();
        assert_eq!(l, EmissionsValue::Label("N/A".to_string()));
    }

    #[test]
    fn absent_fields_serialize_as_null() {
        let result = ComplianceResult {
            registration: "AB12CDE".to_string(),
            compliant: true,
            make_model: None,
            year: Some(2016),
            engine_category: None,
            co2_emissions: None,
            charge: None,
            message: None,
        };
        let json = serde_json::to_value(&result).unwrap();
        assert!(json.get("make_model").unwrap().is_null());
        assert!(json.get("charge").unwrap().is_null());
        assert_eq!(json.get("year").unwrap(), 2016);
    }

    #[test]
    fn charge_invariant() {
        let mut result = ComplianceResult {
            registration: "AB12CDE".to_string(),
            compliant: false,
            make_model: None,
            year: None,
            engine_category: None,
            co2_emissions: None,
            charge: Some(DAILY_CHARGE_GBP),
            message: None,
        };
        assert!(result.charge_invariant_holds());
        result.compliant = true;
        assert!(!result.charge_invariant_holds());
    }
}
