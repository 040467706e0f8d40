//! # Age-Identifier Heuristic
//!
//! Fallback compliance estimate derived purely from the registration
//! mark, used whenever the upstream check cannot produce an answer.
//!
//! Modern UK plates follow the `AA## AAA` format: area code, two-digit
//! age identifier, random letters. The age identifier encodes the
//! first-registration period — 01–50 for March–August releases,
//! 51–99 for September–February.
//!
//! The verdict treats year >= 2015 as compliant (Euro 6 window) and
//! 2006–2014 as compliant on the assumption the vehicle is petrol
//! (Euro 4). The second branch is optimistic for diesels of that range;
//! this mirrors the production behavior and is kept as-is. See DESIGN.md.

use crate::result::{ComplianceResult, DAILY_CHARGE_GBP};
use crate::vrm::Vrm;

/// Position of the two-digit age identifier in an `AA## AAA` plate.
const AGE_CODE_RANGE: std::ops::Range<usize> = 2..4;

/// Estimate compliance from the registration pattern alone.
///
/// Deterministic and infallible: marks that don't carry a parseable age
/// identifier are estimated non-compliant with no year.
pub fn estimate(vrm: &Vrm) -> ComplianceResult {
    let (estimated_year, compliant) = estimate_year(vrm.as_str());

    let verdict = if compliant {
        "Likely compliant"
    } else {
        "Likely non-compliant - may need to pay £12.50 daily charge"
    };

    ComplianceResult {
        registration: vrm.as_str().to_string(),
        compliant,
        make_model: None,
        year: estimated_year,
        engine_category: None,
        co2_emissions: None,
        charge: (!compliant).then_some(DAILY_CHARGE_GBP),
        message: Some(format!(
            "Estimated result based on registration pattern. {verdict}. \
             Please verify with official TfL checker."
        )),
    }
}

/// Decode the age identifier into (estimated year, compliant verdict).
///
/// Defaults to non-compliant whenever the mark is too short or the age
/// code is not two decimal digits.
fn estimate_year(registration: &str) -> (Option<i32>, bool) {
    let chars: Vec<char> = registration.chars().collect();
    if chars.len() < 4 {
        return (None, false);
    }

    let age_code: String = chars[AGE_CODE_RANGE].iter().collect();
    if !age_code.chars().all(|c| c.is_ascii_digit()) {
        // Older format or personalized plate.
        return (None, false);
    }

    let age_num: i32 = match age_code.parse() {
        Ok(n) => n,
        Err(_) => return (None, false),
    };

    // 01-50: March-August release; 51-99: September-February.
    let year = if age_num <= 50 {
        2001 + age_num
    } else {
        2001 + (age_num - 50)
    };

    let compliant = if year >= 2015 {
        // Euro 6 diesel generally from 2015.
        true
    } else if year >= 2006 {
        // Euro 4 petrol generally from 2006; assume petrol.
        true
    } else {
        false
    };

    (Some(year), compliant)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn vrm(s: &str) -> Vrm {
        Vrm::normalize(s).unwrap()
    }

    #[test]
    fn march_window_age_code() {
        // "15" -> 2016, compliant, no charge.
        let result = estimate(&vrm("WO15CZY"));
        assert_eq!(result.year, Some(2016));
        assert!(result.compliant);
        assert!(result.charge.is_none());
    }

    #[test]
    fn september_window_age_code() {
        // "51" -> 2001 + 1 = 2002, pre-Euro-4, charged.
        let result = estimate(&vrm("AB51CDE"));
        assert_eq!(result.year, Some(2002));
        assert!(!result.compliant);
        assert_eq!(result.charge, Some(DAILY_CHARGE_GBP));
    }

    #[test]
    fn euro4_boundary() {
        // "05" -> 2006: first compliant year under the petrol assumption.
        let result = estimate(&vrm("AB05CDE"));
        assert_eq!(result.year, Some(2006));
        assert!(result.compliant);

        // "04" -> 2005: last non-compliant year.
        let result = estimate(&vrm("AB04CDE"));
        assert_eq!(result.year, Some(2005));
        assert!(!result.compliant);
    }

    #[test]
    fn short_mark_is_non_compliant_without_year() {
        let result = estimate(&vrm("XY"));
        assert!(!result.compliant);
        assert_eq!(result.year, None);
        assert_eq!(result.charge, Some(DAILY_CHARGE_GBP));
    }

    #[test]
    fn non_numeric_age_code_is_non_compliant() {
        let result = estimate(&vrm("ABCDEFG"));
        assert!(!result.compliant);
        assert_eq!(result.year, None);
    }

    #[test]
    fn message_flags_the_estimate() {
        let result = estimate(&vrm("AB51CDE"));
        let message = result.message.unwrap();
        assert!(message.contains("Estimated result"));
        assert!(message.contains("TfL"));
    }

    proptest! {
        #[test]
        fn deterministic(raw in "[A-Z0-9]{2,8}") {
            let v = vrm(&raw);
            prop_assert_eq!(estimate(&v), estimate(&v));
        }

        #[test]
        fn charge_iff_non_compliant(raw in "[A-Z0-9 ]{2,8}") {
            if let Ok(v) = Vrm::normalize(&raw) {
                prop_assert!(estimate(&v).charge_invariant_holds());
            }
        }
    }
}
