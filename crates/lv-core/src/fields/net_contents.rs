//! Net contents verification
//!
//! 27 CFR 5.47a (spirits), 4.71 (wine), 7.70 (beer). Volumes are compared
//! after conversion to milliliters. Spirits and wine are additionally
//! checked against the standards-of-fill tables; a matching volume in a
//! non-standard container downgrades to a warning, never a failure. Beer
//! has no standards of fill, so any container size passes.

use super::{FieldResult, FieldVerifier, VerifyContext};
use crate::claim::Claim;
use crate::extract::extract_volume;
use crate::text::locate::find_block_by_regex;
use crate::VerificationStatus;
use lv_rules::{units, ProductCategory};
use regex::Regex;

const CFR_REFERENCE: &str = "27 CFR 5.47a, 4.71, 7.70";

pub struct NetContentsVerifier;

fn cfr_for(category: ProductCategory) -> &'static str {
    match category {
        ProductCategory::Spirits => "27 CFR 5.47a",
        ProductCategory::Wine => "27 CFR 4.71",
        ProductCategory::Beer => "27 CFR 7.70",
    }
}

impl NetContentsVerifier {
    fn result(
        &self,
        status: VerificationStatus,
        expected: &str,
        found: Option<String>,
        confidence: f64,
        location: Option<crate::BoundingBox>,
        message: String,
        reference: &str,
    ) -> FieldResult {
        FieldResult {
            field_name: self.field_name().to_string(),
            status,
            expected: expected.to_string(),
            found,
            confidence,
            location,
            message,
            regulatory_reference: Some(reference.to_string()),
        }
    }
}

impl FieldVerifier for NetContentsVerifier {
    fn field_name(&self) -> &'static str {
        "net_contents"
    }

    /// Only checked when the claim states a volume at all
    fn applies(&self, claim: &Claim) -> bool {
        claim.net_contents.is_some()
    }

    fn verify(&self, ctx: &VerifyContext<'_>) -> FieldResult {
        let Some(expected) = ctx.claim.net_contents.as_deref() else {
            return self.result(
                VerificationStatus::Error,
                "",
                None,
                0.0,
                None,
                "Net contents verifier invoked without a claimed volume".to_string(),
                CFR_REFERENCE,
            );
        };

        // A claim volume that does not parse is a caller defect, not a
        // label defect
        let Some((expected_amount, expected_unit)) = extract_volume(expected) else {
            return self.result(
                VerificationStatus::Error,
                expected,
                None,
                0.0,
                None,
                format!("Invalid expected volume format: '{}'", expected),
                CFR_REFERENCE,
            );
        };
        let expected_ml = match units::to_ml(expected_amount, &expected_unit) {
            Ok(ml) => ml,
            Err(e) => {
                return self.result(
                    VerificationStatus::Error,
                    expected,
                    None,
                    0.0,
                    None,
                    format!("Invalid expected volume unit: {}", e),
                    CFR_REFERENCE,
                );
            }
        };

        let Some((found_amount, found_unit)) = extract_volume(&ctx.evidence.full_text) else {
            return self.result(
                VerificationStatus::NotFound,
                expected,
                None,
                0.0,
                None,
                "Net contents not found on label".to_string(),
                CFR_REFERENCE,
            );
        };
        let found_ml = match units::to_ml(found_amount, &found_unit) {
            Ok(ml) => ml,
            Err(_) => {
                return self.result(
                    VerificationStatus::NotFound,
                    expected,
                    Some(format!("{} {}", found_amount, found_unit)),
                    0.0,
                    None,
                    format!("Unrecognized volume unit on label: '{}'", found_unit),
                    CFR_REFERENCE,
                );
            }
        };

        let found_label = format!("{} {}", found_amount, found_unit);
        let probe = Regex::new(&format!(
            r"(?i)\b{}\s*(?:ml|l|liters?|litres?|fl\s*oz|ounces?|oz|pints?|pt|quarts?|qt|gallons?|gal)\b",
            regex::escape(&found_amount.to_string())
        ))
        .ok();
        let location = probe
            .as_ref()
            .and_then(|re| find_block_by_regex(ctx.evidence, re))
            .map(|(_, block)| block.bounding_box);

        let reference = cfr_for(ctx.category);
        let difference = (found_ml - expected_ml).abs();

        if difference > ctx.config.volume_tolerance_ml {
            return self.result(
                VerificationStatus::Mismatch,
                expected,
                Some(found_label),
                0.95,
                location,
                format!(
                    "Volume mismatch: expected {:.0}ml, found {:.0}ml (difference: {:.0}ml)",
                    expected_ml, found_ml, difference
                ),
                CFR_REFERENCE,
            );
        }

        if ctx.category == ProductCategory::Beer {
            return self.result(
                VerificationStatus::Match,
                expected,
                Some(found_label),
                0.95,
                location,
                format!(
                    "Volume matches: {:.0}ml (beer: any container size valid)",
                    found_ml
                ),
                reference,
            );
        }

        if units::is_standard_size(found_ml, ctx.category, ctx.config.size_tolerance_ml) {
            self.result(
                VerificationStatus::Match,
                expected,
                Some(found_label),
                0.95,
                location,
                format!("Volume matches: {:.0}ml (standard size)", found_ml),
                reference,
            )
        } else {
            self.result(
                VerificationStatus::Warning,
                expected,
                Some(found_label),
                0.95,
                location,
                format!(
                    "Volume matches ({:.0}ml) but is a non-standard size for {}; standard sizes required per {}",
                    found_ml, ctx.category, reference
                ),
                reference,
            )
        }
    }
}
