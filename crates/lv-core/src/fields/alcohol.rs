//! Alcohol content verification
//!
//! 27 CFR 5.37 (spirits), 4.36 (wine), 7.26 (beer). ABV must be accurate
//! within the configured tolerance, +/- 0.5 percentage points by default.

use super::{FieldResult, FieldVerifier, VerifyContext};
use crate::extract::extract_abv;
use crate::text::locate::find_block_by_regex;
use crate::VerificationStatus;
use regex::Regex;

const CFR_REFERENCE: &str = "27 CFR 5.37, 4.36, 7.26";

pub struct AlcoholContentVerifier;

/// Format an ABV the way labels print it: no trailing zeros for whole values
fn format_abv(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{}", value)
    }
}

impl FieldVerifier for AlcoholContentVerifier {
    fn field_name(&self) -> &'static str {
        "alcohol_content"
    }

    fn verify(&self, ctx: &VerifyContext<'_>) -> FieldResult {
        let expected = ctx.claim.alcohol_content;
        let expected_label = format!("{}% ABV", format_abv(expected));

        let Some(found) = extract_abv(&ctx.evidence.full_text) else {
            return FieldResult {
                field_name: self.field_name().to_string(),
                status: VerificationStatus::NotFound,
                expected: expected_label,
                found: None,
                confidence: 0.0,
                location: None,
                message: "Alcohol content not found on label".to_string(),
                regulatory_reference: Some(CFR_REFERENCE.to_string()),
            };
        };

        // Probe the blocks for the statement so the UI can highlight it
        let probe = Regex::new(&format!(
            r"(?i)\b{}\s*%?\s*(?:alc(?:\.|/vol)?|abv|vol|alcohol)",
            regex::escape(&format_abv(found))
        ))
        .ok();
        let location = probe
            .as_ref()
            .and_then(|re| find_block_by_regex(ctx.evidence, re))
            .map(|(_, block)| block.bounding_box);

        let difference = (found - expected).abs();
        let tolerance = ctx.config.abv_tolerance;

        if difference <= tolerance {
            FieldResult {
                field_name: self.field_name().to_string(),
                status: VerificationStatus::Match,
                expected: expected_label,
                found: Some(format!("{}% ABV", format_abv(found))),
                confidence: 0.95,
                location,
                message: format!(
                    "ABV matches: {}% (expected {}%, within +/-{}% tolerance)",
                    format_abv(found),
                    format_abv(expected),
                    tolerance
                ),
                regulatory_reference: Some(CFR_REFERENCE.to_string()),
            }
        } else {
            FieldResult {
                field_name: self.field_name().to_string(),
                status: VerificationStatus::Mismatch,
                expected: expected_label,
                found: Some(format!("{}% ABV", format_abv(found))),
                confidence: 0.95,
                location,
                message: format!(
                    "ABV mismatch: expected {}%, found {}% (difference: {:.1}%, tolerance: +/-{}%)",
                    format_abv(expected),
                    format_abv(found),
                    difference,
                    tolerance
                ),
                regulatory_reference: Some(CFR_REFERENCE.to_string()),
            }
        }
    }
}
