//! Sulfite declaration verification (wine)
//!
//! 27 CFR 4.32(e). Required only when the claim states the wine contains
//! 10 ppm or more of sulfites. American and British spellings both count.

use super::{FieldResult, FieldVerifier, VerifyContext, NOT_APPLICABLE, NOT_REQUIRED};
use crate::text::locate::find_block_by_regex;
use crate::text::normalize;
use crate::VerificationStatus;
use lv_rules::patterns::SULFITE_RE;

const CFR_REFERENCE: &str = "27 CFR 4.32(e)";

pub struct SulfiteVerifier;

impl FieldVerifier for SulfiteVerifier {
    fn field_name(&self) -> &'static str {
        "sulfites"
    }

    fn verify(&self, ctx: &VerifyContext<'_>) -> FieldResult {
        if !ctx.claim.contains_sulfites {
            return FieldResult {
                field_name: self.field_name().to_string(),
                status: VerificationStatus::Match,
                expected: NOT_REQUIRED.to_string(),
                found: Some(NOT_APPLICABLE.to_string()),
                confidence: 1.0,
                location: None,
                message: "Sulfite declaration not required".to_string(),
                regulatory_reference: None,
            };
        }

        let text_norm = normalize(&ctx.evidence.full_text);
        if SULFITE_RE.is_match(&text_norm) {
            let location = find_block_by_regex(ctx.evidence, &SULFITE_RE)
                .map(|(_, b)| b.bounding_box);
            return FieldResult {
                field_name: self.field_name().to_string(),
                status: VerificationStatus::Match,
                expected: "Contains Sulfites".to_string(),
                found: Some("Contains Sulfites".to_string()),
                confidence: 0.9,
                location,
                message: "Sulfite declaration found on label".to_string(),
                regulatory_reference: Some(CFR_REFERENCE.to_string()),
            };
        }

        FieldResult {
            field_name: self.field_name().to_string(),
            status: VerificationStatus::NotFound,
            expected: "Contains Sulfites".to_string(),
            found: None,
            confidence: 0.0,
            location: None,
            message: "Sulfite declaration required but not found on label".to_string(),
            regulatory_reference: Some(CFR_REFERENCE.to_string()),
        }
    }
}
