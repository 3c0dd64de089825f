//! Brand name verification
//!
//! 27 CFR 5.32 (spirits), 4.33 (wine), 7.23 (beer). The brand name is a
//! critical field and must be prominently displayed.

use super::{FieldResult, FieldVerifier, VerifyContext};
use crate::text::locate::FieldLocator;
use crate::VerificationStatus;
use tracing::debug;

const CFR_REFERENCE: &str = "27 CFR 5.32, 4.33, 7.23";

pub struct BrandNameVerifier;

impl FieldVerifier for BrandNameVerifier {
    fn field_name(&self) -> &'static str {
        "brand_name"
    }

    fn verify(&self, ctx: &VerifyContext<'_>) -> FieldResult {
        let expected = &ctx.claim.brand_name;
        let locator = FieldLocator::new(ctx.scorer);
        let loc = locator.locate(expected, ctx.evidence, ctx.config.match_threshold);

        if loc.found {
            return FieldResult {
                field_name: self.field_name().to_string(),
                status: VerificationStatus::Match,
                expected: expected.clone(),
                found: loc.matched_text.or_else(|| Some(expected.clone())),
                confidence: loc.confidence,
                location: ctx.block_location(loc.block_index),
                message: format!(
                    "Brand name matches (confidence: {:.0}%)",
                    loc.confidence * 100.0
                ),
                regulatory_reference: Some(CFR_REFERENCE.to_string()),
            };
        }

        if loc.partial {
            return FieldResult {
                field_name: self.field_name().to_string(),
                status: VerificationStatus::Warning,
                expected: expected.clone(),
                found: loc.matched_text,
                confidence: loc.confidence,
                location: ctx.block_location(loc.block_index),
                message: format!(
                    "Brand name '{}' only partially found on label (coverage: {:.0}%)",
                    expected,
                    loc.confidence * 100.0
                ),
                regulatory_reference: Some(CFR_REFERENCE.to_string()),
            };
        }

        debug!(brand = %expected, blocks = ctx.evidence.block_count(), "brand name not found");
        FieldResult {
            field_name: self.field_name().to_string(),
            status: VerificationStatus::NotFound,
            expected: expected.clone(),
            found: None,
            confidence: 0.0,
            location: None,
            message: format!("Brand name '{}' not found on label", expected),
            regulatory_reference: Some(CFR_REFERENCE.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::tests_support::{ctx_with, evidence_from_lines, spirits_claim};

    #[test]
    fn test_brand_found_in_block() {
        let claim = spirits_claim("Eagle Rare");
        let evidence = evidence_from_lines(&["EAGLE RARE", "BOURBON"]);
        let binding = ctx_with(&claim, &evidence);
        let result = BrandNameVerifier.verify(&binding.ctx());

        assert_eq!(result.status, VerificationStatus::Match);
        assert!(result.location.is_some());
    }

    #[cfg(feature = "fuzzy")]
    #[test]
    fn test_brand_survives_ocr_noise() {
        let claim = spirits_claim("Eagle Rare");
        let evidence = evidence_from_lines(&["EAGLE RAVE", "BOURBON"]);
        let binding = ctx_with(&claim, &evidence);
        let result = BrandNameVerifier.verify(&binding.ctx());

        assert_eq!(result.status, VerificationStatus::Match);
    }

    #[test]
    fn test_brand_missing() {
        let claim = spirits_claim("Eagle Rare");
        let evidence = evidence_from_lines(&["SOME OTHER LABEL"]);
        let binding = ctx_with(&claim, &evidence);
        let result = BrandNameVerifier.verify(&binding.ctx());

        assert_eq!(result.status, VerificationStatus::NotFound);
        assert!(result.found.is_none());
    }
}
