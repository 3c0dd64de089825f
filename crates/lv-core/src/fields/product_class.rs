//! Product class verification
//!
//! 27 CFR 5.35 (spirits), 4.34 (wine), 7.24 (beer). Falls back to the
//! synonym table so "Bourbon" still matches a label that says "Kentucky
//! Bourbon", and "IPA" matches "India Pale Ale".

use super::{FieldResult, FieldVerifier, VerifyContext};
use crate::text::locate::FieldLocator;
use crate::text::normalize;
use crate::VerificationStatus;
use lv_rules::synonyms;

const CFR_REFERENCE: &str = "27 CFR 5.35, 4.34, 7.24";

/// Confidence assigned to synonym-table matches
const SYNONYM_CONFIDENCE: f64 = 0.8;

pub struct ProductClassVerifier;

impl FieldVerifier for ProductClassVerifier {
    fn field_name(&self) -> &'static str {
        "product_class"
    }

    fn verify(&self, ctx: &VerifyContext<'_>) -> FieldResult {
        let expected = &ctx.claim.product_class;
        let locator = FieldLocator::new(ctx.scorer);
        let loc = locator.locate(expected, ctx.evidence, ctx.config.class_threshold);

        if loc.found {
            return FieldResult {
                field_name: self.field_name().to_string(),
                status: VerificationStatus::Match,
                expected: expected.clone(),
                found: loc.matched_text.or_else(|| Some(expected.clone())),
                confidence: loc.confidence,
                location: ctx.block_location(loc.block_index),
                message: format!(
                    "Product class matches (confidence: {:.0}%)",
                    loc.confidence * 100.0
                ),
                regulatory_reference: Some(CFR_REFERENCE.to_string()),
            };
        }

        // Synonym fallback: accept any family phrasing that literally
        // appears in the recognized text, at reduced confidence
        let expected_norm = normalize(expected);
        let text_norm = normalize(&ctx.evidence.full_text);
        if let Some(family) = synonyms::family_for(&expected_norm) {
            let candidates = std::iter::once(family.base).chain(family.synonyms.iter().copied());
            for synonym in candidates {
                if text_norm.contains(synonym) {
                    return FieldResult {
                        field_name: self.field_name().to_string(),
                        status: VerificationStatus::Match,
                        expected: expected.clone(),
                        found: Some(synonym.to_string()),
                        confidence: SYNONYM_CONFIDENCE,
                        location: None,
                        message: format!(
                            "Product class matches via synonym: '{}' ~ '{}'",
                            synonym, expected
                        ),
                        regulatory_reference: Some(CFR_REFERENCE.to_string()),
                    };
                }
            }
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
                    "Product class '{}' only partially found on label (coverage: {:.0}%)",
                    expected,
                    loc.confidence * 100.0
                ),
                regulatory_reference: Some(CFR_REFERENCE.to_string()),
            };
        }

        FieldResult {
            field_name: self.field_name().to_string(),
            status: VerificationStatus::NotFound,
            expected: expected.clone(),
            found: None,
            confidence: 0.0,
            location: None,
            message: format!("Product class '{}' not found on label", expected),
            regulatory_reference: Some(CFR_REFERENCE.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::tests_support::{ctx_with, evidence_from_lines};
    use crate::Claim;

    fn claim(class: &str) -> Claim {
        Claim {
            brand_name: "Test".to_string(),
            product_class: class.to_string(),
            alcohol_content: 45.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_direct_class_match() {
        let claim = claim("Straight Bourbon Whiskey");
        let evidence = evidence_from_lines(&["STRAIGHT BOURBON WHISKEY"]);
        let binding = ctx_with(&claim, &evidence);
        let result = ProductClassVerifier.verify(&binding.ctx());

        assert_eq!(result.status, VerificationStatus::Match);
        assert!(result.confidence > 0.9);
    }

    #[test]
    fn test_synonym_match_ipa() {
        let claim = claim("IPA");
        let evidence = evidence_from_lines(&["HOP HARBOR", "INDIA PALE ALE"]);
        let binding = ctx_with(&claim, &evidence);
        let result = ProductClassVerifier.verify(&binding.ctx());

        assert_eq!(result.status, VerificationStatus::Match);
        assert_eq!(result.confidence, SYNONYM_CONFIDENCE);
        assert_eq!(result.found.as_deref(), Some("india pale ale"));
    }

    #[test]
    fn test_class_not_found() {
        let claim = claim("Tequila");
        let evidence = evidence_from_lines(&["SPARKLING WATER"]);
        let binding = ctx_with(&claim, &evidence);
        let result = ProductClassVerifier.verify(&binding.ctx());

        assert_eq!(result.status, VerificationStatus::NotFound);
    }
}
