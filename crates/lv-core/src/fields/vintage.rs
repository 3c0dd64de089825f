//! Vintage year verification (wine)
//!
//! 27 CFR 4.27. Optional; when claimed, the four-digit year must appear on
//! the label as a whole token. A missing vintage is non-fatal and is
//! surfaced as a warning at orchestration level.

use super::{FieldResult, FieldVerifier, Outcome, VerifyContext, NOT_APPLICABLE, NOT_PROVIDED};
use crate::text::locate::find_block_by_regex;
use crate::VerificationStatus;
use regex::Regex;

const CFR_REFERENCE: &str = "27 CFR 4.27";

pub struct VintageVerifier;

impl FieldVerifier for VintageVerifier {
    fn field_name(&self) -> &'static str {
        "vintage"
    }

    fn verify(&self, ctx: &VerifyContext<'_>) -> FieldResult {
        let Some(year) = ctx.claim.vintage_year else {
            return FieldResult {
                field_name: self.field_name().to_string(),
                status: VerificationStatus::Match,
                expected: NOT_PROVIDED.to_string(),
                found: Some(NOT_APPLICABLE.to_string()),
                confidence: 1.0,
                location: None,
                message: "Vintage year not provided (optional)".to_string(),
                regulatory_reference: None,
            };
        };

        let year_str = year.to_string();
        let pattern = Regex::new(&format!(r"\b{}\b", year_str)).ok();
        let found_in_text = pattern
            .as_ref()
            .map(|re| re.is_match(&ctx.evidence.full_text))
            .unwrap_or(false);

        if found_in_text {
            let location = pattern
                .as_ref()
                .and_then(|re| find_block_by_regex(ctx.evidence, re))
                .map(|(_, b)| b.bounding_box);
            FieldResult {
                field_name: self.field_name().to_string(),
                status: VerificationStatus::Match,
                expected: year_str.clone(),
                found: Some(year_str.clone()),
                confidence: 0.95,
                location,
                message: format!("Vintage year {} found on label", year_str),
                regulatory_reference: Some(CFR_REFERENCE.to_string()),
            }
        } else {
            FieldResult {
                field_name: self.field_name().to_string(),
                status: VerificationStatus::NotFound,
                expected: year_str.clone(),
                found: None,
                confidence: 0.0,
                location: None,
                message: format!("Vintage year {} not found on label", year_str),
                regulatory_reference: Some(CFR_REFERENCE.to_string()),
            }
        }
    }

    /// A missing vintage never fails verification
    fn classify(&self, result: &FieldResult) -> Outcome {
        match result.status {
            VerificationStatus::Match => Outcome::Pass,
            _ => Outcome::Warning,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::tests_support::{ctx_with, evidence_from_lines};
    use crate::{Claim, ProductCategory};

    fn claim(year: Option<i32>) -> Claim {
        Claim {
            brand_name: "Test".to_string(),
            product_class: "Cabernet Sauvignon".to_string(),
            alcohol_content: 13.5,
            vintage_year: year,
            ..Default::default()
        }
    }

    #[test]
    fn test_vintage_found() {
        let claim = claim(Some(2019));
        let evidence = evidence_from_lines(&["NAPA VALLEY", "2019"]);
        let binding = ctx_with(&claim, &evidence).with_category(ProductCategory::Wine);
        let result = VintageVerifier.verify(&binding.ctx());

        assert_eq!(result.status, VerificationStatus::Match);
        assert!(result.location.is_some());
    }

    #[test]
    fn test_vintage_requires_whole_token() {
        // 2019 must not match inside 20190
        let claim = claim(Some(2019));
        let evidence = evidence_from_lines(&["LOT 20190"]);
        let binding = ctx_with(&claim, &evidence).with_category(ProductCategory::Wine);
        let result = VintageVerifier.verify(&binding.ctx());

        assert_eq!(result.status, VerificationStatus::NotFound);
    }

    #[test]
    fn test_vintage_missing_is_warning_grade() {
        let verifier = VintageVerifier;
        let claim = claim(Some(2019));
        let evidence = evidence_from_lines(&["NAPA VALLEY"]);
        let binding = ctx_with(&claim, &evidence).with_category(ProductCategory::Wine);
        let result = verifier.verify(&binding.ctx());

        assert_eq!(result.status, VerificationStatus::NotFound);
        assert_eq!(verifier.classify(&result), Outcome::Warning);
    }

    #[test]
    fn test_vintage_not_claimed() {
        let claim = claim(None);
        let evidence = evidence_from_lines(&["NAPA VALLEY"]);
        let binding = ctx_with(&claim, &evidence).with_category(ProductCategory::Wine);
        let result = VintageVerifier.verify(&binding.ctx());

        assert_eq!(result.status, VerificationStatus::Match);
    }
}
