//! Age statement verification (spirits)
//!
//! 27 CFR 5.74. Conditionally required: whisky aged under 4 years and
//! brandy aged under 2 years must carry an age statement. The claimed age
//! is read out of the claim's own statement text.

use super::{FieldResult, FieldVerifier, VerifyContext, NOT_APPLICABLE, NOT_REQUIRED};
use crate::text::locate::{find_block_by_regex, FieldLocator};
use crate::VerificationStatus;
use lv_rules::patterns::{AGE_EVIDENCE_RE, AGE_FORMAT_PATTERNS, AGE_YEARS_RE};

const CFR_REFERENCE: &str = "27 CFR 5.74";

/// Whisky under this many years must state its age
const WHISKY_AGE_THRESHOLD: u32 = 4;
/// Brandy under this many years must state its age
const BRANDY_AGE_THRESHOLD: u32 = 2;

const WHISKY_MARKERS: &[&str] = &["whiskey", "whisky", "bourbon", "rye", "scotch"];
const BRANDY_MARKERS: &[&str] = &["brandy", "cognac"];

/// Years claimed in an age statement, if one parses out of it
fn claimed_years(age_statement: &str) -> Option<u32> {
    AGE_YEARS_RE
        .captures(&age_statement.to_lowercase())
        .and_then(|caps| caps[1].parse().ok())
}

/// Whether the age statement is mandatory for this product and claimed age
pub fn is_age_statement_required(product_class: &str, age_statement: Option<&str>) -> bool {
    let class_lower = product_class.to_lowercase();
    let years = age_statement.and_then(claimed_years);

    if WHISKY_MARKERS.iter().any(|m| class_lower.contains(m)) {
        return matches!(years, Some(y) if y < WHISKY_AGE_THRESHOLD);
    }
    if BRANDY_MARKERS.iter().any(|m| class_lower.contains(m)) {
        return matches!(years, Some(y) if y < BRANDY_AGE_THRESHOLD);
    }
    false
}

/// Whether the statement uses an approved phrasing
pub fn is_valid_age_format(age_statement: &str) -> bool {
    let lower = age_statement.to_lowercase();
    AGE_FORMAT_PATTERNS.iter().any(|p| p.is_match(&lower))
}

pub struct AgeStatementVerifier;

impl FieldVerifier for AgeStatementVerifier {
    fn field_name(&self) -> &'static str {
        "age_statement"
    }

    fn verify(&self, ctx: &VerifyContext<'_>) -> FieldResult {
        let product_class = &ctx.claim.product_class;
        let statement = ctx.claim.age_statement.as_deref();

        let Some(statement) = statement else {
            if is_age_statement_required(product_class, None) {
                return FieldResult {
                    field_name: self.field_name().to_string(),
                    status: VerificationStatus::Error,
                    expected: "Age statement required".to_string(),
                    found: None,
                    confidence: 0.0,
                    location: None,
                    message: format!(
                        "Age statement required for {} but not provided in claim",
                        product_class
                    ),
                    regulatory_reference: Some(CFR_REFERENCE.to_string()),
                };
            }
            return FieldResult {
                field_name: self.field_name().to_string(),
                status: VerificationStatus::Match,
                expected: NOT_REQUIRED.to_string(),
                found: Some(NOT_APPLICABLE.to_string()),
                confidence: 1.0,
                location: None,
                message: "Age statement not required for this product".to_string(),
                regulatory_reference: None,
            };
        };

        if !is_valid_age_format(statement) {
            return FieldResult {
                field_name: self.field_name().to_string(),
                status: VerificationStatus::Warning,
                expected: statement.to_string(),
                found: None,
                confidence: 0.5,
                location: None,
                message: format!(
                    "Age statement format may not comply with approved phrasings: '{}'",
                    statement
                ),
                regulatory_reference: Some(CFR_REFERENCE.to_string()),
            };
        }

        // Fuzzy location first, then the label-phrasing regex which also
        // catches forms like "aged at least 12 years"
        let locator = FieldLocator::new(ctx.scorer);
        let loc = locator.locate(statement, ctx.evidence, ctx.config.match_threshold);
        let regex_hit = find_block_by_regex(ctx.evidence, &AGE_EVIDENCE_RE);

        if loc.found {
            let confidence = loc.confidence;
            return FieldResult {
                field_name: self.field_name().to_string(),
                status: VerificationStatus::Match,
                expected: statement.to_string(),
                found: Some(loc.matched_text.unwrap_or_else(|| statement.to_string())),
                confidence,
                location: ctx.block_location(loc.block_index),
                message: format!("Age statement matches (confidence: {:.0}%)", confidence * 100.0),
                regulatory_reference: Some(CFR_REFERENCE.to_string()),
            };
        }
        if let Some((idx, block)) = regex_hit {
            let matched = AGE_EVIDENCE_RE
                .find(&block.text)
                .map(|m| m.as_str().to_string())
                .unwrap_or_else(|| statement.to_string());
            return FieldResult {
                field_name: self.field_name().to_string(),
                status: VerificationStatus::Match,
                expected: statement.to_string(),
                found: Some(matched),
                confidence: 0.9,
                location: ctx.block_location(Some(idx)),
                message: "Age statement matches (confidence: 90%)".to_string(),
                regulatory_reference: Some(CFR_REFERENCE.to_string()),
            };
        }

        let required = is_age_statement_required(product_class, Some(statement));
        let status = if required {
            VerificationStatus::NotFound
        } else {
            VerificationStatus::Warning
        };
        FieldResult {
            field_name: self.field_name().to_string(),
            status,
            expected: statement.to_string(),
            found: None,
            confidence: 0.0,
            location: None,
            message: format!("Age statement '{}' not found on label", statement),
            regulatory_reference: Some(CFR_REFERENCE.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::tests_support::{ctx_with, evidence_from_lines};
    use crate::Claim;

    fn claim(class: &str, age: Option<&str>) -> Claim {
        Claim {
            brand_name: "Test".to_string(),
            product_class: class.to_string(),
            alcohol_content: 45.0,
            age_statement: age.map(|a| a.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_requirement_rule() {
        assert!(is_age_statement_required("Bourbon Whiskey", Some("Aged 2 Years")));
        assert!(!is_age_statement_required("Bourbon Whiskey", Some("Aged 10 Years")));
        assert!(is_age_statement_required("Cognac", Some("1 year old")));
        assert!(!is_age_statement_required("Brandy", Some("Aged 3 Years")));
        assert!(!is_age_statement_required("Vodka", Some("Aged 1 Year")));
        assert!(!is_age_statement_required("Bourbon Whiskey", None));
    }

    #[test]
    fn test_approved_formats() {
        assert!(is_valid_age_format("Aged 10 Years"));
        assert!(is_valid_age_format("4 Years Old"));
        assert!(is_valid_age_format("4 yr old"));
        assert!(is_valid_age_format("Aged 18 Months"));
        assert!(!is_valid_age_format("pretty old"));
    }

    #[test]
    fn test_statement_found_on_label() {
        let claim = claim("Bourbon Whiskey", Some("Aged 10 Years"));
        let evidence = evidence_from_lines(&["AGED 10 YEARS", "BOURBON"]);
        let binding = ctx_with(&claim, &evidence);
        let result = AgeStatementVerifier.verify(&binding.ctx());

        assert_eq!(result.status, VerificationStatus::Match);
    }

    #[test]
    fn test_label_phrasing_variant_found() {
        // claim says "Aged 12 Years", label says "aged at least 12 years"
        let claim = claim("Scotch Whisky", Some("Aged 12 Years"));
        let evidence = evidence_from_lines(&["AGED AT LEAST 12 YEARS"]);
        let binding = ctx_with(&claim, &evidence);
        let result = AgeStatementVerifier.verify(&binding.ctx());

        assert_eq!(result.status, VerificationStatus::Match);
    }

    #[test]
    fn test_missing_statement_warns_when_optional() {
        let claim = claim("Bourbon Whiskey", Some("Aged 10 Years"));
        let evidence = evidence_from_lines(&["BOURBON WHISKEY"]);
        let binding = ctx_with(&claim, &evidence);
        let result = AgeStatementVerifier.verify(&binding.ctx());

        assert_eq!(result.status, VerificationStatus::Warning);
    }

    #[test]
    fn test_missing_statement_fails_when_required() {
        let claim = claim("Bourbon Whiskey", Some("Aged 2 Years"));
        let evidence = evidence_from_lines(&["BOURBON WHISKEY"]);
        let binding = ctx_with(&claim, &evidence);
        let result = AgeStatementVerifier.verify(&binding.ctx());

        assert_eq!(result.status, VerificationStatus::NotFound);
    }

    #[test]
    fn test_not_provided_not_required() {
        let claim = claim("Vodka", None);
        let evidence = evidence_from_lines(&["VODKA"]);
        let binding = ctx_with(&claim, &evidence);
        let result = AgeStatementVerifier.verify(&binding.ctx());

        assert_eq!(result.status, VerificationStatus::Match);
        assert_eq!(result.expected, NOT_REQUIRED);
    }

    #[test]
    fn test_bad_format_warns() {
        let claim = claim("Bourbon Whiskey", Some("matured a while"));
        let evidence = evidence_from_lines(&["BOURBON WHISKEY"]);
        let binding = ctx_with(&claim, &evidence);
        let result = AgeStatementVerifier.verify(&binding.ctx());

        assert_eq!(result.status, VerificationStatus::Warning);
        assert!(result.message.contains("format"));
    }
}
