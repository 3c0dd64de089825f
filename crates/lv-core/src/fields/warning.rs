//! Government warning verification
//!
//! 27 CFR Part 16. The statute requires near-exact text, so this field is
//! checked more strictly than the others: first a critical-keyword gate,
//! then token coverage of the full statutory text against the evidence.

use super::{FieldResult, FieldVerifier, Outcome, VerifyContext};
use crate::text::locate::find_block_by_content;
use crate::text::normalize;
use crate::VerificationStatus;
use lv_rules::patterns::SURGEON_GENERAL_CAPS_RE;
use lv_rules::warning::{GOVERNMENT_WARNING_TEXT, WARNING_KEYWORDS};
use tracing::debug;

const CFR_REFERENCE: &str = "27 CFR Part 16";

/// Per-token threshold when fuzzy-matching a critical keyword
const KEYWORD_TOKEN_THRESHOLD: f64 = 0.80;
/// Per-token threshold for statutory text coverage
const COVERAGE_TOKEN_THRESHOLD: f64 = 0.85;
/// Coverage at or above this is a full match
const COVERAGE_MATCH: f64 = 0.85;
/// Coverage at or above this (but below match) is a formatting warning
const COVERAGE_WARNING: f64 = 0.70;

const EXPECTED_SUMMARY: &str = "GOVERNMENT WARNING: (1) According to the Surgeon General...";

pub struct GovernmentWarningVerifier;

impl GovernmentWarningVerifier {
    fn not_found(&self, message: String) -> FieldResult {
        FieldResult {
            field_name: self.field_name().to_string(),
            status: VerificationStatus::NotFound,
            expected: EXPECTED_SUMMARY.to_string(),
            found: None,
            confidence: 0.0,
            location: None,
            message,
            regulatory_reference: Some(CFR_REFERENCE.to_string()),
        }
    }
}

impl FieldVerifier for GovernmentWarningVerifier {
    fn field_name(&self) -> &'static str {
        "government_warning"
    }

    fn verify(&self, ctx: &VerifyContext<'_>) -> FieldResult {
        // Normalizing collapses line breaks, so "SURGEON\nGENERAL" still
        // hits the "surgeon general" keyword
        let text_norm = normalize(&ctx.evidence.full_text);
        let text_tokens: Vec<&str> = text_norm.split(' ').filter(|t| !t.is_empty()).collect();

        // Keyword gate: every critical keyword must be present. The literal
        // scan runs first; keywords it misses get a token-by-token fuzzy
        // recheck (OCR turns "impairs" into "imipairs")
        let mut missing: Vec<&str> = Vec::new();
        for keyword in WARNING_KEYWORDS.missing_from(&text_norm) {
            let all_tokens_found = keyword.split(' ').all(|kw_token| {
                text_tokens
                    .iter()
                    .any(|t| ctx.scorer.score(kw_token, t) >= KEYWORD_TOKEN_THRESHOLD)
            });
            if !all_tokens_found {
                missing.push(keyword);
            }
        }
        if !missing.is_empty() {
            debug!(?missing, "government warning keywords missing");
            return self.not_found(format!(
                "Government warning incomplete or missing. Missing keywords: {}",
                missing.join(", ")
            ));
        }

        // Formatting-only probe; capitalization problems never fail the field
        if !SURGEON_GENERAL_CAPS_RE.is_match(&ctx.evidence.full_text) {
            debug!("'Surgeon General' capitalization may be incorrect");
        }

        let location = find_block_by_content(
            ctx.evidence,
            &["government warning", "government", "warning"],
        )
        .map(|(_, block)| block.bounding_box);

        // Token coverage of the full statutory text
        let statute_norm = normalize(GOVERNMENT_WARNING_TEXT);
        let statute_tokens: Vec<&str> =
            statute_norm.split(' ').filter(|t| !t.is_empty()).collect();
        let covered = statute_tokens
            .iter()
            .filter(|st| {
                text_tokens
                    .iter()
                    .any(|t| ctx.scorer.score(st, t) >= COVERAGE_TOKEN_THRESHOLD)
            })
            .count();
        let coverage = covered as f64 / statute_tokens.len() as f64;
        debug!(coverage, covered, total = statute_tokens.len(), "warning token coverage");

        if coverage >= COVERAGE_MATCH {
            FieldResult {
                field_name: self.field_name().to_string(),
                status: VerificationStatus::Match,
                expected: EXPECTED_SUMMARY.to_string(),
                found: Some("Government warning present".to_string()),
                confidence: coverage,
                location,
                message: format!(
                    "Government warning matches (confidence: {:.0}%)",
                    coverage * 100.0
                ),
                regulatory_reference: Some(CFR_REFERENCE.to_string()),
            }
        } else if coverage >= COVERAGE_WARNING {
            FieldResult {
                field_name: self.field_name().to_string(),
                status: VerificationStatus::Warning,
                expected: EXPECTED_SUMMARY.to_string(),
                found: Some("Government warning present with variations".to_string()),
                confidence: coverage,
                location,
                message: format!(
                    "Government warning found but may have formatting issues (coverage: {:.0}%)",
                    coverage * 100.0
                ),
                regulatory_reference: Some(CFR_REFERENCE.to_string()),
            }
        } else {
            self.not_found("Government warning not found or incomplete".to_string())
        }
    }

    /// The statute makes this field strictly required: any shortfall,
    /// including a formatting warning, is a reportable failure
    fn classify(&self, result: &FieldResult) -> Outcome {
        match result.status {
            VerificationStatus::Match => Outcome::Pass,
            _ => Outcome::Error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::tests_support::{ctx_with, evidence_from_lines, spirits_claim};
    use lv_rules::warning::GOVERNMENT_WARNING_TEXT;

    #[test]
    fn test_full_statutory_text_matches() {
        let claim = spirits_claim("Eagle Rare");
        let evidence = evidence_from_lines(&["EAGLE RARE", GOVERNMENT_WARNING_TEXT]);
        let binding = ctx_with(&claim, &evidence);
        let result = GovernmentWarningVerifier.verify(&binding.ctx());

        assert_eq!(result.status, VerificationStatus::Match);
        assert!(result.confidence >= 0.99);
        assert!(result.location.is_some());
    }

    #[test]
    fn test_warning_split_across_lines() {
        // OCR splits the statement at line breaks
        let claim = spirits_claim("Eagle Rare");
        let evidence = evidence_from_lines(&[
            "GOVERNMENT WARNING: (1) According to the Surgeon",
            "General, women should not drink alcoholic beverages",
            "during pregnancy because of the risk of birth defects.",
            "(2) Consumption of alcoholic beverages impairs your",
            "ability to drive a car or operate machinery, and may",
            "cause health problems.",
        ]);
        let binding = ctx_with(&claim, &evidence);
        let result = GovernmentWarningVerifier.verify(&binding.ctx());

        assert_eq!(result.status, VerificationStatus::Match);
    }

    #[test]
    fn test_missing_keyword_is_not_found() {
        let claim = spirits_claim("Eagle Rare");
        let evidence = evidence_from_lines(&["GOVERNMENT WARNING: drink responsibly"]);
        let binding = ctx_with(&claim, &evidence);
        let result = GovernmentWarningVerifier.verify(&binding.ctx());

        assert_eq!(result.status, VerificationStatus::NotFound);
        assert!(result.message.contains("surgeon general"));
    }

    #[test]
    fn test_absent_warning_is_not_found() {
        let claim = spirits_claim("Eagle Rare");
        let evidence = evidence_from_lines(&["EAGLE RARE", "45% ALC/VOL"]);
        let binding = ctx_with(&claim, &evidence);
        let result = GovernmentWarningVerifier.verify(&binding.ctx());

        assert_eq!(result.status, VerificationStatus::NotFound);
    }

    #[test]
    fn test_any_shortfall_classified_as_error() {
        let verifier = GovernmentWarningVerifier;
        let mut result = verifier.not_found("missing".to_string());
        assert_eq!(verifier.classify(&result), Outcome::Error);

        result.status = VerificationStatus::Warning;
        assert_eq!(verifier.classify(&result), Outcome::Error);

        result.status = VerificationStatus::Match;
        assert_eq!(verifier.classify(&result), Outcome::Pass);
    }
}
