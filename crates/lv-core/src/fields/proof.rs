//! Proof statement verification (spirits)
//!
//! 27 CFR 5.65. Proof is optional but, when claimed, must be consistent
//! with the claimed ABV (proof = ABV x 2, within +/-1) before the label is
//! even consulted; an inconsistent pair is a defect in the claim itself.

use super::{FieldResult, FieldVerifier, VerifyContext, NOT_APPLICABLE, NOT_PROVIDED};
use crate::text::locate::find_block_by_regex;
use crate::VerificationStatus;
use regex::Regex;

const CFR_REFERENCE: &str = "27 CFR 5.65";

/// Allowed gap between claimed proof and ABV x 2
const PROOF_TOLERANCE: f64 = 1.0;

pub struct ProofVerifier;

impl FieldVerifier for ProofVerifier {
    fn field_name(&self) -> &'static str {
        "proof"
    }

    fn verify(&self, ctx: &VerifyContext<'_>) -> FieldResult {
        let Some(proof) = ctx.claim.proof else {
            return FieldResult {
                field_name: self.field_name().to_string(),
                status: VerificationStatus::Match,
                expected: NOT_PROVIDED.to_string(),
                found: Some(NOT_APPLICABLE.to_string()),
                confidence: 1.0,
                location: None,
                message: "Proof statement not provided (optional)".to_string(),
                regulatory_reference: None,
            };
        };

        let expected_proof = ctx.claim.alcohol_content * 2.0;
        if (proof - expected_proof).abs() > PROOF_TOLERANCE {
            return FieldResult {
                field_name: self.field_name().to_string(),
                status: VerificationStatus::Error,
                expected: format!("{:.0} proof", expected_proof),
                found: Some(format!("{:.0} proof", proof)),
                confidence: 1.0,
                location: None,
                message: format!(
                    "Proof inconsistency: {:.0} proof does not match ABV {}% (should be {:.0} proof)",
                    proof, ctx.claim.alcohol_content, expected_proof
                ),
                regulatory_reference: Some(CFR_REFERENCE.to_string()),
            };
        }

        let pattern = Regex::new(&format!(r"(?i)\b{:.0}\s*proof\b", proof)).ok();
        let hit = pattern.as_ref().and_then(|re| {
            if re.is_match(&ctx.evidence.full_text) {
                Some(find_block_by_regex(ctx.evidence, re))
            } else {
                None
            }
        });

        match hit {
            Some(block_hit) => FieldResult {
                field_name: self.field_name().to_string(),
                status: VerificationStatus::Match,
                expected: format!("{:.0} proof", proof),
                found: Some(format!("{:.0} proof", proof)),
                confidence: 0.9,
                location: block_hit.map(|(_, b)| b.bounding_box),
                message: format!("Proof statement matches: {:.0} proof", proof),
                regulatory_reference: Some(CFR_REFERENCE.to_string()),
            },
            None => FieldResult {
                field_name: self.field_name().to_string(),
                status: VerificationStatus::Warning,
                expected: format!("{:.0} proof", proof),
                found: None,
                confidence: 0.0,
                location: None,
                message: format!(
                    "Proof statement '{:.0} proof' not found on label (optional field)",
                    proof
                ),
                regulatory_reference: Some(CFR_REFERENCE.to_string()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::tests_support::{ctx_with, evidence_from_lines};
    use crate::Claim;

    fn claim(abv: f64, proof: Option<f64>) -> Claim {
        Claim {
            brand_name: "Test".to_string(),
            product_class: "Bourbon Whiskey".to_string(),
            alcohol_content: abv,
            proof,
            ..Default::default()
        }
    }

    #[test]
    fn test_proof_found() {
        let claim = claim(45.0, Some(90.0));
        let evidence = evidence_from_lines(&["90 PROOF"]);
        let binding = ctx_with(&claim, &evidence);
        let result = ProofVerifier.verify(&binding.ctx());

        assert_eq!(result.status, VerificationStatus::Match);
        assert!(result.location.is_some());
    }

    #[test]
    fn test_inconsistent_proof_is_claim_error() {
        let claim = claim(45.0, Some(80.0));
        let evidence = evidence_from_lines(&["80 PROOF"]);
        let binding = ctx_with(&claim, &evidence);
        let result = ProofVerifier.verify(&binding.ctx());

        assert_eq!(result.status, VerificationStatus::Error);
        assert!(result.message.contains("90"));
    }

    #[test]
    fn test_proof_missing_is_warning() {
        let claim = claim(45.0, Some(90.0));
        let evidence = evidence_from_lines(&["EAGLE RARE"]);
        let binding = ctx_with(&claim, &evidence);
        let result = ProofVerifier.verify(&binding.ctx());

        assert_eq!(result.status, VerificationStatus::Warning);
    }

    #[test]
    fn test_proof_not_claimed() {
        let claim = claim(45.0, None);
        let evidence = evidence_from_lines(&["EAGLE RARE"]);
        let binding = ctx_with(&claim, &evidence);
        let result = ProofVerifier.verify(&binding.ctx());

        assert_eq!(result.status, VerificationStatus::Match);
        assert_eq!(result.expected, NOT_PROVIDED);
    }
}
