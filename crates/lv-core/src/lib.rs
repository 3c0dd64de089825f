//! Label Verification Engine
//!
//! This crate checks a user's structured claims about an alcohol product
//! label (brand, class, strength, volume, statutory warning, ...) against
//! text recovered from a photograph of that label, and produces a per-field
//! verdict plus an aggregate compliance score and grade.
//!
//! Image handling, OCR, and the request layer are external collaborators:
//! the engine consumes an already-built [`Claim`] and [`Evidence`] and is a
//! stateless, synchronous computation over them.

pub mod claim;
pub mod evidence;
pub mod extract;
pub mod fields;
pub mod report;
pub mod score;
pub mod text;

use serde::{Deserialize, Serialize};
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, info};
use uuid::Uuid;

pub use claim::Claim;
pub use evidence::{BoundingBox, Evidence, TextBlock};
pub use fields::{FieldResult, FieldVerifier, Outcome, VerifyContext};
pub use lv_rules::ProductCategory;
pub use score::{ComplianceScore, Grade};
pub use text::similarity::SimilarityScorer;

#[derive(Error, Debug)]
pub enum VerifyError {
    #[error("Invalid claim: {0}")]
    InvalidClaim(String),

    #[error("Invalid evidence: {0}")]
    InvalidEvidence(String),

    #[error("Rules error: {0}")]
    Rules(#[from] lv_rules::RulesError),

    #[error("Report error: {0}")]
    Report(String),
}

pub type VerifyResult<T> = Result<T, VerifyError>;

/// Status of a single field verification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationStatus {
    /// Field value on the label matches the claimed value
    Match,
    /// Field value found but does not match the claimed value
    Mismatch,
    /// Field not detected on the label
    NotFound,
    /// Field matches but with a compliance caveat (e.g. non-standard size)
    Warning,
    /// The claim itself is defective for this field
    Error,
}

impl VerificationStatus {
    pub fn is_match(&self) -> bool {
        matches!(self, VerificationStatus::Match)
    }
}

impl std::fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VerificationStatus::Match => write!(f, "match"),
            VerificationStatus::Mismatch => write!(f, "mismatch"),
            VerificationStatus::NotFound => write!(f, "not_found"),
            VerificationStatus::Warning => write!(f, "warning"),
            VerificationStatus::Error => write!(f, "error"),
        }
    }
}

/// Engine thresholds and tolerances
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyConfig {
    /// Default fuzzy-match threshold for locating claimed text
    pub match_threshold: f64,
    /// Product class threshold, slightly looser to absorb class variations
    pub class_threshold: f64,
    /// Acceptable ABV difference in percentage points
    pub abv_tolerance: f64,
    /// Acceptable net-contents difference after conversion to ml
    pub volume_tolerance_ml: f64,
    /// Tolerance when testing membership in a standards-of-fill table
    pub size_tolerance_ml: f64,
}

impl Default for VerifyConfig {
    fn default() -> Self {
        Self {
            match_threshold: 0.85,
            class_threshold: 0.80,
            abv_tolerance: 0.5,
            volume_tolerance_ml: 1.0,
            size_tolerance_ml: 1.0,
        }
    }
}

/// Complete verification result, the terminal artifact returned to the caller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationResult {
    pub id: Uuid,
    pub overall_match: bool,
    /// Mean of per-field confidences
    pub confidence_score: f64,
    pub field_results: Vec<FieldResult>,
    /// Weighted compliance percentage, 0-100
    pub compliance_score: u8,
    pub compliance_grade: Grade,
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
    pub ocr_full_text: String,
    pub processing_time_ms: f64,
}

/// Main verification interface
///
/// Runs the applicable field verifiers for a product category in order,
/// aggregates warnings and errors, and scores the outcome.
pub struct Verifier {
    config: VerifyConfig,
    scorer: &'static dyn SimilarityScorer,
}

impl Verifier {
    /// Create a verifier with default configuration
    pub fn new() -> Self {
        Self::with_config(VerifyConfig::default())
    }

    /// Create a verifier with custom configuration
    pub fn with_config(config: VerifyConfig) -> Self {
        Self {
            config,
            scorer: text::similarity::default_scorer(),
        }
    }

    /// Get current configuration
    pub fn config(&self) -> &VerifyConfig {
        &self.config
    }

    /// Verify a claim against OCR evidence
    ///
    /// Never fails on a business-level mismatch; every outcome is encoded in
    /// the returned statuses and aggregate lists.
    pub fn verify(
        &self,
        claim: &Claim,
        evidence: &Evidence,
        category: ProductCategory,
    ) -> VerificationResult {
        let started = Instant::now();
        info!(
            brand = %claim.brand_name,
            %category,
            blocks = evidence.block_count(),
            "verifying label"
        );

        let ctx = VerifyContext {
            claim,
            evidence,
            category,
            scorer: self.scorer,
            config: &self.config,
        };

        let mut field_results: Vec<FieldResult> = Vec::new();
        let mut warnings: Vec<String> = Vec::new();
        let mut errors: Vec<String> = Vec::new();

        for verifier in fields::verifiers_for(category) {
            if !verifier.applies(claim) {
                debug!(field = verifier.field_name(), "skipped (not claimed)");
                continue;
            }

            let result = verifier.verify(&ctx);
            debug!(
                field = verifier.field_name(),
                status = %result.status,
                confidence = result.confidence,
                "field verified"
            );

            match verifier.classify(&result) {
                Outcome::Pass => {}
                Outcome::Warning => warnings.push(result.message.clone()),
                Outcome::Error => errors.push(result.message.clone()),
            }
            field_results.push(result);
        }

        // Warnings alone never fail verification
        let overall_match = errors.is_empty();

        let confidence_score = if field_results.is_empty() {
            0.0
        } else {
            field_results.iter().map(|r| r.confidence).sum::<f64>() / field_results.len() as f64
        };

        let compliance = score::compliance_score(&field_results);
        info!(
            overall_match,
            compliance = compliance.percentage,
            grade = %compliance.grade,
            "verification complete"
        );

        VerificationResult {
            id: Uuid::new_v4(),
            overall_match,
            confidence_score,
            field_results,
            compliance_score: compliance.percentage as u8,
            compliance_grade: compliance.grade,
            warnings,
            errors,
            ocr_full_text: evidence.full_text.clone(),
            processing_time_ms: started.elapsed().as_secs_f64() * 1000.0,
        }
    }
}

impl Default for Verifier {
    fn default() -> Self {
        Self::new()
    }
}
