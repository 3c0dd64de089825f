//! Field-by-field label verifiers
//!
//! One verifier per label field. Each is pure: it consumes the claim and
//! the OCR evidence and returns a single [`FieldResult`]. Business-level
//! mismatches are statuses, never panics or errors.

pub mod age;
pub mod alcohol;
pub mod brand;
pub mod net_contents;
pub mod origin;
pub mod product_class;
pub mod proof;
pub mod sulfites;
pub mod vintage;
pub mod warning;

use crate::claim::Claim;
use crate::evidence::{BoundingBox, Evidence};
use crate::text::similarity::SimilarityScorer;
use crate::{ProductCategory, VerificationStatus, VerifyConfig};
use serde::{Deserialize, Serialize};

pub use age::AgeStatementVerifier;
pub use alcohol::AlcoholContentVerifier;
pub use brand::BrandNameVerifier;
pub use net_contents::NetContentsVerifier;
pub use origin::CountryOfOriginVerifier;
pub use product_class::ProductClassVerifier;
pub use proof::ProofVerifier;
pub use sulfites::SulfiteVerifier;
pub use vintage::VintageVerifier;
pub use warning::GovernmentWarningVerifier;

// Expected-value markers for fields that were never actually owed; the
// scorer treats these as satisfied rather than missing.
pub const NOT_REQUIRED: &str = "Not required";
pub const NOT_APPLICABLE: &str = "Not applicable";
pub const NOT_PROVIDED: &str = "Not provided";
pub const DOMESTIC_PRODUCT: &str = "Domestic product";

/// Verdict for a single field
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldResult {
    pub field_name: String,
    pub status: VerificationStatus,
    pub expected: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub found: Option<String>,
    pub confidence: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<BoundingBox>,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regulatory_reference: Option<String>,
}

/// Everything a verifier may read; immutable for the whole call
pub struct VerifyContext<'a> {
    pub claim: &'a Claim,
    pub evidence: &'a Evidence,
    pub category: ProductCategory,
    pub scorer: &'a dyn SimilarityScorer,
    pub config: &'a VerifyConfig,
}

impl VerifyContext<'_> {
    /// Bounding box of a block by index, for result locations
    pub fn block_location(&self, index: Option<usize>) -> Option<BoundingBox> {
        index.and_then(|i| self.evidence.text_blocks.get(i)).map(|b| b.bounding_box)
    }
}

/// How a field outcome feeds the aggregate error/warning lists
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Pass,
    Warning,
    Error,
}

/// A single-field verification procedure
pub trait FieldVerifier: Send + Sync {
    /// Field name as reported in results
    fn field_name(&self) -> &'static str;

    /// Whether this field is checked for the given claim at all
    fn applies(&self, _claim: &Claim) -> bool {
        true
    }

    /// Produce the verdict for this field
    fn verify(&self, ctx: &VerifyContext<'_>) -> FieldResult;

    /// Route the verdict into the aggregate lists. The default treats any
    /// WARNING as non-fatal and everything else non-MATCH as a failure.
    fn classify(&self, result: &FieldResult) -> Outcome {
        match result.status {
            VerificationStatus::Match => Outcome::Pass,
            VerificationStatus::Warning => Outcome::Warning,
            VerificationStatus::Mismatch
            | VerificationStatus::NotFound
            | VerificationStatus::Error => Outcome::Error,
        }
    }
}

/// Ordered verifier sequence for a product category
///
/// The common run is identical for every category; spirits add the age
/// statement and proof, wine adds sulfites and vintage, beer adds neither.
/// Country of origin closes the sequence for all categories.
pub fn verifiers_for(category: ProductCategory) -> Vec<Box<dyn FieldVerifier>> {
    let mut verifiers: Vec<Box<dyn FieldVerifier>> = vec![
        Box::new(BrandNameVerifier),
        Box::new(ProductClassVerifier),
        Box::new(AlcoholContentVerifier),
        Box::new(NetContentsVerifier),
        Box::new(GovernmentWarningVerifier),
    ];

    match category {
        ProductCategory::Spirits => {
            verifiers.push(Box::new(AgeStatementVerifier));
            verifiers.push(Box::new(ProofVerifier));
        }
        ProductCategory::Wine => {
            verifiers.push(Box::new(SulfiteVerifier));
            verifiers.push(Box::new(VintageVerifier));
        }
        ProductCategory::Beer => {}
    }

    verifiers.push(Box::new(CountryOfOriginVerifier));
    verifiers
}
