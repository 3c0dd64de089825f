//! User-submitted label claim
//!
//! Built by the excluded request-parsing layer and immutable for the
//! lifetime of a verification call. Basic types and ranges are validated at
//! the boundary via [`Claim::validate`]; business rules (e.g. proof vs ABV
//! consistency) belong to the field verifiers.

use crate::{VerifyError, VerifyResult};
use serde::{Deserialize, Serialize};

/// What the user claims is on the label
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Claim {
    // Required for all products
    pub brand_name: String,
    pub product_class: String,
    /// Alcohol by volume percentage, 0-100
    pub alcohol_content: f64,

    // Common optional fields
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub net_contents: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bottler_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_of_origin: Option<String>,
    /// Imported products must also carry `country_of_origin`
    #[serde(default)]
    pub is_imported: bool,

    // Spirits
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age_statement: Option<String>,
    /// Proof = ABV x 2, verified for internal consistency if present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proof: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_of_distillation: Option<String>,

    // Wine
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vintage_year: Option<i32>,
    #[serde(default)]
    pub contains_sulfites: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub appellation: Option<String>,

    // Beer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
}

impl Claim {
    /// Reject out-of-invariant values before they reach the engine
    pub fn validate(&self) -> VerifyResult<()> {
        if self.brand_name.trim().is_empty() {
            return Err(VerifyError::InvalidClaim("brand_name is empty".to_string()));
        }
        if self.product_class.trim().is_empty() {
            return Err(VerifyError::InvalidClaim("product_class is empty".to_string()));
        }
        if !(0.0..=100.0).contains(&self.alcohol_content) {
            return Err(VerifyError::InvalidClaim(format!(
                "alcohol_content {} outside 0-100",
                self.alcohol_content
            )));
        }
        if let Some(proof) = self.proof {
            if proof < 0.0 {
                return Err(VerifyError::InvalidClaim(format!("negative proof {}", proof)));
            }
        }
        if let Some(year) = self.vintage_year {
            if !(1800..=2100).contains(&year) {
                return Err(VerifyError::InvalidClaim(format!(
                    "vintage_year {} outside 1800-2100",
                    year
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal() -> Claim {
        Claim {
            brand_name: "Test Vodka".to_string(),
            product_class: "Vodka".to_string(),
            alcohol_content: 40.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_claim() {
        assert!(minimal().validate().is_ok());
    }

    #[test]
    fn test_empty_brand_rejected() {
        let claim = Claim {
            brand_name: "  ".to_string(),
            ..minimal()
        };
        assert!(matches!(claim.validate(), Err(VerifyError::InvalidClaim(_))));
    }

    #[test]
    fn test_abv_out_of_range_rejected() {
        let claim = Claim {
            alcohol_content: 120.0,
            ..minimal()
        };
        assert!(claim.validate().is_err());
    }

    #[test]
    fn test_vintage_out_of_range_rejected() {
        let claim = Claim {
            vintage_year: Some(1700),
            ..minimal()
        };
        assert!(claim.validate().is_err());
    }
}
