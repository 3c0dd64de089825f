//! Country of origin verification (imported products)
//!
//! 27 CFR 5.44 (spirits), 4.30 (wine), 7.25 (beer). Only imported products
//! owe a country statement; an import claim without a country is a defect
//! in the claim itself.

use super::{FieldResult, FieldVerifier, VerifyContext, DOMESTIC_PRODUCT, NOT_REQUIRED};
use crate::text::locate::{find_block_by_content, FieldLocator};
use crate::text::normalize;
use crate::VerificationStatus;

const CFR_REFERENCE: &str = "27 CFR 5.44, 4.30, 7.25";

pub struct CountryOfOriginVerifier;

impl FieldVerifier for CountryOfOriginVerifier {
    fn field_name(&self) -> &'static str {
        "country_of_origin"
    }

    fn verify(&self, ctx: &VerifyContext<'_>) -> FieldResult {
        if !ctx.claim.is_imported {
            return FieldResult {
                field_name: self.field_name().to_string(),
                status: VerificationStatus::Match,
                expected: NOT_REQUIRED.to_string(),
                found: Some(DOMESTIC_PRODUCT.to_string()),
                confidence: 1.0,
                location: None,
                message: "Country of origin not required (domestic product)".to_string(),
                regulatory_reference: None,
            };
        }

        let Some(country) = ctx.claim.country_of_origin.as_deref() else {
            return FieldResult {
                field_name: self.field_name().to_string(),
                status: VerificationStatus::Error,
                expected: "Country name required".to_string(),
                found: None,
                confidence: 0.0,
                location: None,
                message: "Country of origin required for imported products but not provided in claim"
                    .to_string(),
                regulatory_reference: Some(CFR_REFERENCE.to_string()),
            };
        };

        let locator = FieldLocator::new(ctx.scorer);
        let loc = locator.locate(country, ctx.evidence, ctx.config.match_threshold);

        // Common label phrasings count as well
        let country_norm = normalize(country);
        let text_norm = normalize(&ctx.evidence.full_text);
        let phrased = text_norm.contains(&format!("product of {}", country_norm))
            || text_norm.contains(&format!("imported from {}", country_norm));

        if loc.found || phrased {
            let location = if loc.found {
                ctx.block_location(loc.block_index)
            } else {
                let phrase = format!("product of {}", country);
                find_block_by_content(ctx.evidence, &[country, phrase.as_str()])
                    .map(|(_, b)| b.bounding_box)
            };
            return FieldResult {
                field_name: self.field_name().to_string(),
                status: VerificationStatus::Match,
                expected: country.to_string(),
                found: Some(
                    loc.matched_text.unwrap_or_else(|| country.to_string()),
                ),
                confidence: if loc.found { loc.confidence } else { 0.85 },
                location,
                message: format!("Country of origin found: {}", country),
                regulatory_reference: Some(CFR_REFERENCE.to_string()),
            };
        }

        if loc.partial {
            return FieldResult {
                field_name: self.field_name().to_string(),
                status: VerificationStatus::Warning,
                expected: country.to_string(),
                found: loc.matched_text,
                confidence: loc.confidence,
                location: ctx.block_location(loc.block_index),
                message: format!(
                    "Country of origin '{}' only partially found on label",
                    country
                ),
                regulatory_reference: Some(CFR_REFERENCE.to_string()),
            };
        }

        FieldResult {
            field_name: self.field_name().to_string(),
            status: VerificationStatus::NotFound,
            expected: country.to_string(),
            found: None,
            confidence: 0.0,
            location: None,
            message: format!(
                "Country of origin '{}' required but not found on label",
                country
            ),
            regulatory_reference: Some(CFR_REFERENCE.to_string()),
        }
    }
}
