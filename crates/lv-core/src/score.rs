//! Weighted compliance scoring
//!
//! Every verified field carries a fixed point weight by regulatory
//! importance. Matches earn full weight, warnings 80% (rounded down),
//! mismatches and claim errors nothing. A field that was never actually
//! owed (its expected value is one of the not-owed markers) earns full
//! weight even when reported NOT_FOUND. Pure and total: never fails.

use crate::fields::{
    FieldResult, DOMESTIC_PRODUCT, NOT_APPLICABLE, NOT_PROVIDED, NOT_REQUIRED,
};
use crate::VerificationStatus;
use serde::{Deserialize, Serialize};

/// Critical fields: label is non-compliant without them
const CRITICAL_WEIGHT: u32 = 40;
/// Important fields
const IMPORTANT_WEIGHT: u32 = 20;
/// Recognized optional fields
const OPTIONAL_WEIGHT: u32 = 10;
/// Anything unrecognized still counts a little
const DEFAULT_WEIGHT: u32 = 5;

/// Expected-value markers meaning the field was never owed
const NOT_OWED: &[&str] = &[NOT_REQUIRED, NOT_PROVIDED, NOT_APPLICABLE, DOMESTIC_PRODUCT];

/// Letter grade derived from the weighted percentage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage >= 90.0 {
            Grade::A
        } else if percentage >= 80.0 {
            Grade::B
        } else if percentage >= 70.0 {
            Grade::C
        } else if percentage >= 60.0 {
            Grade::D
        } else {
            Grade::F
        }
    }
}

impl std::fmt::Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Grade::A => write!(f, "A"),
            Grade::B => write!(f, "B"),
            Grade::C => write!(f, "C"),
            Grade::D => write!(f, "D"),
            Grade::F => write!(f, "F"),
        }
    }
}

/// Aggregate scoring outcome
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplianceScore {
    pub earned: u32,
    pub possible: u32,
    pub percentage: f64,
    pub grade: Grade,
}

/// Point weight for a field by regulatory importance
pub fn weight_for(field_name: &str) -> u32 {
    match field_name {
        "brand_name" | "alcohol_content" | "product_class" | "government_warning" => {
            CRITICAL_WEIGHT
        }
        "net_contents" | "sulfites" => IMPORTANT_WEIGHT,
        "age_statement" | "proof" | "vintage" | "country_of_origin"
        | "state_of_distillation" | "appellation" | "style" => OPTIONAL_WEIGHT,
        _ => DEFAULT_WEIGHT,
    }
}

/// Score a set of field results
pub fn compliance_score(results: &[FieldResult]) -> ComplianceScore {
    let mut earned: u32 = 0;
    let mut possible: u32 = 0;

    for result in results {
        let weight = weight_for(&result.field_name);
        possible += weight;

        earned += match result.status {
            VerificationStatus::Match => weight,
            VerificationStatus::Warning => (weight as f64 * 0.8) as u32,
            VerificationStatus::Mismatch | VerificationStatus::Error => 0,
            VerificationStatus::NotFound => {
                if NOT_OWED.contains(&result.expected.as_str()) {
                    weight
                } else {
                    0
                }
            }
        };
    }

    let percentage = if possible == 0 {
        0.0
    } else {
        earned as f64 / possible as f64 * 100.0
    };

    ComplianceScore {
        earned,
        possible,
        percentage,
        grade: Grade::from_percentage(percentage),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(field: &str, status: VerificationStatus) -> FieldResult {
        FieldResult {
            field_name: field.to_string(),
            status,
            expected: "x".to_string(),
            found: None,
            confidence: 0.9,
            location: None,
            message: String::new(),
            regulatory_reference: None,
        }
    }

    #[test]
    fn test_all_matches_score_100() {
        let results = vec![
            result("brand_name", VerificationStatus::Match),
            result("alcohol_content", VerificationStatus::Match),
            result("net_contents", VerificationStatus::Match),
        ];
        let score = compliance_score(&results);
        assert_eq!(score.earned, 100);
        assert_eq!(score.possible, 100);
        assert_eq!(score.grade, Grade::A);
    }

    #[test]
    fn test_warning_earns_80_percent_rounded_down() {
        let results = vec![result("vintage", VerificationStatus::Warning)];
        let score = compliance_score(&results);
        // 10 * 0.8 = 8
        assert_eq!(score.earned, 8);

        let results = vec![result("net_contents", VerificationStatus::Warning)];
        assert_eq!(compliance_score(&results).earned, 16);
    }

    #[test]
    fn test_mismatch_earns_nothing() {
        let results = vec![
            result("brand_name", VerificationStatus::Match),
            result("alcohol_content", VerificationStatus::Mismatch),
        ];
        let score = compliance_score(&results);
        assert_eq!(score.earned, 40);
        assert_eq!(score.possible, 80);
        assert_eq!(score.grade, Grade::F);
    }

    #[test]
    fn test_not_owed_field_earns_full_weight() {
        let mut not_owed = result("proof", VerificationStatus::NotFound);
        not_owed.expected = "Not provided".to_string();
        let score = compliance_score(&[not_owed]);
        assert_eq!(score.earned, 10);

        let owed = result("proof", VerificationStatus::NotFound);
        assert_eq!(compliance_score(&[owed]).earned, 0);
    }

    #[test]
    fn test_unrecognized_field_gets_default_weight() {
        let results = vec![result("bottling_line", VerificationStatus::Match)];
        let score = compliance_score(&results);
        assert_eq!(score.possible, 5);
    }

    #[test]
    fn test_empty_results_score_zero() {
        let score = compliance_score(&[]);
        assert_eq!(score.percentage, 0.0);
        assert_eq!(score.grade, Grade::F);
    }

    #[test]
    fn test_grade_bands() {
        assert_eq!(Grade::from_percentage(95.0), Grade::A);
        assert_eq!(Grade::from_percentage(90.0), Grade::A);
        assert_eq!(Grade::from_percentage(89.9), Grade::B);
        assert_eq!(Grade::from_percentage(80.0), Grade::B);
        assert_eq!(Grade::from_percentage(75.0), Grade::C);
        assert_eq!(Grade::from_percentage(65.0), Grade::D);
        assert_eq!(Grade::from_percentage(59.9), Grade::F);
    }

    #[test]
    fn test_degrading_a_field_never_raises_the_score() {
        // MATCH -> WARNING -> MISMATCH is monotonically non-increasing
        let base = vec![
            result("brand_name", VerificationStatus::Match),
            result("net_contents", VerificationStatus::Match),
        ];
        let mut warned = base.clone();
        warned[1].status = VerificationStatus::Warning;
        let mut failed = base.clone();
        failed[1].status = VerificationStatus::Mismatch;

        let p0 = compliance_score(&base).percentage;
        let p1 = compliance_score(&warned).percentage;
        let p2 = compliance_score(&failed).percentage;
        assert!(p0 >= p1);
        assert!(p1 >= p2);
    }
}
