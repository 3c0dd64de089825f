//! Statutory government warning statement
//!
//! 27 CFR Part 16 requires the health warning verbatim on qualifying labels.

use crate::KeywordSet;
use once_cell::sync::Lazy;

/// Full statutory warning text required by 27 CFR Part 16
pub const GOVERNMENT_WARNING_TEXT: &str = "GOVERNMENT WARNING: (1) According to the Surgeon \
    General, women should not drink alcoholic beverages during pregnancy because of the risk \
    of birth defects. (2) Consumption of alcoholic beverages impairs your ability to drive a \
    car or operate machinery, and may cause health problems.";

/// Keywords that must all appear for the warning to count as present at all
pub const CRITICAL_KEYWORDS: &[&str] = &[
    "government warning",
    "surgeon general",
    "pregnancy",
    "birth defects",
    "impairs",
    "drive",
];

/// Compiled matcher over [`CRITICAL_KEYWORDS`]
pub static WARNING_KEYWORDS: Lazy<KeywordSet> = Lazy::new(|| {
    KeywordSet::new(CRITICAL_KEYWORDS).expect("Failed to compile warning keyword set")
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warning_keywords_present_in_statute() {
        // every critical keyword occurs in the statutory text itself
        let lower = GOVERNMENT_WARNING_TEXT.to_lowercase();
        for kw in CRITICAL_KEYWORDS {
            assert!(lower.contains(kw), "missing keyword: {}", kw);
        }
    }

    #[test]
    fn test_keyword_matcher_case_insensitive() {
        assert!(WARNING_KEYWORDS.is_match("SURGEON GENERAL"));
        assert_eq!(
            WARNING_KEYWORDS.missing_from("surgeon general pregnancy birth defects").len(),
            3
        );
    }
}
