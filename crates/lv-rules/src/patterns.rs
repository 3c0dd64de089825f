//! Compiled regex pattern registry
//!
//! All patterns the engine extracts numeric facts with, compiled once at
//! first use and shared across verification calls.

use once_cell::sync::Lazy;
use regex::Regex;

/// ABV extraction patterns, tried in order; first plausible match wins
///
/// Group 1 is always the numeric value.
pub static ABV_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        // "45% ALC/VOL", "45 % alc.vol", "13.5% ABV"
        r"(\d+\.?\d*)\s*%\s*(?:alc(?:ohol)?(?:\s*\.?\s*)?(?:/\s*vol(?:ume)?)?|abv)",
        // "45% alcohol"
        r"(\d+\.?\d*)\s*%\s*alcohol",
        // "45 percent alc"
        r"(\d+\.?\d*)\s*percent\s*alc",
        // "alcohol by volume 45%"
        r"alcohol\s*(?:by\s*volume)?\s*(\d+\.?\d*)\s*%",
        // alcohol-adjacent number within a bounded window
        r"(?:alc|alcohol|vol|volume|proof)\D{0,15}(\d+\.?\d*)\s*%",
        r"(\d+\.?\d*)\s*%\D{0,15}(?:alc|alcohol|vol|volume)",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("Failed to compile ABV pattern"))
    .collect()
});

/// Volume with unit: "750 mL", "1 Liter", "25.4 fl oz"
pub static VOLUME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(\d+\.?\d*)\s*(milliliters?|ml|litres?|liters?|l|fl\s*oz|fluid\s+ounces?|ounces?|oz|pints?|pt|quarts?|qt|gallons?|gal)\b",
    )
    .expect("Failed to compile volume pattern")
});

/// Approved age statement phrasings (27 CFR 5.74)
pub static AGE_FORMAT_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"aged\s+\d+\s+years?",
        r"\d+\s+years?\s+old",
        r"\d+\s+yr\.?\s+old",
        r"aged\s+\d+\s+months?",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("Failed to compile age format pattern"))
    .collect()
});

/// Age statements as they appear on labels, including "aged at least N years"
pub static AGE_EVIDENCE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(?:aged?|age)\s+(?:at\s+least\s+|a\s+minimum\s+of\s+)?(\d+)\s+(?:years?|yrs?|months?|mos?)\s*(?:old)?\b",
    )
    .expect("Failed to compile age evidence pattern")
});

/// Years claimed in an age statement, for the conditional-requirement rule
pub static AGE_YEARS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+)\s*(?:year|yr)").expect("Failed to compile age years pattern"));

/// Sulfite declaration, American or British spelling
pub static SULFITE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:contains\s+)?sul[fp]h?ites?\b")
        .expect("Failed to compile sulfite pattern")
});

/// "Surgeon General" with the capitalization 27 CFR Part 16 asks for
pub static SURGEON_GENERAL_CAPS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\bS[Uu][Rr][Gg][Ee][Oo][Nn]\s+G[Ee][Nn][Ee][Rr][Aa][Ll]\b")
        .expect("Failed to compile capitalization pattern")
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_abv_pattern_standard_form() {
        let caps = ABV_PATTERNS[0].captures("45% alc/vol").unwrap();
        assert_eq!(&caps[1], "45");
    }

    #[test]
    fn test_abv_pattern_reversed_form() {
        let caps = ABV_PATTERNS[3].captures("alcohol by volume 13.5%").unwrap();
        assert_eq!(&caps[1], "13.5");
    }

    #[test]
    fn test_volume_pattern_units() {
        let caps = VOLUME_RE.captures("750 ml").unwrap();
        assert_eq!(&caps[1], "750");
        assert_eq!(&caps[2], "ml");

        let caps = VOLUME_RE.captures("25.4 fl oz").unwrap();
        assert_eq!(&caps[1], "25.4");

        let caps = VOLUME_RE.captures("1 liter").unwrap();
        assert_eq!(&caps[2], "liter");
    }

    #[test]
    fn test_age_evidence_variants() {
        assert!(AGE_EVIDENCE_RE.is_match("Aged 10 Years"));
        assert!(AGE_EVIDENCE_RE.is_match("aged at least 12 years"));
        assert!(AGE_EVIDENCE_RE.is_match("AGED 18 MONTHS"));
        assert!(!AGE_EVIDENCE_RE.is_match("golden color"));
    }

    #[test]
    fn test_sulfite_spellings() {
        assert!(SULFITE_RE.is_match("contains sulfites"));
        assert!(SULFITE_RE.is_match("sulphites"));
        assert!(!SULFITE_RE.is_match("sulfur"));
    }
}
