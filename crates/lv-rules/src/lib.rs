//! Regulatory reference data for alcohol label verification
//!
//! This crate provides the read-only tables and compiled matchers the
//! verification engine checks labels against: the statutory health warning,
//! product class synonyms, standards of fill, unit conversions, and the
//! shared regex pattern registry.

pub mod patterns;
pub mod synonyms;
pub mod units;
pub mod warning;

use aho_corasick::{AhoCorasick, AhoCorasickBuilder};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RulesError {
    #[error("Pattern compilation error: {0}")]
    PatternCompilation(String),

    #[error("Unknown unit: {0}")]
    UnknownUnit(String),

    #[error("Unknown product category: {0}")]
    UnknownCategory(String),
}

pub type RulesResult<T> = Result<T, RulesError>;

/// Product category under TTB labeling rules
///
/// - Spirits: 27 CFR Part 5
/// - Wine: 27 CFR Part 4
/// - Beer: 27 CFR Part 7 (malt beverages)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductCategory {
    Spirits,
    Wine,
    Beer,
}

impl std::fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProductCategory::Spirits => write!(f, "spirits"),
            ProductCategory::Wine => write!(f, "wine"),
            ProductCategory::Beer => write!(f, "beer"),
        }
    }
}

impl std::str::FromStr for ProductCategory {
    type Err = RulesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "spirits" | "spirit" | "distilled spirits" => Ok(ProductCategory::Spirits),
            "wine" => Ok(ProductCategory::Wine),
            "beer" | "malt beverage" => Ok(ProductCategory::Beer),
            other => Err(RulesError::UnknownCategory(other.to_string())),
        }
    }
}

/// Case-insensitive multi-literal matcher over free text
///
/// Thin wrapper around Aho-Corasick so callers can ask which of a fixed
/// keyword set appears in (or is missing from) a piece of evidence text.
pub struct KeywordSet {
    keywords: Vec<String>,
    matcher: AhoCorasick,
}

impl KeywordSet {
    pub fn new(keywords: &[&str]) -> RulesResult<Self> {
        let keywords: Vec<String> = keywords.iter().map(|k| k.to_string()).collect();
        let matcher = AhoCorasickBuilder::new()
            .ascii_case_insensitive(true)
            .build(&keywords)
            .map_err(|e| RulesError::PatternCompilation(e.to_string()))?;
        Ok(Self { keywords, matcher })
    }

    /// Check whether any keyword appears in the text
    pub fn is_match(&self, text: &str) -> bool {
        self.matcher.is_match(text)
    }

    /// First keyword found in the text, in text order
    pub fn first_match(&self, text: &str) -> Option<&str> {
        self.matcher
            .find(text)
            .map(|m| self.keywords[m.pattern().as_usize()].as_str())
    }

    /// Keywords from the set that do not appear anywhere in the text
    pub fn missing_from(&self, text: &str) -> Vec<&str> {
        let mut present = vec![false; self.keywords.len()];
        for m in self.matcher.find_iter(text) {
            present[m.pattern().as_usize()] = true;
        }
        self.keywords
            .iter()
            .zip(present)
            .filter(|(_, p)| !*p)
            .map(|(k, _)| k.as_str())
            .collect()
    }

    /// All keywords in the set
    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }
}
