//! String similarity strategies
//!
//! Two interchangeable scorers: token-sort fuzzy similarity (the default,
//! behind the `fuzzy` feature) and an exact-match fallback. The strategy is
//! selected once at startup and used uniformly for the whole process; it is
//! never mixed within a single verification call.

use super::normalize::normalize;
use once_cell::sync::Lazy;

/// Normalized string similarity in [0, 1]
///
/// Implementations must be order-insensitive with respect to word order so
/// that "Rare Eagle" and "Eagle Rare" score highly.
pub trait SimilarityScorer: Send + Sync {
    /// Strategy name for diagnostics
    fn name(&self) -> &'static str;

    /// Similarity of two strings, 0.0 (unrelated) to 1.0 (equivalent)
    fn score(&self, a: &str, b: &str) -> f64;

    /// Threshold test returning both the verdict and the raw score
    fn is_match(&self, a: &str, b: &str, threshold: f64) -> (bool, f64) {
        let score = self.score(a, b);
        (score >= threshold, score)
    }
}

/// Sort normalized tokens so word order does not affect the comparison
#[cfg(feature = "fuzzy")]
fn token_sort_key(text: &str) -> String {
    let normalized = normalize(text);
    let mut tokens: Vec<&str> = normalized.split(' ').filter(|t| !t.is_empty()).collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

/// Token-sort Levenshtein similarity, tolerant of OCR noise
#[cfg(feature = "fuzzy")]
pub struct TokenSortScorer;

#[cfg(feature = "fuzzy")]
impl SimilarityScorer for TokenSortScorer {
    fn name(&self) -> &'static str {
        "token-sort"
    }

    fn score(&self, a: &str, b: &str) -> f64 {
        let a = token_sort_key(a);
        let b = token_sort_key(b);
        if a.is_empty() && b.is_empty() {
            return 1.0;
        }
        strsim::normalized_levenshtein(&a, &b)
    }
}

/// Equality of normalized text; 1.0 or 0.0 with nothing in between
pub struct ExactScorer;

impl SimilarityScorer for ExactScorer {
    fn name(&self) -> &'static str {
        "exact"
    }

    fn score(&self, a: &str, b: &str) -> f64 {
        if normalize(a) == normalize(b) {
            1.0
        } else {
            0.0
        }
    }
}

static SCORER: Lazy<Box<dyn SimilarityScorer>> = Lazy::new(|| {
    #[cfg(feature = "fuzzy")]
    let scorer: Box<dyn SimilarityScorer> = Box::new(TokenSortScorer);

    #[cfg(not(feature = "fuzzy"))]
    let scorer: Box<dyn SimilarityScorer> = {
        tracing::warn!(
            "fuzzy similarity unavailable - falling back to exact string matching; \
             this will severely degrade match quality"
        );
        Box::new(ExactScorer)
    };

    scorer
});

/// Process-wide similarity strategy, selected once at startup
pub fn default_scorer() -> &'static dyn SimilarityScorer {
    &**SCORER
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(feature = "fuzzy")]
    #[test]
    fn test_word_order_insensitive() {
        let scorer = TokenSortScorer;
        assert!(scorer.score("Rare Eagle", "Eagle Rare") > 0.99);
    }

    #[cfg(feature = "fuzzy")]
    #[test]
    fn test_ocr_noise_tolerated() {
        let scorer = TokenSortScorer;
        // "Rare" misread as "Rave"
        let (matched, score) = scorer.is_match("Eagle Rare", "EAGLE RAVE", 0.85);
        assert!(matched, "score was {}", score);
    }

    #[cfg(feature = "fuzzy")]
    #[test]
    fn test_unrelated_strings_score_low() {
        let scorer = TokenSortScorer;
        assert!(scorer.score("Bourbon", "Chardonnay") < 0.5);
    }

    #[test]
    fn test_exact_scorer_binary() {
        let scorer = ExactScorer;
        assert_eq!(scorer.score("Eagle  Rare", "eagle rare"), 1.0);
        assert_eq!(scorer.score("Eagle Rare", "Eagle Rara"), 0.0);
    }

    #[test]
    fn test_empty_strings() {
        let scorer = ExactScorer;
        assert_eq!(scorer.score("", ""), 1.0);
    }
}
