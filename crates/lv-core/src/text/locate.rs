//! Locating claimed text inside OCR evidence
//!
//! Three tiers, first success wins:
//! 1. fuzzy match against the entire recognized text
//! 2. fuzzy match against each discrete block, best block wins
//! 3. token coverage: how many of the expected words appear somewhere in
//!    the evidence, possibly split across non-adjacent blocks
//!
//! Tier 3 exists because phrases like the statutory warning are routinely
//! split across several OCR blocks that no single comparison will find.

use super::normalize::normalize;
use super::similarity::SimilarityScorer;
use crate::evidence::{Evidence, TextBlock};
use regex::Regex;
use tracing::debug;

/// Per-token acceptance bar for tier-3 candidate matching
const TOKEN_THRESHOLD: f64 = 0.6;
/// Tier-3 coverage treated as a full match
const COVERAGE_MATCH: f64 = 0.8;
/// Tier-3 coverage treated as a warning-grade partial match
const COVERAGE_PARTIAL: f64 = 0.7;

/// Where (and how well) an expected phrase was found
#[derive(Debug, Clone)]
pub struct Located {
    pub found: bool,
    /// Coverage landed between the partial and full bars
    pub partial: bool,
    pub matched_text: Option<String>,
    /// Index of the best supporting block, when one exists
    pub block_index: Option<usize>,
    pub confidence: f64,
}

impl Located {
    fn missing(confidence: f64) -> Self {
        Self {
            found: false,
            partial: false,
            matched_text: None,
            block_index: None,
            confidence,
        }
    }
}

/// Finds the best evidence for an expected phrase
pub struct FieldLocator<'a> {
    scorer: &'a dyn SimilarityScorer,
}

impl<'a> FieldLocator<'a> {
    pub fn new(scorer: &'a dyn SimilarityScorer) -> Self {
        Self { scorer }
    }

    /// Locate `expected` in the evidence at the given match threshold
    pub fn locate(&self, expected: &str, evidence: &Evidence, threshold: f64) -> Located {
        // Tier 1: the whole recognized text
        let (matched, score) = self.scorer.is_match(expected, &evidence.full_text, threshold);
        if matched {
            return Located {
                found: true,
                partial: false,
                matched_text: Some(expected.to_string()),
                block_index: None,
                confidence: score,
            };
        }

        // Tier 2: best single block; strict > keeps the first block on ties
        let mut best: Option<(usize, f64)> = None;
        for (i, block) in evidence.text_blocks.iter().enumerate() {
            let score = self.scorer.score(expected, &block.text);
            if best.map_or(true, |(_, b)| score > b) {
                best = Some((i, score));
            }
        }
        if let Some((i, score)) = best {
            if score >= threshold {
                return Located {
                    found: true,
                    partial: false,
                    matched_text: Some(evidence.text_blocks[i].text.clone()),
                    block_index: Some(i),
                    confidence: score,
                };
            }
        }

        // Tier 3: token coverage across all blocks
        self.locate_by_coverage(expected, evidence)
    }

    fn locate_by_coverage(&self, expected: &str, evidence: &Evidence) -> Located {
        let expected_norm = normalize(expected);
        let expected_tokens: Vec<&str> =
            expected_norm.split(' ').filter(|t| !t.is_empty()).collect();
        if expected_tokens.is_empty() {
            return Located::missing(0.0);
        }

        let mut covered = vec![false; expected_tokens.len()];
        let mut matching_blocks: Vec<usize> = Vec::new();

        for (bi, block) in evidence.text_blocks.iter().enumerate() {
            let block_norm = normalize(&block.text);
            let mut block_hit = false;

            for block_token in block_norm.split(' ').filter(|t| !t.is_empty()) {
                for (ti, expected_token) in expected_tokens.iter().enumerate() {
                    if covered[ti] {
                        continue;
                    }
                    if self.scorer.score(block_token, expected_token) >= TOKEN_THRESHOLD {
                        covered[ti] = true;
                        block_hit = true;
                    }
                }
            }
            if block_hit {
                matching_blocks.push(bi);
            }
        }

        let coverage =
            covered.iter().filter(|c| **c).count() as f64 / expected_tokens.len() as f64;

        if coverage >= COVERAGE_MATCH {
            debug!(expected, coverage, blocks = matching_blocks.len(), "token coverage match");
            let matched_text = matching_blocks
                .iter()
                .map(|&i| evidence.text_blocks[i].text.as_str())
                .collect::<Vec<_>>()
                .join(" ");
            return Located {
                found: true,
                partial: false,
                matched_text: Some(matched_text),
                block_index: matching_blocks.first().copied(),
                confidence: coverage,
            };
        }

        if coverage >= COVERAGE_PARTIAL {
            debug!(expected, coverage, "partial token coverage");
            let matched_text = matching_blocks
                .iter()
                .map(|&i| evidence.text_blocks[i].text.as_str())
                .collect::<Vec<_>>()
                .join(" ");
            return Located {
                found: false,
                partial: true,
                matched_text: Some(matched_text),
                block_index: matching_blocks.first().copied(),
                confidence: coverage,
            };
        }

        debug!(expected, coverage, "insufficient token coverage");
        Located::missing(coverage)
    }
}

/// First block whose text matches the regex, in block order
pub fn find_block_by_regex<'e>(
    evidence: &'e Evidence,
    pattern: &Regex,
) -> Option<(usize, &'e TextBlock)> {
    evidence
        .text_blocks
        .iter()
        .enumerate()
        .find(|(_, b)| pattern.is_match(&b.text))
}

/// First block containing any of the search terms, case-insensitive
pub fn find_block_by_content<'e>(
    evidence: &'e Evidence,
    terms: &[&str],
) -> Option<(usize, &'e TextBlock)> {
    evidence.text_blocks.iter().enumerate().find(|(_, b)| {
        let lower = b.text.to_lowercase();
        terms.iter().any(|t| lower.contains(&t.to_lowercase()))
    })
}
