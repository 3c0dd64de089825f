//! OCR evidence consumed by the verification engine
//!
//! Supplied by the external OCR collaborator and treated as read-only for
//! the lifetime of a verification call. Bounding boxes are carried through
//! for UI highlighting only; they never participate in matching.

use crate::{VerifyError, VerifyResult};
use serde::{Deserialize, Serialize};

/// Pixel-space location of a text block on the label image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// One recognized region of text
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextBlock {
    pub text: String,
    pub bounding_box: BoundingBox,
    /// Recognition confidence for this block, 0-1
    pub confidence: f64,
}

/// Complete OCR output for one label image
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Evidence {
    pub full_text: String,
    /// Discrete text regions in recognition order
    pub text_blocks: Vec<TextBlock>,
    /// Overall recognition confidence, 0-1
    pub confidence: f64,
}

impl Evidence {
    /// Build evidence, rejecting out-of-invariant confidences
    pub fn new(
        full_text: String,
        text_blocks: Vec<TextBlock>,
        confidence: f64,
    ) -> VerifyResult<Self> {
        let evidence = Self {
            full_text,
            text_blocks,
            confidence,
        };
        evidence.validate()?;
        Ok(evidence)
    }

    /// Re-check invariants, for values deserialized at the boundary
    pub fn validate(&self) -> VerifyResult<()> {
        if !(0.0..=1.0).contains(&self.confidence) {
            return Err(VerifyError::InvalidEvidence(format!(
                "confidence {} outside 0-1",
                self.confidence
            )));
        }
        for (i, blk) in self.text_blocks.iter().enumerate() {
            if !(0.0..=1.0).contains(&blk.confidence) {
                return Err(VerifyError::InvalidEvidence(format!(
                    "block {} confidence {} outside 0-1",
                    i, blk.confidence
                )));
            }
        }
        Ok(())
    }

    pub fn block_count(&self) -> usize {
        self.text_blocks.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bbox() -> BoundingBox {
        BoundingBox {
            x: 0,
            y: 0,
            width: 100,
            height: 20,
        }
    }

    #[test]
    fn test_valid_evidence() {
        let ev = Evidence::new(
            "EAGLE RARE".to_string(),
            vec![TextBlock {
                text: "EAGLE RARE".to_string(),
                bounding_box: bbox(),
                confidence: 0.9,
            }],
            0.9,
        );
        assert!(ev.is_ok());
    }

    #[test]
    fn test_confidence_out_of_range_rejected() {
        let ev = Evidence::new("x".to_string(), Vec::new(), 1.5);
        assert!(matches!(ev, Err(VerifyError::InvalidEvidence(_))));
    }

    #[test]
    fn test_block_confidence_out_of_range_rejected() {
        let ev = Evidence::new(
            "x".to_string(),
            vec![TextBlock {
                text: "x".to_string(),
                bounding_box: bbox(),
                confidence: -0.1,
            }],
            0.9,
        );
        assert!(ev.is_err());
    }
}
