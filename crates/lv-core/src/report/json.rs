//! JSON report generation

use crate::{VerificationResult, VerifyError, VerifyResult};

pub fn generate(result: &VerificationResult) -> VerifyResult<String> {
    serde_json::to_string_pretty(result)
        .map_err(|e| VerifyError::Report(format!("JSON serialization failed: {}", e)))
}
