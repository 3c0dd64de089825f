//! Report generation

pub mod json;
pub mod markdown;

use crate::{VerificationResult, VerifyResult};

/// Report format
pub enum ReportFormat {
    Json,
    Markdown,
}

/// Render a verification result in the requested format
pub fn generate_report(result: &VerificationResult, format: ReportFormat) -> VerifyResult<String> {
    match format {
        ReportFormat::Json => json::generate(result),
        ReportFormat::Markdown => Ok(markdown::generate(result)),
    }
}
