//! Markdown report generation

use crate::{VerificationResult, VerificationStatus};
use std::fmt::Write;

fn status_icon(status: VerificationStatus) -> &'static str {
    match status {
        VerificationStatus::Match => "PASS",
        VerificationStatus::Warning => "WARN",
        VerificationStatus::Mismatch | VerificationStatus::NotFound => "FAIL",
        VerificationStatus::Error => "ERROR",
    }
}

pub fn generate(result: &VerificationResult) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "# Label Verification Report");
    let _ = writeln!(out);
    let _ = writeln!(out, "- **Verification ID**: {}", result.id);
    let _ = writeln!(
        out,
        "- **Overall**: {}",
        if result.overall_match { "PASS" } else { "FAIL" }
    );
    let _ = writeln!(
        out,
        "- **Compliance**: {}% (grade {})",
        result.compliance_score, result.compliance_grade
    );
    let _ = writeln!(
        out,
        "- **Mean confidence**: {:.0}%",
        result.confidence_score * 100.0
    );
    let _ = writeln!(out);

    let _ = writeln!(out, "## Fields");
    let _ = writeln!(out);
    let _ = writeln!(out, "| Field | Status | Expected | Found | Confidence |");
    let _ = writeln!(out, "|-------|--------|----------|-------|------------|");
    for field in &result.field_results {
        let _ = writeln!(
            out,
            "| {} | {} | {} | {} | {:.0}% |",
            field.field_name,
            status_icon(field.status),
            field.expected,
            field.found.as_deref().unwrap_or("-"),
            field.confidence * 100.0
        );
    }
    let _ = writeln!(out);

    if !result.errors.is_empty() {
        let _ = writeln!(out, "## Errors");
        let _ = writeln!(out);
        for error in &result.errors {
            let _ = writeln!(out, "- {}", error);
        }
        let _ = writeln!(out);
    }

    if !result.warnings.is_empty() {
        let _ = writeln!(out, "## Warnings");
        let _ = writeln!(out);
        for warning in &result.warnings {
            let _ = writeln!(out, "- {}", warning);
        }
        let _ = writeln!(out);
    }

    out
}
