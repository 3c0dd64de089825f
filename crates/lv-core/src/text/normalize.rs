//! Text canonicalization for comparison
//!
//! Lower-cases, collapses whitespace runs, and strips punctuation except
//! `%`, `.`, `/`, `-` (kept so "45.0% alc/vol" survives). Idempotent.

/// Canonicalize text for comparison
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;

    for ch in text.chars().flat_map(char::to_lowercase) {
        if ch.is_whitespace() {
            pending_space = !out.is_empty();
            continue;
        }
        if ch.is_alphanumeric() || matches!(ch, '%' | '.' | '/' | '-') {
            if pending_space {
                out.push(' ');
                pending_space = false;
            }
            out.push(ch);
        }
        // remaining punctuation is dropped entirely
    }

    out
}
