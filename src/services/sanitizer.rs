//! Response Sanitizer
//!
//! Normalizes raw model output into loadable component source:
//! 1. every fence delimiter is removed, wherever it appears
//! 2. surrounding whitespace is trimmed
//! 3. the React import is prepended unless a default React import exists
//!
//! Empty output stays empty; substituting the placeholder component is the
//! orchestrator's call. `sanitize` is idempotent.

use std::sync::OnceLock;

use regex::{Captures, Regex};

use prompt_to_app_core::REQUIRED_IMPORT;

/// A fence delimiter plus whatever could be its language hint. Well-known
/// hints end at a word boundary; any other hint must run to end of line.
fn fence_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r"(?mi)```((?:javascript|typescript|jsx|tsx|js|ts)\b|[a-z][\w+-]*[ \t\r]*$)?",
        )
        .expect("fence pattern is valid")
    })
}

/// Any default import of React, with or without named specifiers.
fn react_import_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\bimport\s+React\b").expect("import pattern is valid"))
}

/// Remove every fence delimiter and trim the result.
///
/// Fences alternate between opening and closing. Only an opening fence
/// loses its language hint; text after a closing fence is content.
pub fn strip_code_fences(raw: &str) -> String {
    let mut fences = 0usize;
    fence_pattern()
        .replace_all(raw, |caps: &Captures| {
            let opening = fences % 2 == 0;
            fences += 1;
            match caps.get(1) {
                Some(hint) if !opening => hint.as_str().to_string(),
                _ => String::new(),
            }
        })
        .trim()
        .to_string()
}

/// Whether `source` already imports React as its default export.
pub fn has_required_import(source: &str) -> bool {
    react_import_pattern().is_match(source)
}

/// Prepend the required import (and a blank line) unless already present.
pub fn ensure_required_import(source: &str) -> String {
    if has_required_import(source) {
        source.to_string()
    } else {
        format!("{}\n\n{}", REQUIRED_IMPORT, source)
    }
}

/// Turn raw model output into component source, or `""` if nothing is left.
pub fn sanitize(raw: &str) -> String {
    let cleaned = strip_code_fences(raw);
    if cleaned.is_empty() {
        return cleaned;
    }
    ensure_required_import(&cleaned)
}
