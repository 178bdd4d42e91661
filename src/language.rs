//! Language code resolution.
//!
//! Maps short ISO-style language codes to the internal language identifiers
//! the document entity carries. The mapping is closed and total: whitespace is
//! trimmed, matching is case-insensitive, and anything outside the known set
//! (including an absent code) resolves to the "unknown" identifier `0`. This
//! component never errors.

use tracing::debug;

/// Internal identifier for an unknown or absent language code.
pub const LANGUAGE_UNKNOWN: u32 = 0;

/// The closed code-to-identifier mapping.
const LANGUAGE_IDS: [(&str, u32); 3] = [("es", 1), ("en", 2), ("ru", 3)];

/// Resolve a short language code to its internal identifier.
///
/// # Examples
///
/// ```rust
/// use lexico::resolve_language_code;
///
/// assert_eq!(resolve_language_code(Some("es")), 1);
/// assert_eq!(resolve_language_code(Some(" EN ")), 2);
/// assert_eq!(resolve_language_code(Some("fr")), 0);
/// assert_eq!(resolve_language_code(None), 0);
/// ```
pub fn resolve_language_code(code: Option<&str>) -> u32 {
    let normalized = normalize_language_code(code);
    match LANGUAGE_IDS
        .iter()
        .find(|(known, _)| *known == normalized)
    {
        Some((_, id)) => *id,
        None => {
            if !normalized.is_empty() {
                // Unknown codes are tolerated by design; log them so schema
                // drift stays visible to operators.
                debug!(code = %normalized, "language_code_unknown");
            }
            LANGUAGE_UNKNOWN
        }
    }
}

/// Normalize a language code for echoing back to the caller: trimmed and
/// lowercased, empty string when absent.
pub fn normalize_language_code(code: Option<&str>) -> String {
    code.unwrap_or("").trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes_resolve() {
        assert_eq!(resolve_language_code(Some("es")), 1);
        assert_eq!(resolve_language_code(Some("en")), 2);
        assert_eq!(resolve_language_code(Some("ru")), 3);
    }

    #[test]
    fn matching_is_case_insensitive_and_trimmed() {
        assert_eq!(resolve_language_code(Some("EN")), 2);
        assert_eq!(resolve_language_code(Some("  Es\t")), 1);
        assert_eq!(resolve_language_code(Some("rU")), 3);
    }

    #[test]
    fn unknown_and_absent_resolve_to_zero() {
        assert_eq!(resolve_language_code(Some("fr")), LANGUAGE_UNKNOWN);
        assert_eq!(resolve_language_code(Some("")), LANGUAGE_UNKNOWN);
        assert_eq!(resolve_language_code(Some("   ")), LANGUAGE_UNKNOWN);
        assert_eq!(resolve_language_code(None), LANGUAGE_UNKNOWN);
    }

    #[test]
    fn normalization_lowercases_and_trims() {
        assert_eq!(normalize_language_code(Some(" ES ")), "es");
        assert_eq!(normalize_language_code(None), "");
    }
}
