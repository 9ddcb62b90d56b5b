//! Field validation predicates
//!
//! Pure string checks, independent of any DOM state.

use regex::Regex;
use std::sync::LazyLock;

// =============================================================================
// PATTERNS
// =============================================================================

/// `local@domain.tld` with no whitespace or extra `@` in any part
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

/// Brazilian landline or mobile: `(DD) DDDD-DDDD` / `(DD) DDDDD-DDDD`
///
/// Other digit counts and international prefixes are rejected.
static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\(\d{2}\) \d{4,5}-\d{4}$").unwrap());

// =============================================================================
// PREDICATES
// =============================================================================

/// True when the value is empty after trimming
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

pub fn is_valid_phone(value: &str) -> bool {
    // \d in the regex crate is Unicode-aware; restrict to ASCII digits
    value.is_ascii() && PHONE_RE.is_match(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank() {
        assert!(is_blank(""));
        assert!(is_blank("  \t\n"));
        assert!(!is_blank(" x "));
    }

    #[test]
    fn test_email_shapes() {
        assert!(is_valid_email("a@b.co"));
        assert!(is_valid_email("contato@inspec.com.br"));
        assert!(!is_valid_email("abc"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a b@c.d"));
        assert!(!is_valid_email("a@@b.c"));
        assert!(!is_valid_email("@b.c"));
    }

    #[test]
    fn test_phone_shapes() {
        assert!(is_valid_phone("(11) 99999-9999"));
        assert!(is_valid_phone("(11) 3333-4444"));
        assert!(!is_valid_phone("11999999999"));
        assert!(!is_valid_phone("(11)99999-9999"));
        assert!(!is_valid_phone("(11) 999-9999"));
        assert!(!is_valid_phone("+55 (11) 99999-9999"));
        assert!(!is_valid_phone("(١١) 99999-9999"));
    }
}
