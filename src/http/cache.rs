//! HTTP cache control module
//!
//! Provides `ETag` generation, conditional request matching and the
//! `Cache-Control` value for the icon.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Generate a strong `ETag` from the body
///
/// The tag carries the body length alongside the hash, so two bodies only
/// share a tag when both agree.
///
/// # Returns
/// Quoted `ETag` string, e.g., `"14-9f2c1e0b7d5a3c41"`
pub fn generate_etag(content: &[u8]) -> String {
    let mut hasher = DefaultHasher::new();
    content.hash(&mut hasher);
    let v = hasher.finish();
    format!("\"{:x}-{v:x}\"", content.len())
}

/// Check if client's `If-None-Match` header matches the server's `ETag`
///
/// Supports:
/// - Single `ETag`: `"abc123"`
/// - Weak form of the same tag: `W/"abc123"`
/// - Multiple `ETags`: `"abc123", "def456"`
/// - Wildcard: `*`
///
/// # Returns
/// Returns true if matched (should return 304), false otherwise
pub fn check_etag_match(if_none_match: Option<&str>, etag: &str) -> bool {
    if_none_match.is_some_and(|client_etag| {
        client_etag.split(',').map(str::trim).any(|e| {
            e == "*" || e == etag || e.strip_prefix("W/").is_some_and(|weak| weak == etag)
        })
    })
}

/// Check a request `Cache-Control` value for the `no-cache` directive
///
/// A request carrying it must not be answered with 304.
pub fn has_no_cache(cache_control: &str) -> bool {
    cache_control
        .split(',')
        .any(|directive| directive.trim().eq_ignore_ascii_case("no-cache"))
}

/// Build the `Cache-Control` value for a public resource
pub fn public_max_age(max_age: u64) -> String {
    format!("public, max-age={max_age}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_no_cache() {
        assert!(has_no_cache("no-cache"));
        assert!(has_no_cache("max-age=0, NO-CACHE"));
        assert!(!has_no_cache("max-age=0"));
        assert!(!has_no_cache("no-store"));
        assert!(!has_no_cache(""));
    }

    #[test]
    fn test_generate_etag() {
        let etag = generate_etag(b"hello world");
        assert!(etag.starts_with('"'));
        assert!(etag.ends_with('"'));
        assert!(etag.len() > 2);
        assert_eq!(etag.matches('"').count(), 2);
    }

    #[test]
    fn test_etag_consistency() {
        let etag1 = generate_etag(b"same content");
        let etag2 = generate_etag(b"same content");
        assert_eq!(etag1, etag2);
    }

    #[test]
    fn test_etag_difference() {
        let etag1 = generate_etag(b"content a");
        let etag2 = generate_etag(b"content b");
        assert_ne!(etag1, etag2);
    }

    #[test]
    fn test_check_etag_match() {
        let etag = "\"abc123\"";
        assert!(check_etag_match(Some("\"abc123\""), etag));
        assert!(check_etag_match(Some("\"xyz\", \"abc123\""), etag));
        assert!(check_etag_match(Some("\"xyz\",\"abc123\"  "), etag));
        assert!(check_etag_match(Some("*"), etag));
        assert!(!check_etag_match(Some("\"different\""), etag));
        assert!(!check_etag_match(Some(""), etag));
        assert!(!check_etag_match(None, etag));
    }

    #[test]
    fn test_check_weak_etag_match() {
        let etag = "\"abc123\"";
        assert!(check_etag_match(Some("W/\"abc123\""), etag));
        assert!(check_etag_match(Some("\"xyz\", W/\"abc123\""), etag));
        assert!(!check_etag_match(Some("W/\"xyz\""), etag));
        assert!(!check_etag_match(Some("w/\"abc123\""), etag));
    }

    #[test]
    fn test_public_max_age() {
        assert_eq!(public_max_age(0), "public, max-age=0");
        assert_eq!(public_max_age(31_536_000), "public, max-age=31536000");
    }
}
