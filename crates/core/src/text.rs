//! Accent- and case-insensitive text normalization.
//!
//! Shop queries are typed by people who skip accents ("cafe" for "Café"),
//! so every comparison in [`crate::search`] runs on normalized text.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::canonical_combining_class;

/// Normalize text for comparison.
///
/// Applies compatibility decomposition (NFKD), drops every combining mark,
/// lowercases and trims surrounding whitespace.
///
/// ```rust
/// # use bazar_core::text::normalize_text;
/// assert_eq!(normalize_text("  Electrónica "), "electronica");
/// ```
#[must_use]
pub fn normalize_text(text: &str) -> String {
    let stripped: String = text
        .nfkd()
        .filter(|c| canonical_combining_class(*c) == 0)
        .collect();
    stripped.to_lowercase().trim().to_owned()
}

/// Normalize an optional field, treating a missing value as empty.
#[must_use]
pub fn normalize_opt(text: Option<&str>) -> String {
    text.map(normalize_text).unwrap_or_default()
}
