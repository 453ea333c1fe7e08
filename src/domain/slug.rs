//! Utilities for generating deterministic, URL-fragment-safe slugs.
//!
//! Slugification delegates to the `slug` crate: input is transliterated to
//! ASCII, lowercased, and every run of non-alphanumeric characters becomes a
//! single hyphen with no leading or trailing hyphen. The function is pure, so
//! two headings with the same text always receive the same slug; no attempt is
//! made to disambiguate collisions within a document.

use slug::slugify;
use thiserror::Error;

/// Errors that can occur while generating a slug.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SlugError {
    #[error("slug source text is empty")]
    EmptyInput,
    #[error("failed to derive slug from `{input}`")]
    Unrepresentable { input: String },
}

/// Derive a slug from the provided human-readable text.
pub fn derive_slug(input: &str) -> Result<String, SlugError> {
    if input.trim().is_empty() {
        return Err(SlugError::EmptyInput);
    }

    let candidate = slugify(input);

    if candidate.is_empty() {
        return Err(SlugError::Unrepresentable {
            input: input.to_string(),
        });
    }

    Ok(candidate)
}

/// Slug for an in-page anchor, falling back to `fallback` when the text
/// yields nothing usable.
pub fn anchor_slug(text: &str, fallback: &str) -> String {
    derive_slug(text).unwrap_or_else(|_| fallback.to_string())
}
