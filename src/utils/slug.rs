//! Slug normalization and validation.
//!
//! A slug forms the public share path `<base>/<slug>`. Slugs are
//! case-insensitive and stored lowercase.

use crate::error::AppError;
use serde_json::json;

const MAX_SLUG_LEN: usize = 64;

/// Slugs that would shadow service routes.
const RESERVED_SLUGS: &[&str] = &["api", "health", "static", "admin", "dashboard", "login", "signup"];

/// Lowercases and trims a user-provided slug.
pub fn normalize_slug(input: &str) -> String {
    input.trim().to_ascii_lowercase()
}

/// Validates a normalized slug.
///
/// # Rules
///
/// - Length: 1-64 characters
/// - Allowed characters: lowercase letters, digits, hyphens
/// - Cannot be a reserved route word
///
/// # Errors
///
/// Returns [`AppError::Validation`] for the first violated rule.
///
/// # Examples
///
/// ```ignore
/// assert!(validate_slug("corner-cafe").is_ok());
/// assert!(validate_slug("").is_err());
/// assert!(validate_slug("corner cafe").is_err());
/// assert!(validate_slug("api").is_err());
/// ```
pub fn validate_slug(slug: &str) -> Result<(), AppError> {
    if slug.is_empty() {
        return Err(AppError::bad_request("Slug is required", json!({})));
    }

    if slug.len() > MAX_SLUG_LEN {
        return Err(AppError::bad_request(
            "Slug must be at most 64 characters",
            json!({ "provided_length": slug.len() }),
        ));
    }

    if !slug
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(AppError::bad_request(
            "Slug can only contain lowercase letters, digits, and hyphens",
            json!({ "slug": slug }),
        ));
    }

    if RESERVED_SLUGS.contains(&slug) {
        return Err(AppError::bad_request(
            "This slug is reserved",
            json!({ "slug": slug }),
        ));
    }

    Ok(())
}

/// Normalizes then validates a slug, returning the stored form.
///
/// # Errors
///
/// See [`validate_slug`].
pub fn parse_slug(input: &str) -> Result<String, AppError> {
    let slug = normalize_slug(input);
    validate_slug(&slug)?;
    Ok(slug)
}
