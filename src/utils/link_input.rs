//! Validation of link title and target URL before persistence.

use crate::error::AppError;
use serde_json::json;
use url::Url;

/// Errors that can occur while checking a link target.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum UrlValidationError {
    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,

    #[error("URL must include a host")]
    MissingHost,
}

/// Checks that `input` is an absolute http/https URL with a host.
///
/// # Errors
///
/// Returns the first failed check as a [`UrlValidationError`].
pub fn check_target_url(input: &str) -> Result<Url, UrlValidationError> {
    let url = Url::parse(input).map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(UrlValidationError::UnsupportedProtocol),
    }

    match url.host_str() {
        Some(host) if !host.is_empty() => Ok(url),
        _ => Err(UrlValidationError::MissingHost),
    }
}

/// Validates the input of an append, reporting the first violated constraint.
///
/// Order: title present, URL present, URL well-formed.
///
/// # Errors
///
/// Returns [`AppError::Validation`].
pub fn validate_link_input(title: &str, url: &str) -> Result<(), AppError> {
    if title.trim().is_empty() {
        return Err(AppError::bad_request(
            "Title is required",
            json!({ "field": "title" }),
        ));
    }

    if url.trim().is_empty() {
        return Err(AppError::bad_request(
            "URL is required",
            json!({ "field": "url" }),
        ));
    }

    check_target_url(url.trim()).map_err(|e| {
        AppError::bad_request(
            "Invalid URL. Must be a valid http/https link.",
            json!({ "field": "url", "reason": e.to_string() }),
        )
    })?;

    Ok(())
}
