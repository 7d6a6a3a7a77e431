//! Error types for the catalog API client.
//!
//! # Design
//! Two kinds of failure are kept apart. `ValidationError` is raised while
//! checking caller input, before any request exists, so it always means "no
//! network call happened". `ApiError` covers everything that can go wrong
//! once a round trip has been attempted: non-2xx statuses, transport failures
//! and undecodable bodies all collapse into it with a single diagnostic.

use thiserror::Error;

use crate::http::HttpMethod;

/// Top-level error returned by `CatalogClient` operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Input rejected before a request was built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required text field was empty after trimming.
    #[error("{field} must not be empty")]
    Empty { field: &'static str },

    /// An integer parameter fell outside its accepted range.
    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },

    /// A destructive action was requested without explicit confirmation.
    #[error("refusing to {action} without explicit confirmation")]
    ConfirmationRequired { action: String },
}

/// A round trip against the API did not complete successfully.
///
/// `diagnostic` holds the response body when the server sent one, otherwise
/// a rendering of the underlying failure. It is never empty.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{method} {url} failed: {diagnostic}")]
pub struct ApiError {
    pub method: HttpMethod,
    pub url: String,
    pub status: Option<u16>,
    pub diagnostic: String,
}

impl ApiError {
    pub(crate) fn new(
        method: HttpMethod,
        url: impl Into<String>,
        status: Option<u16>,
        diagnostic: impl Into<String>,
    ) -> Self {
        let mut diagnostic = diagnostic.into();
        if diagnostic.trim().is_empty() {
            diagnostic = match status {
                Some(status) => format!("HTTP {status}"),
                None => "request failed".to_string(),
            };
        }
        Self {
            method,
            url: url.into(),
            status,
            diagnostic,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_display_includes_method_url_and_diagnostic() {
        let err = ApiError::new(
            HttpMethod::Post,
            "http://x/api/products/",
            Some(409),
            r#"{"error":"sku exists"}"#,
        );
        assert_eq!(
            err.to_string(),
            r#"POST http://x/api/products/ failed: {"error":"sku exists"}"#
        );
    }

    #[test]
    fn blank_diagnostic_falls_back_to_status() {
        let err = ApiError::new(HttpMethod::Get, "http://x", Some(502), "  ");
        assert_eq!(err.diagnostic, "HTTP 502");
    }

    #[test]
    fn blank_diagnostic_without_status_is_still_non_empty() {
        let err = ApiError::new(HttpMethod::Get, "http://x", None, "");
        assert!(!err.diagnostic.is_empty());
    }

    #[test]
    fn validation_errors_convert_into_top_level_error() {
        let err: Error = ValidationError::Empty { field: "sku" }.into();
        assert!(matches!(err, Error::Validation(ValidationError::Empty { field: "sku" })));
        assert_eq!(err.to_string(), "sku must not be empty");
    }
}
