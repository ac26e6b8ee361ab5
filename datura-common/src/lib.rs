//! Common types shared across the Datura SDK crates.
//!
//! This crate defines the error taxonomy surfaced to SDK callers and the
//! [`observability`] module for explicit tracing initialisation. It is
//! intentionally lightweight so every crate can depend on it without pulling
//! in the HTTP stack.
//!
//! # Overview
//!
//! - [`DaturaError`] and [`Result`]: shared error handling
//! - [`observability`]: centralised tracing/logging initialisation
//!
//! # Examples
//!
//! ```rust
//! use datura_common::DaturaError;
//!
//! let err = DaturaError::Config("API key must not be empty".into());
//! assert!(err.to_string().contains("Configuration error"));
//! ```

pub mod observability;

/// Error types used across the Datura SDK.
///
/// Every failure a caller can observe is one of these five kinds, with
/// enough context attached to decide whether to retry, surface the error,
/// or abort. Nothing is retried internally.
#[derive(thiserror::Error, Debug)]
pub enum DaturaError {
    /// Client construction input was invalid (e.g. empty API key).
    #[error("Configuration error: {0}")]
    Config(String),

    /// Transport-level failure before any response was received
    /// (DNS, connection reset, timeout).
    #[error("Network error: {0}")]
    Network(String),

    /// The server answered with a non-success status code. `body` is the
    /// verbatim response text.
    #[error("HTTP error [{status}]: {body}")]
    Http { status: u16, body: String },

    /// The response body could not be parsed as JSON.
    #[error("Decode error: {0}")]
    Decode(String),

    /// Decoded JSON did not match the expected structure, or a value fell
    /// outside a closed enum set.
    #[error("Schema error: {0}")]
    Schema(String),
}

/// Convenient alias for results that use [`DaturaError`].
pub type Result<T> = std::result::Result<T, DaturaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_error_preserves_status_and_body() {
        let err = DaturaError::Http {
            status: 401,
            body: r#"{"detail":"unauthorized"}"#.to_string(),
        };
        let rendered = err.to_string();
        assert!(rendered.contains("401"));
        assert!(rendered.contains(r#"{"detail":"unauthorized"}"#));
    }
}
