//! Transport-level error types.
//!
//! These errors mean the request never produced a response to interpret:
//! the request was malformed, the reqwest client could not be built, or the
//! connection failed. They are surfaced to callers unchanged and are never
//! retried.
//!
//! # Example
//!
//! ```rust,ignore
//! use themekit::clients::HttpError;
//!
//! match transport.send(request).await {
//!     Ok(response) => println!("status {}", response.code),
//!     Err(HttpError::Network(e)) => println!("network error: {e}"),
//!     Err(e) => println!("transport error: {e}"),
//! }
//! ```

use thiserror::Error;

/// Error returned when an HTTP request fails validation before being sent.
///
/// # Example
///
/// ```rust
/// use themekit::clients::InvalidHttpRequestError;
///
/// let error = InvalidHttpRequestError::MissingBody {
///     method: "put".to_string(),
/// };
/// assert_eq!(error.to_string(), "Cannot use put without specifying data.");
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// A POST or PUT request was made without a body.
    #[error("Cannot use {method} without specifying data.")]
    MissingBody {
        /// The HTTP method that requires a body.
        method: String,
    },

    /// The request path must be absolute.
    #[error("Request path '{path}' must start with '/'.")]
    RelativePath {
        /// The offending path.
        path: String,
    },
}

/// Unified error type for transport failures.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Request validation failed.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),

    /// Network or connection error, including timeouts.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The underlying reqwest client could not be created.
    #[error("Failed to create HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// Failure reported by a custom [`Transport`](super::Transport) implementation.
    #[error(transparent)]
    Adapter(Box<dyn std::error::Error + Send + Sync>),
}

impl HttpError {
    /// Wraps an arbitrary error raised by a custom transport.
    pub fn adapter(error: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Adapter(error.into())
    }
}
