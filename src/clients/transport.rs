//! The transport seam between the theme client and the network.

use async_trait::async_trait;

use crate::clients::errors::HttpError;
use crate::clients::http_request::HttpRequest;
use crate::clients::http_response::HttpResponse;

/// Performs one HTTP round trip against the Admin API.
///
/// Implementations must return every received response, whatever its status
/// code, and only fail when no response could be obtained. They must not
/// retry on their own.
///
/// [`HttpClient`](super::HttpClient) is the reqwest-backed implementation;
/// tests and embedding tools may provide their own.
///
/// # Example
///
/// ```rust
/// use async_trait::async_trait;
/// use themekit::clients::{HttpError, HttpRequest, HttpResponse, Transport};
///
/// #[derive(Debug)]
/// struct Offline;
///
/// #[async_trait]
/// impl Transport for Offline {
///     async fn send(&self, _request: HttpRequest) -> Result<HttpResponse, HttpError> {
///         Err(HttpError::adapter("offline"))
///     }
/// }
/// ```
#[async_trait]
pub trait Transport: std::fmt::Debug + Send + Sync {
    /// Sends the request and returns the raw response.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] when the request is invalid or the round trip
    /// could not complete.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, HttpError>;
}
