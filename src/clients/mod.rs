//! HTTP transport types.
//!
//! The theme client never talks to the network directly; it hands an
//! [`HttpRequest`] to a [`Transport`] and interprets the [`HttpResponse`]
//! it gets back.
//!
//! # Overview
//!
//! - [`Transport`]: the injected round-trip capability
//! - [`HttpClient`]: the reqwest implementation of [`Transport`]
//! - [`HttpRequest`] / [`HttpMethod`]: what to send
//! - [`HttpResponse`]: the raw status, headers and body
//! - [`HttpError`]: failures where no response was received
//!
//! # Example
//!
//! ```rust,ignore
//! use themekit::clients::{HttpClient, HttpRequest, Transport};
//!
//! let client = HttpClient::new(&config)?;
//! let response = client.send(HttpRequest::get("/admin/themes.json")).await?;
//! assert!(response.is_ok());
//! ```
//!
//! # Retry Behavior
//!
//! None. Network failures and timeouts are returned to the caller as
//! [`HttpError::Network`] on the first attempt.

mod errors;
mod http_client;
mod http_request;
mod http_response;
#[cfg(test)]
pub(crate) mod mock;
mod transport;

pub use errors::{HttpError, InvalidHttpRequestError};
pub use http_client::{HttpClient, ACCESS_TOKEN_HEADER, SDK_VERSION};
pub use http_request::{HttpMethod, HttpRequest};
pub use http_response::HttpResponse;
pub use transport::Transport;
