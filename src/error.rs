//! Configuration error types.
//!
//! Every configuration constructor in this crate returns
//! `Result<T, ConfigError>`, so an invalid domain, proxy or ignore file is
//! reported before the client ever talks to the network.
//!
//! # Example
//!
//! ```rust
//! use themekit::{ConfigError, ProxyUrl};
//!
//! let result = ProxyUrl::new("://foo.com");
//! assert!(matches!(result, Err(ConfigError::InvalidProxyUrl { .. })));
//! ```

use thiserror::Error;

/// Errors that can occur while building a [`ThemeConfig`](crate::ThemeConfig)
/// or constructing a client from it.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The admin password (access token) cannot be empty.
    #[error("Password cannot be empty. Please provide the private app password for your store.")]
    EmptyPassword,

    /// Shop domain is invalid.
    #[error("Invalid shop domain '{domain}'. Expected format: 'shop-name' or 'shop-name.myshopify.com'.")]
    InvalidShopDomain {
        /// The invalid domain that was provided.
        domain: String,
    },

    /// API host URL is invalid.
    #[error("Invalid host URL '{url}'. Please provide a valid URL with scheme (e.g., 'https://example.com').")]
    InvalidHostUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// Proxy URL could not be parsed.
    #[error("invalid proxy URI '{url}': {reason}")]
    InvalidProxyUrl {
        /// The proxy URL that was provided.
        url: String,
        /// Why the URL was rejected.
        reason: String,
    },

    /// An ignore file could not be read.
    #[error("could not read ignore file '{path}': {reason}")]
    IgnoreFile {
        /// Path of the ignore file.
        path: String,
        /// The underlying I/O failure.
        reason: String,
    },

    /// An ignore pattern could not be compiled.
    #[error("invalid ignore pattern '{pattern}': {reason}")]
    InvalidIgnorePattern {
        /// The offending pattern.
        pattern: String,
        /// The compiler error.
        reason: String,
    },

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },
}
