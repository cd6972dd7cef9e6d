//! Configuration for the theme client.
//!
//! The main types in this module are:
//!
//! - [`ThemeConfig`]: the immutable settings a [`ThemeClient`](crate::ThemeClient) is built from
//! - [`ThemeConfigBuilder`]: a builder for [`ThemeConfig`]
//! - [`ShopDomain`], [`AccessToken`], [`HostUrl`], [`ProxyUrl`]: validated newtypes
//!
//! Loading these values from a config file or the environment is the job of
//! the calling tool; this crate only validates them.
//!
//! # Example
//!
//! ```rust
//! use themekit::{AccessToken, ShopDomain, ThemeConfig};
//!
//! let config = ThemeConfig::builder()
//!     .domain(ShopDomain::new("my-store").unwrap())
//!     .password(AccessToken::new("shppa_123").unwrap())
//!     .theme_id("123456")
//!     .ignored_files(["*.png", "config/settings_data.json"])
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.theme_id(), "123456");
//! ```

mod newtypes;

pub use newtypes::{AccessToken, HostUrl, ProxyUrl, ShopDomain};

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::ConfigError;

/// Default timeout applied to each request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Settings for a [`ThemeClient`](crate::ThemeClient).
///
/// `ThemeConfig` is `Clone`, `Send` and `Sync`. It is read once when a
/// client is constructed and never mutated afterwards.
#[derive(Clone, Debug)]
pub struct ThemeConfig {
    domain: ShopDomain,
    password: AccessToken,
    theme_id: String,
    api_host: Option<HostUrl>,
    proxy: Option<ProxyUrl>,
    ignored_files: Vec<String>,
    ignores: Vec<PathBuf>,
    timeout: Duration,
}

impl ThemeConfig {
    /// Creates a new builder for constructing a `ThemeConfig`.
    #[must_use]
    pub fn builder() -> ThemeConfigBuilder {
        ThemeConfigBuilder::new()
    }

    /// Returns the shop domain.
    #[must_use]
    pub const fn domain(&self) -> &ShopDomain {
        &self.domain
    }

    /// Returns the Admin API password.
    #[must_use]
    pub const fn password(&self) -> &AccessToken {
        &self.password
    }

    /// Returns the bound theme id, or an empty string in themeless mode.
    #[must_use]
    pub fn theme_id(&self) -> &str {
        &self.theme_id
    }

    /// Returns the base URL override, if configured.
    #[must_use]
    pub const fn api_host(&self) -> Option<&HostUrl> {
        self.api_host.as_ref()
    }

    /// Returns the proxy URL, if configured.
    #[must_use]
    pub const fn proxy(&self) -> Option<&ProxyUrl> {
        self.proxy.as_ref()
    }

    /// Returns the inline ignore patterns.
    #[must_use]
    pub fn ignored_files(&self) -> &[String] {
        &self.ignored_files
    }

    /// Returns the paths of ignore files to load patterns from.
    #[must_use]
    pub fn ignores(&self) -> &[PathBuf] {
        &self.ignores
    }

    /// Returns the per-request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }
}

const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ThemeConfig>();
};

/// Builder for [`ThemeConfig`].
///
/// `domain` and `password` are required.
///
/// # Defaults
///
/// - `theme_id`: empty (themeless mode)
/// - `api_host`, `proxy`: `None`
/// - `ignored_files`, `ignores`: empty
/// - `timeout`: [`DEFAULT_TIMEOUT`]
#[derive(Debug, Default)]
pub struct ThemeConfigBuilder {
    domain: Option<ShopDomain>,
    password: Option<AccessToken>,
    theme_id: Option<String>,
    api_host: Option<HostUrl>,
    proxy: Option<ProxyUrl>,
    ignored_files: Vec<String>,
    ignores: Vec<PathBuf>,
    timeout: Option<Duration>,
}

impl ThemeConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the shop domain (required).
    #[must_use]
    pub fn domain(mut self, domain: ShopDomain) -> Self {
        self.domain = Some(domain);
        self
    }

    /// Sets the Admin API password (required).
    #[must_use]
    pub fn password(mut self, password: AccessToken) -> Self {
        self.password = Some(password);
        self
    }

    /// Binds the client to a theme.
    #[must_use]
    pub fn theme_id(mut self, theme_id: impl Into<String>) -> Self {
        self.theme_id = Some(theme_id.into());
        self
    }

    /// Overrides the base URL used instead of `https://{domain}`.
    #[must_use]
    pub fn api_host(mut self, host: HostUrl) -> Self {
        self.api_host = Some(host);
        self
    }

    /// Routes all requests through a proxy.
    #[must_use]
    pub fn proxy(mut self, proxy: ProxyUrl) -> Self {
        self.proxy = Some(proxy);
        self
    }

    /// Adds inline ignore patterns.
    #[must_use]
    pub fn ignored_files<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignored_files.extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Adds a file to load ignore patterns from.
    #[must_use]
    pub fn ignore_file(mut self, path: impl AsRef<Path>) -> Self {
        self.ignores.push(path.as_ref().to_path_buf());
        self
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the [`ThemeConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `domain` or
    /// `password` are not set.
    pub fn build(self) -> Result<ThemeConfig, ConfigError> {
        let domain = self
            .domain
            .ok_or(ConfigError::MissingRequiredField { field: "domain" })?;
        let password = self
            .password
            .ok_or(ConfigError::MissingRequiredField { field: "password" })?;

        Ok(ThemeConfig {
            domain,
            password,
            theme_id: self.theme_id.unwrap_or_default().trim().to_string(),
            api_host: self.api_host,
            proxy: self.proxy,
            ignored_files: self.ignored_files,
            ignores: self.ignores,
            timeout: self.timeout.unwrap_or(DEFAULT_TIMEOUT),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_builder() -> ThemeConfigBuilder {
        ThemeConfig::builder()
            .domain(ShopDomain::new("test-shop").unwrap())
            .password(AccessToken::new("secret").unwrap())
    }

    #[test]
    fn test_builder_requires_domain() {
        let result = ThemeConfigBuilder::new()
            .password(AccessToken::new("secret").unwrap())
            .build();

        assert!(matches!(
            result,
            Err(ConfigError::MissingRequiredField { field: "domain" })
        ));
    }

    #[test]
    fn test_builder_requires_password() {
        let result = ThemeConfigBuilder::new()
            .domain(ShopDomain::new("test-shop").unwrap())
            .build();

        assert!(matches!(
            result,
            Err(ConfigError::MissingRequiredField { field: "password" })
        ));
    }

    #[test]
    fn test_builder_provides_sensible_defaults() {
        let config = base_builder().build().unwrap();

        assert_eq!(config.theme_id(), "");
        assert!(config.api_host().is_none());
        assert!(config.proxy().is_none());
        assert!(config.ignored_files().is_empty());
        assert!(config.ignores().is_empty());
        assert_eq!(config.timeout(), DEFAULT_TIMEOUT);
    }

    #[test]
    fn test_builder_with_all_optional_fields() {
        let config = base_builder()
            .theme_id(" 123 ")
            .api_host(HostUrl::new("http://localhost:9292").unwrap())
            .proxy(ProxyUrl::new("http://localhost:3128").unwrap())
            .ignored_files(["*.png"])
            .ignored_files(vec!["config/settings_data.json".to_string()])
            .ignore_file(".themekitignore")
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap();

        assert_eq!(config.theme_id(), "123");
        assert_eq!(config.api_host().unwrap().as_ref(), "http://localhost:9292");
        assert!(config.proxy().is_some());
        assert_eq!(
            config.ignored_files(),
            &["*.png".to_string(), "config/settings_data.json".to_string()]
        );
        assert_eq!(config.ignores(), &[PathBuf::from(".themekitignore")]);
        assert_eq!(config.timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_config_debug_does_not_leak_password() {
        let config = base_builder().build().unwrap();
        let debug_str = format!("{:?}", config);
        assert!(debug_str.contains("ThemeConfig"));
        assert!(!debug_str.contains("secret"));
    }
}
