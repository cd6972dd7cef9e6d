//! Validated newtype wrappers for configuration values.
//!
//! Each wrapper validates its contents on construction, so a
//! [`ThemeConfig`](super::ThemeConfig) can only hold values the transport
//! is able to use.

use crate::error::ConfigError;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// The private app password used as the Admin API access token.
///
/// The `Debug` implementation masks the value so the token never ends up
/// in logs.
///
/// # Example
///
/// ```rust
/// use themekit::AccessToken;
///
/// let token = AccessToken::new("shppa_secret").unwrap();
/// assert_eq!(format!("{:?}", token), "AccessToken(*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Creates a new access token.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyPassword`] if the token is empty.
    pub fn new(token: impl Into<String>) -> Result<Self, ConfigError> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(ConfigError::EmptyPassword);
        }
        Ok(Self(token))
    }
}

impl AsRef<str> for AccessToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(*****)")
    }
}

/// A validated Shopify shop domain, normalized to `shop.myshopify.com`.
///
/// # Example
///
/// ```rust
/// use themekit::ShopDomain;
///
/// let domain = ShopDomain::new("my-store").unwrap();
/// assert_eq!(domain.as_ref(), "my-store.myshopify.com");
/// assert_eq!(domain.shop_name(), "my-store");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShopDomain {
    full_domain: String,
    shop_name_end: usize,
}

impl ShopDomain {
    const SUFFIX: &'static str = ".myshopify.com";

    /// Creates a new validated shop domain.
    ///
    /// Accepts `shop-name` or `shop-name.myshopify.com`, with or without a
    /// leading `https://` and trailing `/`, as found in hand-written config
    /// files.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidShopDomain`] if the domain is invalid.
    pub fn new(domain: impl Into<String>) -> Result<Self, ConfigError> {
        let domain = domain.into();
        let trimmed = domain.trim().to_lowercase();
        let trimmed = trimmed
            .strip_prefix("https://")
            .or_else(|| trimmed.strip_prefix("http://"))
            .unwrap_or(&trimmed)
            .trim_end_matches('/')
            .to_string();

        let (shop_name, full_domain) = if let Some(name) = trimmed.strip_suffix(Self::SUFFIX) {
            (name.to_string(), trimmed.clone())
        } else if trimmed.contains('.') {
            return Err(ConfigError::InvalidShopDomain { domain });
        } else {
            (trimmed.clone(), format!("{trimmed}{}", Self::SUFFIX))
        };

        if !Self::is_valid_shop_name(&shop_name) {
            return Err(ConfigError::InvalidShopDomain { domain });
        }

        Ok(Self {
            shop_name_end: shop_name.len(),
            full_domain,
        })
    }

    /// Returns the shop name portion of the domain.
    #[must_use]
    pub fn shop_name(&self) -> &str {
        &self.full_domain[..self.shop_name_end]
    }

    fn is_valid_shop_name(name: &str) -> bool {
        if name.is_empty() || name.starts_with('-') || name.ends_with('-') {
            return false;
        }
        name.chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    }
}

impl AsRef<str> for ShopDomain {
    fn as_ref(&self) -> &str {
        &self.full_domain
    }
}

impl fmt::Display for ShopDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_domain)
    }
}

impl Serialize for ShopDomain {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.full_domain)
    }
}

impl<'de> Deserialize<'de> for ShopDomain {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(de::Error::custom)
    }
}

/// A validated base URL that overrides `https://{shop domain}`.
///
/// Useful when the Admin API is reached through a gateway, and in tests
/// that point the client at a local mock server.
///
/// # Example
///
/// ```rust
/// use themekit::HostUrl;
///
/// let url = HostUrl::new("http://127.0.0.1:8080/").unwrap();
/// assert_eq!(url.scheme(), "http");
/// assert_eq!(url.host_name(), "127.0.0.1");
/// assert_eq!(url.as_ref(), "http://127.0.0.1:8080");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HostUrl {
    url: url::Url,
    base: String,
}

impl HostUrl {
    /// Creates a new validated host URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidHostUrl`] if the URL has no scheme or
    /// host, or uses a scheme other than `http`/`https`.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let raw = url.into();
        let invalid = || ConfigError::InvalidHostUrl { url: raw.clone() };

        let parsed = url::Url::parse(raw.trim()).map_err(|_| invalid())?;
        if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
            return Err(invalid());
        }

        let base = parsed.as_str().trim_end_matches('/').to_string();
        Ok(Self { url: parsed, base })
    }

    /// Returns the URL scheme (e.g., "https").
    #[must_use]
    pub fn scheme(&self) -> &str {
        self.url.scheme()
    }

    /// Returns the host name portion of the URL.
    #[must_use]
    pub fn host_name(&self) -> &str {
        self.url.host_str().unwrap_or_default()
    }
}

impl AsRef<str> for HostUrl {
    fn as_ref(&self) -> &str {
        &self.base
    }
}

/// A validated proxy URL for outbound requests.
///
/// # Example
///
/// ```rust
/// use themekit::ProxyUrl;
///
/// assert!(ProxyUrl::new("http://localhost:3128").is_ok());
/// assert!(ProxyUrl::new("://foo.com").is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProxyUrl(url::Url);

impl ProxyUrl {
    const SCHEMES: &'static [&'static str] = &["http", "https", "socks5", "socks5h"];

    /// Creates a new validated proxy URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidProxyUrl`] if the URL cannot be parsed,
    /// has no host, or uses an unsupported scheme.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let raw = url.into();
        let invalid = |reason: String| ConfigError::InvalidProxyUrl {
            url: raw.clone(),
            reason,
        };

        let parsed = url::Url::parse(raw.trim()).map_err(|e| invalid(e.to_string()))?;
        if !Self::SCHEMES.contains(&parsed.scheme()) {
            return Err(invalid(format!("unsupported scheme '{}'", parsed.scheme())));
        }
        if parsed.host_str().map_or(true, str::is_empty) {
            return Err(invalid("missing host".to_string()));
        }

        Ok(Self(parsed))
    }
}

impl AsRef<str> for ProxyUrl {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}
