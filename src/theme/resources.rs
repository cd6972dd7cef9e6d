//! Resource models exchanged with the theme API.
//!
//! - [`Shop`]: the store metadata returned by `/meta.json`
//! - [`Theme`]: a theme and its readiness flag
//! - [`ThemeRole`]: where a theme sits in the store
//! - [`Asset`]: a file inside a theme, identified by its `key`

use base64::prelude::*;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Store metadata.
///
/// Fetched fresh on every [`get_shop`](super::ThemeClient::get_shop) call.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Shop {
    /// The unique identifier of the shop.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,

    /// The name of the shop.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// The contact email address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// The primary domain (may be a custom domain).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,

    /// The `*.myshopify.com` domain.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub myshopify_domain: Option<String>,
}

/// The role of a theme in the store.
///
/// ```rust
/// use themekit::ThemeRole;
///
/// let role: ThemeRole = serde_json::from_str("\"main\"").unwrap();
/// assert_eq!(role, ThemeRole::Main);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ThemeRole {
    /// The published theme visible to customers.
    Main,
    /// An unpublished theme.
    #[default]
    Unpublished,
    /// A demo theme from the theme store.
    Demo,
    /// A development theme.
    Development,
    /// A role this client does not know about.
    #[serde(other)]
    Other,
}

/// A theme in the store.
///
/// `id` is absent until the theme has been created. `source` is only sent
/// when creating a theme and is never read back.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Theme {
    /// The unique identifier of the theme.
    #[serde(default, skip_serializing)]
    pub id: Option<u64>,

    /// The name of the theme.
    #[serde(default)]
    pub name: String,

    /// URL of the zip archive the theme is created from.
    #[serde(rename = "src", skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    /// The role of the theme.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<ThemeRole>,

    /// Whether initial processing has finished and the theme can be previewed.
    #[serde(default, skip_serializing)]
    pub previewable: bool,

    /// Whether the theme is still being processed.
    #[serde(default, skip_serializing)]
    pub processing: Option<bool>,

    /// When the theme was created.
    #[serde(default, skip_serializing)]
    pub created_at: Option<DateTime<Utc>>,

    /// When the theme was last updated.
    #[serde(default, skip_serializing)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Theme {
    /// Builds the payload for creating a theme from a zip archive.
    #[must_use]
    pub fn from_source(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: Some(source.into()),
            ..Default::default()
        }
    }
}

/// A file within a theme.
///
/// The key is the asset's path (`templates/index.liquid`,
/// `assets/logo.png`). Text content travels in `value`, binary content
/// base64-encoded in `attachment`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Asset {
    /// The path of the asset within the theme.
    #[serde(default)]
    pub key: String,

    /// Text content.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,

    /// Base64-encoded binary content.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment: Option<String>,

    /// The public CDN URL.
    #[serde(default, skip_serializing)]
    pub public_url: Option<String>,

    /// The MIME type.
    #[serde(default, skip_serializing)]
    pub content_type: Option<String>,

    /// Size in bytes.
    #[serde(default, skip_serializing)]
    pub size: Option<u64>,

    /// MD5 checksum of the content.
    #[serde(default, skip_serializing)]
    pub checksum: Option<String>,

    /// The theme the asset was read from.
    #[serde(default, skip_serializing)]
    pub theme_id: Option<u64>,

    /// When the asset was created.
    #[serde(default, skip_serializing)]
    pub created_at: Option<DateTime<Utc>>,

    /// When the asset was last updated.
    #[serde(default, skip_serializing)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Asset {
    /// Creates an asset reference with only a key, as used for deletes.
    #[must_use]
    pub fn with_key(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Default::default()
        }
    }

    /// Creates a text asset.
    #[must_use]
    pub fn text(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: Some(value.into()),
            ..Default::default()
        }
    }

    /// Creates a binary asset, base64-encoding the bytes.
    ///
    /// ```rust
    /// use themekit::Asset;
    ///
    /// let asset = Asset::from_bytes("assets/logo.png", &[0x89, 0x50, 0x4E, 0x47]);
    /// assert_eq!(asset.attachment.as_deref(), Some("iVBORw=="));
    /// assert!(asset.value.is_none());
    /// ```
    #[must_use]
    pub fn from_bytes(key: impl Into<String>, bytes: &[u8]) -> Self {
        Self {
            key: key.into(),
            attachment: Some(BASE64_STANDARD.encode(bytes)),
            ..Default::default()
        }
    }

    /// Returns the asset content, decoding `attachment` when present.
    ///
    /// Returns `Ok(None)` for assets fetched without content, such as the
    /// entries of an asset listing.
    ///
    /// # Errors
    ///
    /// Returns [`base64::DecodeError`] if `attachment` is not valid base64.
    pub fn content(&self) -> Result<Option<Vec<u8>>, base64::DecodeError> {
        if let Some(attachment) = &self.attachment {
            return BASE64_STANDARD.decode(attachment).map(Some);
        }
        Ok(self.value.as_ref().map(|value| value.as_bytes().to_vec()))
    }

    /// Returns whether the content is carried as a binary attachment.
    #[must_use]
    pub const fn is_binary(&self) -> bool {
        self.attachment.is_some()
    }
}
