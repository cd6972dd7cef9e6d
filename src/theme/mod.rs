//! Theme API client.
//!
//! [`ThemeClient`] is the single entry point for shop, theme and asset
//! operations. Each operation builds one request, sends it through the
//! injected [`Transport`], and resolves the response envelope into a
//! payload or a [`ThemeError`].
//!
//! # Overview
//!
//! - [`ThemeClient`]: the façade
//! - [`envelope`]: response decoding and error precedence
//! - [`AssetFilter`] / [`IgnoreRules`]: ignore patterns and Liquid shadowing
//! - [`retry`]: recovery from generated-asset conflicts on upload
//! - [`ReadinessPoller`]: waiting for a new theme to become previewable
//! - [`NewThemeDetails`]: default name and archive for new themes
//!
//! # Example
//!
//! ```rust,ignore
//! use themekit::{Asset, ThemeClient};
//!
//! let client = ThemeClient::new(&config)?;
//!
//! for key in client.get_all_assets().await? {
//!     let asset = client.get_asset(&key).await?;
//!     println!("{key}: {} bytes", asset.size.unwrap_or_default());
//! }
//!
//! client
//!     .update_asset(&Asset::text("snippets/hello.liquid", "Hello"))
//!     .await?;
//! ```

pub mod envelope;
mod errors;
mod filter;
mod new_theme;
mod poll;
mod resources;
pub mod retry;

pub use errors::{to_sentence, ErrorSet, ThemeError};
pub use filter::{read_ignore_file, AssetFilter, IgnoreRules};
pub use new_theme::{NewThemeDetails, DEFAULT_THEME_BASE};
pub use poll::{ReadinessPoller, READINESS_POLL_INTERVAL};
pub use resources::{Asset, Shop, Theme, ThemeRole};

use std::sync::Arc;

use serde_json::json;

use crate::clients::{HttpClient, HttpRequest, HttpResponse, Transport};
use crate::config::ThemeConfig;
use envelope::{resolve, AssetPayload, AssetsPayload, ThemePayload, ThemesPayload};

/// Client for the theme API of one shop.
///
/// The client is bound to a theme id at construction. With an empty id it
/// works in themeless mode, addressing the shop's published theme through
/// `/admin/assets.json`.
///
/// Cloning is cheap: the transport and filter are shared.
///
/// # Thread Safety
///
/// `ThemeClient` is `Send + Sync`.
#[derive(Clone, Debug)]
pub struct ThemeClient {
    transport: Arc<dyn Transport>,
    theme_id: String,
    filter: Arc<AssetFilter>,
}

const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ThemeClient>();
};

impl ThemeClient {
    /// Creates a client that talks to the shop over HTTPS.
    ///
    /// Nothing is sent over the network.
    ///
    /// # Errors
    ///
    /// - [`ThemeError::Http`] if the reqwest client cannot be built
    ///   (e.g. the proxy is rejected)
    /// - [`ThemeError::Config`] if an ignore file cannot be read or a
    ///   pattern does not compile
    pub fn new(config: &ThemeConfig) -> Result<Self, ThemeError> {
        let transport = HttpClient::new(config)?;
        Self::with_transport(config, Arc::new(transport))
    }

    /// Creates a client that sends requests through a custom transport.
    ///
    /// # Errors
    ///
    /// Returns [`ThemeError::Config`] if an ignore file cannot be read or a
    /// pattern does not compile.
    pub fn with_transport(
        config: &ThemeConfig,
        transport: Arc<dyn Transport>,
    ) -> Result<Self, ThemeError> {
        let filter = AssetFilter::from_config(config)?;
        Ok(Self {
            transport,
            theme_id: config.theme_id().to_string(),
            filter: Arc::new(filter),
        })
    }

    /// Returns a client sharing this one's transport and filter, bound to
    /// another theme.
    #[must_use]
    pub fn for_theme(&self, theme_id: impl Into<String>) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            theme_id: theme_id.into(),
            filter: Arc::clone(&self.filter),
        }
    }

    /// Returns the bound theme id, empty in themeless mode.
    #[must_use]
    pub fn theme_id(&self) -> &str {
        &self.theme_id
    }

    /// Returns the asset filter applied to listings.
    #[must_use]
    pub fn filter(&self) -> &AssetFilter {
        &self.filter
    }

    /// Fetches the shop metadata.
    ///
    /// # Errors
    ///
    /// Returns [`ThemeError::ShopNotFound`] on an empty 404, or the resolved
    /// envelope error.
    pub async fn get_shop(&self) -> Result<Shop, ThemeError> {
        let response = self.send(HttpRequest::get("/meta.json")).await?;
        resolve(&response, ThemeError::ShopNotFound)
    }

    /// Lists every theme in the shop, in server order.
    ///
    /// # Errors
    ///
    /// Returns [`ThemeError::ShopNotFound`] on an empty 404, or the resolved
    /// envelope error.
    pub async fn themes(&self) -> Result<Vec<Theme>, ThemeError> {
        let response = self.send(HttpRequest::get("/admin/themes.json")).await?;
        let payload: ThemesPayload = resolve(&response, ThemeError::ShopNotFound)?;
        Ok(payload.themes)
    }

    /// Creates a theme from a zip archive URL.
    ///
    /// The theme is processed asynchronously; see
    /// [`create_previewable_theme`](Self::create_previewable_theme) to wait
    /// for it.
    ///
    /// # Errors
    ///
    /// Returns [`ThemeError::MissingSourceUrl`] before sending anything if
    /// `source` is empty, or the resolved envelope error
    /// (e.g. "name can't be blank").
    pub async fn create_new_theme(&self, name: &str, source: &str) -> Result<Theme, ThemeError> {
        if source.is_empty() {
            return Err(ThemeError::MissingSourceUrl);
        }

        let body = json!({ "theme": Theme::from_source(name, source) });
        let response = self
            .send(HttpRequest::post("/admin/themes.json", body))
            .await?;
        let payload: ThemePayload = resolve(&response, ThemeError::ThemeNotFound)?;

        tracing::info!(
            theme_id = ?payload.theme.id,
            name = %payload.theme.name,
            "created theme"
        );
        Ok(payload.theme)
    }

    /// Creates a theme and waits until it can be previewed.
    ///
    /// # Errors
    ///
    /// Returns the creation error, or [`ThemeError::ThemeSetupIncomplete`]
    /// if a readiness check fails.
    pub async fn create_previewable_theme(
        &self,
        name: &str,
        source: &str,
    ) -> Result<Theme, ThemeError> {
        let theme = self.create_new_theme(name, source).await?;
        let theme_id = theme.id.map(|id| id.to_string()).unwrap_or_default();

        tracing::debug!(theme_id = %theme_id, "waiting for theme to become previewable");
        let client = self.for_theme(theme_id);
        ReadinessPoller::new(&client).wait().await
    }

    /// Fetches the bound theme.
    ///
    /// # Errors
    ///
    /// Returns [`ThemeError::InfoWithoutThemeId`] in themeless mode,
    /// [`ThemeError::ThemeNotFound`] on an empty 404, or the resolved
    /// envelope error.
    pub async fn get_info(&self) -> Result<Theme, ThemeError> {
        if self.theme_id.is_empty() {
            return Err(ThemeError::InfoWithoutThemeId);
        }

        let path = format!("/admin/themes/{}.json", self.theme_id);
        let response = self.send(HttpRequest::get(path)).await?;
        let payload: ThemePayload = resolve(&response, ThemeError::ThemeNotFound)?;
        Ok(payload.theme)
    }

    /// Lists the asset keys of the theme, filtered by the ignore rules and
    /// the Liquid shadowing rule.
    ///
    /// # Errors
    ///
    /// Returns [`ThemeError::ThemeNotFound`] on an empty 404, or the
    /// resolved envelope error.
    pub async fn get_all_assets(&self) -> Result<Vec<String>, ThemeError> {
        let path = format!("{}?fields=key", self.assets_path());
        let response = self.send(HttpRequest::get(path)).await?;
        let payload: AssetsPayload = resolve(&response, ThemeError::ThemeNotFound)?;

        let keys = payload.assets.into_iter().map(|asset| asset.key).collect();
        Ok(self.filter.apply(keys))
    }

    /// Fetches one asset with its content.
    ///
    /// # Errors
    ///
    /// Returns [`ThemeError::MissingAssetKey`] for an empty key,
    /// [`ThemeError::AssetNotPartOfTheme`] on an empty 404, or the resolved
    /// envelope error.
    pub async fn get_asset(&self, key: &str) -> Result<Asset, ThemeError> {
        if key.is_empty() {
            return Err(ThemeError::MissingAssetKey);
        }

        let response = self.send(HttpRequest::get(self.asset_path(key))).await?;
        let payload: AssetPayload = resolve(&response, ThemeError::AssetNotPartOfTheme)?;
        Ok(payload.asset)
    }

    /// Creates or replaces an asset.
    ///
    /// If the server refuses because the asset is generated from
    /// `<key>.liquid`, the template is deleted and the upload retried once.
    ///
    /// # Errors
    ///
    /// Returns [`ThemeError::MissingAssetKey`] for an empty key,
    /// [`ThemeError::AssetNotPartOfTheme`] on an empty 404, or the resolved
    /// envelope error of the last request sent.
    pub async fn update_asset(&self, asset: &Asset) -> Result<(), ThemeError> {
        if asset.key.is_empty() {
            return Err(ThemeError::MissingAssetKey);
        }
        retry::update_with_conflict_retry(self, asset).await
    }

    /// Deletes an asset.
    ///
    /// # Errors
    ///
    /// Returns [`ThemeError::MissingAssetKey`] for an empty key,
    /// [`ThemeError::AssetNotPartOfTheme`] on an empty 404, or the resolved
    /// envelope error.
    pub async fn delete_asset(&self, asset: &Asset) -> Result<(), ThemeError> {
        if asset.key.is_empty() {
            return Err(ThemeError::MissingAssetKey);
        }

        tracing::debug!(key = %asset.key, theme_id = %self.theme_id, "deleting asset");
        let response = self
            .send(HttpRequest::delete(self.asset_path(&asset.key)))
            .await?;
        resolve::<AssetPayload>(&response, ThemeError::AssetNotPartOfTheme).map(|_| ())
    }

    pub(crate) async fn put_asset(&self, asset: &Asset) -> Result<(), ThemeError> {
        tracing::debug!(key = %asset.key, theme_id = %self.theme_id, "uploading asset");
        let body = json!({ "asset": asset });
        let response = self
            .send(HttpRequest::put(self.assets_path(), body))
            .await?;
        resolve::<AssetPayload>(&response, ThemeError::AssetNotPartOfTheme).map(|_| ())
    }

    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ThemeError> {
        Ok(self.transport.send(request).await?)
    }

    /// `/admin/themes/{id}/assets.json`, or `/admin/assets.json` when no
    /// theme is bound.
    fn assets_path(&self) -> String {
        if self.theme_id.is_empty() {
            "/admin/assets.json".to_string()
        } else {
            format!("/admin/themes/{}/assets.json", self.theme_id)
        }
    }

    fn asset_path(&self, key: &str) -> String {
        format!(
            "{}?asset%5Bkey%5D={}",
            self.assets_path(),
            urlencoding::encode(key)
        )
    }
}
