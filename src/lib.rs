//! # themekit
//!
//! An async client for the Shopify theme Admin API: reading shop metadata,
//! listing and creating themes, and synchronizing theme assets.
//!
//! ## Overview
//!
//! This crate provides:
//! - Type-safe configuration via [`ThemeConfig`] and [`ThemeConfigBuilder`]
//! - Validated newtypes for the shop domain, password, API host and proxy
//! - [`ThemeClient`], one method per theme API operation
//! - A single error type, [`ThemeError`], that distinguishes transport
//!   failures, API-reported errors, implied not-found results and
//!   precondition violations
//! - Ignore rules and Liquid shadowing for asset listings ([`AssetFilter`])
//! - Automatic recovery when an upload collides with a generated asset
//! - [`ReadinessPoller`] for waiting on freshly created themes
//!
//! ## Quick Start
//!
//! ```rust
//! use themekit::{AccessToken, ShopDomain, ThemeClient, ThemeConfig};
//!
//! let config = ThemeConfig::builder()
//!     .domain(ShopDomain::new("my-store").unwrap())
//!     .password(AccessToken::new("shppa_0123456789").unwrap())
//!     .theme_id("123456")
//!     .ignored_files(["config/settings_data.json", "*.png"])
//!     .build()
//!     .unwrap();
//!
//! // Nothing is sent until an operation is awaited.
//! let client = ThemeClient::new(&config).unwrap();
//! assert_eq!(client.theme_id(), "123456");
//! ```
//!
//! ## Working With Assets
//!
//! ```rust,ignore
//! use themekit::{Asset, ThemeError};
//!
//! let keys = client.get_all_assets().await?;
//!
//! match client.get_asset("templates/index.liquid").await {
//!     Ok(asset) => println!("{}", asset.value.unwrap_or_default()),
//!     Err(ThemeError::AssetNotPartOfTheme) => println!("not in this theme"),
//!     Err(e) => return Err(e),
//! }
//!
//! client
//!     .update_asset(&Asset::from_bytes("assets/logo.png", &png_bytes))
//!     .await?;
//! ```
//!
//! ## Creating a Theme
//!
//! ```rust,ignore
//! let theme = client
//!     .create_previewable_theme("Timber", "https://example.com/timber.zip")
//!     .await?;
//! println!("theme {} is ready", theme.name);
//! ```
//!
//! ## Logging
//!
//! The crate emits `tracing` events (requests at `debug`, theme creation and
//! readiness at `info`, conflict recovery at `warn`, failed readiness
//! checks at `error`). Installing a subscriber is left to the application.
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration is instance-based and passed explicitly
//! - **Fail-fast validation**: All newtypes validate on construction
//! - **Thread-safe**: All types are `Send + Sync`
//! - **Async-first**: Designed for use with Tokio async runtime
//! - **Injectable transport**: Any [`clients::Transport`] can replace HTTPS

pub mod clients;
pub mod config;
pub mod error;
pub mod theme;

// Re-export public types at crate root for convenience
pub use config::{AccessToken, HostUrl, ProxyUrl, ShopDomain, ThemeConfig, ThemeConfigBuilder};
pub use error::ConfigError;

// Re-export theme client types
pub use theme::{
    to_sentence, Asset, AssetFilter, ErrorSet, IgnoreRules, NewThemeDetails, ReadinessPoller,
    Shop, Theme, ThemeClient, ThemeError, ThemeRole,
};

// Re-export HTTP transport types
pub use clients::{HttpClient, HttpError, HttpMethod, HttpRequest, HttpResponse, Transport};
