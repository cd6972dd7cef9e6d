//! Error taxonomy for theme operations.
//!
//! Every [`ThemeClient`](super::ThemeClient) operation returns
//! `Result<T, ThemeError>`. The variants fall into five groups:
//!
//! - **Transport**: [`ThemeError::Http`], surfaced verbatim
//! - **Parse**: [`ThemeError::Parse`], the body was not a valid envelope
//! - **Reported by the API**: [`ThemeError::Validation`] (field errors) and
//!   [`ThemeError::Api`] (a freeform message)
//! - **Implied not-found**: [`ThemeError::ShopNotFound`],
//!   [`ThemeError::ThemeNotFound`] and [`ThemeError::AssetNotPartOfTheme`],
//!   synthesized from a 404 with an empty body
//! - **Preconditions**: [`ThemeError::InfoWithoutThemeId`],
//!   [`ThemeError::MissingSourceUrl`], [`ThemeError::MissingAssetKey`] and
//!   [`ThemeError::Config`], raised before any request is sent
//!
//! # Example
//!
//! ```rust,ignore
//! use themekit::ThemeError;
//!
//! match client.get_asset("templates/index.liquid").await {
//!     Ok(asset) => println!("{}", asset.key),
//!     Err(ThemeError::AssetNotPartOfTheme) => println!("no such file"),
//!     Err(ThemeError::Validation { errors, .. }) => println!("rejected: {errors}"),
//!     Err(e) => println!("failed: {e}"),
//! }
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use thiserror::Error;

use crate::clients::HttpError;
use crate::error::ConfigError;

/// Field-level validation errors reported by the API.
///
/// Fields iterate in name order, so the generated sentence is stable.
///
/// # Example
///
/// ```rust
/// use themekit::ErrorSet;
///
/// let mut errors = ErrorSet::new();
/// errors.insert("src", "is empty");
/// errors.insert("name", "can't be blank");
/// assert_eq!(errors.to_string(), "name can't be blank and src is empty");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ErrorSet(BTreeMap<String, Vec<String>>);

impl ErrorSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a violation message to a field.
    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    /// Returns `true` if no field has a violation.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.values().all(Vec::is_empty)
    }

    /// Returns the messages recorded for a field.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    /// Returns one `"<field> <violation>"` message per violation.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.0
            .iter()
            .flat_map(|(field, violations)| {
                violations
                    .iter()
                    .map(move |violation| format!("{field} {violation}"))
            })
            .collect()
    }
}

impl From<BTreeMap<String, Vec<String>>> for ErrorSet {
    fn from(map: BTreeMap<String, Vec<String>>) -> Self {
        Self(map)
    }
}

impl fmt::Display for ErrorSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&to_sentence(&self.messages()))
    }
}

/// Joins messages into an English sentence with an Oxford comma.
///
/// # Example
///
/// ```rust
/// use themekit::to_sentence;
///
/// assert_eq!(to_sentence(&[] as &[&str]), "");
/// assert_eq!(to_sentence(&["a"]), "a");
/// assert_eq!(to_sentence(&["a", "b"]), "a and b");
/// assert_eq!(to_sentence(&["a", "b", "c"]), "a, b, and c");
/// ```
#[must_use]
pub fn to_sentence<S: AsRef<str>>(messages: &[S]) -> String {
    match messages {
        [] => String::new(),
        [only] => only.as_ref().to_string(),
        [first, second] => format!("{} and {}", first.as_ref(), second.as_ref()),
        [init @ .., last] => {
            let head: Vec<&str> = init.iter().map(AsRef::as_ref).collect();
            format!("{}, and {}", head.join(", "), last.as_ref())
        }
    }
}

/// Error type for theme client operations.
#[derive(Debug, Error)]
pub enum ThemeError {
    /// The request could not complete (connection failure, timeout).
    #[error(transparent)]
    Http(#[from] HttpError),

    /// The response body was not a recognizable envelope.
    #[error("received a malformed response from shopify: {0}")]
    Parse(#[from] serde_json::Error),

    /// The API rejected the request with field-level errors.
    #[error("{errors}")]
    Validation {
        /// The HTTP status code of the response.
        code: u16,
        /// The reported violations.
        errors: ErrorSet,
    },

    /// The API reported a freeform error message.
    #[error("{message}")]
    Api {
        /// The HTTP status code of the response.
        code: u16,
        /// The message, verbatim.
        message: String,
    },

    /// A 404 with no body was returned for the shop metadata.
    #[error("provided shop domain was not found, please check your store domain")]
    ShopNotFound,

    /// A 404 with no body was returned for a theme.
    #[error("requested theme was not found")]
    ThemeNotFound,

    /// A 404 with no body was returned for an asset.
    #[error("this file is not part of your theme")]
    AssetNotPartOfTheme,

    /// Theme info was requested without a bound theme id.
    #[error("info requires a theme id")]
    InfoWithoutThemeId,

    /// A theme was created without a source archive URL.
    #[error("theme zip path is required")]
    MissingSourceUrl,

    /// An asset operation was attempted with an empty key.
    #[error("asset has no key so it could not be processed")]
    MissingAssetKey,

    /// The client could not be constructed from its configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Checking a freshly created theme failed.
    #[error("Encountered an error while checking new theme: {source}. Please run `theme download` to complete the setup.")]
    ThemeSetupIncomplete {
        /// The failure returned by the readiness check.
        #[source]
        source: Box<ThemeError>,
    },

    /// The theme did not become previewable before the poller's deadline.
    #[error("theme was not ready for preview after {waited:?}. Please run `theme download` to complete the setup.")]
    ReadinessTimeout {
        /// How long the poller waited.
        waited: Duration,
    },
}

impl ThemeError {
    /// Returns the HTTP status code for errors reported by the API.
    #[must_use]
    pub const fn code(&self) -> Option<u16> {
        match self {
            Self::Validation { code, .. } | Self::Api { code, .. } => Some(*code),
            Self::ShopNotFound | Self::ThemeNotFound | Self::AssetNotPartOfTheme => Some(404),
            _ => None,
        }
    }

    /// Returns `true` for the implied not-found errors.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::ShopNotFound | Self::ThemeNotFound | Self::AssetNotPartOfTheme
        )
    }

    /// Returns `true` for errors raised before any request was sent.
    #[must_use]
    pub const fn is_precondition(&self) -> bool {
        matches!(
            self,
            Self::InfoWithoutThemeId | Self::MissingSourceUrl | Self::MissingAssetKey | Self::Config(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn error_set(entries: &[(&str, &str)]) -> ErrorSet {
        let mut errors = ErrorSet::new();
        for (field, message) in entries {
            errors.insert(*field, *message);
        }
        errors
    }

    #[test]
    fn test_to_messages() {
        assert_eq!(
            error_set(&[("src", "is empty")]).messages(),
            vec!["src is empty"]
        );
        assert!(ErrorSet::new().messages().is_empty());
        assert_eq!(
            error_set(&[("name", "can't be blank")]).messages(),
            vec!["name can't be blank"]
        );
    }

    #[test]
    fn test_to_messages_is_sorted_by_field() {
        let errors = error_set(&[
            ("role", "is invalid"),
            ("name", "can't be blank"),
            ("name", "is too short"),
        ]);
        assert_eq!(
            errors.messages(),
            vec!["name can't be blank", "name is too short", "role is invalid"]
        );
    }

    #[test]
    fn test_to_sentence() {
        assert_eq!(to_sentence::<&str>(&[]), "");
        assert_eq!(to_sentence(&["src is empty"]), "src is empty");
        assert_eq!(
            to_sentence(&["src is empty", "name can't be blank"]),
            "src is empty and name can't be blank"
        );
        assert_eq!(
            to_sentence(&["src is empty", "name can't be blank", "role is invalid"]),
            "src is empty, name can't be blank, and role is invalid"
        );
        assert_eq!(to_sentence(&["a", "b", "c", "d"]), "a, b, c, and d");
    }

    #[test]
    fn test_validation_error_displays_sentence() {
        let error = ThemeError::Validation {
            code: 422,
            errors: error_set(&[("name", "can't be blank")]),
        };
        assert_eq!(error.to_string(), "name can't be blank");
        assert_eq!(error.code(), Some(422));
    }

    #[test]
    fn test_empty_error_set() {
        assert!(ErrorSet::new().is_empty());
        assert_eq!(ErrorSet::new().to_string(), "");
        assert!(!error_set(&[("name", "x")]).is_empty());
    }

    #[test]
    fn test_api_error_displays_message_verbatim() {
        let error = ThemeError::Api {
            code: 200,
            message: "Not Found".to_string(),
        };
        assert_eq!(error.to_string(), "Not Found");
    }

    #[test]
    fn test_not_found_family() {
        assert!(ThemeError::ShopNotFound.is_not_found());
        assert!(ThemeError::ThemeNotFound.is_not_found());
        assert!(ThemeError::AssetNotPartOfTheme.is_not_found());
        assert!(!ThemeError::InfoWithoutThemeId.is_not_found());
        assert_eq!(ThemeError::ThemeNotFound.code(), Some(404));
    }

    #[test]
    fn test_precondition_family() {
        assert!(ThemeError::InfoWithoutThemeId.is_precondition());
        assert!(ThemeError::MissingSourceUrl.is_precondition());
        assert!(ThemeError::MissingAssetKey.is_precondition());
        assert!(!ThemeError::ThemeNotFound.is_precondition());
    }

    #[test]
    fn test_setup_incomplete_keeps_cause() {
        let error = ThemeError::ThemeSetupIncomplete {
            source: Box::new(ThemeError::ThemeNotFound),
        };
        let message = error.to_string();
        assert!(message.contains("theme download"));
        assert!(message.contains("requested theme was not found"));
        assert!(std::error::Error::source(&error).is_some());
    }
}
