//! Name and source resolution for new themes.

use crate::theme::errors::ThemeError;

/// Base name of the default starter theme.
pub const DEFAULT_THEME_BASE: &str = "Timber-";

/// The name and archive URL a new theme is created with.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewThemeDetails {
    /// Theme name shown in the admin.
    pub name: String,
    /// URL of the zip archive to create the theme from.
    pub source: String,
}

impl NewThemeDetails {
    /// Fills in a missing name or archive URL.
    ///
    /// - no name but a URL: `prefix` + the last URL segment, without `.zip`
    /// - no name and no URL: `prefix` + `Timber-` + `version`
    /// - no URL: `release_url(version)`
    ///
    /// ```rust
    /// use themekit::NewThemeDetails;
    ///
    /// let details = NewThemeDetails::resolve(
    ///     "",
    ///     "https://example.com/themes/timber.zip",
    ///     "dev-",
    ///     "latest",
    ///     |_| unreachable!(),
    /// )
    /// .unwrap();
    /// assert_eq!(details.name, "dev-timber");
    /// ```
    ///
    /// # Errors
    ///
    /// Returns whatever `release_url` returns when it fails.
    pub fn resolve<F>(
        name: &str,
        url: &str,
        prefix: &str,
        version: &str,
        release_url: F,
    ) -> Result<Self, ThemeError>
    where
        F: FnOnce(&str) -> Result<String, ThemeError>,
    {
        let name = if !name.is_empty() {
            name.to_string()
        } else if url.is_empty() {
            format!("{prefix}{DEFAULT_THEME_BASE}{version}")
        } else {
            let last = url.rsplit('/').next().unwrap_or(url);
            format!("{prefix}{}", last.replacen(".zip", "", 1))
        };

        let source = if url.is_empty() {
            release_url(version)?
        } else {
            url.to_string()
        };

        Ok(Self { name, source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_lookup(_: &str) -> Result<String, ThemeError> {
        panic!("release lookup should not run")
    }

    #[test]
    fn test_name_from_url() {
        let details = NewThemeDetails::resolve(
            "",
            "https://githubz.com/shopify/timberlands.zip",
            "",
            "latest",
            no_lookup,
        )
        .unwrap();
        assert_eq!(details.name, "timberlands");
        assert_eq!(details.source, "https://githubz.com/shopify/timberlands.zip");
    }

    #[test]
    fn test_only_first_zip_is_removed() {
        let details =
            NewThemeDetails::resolve("", "https://a.com/my.zip.zip", "x-", "latest", no_lookup)
                .unwrap();
        assert_eq!(details.name, "x-my.zip");
    }

    #[test]
    fn test_default_name_from_version() {
        let details = NewThemeDetails::resolve("", "", "dev-", "v2.0.2", |version| {
            Ok(format!("https://example.com/timber/{version}.zip"))
        })
        .unwrap();
        assert_eq!(details.name, "dev-Timber-v2.0.2");
        assert_eq!(details.source, "https://example.com/timber/v2.0.2.zip");
    }

    #[test]
    fn test_explicit_name_is_kept() {
        let details = NewThemeDetails::resolve(
            "my theme",
            "https://a.com/timber.zip",
            "dev-",
            "latest",
            no_lookup,
        )
        .unwrap();
        assert_eq!(details.name, "my theme");
    }

    #[test]
    fn test_lookup_error_is_propagated() {
        let result = NewThemeDetails::resolve("my theme", "", "", "nope", |_| {
            Err(ThemeError::Api {
                code: 404,
                message: "invalid version".to_string(),
            })
        });
        assert!(matches!(result, Err(ThemeError::Api { ref message, .. }) if message == "invalid version"));
    }
}
