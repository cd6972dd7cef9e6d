//! Ignore rules and asset key filtering.
//!
//! Patterns come from two places in [`ThemeConfig`]: inline
//! `ignored_files` and the lines of each file listed in `ignores`.
//!
//! # Pattern Syntax
//!
//! - `/.../`: a regular expression, matched anywhere in the key
//! - anything else is a glob:
//!   - `*` matches within one path segment
//!   - `**` matches across segments (`**/` also matches no directory)
//!   - `?` matches one character other than `/`
//!   - `[abc]`, `[a-z]`, `[!a-z]` match a character class
//!
//! A glob containing `/` must match the whole key. A glob without `/`
//! matches either the whole key or its last segment, so `*.png` ignores
//! `assets/logo.png`.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use regex::Regex;

use crate::config::ThemeConfig;
use crate::error::ConfigError;

#[derive(Clone, Debug)]
enum Matcher {
    Regex(Regex),
    Glob { regex: Regex, path: bool },
}

#[derive(Clone, Debug)]
struct IgnoreRule {
    pattern: String,
    matcher: Matcher,
}

impl IgnoreRule {
    fn compile(pattern: &str) -> Result<Self, ConfigError> {
        let invalid = |err: regex::Error| ConfigError::InvalidIgnorePattern {
            pattern: pattern.to_string(),
            reason: err.to_string(),
        };

        let matcher = if pattern.len() > 2 && pattern.starts_with('/') && pattern.ends_with('/') {
            Matcher::Regex(Regex::new(&pattern[1..pattern.len() - 1]).map_err(invalid)?)
        } else {
            let glob = pattern.replace('\\', "/");
            Matcher::Glob {
                regex: Regex::new(&glob_to_regex(&glob)).map_err(invalid)?,
                path: glob.contains('/'),
            }
        };

        Ok(Self {
            pattern: pattern.to_string(),
            matcher,
        })
    }

    fn matches(&self, key: &str) -> bool {
        match &self.matcher {
            Matcher::Regex(regex) => regex.is_match(key),
            Matcher::Glob { regex, path: true } => regex.is_match(key),
            Matcher::Glob { regex, path: false } => {
                let file_name = key.rsplit('/').next().unwrap_or(key);
                regex.is_match(key) || regex.is_match(file_name)
            }
        }
    }
}

fn glob_to_regex(glob: &str) -> String {
    let chars: Vec<char> = glob.chars().collect();
    let mut out = String::with_capacity(glob.len() * 2 + 2);
    out.push('^');

    let mut i = 0;
    while i < chars.len() {
        match chars[i] {
            '*' if chars.get(i + 1) == Some(&'*') => {
                while chars.get(i + 1) == Some(&'*') {
                    i += 1;
                }
                if chars.get(i + 1) == Some(&'/') {
                    i += 1;
                    out.push_str("(?:.*/)?");
                } else {
                    out.push_str(".*");
                }
            }
            '*' => out.push_str("[^/]*"),
            '?' => out.push_str("[^/]"),
            '[' => {
                let close = chars[i + 1..]
                    .iter()
                    .skip(1)
                    .position(|&c| c == ']')
                    .map(|offset| i + 2 + offset);
                if let Some(close) = close {
                    out.push('[');
                    for (n, &c) in chars[i + 1..close].iter().enumerate() {
                        match c {
                            '!' | '^' if n == 0 => out.push('^'),
                            '\\' | '[' | '&' | '~' => {
                                out.push('\\');
                                out.push(c);
                            }
                            _ => out.push(c),
                        }
                    }
                    out.push(']');
                    i = close;
                } else {
                    out.push_str(r"\[");
                }
            }
            c => out.push_str(&regex::escape(c.encode_utf8(&mut [0; 4]))),
        }
        i += 1;
    }

    out.push('$');
    out
}

/// An ordered set of compiled ignore patterns.
///
/// # Example
///
/// ```rust
/// use themekit::IgnoreRules;
///
/// let rules = IgnoreRules::new(["*.png", "/\\.min\\./", "config/settings_data.json"]).unwrap();
/// assert!(rules.is_ignored("assets/logo.png"));
/// assert!(rules.is_ignored("assets/app.min.js"));
/// assert!(rules.is_ignored("config/settings_data.json"));
/// assert!(!rules.is_ignored("config/settings_schema.json"));
/// ```
#[derive(Clone, Debug, Default)]
pub struct IgnoreRules {
    rules: Vec<IgnoreRule>,
}

impl IgnoreRules {
    /// Compiles a list of patterns. Blank patterns are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidIgnorePattern`] for a pattern that does
    /// not compile.
    pub fn new<I, S>(patterns: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut rules = Self::default();
        rules.extend(patterns)?;
        Ok(rules)
    }

    /// Compiles the patterns configured on a [`ThemeConfig`], loading every
    /// ignore file it lists.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::IgnoreFile`] if a file cannot be read and
    /// [`ConfigError::InvalidIgnorePattern`] if a pattern does not compile.
    pub fn from_config(config: &ThemeConfig) -> Result<Self, ConfigError> {
        let mut rules = Self::new(config.ignored_files())?;
        for path in config.ignores() {
            rules.extend(read_ignore_file(path)?)?;
        }
        Ok(rules)
    }

    fn extend<I, S>(&mut self, patterns: I) -> Result<(), ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for pattern in patterns {
            let pattern = pattern.as_ref().trim();
            if !pattern.is_empty() {
                self.rules.push(IgnoreRule::compile(pattern)?);
            }
        }
        Ok(())
    }

    /// Returns `true` if any rule matches the key.
    #[must_use]
    pub fn is_ignored(&self, key: &str) -> bool {
        self.rules.iter().any(|rule| rule.matches(key))
    }

    /// Returns the source patterns, in order.
    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|rule| rule.pattern.as_str())
    }

    /// Returns the number of rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns `true` if there are no rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Reads the patterns of an ignore file, skipping blank lines and `#`
/// comments.
///
/// # Errors
///
/// Returns [`ConfigError::IgnoreFile`] if the file cannot be read.
pub fn read_ignore_file(path: &Path) -> Result<Vec<String>, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|err| ConfigError::IgnoreFile {
        path: path.display().to_string(),
        reason: err.to_string(),
    })?;

    Ok(contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect())
}

/// Filters asset listings.
///
/// Keys are kept in their original order after two passes:
///
/// 1. keys matching an ignore rule are dropped
/// 2. a key `X` is dropped when `X.liquid` is still present, since the
///    server generates `X` from the Liquid template
///
/// # Example
///
/// ```rust
/// use themekit::{AssetFilter, IgnoreRules};
///
/// let filter = AssetFilter::new(IgnoreRules::new(["*.png"]).unwrap());
/// let keys = filter.apply(vec![
///     "assets/app.css".to_string(),
///     "assets/app.css.liquid".to_string(),
///     "assets/logo.png".to_string(),
/// ]);
/// assert_eq!(keys, vec!["assets/app.css.liquid"]);
/// ```
#[derive(Clone, Debug, Default)]
pub struct AssetFilter {
    rules: IgnoreRules,
}

impl AssetFilter {
    /// Creates a filter from compiled rules.
    #[must_use]
    pub const fn new(rules: IgnoreRules) -> Self {
        Self { rules }
    }

    /// Creates a filter from the ignore settings on a [`ThemeConfig`].
    ///
    /// # Errors
    ///
    /// See [`IgnoreRules::from_config`].
    pub fn from_config(config: &ThemeConfig) -> Result<Self, ConfigError> {
        IgnoreRules::from_config(config).map(Self::new)
    }

    /// Returns the ignore rules.
    #[must_use]
    pub const fn rules(&self) -> &IgnoreRules {
        &self.rules
    }

    /// Applies the ignore rules and the Liquid shadowing rule.
    #[must_use]
    pub fn apply(&self, keys: Vec<String>) -> Vec<String> {
        let kept: Vec<String> = keys
            .into_iter()
            .filter(|key| !self.rules.is_ignored(key))
            .collect();

        let liquid: HashSet<&str> = kept
            .iter()
            .filter(|key| key.ends_with(".liquid"))
            .map(String::as_str)
            .collect();

        let shadowed: HashSet<String> = kept
            .iter()
            .filter(|key| liquid.contains(format!("{key}.liquid").as_str()))
            .cloned()
            .collect();

        kept.into_iter()
            .filter(|key| !shadowed.contains(key))
            .collect()
    }
}
