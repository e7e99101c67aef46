//! Setting paths
//!
//! A [`SettingPath`] addresses a value inside nested settings tables by an
//! ordered list of keys, outermost first. `theme.app` is the path
//! `["theme", "app"]`.

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Validated, non-empty sequence of non-empty key segments.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SettingPath {
    segments: Vec<String>,
}

impl SettingPath {
    /// Build a path from its segments.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if there are no segments or any
    /// segment is the empty string.
    ///
    /// # Example
    ///
    /// ```
    /// use layerconf::SettingPath;
    ///
    /// let path = SettingPath::new(["theme", "app"])?;
    /// assert_eq!(path.to_string(), "theme.app");
    /// # Ok::<(), layerconf::Error>(())
    /// ```
    pub fn new<I, S>(segments: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments: Vec<String> = segments.into_iter().map(Into::into).collect();

        if segments.is_empty() {
            return Err(Error::InvalidArgument(
                "setting path cannot be empty".into(),
            ));
        }
        if let Some(index) = segments.iter().position(String::is_empty) {
            return Err(Error::InvalidArgument(format!(
                "setting path segment {index} is empty"
            )));
        }

        Ok(Self { segments })
    }

    /// Parse a dotted path such as `theme.app`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] for an empty string or a path with
    /// empty segments (`theme..app`, `.theme`).
    pub fn parse(dotted: &str) -> Result<Self> {
        if dotted.is_empty() {
            return Err(Error::InvalidArgument(
                "setting path cannot be empty".into(),
            ));
        }
        Self::new(dotted.split('.'))
    }

    /// All segments, outermost first
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Number of segments (always at least one)
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Split into the parent segments and the final key.
    pub fn split_last(&self) -> (&[String], &str) {
        match self.segments.split_last() {
            Some((last, parents)) => (parents, last.as_str()),
            // Construction guarantees at least one segment.
            None => unreachable!("setting path is never empty"),
        }
    }
}

impl fmt::Display for SettingPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("."))
    }
}

impl FromStr for SettingPath {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

// =============================================================================
// Conversions accepted by the store operations
// =============================================================================

/// Anything the store accepts where a setting path is expected.
///
/// Strings are read as dotted paths; slices, arrays and vectors are taken
/// segment by segment.
pub trait IntoSettingPath {
    /// Validate and convert into a [`SettingPath`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if the path is empty or has an
    /// empty segment.
    fn into_setting_path(self) -> Result<SettingPath>;
}

impl IntoSettingPath for SettingPath {
    fn into_setting_path(self) -> Result<SettingPath> {
        Ok(self)
    }
}

impl IntoSettingPath for &SettingPath {
    fn into_setting_path(self) -> Result<SettingPath> {
        Ok(self.clone())
    }
}

impl IntoSettingPath for &str {
    fn into_setting_path(self) -> Result<SettingPath> {
        SettingPath::parse(self)
    }
}

impl IntoSettingPath for &String {
    fn into_setting_path(self) -> Result<SettingPath> {
        SettingPath::parse(self)
    }
}

impl IntoSettingPath for String {
    fn into_setting_path(self) -> Result<SettingPath> {
        SettingPath::parse(&self)
    }
}

impl IntoSettingPath for &[&str] {
    fn into_setting_path(self) -> Result<SettingPath> {
        SettingPath::new(self.iter().copied())
    }
}

impl IntoSettingPath for &[String] {
    fn into_setting_path(self) -> Result<SettingPath> {
        SettingPath::new(self.iter().cloned())
    }
}

impl<const N: usize> IntoSettingPath for [&str; N] {
    fn into_setting_path(self) -> Result<SettingPath> {
        SettingPath::new(self)
    }
}

impl<const N: usize> IntoSettingPath for &[&str; N] {
    fn into_setting_path(self) -> Result<SettingPath> {
        SettingPath::new(self.iter().copied())
    }
}

impl IntoSettingPath for Vec<&str> {
    fn into_setting_path(self) -> Result<SettingPath> {
        SettingPath::new(self)
    }
}

impl IntoSettingPath for Vec<String> {
    fn into_setting_path(self) -> Result<SettingPath> {
        SettingPath::new(self)
    }
}
