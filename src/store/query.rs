//! Read operations

use crate::config::Defaults;
use crate::error::{Error, Result};
use crate::path::{IntoSettingPath, SettingPath};
use crate::resolve;
use crate::tier::Tier;
use crate::value::SettingValue;

use log::debug;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::path::Path;

use super::SettingsStore;

const EMBEDDED_ORIGIN: &str = "<embedded defaults>";

impl SettingsStore {
    /// Query the value of a setting.
    ///
    /// The files of `tier` are searched in precedence order and the first one
    /// containing the path wins, even when the value is `false`, `0` or `""`.
    /// Tiers whose file does not exist are skipped.
    ///
    /// # Arguments
    ///
    /// * `path` - Dotted string (`"theme.app"`) or sequence of keys
    /// * `tier` - Tier to read, usually [`Tier::All`]
    ///
    /// # Errors
    ///
    /// * [`Error::InvalidArgument`] - The path is empty or has an empty key
    /// * [`Error::NotFound`] - No searched file contains the path
    /// * [`Error::Parse`] - A searched file exists but is malformed
    /// * [`Error::TypeMismatch`] - The path names a table rather than a value
    pub fn query(&self, path: impl IntoSettingPath, tier: Tier) -> Result<SettingValue> {
        self.find(path, tier).map(|(_, value)| value)
    }

    /// Like [`query`](Self::query), but also report which tier supplied the value.
    ///
    /// # Errors
    ///
    /// Same as [`query`](Self::query).
    pub fn find(&self, path: impl IntoSettingPath, tier: Tier) -> Result<(Tier, SettingValue)> {
        let path = path.into_setting_path()?;
        let (source, value) = self.search(&path, tier)?;
        let value = SettingValue::from_toml(&path.to_string(), &value)?;
        Ok((source, value))
    }

    /// Query a setting, falling back to `fallback` when it is not configured.
    ///
    /// Only [`Error::NotFound`] is replaced by the fallback; malformed files
    /// and invalid paths are still reported.
    ///
    /// # Errors
    ///
    /// Any error from [`query`](Self::query) other than `NotFound`.
    pub fn query_or(
        &self,
        path: impl IntoSettingPath,
        tier: Tier,
        fallback: impl Into<SettingValue>,
    ) -> Result<SettingValue> {
        match self.query(path, tier) {
            Err(e) if e.is_not_found() => Ok(fallback.into()),
            other => other,
        }
    }

    /// Query a compound setting (a table of settings).
    ///
    /// The first tier containing the path supplies the whole table; tables
    /// from lower tiers are not merged in.
    ///
    /// # Errors
    ///
    /// Same as [`query`](Self::query), with [`Error::TypeMismatch`] when the
    /// path names a leaf value instead of a table.
    pub fn query_section(&self, path: impl IntoSettingPath, tier: Tier) -> Result<toml::Table> {
        let path = path.into_setting_path()?;
        match self.search(&path, tier)? {
            (_, toml::Value::Table(table)) => Ok(table),
            (_, other) => Err(Error::TypeMismatch {
                key: path.to_string(),
                expected: "table".into(),
                actual: other.type_str().into(),
            }),
        }
    }

    /// Query a compound setting and deserialize it into `T`.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use layerconf::{SettingsStore, Tier};
    /// use serde::Deserialize;
    ///
    /// #[derive(Deserialize)]
    /// struct Theme {
    ///     app: String,
    ///     syntax: String,
    /// }
    ///
    /// # let store = SettingsStore::builder("ked").build()?;
    /// let theme: Theme = store.query_as("theme", Tier::All)?;
    /// # Ok::<(), layerconf::Error>(())
    /// ```
    ///
    /// # Errors
    ///
    /// Same as [`query_section`](Self::query_section), plus
    /// [`Error::Deserialize`] if the table does not fit `T`.
    pub fn query_as<T: DeserializeOwned>(&self, path: impl IntoSettingPath, tier: Tier) -> Result<T> {
        let path = path.into_setting_path()?;
        let table = self.query_section(&path, tier)?;
        T::deserialize(toml::Value::Table(table)).map_err(|e| Error::Deserialize {
            key: path.to_string(),
            source: e,
        })
    }

    /// Walk the files of `tier` and return the first match with its tier.
    fn search(&self, path: &SettingPath, tier: Tier) -> Result<(Tier, toml::Value)> {
        for &candidate in tier.search_order() {
            let Some(document) = self.load_tier(candidate)? else {
                debug!("No {candidate} settings file, skipping");
                continue;
            };

            if let Some(value) = resolve::lookup(path, &document) {
                debug!("Setting {path} found in {candidate} settings");
                return Ok((candidate, value.clone()));
            }
        }

        Err(Error::NotFound(path.to_string()))
    }

    /// Load the document of a concrete tier, or `None` if it has no file.
    pub(crate) fn load_tier(&self, tier: Tier) -> Result<Option<toml::Table>> {
        if let (Tier::Default, Defaults::Embedded(text)) = (tier, &self.config.defaults) {
            return self
                .storage
                .parse_embedded(Path::new(EMBEDDED_ORIGIN), text)
                .map(Some);
        }

        match self.tier_file(tier) {
            Some(file) => self.storage.load(&file),
            None => Ok(None),
        }
    }
}
