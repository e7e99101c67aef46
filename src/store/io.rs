//! Write operations

use crate::error::{Error, Result};
use crate::path::IntoSettingPath;
use crate::resolve;
use crate::tier::Tier;
use crate::value::SettingValue;

use log::info;
use std::path::PathBuf;

use super::SettingsStore;

impl SettingsStore {
    /// Store the value of a setting in the file of `tier`.
    ///
    /// The file and its directory are created if missing. The existing file
    /// is loaded with its comments and layout, the value is set (creating
    /// intermediate tables as needed, and replacing a plain value that sits
    /// where a table is needed), and the result is written back atomically.
    ///
    /// # Arguments
    ///
    /// * `path` - Dotted string (`"theme.app"`) or sequence of keys
    /// * `value` - New value
    /// * `tier` - [`Tier::User`] or [`Tier::Global`]
    ///
    /// # Errors
    ///
    /// * [`Error::InvalidArgument`] - Invalid path, or `tier` is `default` or `all`
    /// * [`Error::Parse`] - The existing file is malformed (it is left untouched)
    /// * I/O errors creating the directory or writing the file
    pub fn store(
        &self,
        path: impl IntoSettingPath,
        value: impl Into<SettingValue>,
        tier: Tier,
    ) -> Result<()> {
        let path = path.into_setting_path()?;
        let value = value.into();
        let file = self.writable_file(tier)?;

        self.storage.ensure_file(&file)?;

        let mut edited = self.storage.load_editable(&file)?;
        resolve::assign(&path, value.to_item(), edited.document.as_table_mut());
        self.storage.save(&file, &edited)?;

        info!("Setting {path} stored in {tier} settings ({})", file.display());
        Ok(())
    }

    /// Backing file of a tier that accepts writes
    fn writable_file(&self, tier: Tier) -> Result<PathBuf> {
        if !tier.is_writable() {
            return Err(Error::InvalidArgument(format!(
                "cannot store settings in the '{tier}' tier (expected user or global)"
            )));
        }

        self.tier_file(tier).ok_or_else(|| {
            Error::InvalidArgument(format!("no settings file for the '{tier}' tier"))
        })
    }
}
