use crate::config::{Defaults, StoreConfig};
use crate::error::Result;
use crate::storage::TomlStorage;
use crate::tier::Tier;

use log::info;
use std::path::{Path, PathBuf};

/// Layered settings store.
///
/// Settings live in one TOML file per tier, all sharing the same filename:
///
/// - **default**: read-only file shipped with the program
/// - **global**: machine-wide file
/// - **user**: per-user file
///
/// Reads search the requested tier (or `user`, `global`, `default` in that
/// order for [`Tier::All`]) and re-read the files on every call, so edits made
/// outside the program are picked up immediately. Writes go to a single
/// writable tier and keep comments and layout of the existing file.
///
/// # Example
///
/// ```rust,no_run
/// use layerconf::{SettingsStore, Tier};
///
/// let store = SettingsStore::builder("ked")
///     .defaults_dir("/usr/share/ked")
///     .build()?;
///
/// let theme = store.query("theme.app", Tier::All)?;
/// store.store(["theme", "app"], "dark", Tier::User)?;
/// # Ok::<(), layerconf::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct SettingsStore {
    /// Tier directories and filename
    pub(crate) config: StoreConfig,

    /// Backing file reader/writer
    pub(crate) storage: TomlStorage,
}

impl SettingsStore {
    /// Create a store over the given configuration.
    ///
    /// No directories are created here; the user and global directories are
    /// created on the first write to their tier.
    pub fn new(config: StoreConfig) -> Result<Self> {
        info!(
            "Initialized settings store for '{}' (user: {}, global: {})",
            config.app_name,
            config.user_dir.display(),
            config.global_dir.display()
        );

        Ok(Self {
            config,
            storage: TomlStorage,
        })
    }

    /// Get the configuration
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Directory holding the per-user settings file
    pub fn user_dir(&self) -> &Path {
        &self.config.user_dir
    }

    /// Directory holding the machine-wide settings file
    pub fn global_dir(&self) -> &Path {
        &self.config.global_dir
    }

    /// Path of the per-user settings file
    pub fn user_file(&self) -> PathBuf {
        self.config.user_dir.join(&self.config.settings_file)
    }

    /// Path of the machine-wide settings file
    pub fn global_file(&self) -> PathBuf {
        self.config.global_dir.join(&self.config.settings_file)
    }

    /// Path of the backing file for a concrete tier.
    ///
    /// `None` for [`Tier::All`] and for defaults compiled into the binary.
    pub fn tier_file(&self, tier: Tier) -> Option<PathBuf> {
        self.config
            .tier_dir(tier)
            .map(|dir| dir.join(&self.config.settings_file))
    }

    /// Whether the defaults are compiled in rather than read from disk
    pub fn has_embedded_defaults(&self) -> bool {
        matches!(self.config.defaults, Defaults::Embedded(_))
    }
}

impl SettingsStore {
    /// Create a builder for `SettingsStore` with a fluent API.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use layerconf::SettingsStore;
    ///
    /// let store = SettingsStore::builder("ked")
    ///     .user_dir("~/.config/ked")
    ///     .build()
    ///     .unwrap();
    /// ```
    pub fn builder(app_name: impl Into<String>) -> super::SettingsStoreBuilder {
        super::SettingsStoreBuilder::new(app_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> SettingsStore {
        let config = StoreConfig::builder("ked")
            .user_dir("/home/me/.config/ked")
            .global_dir("/etc/xdg/ked")
            .defaults_dir("/usr/share/ked")
            .build()
            .unwrap();
        SettingsStore::new(config).unwrap()
    }

    #[test]
    fn test_introspection_paths() {
        let store = store();
        assert_eq!(store.user_dir(), Path::new("/home/me/.config/ked"));
        assert_eq!(
            store.user_file(),
            PathBuf::from("/home/me/.config/ked/settings.toml")
        );
        assert_eq!(
            store.global_file(),
            PathBuf::from("/etc/xdg/ked/settings.toml")
        );
        assert_eq!(
            store.tier_file(Tier::Default),
            Some(PathBuf::from("/usr/share/ked/settings.toml"))
        );
        assert_eq!(store.tier_file(Tier::All), None);
        assert!(!store.has_embedded_defaults());
    }

    #[test]
    fn test_new_does_not_touch_disk() {
        let dir = tempfile::tempdir().unwrap();
        let user = dir.path().join("user");
        let config = StoreConfig::builder("ked")
            .user_dir(&user)
            .global_dir(dir.path().join("global"))
            .embedded_defaults("")
            .build()
            .unwrap();

        let _store = SettingsStore::new(config).unwrap();
        assert!(!user.exists());
    }
}
