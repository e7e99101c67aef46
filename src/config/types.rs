//! Store configuration types

use log::warn;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::platform::{DirectoryProvider, PlatformDirs};
use crate::error::{Error, Result};
use crate::tier::Tier;

/// Default name of the backing file in every tier directory
pub const DEFAULT_SETTINGS_FILE: &str = "settings.toml";

/// Where the read-only defaults come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Defaults {
    /// A directory shipped with the program containing the settings file
    Directory(PathBuf),

    /// Settings text compiled into the binary, e.g. with `include_str!`
    Embedded(&'static str),
}

/// Configuration for a [`SettingsStore`](crate::SettingsStore)
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Application identifier used to derive platform directories
    pub app_name: String,

    /// Directory holding the per-user settings file
    pub user_dir: PathBuf,

    /// Directory holding the machine-wide settings file
    pub global_dir: PathBuf,

    /// Read-only defaults
    pub defaults: Defaults,

    /// Filename shared by all tiers (e.g. "settings.toml")
    pub settings_file: String,
}

impl StoreConfig {
    /// Create a new builder for `StoreConfig`
    ///
    /// # Example
    /// ```rust
    /// use layerconf::StoreConfig;
    ///
    /// let config = StoreConfig::builder("ked")
    ///     .user_dir("/tmp/ked/user")
    ///     .global_dir("/tmp/ked/global")
    ///     .embedded_defaults("[theme]\napp = \"flexoki\"\n")
    ///     .build()?;
    /// assert_eq!(config.settings_file, "settings.toml");
    /// # Ok::<(), layerconf::Error>(())
    /// ```
    pub fn builder(app_name: impl Into<String>) -> StoreConfigBuilder {
        StoreConfigBuilder::new(app_name)
    }

    /// Directory backing a concrete tier.
    ///
    /// Returns `None` for [`Tier::All`] and for embedded defaults.
    pub fn tier_dir(&self, tier: Tier) -> Option<&Path> {
        match tier {
            Tier::User => Some(&self.user_dir),
            Tier::Global => Some(&self.global_dir),
            Tier::Default => match &self.defaults {
                Defaults::Directory(dir) => Some(dir),
                Defaults::Embedded(_) => None,
            },
            Tier::All => None,
        }
    }
}

/// Builder for creating `StoreConfig` with a fluent API
#[derive(Clone)]
pub struct StoreConfigBuilder {
    app_name: String,
    user_dir: Option<PathBuf>,
    global_dir: Option<PathBuf>,
    defaults: Option<Defaults>,
    settings_file: String,
    directories: Arc<dyn DirectoryProvider>,
}

impl std::fmt::Debug for StoreConfigBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreConfigBuilder")
            .field("app_name", &self.app_name)
            .field("user_dir", &self.user_dir)
            .field("global_dir", &self.global_dir)
            .field("defaults", &self.defaults)
            .field("settings_file", &self.settings_file)
            .finish_non_exhaustive()
    }
}

impl StoreConfigBuilder {
    /// Create a new builder with the required application identifier
    pub fn new(app_name: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
            user_dir: None,
            global_dir: None,
            defaults: None,
            settings_file: DEFAULT_SETTINGS_FILE.into(),
            directories: Arc::new(PlatformDirs),
        }
    }

    /// Set the per-user directory
    ///
    /// Supports `~` expansion for home directory.
    pub fn user_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.user_dir = Some(expand_home(path.into()));
        self
    }

    /// Set the machine-wide directory
    ///
    /// Supports `~` expansion for home directory.
    pub fn global_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.global_dir = Some(expand_home(path.into()));
        self
    }

    /// Read defaults from the settings file inside `path`
    pub fn defaults_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.defaults = Some(Defaults::Directory(expand_home(path.into())));
        self
    }

    /// Use settings text compiled into the binary as defaults
    ///
    /// # Example
    /// ```rust,ignore
    /// let config = StoreConfig::builder("ked")
    ///     .embedded_defaults(include_str!("../defaults/settings.toml"))
    ///     .build()?;
    /// ```
    pub fn embedded_defaults(mut self, text: &'static str) -> Self {
        self.defaults = Some(Defaults::Embedded(text));
        self
    }

    /// Set the settings filename (default: "settings.toml")
    pub fn settings_file(mut self, filename: impl Into<String>) -> Self {
        self.settings_file = filename.into();
        self
    }

    /// Resolve unset user/global directories with a custom provider
    pub fn directories(mut self, provider: impl DirectoryProvider + 'static) -> Self {
        self.directories = Arc::new(provider);
        self
    }

    /// Build the `StoreConfig`
    ///
    /// Unset directories come from the directory provider. Unset defaults
    /// point at the directory of the running executable.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if a directory cannot be resolved or the
    /// settings filename is not a plain file name.
    pub fn build(self) -> Result<StoreConfig> {
        if !is_plain_file_name(&self.settings_file) {
            return Err(Error::Config(format!(
                "settings file '{}' must be a plain file name",
                self.settings_file
            )));
        }

        let user_dir = match self.user_dir {
            Some(dir) => dir,
            None => self
                .directories
                .user_config_dir(&self.app_name)
                .ok_or_else(|| Error::Config("could not determine user config directory".into()))?,
        };

        let global_dir = match self.global_dir {
            Some(dir) => dir,
            None => self
                .directories
                .global_config_dir(&self.app_name)
                .ok_or_else(|| {
                    Error::Config("could not determine global config directory".into())
                })?,
        };

        let defaults = match self.defaults {
            Some(defaults) => defaults,
            None => Defaults::Directory(executable_dir()?),
        };

        Ok(StoreConfig {
            app_name: self.app_name,
            user_dir,
            global_dir,
            defaults,
            settings_file: self.settings_file,
        })
    }
}

fn expand_home(path: PathBuf) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path;
    };
    match dirs::home_dir() {
        Some(home) => home.join(rest),
        None => {
            warn!("No home directory, leaving {} unexpanded", path.display());
            path
        }
    }
}

fn is_plain_file_name(name: &str) -> bool {
    let path = Path::new(name);
    !name.is_empty() && path.file_name().is_some_and(|f| f == path.as_os_str())
}

fn executable_dir() -> Result<PathBuf> {
    let exe = std::env::current_exe()
        .map_err(|e| Error::Config(format!("could not locate running executable: {e}")))?;
    exe.parent()
        .map(Path::to_path_buf)
        .ok_or_else(|| Error::Config("running executable has no parent directory".into()))
}
