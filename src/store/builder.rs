//! Builder for SettingsStore
//!
//! This module contains [`SettingsStoreBuilder`] which provides a fluent API
//! for creating a [`SettingsStore`](super::SettingsStore).

use crate::config::{DirectoryProvider, StoreConfigBuilder};
use crate::error::Result;
use std::path::PathBuf;

use super::SettingsStore;

/// Builder for creating a [`SettingsStore`] with a fluent API.
///
/// Directories that are not set explicitly are resolved from the platform
/// conventions for the application name.
///
/// # Example
///
/// ```rust,no_run
/// use layerconf::SettingsStore;
///
/// let store = SettingsStore::builder("ked")
///     .embedded_defaults("[theme]\napp = \"flexoki\"\n")
///     .build()
///     .unwrap();
/// ```
#[derive(Debug)]
pub struct SettingsStoreBuilder {
    config_builder: StoreConfigBuilder,
}

impl SettingsStoreBuilder {
    /// Create a new builder with the required application identifier.
    pub fn new(app_name: impl Into<String>) -> Self {
        Self {
            config_builder: StoreConfigBuilder::new(app_name),
        }
    }

    /// Set the per-user directory.
    ///
    /// Supports `~` expansion for home directory.
    pub fn user_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_builder = self.config_builder.user_dir(path);
        self
    }

    /// Set the machine-wide directory.
    ///
    /// Supports `~` expansion for home directory.
    pub fn global_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_builder = self.config_builder.global_dir(path);
        self
    }

    /// Read defaults from the settings file inside `path`.
    pub fn defaults_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_builder = self.config_builder.defaults_dir(path);
        self
    }

    /// Use settings text compiled into the binary as defaults.
    pub fn embedded_defaults(mut self, text: &'static str) -> Self {
        self.config_builder = self.config_builder.embedded_defaults(text);
        self
    }

    /// Set the settings filename (default: "settings.toml").
    pub fn settings_file(mut self, filename: impl Into<String>) -> Self {
        self.config_builder = self.config_builder.settings_file(filename);
        self
    }

    /// Resolve unset directories with a custom provider.
    pub fn directories(mut self, provider: impl DirectoryProvider + 'static) -> Self {
        self.config_builder = self.config_builder.directories(provider);
        self
    }

    /// Build the [`SettingsStore`].
    ///
    /// # Errors
    ///
    /// Returns an error if a directory cannot be resolved.
    pub fn build(self) -> Result<SettingsStore> {
        let config = self.config_builder.build()?;
        SettingsStore::new(config)
    }
}
