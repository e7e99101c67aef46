//! Common test utilities for layerconf integration tests
//!
//! Provides an isolated set of tier directories and helper functions.

#![allow(dead_code)]

use layerconf::{SettingsStore, StoreConfig, Tier};
use std::path::PathBuf;
use tempfile::TempDir;

/// Defaults shipped with the crate
pub const BUNDLED_DEFAULTS: &str = include_str!("../../defaults/settings.toml");

// =============================================================================
// Test Fixtures
// =============================================================================

/// Temporary user, global and defaults directories with a store over them.
///
/// Only the defaults file exists initially; the user and global directories
/// are not created.
pub struct TestFixture {
    pub temp_dir: TempDir,
    pub store: SettingsStore,
}

impl TestFixture {
    /// Create a fixture with the bundled defaults on disk
    pub fn new() -> Self {
        Self::with_defaults(BUNDLED_DEFAULTS)
    }

    /// Create a fixture whose defaults file holds `text`
    pub fn with_defaults(text: &str) -> Self {
        let _ = env_logger::builder().is_test(true).try_init();

        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let defaults_dir = temp_dir.path().join("defaults");
        std::fs::create_dir_all(&defaults_dir).expect("Failed to create defaults dir");
        std::fs::write(defaults_dir.join("settings.toml"), text)
            .expect("Failed to write defaults");

        let config = StoreConfig::builder("test-app")
            .user_dir(temp_dir.path().join("user"))
            .global_dir(temp_dir.path().join("global"))
            .defaults_dir(&defaults_dir)
            .build()
            .expect("Failed to build config");
        let store = SettingsStore::new(config).expect("Failed to create store");

        Self { temp_dir, store }
    }

    /// Create a fixture whose global file holds `text`
    pub fn with_global(text: &str) -> Self {
        let fixture = Self::new();
        fixture.write_tier(Tier::Global, text);
        fixture
    }

    pub fn user_dir(&self) -> PathBuf {
        self.temp_dir.path().join("user")
    }

    pub fn global_dir(&self) -> PathBuf {
        self.temp_dir.path().join("global")
    }

    /// Write raw text to the backing file of a concrete tier
    pub fn write_tier(&self, tier: Tier, text: &str) {
        let file = self.store.tier_file(tier).expect("tier has no file");
        std::fs::create_dir_all(file.parent().unwrap()).expect("Failed to create tier dir");
        std::fs::write(file, text).expect("Failed to write tier file");
    }

    /// Read the raw text of a tier's backing file
    pub fn read_tier(&self, tier: Tier) -> Option<String> {
        let file = self.store.tier_file(tier)?;
        std::fs::read_to_string(file).ok()
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}
