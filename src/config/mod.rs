//! Store configuration
//!
//! This module contains the types used to set up a settings store:
//! - `StoreConfig` - Directories and filename for each tier
//! - `DirectoryProvider` - Platform lookup of user and machine-wide directories
//! - `Defaults` - Where the read-only defaults come from

mod platform;
mod types;

pub use platform::{DirectoryProvider, FixedDirs, PlatformDirs};
pub use types::{DEFAULT_SETTINGS_FILE, Defaults, StoreConfig, StoreConfigBuilder};
