//! # layerconf - Layered Settings Store
//!
//! Reads and writes application preferences kept in one TOML file per tier:
//!
//! - **default**: read-only settings shipped with the program
//! - **global**: machine-wide settings
//! - **user**: per-user settings
//!
//! Settings are addressed by dotted paths such as `theme.app`. Reads through
//! [`Tier::All`] return the value from the highest tier that defines it
//! (user, then global, then default). Writes keep the comments, blank lines
//! and key order of hand-edited files.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use layerconf::{SettingsStore, Tier};
//!
//! let store = SettingsStore::builder("ked")
//!     .embedded_defaults("[theme]\napp = \"flexoki\"\nsyntax = \"css\"\n")
//!     .build()?;
//!
//! // Highest tier that defines the setting wins
//! let theme = store.query("theme.app", Tier::All)?;
//!
//! // Write to the user's settings file
//! store.store(["theme", "app"], "dark", Tier::User)?;
//! # Ok::<(), layerconf::Error>(())
//! ```
//!
//! ## Missing Settings
//!
//! A setting absent from every searched tier is [`Error::NotFound`], which is
//! kept distinct from malformed files ([`Error::Parse`]) so callers can fall
//! back to a value of their own:
//!
//! ```rust,no_run
//! # use layerconf::{SettingsStore, Tier};
//! # let store = SettingsStore::builder("ked").build()?;
//! let width = store.query_or("editor.tab_width", Tier::All, 4)?;
//! # Ok::<(), layerconf::Error>(())
//! ```

mod error;
mod path;
mod resolve;
mod store;
mod tier;
mod value;

pub mod config;
pub mod storage;

pub use config::{
    DEFAULT_SETTINGS_FILE, Defaults, DirectoryProvider, FixedDirs, PlatformDirs, StoreConfig,
    StoreConfigBuilder,
};
pub use error::{Error, Result};
pub use path::{IntoSettingPath, SettingPath};
pub use storage::TomlStorage;
pub use store::{SettingsStore, SettingsStoreBuilder};
pub use tier::Tier;
pub use value::SettingValue;
