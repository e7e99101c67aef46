//! Layered settings store
//!
//! This module is split into several submodules:
//! - `core`: The [`SettingsStore`] struct and directory introspection
//! - `builder`: [`SettingsStoreBuilder`] for fluent construction
//! - `query`: Read operations across tiers
//! - `io`: Comment-preserving write operations

mod builder;
mod core;
mod io;
mod query;

pub use builder::SettingsStoreBuilder;
pub use self::core::SettingsStore;
