//! Platform directory resolution
//!
//! The store only needs two directories per application: one for per-user
//! settings and one for machine-wide settings. Where those live is a platform
//! concern kept behind [`DirectoryProvider`].

use std::path::PathBuf;

/// Resolves the per-user and machine-wide configuration directories for an
/// application identifier.
pub trait DirectoryProvider: Send + Sync {
    /// Per-user configuration directory for `app_name`
    fn user_config_dir(&self, app_name: &str) -> Option<PathBuf>;

    /// Machine-wide configuration directory for `app_name`
    fn global_config_dir(&self, app_name: &str) -> Option<PathBuf>;
}

/// Platform conventions: `dirs` for the user directory, the system-wide
/// equivalent for the global one.
///
/// | Platform | User | Global |
/// |----------|------|--------|
/// | Linux/BSD | `$XDG_CONFIG_HOME/<app>` | `/etc/xdg/<app>` |
/// | macOS | `~/Library/Application Support/<app>` | `/Library/Application Support/<app>` |
/// | Windows | `%APPDATA%\<app>` | `%PROGRAMDATA%\<app>` |
#[derive(Debug, Clone, Copy, Default)]
pub struct PlatformDirs;

impl DirectoryProvider for PlatformDirs {
    fn user_config_dir(&self, app_name: &str) -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(app_name))
    }

    fn global_config_dir(&self, app_name: &str) -> Option<PathBuf> {
        site_config_dir().map(|d| d.join(app_name))
    }
}

#[cfg(target_os = "macos")]
fn site_config_dir() -> Option<PathBuf> {
    Some(PathBuf::from("/Library/Application Support"))
}

#[cfg(windows)]
fn site_config_dir() -> Option<PathBuf> {
    std::env::var_os("PROGRAMDATA")
        .map(PathBuf::from)
        .or_else(|| Some(PathBuf::from(r"C:\ProgramData")))
}

#[cfg(not(any(target_os = "macos", windows)))]
fn site_config_dir() -> Option<PathBuf> {
    // XDG_CONFIG_DIRS is ordered by preference
    std::env::var_os("XDG_CONFIG_DIRS")
        .and_then(|dirs| std::env::split_paths(&dirs).find(|p| p.is_absolute()))
        .or_else(|| Some(PathBuf::from("/etc/xdg")))
}

/// Fixed directories, mostly for tests and embedding
#[derive(Debug, Clone)]
pub struct FixedDirs {
    pub user: PathBuf,
    pub global: PathBuf,
}

impl DirectoryProvider for FixedDirs {
    fn user_config_dir(&self, _app_name: &str) -> Option<PathBuf> {
        Some(self.user.clone())
    }

    fn global_config_dir(&self, _app_name: &str) -> Option<PathBuf> {
        Some(self.global.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_dirs_end_with_app_name() {
        let dirs = PlatformDirs;
        if let Some(user) = dirs.user_config_dir("ked") {
            assert!(user.ends_with("ked"));
        }
        let global = dirs.global_config_dir("ked").unwrap();
        assert!(global.ends_with("ked"));
        assert!(global.is_absolute());
    }

    #[test]
    fn test_fixed_dirs() {
        let dirs = FixedDirs {
            user: PathBuf::from("/tmp/u"),
            global: PathBuf::from("/tmp/g"),
        };
        assert_eq!(dirs.user_config_dir("ked"), Some(PathBuf::from("/tmp/u")));
        assert_eq!(dirs.global_config_dir("ked"), Some(PathBuf::from("/tmp/g")));
    }
}
