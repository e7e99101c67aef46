//! Reading and writing backing files
//!
//! Reads go through the plain `toml` parser. Writes go through `toml_edit` so
//! comments, blank lines and key order written by hand survive a rewrite.

use crate::error::{Error, Result};
use log::{debug, trace};
use std::io::Write;
use std::path::{Path, PathBuf};
use toml_edit::DocumentMut;

const BOM: char = '\u{feff}';

/// A settings file loaded for editing
#[derive(Debug, Clone, Default)]
pub struct EditableDocument {
    /// Format-preserving document
    pub document: DocumentMut,

    /// Whether the file started with a UTF-8 byte-order mark
    pub had_bom: bool,
}

/// TOML storage backend for settings files
#[derive(Debug, Clone, Copy, Default)]
pub struct TomlStorage;

impl TomlStorage {
    /// Read a file as text, tolerating a leading byte-order mark.
    ///
    /// Returns `Ok(None)` if the file does not exist.
    pub fn read_text(&self, path: &Path) -> Result<Option<(String, bool)>> {
        let bytes = match std::fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(Error::FileRead {
                    path: path.to_path_buf(),
                    source: e,
                });
            }
        };

        let text = String::from_utf8(bytes).map_err(|e| Error::Parse {
            path: path.to_path_buf(),
            reason: format!("file is not valid UTF-8: {e}"),
        })?;

        match text.strip_prefix(BOM) {
            Some(stripped) => Ok(Some((stripped.to_string(), true))),
            None => Ok(Some((text, false))),
        }
    }

    /// Load a settings file for reading.
    ///
    /// Returns `Ok(None)` if the file does not exist. A file that exists but
    /// cannot be parsed is an error.
    pub fn load(&self, path: &Path) -> Result<Option<toml::Table>> {
        let Some((text, _)) = self.read_text(path)? else {
            trace!("No settings file at {}", path.display());
            return Ok(None);
        };

        let table = toml::from_str::<toml::Table>(&text).map_err(|e| Error::Parse {
            path: path.to_path_buf(),
            reason: e.message().to_string(),
        })?;

        debug!("Loaded settings from {}", path.display());
        Ok(Some(table))
    }

    /// Parse text embedded in the program.
    ///
    /// `origin` names the source in parse errors.
    pub fn parse_embedded(&self, origin: &Path, text: &str) -> Result<toml::Table> {
        let text = text.strip_prefix(BOM).unwrap_or(text);
        toml::from_str::<toml::Table>(text).map_err(|e| Error::Parse {
            path: origin.to_path_buf(),
            reason: e.message().to_string(),
        })
    }

    /// Load a settings file for editing, keeping its formatting.
    ///
    /// A missing file loads as an empty document.
    pub fn load_editable(&self, path: &Path) -> Result<EditableDocument> {
        let Some((text, had_bom)) = self.read_text(path)? else {
            return Ok(EditableDocument::default());
        };

        let document = text.parse::<DocumentMut>().map_err(|e| Error::Parse {
            path: path.to_path_buf(),
            reason: e.message().to_string(),
        })?;

        Ok(EditableDocument { document, had_bom })
    }

    /// Create the parent directory and an empty file if `path` does not exist.
    ///
    /// An existing file is left untouched, including one created by another
    /// process while this runs.
    pub fn ensure_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| Error::DirectoryCreate {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        match std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
        {
            Ok(_) => debug!("Created empty settings file {}", path.display()),
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                trace!("Settings file {} already exists", path.display());
            }
            Err(e) => {
                return Err(Error::FileWrite {
                    path: path.to_path_buf(),
                    source: e,
                });
            }
        }

        Ok(())
    }

    /// Write an edited document back to `path`.
    ///
    /// Uses atomic write: the content goes to a temp file in the same
    /// directory which is then renamed over the target, so readers see either
    /// the old or the new file. Existing permissions are carried over.
    ///
    /// A symlinked `path` is written through: the link stays in place and the
    /// file it points to is replaced.
    pub fn save(&self, path: &Path, edited: &EditableDocument) -> Result<()> {
        let write_err = |source: std::io::Error| Error::FileWrite {
            path: path.to_path_buf(),
            source,
        };

        let target = resolve_symlink(path).map_err(write_err)?;
        let path = target.as_path();

        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut content = String::new();
        if edited.had_bom {
            content.push(BOM);
        }
        content.push_str(&edited.document.to_string());

        let mut temp = tempfile::NamedTempFile::new_in(parent).map_err(write_err)?;
        temp.write_all(content.as_bytes()).map_err(write_err)?;
        temp.as_file().sync_all().map_err(write_err)?;

        if let Ok(metadata) = std::fs::metadata(path) {
            temp.as_file()
                .set_permissions(metadata.permissions())
                .map_err(write_err)?;
        }

        temp.persist(path).map_err(|e| write_err(e.error))?;

        debug!("Wrote settings to {}", path.display());
        Ok(())
    }
}

/// Follow `path` to the file it names if it is a symlink.
///
/// A dangling link resolves to its target without requiring it to exist.
fn resolve_symlink(path: &Path) -> std::io::Result<PathBuf> {
    match std::fs::symlink_metadata(path) {
        Ok(metadata) if metadata.file_type().is_symlink() => {
            match std::fs::canonicalize(path) {
                Ok(target) => Ok(target),
                Err(_) => {
                    let link = std::fs::read_link(path)?;
                    let base = path.parent().unwrap_or_else(|| Path::new("."));
                    Ok(base.join(link))
                }
            }
        }
        _ => Ok(path.to_path_buf()),
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_load_missing_file() {
        let storage = TomlStorage;
        let dir = tempdir().unwrap();
        assert!(storage.load(&dir.path().join("settings.toml")).unwrap().is_none());
    }

    #[test]
    fn test_load_strips_bom() {
        let storage = TomlStorage;
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "\u{feff}[theme]\napp = \"global_theme\"\n").unwrap();

        let table = storage.load(&path).unwrap().unwrap();
        assert_eq!(table["theme"]["app"].as_str(), Some("global_theme"));
    }

    #[test]
    fn test_load_malformed_is_parse_error() {
        let storage = TomlStorage;
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "theme = \n").unwrap();

        let err = storage.load(&path).unwrap_err();
        assert!(matches!(err, Error::Parse { path: ref p, .. } if p == &path));
    }

    #[test]
    fn test_ensure_file_creates_parents() {
        let storage = TomlStorage;
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested/user/settings.toml");

        storage.ensure_file(&path).unwrap();
        assert!(path.is_file());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "");
    }

    #[test]
    fn test_editable_roundtrip_preserves_text() {
        let storage = TomlStorage;
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        let source = "# my settings\n\n[theme]\napp = \"dark\"   # aligned\n";
        std::fs::write(&path, source).unwrap();

        let edited = storage.load_editable(&path).unwrap();
        storage.save(&path, &edited).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), source);
    }

    #[test]
    fn test_save_keeps_bom() {
        let storage = TomlStorage;
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "\u{feff}a = 1\n").unwrap();

        let edited = storage.load_editable(&path).unwrap();
        assert!(edited.had_bom);
        storage.save(&path, &edited).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "\u{feff}a = 1\n");
    }

    #[cfg(unix)]
    #[test]
    fn test_save_keeps_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let storage = TomlStorage;
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "a = 1\n").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o644)).unwrap();

        let edited = storage.load_editable(&path).unwrap();
        storage.save(&path, &edited).unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o644);
    }

    #[cfg(unix)]
    #[test]
    fn test_save_writes_through_symlink() {
        let storage = TomlStorage;
        let dir = tempdir().unwrap();
        let real = dir.path().join("dotfiles/settings.toml");
        std::fs::create_dir_all(real.parent().unwrap()).unwrap();
        std::fs::write(&real, "# managed\n[theme]\napp = \"dark\"\n").unwrap();

        let link = dir.path().join("user/settings.toml");
        std::fs::create_dir_all(link.parent().unwrap()).unwrap();
        std::os::unix::fs::symlink(&real, &link).unwrap();

        let mut edited = storage.load_editable(&link).unwrap();
        edited.document["theme"]["app"] = toml_edit::value("light");
        storage.save(&link, &edited).unwrap();

        assert!(std::fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
        assert_eq!(
            std::fs::read_to_string(&real).unwrap(),
            "# managed\n[theme]\napp = \"light\"\n"
        );
        let leftovers: Vec<_> = std::fs::read_dir(link.parent().unwrap()).unwrap().collect();
        assert_eq!(leftovers.len(), 1);
    }

    #[test]
    fn test_ensure_file_keeps_existing_content() {
        let storage = TomlStorage;
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "a = 1\n").unwrap();

        storage.ensure_file(&path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "a = 1\n");
    }
}
