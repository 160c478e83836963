//! Directory listing and file measurement.

use std::fs::{self, DirEntry, FileType};
use std::path::{Path, PathBuf};

use dirtally_core::{AccessError, WalkConfig};

/// Source of directory listings and file lengths.
///
/// Implementations report failures as [`AccessError`]; the walk context
/// decides how to contain them. Listings must only return immediate children
/// and must never include symlinks, so a walk cannot loop.
pub trait PathAccessor: Send + Sync {
    /// Immediate regular files of `dir`.
    fn list_files(&self, dir: &Path) -> Result<Vec<PathBuf>, AccessError>;

    /// Immediate subdirectories of `dir`.
    fn list_subdirectories(&self, dir: &Path) -> Result<Vec<PathBuf>, AccessError>;

    /// Length in bytes of the file at `path`.
    fn file_length(&self, path: &Path) -> Result<u64, AccessError>;
}

/// [`PathAccessor`] backed by the local filesystem.
#[derive(Debug, Clone, Default)]
pub struct LocalFs {
    include_hidden: bool,
}

impl LocalFs {
    /// Create an accessor that skips hidden entries.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an accessor following the hidden-entry policy of `config`.
    pub fn from_config(config: &WalkConfig) -> Self {
        Self {
            include_hidden: config.include_hidden,
        }
    }

    /// Why `entry` is left out of every listing, if it is.
    fn skip_reason(&self, entry: &DirEntry, file_type: &FileType) -> Option<&'static str> {
        if file_type.is_symlink() {
            Some("symlink")
        } else if is_reparse_point(entry) {
            Some("reparse point")
        } else if !self.include_hidden && is_hidden(entry) {
            Some("hidden")
        } else {
            None
        }
    }

    /// Read `dir` once and keep the entries whose type passes `keep`.
    fn list(&self, dir: &Path, keep: impl Fn(&FileType) -> bool) -> Result<Vec<PathBuf>, AccessError> {
        let entries = fs::read_dir(dir).map_err(|e| AccessError::io(dir, e))?;

        let mut paths = Vec::new();
        for entry in entries {
            let entry = match entry {
                Ok(e) => e,
                Err(err) => {
                    tracing::trace!(dir = %dir.display(), error = %err, "skipping unreadable entry");
                    continue;
                }
            };

            // DirEntry::file_type does not follow symlinks
            let file_type = match entry.file_type() {
                Ok(t) => t,
                Err(err) => {
                    tracing::trace!(
                        path = %entry.path().display(),
                        error = %err,
                        "skipping entry with unknown type"
                    );
                    continue;
                }
            };
            if let Some(reason) = self.skip_reason(&entry, &file_type) {
                tracing::trace!(path = %entry.path().display(), reason, "skipping entry");
                continue;
            }
            if keep(&file_type) {
                paths.push(entry.path());
            }
        }

        Ok(paths)
    }
}

impl PathAccessor for LocalFs {
    fn list_files(&self, dir: &Path) -> Result<Vec<PathBuf>, AccessError> {
        self.list(dir, FileType::is_file)
    }

    fn list_subdirectories(&self, dir: &Path) -> Result<Vec<PathBuf>, AccessError> {
        self.list(dir, FileType::is_dir)
    }

    fn file_length(&self, path: &Path) -> Result<u64, AccessError> {
        fs::symlink_metadata(path)
            .map(|m| m.len())
            .map_err(|e| AccessError::io(path, e))
    }
}

// Cross-platform entry helpers

/// Check if an entry is hidden.
#[cfg(windows)]
fn is_hidden(entry: &DirEntry) -> bool {
    use std::os::windows::fs::MetadataExt;
    const FILE_ATTRIBUTE_HIDDEN: u32 = 0x2;

    entry
        .metadata()
        .map(|m| m.file_attributes() & FILE_ATTRIBUTE_HIDDEN != 0)
        .unwrap_or(false)
        || entry.file_name().to_string_lossy().starts_with('.')
}

#[cfg(not(windows))]
fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().to_string_lossy().starts_with('.')
}

/// Check if an entry is a reparse point (junctions and the like).
#[cfg(windows)]
fn is_reparse_point(entry: &DirEntry) -> bool {
    use std::os::windows::fs::MetadataExt;
    const FILE_ATTRIBUTE_REPARSE_POINT: u32 = 0x400;

    entry
        .metadata()
        .map(|m| m.file_attributes() & FILE_ATTRIBUTE_REPARSE_POINT != 0)
        .unwrap_or(false)
}

#[cfg(not(windows))]
fn is_reparse_point(_entry: &DirEntry) -> bool {
    false // Symlinks already cover this on Unix
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sorted_names(paths: Vec<PathBuf>) -> Vec<String> {
        let mut names: Vec<String> = paths
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_lists_files_and_dirs_separately() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("sub")).unwrap();
        fs::write(temp.path().join("a.txt"), "aaa").unwrap();
        fs::write(temp.path().join("b.png"), "bb").unwrap();

        let fs_access = LocalFs::new();
        let files = fs_access.list_files(temp.path()).unwrap();
        let dirs = fs_access.list_subdirectories(temp.path()).unwrap();

        assert_eq!(sorted_names(files), vec!["a.txt", "b.png"]);
        assert_eq!(sorted_names(dirs), vec!["sub"]);
    }

    #[test]
    fn test_hidden_entries_policy() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join(".cache")).unwrap();
        fs::write(temp.path().join(".secret.jpg"), "x").unwrap();
        fs::write(temp.path().join("shown.jpg"), "x").unwrap();

        let default = LocalFs::new();
        assert_eq!(sorted_names(default.list_files(temp.path()).unwrap()), vec!["shown.jpg"]);
        assert!(default.list_subdirectories(temp.path()).unwrap().is_empty());

        let config = WalkConfig::builder()
            .root(temp.path())
            .include_hidden(true)
            .build()
            .unwrap();
        let with_hidden = LocalFs::from_config(&config);
        assert_eq!(with_hidden.list_files(temp.path()).unwrap().len(), 2);
        assert_eq!(with_hidden.list_subdirectories(temp.path()).unwrap().len(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinks_are_excluded() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("real")).unwrap();
        fs::write(temp.path().join("real/file.txt"), "data").unwrap();
        std::os::unix::fs::symlink(temp.path().join("real"), temp.path().join("loop")).unwrap();
        std::os::unix::fs::symlink(temp.path().join("real/file.txt"), temp.path().join("link.txt"))
            .unwrap();

        let fs_access = LocalFs::new();
        assert_eq!(sorted_names(fs_access.list_subdirectories(temp.path()).unwrap()), vec!["real"]);
        assert!(fs_access.list_files(temp.path()).unwrap().is_empty());
    }

    #[test]
    fn test_skip_reasons() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(".hidden"), "x").unwrap();
        fs::write(temp.path().join("plain.txt"), "x").unwrap();
        #[cfg(unix)]
        std::os::unix::fs::symlink(temp.path().join("plain.txt"), temp.path().join("link.txt"))
            .unwrap();

        let default = LocalFs::new();
        let with_hidden = LocalFs { include_hidden: true };
        for entry in fs::read_dir(temp.path()).unwrap() {
            let entry = entry.unwrap();
            let file_type = entry.file_type().unwrap();
            let name = entry.file_name().to_string_lossy().to_string();
            let (expected, expected_with_hidden) = match name.as_str() {
                ".hidden" => (Some("hidden"), None),
                "link.txt" => (Some("symlink"), Some("symlink")),
                _ => (None, None),
            };
            assert_eq!(default.skip_reason(&entry, &file_type), expected, "{name}");
            assert_eq!(
                with_hidden.skip_reason(&entry, &file_type),
                expected_with_hidden,
                "{name}"
            );
        }
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope");

        let err = LocalFs::new().list_files(&missing).unwrap_err();
        assert!(matches!(err, AccessError::Vanished { .. }));
    }

    #[test]
    fn test_file_length() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("ten.bin");
        fs::write(&path, [0u8; 10]).unwrap();

        let fs_access = LocalFs::new();
        assert_eq!(fs_access.file_length(&path).unwrap(), 10);

        fs::remove_file(&path).unwrap();
        assert!(matches!(
            fs_access.file_length(&path),
            Err(AccessError::Vanished { .. })
        ));
    }
}
