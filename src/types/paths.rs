//! Path resolution and the validated scan target newtype.

use serde::Serialize;
use std::fmt;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

/// Error type for path validation failures.
#[derive(Error, Debug, Clone)]
pub enum PathValidationError {
    #[error("Path not found: {0}")]
    NotFound(PathBuf),

    #[error("Path is not a file: {0}")]
    NotAFile(PathBuf),

    #[error("Path is not a directory: {0}")]
    NotADirectory(PathBuf),
}

/// Resolve a user-supplied path against the current working directory.
///
/// Purely lexical: `.` and `..` components are folded and nothing is read
/// from disk. If the working directory cannot be determined the path is
/// normalized as given.
pub fn resolve_path(path: impl AsRef<Path>) -> PathBuf {
    match std::env::current_dir() {
        Ok(cwd) => resolve_path_from(&cwd, path),
        Err(_) => normalize(path.as_ref()),
    }
}

/// Resolve `path` against an explicit `base` directory.
pub fn resolve_path_from(base: &Path, path: impl AsRef<Path>) -> PathBuf {
    let path = path.as_ref();
    if path.is_absolute() {
        normalize(path)
    } else {
        normalize(&base.join(path))
    }
}

fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                // `..` at the root stays at the root
                if !out.pop() && !out.has_root() {
                    out.push(Component::ParentDir);
                }
            }
            other => out.push(other),
        }
    }
    if out.as_os_str().is_empty() {
        out.push(Component::CurDir);
    }
    out
}

/// An absolute path to a regular file selected for scanning.
///
/// Identity is the resolved path, so two targets reached through different
/// arguments compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ScanTarget {
    path: PathBuf,
}

impl ScanTarget {
    /// Resolve `path` and validate that it is a regular file.
    ///
    /// Symlinks are not followed.
    pub fn file(path: impl AsRef<Path>) -> Result<Self, PathValidationError> {
        let path = resolve_path(path);
        let metadata =
            std::fs::symlink_metadata(&path).map_err(|_| PathValidationError::NotFound(path.clone()))?;
        if !metadata.file_type().is_file() {
            return Err(PathValidationError::NotAFile(path));
        }
        Ok(Self { path })
    }

    /// Create a ScanTarget without validation (for walker entries and tests).
    pub fn unchecked(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Get the underlying path reference.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the file name component if present.
    pub fn file_name(&self) -> Option<&std::ffi::OsStr> {
        self.path.file_name()
    }
}

impl AsRef<Path> for ScanTarget {
    fn as_ref(&self) -> &Path {
        &self.path
    }
}

impl fmt::Display for ScanTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}

/// Validate that `path` resolves to an existing directory.
pub fn existing_directory(path: impl AsRef<Path>) -> Result<PathBuf, PathValidationError> {
    let path = resolve_path(path);
    let metadata =
        std::fs::symlink_metadata(&path).map_err(|_| PathValidationError::NotFound(path.clone()))?;
    if !metadata.file_type().is_dir() {
        return Err(PathValidationError::NotADirectory(path));
    }
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_resolve_relative_path() {
        let resolved = resolve_path_from(Path::new("/srv/data"), "uploads/a.txt");
        assert_eq!(resolved, PathBuf::from("/srv/data/uploads/a.txt"));
    }

    #[test]
    fn test_resolve_absolute_path_ignores_base() {
        let resolved = resolve_path_from(Path::new("/srv/data"), "/tmp/a.txt");
        assert_eq!(resolved, PathBuf::from("/tmp/a.txt"));
    }

    #[test]
    fn test_resolve_folds_dot_components() {
        let resolved = resolve_path_from(Path::new("/srv/data"), "./d/../b.txt");
        assert_eq!(resolved, PathBuf::from("/srv/data/b.txt"));
    }

    #[test]
    fn test_resolve_parent_at_root_stays_at_root() {
        let resolved = resolve_path_from(Path::new("/"), "../../etc/hosts");
        assert_eq!(resolved, PathBuf::from("/etc/hosts"));
    }

    #[test]
    fn test_resolve_does_not_touch_disk() {
        let resolved = resolve_path_from(Path::new("/nonexistent/base"), "missing.txt");
        assert_eq!(resolved, PathBuf::from("/nonexistent/base/missing.txt"));
    }

    #[test]
    fn test_resolve_path_is_absolute() {
        assert!(resolve_path("some/relative/file").is_absolute());
    }

    #[test]
    fn test_scan_target_file() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("test.txt");
        fs::write(&file_path, "test").unwrap();

        let target = ScanTarget::file(&file_path).unwrap();
        assert_eq!(target.path(), file_path);
        assert_eq!(target.file_name().unwrap(), "test.txt");
    }

    #[test]
    fn test_scan_target_file_on_directory() {
        let dir = tempdir().unwrap();
        let result = ScanTarget::file(dir.path());
        assert!(matches!(result, Err(PathValidationError::NotAFile(_))));
    }

    #[test]
    fn test_scan_target_missing_file() {
        let result = ScanTarget::file("/nonexistent/path/12345");
        assert!(matches!(result, Err(PathValidationError::NotFound(_))));
    }

    #[cfg(unix)]
    #[test]
    fn test_scan_target_rejects_symlink() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("target.txt");
        let link = dir.path().join("link.txt");
        fs::write(&target, "content").unwrap();
        std::os::unix::fs::symlink(&target, &link).unwrap();

        assert!(matches!(
            ScanTarget::file(&link),
            Err(PathValidationError::NotAFile(_))
        ));
    }

    #[test]
    fn test_scan_target_equality_is_path_equality() {
        let a = ScanTarget::unchecked("/srv/a.txt");
        let b = ScanTarget::unchecked("/srv/a.txt");
        assert_eq!(a, b);
        assert_eq!(a.to_string(), "/srv/a.txt");
    }

    #[test]
    fn test_existing_directory() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("test.txt");
        fs::write(&file_path, "test").unwrap();

        assert!(existing_directory(dir.path()).is_ok());
        assert!(matches!(
            existing_directory(&file_path),
            Err(PathValidationError::NotADirectory(_))
        ));
        assert!(matches!(
            existing_directory(dir.path().join("missing")),
            Err(PathValidationError::NotFound(_))
        ));
    }
}
