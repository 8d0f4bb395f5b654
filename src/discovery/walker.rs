//! Recursive directory walking.

use std::path::{Path, PathBuf};
use tracing::{trace, warn};
use walkdir::WalkDir;

/// Configuration for directory walking.
#[derive(Debug, Clone, Default)]
pub struct WalkConfig {
    /// Maximum depth to traverse. None means unlimited.
    pub max_depth: Option<usize>,
    /// Whether to follow symbolic links.
    pub follow_symlinks: bool,
}

impl WalkConfig {
    /// Set maximum depth.
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Set whether to follow symlinks.
    pub fn with_follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }
}

/// Walks a directory tree and yields every regular file in it.
#[derive(Debug, Clone, Default)]
pub struct DirectoryWalker {
    config: WalkConfig,
}

impl DirectoryWalker {
    /// Create a new DirectoryWalker with the given configuration.
    pub fn new(config: WalkConfig) -> Self {
        Self { config }
    }

    /// Walk `dir` and return the regular files found beneath it.
    ///
    /// Entries that cannot be read are logged and skipped; anything that is
    /// neither a directory nor a regular file (symlinks when not followed,
    /// sockets, devices, fifos) is ignored.
    pub fn walk<'a>(&'a self, dir: &'a Path) -> impl Iterator<Item = PathBuf> + 'a {
        let mut walker = WalkDir::new(dir).follow_links(self.config.follow_symlinks);

        if let Some(depth) = self.config.max_depth {
            walker = walker.max_depth(depth);
        }

        walker
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!("Skipping unreadable entry under {}: {}", dir.display(), e);
                    None
                }
            })
            .filter(|e| {
                let is_file = e.file_type().is_file();
                if !is_file && !e.file_type().is_dir() {
                    trace!(path = %e.path().display(), "Skipping non-regular entry");
                }
                is_file
            })
            .map(|e| e.into_path())
    }
}
