//! Builds the work set from file and directory arguments.

use super::walker::{DirectoryWalker, WalkConfig};
use super::workset::WorkSet;
use crate::types::{ScanTarget, existing_directory, resolve_path};
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, warn};

/// Collects scan targets from explicit files and recursively walked directories.
#[derive(Debug, Clone, Default)]
pub struct FileCollector {
    walker: DirectoryWalker,
}

impl FileCollector {
    pub fn new(config: WalkConfig) -> Self {
        Self {
            walker: DirectoryWalker::new(config),
        }
    }

    /// Resolve every argument and merge the results into one deduplicated set.
    ///
    /// A missing or wrong-type argument is logged as a warning and skipped;
    /// it never prevents the remaining arguments from being collected.
    pub fn collect<F, D>(&self, files: &[F], directories: &[D]) -> WorkSet
    where
        F: AsRef<Path>,
        D: AsRef<Path>,
    {
        let mut collected: HashSet<ScanTarget> = HashSet::new();

        for file in files {
            match ScanTarget::file(file) {
                Ok(target) => {
                    collected.insert(target);
                }
                Err(_) => warn!(
                    "File not found or is not a file: {}",
                    resolve_path(file).display()
                ),
            }
        }

        for dir in directories {
            match existing_directory(dir) {
                Ok(abs_dir) => {
                    let before = collected.len();
                    collected.extend(self.walker.walk(&abs_dir).map(ScanTarget::unchecked));
                    debug!(
                        dir = %abs_dir.display(),
                        added = collected.len() - before,
                        "Collected directory"
                    );
                }
                Err(_) => warn!(
                    "Directory not found or is not a directory: {}",
                    resolve_path(dir).display()
                ),
            }
        }

        collected.into_iter().collect()
    }
}

/// Collect with the default walker (unbounded depth, symlinks not followed).
pub fn collect<F, D>(files: &[F], directories: &[D]) -> WorkSet
where
    F: AsRef<Path>,
    D: AsRef<Path>,
{
    FileCollector::default().collect(files, directories)
}
