//! Quarantine directory management.

use crate::error::{IoOperation, Result, SweepError};
use std::collections::HashSet;
use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::info;

/// Create the quarantine directory (with parents) if it does not exist.
///
/// Returns true when the directory was created by this call.
pub fn ensure_quarantine_dir(dir: &Path) -> Result<bool> {
    if dir.is_dir() {
        return Ok(false);
    }
    std::fs::create_dir_all(dir).map_err(|e| SweepError::io(IoOperation::CreateDir, dir, e))?;
    info!("Created quarantine directory at {}", dir.display());
    Ok(true)
}

/// The quarantine namespace.
///
/// Destinations are reserved under a lock so concurrent scans never pick the
/// same path, and an existing quarantined file is never overwritten: a taken
/// name gets a numeric suffix (`a.txt`, `a.txt.1`, `a.txt.2`, ...).
#[derive(Debug)]
pub struct Quarantine {
    dir: PathBuf,
    reserved: Mutex<HashSet<PathBuf>>,
}

impl Quarantine {
    pub fn new(dir: PathBuf) -> Self {
        Self {
            dir,
            reserved: Mutex::new(HashSet::new()),
        }
    }

    /// Move `file` into quarantine and return its new path.
    pub async fn admit(&self, file: &Path) -> Result<PathBuf> {
        let dest = self.reserve(file)?;
        match move_file(file, &dest).await {
            Ok(()) => Ok(dest),
            Err(e) => {
                self.release(&dest);
                Err(e)
            }
        }
    }

    fn reserve(&self, file: &Path) -> Result<PathBuf> {
        let name = file.file_name().ok_or_else(|| {
            SweepError::io(
                IoOperation::Move,
                file,
                io::Error::new(io::ErrorKind::InvalidInput, "path has no file name"),
            )
        })?;

        let mut reserved = self
            .reserved
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let mut candidate = self.dir.join(name);
        let mut n = 0u32;
        while reserved.contains(&candidate) || candidate.symlink_metadata().is_ok() {
            n += 1;
            let mut numbered = OsString::from(name);
            numbered.push(format!(".{n}"));
            candidate = self.dir.join(numbered);
        }
        reserved.insert(candidate.clone());
        Ok(candidate)
    }

    fn release(&self, dest: &Path) {
        self.reserved
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .remove(dest);
    }
}

/// Rename `from` to `to`, copying across filesystems when rename cannot.
async fn move_file(from: &Path, to: &Path) -> Result<()> {
    match tokio::fs::rename(from, to).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::CrossesDevices => {
            tokio::fs::copy(from, to)
                .await
                .map_err(|e| SweepError::io(IoOperation::Copy, from, e))?;
            if let Err(e) = tokio::fs::remove_file(from).await {
                // Keep a single copy: the original stays where it was.
                let _ = tokio::fs::remove_file(to).await;
                return Err(SweepError::io(IoOperation::Move, from, e));
            }
            Ok(())
        }
        Err(e) => Err(SweepError::io(IoOperation::Move, from, e)),
    }
}
