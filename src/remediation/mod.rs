//! Post-detection actions: quarantine, removal, or nothing.
//!
//! With both actions enabled the file is quarantined first and the removal
//! then targets the quarantined copy, so the net effect is a delete.

mod quarantine;

pub use quarantine::{Quarantine, ensure_quarantine_dir};

use crate::config::RunConfig;
use crate::error::{IoOperation, SweepError};
use crate::types::ScanTarget;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Result of one remediation step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", content = "detail", rename_all = "lowercase")]
pub enum RemediationOutcome {
    /// Moved into quarantine at the given path.
    Moved(PathBuf),
    /// Deleted from disk.
    Deleted,
    /// No action configured; the file was left in place.
    Skipped,
    /// The step failed with the given reason.
    Failed(String),
}

/// Ordered outcomes of remediating one target.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RemediationReport {
    outcomes: Vec<RemediationOutcome>,
}

impl RemediationReport {
    pub fn outcomes(&self) -> &[RemediationOutcome] {
        &self.outcomes
    }

    /// Quarantine destination, if the file was moved.
    pub fn quarantined_to(&self) -> Option<&Path> {
        self.outcomes.iter().find_map(|o| match o {
            RemediationOutcome::Moved(dest) => Some(dest.as_path()),
            _ => None,
        })
    }

    pub fn deleted(&self) -> bool {
        self.outcomes.contains(&RemediationOutcome::Deleted)
    }

    pub fn failed(&self) -> bool {
        self.outcomes
            .iter()
            .any(|o| matches!(o, RemediationOutcome::Failed(_)))
    }

    fn push(&mut self, outcome: RemediationOutcome) {
        self.outcomes.push(outcome);
    }
}

/// Applies the configured action to infected files.
#[derive(Debug)]
pub struct RemediationManager {
    quarantine: Option<Quarantine>,
    remove: bool,
}

impl RemediationManager {
    pub fn new(config: &RunConfig) -> Self {
        Self {
            quarantine: config
                .quarantine
                .then(|| Quarantine::new(config.quarantine_dir.clone())),
            remove: config.remove,
        }
    }

    pub fn quarantines(&self) -> bool {
        self.quarantine.is_some()
    }

    /// True when neither quarantine nor removal is configured.
    pub fn is_passive(&self) -> bool {
        self.quarantine.is_none() && !self.remove
    }

    /// Act on one infected target.
    ///
    /// A failed quarantine ends the attempt; removal is not tried afterwards.
    pub async fn remediate(&self, target: &ScanTarget) -> RemediationReport {
        let mut report = RemediationReport::default();

        if self.is_passive() {
            report.push(RemediationOutcome::Skipped);
            return report;
        }

        let mut current = target.path().to_path_buf();

        if let Some(quarantine) = &self.quarantine {
            match quarantine.admit(target.path()).await {
                Ok(dest) => {
                    debug!(from = %target, to = %dest.display(), "Quarantined");
                    current = dest.clone();
                    report.push(RemediationOutcome::Moved(dest));
                }
                Err(e) => {
                    report.push(RemediationOutcome::Failed(e.to_string()));
                    return report;
                }
            }
        }

        if self.remove {
            match tokio::fs::remove_file(&current).await {
                Ok(()) => report.push(RemediationOutcome::Deleted),
                Err(e) => report.push(RemediationOutcome::Failed(
                    SweepError::io(IoOperation::Delete, &current, e).to_string(),
                )),
            }
        }

        report
    }
}
