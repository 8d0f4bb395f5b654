//! Per-file reports and the run summary built from them.

use crate::remediation::RemediationReport;
use crate::types::ScanTarget;
use serde::Serialize;

/// Terminal state of one target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum FileStatus {
    Clean,
    Infected {
        viruses: Vec<String>,
        remediation: RemediationReport,
    },
    Failed {
        reason: String,
    },
}

/// Outcome of processing one target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileReport {
    pub target: ScanTarget,
    #[serde(flatten)]
    pub status: FileStatus,
}

/// An infected file as listed in the summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InfectedFile {
    pub path: ScanTarget,
    pub viruses: Vec<String>,
    pub remediation: RemediationReport,
}

/// Totals for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// Targets that reached a terminal state.
    pub total: usize,
    pub clean: usize,
    pub infected: usize,
    /// Targets whose scan call failed.
    pub errors: usize,
    pub quarantined: usize,
    pub removed: usize,
    pub remediation_failures: usize,
    pub duration_ms: u64,
    pub infected_files: Vec<InfectedFile>,
}

impl RunSummary {
    /// True when every target scanned clean.
    pub fn passed(&self) -> bool {
        self.infected == 0
    }
}

/// Builder for creating run summaries.
#[derive(Debug, Default)]
pub struct SummaryBuilder {
    summary: RunSummary,
}

impl SummaryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one file report into the totals.
    pub fn record(&mut self, report: &FileReport) {
        self.summary.total += 1;
        match &report.status {
            FileStatus::Clean => self.summary.clean += 1,
            FileStatus::Failed { .. } => self.summary.errors += 1,
            FileStatus::Infected {
                viruses,
                remediation,
            } => {
                self.summary.infected += 1;
                if remediation.quarantined_to().is_some() {
                    self.summary.quarantined += 1;
                }
                if remediation.deleted() {
                    self.summary.removed += 1;
                }
                if remediation.failed() {
                    self.summary.remediation_failures += 1;
                }
                self.summary.infected_files.push(InfectedFile {
                    path: report.target.clone(),
                    viruses: viruses.clone(),
                    remediation: remediation.clone(),
                });
            }
        }
    }

    /// Set the run duration in milliseconds.
    pub fn with_duration_ms(mut self, duration: u64) -> Self {
        self.summary.duration_ms = duration;
        self
    }

    /// Build the summary. Infected files are sorted by path for stable output.
    pub fn build(mut self) -> RunSummary {
        self.summary.infected_files.sort_by(|a, b| a.path.cmp(&b.path));
        self.summary
    }
}
