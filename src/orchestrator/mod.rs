//! Scan orchestration: drives the engine over a work set and routes verdicts
//! to remediation.
//!
//! Each target ends in exactly one [`FileStatus`]. A failing scan or
//! remediation is logged and recorded for that file only; the loop always
//! visits every target before the completion marker is logged.

mod summary;

pub use summary::{FileReport, FileStatus, InfectedFile, RunSummary, SummaryBuilder};

use crate::discovery::WorkSet;
use crate::engine::ScanEngine;
use crate::remediation::{RemediationManager, RemediationOutcome};
use crate::reporter::ScanProgress;
use crate::types::ScanTarget;
use futures::StreamExt;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// Runs one sweep over a work set.
pub struct ScanOrchestrator {
    engine: Arc<dyn ScanEngine>,
    remediation: Arc<RemediationManager>,
    jobs: usize,
    show_progress: bool,
}

impl ScanOrchestrator {
    pub fn new(engine: Arc<dyn ScanEngine>, remediation: Arc<RemediationManager>) -> Self {
        Self {
            engine,
            remediation,
            jobs: 1,
            show_progress: false,
        }
    }

    /// Allow up to `jobs` scans in flight. Values below 1 are treated as 1.
    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs.max(1);
        self
    }

    /// Draw a progress bar while scanning.
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    /// Scan every target once and return the totals.
    pub async fn run(&self, work_set: WorkSet) -> RunSummary {
        let (reports, summary) = self.run_with_reports(work_set).await;
        debug!(reports = reports.len(), "Run finished");
        summary
    }

    /// Like [`run`](Self::run), but also returns the per-file reports.
    pub async fn run_with_reports(&self, work_set: WorkSet) -> (Vec<FileReport>, RunSummary) {
        let started = Instant::now();

        if work_set.is_empty() {
            info!("No valid files found to scan.");
            info!("Scan completed.");
            return (Vec::new(), SummaryBuilder::new().build());
        }

        let total = work_set.len();
        info!("Starting scan of {} file(s)...", total);
        let progress = ScanProgress::new(total, self.show_progress);

        let reports: Vec<FileReport> = futures::stream::iter(work_set)
            .map(|target| self.process(target))
            .buffer_unordered(self.jobs)
            .inspect(|_| progress.inc())
            .collect()
            .await;

        progress.finish();

        let mut builder = SummaryBuilder::new();
        for report in &reports {
            builder.record(report);
        }
        let summary = builder
            .with_duration_ms(started.elapsed().as_millis() as u64)
            .build();

        info!("Scan completed.");
        (reports, summary)
    }

    /// Which remediation step a failure belongs to. Quarantine runs first, so
    /// a failure before any move is the quarantine step.
    fn failed_step(&self, moved: bool) -> &'static str {
        if self.remediation.quarantines() && !moved {
            "quarantine"
        } else {
            "remove"
        }
    }

    /// Scan one target and remediate it if infected.
    async fn process(&self, target: ScanTarget) -> FileReport {
        let verdict = match self.engine.scan(target.path()).await {
            Ok(verdict) => verdict,
            Err(e) => {
                error!("Error scanning {}: {}", target, e);
                return FileReport {
                    target,
                    status: FileStatus::Failed {
                        reason: e.to_string(),
                    },
                };
            }
        };

        if !verdict.infected {
            info!("{} is OK!", target);
            return FileReport {
                target,
                status: FileStatus::Clean,
            };
        }

        warn!(
            "{} IS INFECTED! Viruses: {}",
            target,
            verdict.joined_viruses()
        );

        let remediation = self.remediation.remediate(&target).await;
        let mut current = target.path().to_path_buf();
        let mut moved = false;
        for outcome in remediation.outcomes() {
            match outcome {
                RemediationOutcome::Moved(dest) => {
                    info!("Moved {} to quarantine.", target);
                    debug!(to = %dest.display(), "Quarantine destination");
                    current = dest.clone();
                    moved = true;
                }
                RemediationOutcome::Deleted => {
                    info!("Removed infected file: {}", current.display());
                }
                RemediationOutcome::Skipped => {
                    debug!(path = %target, "No remediation configured");
                }
                RemediationOutcome::Failed(reason) => {
                    error!(
                        "Failed to {} {}: {}",
                        self.failed_step(moved),
                        target,
                        reason
                    );
                }
            }
        }

        FileReport {
            target,
            status: FileStatus::Infected {
                viruses: verdict.viruses,
                remediation,
            },
        }
    }
}
