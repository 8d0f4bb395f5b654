//! CLI command handlers.
//!
//! Kept apart from main.rs so the process flow can be unit tested.

mod scan;

use crate::orchestrator::RunSummary;
use std::process::ExitCode;

pub use scan::{format_summary, resolve_config, run_sweep};

/// How a sweep ended, as seen by the shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepExit {
    /// Completed with no infected files, including an empty run.
    Clean,
    /// Completed and at least one file was infected.
    Infected,
    /// Could not start: usage, config, engine init or fatal I/O.
    Fatal,
}

impl SweepExit {
    pub fn code(self) -> u8 {
        match self {
            Self::Clean => 0,
            Self::Infected => 1,
            Self::Fatal => 2,
        }
    }
}

impl From<&RunSummary> for SweepExit {
    fn from(summary: &RunSummary) -> Self {
        if summary.passed() {
            Self::Clean
        } else {
            Self::Infected
        }
    }
}

impl From<SweepExit> for ExitCode {
    fn from(exit: SweepExit) -> Self {
        ExitCode::from(exit.code())
    }
}
