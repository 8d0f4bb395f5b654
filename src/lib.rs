pub mod cli;
pub mod config;
pub mod discovery;
pub mod engine;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod orchestrator;
pub mod remediation;
pub mod reporter;
pub mod types;

#[cfg(test)]
pub mod test_utils;

pub use cli::{Cli, OutputFormat};
pub use config::{Config, ConfigError, EffectiveConfig, RunConfig};
pub use discovery::{FileCollector, WalkConfig, WorkSet, collect};
pub use engine::{EngineError, EngineSettings, ScanEngine, ScanVerdict, build_engine};
pub use error::{Result, SweepError};
pub use orchestrator::{FileReport, FileStatus, RunSummary, ScanOrchestrator};
pub use remediation::{RemediationManager, RemediationOutcome, RemediationReport};
pub use reporter::{Reporter, json::JsonReporter, terminal::TerminalReporter};
pub use types::{ScanTarget, resolve_path};
