//! Scan mode handler.

use crate::config::{Config, EffectiveConfig};
use crate::discovery::FileCollector;
use crate::engine::build_engine;
use crate::error::{Result, SweepError};
use crate::handlers::SweepExit;
use crate::logging::{Verbosity, setup_logging};
use crate::orchestrator::{RunSummary, ScanOrchestrator, SummaryBuilder};
use crate::remediation::{RemediationManager, ensure_quarantine_dir};
use crate::reporter::{Reporter, json::JsonReporter, terminal::TerminalReporter};
use crate::{Cli, OutputFormat};
use std::io::IsTerminal;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{debug, error, info};

/// Resolve the configuration layers for this invocation.
pub fn resolve_config(cli: &Cli) -> Result<EffectiveConfig> {
    let file = Config::load(cli.config.as_deref(), Path::new("."))?;
    let env = Config::from_env()?;
    Ok(EffectiveConfig::resolve(cli.to_config_layer(), env, file)?)
}

/// Run a full sweep and map the outcome to an exit code.
pub async fn run_sweep(cli: &Cli) -> ExitCode {
    let verbosity = Verbosity::from_flags(cli.quiet, cli.verbose);

    if let Err(e) = ensure_targets(cli) {
        let _ = setup_logging(verbosity, None);
        error!("{}", e);
        return SweepExit::Fatal.into();
    }

    let config = match resolve_config(cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return SweepExit::Fatal.into();
        }
    };

    if let Err(e) = setup_logging(verbosity, config.log_dir.as_deref()) {
        eprintln!("Error: {}", e);
        return SweepExit::Fatal.into();
    }

    match sweep(cli, &config).await {
        Ok(summary) => {
            println!("{}", format_summary(cli, &summary));
            SweepExit::from(&summary).into()
        }
        Err(e) => {
            error!("{}", e);
            SweepExit::Fatal.into()
        }
    }
}

/// Refuse to start without any file or directory argument.
fn ensure_targets(cli: &Cli) -> Result<()> {
    if cli.has_no_targets() {
        return Err(SweepError::Usage);
    }
    Ok(())
}

async fn sweep(cli: &Cli, config: &EffectiveConfig) -> Result<RunSummary> {
    let work_set =
        FileCollector::new(config.walk.clone()).collect(&cli.files, &cli.directories);
    debug!(targets = work_set.len(), "Collection finished");

    if config.run.quarantine {
        ensure_quarantine_dir(&config.run.quarantine_dir)?;
    }

    if work_set.is_empty() {
        info!("No valid files found to scan.");
        info!("Scan completed.");
        return Ok(SummaryBuilder::new().build());
    }

    let engine = build_engine(&config.engine)
        .await
        .map_err(SweepError::EngineInit)?;
    let remediation = Arc::new(RemediationManager::new(&config.run));

    let orchestrator = ScanOrchestrator::new(engine, remediation)
        .with_jobs(config.run.jobs)
        .with_progress(show_progress(cli));

    Ok(orchestrator.run(work_set).await)
}

/// The progress bar replaces per-file log lines, so it is only drawn when
/// those are quieted and stderr is interactive.
fn show_progress(cli: &Cli) -> bool {
    cli.quiet && !cli.ci && std::io::stderr().is_terminal()
}

/// Render the summary in the requested format.
pub fn format_summary(cli: &Cli, summary: &RunSummary) -> String {
    match cli.format {
        OutputFormat::Terminal => TerminalReporter::new(cli.verbose > 0).report(summary),
        OutputFormat::Json => JsonReporter::new().report(summary),
    }
}
