use crate::config::Config;
use clap::{ArgAction, Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Terminal,
    Json,
}

#[derive(Parser, Debug)]
#[command(
    name = "clamsweep",
    version,
    about = "Scan files and directories with ClamAV and remediate infected files",
    long_about = "clamsweep collects files from the given paths, scans each one once with clamd or clamscan, and optionally quarantines or removes infected files."
)]
pub struct Cli {
    /// Files to scan
    #[arg(short, long, num_args = 1.., value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Directories to scan recursively
    #[arg(short, long, num_args = 1.., value_name = "DIR")]
    pub directories: Vec<PathBuf>,

    /// Move infected files to the quarantine directory
    #[arg(short, long)]
    pub quarantine: bool,

    /// Delete infected files (after quarantining, when both are set)
    #[arg(short, long)]
    pub remove: bool,

    /// Quarantine directory [default: ./quarantine]
    #[arg(long, value_name = "DIR")]
    pub quarantine_dir: Option<PathBuf>,

    /// Path to a config file (yaml, json or toml)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Maximum number of files scanned concurrently [default: 1]
    #[arg(short, long, value_name = "N")]
    pub jobs: Option<usize>,

    /// Summary output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Terminal)]
    pub format: OutputFormat,

    /// Also append log output to <DIR>/scan.log
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    /// Follow symbolic links while walking directories
    #[arg(long)]
    pub follow_symlinks: bool,

    /// CI mode: non-interactive output
    #[arg(long)]
    pub ci: bool,

    /// Verbose output (repeat for more)
    #[arg(short, long, action = ArgAction::Count, conflicts_with = "quiet")]
    pub verbose: u8,

    /// Only log errors
    #[arg(long)]
    pub quiet: bool,
}

impl Cli {
    /// True when neither files nor directories were given.
    pub fn has_no_targets(&self) -> bool {
        self.files.is_empty() && self.directories.is_empty()
    }

    /// The CLI as a configuration layer.
    ///
    /// Boolean switches only override lower layers when they are set.
    pub fn to_config_layer(&self) -> Config {
        Config {
            quarantine: self.quarantine.then_some(true),
            remove: self.remove.then_some(true),
            quarantine_dir: self.quarantine_dir.clone(),
            log_dir: self.log_dir.clone(),
            jobs: self.jobs,
            follow_symlinks: self.follow_symlinks.then_some(true),
            ..Config::default()
        }
    }
}
