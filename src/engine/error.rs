//! Scan engine error types.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Failure of a single engine call.
///
/// During initialization this is fatal; during the scan loop it is recovered
/// for the one file it concerns.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("cannot connect to clamd at {address}: {source}")]
    Connect {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("operation timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    #[error("unexpected engine reply: {0}")]
    Protocol(String),

    #[error("engine reported an error: {0}")]
    Engine(String),

    #[error("failed to run {binary}: {source}")]
    Spawn {
        binary: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{binary} {}: {stderr}", describe_exit(.code))]
    UnexpectedExit {
        binary: PathBuf,
        code: Option<i32>,
        stderr: String,
    },

    #[error("no scan engine is active")]
    Unavailable,
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exited with status {code}"),
        None => "was terminated by a signal".to_string(),
    }
}
