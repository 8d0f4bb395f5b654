//! Scan engine layer.
//!
//! The orchestrator only sees the [`ScanEngine`] trait. This module provides
//! the two ClamAV backends and the factory that picks one at startup:
//! - `clamd`: streams files to a running daemon (`zINSTREAM`)
//! - `clamscan`: runs the standalone binary per file

pub mod clamd;
pub mod clamscan;
pub mod error;
pub mod settings;
pub mod traits;

pub use clamd::{ClamdAddress, ClamdEngine};
pub use clamscan::ClamscanEngine;
pub use error::EngineError;
pub use settings::{ClamdSettings, ClamscanSettings, EngineSettings, Preference};
pub use traits::{ScanEngine, ScanVerdict};

use std::sync::Arc;
use tracing::{info, warn};

/// Build the configured engine and verify it responds.
///
/// Active backends are tried in preference order; the first one that answers
/// a ping is returned. If none do, the last failure is returned.
pub async fn build_engine(settings: &EngineSettings) -> Result<Arc<dyn ScanEngine>, EngineError> {
    let clamd = settings
        .clamd
        .active
        .then(|| Arc::new(ClamdEngine::from_settings(&settings.clamd)) as Arc<dyn ScanEngine>);
    let clamscan = settings
        .clamscan
        .active
        .then(|| Arc::new(ClamscanEngine::from_settings(&settings.clamscan)) as Arc<dyn ScanEngine>);

    let candidates = match settings.preference {
        Preference::Clamdscan => [clamd, clamscan],
        Preference::Clamscan => [clamscan, clamd],
    };

    let mut last_error = EngineError::Unavailable;
    for engine in candidates.into_iter().flatten() {
        match engine.ping().await {
            Ok(()) => {
                info!("Using {} scan engine", engine.name());
                return Ok(engine);
            }
            Err(e) => {
                warn!("{} scan engine unavailable: {}", engine.name(), e);
                last_error = e;
            }
        }
    }
    Err(last_error)
}
