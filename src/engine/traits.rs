//! The scan engine seam and its verdict type.

use super::error::EngineError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Result of scanning one file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanVerdict {
    /// Whether the engine considers the file infected.
    pub infected: bool,
    /// Detected threat names, in engine order. May be empty even when infected.
    pub viruses: Vec<String>,
}

impl ScanVerdict {
    pub fn clean() -> Self {
        Self::default()
    }

    pub fn infected(viruses: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            infected: true,
            viruses: viruses.into_iter().map(Into::into).collect(),
        }
    }

    /// Threat names joined for display; empty when none were named.
    pub fn joined_viruses(&self) -> String {
        self.viruses.join(", ")
    }
}

/// An external malware scanner.
///
/// Implementations are built once before the scan loop and shared across
/// concurrent scans, so they must be `Send + Sync`.
#[async_trait]
pub trait ScanEngine: Send + Sync {
    /// Short backend name for logs.
    fn name(&self) -> &str;

    /// Check that the engine is reachable and usable.
    async fn ping(&self) -> Result<(), EngineError>;

    /// Scan the file at `path`.
    async fn scan(&self, path: &Path) -> Result<ScanVerdict, EngineError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_joined_viruses() {
        let verdict = ScanVerdict::infected(["Eicar-Test-Signature", "Win.Test.Other"]);
        assert_eq!(
            verdict.joined_viruses(),
            "Eicar-Test-Signature, Win.Test.Other"
        );
    }

    #[test]
    fn test_infected_without_names() {
        let verdict = ScanVerdict::infected(Vec::<String>::new());
        assert!(verdict.infected);
        assert_eq!(verdict.joined_viruses(), "");
    }

    #[test]
    fn test_clean_verdict() {
        let verdict = ScanVerdict::clean();
        assert!(!verdict.infected);
        assert!(verdict.viruses.is_empty());
    }
}
