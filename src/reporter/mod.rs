pub mod json;
pub mod progress;
pub mod terminal;

pub use progress::ScanProgress;

use crate::orchestrator::RunSummary;

pub trait Reporter {
    fn report(&self, summary: &RunSummary) -> String;
}
