use crate::orchestrator::RunSummary;
use crate::remediation::RemediationOutcome;
use crate::reporter::Reporter;
use colored::Colorize;

pub struct TerminalReporter {
    verbose: bool,
}

impl TerminalReporter {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    fn outcome_label(outcome: &RemediationOutcome) -> String {
        match outcome {
            RemediationOutcome::Moved(dest) => {
                format!("{} {}", "quarantined ->".yellow(), dest.display())
            }
            RemediationOutcome::Deleted => "removed".red().to_string(),
            RemediationOutcome::Skipped => "left in place".dimmed().to_string(),
            RemediationOutcome::Failed(reason) => {
                format!("{} {}", "remediation failed:".red().bold(), reason)
            }
        }
    }
}

impl Reporter for TerminalReporter {
    fn report(&self, summary: &RunSummary) -> String {
        let mut output = String::new();

        if !summary.infected_files.is_empty() {
            output.push_str(&format!("{}\n", "Infected files:".red().bold()));
            for file in &summary.infected_files {
                let viruses = if file.viruses.is_empty() {
                    "(unnamed)".to_string()
                } else {
                    file.viruses.join(", ")
                };
                output.push_str(&format!("  {} {}\n", file.path, viruses.red()));
                for outcome in file.remediation.outcomes() {
                    output.push_str(&format!("      {}\n", Self::outcome_label(outcome)));
                }
            }
            output.push('\n');
        }

        let status = if summary.passed() {
            "CLEAN".green().bold()
        } else {
            "INFECTED".red().bold()
        };

        output.push_str(&format!(
            "Result: {} ({} scanned, {} clean, {} infected, {} errors)\n",
            status, summary.total, summary.clean, summary.infected, summary.errors
        ));

        if summary.quarantined > 0 || summary.removed > 0 || summary.remediation_failures > 0 {
            output.push_str(&format!(
                "Remediation: {} quarantined, {} removed, {} failed\n",
                summary.quarantined, summary.removed, summary.remediation_failures
            ));
        }

        if self.verbose {
            output.push_str(&format!("Elapsed: {} ms\n", summary.duration_ms));
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orchestrator::{FileReport, FileStatus, SummaryBuilder};
    use crate::remediation::RemediationReport;
    use crate::types::ScanTarget;

    #[test]
    fn test_clean_summary() {
        colored::control::set_override(false);
        let mut builder = SummaryBuilder::new();
        builder.record(&FileReport {
            target: ScanTarget::unchecked("/srv/a.txt"),
            status: FileStatus::Clean,
        });

        let output = TerminalReporter::new(false).report(&builder.build());

        assert!(output.contains("Result: CLEAN (1 scanned, 1 clean, 0 infected, 0 errors)"));
        assert!(!output.contains("Infected files"));
        assert!(!output.contains("Elapsed"));
    }

    #[test]
    fn test_infected_summary_lists_files() {
        colored::control::set_override(false);
        let mut builder = SummaryBuilder::new();
        builder.record(&FileReport {
            target: ScanTarget::unchecked("/srv/a.txt"),
            status: FileStatus::Infected {
                viruses: Vec::new(),
                remediation: RemediationReport::default(),
            },
        });

        let output = TerminalReporter::new(true).report(&builder.build());

        assert!(output.contains("Infected files:"));
        assert!(output.contains("/srv/a.txt (unnamed)"));
        assert!(output.contains("Result: INFECTED"));
        assert!(output.contains("Elapsed:"));
    }
}
