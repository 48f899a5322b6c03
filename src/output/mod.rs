//! Output formatting for reconciliation, health and migration results
//!
//! This module provides:
//! - Text output for human-readable display
//! - JSON output for machine processing
//! - Diff output for showing planned manifest changes

mod diff;
mod json;
mod text;

pub use diff::DiffFormatter;
pub use json::JsonFormatter;
pub use text::TextFormatter;

use crate::domain::{HealthReport, MigrationGuide, ReconciliationResult};
use crate::orchestrator::OrchestratorResult;
use std::io::Write;

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON output for machine processing
    Json,
    /// Unified diff of manifest changes
    Diff,
}

/// Output verbosity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Summary lines only
    Quiet,
    /// Normal output
    #[default]
    Normal,
    /// Adds comparisons, snippets and warnings
    Verbose,
}

/// Configuration for output formatting
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Output format (text, json, diff)
    pub format: OutputFormat,
    /// Verbosity level
    pub verbosity: Verbosity,
    /// Whether this is a dry-run
    pub dry_run: bool,
    /// Whether to use colors
    pub color: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            verbosity: Verbosity::default(),
            dry_run: false,
            color: true,
        }
    }
}

impl OutputConfig {
    /// Create configuration from CLI arguments
    pub fn from_cli(json: bool, diff: bool, verbose: bool, quiet: bool, dry_run: bool) -> Self {
        let format = if json {
            OutputFormat::Json
        } else if diff {
            OutputFormat::Diff
        } else {
            OutputFormat::Text
        };

        let verbosity = if quiet {
            Verbosity::Quiet
        } else if verbose {
            Verbosity::Verbose
        } else {
            Verbosity::Normal
        };

        Self {
            format,
            verbosity,
            dry_run,
            color: true,
        }
    }

    /// Disable colors (builder pattern)
    pub fn without_color(mut self) -> Self {
        self.color = false;
        self
    }
}

/// Trait for output formatters
pub trait OutputFormatter {
    /// Format and write one reconciliation
    fn format_reconciliation(
        &self,
        result: &ReconciliationResult,
        writer: &mut dyn Write,
    ) -> std::io::Result<()>;

    /// Format and write one health report
    fn format_health(&self, report: &HealthReport, writer: &mut dyn Write) -> std::io::Result<()>;

    /// Format and write one migration guide
    fn format_migration(&self, guide: &MigrationGuide, writer: &mut dyn Write)
        -> std::io::Result<()>;

    /// Format and write every project of an orchestrator run
    fn format(&self, result: &OrchestratorResult, writer: &mut dyn Write) -> std::io::Result<()> {
        match result {
            OrchestratorResult::Reconciled(results) => {
                for (i, r) in results.iter().enumerate() {
                    if i > 0 {
                        writeln!(writer)?;
                    }
                    self.format_reconciliation(r, writer)?;
                }
            }
            OrchestratorResult::Health(reports) => {
                for (i, r) in reports.iter().enumerate() {
                    if i > 0 {
                        writeln!(writer)?;
                    }
                    self.format_health(r, writer)?;
                }
            }
            OrchestratorResult::Migration(guides) => {
                for (i, g) in guides.iter().enumerate() {
                    if i > 0 {
                        writeln!(writer)?;
                    }
                    self.format_migration(g, writer)?;
                }
            }
        }
        Ok(())
    }
}

/// Create an output formatter based on configuration
pub fn create_formatter(config: OutputConfig) -> Box<dyn OutputFormatter> {
    match config.format {
        OutputFormat::Text => Box::new(TextFormatter::with_color(
            config.verbosity,
            config.dry_run,
            config.color,
        )),
        OutputFormat::Json => Box::new(JsonFormatter::new(config.verbosity)),
        OutputFormat::Diff => Box::new(DiffFormatter::new(config.dry_run)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_config_default() {
        let config = OutputConfig::default();
        assert_eq!(config.format, OutputFormat::Text);
        assert_eq!(config.verbosity, Verbosity::Normal);
        assert!(!config.dry_run);
        assert!(config.color);
    }

    #[test]
    fn test_output_config_from_cli_json_wins() {
        let config = OutputConfig::from_cli(true, true, false, false, false);
        assert_eq!(config.format, OutputFormat::Json);
    }

    #[test]
    fn test_output_config_from_cli_diff() {
        let config = OutputConfig::from_cli(false, true, false, false, true);
        assert_eq!(config.format, OutputFormat::Diff);
        assert!(config.dry_run);
    }

    #[test]
    fn test_output_config_quiet_beats_verbose() {
        let config = OutputConfig::from_cli(false, false, true, true, false);
        assert_eq!(config.verbosity, Verbosity::Quiet);

        let config = OutputConfig::from_cli(false, false, true, false, false);
        assert_eq!(config.verbosity, Verbosity::Verbose);
    }

    #[test]
    fn test_without_color() {
        assert!(!OutputConfig::default().without_color().color);
    }
}
