//! CLI argument parsing module for depmend

use crate::analysis::DeprecatedReporting;
use crate::config::ConfigFile;
use crate::domain::{DatabaseKind, Profile, TemplateCategory};
use crate::error::ConfigError;
use crate::orchestrator::ReconcileOptions;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Maven/Gradle dependency reconciliation for DBJavaGenix projects
#[derive(Parser, Debug, Clone)]
#[command(
    name = "depmend",
    version,
    about = "Maven/Gradle dependency reconciliation for DBJavaGenix projects"
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Report manifest health without modifying anything
    Check(CommonArgs),
    /// Add missing dependencies and migrate deprecated ones
    Fix(FixArgs),
    /// List deprecated dependencies and their replacements
    Migrate(CommonArgs),
}

/// Options shared by every subcommand
#[derive(Args, Debug, Clone)]
pub struct CommonArgs {
    /// Project directories (default: current directory)
    #[arg(default_value = ".")]
    pub paths: Vec<PathBuf>,

    // Profile
    /// Template category (Default, MybatisPlus, MybatisPlus-Mixed) [default: MybatisPlus-Mixed]
    #[arg(long)]
    pub template: Option<String>,

    /// Database kind (mysql, postgresql, sqlite) [default: mysql]
    #[arg(long)]
    pub database: Option<String>,

    /// Do not require Lombok
    #[arg(long)]
    pub no_lombok: bool,

    /// Do not require MapStruct
    #[arg(long)]
    pub no_mapstruct: bool,

    /// Do not require API-doc annotations
    #[arg(long)]
    pub no_docs: bool,

    /// Spring Boot version to use instead of the detected one
    #[arg(long, value_name = "VERSION")]
    pub framework_version: Option<String>,

    /// Report deprecated requirements even when the manifest does not declare them
    #[arg(long)]
    pub report_absent_deprecated: bool,

    /// Configuration file (default: depmend.toml in the first project)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    // Output
    /// Output results in JSON format
    #[arg(long)]
    pub json: bool,

    /// Enable verbose output
    #[arg(long)]
    pub verbose: bool,

    /// Enable quiet mode - minimal output
    #[arg(short, long)]
    pub quiet: bool,

    /// Log filter for stderr diagnostics (e.g. debug, depmend=trace)
    #[arg(long, value_name = "FILTER")]
    pub log_level: Option<String>,
}

/// Options of `fix`
#[derive(Args, Debug, Clone)]
pub struct FixArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Dry run mode - show what would change without writing
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Do not copy the manifest aside before writing
    #[arg(long)]
    pub no_backup: bool,

    /// Show changes in diff format
    #[arg(long)]
    pub diff: bool,
}

impl CliArgs {
    /// Options shared by every subcommand
    pub fn common(&self) -> &CommonArgs {
        match &self.command {
            Command::Check(common) | Command::Migrate(common) => common,
            Command::Fix(fix) => &fix.common,
        }
    }

    /// Whether this run only plans changes
    pub fn dry_run(&self) -> bool {
        matches!(&self.command, Command::Fix(fix) if fix.dry_run)
    }

    /// Whether diff output was asked for
    pub fn diff(&self) -> bool {
        matches!(&self.command, Command::Fix(fix) if fix.diff)
    }

    /// Rejects flag combinations that cannot be honoured together
    pub fn validate(&self) -> Result<(), ConfigError> {
        let common = self.common();
        if common.json && self.diff() {
            return Err(ConfigError::ConflictingOptions {
                message: "--json and --diff cannot be used together".to_string(),
            });
        }
        if common.quiet && common.verbose {
            return Err(ConfigError::ConflictingOptions {
                message: "--quiet and --verbose cannot be used together".to_string(),
            });
        }
        Ok(())
    }

    /// Tracing filter: `--log-level`, else `debug` with `--verbose`, else `warn`
    pub fn log_filter(&self) -> String {
        let common = self.common();
        match common.log_level {
            Some(ref level) => level.clone(),
            None if common.verbose => "debug".to_string(),
            None => "warn".to_string(),
        }
    }

    /// Profile from defaults, then the config file, then flags
    pub fn profile(&self, config: Option<&ConfigFile>) -> Profile {
        let common = self.common();
        let mut profile = Profile::default();
        if let Some(config) = config {
            config.apply_profile(&mut profile);
        }

        if let Some(ref template) = common.template {
            profile.category = TemplateCategory::parse(template);
        }
        if let Some(ref database) = common.database {
            profile.database = DatabaseKind::parse(database);
        }
        if common.no_lombok {
            profile.flags.lombok = false;
        }
        if common.no_mapstruct {
            profile.flags.mapstruct = false;
        }
        if common.no_docs {
            profile.flags.docs = false;
        }
        profile
    }

    /// Reconciliation options from defaults, then the config file, then flags
    pub fn reconcile_options(&self, config: Option<&ConfigFile>) -> ReconcileOptions {
        let common = self.common();
        let mut options = ReconcileOptions::default();
        if let Some(config) = config {
            config.apply_options(&mut options);
        }

        if let Some(ref version) = common.framework_version {
            options.framework_override = Some(version.clone());
        }
        if common.report_absent_deprecated {
            options.deprecated_reporting = DeprecatedReporting::Always;
        }
        if let Command::Fix(ref fix) = self.command {
            options.dry_run = fix.dry_run;
            if fix.no_backup {
                options.create_backup = false;
            }
        }
        options
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::path::Path;

    #[test]
    fn test_check_defaults() {
        let args = CliArgs::parse_from(["depmend", "check"]);
        let common = args.common();
        assert_eq!(common.paths, vec![PathBuf::from(".")]);
        assert!(common.template.is_none());
        assert!(!common.json);
        assert!(!args.dry_run());
        assert!(!args.diff());
        assert_eq!(args.log_filter(), "warn");
        assert_eq!(args.profile(None), Profile::default());
    }

    #[test]
    fn test_multiple_paths() {
        let args = CliArgs::parse_from(["depmend", "migrate", "svc-a", "svc-b"]);
        assert!(matches!(args.command, Command::Migrate(_)));
        assert_eq!(
            args.common().paths,
            vec![PathBuf::from("svc-a"), PathBuf::from("svc-b")]
        );
    }

    #[test]
    fn test_fix_flags() {
        let args = CliArgs::parse_from(["depmend", "fix", "-n", "--no-backup", "--diff", "/p"]);
        assert!(args.dry_run());
        assert!(args.diff());
        let options = args.reconcile_options(None);
        assert!(options.dry_run);
        assert!(!options.create_backup);
    }

    #[test]
    fn test_fix_only_flags_rejected_elsewhere() {
        assert!(CliArgs::try_parse_from(["depmend", "check", "--dry-run"]).is_err());
        assert!(CliArgs::try_parse_from(["depmend", "migrate", "--diff"]).is_err());
    }

    #[test]
    fn test_profile_flags() {
        let args = CliArgs::parse_from([
            "depmend",
            "check",
            "--template",
            "Default",
            "--database",
            "postgresql",
            "--no-lombok",
            "--no-docs",
        ]);
        let profile = args.profile(None);
        assert_eq!(profile.category, TemplateCategory::Default);
        assert_eq!(profile.database, DatabaseKind::Postgresql);
        assert!(!profile.flags.lombok);
        assert!(profile.flags.mapstruct);
        assert!(!profile.flags.docs);
    }

    #[test]
    fn test_flags_override_config() {
        let config = ConfigFile::parse(
            "[profile]\ntemplate = \"MybatisPlus\"\ndatabase = \"sqlite\"\nframework_version = \"3.1.0\"\n[write]\nbackup = false\n",
            Path::new("depmend.toml"),
        )
        .unwrap();
        let args = CliArgs::parse_from([
            "depmend",
            "fix",
            "--database",
            "mysql",
            "--framework-version",
            "3.3.0",
        ]);

        let profile = args.profile(Some(&config));
        assert_eq!(profile.category, TemplateCategory::MybatisPlus);
        assert_eq!(profile.database, DatabaseKind::Mysql);

        let options = args.reconcile_options(Some(&config));
        assert_eq!(options.framework_override.as_deref(), Some("3.3.0"));
        assert!(!options.create_backup);
    }

    #[test]
    fn test_report_absent_deprecated() {
        let args = CliArgs::parse_from(["depmend", "check", "--report-absent-deprecated"]);
        assert_eq!(
            args.reconcile_options(None).deprecated_reporting,
            DeprecatedReporting::Always
        );
    }

    #[test]
    fn test_log_filter() {
        let args = CliArgs::parse_from(["depmend", "check", "--verbose"]);
        assert_eq!(args.log_filter(), "debug");

        let args = CliArgs::parse_from(["depmend", "check", "--verbose", "--log-level", "info"]);
        assert_eq!(args.log_filter(), "info");
    }

    #[test]
    fn test_validate_conflicts() {
        let args = CliArgs::parse_from(["depmend", "fix", "--json", "--diff"]);
        assert!(matches!(
            args.validate(),
            Err(ConfigError::ConflictingOptions { .. })
        ));

        let args = CliArgs::parse_from(["depmend", "check", "-q", "--verbose"]);
        assert!(args.validate().is_err());

        let args = CliArgs::parse_from(["depmend", "fix", "--diff"]);
        assert!(args.validate().is_ok());
    }
}
