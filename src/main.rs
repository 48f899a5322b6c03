//! depmend - Maven/Gradle dependency reconciliation CLI tool
//!
//! Checks a Spring Boot project's build manifest against what DBJavaGenix
//! generated code needs, then adds missing dependencies and migrates
//! deprecated ones:
//! - Maven (pom.xml)
//! - Gradle (build.gradle, build.gradle.kts)

use clap::Parser;
use depmend::cli::{CliArgs, Command};
use depmend::config;
use depmend::domain::Profile;
use depmend::error::AppError;
use depmend::orchestrator::{Orchestrator, ReconcileOptions};
use depmend::output::{create_formatter, OutputConfig};
use std::io::{self, Write};
use std::path::Path;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse();

    init_tracing(&args.log_filter());

    match run(args).await {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Diagnostics go to stderr so stdout stays parseable
fn init_tracing(filter: &str) {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Validates flags and merges them over the configuration file
fn settings(args: &CliArgs) -> Result<(Profile, ReconcileOptions), AppError> {
    args.validate()?;
    let common = args.common();

    let first_root = common.paths.first().map(|p| p.as_path()).unwrap_or(Path::new("."));
    let config = config::resolve(common.config.as_deref(), first_root)?;
    Ok((args.profile(config.as_ref()), args.reconcile_options(config.as_ref())))
}

/// Main application logic
async fn run(args: CliArgs) -> anyhow::Result<ExitCode> {
    let (profile, options) = settings(&args)?;
    let common = args.common();

    tracing::debug!(
        template = %profile.category,
        database = %profile.database,
        dry_run = options.dry_run,
        projects = common.paths.len(),
        "starting"
    );

    let show_progress = !common.quiet && !common.json;
    let orchestrator = Orchestrator::new(profile, options);
    let result = match &args.command {
        Command::Check(_) => orchestrator.check(&common.paths, show_progress),
        Command::Fix(_) => orchestrator.fix(&common.paths, show_progress).await,
        Command::Migrate(_) => orchestrator.migrate(&common.paths, show_progress),
    };

    let output_config = OutputConfig::from_cli(
        common.json,
        args.diff(),
        common.verbose,
        common.quiet,
        args.dry_run(),
    );
    let formatter = create_formatter(output_config);

    let mut stdout = io::stdout().lock();
    formatter.format(&result, &mut stdout)?;
    stdout.flush()?;

    if result.has_errors() {
        // Partial success - some projects failed or cannot be generated against
        Ok(ExitCode::from(2))
    } else {
        Ok(ExitCode::SUCCESS)
    }
}
