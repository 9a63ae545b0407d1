use std::path::PathBuf;

use anyhow::{Context, Result};
use colored::Colorize;
use logtriage_core::analysis::http::HttpBackend;
use logtriage_core::config::Config;
use logtriage_core::models::ScanSummary;
use logtriage_core::report::Reporter;
use logtriage_core::scan;

use super::default_config_path;

/// Command-line overrides for a scan run.
pub struct ScanArgs {
    pub dir: Option<PathBuf>,
    pub url: Option<String>,
    pub api_key: Option<String>,
    pub config: Option<PathBuf>,
    pub dry_run: bool,
    pub verbose: bool,
}

pub fn run(args: ScanArgs) -> Result<()> {
    let config_path = args.config.clone().unwrap_or_else(default_config_path);
    if args.verbose {
        eprintln!("[verbose] config: {}", config_path.display());
    }

    let loaded = Config::load(&config_path)
        .with_context(|| format!("loading config {}", config_path.display()))?;
    let config = resolve_config(&args, loaded, |key| std::env::var(key).ok());

    // A dry run never talks to the endpoint, so credentials may be missing
    if !args.dry_run {
        config.validate()?;
    }

    let log_dir = resolve_log_dir(&args, &config);
    let backend = HttpBackend::new(&config.api)?;
    if args.verbose {
        eprintln!("[verbose] log dir: {}", log_dir.display());
        eprintln!("[verbose] endpoint: {}", backend.url());
    }

    let mut reporter = Reporter::stdio(args.verbose);
    let summary = scan::scan_directory(
        &log_dir,
        &config.analysis,
        &backend,
        &mut reporter,
        args.dry_run,
    )
    .with_context(|| format!("scanning {}", log_dir.display()))?;

    print_summary(&summary, args.dry_run);
    Ok(())
}

/// Layer environment variables and CLI flags over the loaded config file.
fn resolve_config<F>(args: &ScanArgs, mut config: Config, env: F) -> Config
where
    F: Fn(&str) -> Option<String>,
{
    config.apply_env_from(env);

    if let Some(ref url) = args.url {
        config.api.url = url.clone();
    }
    if let Some(ref key) = args.api_key {
        config.api.api_key = key.clone();
    }
    config
}

/// A directory given on the command line is used as-is, bytes and all;
/// otherwise the configured one with ~ expanded.
fn resolve_log_dir(args: &ScanArgs, config: &Config) -> PathBuf {
    args.dir.clone().unwrap_or_else(|| config.log_dir())
}

/// Totals go to stderr so stdout carries only per-file reports.
fn print_summary(summary: &ScanSummary, dry_run: bool) {
    if summary.files_found == 0 {
        return;
    }

    eprintln!();
    eprintln!(
        "  {} {}",
        "Files found:".white(),
        summary.files_found.to_string().cyan()
    );
    if dry_run {
        eprintln!(
            "  {} {}",
            "Would analyze:".white(),
            summary.skipped().to_string().yellow()
        );
    } else {
        eprintln!(
            "  {} {}",
            "Analyzed:".white(),
            summary.reported().to_string().green()
        );
    }

    let failed = summary.failed();
    if failed > 0 {
        eprintln!("  {} {}", "Failed:".white(), failed.to_string().red());
    }
}
