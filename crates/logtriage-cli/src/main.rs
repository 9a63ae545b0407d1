mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "logtriage",
    about = "First-pass security triage of log files via an LLM endpoint"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create ~/.logtriage/config.toml with default settings
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
    /// Send every log file in a directory for threat analysis
    Scan {
        /// Directory to scan (defaults to scan.log_dir from config)
        dir: Option<PathBuf>,
        /// Analysis endpoint URL
        #[arg(long)]
        url: Option<String>,
        /// Bearer token for the endpoint
        #[arg(long)]
        api_key: Option<String>,
        /// Config file to use instead of ~/.logtriage/config.toml
        #[arg(long)]
        config: Option<PathBuf>,
        /// Read files and build requests without sending anything
        #[arg(long)]
        dry_run: bool,
        /// Show detailed diagnostic output
        #[arg(long, short)]
        verbose: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init { force } => commands::init::run(force),
        Commands::Scan {
            dir,
            url,
            api_key,
            config,
            dry_run,
            verbose,
        } => commands::scan::run(commands::scan::ScanArgs {
            dir,
            url,
            api_key,
            config,
            dry_run,
            verbose,
        }),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
