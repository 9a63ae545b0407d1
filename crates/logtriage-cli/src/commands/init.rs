use anyhow::{Context, Result};
use colored::Colorize;
use logtriage_core::config::{Config, ENV_API_KEY};

use super::default_config_path;

pub fn run(force: bool) -> Result<()> {
    let config_path = default_config_path();

    if config_path.exists() && !force {
        println!("  {} {}", "Exists".yellow(), config_path.display());
        return Ok(());
    }

    Config::default()
        .save(&config_path)
        .with_context(|| format!("writing {}", config_path.display()))?;
    println!("  {} {}", "Created".green(), config_path.display());

    println!();
    println!(
        "  {} set api.api_key in the config file or export {}",
        "Next:".dimmed(),
        ENV_API_KEY
    );
    Ok(())
}
