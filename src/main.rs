use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use market_scraper_lib::cli::Cli;
use market_scraper_lib::infrastructure::logging::{init_logging_with_config, log_system_info};
use market_scraper_lib::{ConfigManager, run_scrape};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("market-scraper: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: &Cli) -> Result<()> {
    let manager = match &cli.config_path {
        Some(path) => ConfigManager::with_path(path),
        None => ConfigManager::new()?,
    };

    if cli.init {
        manager.write_default_config()?;
        println!("Wrote {}", manager.config_path().display());
        return Ok(());
    }

    let mut config = manager.load_config()?;
    cli.apply_to(&mut config);

    init_logging_with_config(&config.logging)?;
    log_system_info();
    info!("{}", manager.describe_source());

    run_scrape(&config).await?;
    Ok(())
}
