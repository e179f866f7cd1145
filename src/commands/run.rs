//! `run` command: monitor every configured product until sold out or Ctrl+C.

use anyhow::{Context, Result};
use colored::Colorize;

use super::config_path_arg;
use crate::core::{Config, Supervisor};

pub fn execute(matches: &clap::ArgMatches) -> Result<()> {
    let config = Config::load(config_path_arg(matches).as_deref())?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name("monitor-worker")
        .build()
        .context("Failed to start async runtime")?;

    let mut supervisor =
        Supervisor::from_config(&config).context("Failed to set up monitor clients")?;

    let shutdown_tx = supervisor.shutdown_handle();
    ctrlc::set_handler(move || {
        println!();
        println!("{}", "Stopping monitors...".yellow().bold());
        let _ = shutdown_tx.send(());
    })
    .map_err(|e| anyhow::anyhow!("Failed to set Ctrl+C handler: {}", e))?;

    println!(
        "{} {}",
        "Monitoring".cyan().bold(),
        format!("{} product(s)", config.skus.len()).yellow()
    );
    println!("{}", "Press Ctrl+C to stop".dimmed());

    let finished = runtime.block_on(async {
        supervisor.start(&config.skus);
        supervisor.wait().await
    });

    log::info!("All {} monitor task(s) stopped", finished.len());

    Ok(())
}
