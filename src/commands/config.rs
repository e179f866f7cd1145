use anyhow::{Context, Result};
use colored::Colorize;
use std::path::PathBuf;

use super::config_path_arg;
use crate::core::{Config, ProductId};
use crate::ui;

pub fn execute(matches: &clap::ArgMatches) -> Result<()> {
    match matches.subcommand() {
        Some(("path", sub_matches)) => handle_path(sub_matches),
        Some(("show", sub_matches)) => handle_show(sub_matches),
        Some(("init", sub_matches)) => handle_init(sub_matches),
        _ => {
            println!("Use 'ys-monitor config --help' for more information.");
            Ok(())
        }
    }
}

fn resolve_path(matches: &clap::ArgMatches) -> Result<PathBuf> {
    match config_path_arg(matches) {
        Some(path) => Ok(path),
        None => Config::get_config_path(),
    }
}

fn handle_path(matches: &clap::ArgMatches) -> Result<()> {
    let path = resolve_path(matches)?;
    println!("{}", path.display());
    Ok(())
}

fn handle_show(matches: &clap::ArgMatches) -> Result<()> {
    let path = resolve_path(matches)?;
    let config = Config::load_from(&path)?;
    let webhook = config.webhook_target()?;

    println!("{} {}", "Config:".dimmed(), path.display());
    println!();
    println!("{:<16} {}", "Webhook:".cyan(), webhook.redacted());
    println!("{:<16} {}", "API:".cyan(), config.api_base_url);
    println!("{:<16} {}", "Site:".cyan(), config.site_url);
    println!("{:<16} {}s", "Timeout:".cyan(), config.request_timeout_secs);
    println!(
        "{:<16} error {}s, not loaded {}s, standard {}s",
        "Intervals:".cyan(),
        config.intervals.error_secs,
        config.intervals.not_loaded_secs,
        config.intervals.standard_secs
    );
    println!();
    println!("{}", "Products:".cyan());
    for (task, sku) in config.skus.iter().enumerate() {
        println!("  {:>3}  {}", task, sku.to_string().yellow());
    }

    Ok(())
}

fn handle_init(matches: &clap::ArgMatches) -> Result<()> {
    let path = resolve_path(matches)?;

    if path.exists() && !matches.get_flag("force") {
        ui::warn(&format!(
            "Config already exists at {} (use --force to overwrite)",
            path.display()
        ));
        return Ok(());
    }

    let webhook = matches
        .get_one::<String>("webhook")
        .context("Webhook argument is required")?
        .to_string();
    let skus: Vec<ProductId> = matches
        .get_many::<String>("sku")
        .map(|values| values.map(|s| ProductId::new(s.as_str())).collect())
        .unwrap_or_default();

    let config = Config::new(webhook, skus);
    config.validate()?;
    config.save(&path)?;

    ui::success(&format!("Config written to {}", path.display()));
    Ok(())
}
