//! `check` command: fetch a product's availability once and print it.

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;

use super::config_path_arg;
use crate::core::client::{AvailabilityClient, AvailabilityResult, YeezySupplyClient};
use crate::core::config::Config;
use crate::core::ProductId;
use crate::ui;

pub fn execute(matches: &clap::ArgMatches) -> Result<()> {
    let sku = matches
        .get_one::<String>("sku")
        .context("SKU argument is required")?;
    let product = ProductId::new(sku.as_str());

    let client = client_for(config_path_arg(matches).as_deref())?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    runtime.block_on(check_product(&client, &product))
}

/// Client built from the config file, or from defaults when no file exists.
///
/// A webhook is not needed for a one-off check, but a file that exists and
/// fails to load is still an error.
fn client_for(path: Option<&Path>) -> Result<YeezySupplyClient> {
    let config_path = match path {
        Some(p) => p.to_path_buf(),
        None => Config::get_config_path()?,
    };

    let config = if config_path.exists() {
        Config::load_from(&config_path)?
    } else {
        log::debug!("No config at {:?}, using default API settings", config_path);
        Config::new(String::new(), Vec::new())
    };

    Ok(YeezySupplyClient::from_config(&config)?)
}

async fn check_product(client: &YeezySupplyClient, product: &ProductId) -> Result<()> {
    println!("{} {}", "Checking".cyan(), product.to_string().yellow().bold());

    match client.fetch_availability(product).await {
        AvailabilityResult::NotYetAvailable => {
            ui::warn("No stock loaded yet for this product");
        }
        AvailabilityResult::TransportError(e) => {
            return Err(e).context("Availability request failed");
        }
        AvailabilityResult::Success { id, snapshot } => {
            match client.fetch_metadata(&id).await {
                Ok(meta) => ui::bold(&ui::format_metadata(&meta)),
                Err(e) => ui::dimmed(&format!("Product details unavailable: {}", e)),
            }
            println!();
            ui::print_snapshot(&snapshot);
        }
    }

    Ok(())
}
