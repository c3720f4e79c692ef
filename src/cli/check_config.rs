//! Check-config command - prints the effective configuration

use anyhow::Context;

use crate::config::AppConfig;

/// Load configuration the same way `serve` does and print it as JSON
pub fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;
    let rendered = serde_json::to_string_pretty(&config.redacted())?;

    println!("{rendered}");

    Ok(())
}
