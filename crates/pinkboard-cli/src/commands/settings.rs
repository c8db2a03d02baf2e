//! Settings command - prints the effective settings

use super::load_settings;
use anyhow::{Context, Result};

pub fn run(config: Option<String>) -> Result<()> {
    let settings = load_settings(config.as_deref())?;
    let text = settings
        .to_toml_string()
        .context("Failed to serialize settings")?;
    print!("{text}");
    Ok(())
}
