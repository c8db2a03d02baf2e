//! CLI command implementations

pub mod play;
pub mod render;
pub mod settings;
pub mod sprite;

use anyhow::{Context, Result};
use pinkboard_particles::settings::Settings;

/// Settings from `config` if given, defaults otherwise
pub fn load_settings(config: Option<&str>) -> Result<Settings> {
    match config {
        Some(path) => {
            let settings = Settings::load(path)
                .with_context(|| format!("Failed to load settings from {path}"))?;
            log::info!("Loaded settings from {}", path);
            Ok(settings)
        }
        None => Ok(Settings::default()),
    }
}
