//! Animation settings (parsed from TOML once at startup)

use log::warn;
use pinkboard_core::{Color, PinkboardError, Result};
use serde::Serialize;
use std::path::Path;

/// Largest pool the settings accept
pub const MAX_PARTICLES: usize = 100_000;

/// Largest sprite edge in pixels
pub const MAX_SPRITE_SIZE: u32 = 1024;

/// Heart particle parameters
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParticleSettings {
    /// Pool capacity
    pub length: usize,
    /// Lifetime of one particle in seconds
    pub duration: f32,
    /// Launch speed in pixels per second
    pub velocity: f32,
    /// Acceleration as a multiple of launch velocity; negative decelerates
    pub effect: f32,
    /// Sprite size in pixels
    pub size: u32,
    /// Sprite fill
    pub color: Color,
}

impl Default for ParticleSettings {
    fn default() -> Self {
        Self {
            length: 500,
            duration: 2.0,
            velocity: 100.0,
            effect: -0.75,
            size: 30,
            color: Color::from_hex(0xEA80B0),
        }
    }
}

impl ParticleSettings {
    /// Particles per second that keeps the pool at steady state
    pub fn emission_rate(&self) -> f32 {
        self.length as f32 / self.duration
    }

    /// Parse from a `[particles]` table; missing keys keep their defaults
    pub fn from_toml(table: &toml::value::Table) -> Result<Self> {
        let mut config = Self::default();
        let section = "particles";

        for (key, value) in table {
            let field = format!("{}.{}", section, key);
            match key.as_str() {
                "length" => config.length = toml_usize(value, &field)?,
                "duration" => config.duration = toml_f32(value, &field)?,
                "velocity" => config.velocity = toml_f32(value, &field)?,
                "effect" => config.effect = toml_f32(value, &field)?,
                "size" => config.size = toml_u32(value, &field)?,
                "color" => config.color = toml_color(value, &field)?,
                _ => warn!("Ignoring unknown setting '{}'", field),
            }
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        positive("particles.duration", self.duration)?;
        within("particles.size", self.size as f64, 1.0, MAX_SPRITE_SIZE as f64)?;
        within("particles.length", self.length as f64, 1.0, MAX_PARTICLES as f64)?;
        at_least("particles.velocity", self.velocity as f64, 0.0)?;
        finite("particles.effect", self.effect)
    }
}

/// Falling word decoration parameters
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FallingTextSettings {
    pub enabled: bool,
    pub words: Vec<String>,
    /// Seconds between spawn bursts
    pub interval: f32,
    /// Words spawned per burst
    pub words_per_interval: u32,
    /// Shortest fall time in seconds
    pub min_duration: f32,
    /// Random extra fall time in seconds, added to `min_duration`
    pub duration_jitter: f32,
    /// Line height in pixels
    pub font_size: f32,
    pub color: Color,
    /// TrueType/OpenType file for the words; the system sans-serif when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font: Option<String>,
}

impl Default for FallingTextSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            words: ["luvs", "bub", "panda", "darling", "boo", "hubby", "my lion king", "babe"]
                .iter()
                .map(|w| w.to_string())
                .collect(),
            interval: 0.3,
            words_per_interval: 2,
            min_duration: 2.0,
            duration_jitter: 3.0,
            font_size: 18.0,
            color: Color::from_hex(0xFFC0DC),
            font: None,
        }
    }
}

impl FallingTextSettings {
    /// Parse from a `[falling_text]` table; missing keys keep their defaults
    pub fn from_toml(table: &toml::value::Table) -> Result<Self> {
        let mut config = Self::default();
        let section = "falling_text";

        for (key, value) in table {
            let field = format!("{}.{}", section, key);
            match key.as_str() {
                "enabled" => {
                    config.enabled = value.as_bool().ok_or_else(|| invalid(&field, "boolean"))?
                }
                "words" => config.words = toml_strings(value, &field)?,
                "interval" => config.interval = toml_f32(value, &field)?,
                "words_per_interval" => config.words_per_interval = toml_u32(value, &field)?,
                "min_duration" => config.min_duration = toml_f32(value, &field)?,
                "duration_jitter" => config.duration_jitter = toml_f32(value, &field)?,
                "font_size" => config.font_size = toml_f32(value, &field)?,
                "color" => config.color = toml_color(value, &field)?,
                "font" => {
                    let path = value.as_str().ok_or_else(|| invalid(&field, "path string"))?;
                    config.font = Some(path.to_string());
                }
                _ => warn!("Ignoring unknown setting '{}'", field),
            }
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        positive("falling_text.interval", self.interval)?;
        positive("falling_text.font_size", self.font_size)?;
        at_least("falling_text.min_duration", self.min_duration as f64, 0.0)?;
        at_least("falling_text.duration_jitter", self.duration_jitter as f64, 0.0)?;
        if self.enabled && self.words.is_empty() {
            return Err(PinkboardError::MissingRequiredField(
                "falling_text.words".into(),
            ));
        }
        Ok(())
    }

    /// Fall time for a uniform sample `u` in [0, 1)
    pub fn lifetime(&self, u: f32) -> f32 {
        self.min_duration + u * self.duration_jitter
    }
}

/// Every tunable of the animation, fixed for the life of the process
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Settings {
    pub particles: ParticleSettings,
    pub falling_text: FallingTextSettings,
}

impl Settings {
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let root: toml::value::Table = toml::from_str(source)?;
        let mut settings = Self::default();

        for (key, value) in &root {
            match key.as_str() {
                "particles" => {
                    let table = value.as_table().ok_or_else(|| invalid(key, "table"))?;
                    settings.particles = ParticleSettings::from_toml(table)?;
                }
                "falling_text" => {
                    let table = value.as_table().ok_or_else(|| invalid(key, "table"))?;
                    settings.falling_text = FallingTextSettings::from_toml(table)?;
                }
                _ => warn!("Ignoring unknown section '{}'", key),
            }
        }

        Ok(settings)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        self.particles.validate()?;
        self.falling_text.validate()
    }
}

// ── TOML helpers (handle integer/float coercion) ──

fn invalid(field: &str, expected: &str) -> PinkboardError {
    PinkboardError::InvalidFieldType {
        field: field.to_string(),
        expected: expected.to_string(),
    }
}

fn toml_f32(v: &toml::Value, field: &str) -> Result<f32> {
    v.as_float()
        .map(|f| f as f32)
        .or_else(|| v.as_integer().map(|i| i as f32))
        .ok_or_else(|| invalid(field, "number"))
}

fn toml_usize(v: &toml::Value, field: &str) -> Result<usize> {
    let i = v.as_integer().ok_or_else(|| invalid(field, "integer"))?;
    usize::try_from(i).map_err(|_| PinkboardError::ValueOutOfRange {
        field: field.to_string(),
        min: 0.0,
        max: usize::MAX as f64,
        value: i as f64,
    })
}

fn toml_u32(v: &toml::Value, field: &str) -> Result<u32> {
    let i = v.as_integer().ok_or_else(|| invalid(field, "integer"))?;
    u32::try_from(i).map_err(|_| PinkboardError::ValueOutOfRange {
        field: field.to_string(),
        min: 0.0,
        max: u32::MAX as f64,
        value: i as f64,
    })
}

fn toml_color(v: &toml::Value, field: &str) -> Result<Color> {
    if let Some(s) = v.as_str() {
        return Color::parse_hex(s)
            .ok_or_else(|| PinkboardError::ParseError(format!("{}: invalid color '{}'", field, s)));
    }
    if let Some(i) = v.as_integer() {
        return match u32::try_from(i) {
            Ok(hex) if hex <= 0xFF_FFFF => Ok(Color::from_hex(hex)),
            _ => Err(PinkboardError::ValueOutOfRange {
                field: field.to_string(),
                min: 0.0,
                max: 0xFF_FFFF as f64,
                value: i as f64,
            }),
        };
    }
    Err(invalid(field, "\"#rrggbb\" string"))
}

fn toml_strings(v: &toml::Value, field: &str) -> Result<Vec<String>> {
    let arr = v.as_array().ok_or_else(|| invalid(field, "array of strings"))?;
    arr.iter()
        .map(|item| {
            item.as_str()
                .map(|s| s.to_string())
                .ok_or_else(|| invalid(field, "array of strings"))
        })
        .collect()
}

fn positive(field: &str, value: f32) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(PinkboardError::ValueOutOfRange {
            field: field.to_string(),
            min: f64::MIN_POSITIVE,
            max: f32::MAX as f64,
            value: value as f64,
        })
    }
}

fn at_least(field: &str, value: f64, min: f64) -> Result<()> {
    if value.is_finite() && value >= min {
        Ok(())
    } else {
        Err(PinkboardError::ValueOutOfRange {
            field: field.to_string(),
            min,
            max: f32::MAX as f64,
            value,
        })
    }
}

fn within(field: &str, value: f64, min: f64, max: f64) -> Result<()> {
    if value >= min && value <= max {
        Ok(())
    } else {
        Err(PinkboardError::ValueOutOfRange {
            field: field.to_string(),
            min,
            max,
            value,
        })
    }
}

fn finite(field: &str, value: f32) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(PinkboardError::ValueOutOfRange {
            field: field.to_string(),
            min: f32::MIN as f64,
            max: f32::MAX as f64,
            value: value as f64,
        })
    }
}
