//! Error types for Pinkboard

use thiserror::Error;

/// The main error type for Pinkboard operations
#[derive(Debug, Error)]
pub enum PinkboardError {
    #[error("Drawing surface unavailable: {0}")]
    SurfaceUnavailable(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(String),

    #[error("TOML serialization error: {0}")]
    TomlSerError(String),

    #[error("Invalid field type: {field} expected {expected}")]
    InvalidFieldType { field: String, expected: String },

    #[error("Missing required field: {0}")]
    MissingRequiredField(String),

    #[error("Value out of range: {field} must be between {min} and {max}, got {value}")]
    ValueOutOfRange {
        field: String,
        min: f64,
        max: f64,
        value: f64,
    },

    #[error("Render error: {0}")]
    RenderError(String),

    #[error("Image error: {0}")]
    ImageError(String),
}

/// Result type alias for Pinkboard operations
pub type Result<T> = std::result::Result<T, PinkboardError>;

impl From<toml::de::Error> for PinkboardError {
    fn from(err: toml::de::Error) -> Self {
        PinkboardError::TomlParseError(err.to_string())
    }
}

impl From<toml::ser::Error> for PinkboardError {
    fn from(err: toml::ser::Error) -> Self {
        PinkboardError::TomlSerError(err.to_string())
    }
}
