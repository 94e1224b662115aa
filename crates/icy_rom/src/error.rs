//! Error types for icy_rom

use thiserror::Error;

/// Main error type for ROM codec operations.
///
/// The codec itself is total; errors only come from decoding stored data
/// (base64, JSON, TOML) and from strict constructors.
#[derive(Debug, Error)]
pub enum RomError {
    #[error("Invalid base64 data: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid format preset: {0}")]
    TomlRead(#[from] toml::de::Error),

    #[error("Failed to write format preset: {0}")]
    TomlWrite(#[from] toml::ser::Error),

    #[error("Invalid character set config: {message}")]
    InvalidConfig { message: String },

    #[error("Glyph size mismatch: expected {expected} pixels, got {actual}")]
    GlyphSizeMismatch { expected: usize, actual: usize },

    #[error("Invalid glyph text at line {line}: {message}")]
    InvalidGlyphText { line: usize, message: String },

    #[error("Unknown {kind}: '{value}'")]
    UnknownValue { kind: &'static str, value: String },
}

/// Result type alias for icy_rom operations
pub type Result<T> = std::result::Result<T, RomError>;

impl RomError {
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig { message: msg.into() }
    }

    pub(crate) fn unknown(kind: &'static str, value: impl Into<String>) -> Self {
        Self::UnknownValue { kind, value: value.into() }
    }
}
