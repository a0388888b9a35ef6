//! Hero section error types

use parallax_core::ConfigError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while configuring or driving the hero section
#[derive(Error, Debug)]
pub enum HeroError {
    /// Invalid motion parameters (easing, positions, keyframes, trigger edges)
    #[error("Invalid motion configuration: {0}")]
    Config(#[from] ConfigError),

    /// Configuration file could not be parsed
    #[error("Failed to parse hero config: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration could not be serialized
    #[error("Failed to serialize hero config: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// Scenario file could not be parsed
    #[error("Failed to parse scenario: {0}")]
    Json(#[from] serde_json::Error),

    /// Failed to read a file from disk
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Required content is missing or blank
    #[error("Hero content is empty: {0}")]
    EmptyContent(&'static str),

    /// No target with this label exists in the section
    #[error("Unknown target: {0}")]
    UnknownTarget(String),

    /// A scenario assertion did not hold
    #[error("Assertion failed at step {step}: {message}")]
    AssertionFailed { step: usize, message: String },
}

/// Result type for hero section operations
pub type Result<T> = std::result::Result<T, HeroError>;
