//! Configuration error types

use thiserror::Error;

/// Errors raised while constructing tweens, timelines and bindings.
///
/// These are programming mistakes, not runtime conditions: they surface from
/// constructors before any animation starts and are never produced while advancing.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// `from` and `to` keyframes animate different property sets
    #[error(
        "Mismatched keyframes for '{target}': only in from [{only_in_from}], only in to [{only_in_to}]"
    )]
    MismatchedProperties {
        target: String,
        only_in_from: String,
        only_in_to: String,
    },

    /// A tween was given keyframes with no properties at all
    #[error("Keyframes for '{0}' do not animate any property")]
    EmptyKeyframe(String),

    /// Duration is negative or not finite
    #[error("Invalid duration: {0}ms")]
    InvalidDuration(f32),

    /// Smoothing factor outside [0, 1]
    #[error("Smoothing factor must be within [0, 1], got {0}")]
    InvalidSmoothing(f32),

    /// Timeline position string could not be parsed
    #[error("Invalid timeline position: {0:?}")]
    InvalidPosition(String),

    /// Trigger edge string could not be parsed
    #[error("Invalid trigger edge: {0:?}")]
    InvalidTriggerEdge(String),

    /// Easing name is not known
    #[error("Unknown easing: {0:?}")]
    UnknownEasing(String),

    /// Property name is not known
    #[error("Unknown property: {0:?}")]
    UnknownProperty(String),
}

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;
