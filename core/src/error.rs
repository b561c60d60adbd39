//! Error types for the settings registry

use thiserror::Error;

/// Errors raised when a setting value is rejected
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SettingsError {
    #[error("unknown setting '{name}'")]
    UnknownSetting { name: String },

    #[error("setting '{name}' expects a {expected} value")]
    TypeMismatch { name: String, expected: &'static str },

    #[error("value {value} is out of range for '{name}' ({min}..={max})")]
    OutOfRange {
        name: String,
        value: f32,
        min: f32,
        max: f32,
    },

    #[error("'{input}' is not an option of '{name}'")]
    UnknownChoice { name: String, input: String },

    #[error("cannot parse '{input}' as a value for '{name}'")]
    InvalidInput { name: String, input: String },
}
