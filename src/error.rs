//! Error types.
//!
//! Every variant of [`Error`] is a wiring mistake: an alias that does not exist, a
//! directional template with the wrong number of keys, a combinator with too few inputs.
//! They surface at the call site that builds the control. "Device not connected" is never
//! an error; queries against missing devices return the zero value of their type.
//!
//! The `Display` strings are stable and meant to be shown to developers verbatim.

use thiserror::Error;

/// Binding misconfiguration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("There is no key called \"{0}\"!")]
    UnknownKey(String),

    #[error("There is no gamepad button called \"{0}\"!")]
    UnknownGamepadButton(String),

    #[error("Gamepad stick \"{0}\" not found!")]
    UnknownStick(String),

    #[error("There is no mouse button called \"{0}\"!")]
    UnknownMouseButton(String),

    #[error("There is no mouse button with the index {0}!")]
    MouseButtonIndex(u16),

    #[error("Directional key template \"{0}\" not found!")]
    UnknownTemplate(String),

    #[error("Directional key templates have to consist of four keys!")]
    TemplateArity,

    #[error("Directional key template \"{0}\" is defined more than once!")]
    DuplicateTemplate(String),

    #[error("Less than two controls specified!")]
    TooFewControls,

    #[error("No control found!")]
    NoControlFound,
}

/// Failure while loading [`Settings`](crate::config::Settings).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid TOML settings: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid JSON settings: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported settings format: {0}")]
    UnsupportedFormat(String),

    #[error(transparent)]
    Invalid(#[from] Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
