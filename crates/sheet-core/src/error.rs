//! Error types for the sheet core.
//!
//! Everything here is a configuration or input problem detected at the
//! boundary; the state machine itself never fails once constructed.

use thiserror::Error;

/// Errors raised while configuring or driving a sheet.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SheetError {
    /// A spring profile selector outside the recognized set.
    #[error("invalid animate type: {0:?}")]
    UnknownProfile(String),

    /// A threshold fraction outside `[0, 1]` or not finite.
    #[error("{position} threshold must be a fraction in [0, 1], got {value}")]
    ThresholdOutOfRange {
        /// Which entry of the triple was rejected.
        position: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// The middle threshold was a string other than `"auto"`.
    #[error("middle threshold must be a fraction or \"auto\", got {0:?}")]
    InvalidMiddleThreshold(String),

    /// A write that would push NaN or infinity into the offset.
    #[error("refusing non-finite offset {0}")]
    NonFiniteOffset(f64),

    /// The configuration document could not be parsed.
    #[error("failed to parse sheet config: {0}")]
    Config(String),
}

impl From<toml::de::Error> for SheetError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(err.message().to_string())
    }
}
