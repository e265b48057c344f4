//! Animation error types

use thiserror::Error;

/// Errors raised while constructing curves, keyframes and configuration
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnimationError {
    /// A point, bezier or easing string could not be parsed
    #[error("Couldn't parse `{input}`: {reason}")]
    Parse {
        /// The offending input, verbatim
        input: String,
        /// What was wrong with it
        reason: String,
    },

    /// Keyframe list is too short, unordered or out of range
    #[error("Invalid keyframes: {0}")]
    InvalidKeyFrames(String),

    /// Configuration value that cannot produce a usable curve
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Name not present in the preset table
    #[error("Unknown easing preset: {0}")]
    UnknownPreset(String),
}

impl AnimationError {
    pub(crate) fn parse(input: &str, reason: impl Into<String>) -> Self {
        Self::Parse {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result type for animation operations
pub type Result<T> = std::result::Result<T, AnimationError>;
