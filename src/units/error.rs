//! Error types for unit token parsing

use thiserror::Error;

/// Errors raised while parsing `<number>:<unit>` tokens
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// Token is not of the form `<number>:<unit>` or the unit is unknown
    #[error("Invalid {kind} argument format: {token}")]
    InvalidFormat {
        /// Which token family was being parsed ("size", "duration")
        kind: &'static str,
        /// The offending token as supplied by the user
        token: String,
    },
}

impl FormatError {
    pub(crate) fn size(token: &str) -> Self {
        Self::InvalidFormat {
            kind: "size",
            token: token.to_string(),
        }
    }

    pub(crate) fn duration(token: &str) -> Self {
        Self::InvalidFormat {
            kind: "duration",
            token: token.to_string(),
        }
    }
}
