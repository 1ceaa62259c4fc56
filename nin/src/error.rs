use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Everything that can go wrong while validating or generating a NIN.
///
/// Only [`NinError::MalformedBase`] is ever returned as an `Err`. The other variants are
/// carried inside a [`crate::NinDetails`] so callers always receive the decoded record.
#[derive(Clone, Debug, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NinError {
    /// The input is not exactly 18 decimal digits once whitespace is removed
    #[error("the identifier must contain exactly 18 digits.")]
    MalformedIdentifier,

    /// A generator base is not exactly 16 decimal digits
    #[error("the base must contain exactly 16 digits.")]
    MalformedBase,

    /// The identifier is well-formed but its trailing key does not match the computed one
    #[error("invalid control key: expected {expected}, supplied {supplied}")]
    ChecksumMismatch { expected: String, supplied: String },
}

impl NinError {
    /// Structural errors stop processing before any field is decoded.
    pub fn is_structural(&self) -> bool {
        match self {
            NinError::MalformedIdentifier | NinError::MalformedBase => true,
            NinError::ChecksumMismatch { .. } => false,
        }
    }
}
