//! Parse errors.

use crate::lexer::ScanError;
use thiserror::Error;

/// Errors that can occur while parsing an argument vector.
///
/// A help request is not an error; see [`super::ParseOutcome::HelpRequested`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("missing program name")]
    MissingProgramName,

    #[error("unknown option: {prefix}{name}")]
    UnknownOption {
        name: String,
        is_short: bool,
        prefix: String,
    },

    #[error("option requires a value: {name}")]
    OptionRequiresValue { name: String },

    #[error("invalid value '{value}' for option: {name}")]
    InvalidOptionValue { name: String, value: String },
}

impl ParseError {
    /// True for every unknown-option error, whatever the name or class.
    pub fn is_unknown_option(&self) -> bool {
        matches!(self, ParseError::UnknownOption { .. })
    }
}

impl From<ScanError> for ParseError {
    fn from(err: ScanError) -> Self {
        match err {
            ScanError::MissingProgramName => ParseError::MissingProgramName,
        }
    }
}
