//! Outcome of handling a request.

use serde::Serialize;

use crate::dispatch::{ResolveError, Route};
use crate::parser::{Item, ParseError, ParseOutcome};

/// The result of parsing or routing one argument list.
#[derive(Debug, Clone)]
pub enum Outcome {
    /// Parsed items.
    Parsed(Vec<Item>),
    /// A help trigger was found.
    Help,
    /// A resolved command path.
    Routed(Route),
    /// The arguments were rejected.
    Failed(FailureInfo),
}

/// Information about why arguments were rejected.
#[derive(Debug, Clone, Serialize)]
pub struct FailureInfo {
    /// Machine-readable error class (e.g. `unknown_option`).
    pub kind: String,
    /// Human-readable message.
    pub message: String,
}

impl FailureInfo {
    pub fn new(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            message: message.into(),
        }
    }
}

impl From<Result<ParseOutcome, ParseError>> for Outcome {
    fn from(result: Result<ParseOutcome, ParseError>) -> Self {
        match result {
            Ok(ParseOutcome::Items(items)) => Outcome::Parsed(items),
            Ok(ParseOutcome::HelpRequested) => Outcome::Help,
            Err(err) => {
                let kind = match &err {
                    ParseError::MissingProgramName => "missing_program_name",
                    ParseError::UnknownOption { .. } => "unknown_option",
                    ParseError::OptionRequiresValue { .. } => "option_requires_value",
                    ParseError::InvalidOptionValue { .. } => "invalid_option_value",
                };
                Outcome::Failed(FailureInfo::new(kind, err.to_string()))
            }
        }
    }
}

impl From<Result<Route, ResolveError>> for Outcome {
    fn from(result: Result<Route, ResolveError>) -> Self {
        match result {
            Ok(route) => Outcome::Routed(route),
            Err(err) => {
                let kind = match &err {
                    ResolveError::NoSuchCommand { .. } => "no_such_command",
                    ResolveError::AmbiguousCommandLine { .. } => "ambiguous_command_line",
                };
                Outcome::Failed(FailureInfo::new(kind, err.to_string()))
            }
        }
    }
}

impl Outcome {
    /// Check if the arguments were rejected.
    pub fn is_failure(&self) -> bool {
        matches!(self, Outcome::Failed(_))
    }

    /// Get the failure info if rejected.
    pub fn failure_info(&self) -> Option<&FailureInfo> {
        match self {
            Outcome::Failed(info) => Some(info),
            _ => None,
        }
    }

    /// Short label for logs.
    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Parsed(_) => "items",
            Outcome::Help => "help",
            Outcome::Routed(_) => "route",
            Outcome::Failed(_) => "error",
        }
    }
}
