//! Subcommand resolution with ambiguity repair.

use super::registry::{Capability, Registry};
use serde::Serialize;
use thiserror::Error;

/// Flags that request usage for the current dispatch level.
const HELP_FLAGS: &[&str] = &["--help", "-h"];

/// Errors that can occur when resolving a subcommand.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("no such command: {attempted}")]
    NoSuchCommand { attempted: String },

    #[error("ambiguous command line: candidates {}", .candidates.join(", "))]
    AmbiguousCommandLine { candidates: Vec<String> },
}

/// A subcommand to invoke next.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dispatch {
    pub command: String,
    /// Arguments for the subcommand, without its name.
    pub args: Vec<String>,
}

impl Dispatch {
    /// The argv handed to the next dispatch level: `[command] ++ args`.
    pub fn argv(&self) -> Vec<String> {
        std::iter::once(self.command.clone())
            .chain(self.args.iter().cloned())
            .collect()
    }
}

/// Outcome of resolving one dispatch level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Show usage for the current level.
    ShowUsage,
    Dispatch(Dispatch),
}

/// Pick the subcommand to run from `args` (the current command's own name
/// already consumed).
///
/// A single registered name found anywhere in `args` is moved to the front.
/// Two or more are rejected as ambiguous rather than resolved by position.
pub fn resolve<S: AsRef<str>>(args: &[S], registry: &Registry) -> Result<Resolution, ResolveError> {
    let args: Vec<&str> = args.iter().map(|arg| arg.as_ref()).collect();

    let Some((&first, rest)) = args.split_first() else {
        return Ok(Resolution::ShowUsage);
    };

    if registry.contains(first) {
        return Ok(dispatch(first, rest.iter().copied()));
    }

    if HELP_FLAGS.contains(&first) {
        return Ok(Resolution::ShowUsage);
    }

    if first == "help" {
        return resolve_help(rest, registry);
    }

    let matches: Vec<(usize, &str)> = args
        .iter()
        .enumerate()
        .filter(|(_, arg)| registry.contains(arg))
        .map(|(index, arg)| (index, *arg))
        .collect();

    match matches.as_slice() {
        [] => Err(ResolveError::NoSuchCommand {
            attempted: first.to_string(),
        }),
        [(index, name)] => {
            let others = args
                .iter()
                .enumerate()
                .filter(|(i, _)| i != index)
                .map(|(_, arg)| *arg);
            Ok(dispatch(name, others))
        }
        _ => Err(ResolveError::AmbiguousCommandLine {
            candidates: matches.iter().map(|(_, name)| name.to_string()).collect(),
        }),
    }
}

fn resolve_help(rest: &[&str], registry: &Registry) -> Result<Resolution, ResolveError> {
    let Some((&target, rest)) = rest.split_first() else {
        return Ok(Resolution::ShowUsage);
    };

    match registry.get(target) {
        None => Err(ResolveError::NoSuchCommand {
            attempted: target.to_string(),
        }),
        Some(Capability::Dispatcher(_)) => Ok(dispatch(
            target,
            std::iter::once("help").chain(rest.iter().copied()),
        )),
        Some(Capability::Leaf { help_flag }) => Ok(dispatch(
            target,
            rest.iter().copied().chain(std::iter::once(help_flag.as_str())),
        )),
    }
}

fn dispatch<'a>(command: &str, args: impl Iterator<Item = &'a str>) -> Resolution {
    Resolution::Dispatch(Dispatch {
        command: command.to_string(),
        args: args.map(String::from).collect(),
    })
}
