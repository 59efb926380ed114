//! Multi-level routing through nested dispatchers.

use super::registry::{Capability, Registry};
use super::resolver::{Resolution, ResolveError, resolve};
use serde::Serialize;

/// Where routing ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Target {
    /// Show usage for the command at the end of the path.
    Usage,
    /// Run the leaf command at the end of the path with these arguments.
    Leaf { args: Vec<String> },
}

/// A fully resolved command path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Route {
    /// Subcommand names from the top level down; empty for top-level usage.
    pub path: Vec<String>,
    pub target: Target,
}

/// Resolve `args` level by level until a leaf or a usage request.
pub fn route<S: AsRef<str>>(args: &[S], registry: &Registry) -> Result<Route, ResolveError> {
    let mut path = Vec::new();
    let mut current = registry;
    let mut args: Vec<String> = args.iter().map(|arg| arg.as_ref().to_string()).collect();

    loop {
        let dispatch = match resolve(args.as_slice(), current)? {
            Resolution::ShowUsage => {
                return Ok(Route {
                    path,
                    target: Target::Usage,
                });
            }
            Resolution::Dispatch(dispatch) => dispatch,
        };

        let Some(capability) = current.get(&dispatch.command) else {
            return Err(ResolveError::NoSuchCommand {
                attempted: dispatch.command,
            });
        };

        path.push(dispatch.command);
        match capability {
            Capability::Leaf { .. } => {
                return Ok(Route {
                    path,
                    target: Target::Leaf {
                        args: dispatch.args,
                    },
                });
            }
            Capability::Dispatcher(children) => {
                current = children;
                args = dispatch.args;
            }
        }
    }
}
