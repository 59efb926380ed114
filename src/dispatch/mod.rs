//! Subcommand dispatch.

mod registry;
mod resolver;
mod tree;

pub use registry::{Capability, Registry};
pub use resolver::{Dispatch, Resolution, ResolveError, resolve};
pub use tree::{Route, Target, route};
