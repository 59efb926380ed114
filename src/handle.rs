//! Request handling entry point.

use crate::config::CompiledConfig;
use crate::dispatch::route;
use crate::input::{Action, Request};
use crate::outcome::Outcome;
use crate::parser::parse;

/// Apply the configured grammar or command tree to a request.
pub fn handle(request: &Request, config: &CompiledConfig) -> Outcome {
    match &request.action {
        Action::Parse { argv } => Outcome::from(parse(argv.as_slice(), &config.parser)),
        Action::Route { args } => Outcome::from(route(args.as_slice(), &config.commands)),
    }
}
