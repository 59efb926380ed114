//! optshape - configurable command-line option parsing.
//!
//! One engine emulates several option-syntax conventions (GNU getopt,
//! dig-style `+flag`, Go single-dash, Windows `/flag`) through a
//! [`ParserConfig`] instead of per-tool code, and resolves subcommands
//! written out of position without guessing on ambiguity.

pub mod audit;
pub mod config;
pub mod dispatch;
pub mod handle;
pub mod input;
pub mod lexer;
pub mod outcome;
pub mod output;
pub mod parser;

pub use config::{CompiledConfig, Config};
pub use dispatch::{Capability, Registry, Resolution, ResolveError, Route, resolve, route};
pub use handle::handle;
pub use input::Request;
pub use outcome::Outcome;
pub use output::format_response;
pub use parser::{Arity, Item, ParseError, ParseOutcome, Parser, ParserConfig, parse};
