//! Response formatting for binary output.

use crate::dispatch::Target;
use crate::outcome::{FailureInfo, Outcome};
use crate::parser::Item;
use serde::Serialize;

/// JSON response for parsed items.
#[derive(Debug, Serialize)]
pub struct ItemsResponse<'a> {
    pub items: &'a [Item],
}

/// JSON response for help requests.
#[derive(Debug, Serialize)]
pub struct HelpResponse {
    pub help: bool,
}

/// JSON response for routed commands.
#[derive(Debug, Serialize)]
pub struct RouteResponse<'a> {
    pub path: &'a [String],
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub usage: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub args: Option<&'a [String]>,
}

/// Where a formatted outcome should be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// JSON for stdout.
    Stdout(String),
    /// Message for stderr.
    Stderr(String),
}

/// Format an outcome for output.
pub fn format_response(outcome: &Outcome) -> Response {
    let json = match outcome {
        Outcome::Parsed(items) => serde_json::to_string(&ItemsResponse { items }),
        Outcome::Help => serde_json::to_string(&HelpResponse { help: true }),
        Outcome::Routed(route) => {
            let (usage, args) = match &route.target {
                Target::Usage => (true, None),
                Target::Leaf { args } => (false, Some(args.as_slice())),
            };
            serde_json::to_string(&RouteResponse {
                path: &route.path,
                usage,
                args,
            })
        }
        Outcome::Failed(info) => return Response::Stderr(format_failure(info)),
    };

    match json {
        Ok(json) => Response::Stdout(json),
        Err(err) => Response::Stderr(format!("error: {}", err)),
    }
}

fn format_failure(info: &FailureInfo) -> String {
    format!("error: {}", info.message)
}
