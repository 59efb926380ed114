//! Request parsing for the `optshape` binary.

use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when parsing a request.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// A request read from stdin.
#[derive(Debug, Clone, Deserialize)]
pub struct Request {
    #[serde(flatten)]
    pub action: Action,

    /// Directory searched for a project config (optional).
    #[serde(default)]
    pub cwd: Option<String>,
}

/// What to do with the supplied arguments.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum Action {
    /// Parse a full argv, program name first.
    Parse { argv: Vec<String> },
    /// Route subcommand arguments through the command tree.
    Route { args: Vec<String> },
}

impl Request {
    /// Parse from JSON string.
    pub fn parse(json: &str) -> Result<Self, InputError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Name of the requested action.
    pub fn action_name(&self) -> &'static str {
        match self.action {
            Action::Parse { .. } => "parse",
            Action::Route { .. } => "route",
        }
    }

    /// The argument list carried by the request.
    pub fn arguments(&self) -> &[String] {
        match &self.action {
            Action::Parse { argv } => argv,
            Action::Route { args } => args,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_request() {
        let json = r#"{"action":"parse","argv":["prog","-v"]}"#;
        let request = Request::parse(json).unwrap();
        assert_eq!(request.action_name(), "parse");
        assert_eq!(request.arguments(), ["prog", "-v"]);
        assert!(request.cwd.is_none());
    }

    #[test]
    fn test_route_request_with_cwd() {
        let json = r#"{"action":"route","args":["IN","dig"],"cwd":"/home/user"}"#;
        let request = Request::parse(json).unwrap();
        assert_eq!(request.action_name(), "route");
        assert_eq!(request.cwd, Some("/home/user".to_string()));
        assert!(matches!(request.action, Action::Route { ref args } if args.len() == 2));
    }

    #[test]
    fn test_unknown_action() {
        let json = r#"{"action":"explode","argv":[]}"#;
        assert!(Request::parse(json).is_err());
    }

    #[test]
    fn test_missing_arguments() {
        let json = r#"{"action":"parse"}"#;
        assert!(Request::parse(json).is_err());
    }
}
