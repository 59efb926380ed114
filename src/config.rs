//! Configuration loading and merging.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::dispatch::{Capability, Registry};
use crate::parser::{Arity, ParserConfig};

/// Option and command names: non-empty, no whitespace, no `=`.
static NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s=]+$").expect("name pattern is valid"));

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid name '{0}'")]
    InvalidName(String),

    #[error("short option '{0}' must be a single character")]
    ShortNotChar(String),

    #[error("option declares neither a long nor a short name")]
    Unnamed,

    #[error("{class} option '{name}' declared twice")]
    Duplicate { class: &'static str, name: String },

    #[error("invalid prefix '{0}'")]
    InvalidPrefix(String),

    #[error("prefix '{0}' is both a long and a short prefix")]
    OverlappingPrefix(String),
}

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Prefixes, separators and permutation.
    pub grammar: GrammarConfig,

    /// Recognized options.
    pub options: Vec<OptionSpec>,

    /// Subcommand tree for routing.
    pub commands: BTreeMap<String, CommandSpec>,

    /// Audit logging settings.
    pub audit: AuditConfig,
}

/// Named grammar presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    #[default]
    Gnu,
    Dig,
    Go,
    Windows,
}

impl Preset {
    fn parser_config(self) -> ParserConfig {
        match self {
            Preset::Gnu => ParserConfig::gnu(),
            Preset::Dig => ParserConfig::dig(),
            Preset::Go => ParserConfig::go(),
            Preset::Windows => ParserConfig::windows(),
        }
    }
}

/// Grammar settings; unset fields fall back to the preset.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct GrammarConfig {
    pub preset: Option<Preset>,
    pub long_prefixes: Option<Vec<String>>,
    pub short_prefixes: Option<Vec<String>>,
    pub separators: Option<Vec<String>>,
    pub permute: Option<bool>,
}

/// A recognized option, with a long name, a short name, or both.
#[derive(Debug, Clone, Deserialize)]
pub struct OptionSpec {
    #[serde(default)]
    pub long: Option<String>,
    #[serde(default)]
    pub short: Option<String>,
    #[serde(default = "default_arity")]
    pub arity: Arity,
}

fn default_arity() -> Arity {
    Arity::None
}

/// A subcommand; it is a dispatcher when it has subcommands of its own.
#[derive(Debug, Clone, Deserialize)]
pub struct CommandSpec {
    /// Flag appended by `help <command>` for leaf commands.
    #[serde(default = "default_help_flag")]
    pub help_flag: String,
    #[serde(default)]
    pub commands: BTreeMap<String, CommandSpec>,
}

fn default_help_flag() -> String {
    "--help".to_string()
}

/// Audit logging configuration.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AuditConfig {
    /// Enable audit logging.
    pub enabled: bool,
    /// Path to audit log file.
    pub path: Option<String>,
}

/// Configuration compiled into the engine's immutable types.
pub struct CompiledConfig {
    /// The raw config.
    pub raw: Config,
    /// Grammar for the option parser.
    pub parser: ParserConfig,
    /// Top-level subcommands.
    pub commands: Registry,
}

impl Config {
    /// Load configuration, merging user and project configs.
    pub fn load(cwd: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = Config::default();

        if let Some(user_config) = Self::load_user_config()? {
            config = user_config;
        }

        if let Some(cwd) = cwd {
            if let Some(project_config) = Self::load_project_config(cwd)? {
                config.merge(project_config);
            }
        }

        Ok(config)
    }

    /// Load user-level config.
    fn load_user_config() -> Result<Option<Self>, ConfigError> {
        let path = Self::user_config_path();
        if let Some(path) = path {
            if path.exists() {
                let content = fs::read_to_string(&path)?;
                return Ok(Some(toml::from_str(&content)?));
            }
        }
        Ok(None)
    }

    /// Load project-level config from .optshape.toml
    fn load_project_config(cwd: &Path) -> Result<Option<Self>, ConfigError> {
        let path = cwd.join(".optshape.toml");
        if path.exists() {
            let content = fs::read_to_string(&path)?;
            return Ok(Some(toml::from_str(&content)?));
        }
        Ok(None)
    }

    /// Get user config path.
    /// Respects OPTSHAPE_CONFIG env var for testing.
    fn user_config_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var("OPTSHAPE_CONFIG") {
            return Some(PathBuf::from(path));
        }
        dirs::config_dir().map(|d| d.join("optshape/grammar.toml"))
    }

    /// Merge another config into this one (other takes precedence for scalars).
    fn merge(&mut self, other: Config) {
        self.options.extend(other.options);
        self.commands.extend(other.commands);

        let grammar = other.grammar;
        if grammar.preset.is_some() {
            self.grammar.preset = grammar.preset;
        }
        if grammar.long_prefixes.is_some() {
            self.grammar.long_prefixes = grammar.long_prefixes;
        }
        if grammar.short_prefixes.is_some() {
            self.grammar.short_prefixes = grammar.short_prefixes;
        }
        if grammar.separators.is_some() {
            self.grammar.separators = grammar.separators;
        }
        if grammar.permute.is_some() {
            self.grammar.permute = grammar.permute;
        }

        if other.audit.enabled {
            self.audit.enabled = true;
            if other.audit.path.is_some() {
                self.audit.path = other.audit.path;
            }
        }
    }

    /// Validate and build the parser grammar and command registry.
    pub fn compile(self) -> Result<CompiledConfig, ConfigError> {
        let parser = self.compile_grammar()?;
        let commands = compile_commands(&self.commands)?;
        Ok(CompiledConfig {
            raw: self,
            parser,
            commands,
        })
    }

    fn compile_grammar(&self) -> Result<ParserConfig, ConfigError> {
        let base = self.grammar.preset.unwrap_or_default().parser_config();
        let long_prefixes = self
            .grammar
            .long_prefixes
            .clone()
            .unwrap_or_else(|| base.long_prefixes().to_vec());
        let short_prefixes = self
            .grammar
            .short_prefixes
            .clone()
            .unwrap_or_else(|| base.short_prefixes().to_vec());
        let separators = self
            .grammar
            .separators
            .clone()
            .unwrap_or_else(|| base.separators().to_vec());

        for prefix in long_prefixes.iter().chain(short_prefixes.iter()) {
            if prefix.is_empty() || prefix.chars().any(char::is_whitespace) {
                return Err(ConfigError::InvalidPrefix(prefix.clone()));
            }
        }
        if let Some(prefix) = long_prefixes.iter().find(|p| short_prefixes.contains(p)) {
            return Err(ConfigError::OverlappingPrefix(prefix.clone()));
        }

        let permute = self.grammar.permute.unwrap_or(base.permutes());
        let mut parser = ParserConfig::new().permute(permute);
        for prefix in long_prefixes {
            parser = parser.long_prefix(prefix);
        }
        for prefix in short_prefixes {
            parser = parser.short_prefix(prefix);
        }
        for separator in separators {
            parser = parser.separator(separator);
        }

        let mut long_seen = HashSet::new();
        let mut short_seen = HashSet::new();
        for spec in &self.options {
            if spec.long.is_none() && spec.short.is_none() {
                return Err(ConfigError::Unnamed);
            }
            if let Some(name) = &spec.long {
                check_name(name)?;
                if !long_seen.insert(name.clone()) {
                    return Err(ConfigError::Duplicate {
                        class: "long",
                        name: name.clone(),
                    });
                }
                parser = parser.long(name.clone(), spec.arity);
            }
            if let Some(name) = &spec.short {
                check_name(name)?;
                let mut chars = name.chars();
                let (Some(c), None) = (chars.next(), chars.next()) else {
                    return Err(ConfigError::ShortNotChar(name.clone()));
                };
                if !short_seen.insert(c) {
                    return Err(ConfigError::Duplicate {
                        class: "short",
                        name: name.clone(),
                    });
                }
                parser = parser.short(c, spec.arity);
            }
        }

        Ok(parser)
    }
}

fn check_name(name: &str) -> Result<(), ConfigError> {
    if NAME_RE.is_match(name) {
        Ok(())
    } else {
        Err(ConfigError::InvalidName(name.to_string()))
    }
}

fn compile_commands(specs: &BTreeMap<String, CommandSpec>) -> Result<Registry, ConfigError> {
    let mut registry = Registry::new();
    for (name, spec) in specs {
        check_name(name)?;
        let capability = if spec.commands.is_empty() {
            Capability::leaf(spec.help_flag.clone())
        } else {
            Capability::Dispatcher(compile_commands(&spec.commands)?)
        };
        registry = registry.command(name.clone(), capability);
    }
    Ok(registry)
}
