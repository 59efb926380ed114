//! Grammar configuration for the option parser.

use serde::Deserialize;
use std::collections::BTreeMap;

/// How many values an option consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Arity {
    /// Boolean presence flag.
    None,
    /// Requires a value, inline or in the next token.
    Required,
    /// Takes a value only when it is written inline.
    Optional,
    /// Help-like; recognized before structural parsing.
    Early,
}

/// Which set of prefixes an option name is matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefixClass {
    /// Never bundled, may use `name=value`.
    Long,
    /// Single-character, bundlable.
    Short,
}

/// Immutable grammar consulted by every parse.
///
/// Built once through the preset constructors and the registration methods,
/// then shared read-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserConfig {
    long_options: BTreeMap<String, Arity>,
    short_options: BTreeMap<char, Arity>,
    long_prefixes: Vec<String>,
    short_prefixes: Vec<String>,
    separators: Vec<String>,
    permute: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            long_options: BTreeMap::new(),
            short_options: BTreeMap::new(),
            long_prefixes: Vec::new(),
            short_prefixes: Vec::new(),
            separators: Vec::new(),
            permute: true,
        }
    }
}

impl ParserConfig {
    /// Empty grammar: no prefixes, no separators, permutation enabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// GNU getopt: `--long`, `-s`, `--` separator, permutation.
    pub fn gnu() -> Self {
        Self::new()
            .long_prefix("--")
            .short_prefix("-")
            .separator("--")
    }

    /// dig-style: GNU plus `+long` options.
    pub fn dig() -> Self {
        Self::gnu().long_prefix("+")
    }

    /// Go `flag` package: `-long` only, stops at the first argument.
    pub fn go() -> Self {
        Self::new().long_prefix("-").separator("--").permute(false)
    }

    /// Windows: `/long` only.
    pub fn windows() -> Self {
        Self::new().long_prefix("/")
    }

    /// Add a long-option prefix.
    ///
    /// # Panics
    ///
    /// Panics if the prefix is empty or already registered as a short prefix.
    pub fn long_prefix(mut self, prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        assert!(!prefix.is_empty(), "empty long prefix");
        assert!(
            !self.short_prefixes.contains(&prefix),
            "prefix `{}` is already a short prefix",
            prefix
        );
        if !self.long_prefixes.contains(&prefix) {
            self.long_prefixes.push(prefix);
        }
        self
    }

    /// Add a short-option prefix.
    ///
    /// # Panics
    ///
    /// Panics if the prefix is empty or already registered as a long prefix.
    pub fn short_prefix(mut self, prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        assert!(!prefix.is_empty(), "empty short prefix");
        assert!(
            !self.long_prefixes.contains(&prefix),
            "prefix `{}` is already a long prefix",
            prefix
        );
        if !self.short_prefixes.contains(&prefix) {
            self.short_prefixes.push(prefix);
        }
        self
    }

    /// Add a separator string (typically `--`).
    pub fn separator(mut self, separator: impl Into<String>) -> Self {
        let separator = separator.into();
        if !self.separators.contains(&separator) {
            self.separators.push(separator);
        }
        self
    }

    /// Enable or disable permutation of options before positionals.
    pub fn permute(mut self, permute: bool) -> Self {
        self.permute = permute;
        self
    }

    /// Register a long option.
    ///
    /// # Panics
    ///
    /// Panics if `name` is already registered as a long option.
    pub fn long(mut self, name: impl Into<String>, arity: Arity) -> Self {
        let name = name.into();
        assert!(
            !self.long_options.contains_key(&name),
            "long option `{}` registered twice",
            name
        );
        self.long_options.insert(name, arity);
        self
    }

    /// Register a short option.
    ///
    /// # Panics
    ///
    /// Panics if `name` is already registered as a short option.
    pub fn short(mut self, name: char, arity: Arity) -> Self {
        assert!(
            !self.short_options.contains_key(&name),
            "short option `{}` registered twice",
            name
        );
        self.short_options.insert(name, arity);
        self
    }

    pub fn long_arity(&self, name: &str) -> Option<Arity> {
        self.long_options.get(name).copied()
    }

    pub fn short_arity(&self, name: char) -> Option<Arity> {
        self.short_options.get(&name).copied()
    }

    pub fn has_short_options(&self) -> bool {
        !self.short_options.is_empty()
    }

    pub fn long_prefixes(&self) -> &[String] {
        &self.long_prefixes
    }

    pub fn short_prefixes(&self) -> &[String] {
        &self.short_prefixes
    }

    pub fn separators(&self) -> &[String] {
        &self.separators
    }

    pub fn permutes(&self) -> bool {
        self.permute
    }

    /// Prefix class of a prefix produced by the tokenizer.
    pub fn class_of(&self, prefix: &str) -> Option<PrefixClass> {
        if self.long_prefixes.iter().any(|p| p == prefix) {
            Some(PrefixClass::Long)
        } else if self.short_prefixes.iter().any(|p| p == prefix) {
            Some(PrefixClass::Short)
        } else {
            None
        }
    }

    /// All prefixes handed to the tokenizer.
    pub(crate) fn all_prefixes(&self) -> Vec<String> {
        self.long_prefixes
            .iter()
            .chain(self.short_prefixes.iter())
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_permutes() {
        let config = ParserConfig::default();
        assert!(config.permutes());
        assert!(config.long_prefixes().is_empty());
    }

    #[test]
    fn test_presets() {
        let gnu = ParserConfig::gnu();
        assert_eq!(gnu.long_prefixes(), ["--"]);
        assert_eq!(gnu.short_prefixes(), ["-"]);
        assert_eq!(gnu.separators(), ["--"]);
        assert!(gnu.permutes());

        let dig = ParserConfig::dig();
        assert_eq!(dig.long_prefixes(), ["--", "+"]);

        let go = ParserConfig::go();
        assert_eq!(go.long_prefixes(), ["-"]);
        assert!(go.short_prefixes().is_empty());
        assert!(!go.permutes());

        let windows = ParserConfig::windows();
        assert_eq!(windows.long_prefixes(), ["/"]);
        assert!(windows.separators().is_empty());
    }

    #[test]
    fn test_class_of() {
        let config = ParserConfig::dig();
        assert_eq!(config.class_of("+"), Some(PrefixClass::Long));
        assert_eq!(config.class_of("-"), Some(PrefixClass::Short));
        assert_eq!(config.class_of("/"), None);
    }

    #[test]
    fn test_same_name_in_both_classes() {
        let config = ParserConfig::gnu()
            .long("v", Arity::None)
            .short('v', Arity::Required);
        assert_eq!(config.long_arity("v"), Some(Arity::None));
        assert_eq!(config.short_arity('v'), Some(Arity::Required));
    }

    #[test]
    #[should_panic(expected = "registered twice")]
    fn test_duplicate_long_panics() {
        let _ = ParserConfig::gnu()
            .long("file", Arity::Required)
            .long("file", Arity::None);
    }

    #[test]
    #[should_panic(expected = "registered twice")]
    fn test_duplicate_short_panics() {
        let _ = ParserConfig::gnu()
            .short('f', Arity::Required)
            .short('f', Arity::None);
    }

    #[test]
    #[should_panic(expected = "already a long prefix")]
    fn test_overlapping_prefix_panics() {
        let _ = ParserConfig::go().short_prefix("-");
    }
}
