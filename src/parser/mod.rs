//! Option parsing engine.
//!
//! Turns an argument vector into a flat list of [`Item`]s under a
//! [`ParserConfig`] grammar. Parsing runs in three passes:
//!
//! 1. Early interception: every token is checked for a help trigger or a
//!    registered [`Arity::Early`] option before anything can fail.
//! 2. Structural scan: left to right, resolving bundles, inline values and
//!    next-token values.
//! 3. Permutation (when enabled): options are moved ahead of positionals,
//!    up to the first separator.

mod config;
mod error;
mod item;

pub use config::{Arity, ParserConfig, PrefixClass};
pub use error::ParseError;
pub use item::{Item, OptionValue, Spelling};

use crate::lexer::{Token, scan};
use std::slice;

/// Result of a successful parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOutcome {
    /// Parsed items; the first is always [`Item::ProgramName`].
    Items(Vec<Item>),
    /// A help trigger was found; the caller should show usage.
    HelpRequested,
}

impl ParseOutcome {
    pub fn is_help(&self) -> bool {
        matches!(self, ParseOutcome::HelpRequested)
    }

    pub fn items(&self) -> Option<&[Item]> {
        match self {
            ParseOutcome::Items(items) => Some(items),
            ParseOutcome::HelpRequested => None,
        }
    }
}

/// Parse `argv` (program name first) under `config`.
pub fn parse<S: AsRef<str>>(argv: &[S], config: &ParserConfig) -> Result<ParseOutcome, ParseError> {
    let tokens = scan(argv, &config.all_prefixes(), config.separators())?;

    if let Some(outcome) = intercept_early(&tokens, config) {
        return Ok(outcome);
    }

    let items = scan_structure(&tokens, config)?;
    if config.permutes() {
        Ok(ParseOutcome::Items(permute(items)))
    } else {
        Ok(ParseOutcome::Items(items))
    }
}

/// A parser bound to one grammar, for callers parsing many argvs.
#[derive(Debug, Clone, Copy)]
pub struct Parser<'a> {
    config: &'a ParserConfig,
}

impl<'a> Parser<'a> {
    pub fn new(config: &'a ParserConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &'a ParserConfig {
        self.config
    }

    pub fn parse<S: AsRef<str>>(&self, argv: &[S]) -> Result<ParseOutcome, ParseError> {
        parse(argv, self.config)
    }
}

fn intercept_early(tokens: &[Token], config: &ParserConfig) -> Option<ParseOutcome> {
    let program = match tokens.first() {
        Some(Token::ProgramName { text, .. }) => text,
        _ => {
            debug_assert!(false, "expected program name as first token");
            return None;
        }
    };

    for token in tokens {
        let Token::Option { prefix, raw, .. } = token else {
            continue;
        };

        match config.class_of(prefix) {
            Some(PrefixClass::Long) => {
                if raw == "help" && config.long_arity("help").is_none() {
                    return Some(ParseOutcome::HelpRequested);
                }
                if raw == "h" && !config.has_short_options() && config.long_arity("h").is_none() {
                    return Some(ParseOutcome::HelpRequested);
                }
                // `--version=x` is left to the structural scan, which rejects it.
                if config.long_arity(raw) == Some(Arity::Early) {
                    return Some(early_items(program, raw, prefix, false));
                }
            }
            Some(PrefixClass::Short) => {
                let mut chars = raw.chars();
                let (Some(c), None) = (chars.next(), chars.next()) else {
                    continue;
                };
                match config.short_arity(c) {
                    None if c == 'h' => return Some(ParseOutcome::HelpRequested),
                    Some(Arity::Early) => return Some(early_items(program, raw, prefix, true)),
                    _ => {}
                }
            }
            None => {}
        }
    }

    None
}

fn early_items(program: &str, name: &str, prefix: &str, is_short: bool) -> ParseOutcome {
    ParseOutcome::Items(vec![
        Item::program_name(program),
        Item::OptionValue(OptionValue {
            name: name.to_string(),
            value: "true".to_string(),
            is_short,
            prefix: prefix.to_string(),
            spelling: Spelling::Bare,
            bundled: false,
        }),
    ])
}

fn scan_structure(tokens: &[Token], config: &ParserConfig) -> Result<Vec<Item>, ParseError> {
    let mut items = Vec::with_capacity(tokens.len());
    let mut parsing = true;
    let mut rest = tokens.iter();

    while let Some(token) = rest.next() {
        match token {
            Token::ProgramName { text, .. } => items.push(Item::program_name(text)),
            _ if !parsing => items.push(Item::positional(token.text())),
            Token::Separator { text, .. } => {
                items.push(Item::separator(text));
                parsing = false;
            }
            Token::Argument { text, .. } => {
                items.push(Item::positional(text));
                if !config.permutes() {
                    parsing = false;
                }
            }
            Token::Option { prefix, raw, .. } => match config.class_of(prefix) {
                Some(PrefixClass::Long) => {
                    items.push(parse_long(prefix, raw, &mut rest, config)?);
                }
                Some(PrefixClass::Short) => {
                    parse_short(prefix, raw, &mut rest, config, &mut items)?;
                }
                None => items.push(Item::positional(token.text())),
            },
        }
    }

    Ok(items)
}

fn parse_long(
    prefix: &str,
    raw: &str,
    rest: &mut slice::Iter<'_, Token>,
    config: &ParserConfig,
) -> Result<Item, ParseError> {
    let (name, inline) = match raw.split_once('=') {
        Some((name, value)) => (name, Some(value)),
        None => (raw, None),
    };

    let Some(arity) = config.long_arity(name) else {
        return Err(ParseError::UnknownOption {
            name: name.to_string(),
            is_short: false,
            prefix: prefix.to_string(),
        });
    };

    let (value, spelling) = match (arity, inline) {
        (Arity::None | Arity::Early, Some(value)) => {
            return Err(ParseError::InvalidOptionValue {
                name: name.to_string(),
                value: value.to_string(),
            });
        }
        (Arity::None | Arity::Early, None) => ("true".to_string(), Spelling::Bare),
        (Arity::Required | Arity::Optional, Some(value)) => (value.to_string(), Spelling::Inline),
        (Arity::Optional, None) => (String::new(), Spelling::Bare),
        (Arity::Required, None) => (next_value(name, rest)?, Spelling::NextToken),
    };

    Ok(Item::OptionValue(OptionValue {
        name: name.to_string(),
        value,
        is_short: false,
        prefix: prefix.to_string(),
        spelling,
        bundled: false,
    }))
}

/// Walk a short-option token one character at a time.
fn parse_short(
    prefix: &str,
    raw: &str,
    rest: &mut slice::Iter<'_, Token>,
    config: &ParserConfig,
    items: &mut Vec<Item>,
) -> Result<(), ParseError> {
    for (offset, c) in raw.char_indices() {
        let Some(arity) = config.short_arity(c) else {
            return Err(ParseError::UnknownOption {
                name: c.to_string(),
                is_short: true,
                prefix: prefix.to_string(),
            });
        };

        // The rest of the token after this character, if any.
        let remainder = &raw[offset + c.len_utf8()..];
        let (value, spelling, stop) = match arity {
            Arity::None | Arity::Early => ("true".to_string(), Spelling::Bare, false),
            Arity::Required | Arity::Optional if !remainder.is_empty() => {
                (remainder.to_string(), Spelling::Inline, true)
            }
            Arity::Optional => (String::new(), Spelling::Bare, false),
            Arity::Required => (next_value(&c.to_string(), rest)?, Spelling::NextToken, false),
        };

        items.push(Item::OptionValue(OptionValue {
            name: c.to_string(),
            value,
            is_short: true,
            prefix: prefix.to_string(),
            spelling,
            bundled: offset > 0,
        }));

        if stop {
            break;
        }
    }

    Ok(())
}

/// Take the next token as an option value.
fn next_value(name: &str, rest: &mut slice::Iter<'_, Token>) -> Result<String, ParseError> {
    match rest.next() {
        None => Err(ParseError::OptionRequiresValue {
            name: name.to_string(),
        }),
        Some(Token::Separator { text, .. }) => Err(ParseError::InvalidOptionValue {
            name: name.to_string(),
            value: text.clone(),
        }),
        Some(token) => Ok(token.text()),
    }
}

/// Move options ahead of positionals, up to the first separator.
fn permute(mut items: Vec<Item>) -> Vec<Item> {
    let split = items
        .iter()
        .position(|item| matches!(item, Item::Separator { .. }))
        .unwrap_or(items.len());
    let tail = items.split_off(split);

    let (mut permuted, positionals): (Vec<Item>, Vec<Item>) = items
        .into_iter()
        .partition(|item| !matches!(item, Item::Positional { .. }));
    permuted.extend(positionals);
    permuted.extend(tail);
    permuted
}
