//! Prefix/separator-aware tokenization of an argument vector.

use thiserror::Error;

/// Errors that can occur while scanning an argument vector.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScanError {
    #[error("missing program name")]
    MissingProgramName,
}

/// A token produced from a single argv element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// The first element of argv.
    ProgramName { index: usize, text: String },
    /// An element starting with a recognized prefix.
    Option {
        index: usize,
        prefix: String,
        /// Everything after the prefix, unsplit (e.g. `vffile.txt`, `file=x`).
        raw: String,
    },
    /// An element exactly equal to a separator string.
    Separator { index: usize, text: String },
    /// Anything else.
    Argument { index: usize, text: String },
}

impl Token {
    /// Position of this token in the original argv.
    pub fn index(&self) -> usize {
        match self {
            Token::ProgramName { index, .. }
            | Token::Option { index, .. }
            | Token::Separator { index, .. }
            | Token::Argument { index, .. } => *index,
        }
    }

    /// The argv element this token was scanned from.
    pub fn text(&self) -> String {
        match self {
            Token::ProgramName { text, .. }
            | Token::Separator { text, .. }
            | Token::Argument { text, .. } => text.clone(),
            Token::Option { prefix, raw, .. } => format!("{}{}", prefix, raw),
        }
    }
}

/// Scan `argv` into tokens.
///
/// The first element is always the program name. Separators are matched
/// before prefixes, so `--` with GNU settings is a separator and never an
/// option. Prefixes are tried longest first. An element consisting of just a
/// prefix (e.g. `-`) is a plain argument.
pub fn scan<S: AsRef<str>>(
    argv: &[S],
    prefixes: &[String],
    separators: &[String],
) -> Result<Vec<Token>, ScanError> {
    let Some((program, rest)) = argv.split_first() else {
        return Err(ScanError::MissingProgramName);
    };

    let mut ordered: Vec<&str> = prefixes.iter().map(String::as_str).collect();
    ordered.sort_by(|a, b| b.len().cmp(&a.len()));

    let mut tokens = Vec::with_capacity(argv.len());
    tokens.push(Token::ProgramName {
        index: 0,
        text: program.as_ref().to_string(),
    });

    for (offset, arg) in rest.iter().enumerate() {
        tokens.push(classify(offset + 1, arg.as_ref(), &ordered, separators));
    }

    Ok(tokens)
}

fn classify(index: usize, arg: &str, prefixes: &[&str], separators: &[String]) -> Token {
    if separators.iter().any(|s| s == arg) {
        return Token::Separator {
            index,
            text: arg.to_string(),
        };
    }

    for prefix in prefixes {
        if prefix.is_empty() {
            continue;
        }
        if let Some(raw) = arg.strip_prefix(prefix) {
            if raw.is_empty() {
                break;
            }
            return Token::Option {
                index,
                prefix: prefix.to_string(),
                raw: raw.to_string(),
            };
        }
    }

    Token::Argument {
        index,
        text: arg.to_string(),
    }
}
