//! Lexical scanning of argument vectors.

mod tokenizer;

pub use tokenizer::{ScanError, Token, scan};
