//! CLI support for ctxq
//!
//! Provides programmatic access to the ctxq CLI operations for embedding in
//! other tools.

mod check;
mod filter;

pub use check::{execute_check, execute_tokens};
pub use filter::{FilterOptions, execute_filter};

use std::io;

use crate::{context::ContextError, lexer::TokenizeError, parser::ParseError, parser::QueryError};

/// Errors that can occur during CLI operations
#[derive(Debug)]
pub enum CliError {
    /// Tokenizer error
    Tokenize(TokenizeError),
    /// Parser error
    Parse(ParseError),
    /// JSON parsing error
    Json(serde_json::Error),
    /// Context tree decoding error
    Context(ContextError),
    /// IO error
    Io(io::Error),
    /// No input provided
    NoInput,
}

impl CliError {
    /// Char offset into the query for errors that point at one, so callers
    /// can render a caret diagnostic.
    pub fn position(&self) -> Option<usize> {
        match self {
            CliError::Tokenize(TokenizeError::UnterminatedString { position }) => Some(*position),
            CliError::Parse(e) => Some(e.position()),
            _ => None,
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Tokenize(e) => write!(f, "Tokenize error: {}", e),
            CliError::Parse(e) => write!(f, "Parse error: {}", e),
            CliError::Json(e) => write!(f, "Invalid JSON: {}", e),
            CliError::Context(e) => write!(f, "Invalid context tree: {}", e),
            CliError::Io(e) => write!(f, "IO error: {}", e),
            CliError::NoInput => {
                write!(f, "No input provided. Use --input or pipe a context tree to stdin.")
            }
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Tokenize(e) => Some(e),
            CliError::Parse(e) => Some(e),
            CliError::Json(e) => Some(e),
            CliError::Context(e) => Some(e),
            CliError::Io(e) => Some(e),
            CliError::NoInput => None,
        }
    }
}

impl From<TokenizeError> for CliError {
    fn from(e: TokenizeError) -> Self {
        CliError::Tokenize(e)
    }
}

impl From<ParseError> for CliError {
    fn from(e: ParseError) -> Self {
        CliError::Parse(e)
    }
}

impl From<QueryError> for CliError {
    fn from(e: QueryError) -> Self {
        match e {
            QueryError::Tokenize(e) => CliError::Tokenize(e),
            QueryError::Parse(e) => CliError::Parse(e),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Json(e)
    }
}

impl From<ContextError> for CliError {
    fn from(e: ContextError) -> Self {
        CliError::Context(e)
    }
}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        CliError::Io(e)
    }
}
