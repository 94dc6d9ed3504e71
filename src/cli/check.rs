//! Validate query syntax and dump token sequences

use super::CliError;
use crate::{ast::{Expr, Token}, lexer, parser};

/// Validates a query's syntax, returning the parsed expression.
pub fn execute_check(query: &str) -> Result<Expr, CliError> {
    Ok(parser::parse_query(query)?)
}

/// Tokenizes a query for diagnostics output.
pub fn execute_tokens(query: &str) -> Result<Vec<Token>, CliError> {
    Ok(lexer::tokenize(query)?)
}
