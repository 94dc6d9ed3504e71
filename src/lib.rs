pub mod ast;
pub mod cli;
pub mod context;
pub mod evaluator;
pub mod lexer;
pub mod opener;
pub mod output;
pub mod parser;
pub mod value;

pub use ast::{CompareOp, Expr, Literal, Token, TokenKind};
pub use context::{Context, ContextError, gather_kinds_and_tags};
pub use evaluator::{ancestors_of_matches, find_matches, matches};
pub use lexer::{Lexer, TokenizeError, tokenize};
pub use opener::{OpenerMode, initial_open, set_open};
pub use parser::{ParseError, Parser, QueryError, parse_query};
pub use value::Value;
