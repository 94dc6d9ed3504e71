//! # ctxq - Abstract Syntax Tree
//!
//! This module defines the lexical tokens and the parsed expression shape for
//! the ctxq query language, a small comparison language for filtering nodes
//! of a hierarchical context tree.
//!
//! ## Architecture Overview
//!
//! The AST module is organized into focused submodules:
//!
//! - **[tokens]** - Lexical tokens produced by the lexer
//! - **[operators]** - Comparison operators
//! - **[expressions]** - The parsed comparison expression and its literal
//!
//! ## Quick Start
//!
//! ```text
//! kind = "query"
//! tag = alpha
//! inputs.model = "gpt-4"
//! duration >= 120
//! ```
//!
//! Every query is a single comparison: a dot-separated field path, a
//! comparison operator, and a number or string literal. The reserved paths
//! `kind` and `tag` address a node's kind string and tag set; every other
//! path resolves through the node's attribute mapping.
//!
//! Tokens and expressions are immutable once constructed: tokens are created
//! only by the lexer, expressions only by the parser, and both are built
//! fresh per query string.

pub mod expressions;
pub mod operators;
pub mod tokens;

pub use expressions::{Expr, Literal};
pub use operators::CompareOp;
pub use tokens::{Token, TokenKind};
