use crate::ast::CompareOp;

/// Literal on the right-hand side of a comparison.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// Integer literal
    ///
    /// # Example
    /// ```text
    /// duration >= 120
    /// ```
    Number(i64),

    /// String literal, either quoted or a bareword
    ///
    /// # Examples
    /// ```text
    /// kind = "query"
    /// tag = alpha
    /// ```
    String(String),
}

impl Literal {
    /// Textual form of the literal, used for exact comparisons.
    pub fn as_text(&self) -> String {
        match self {
            Literal::Number(n) => n.to_string(),
            Literal::String(s) => s.clone(),
        }
    }
}

/// A parsed query: one comparison of a field path against a literal.
///
/// Exists only if parsing fully succeeded; there is no partial or
/// with-warnings state. The path is the dotted lexeme split on `.`
/// (a quoted path stays a single segment).
///
/// # Examples
/// ```text
/// abc.xyz = 123    // path ["abc", "xyz"], Eq, Number(123)
/// kind = "query"   // path ["kind"], Eq, String("query")
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub path: Vec<String>,
    pub op: CompareOp,
    pub literal: Literal,
}
