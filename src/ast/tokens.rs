/// Lexical category of a [`Token`].
///
/// The set is closed: every non-whitespace character of a query belongs to
/// exactly one token of one of these kinds, with [`TokenKind::Other`] as the
/// catch-all so no input character is ever dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Field path: a run of letters, digits, underscores and dots
    ///
    /// A dotted path is a single token, not three.
    ///
    /// # Examples
    /// ```text
    /// kind
    /// abc.xyz
    /// inputs.model_name
    /// ```
    Identifier,

    /// Number: a run consisting entirely of ASCII digits
    ///
    /// # Examples
    /// ```text
    /// 0
    /// 123
    /// ```
    Number,

    /// Operator: a run of operator symbols (`=`, `<`, `>`, `!`)
    ///
    /// Consecutive symbols merge into one token (`<=` is a single token,
    /// and so is the invalid `=<`); whether the combination is a recognized
    /// comparison operator is decided by the parser, not the lexer.
    Operator,

    /// String literal enclosed in double quotes
    ///
    /// A backslash immediately before a quote makes that quote literal
    /// content rather than a terminator.
    ///
    /// # Examples
    /// ```text
    /// "hello"
    /// "a\"b"
    /// ```
    String,

    /// Any single character matching no other class
    ///
    /// # Examples
    /// ```text
    /// $
    /// #
    /// ```
    Other,
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TokenKind::Identifier => "identifier",
            TokenKind::Number => "number",
            TokenKind::Operator => "operator",
            TokenKind::String => "string",
            TokenKind::Other => "other",
        };
        write!(f, "{}", name)
    }
}

/// A minimal lexical unit: category, exact source text, and start offset.
///
/// `lexeme` is the exact slice of the query the token covers; for
/// [`TokenKind::String`] it includes the surrounding quotes and any escape
/// backslashes (the parser decodes the content). `position` is the char
/// offset of the token's first character, used for caret diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub position: usize,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, position: usize) -> Self {
        Token {
            kind,
            lexeme: lexeme.into(),
            position,
        }
    }

    /// Char offset one past the last character of the token.
    pub fn end(&self) -> usize {
        self.position + self.lexeme.chars().count()
    }
}
