use crate::{
    ast::{CompareOp, Expr, Literal, Token, TokenKind},
    lexer::{self, TokenizeError},
};

/// Errors produced while parsing a token sequence.
///
/// Each carries the char offset of the offending token so callers can render
/// a caret diagnostic under the query text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A token of the wrong kind, or end of input where a token was
    /// expected. `found` is `None` at end of input, in which case `position`
    /// is one past the last consumed token.
    UnexpectedToken {
        position: usize,
        found: Option<TokenKind>,
        expected: &'static str,
    },

    /// An operator run outside the recognized comparison set (e.g. `=<`).
    /// Distinct from a missing operator, which is an [`ParseError::UnexpectedToken`].
    UnrecognizedOperator { position: usize, lexeme: String },

    /// Tokens left over after a complete comparison, at the first extra
    /// token's position.
    TrailingInput { position: usize },
}

impl ParseError {
    /// Char offset the error points at.
    pub fn position(&self) -> usize {
        match self {
            ParseError::UnexpectedToken { position, .. }
            | ParseError::UnrecognizedOperator { position, .. }
            | ParseError::TrailingInput { position } => *position,
        }
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::UnexpectedToken {
                position,
                found: Some(found),
                expected,
            } => write!(
                f,
                "expected {}, found {} at position {}",
                expected, found, position
            ),
            ParseError::UnexpectedToken {
                position,
                found: None,
                expected,
            } => write!(
                f,
                "expected {}, found end of input at position {}",
                expected, position
            ),
            ParseError::UnrecognizedOperator { position, lexeme } => {
                write!(f, "unrecognized operator '{}' at position {}", lexeme, position)
            }
            ParseError::TrailingInput { position } => {
                write!(f, "unexpected trailing input at position {}", position)
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// Either stage of query compilation failing, for callers that start from
/// raw text via [`parse_query`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    Tokenize(TokenizeError),
    Parse(ParseError),
}

impl QueryError {
    pub fn position(&self) -> usize {
        match self {
            QueryError::Tokenize(TokenizeError::UnterminatedString { position }) => *position,
            QueryError::Parse(e) => e.position(),
        }
    }
}

impl std::fmt::Display for QueryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QueryError::Tokenize(e) => write!(f, "{}", e),
            QueryError::Parse(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for QueryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            QueryError::Tokenize(e) => Some(e),
            QueryError::Parse(e) => Some(e),
        }
    }
}

impl From<TokenizeError> for QueryError {
    fn from(e: TokenizeError) -> Self {
        QueryError::Tokenize(e)
    }
}

impl From<ParseError> for QueryError {
    fn from(e: ParseError) -> Self {
        QueryError::Parse(e)
    }
}

/// Decodes a string token's raw lexeme: strips the surrounding quotes and
/// turns `\"` into a literal quote. Other backslashes are kept as-is.
fn decode_string(lexeme: &str) -> String {
    let chars: Vec<char> = lexeme.chars().collect();
    // Lexer-produced string lexemes always carry both quotes; stay safe on
    // caller-built tokens anyway.
    let inner = match chars.len() {
        0 | 1 => &[] as &[char],
        n => &chars[1..n - 1],
    };

    let mut result = String::new();
    let mut i = 0;
    while i < inner.len() {
        if inner[i] == '\\' && inner.get(i + 1) == Some(&'"') {
            result.push('"');
            i += 2;
        } else {
            result.push(inner[i]);
            i += 1;
        }
    }
    result
}

pub struct Parser {
    tokens: Vec<Token>,
    position: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Parser {
            tokens,
            position: 0,
        }
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.position).cloned();
        if token.is_some() {
            self.position += 1;
        }
        token
    }

    /// Char offset one past the last consumed token (0 before anything was
    /// consumed), used when the sequence ends early.
    fn end_position(&self) -> usize {
        match self.position.checked_sub(1).and_then(|i| self.tokens.get(i)) {
            Some(token) => token.end(),
            None => 0,
        }
    }

    fn unexpected(&self, found: Option<&Token>, expected: &'static str) -> ParseError {
        match found {
            Some(token) => ParseError::UnexpectedToken {
                position: token.position,
                found: Some(token.kind),
                expected,
            },
            None => ParseError::UnexpectedToken {
                position: self.end_position(),
                found: None,
                expected,
            },
        }
    }

    /// Parses `expression := path operator literal`, consuming the whole
    /// token sequence. Leftover tokens are an error, not ignored.
    pub fn parse(&mut self) -> Result<Expr, ParseError> {
        let path = self.parse_path()?;
        let op = self.parse_operator()?;
        let literal = self.parse_literal()?;

        if let Some(extra) = self.tokens.get(self.position) {
            return Err(ParseError::TrailingInput {
                position: extra.position,
            });
        }

        Ok(Expr { path, op, literal })
    }

    fn parse_path(&mut self) -> Result<Vec<String>, ParseError> {
        match self.next() {
            Some(token) if token.kind == TokenKind::Identifier => {
                Ok(token.lexeme.split('.').map(str::to_string).collect())
            }
            // A quoted path protects special characters, so it stays a
            // single segment.
            Some(token) if token.kind == TokenKind::String => {
                Ok(vec![decode_string(&token.lexeme)])
            }
            found => Err(self.unexpected(found.as_ref(), "a field path")),
        }
    }

    fn parse_operator(&mut self) -> Result<CompareOp, ParseError> {
        match self.next() {
            Some(token) if token.kind == TokenKind::Operator => {
                CompareOp::from_lexeme(&token.lexeme).ok_or(ParseError::UnrecognizedOperator {
                    position: token.position,
                    lexeme: token.lexeme,
                })
            }
            found => Err(self.unexpected(found.as_ref(), "a comparison operator")),
        }
    }

    fn parse_literal(&mut self) -> Result<Literal, ParseError> {
        match self.next() {
            Some(token) if token.kind == TokenKind::Number => {
                match token.lexeme.parse::<i64>() {
                    Ok(n) => Ok(Literal::Number(n)),
                    Err(_) => Err(ParseError::UnexpectedToken {
                        position: token.position,
                        found: Some(TokenKind::Number),
                        expected: "a number within the 64-bit signed integer range",
                    }),
                }
            }
            Some(token) if token.kind == TokenKind::String => {
                Ok(Literal::String(decode_string(&token.lexeme)))
            }
            // Barewords are taken as string literals, so `kind = foo` and
            // `tag = alpha` work without quoting.
            Some(token) if token.kind == TokenKind::Identifier => {
                Ok(Literal::String(token.lexeme))
            }
            found => Err(self.unexpected(found.as_ref(), "a number or string literal")),
        }
    }
}

/// Compiles a raw query string: tokenize, then parse.
pub fn parse_query(input: &str) -> Result<Expr, QueryError> {
    let tokens = lexer::tokenize(input)?;
    let mut parser = Parser::new(tokens);
    Ok(parser.parse()?)
}
