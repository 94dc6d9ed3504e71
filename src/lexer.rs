use crate::ast::{Token, TokenKind};

/// Errors produced by the lexer.
///
/// The lexer is total over every other input: any character that matches no
/// token class becomes a one-char [`TokenKind::Other`] token rather than an
/// error. Only a string literal left open at end of input fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenizeError {
    /// A string literal reached end of input without a closing quote.
    /// `position` is the char offset of the opening quote.
    UnterminatedString { position: usize },
}

impl std::fmt::Display for TokenizeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenizeError::UnterminatedString { position } => {
                write!(f, "unterminated string starting at position {}", position)
            }
        }
    }
}

impl std::error::Error for TokenizeError {}

fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_' || ch == '.'
}

fn is_operator_char(ch: char) -> bool {
    matches!(ch, '=' | '<' | '>' | '!')
}

pub struct Lexer {
    input: Vec<char>,
    position: usize,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Lexer {
            input: input.chars().collect(),
            position: 0,
        }
    }

    fn current_char(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn peek_char(&self, offset: usize) -> Option<char> {
        self.input.get(self.position + offset).copied()
    }

    fn advance(&mut self) {
        self.position += 1;
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.current_char() {
            if ch.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    /// Maximal run of letters, digits, underscores and dots.
    fn read_word(&mut self) -> String {
        let mut result = String::new();
        while let Some(ch) = self.current_char() {
            if is_word_char(ch) {
                result.push(ch);
                self.advance();
            } else {
                break;
            }
        }
        result
    }

    /// Maximal run of operator symbols; validity of the combination is the
    /// parser's concern.
    fn read_operator(&mut self) -> String {
        let mut result = String::new();
        while let Some(ch) = self.current_char() {
            if is_operator_char(ch) {
                result.push(ch);
                self.advance();
            } else {
                break;
            }
        }
        result
    }

    /// Reads a string literal through its closing quote, keeping the raw
    /// source text (quotes and escape backslashes included).
    fn read_string(&mut self) -> Result<String, TokenizeError> {
        let start = self.position;
        let mut lexeme = String::from('"');
        self.advance(); // consume opening quote

        while let Some(ch) = self.current_char() {
            match ch {
                '"' => {
                    lexeme.push('"');
                    self.advance();
                    return Ok(lexeme);
                }
                '\\' if self.peek_char(1) == Some('"') => {
                    lexeme.push('\\');
                    lexeme.push('"');
                    self.advance();
                    self.advance();
                }
                _ => {
                    lexeme.push(ch);
                    self.advance();
                }
            }
        }

        Err(TokenizeError::UnterminatedString { position: start })
    }

    /// Returns the next token, or `None` at end of input.
    ///
    /// Always consumes at least one character per token, so tokenization
    /// terminates on every input. Identical input yields an identical token
    /// sequence.
    pub fn next_token(&mut self) -> Result<Option<Token>, TokenizeError> {
        self.skip_whitespace();

        let start = self.position;
        let Some(ch) = self.current_char() else {
            return Ok(None);
        };

        let token = if is_word_char(ch) {
            let lexeme = self.read_word();
            // A run of pure digits is a number; anything else in the word
            // class (including dotted paths and digit-prefixed names) is a
            // path identifier.
            let kind = if lexeme.chars().all(|c| c.is_ascii_digit()) {
                TokenKind::Number
            } else {
                TokenKind::Identifier
            };
            Token::new(kind, lexeme, start)
        } else if is_operator_char(ch) {
            Token::new(TokenKind::Operator, self.read_operator(), start)
        } else if ch == '"' {
            Token::new(TokenKind::String, self.read_string()?, start)
        } else {
            self.advance();
            Token::new(TokenKind::Other, ch.to_string(), start)
        };

        Ok(Some(token))
    }
}

/// Tokenizes a whole query string.
///
/// Whitespace runs are skipped and never emitted; every other character
/// belongs to exactly one token. Empty or all-whitespace input yields an
/// empty sequence.
pub fn tokenize(input: &str) -> Result<Vec<Token>, TokenizeError> {
    let mut lexer = Lexer::new(input);
    let mut tokens = Vec::new();
    while let Some(token) = lexer.next_token()? {
        tokens.push(token);
    }
    Ok(tokens)
}

#[test]
fn test_dotted_path_is_one_token() {
    let tokens = tokenize("abc.xyz = 123").unwrap();
    assert_eq!(
        tokens,
        vec![
            Token::new(TokenKind::Identifier, "abc.xyz", 0),
            Token::new(TokenKind::Operator, "=", 8),
            Token::new(TokenKind::Number, "123", 10),
        ]
    );
}

#[test]
fn test_unknown_char_becomes_other() {
    let tokens = tokenize("$").unwrap();
    assert_eq!(tokens, vec![Token::new(TokenKind::Other, "$", 0)]);
}
