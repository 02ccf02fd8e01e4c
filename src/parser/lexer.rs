//! Lexer (tokenizer) for S-expression source
//!
//! Converts raw source text into a flat [`Token`] stream consumed by the parser.
//! The alphabet is deliberately tiny: parentheses, runs of ASCII digits, runs
//! of ASCII letters and ASCII whitespace. Anything else is a [`LexError`].

use super::ast::SourceLocation;
use log::debug;
use std::fmt;
use thiserror::Error;

/// Coarse token classification. `(` and `)` are both [`TokenKind::Paren`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Paren,
    Number,
    Identifier,
}

/// All token variants produced by the lexer.
///
/// Every variant carries a [`SourceLocation`] so that parse errors can report
/// an accurate line and column without a separate token→location table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    LParen(SourceLocation),
    RParen(SourceLocation),
    Number(String, SourceLocation),
    Ident(String, SourceLocation),
}

impl Token {
    pub fn kind(&self) -> TokenKind {
        match self {
            Token::LParen(_) | Token::RParen(_) => TokenKind::Paren,
            Token::Number(..) => TokenKind::Number,
            Token::Ident(..) => TokenKind::Identifier,
        }
    }

    /// The token text exactly as it appeared in the source.
    pub fn value(&self) -> &str {
        match self {
            Token::LParen(_) => "(",
            Token::RParen(_) => ")",
            Token::Number(text, _) | Token::Ident(text, _) => text,
        }
    }

    /// Returns the source location where this token appears.
    pub fn location(&self) -> SourceLocation {
        match self {
            Token::LParen(loc)
            | Token::RParen(loc)
            | Token::Number(_, loc)
            | Token::Ident(_, loc) => *loc,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::LParen(_) => write!(f, "'('"),
            Token::RParen(_) => write!(f, "')'"),
            Token::Number(n, _) => write!(f, "number {}", n),
            Token::Ident(s, _) => write!(f, "identifier '{}'", s),
        }
    }
}

/// Lexer error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Lexer error at {location}: unexpected character '{}'", .character.escape_debug())]
pub struct LexError {
    pub character: char,
    pub location: SourceLocation,
}

pub type LexResult<T> = Result<T, LexError>;

/// Tokenize `source` in one call.
pub fn tokenize(source: &str) -> LexResult<Vec<Token>> {
    Lexer::new(source).tokenize()
}

/// Lexer for S-expression source
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    line: usize,
    column: usize,
}

impl Lexer {
    /// Create a new lexer for the given source string.
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
        }
    }

    /// Tokenize the entire input
    pub fn tokenize(&mut self) -> LexResult<Vec<Token>> {
        let mut tokens = Vec::new();

        loop {
            self.skip_whitespace();

            let Some(ch) = self.peek() else {
                break;
            };

            tokens.push(self.next_token(ch)?);
        }

        debug!("lexed {} tokens", tokens.len());
        Ok(tokens)
    }

    /// Lex the token starting at `ch`, the current (unconsumed) character
    fn next_token(&mut self, ch: char) -> LexResult<Token> {
        let loc = self.current_location();

        match ch {
            '(' => {
                self.advance();
                Ok(Token::LParen(loc))
            }
            ')' => {
                self.advance();
                Ok(Token::RParen(loc))
            }
            '0'..='9' => Ok(Token::Number(self.take_while(|c| c.is_ascii_digit()), loc)),
            'a'..='z' | 'A'..='Z' => {
                Ok(Token::Ident(self.take_while(|c| c.is_ascii_alphabetic()), loc))
            }
            _ => Err(LexError {
                character: ch,
                location: loc,
            }),
        }
    }

    /// Consume the maximal run of characters matching `pred`.
    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> String {
        let mut run = String::new();
        while let Some(ch) = self.peek() {
            if !pred(ch) {
                break;
            }
            run.push(ch);
            self.advance();
        }
        run
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.peek() {
            if !ch.is_ascii_whitespace() {
                break;
            }
            self.advance();
        }
    }

    /// Peek at current character without consuming
    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    /// Advance to next character
    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += 1;

        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }

        Some(ch)
    }

    fn current_location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_tokens() {
        let tokens = tokenize("(add 1 22)").unwrap();

        assert_eq!(tokens.len(), 5);
        assert!(matches!(tokens[0], Token::LParen(_)));
        assert!(matches!(tokens[1], Token::Ident(ref s, _) if s == "add"));
        assert!(matches!(tokens[2], Token::Number(ref n, _) if n == "1"));
        assert!(matches!(tokens[3], Token::Number(ref n, _) if n == "22"));
        assert!(matches!(tokens[4], Token::RParen(_)));
    }

    #[test]
    fn test_kind_and_value() {
        let tokens = tokenize("( ) 7 x").unwrap();
        let shapes: Vec<(TokenKind, &str)> =
            tokens.iter().map(|t| (t.kind(), t.value())).collect();

        assert_eq!(
            shapes,
            vec![
                (TokenKind::Paren, "("),
                (TokenKind::Paren, ")"),
                (TokenKind::Number, "7"),
                (TokenKind::Identifier, "x"),
            ]
        );
    }

    #[test]
    fn test_runs_do_not_mix() {
        let tokens = tokenize("abc123def").unwrap();

        assert!(matches!(tokens[0], Token::Ident(ref s, _) if s == "abc"));
        assert!(matches!(tokens[1], Token::Number(ref n, _) if n == "123"));
        assert!(matches!(tokens[2], Token::Ident(ref s, _) if s == "def"));
    }

    #[test]
    fn test_run_at_end_of_input() {
        let tokens = tokenize("42").unwrap();
        assert_eq!(tokens, vec![Token::Number("42".to_string(), SourceLocation::new(1, 1))]);

        let tokens = tokenize("xyz").unwrap();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].value(), "xyz");
    }

    #[test]
    fn test_whitespace_only() {
        assert!(tokenize("").unwrap().is_empty());
        assert!(tokenize(" \t\r\n\x0C ").unwrap().is_empty());
    }

    #[test]
    fn test_locations() {
        let tokens = tokenize("(add\n  12)").unwrap();

        assert_eq!(tokens[0].location(), SourceLocation::new(1, 1));
        assert_eq!(tokens[1].location(), SourceLocation::new(1, 2));
        assert_eq!(tokens[2].location(), SourceLocation::new(2, 3));
        assert_eq!(tokens[3].location(), SourceLocation::new(2, 5));
    }

    #[test]
    fn test_unexpected_character() {
        let err = tokenize("(add 1 -2)").unwrap_err();

        assert_eq!(err.character, '-');
        assert_eq!(err.location, SourceLocation::new(1, 8));
        assert_eq!(
            err.to_string(),
            "Lexer error at line 1, column 8: unexpected character '-'"
        );
    }

    #[test]
    fn test_rejects_non_ascii() {
        let err = tokenize("(add 1 ２)").unwrap_err();
        assert_eq!(err.character, '２');

        let err = tokenize("(é)").unwrap_err();
        assert_eq!(err.character, 'é');
        assert_eq!(err.location, SourceLocation::new(1, 2));
    }

    #[test]
    fn test_rejects_floats_and_strings() {
        assert_eq!(tokenize("1.5").unwrap_err().character, '.');
        assert_eq!(tokenize("\"hi\"").unwrap_err().character, '"');
    }
}
