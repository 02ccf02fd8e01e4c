use crate::parser::ast::*;
use crate::parser::lexer::Token;
use log::debug;
use thiserror::Error;

/// Parser error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A token that cannot start an expression (`)`, or an identifier used as an argument)
    #[error("Parse error at {}: unexpected {found}", .found.location())]
    UnexpectedToken { found: Token },

    /// Something other than an identifier directly after `(`
    #[error("Parse error at {}: expected identifier after '(', found {found}", .found.location())]
    ExpectedCallee { found: Token },

    /// Tokens ran out in the middle of an expression
    #[error("Parse error at end of input: expected {expected}")]
    UnexpectedEof { expected: &'static str },

    /// Calls nested deeper than [`MAX_DEPTH`]
    #[error("Parse error at {location}: calls nested more than {limit} deep")]
    TooDeep {
        location: SourceLocation,
        limit: usize,
    },
}

impl ParseError {
    /// Location of the offending token, if there was one.
    pub fn location(&self) -> Option<SourceLocation> {
        match self {
            ParseError::UnexpectedToken { found } | ParseError::ExpectedCallee { found } => {
                Some(found.location())
            }
            ParseError::TooDeep { location, .. } => Some(*location),
            ParseError::UnexpectedEof { .. } => None,
        }
    }
}

pub type ParseResult<T> = Result<T, ParseError>;

/// Maximum call nesting. Every later stage recurses once per level, so this
/// bound keeps the whole pipeline within the stack.
pub const MAX_DEPTH: usize = 512;

/// Parse a complete token stream into a [`Program`].
///
/// The cursor lives in a [`Parser`] scoped to this call, so concurrent or
/// repeated calls never share position state.
pub fn parse(tokens: &[Token]) -> ParseResult<Program> {
    Parser::new(tokens).parse_program()
}

/// Recursive descent parser for S-expressions
pub struct Parser<'t> {
    tokens: &'t [Token],
    position: usize,
    depth: usize, // calls currently open
}

impl<'t> Parser<'t> {
    pub fn new(tokens: &'t [Token]) -> Self {
        Self {
            tokens,
            position: 0,
            depth: 0,
        }
    }

    /// Parse the entire program: expressions until the tokens run out
    pub fn parse_program(&mut self) -> ParseResult<Program> {
        let mut program = Program::new();

        while !self.is_at_end() {
            program.children.push(self.parse_expr()?);
        }

        debug!("parsed {} top-level expressions", program.children.len());
        Ok(program)
    }

    /// Parse one expression: a number literal or a parenthesised call
    fn parse_expr(&mut self) -> ParseResult<SourceNode> {
        let token = self.peek().ok_or(ParseError::UnexpectedEof {
            expected: "an expression",
        })?;

        match token {
            Token::Number(value, loc) => {
                let node = SourceNode::NumberLiteral(NumberLiteral {
                    value: value.clone(),
                    location: *loc,
                });
                self.advance();
                Ok(node)
            }
            Token::LParen(loc) => {
                if self.depth >= MAX_DEPTH {
                    return Err(ParseError::TooDeep {
                        location: *loc,
                        limit: MAX_DEPTH,
                    });
                }
                let loc = *loc;
                self.advance();
                self.depth += 1;
                let call = self.parse_call(loc);
                self.depth -= 1;
                call
            }
            Token::RParen(_) | Token::Ident(..) => Err(ParseError::UnexpectedToken {
                found: token.clone(),
            }),
        }
    }

    /// Parse the rest of a call after its `(`: callee, arguments, `)`
    fn parse_call(&mut self, location: SourceLocation) -> ParseResult<SourceNode> {
        let callee = self.expect_identifier()?;

        let mut children = Vec::new();
        loop {
            match self.peek() {
                Some(Token::RParen(_)) => break,
                Some(_) => children.push(self.parse_expr()?),
                None => {
                    return Err(ParseError::UnexpectedEof {
                        expected: "')' to close call expression",
                    })
                }
            }
        }
        self.advance(); // consume ')'

        Ok(SourceNode::CallExpression(CallExpression {
            callee,
            children,
            location,
        }))
    }

    // ===== Helper methods =====

    fn expect_identifier(&mut self) -> ParseResult<String> {
        match self.peek() {
            Some(Token::Ident(name, _)) => {
                let name = name.clone();
                self.advance();
                Ok(name)
            }
            Some(other) => Err(ParseError::ExpectedCallee {
                found: other.clone(),
            }),
            None => Err(ParseError::UnexpectedEof {
                expected: "identifier after '('",
            }),
        }
    }

    fn peek(&self) -> Option<&'t Token> {
        self.tokens.get(self.position)
    }

    fn advance(&mut self) {
        if !self.is_at_end() {
            self.position += 1;
        }
    }

    fn is_at_end(&self) -> bool {
        self.position >= self.tokens.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::lexer::tokenize;

    fn parse_source(source: &str) -> ParseResult<Program> {
        parse(&tokenize(source).unwrap())
    }

    #[test]
    fn test_parse_simple_call() {
        let program = parse_source("(add 1 2)").unwrap();

        assert_eq!(program.children.len(), 1);
        match &program.children[0] {
            SourceNode::CallExpression(CallExpression { callee, children, location }) => {
                assert_eq!(callee, "add");
                assert_eq!(children.len(), 2);
                assert_eq!(*location, SourceLocation::new(1, 1));
                assert!(
                    matches!(&children[1], SourceNode::NumberLiteral(lit) if lit.value == "2")
                );
            }
            _ => panic!("Expected call expression"),
        }
    }

    #[test]
    fn test_parse_nested_call() {
        let program = parse_source("(add 1 (subtract 2 3) 4)").unwrap();

        let SourceNode::CallExpression(outer) = &program.children[0] else {
            panic!("Expected call expression");
        };
        let kinds: Vec<SourceKind> = outer.children.iter().map(SourceNode::kind).collect();
        assert_eq!(
            kinds,
            vec![
                SourceKind::NumberLiteral,
                SourceKind::CallExpression,
                SourceKind::NumberLiteral
            ]
        );
        match &outer.children[1] {
            SourceNode::CallExpression(inner) => {
                assert_eq!(inner.callee, "subtract");
                assert_eq!(inner.children.len(), 2);
            }
            _ => panic!("Expected nested call expression"),
        }
    }

    #[test]
    fn test_top_level_count() {
        assert_eq!(parse_source("").unwrap().children.len(), 0);
        assert_eq!(parse_source("(a)").unwrap().children.len(), 1);
        assert_eq!(parse_source("(a (b 1))\n(c)\n(d 2 (e))").unwrap().children.len(), 3);
        // A bare literal still parses; rejecting it is the transformer's job
        assert_eq!(parse_source("42 (f 1)").unwrap().children.len(), 2);
    }

    #[test]
    fn test_call_without_arguments() {
        let program = parse_source("(now)").unwrap();
        assert!(matches!(
            &program.children[0],
            SourceNode::CallExpression(call) if call.callee == "now" && call.children.is_empty()
        ));
    }

    #[test]
    fn test_unterminated_call() {
        let err = parse_source("(add 1").unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedEof { .. }));
        assert_eq!(err.location(), None);

        let err = parse_source("(add 1 (subtract 2 3)").unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedEof { .. }));
    }

    #[test]
    fn test_missing_callee() {
        let err = parse_source("(").unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedEof { .. }));

        let err = parse_source("(1 2)").unwrap_err();
        match err {
            ParseError::ExpectedCallee { found } => assert_eq!(found.value(), "1"),
            other => panic!("Expected ExpectedCallee, got {:?}", other),
        }

        let err = parse_source("()").unwrap_err();
        assert!(matches!(err, ParseError::ExpectedCallee { found: Token::RParen(_) }));
    }

    #[test]
    fn test_stray_tokens() {
        let err = parse_source(")").unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedToken { found: Token::RParen(_) }));

        let err = parse_source("(add x 1)").unwrap_err();
        assert_eq!(err.location(), Some(SourceLocation::new(1, 6)));
        assert_eq!(
            err.to_string(),
            "Parse error at line 1, column 6: unexpected identifier 'x'"
        );

        let err = parse_source("(add 1))").unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedToken { found: Token::RParen(_) }));
    }

    fn nested(depth: usize) -> String {
        "(a ".repeat(depth) + &")".repeat(depth)
    }

    #[test]
    fn test_nesting_limit() {
        let program = parse_source(&nested(MAX_DEPTH)).unwrap();
        assert_eq!(program.node_counts().get(SourceKind::CallExpression), MAX_DEPTH);

        let err = parse_source(&nested(MAX_DEPTH + 1)).unwrap_err();
        assert_eq!(
            err,
            ParseError::TooDeep {
                location: SourceLocation::new(1, 3 * MAX_DEPTH + 1),
                limit: MAX_DEPTH,
            }
        );
    }

    #[test]
    fn test_depth_resets_between_siblings() {
        // Two calls each at the limit, side by side, are fine
        let source = format!("(b {} {})", nested(MAX_DEPTH - 1), nested(MAX_DEPTH - 1));
        assert!(parse_source(&source).is_ok());
    }

    #[test]
    fn test_very_deep_input_is_an_error() {
        let err = parse_source(&nested(100_000)).unwrap_err();
        assert!(matches!(err, ParseError::TooDeep { .. }));
    }

    #[test]
    fn test_parse_is_reentrant() {
        let first = tokenize("(a 1) (b 2)").unwrap();
        let second = tokenize("(c (d 3))").unwrap();

        let mut p1 = Parser::new(&first);
        let mut p2 = Parser::new(&second);
        let r2 = p2.parse_program().unwrap();
        let r1 = p1.parse_program().unwrap();

        assert_eq!(r1.children.len(), 2);
        assert_eq!(r2.children.len(), 1);
        assert_eq!(parse(&first).unwrap(), r1);
    }
}
