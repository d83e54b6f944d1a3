//! Syntax validation: tokenizes an infix arithmetic expression and parses it
//! into an [`Expr`] tree.
//!
//! Grammar, lowest precedence first:
//!
//! ```text
//! expression := term (('+' | '-') term)*
//! term       := unary (('*' | '/' | '%') unary)*
//! unary      := ('-' | '+') unary | primary
//! primary    := number | '(' expression ')'
//! number     := digit+ ('.' digit+)?
//! ```
//!
//! `%` and unary `+` are accepted here and rejected during lowering.

use crate::domain::ast::Expr;
use crate::domain::error::DomainError;

/// Parses `expression` into a tree.
///
/// The grammar is driven by explicit operator and group stacks rather than
/// by recursion, so nesting depth is bounded only by the input itself.
///
/// # Errors
///
/// * `EmptyExpression` - blank input
/// * `InvalidExpression`, `InvalidParenExpression`, `InvalidBinaryOperation` - grammar failures
pub fn parse(expression: &str) -> Result<Expr, DomainError> {
    if expression.trim().is_empty() {
        return Err(DomainError::EmptyExpression);
    }

    let tokens = Lexer::new(expression).tokenize()?;
    Parser {
        tokens,
        pos: 0,
        frames: Vec::new(),
    }
    .parse()
}

// ---------------------------------------------------------------------------
// Tokens
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
enum TokenKind {
    Number(String),
    Operator(char),
    LParen,
    RParen,
    Eof,
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(text) => write!(f, "number '{text}'"),
            Self::Operator(op) => write!(f, "operator '{op}'"),
            Self::LParen => f.write_str("'('"),
            Self::RParen => f.write_str("')'"),
            Self::Eof => f.write_str("end of input"),
        }
    }
}

#[derive(Debug, Clone)]
struct Token {
    kind: TokenKind,
    offset: usize,
}

// ---------------------------------------------------------------------------
// Lexer
// ---------------------------------------------------------------------------

struct Lexer<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> Lexer<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input: input.as_bytes(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    fn tokenize(mut self) -> Result<Vec<Token>, DomainError> {
        let mut tokens = Vec::new();
        loop {
            while self.peek().is_some_and(|b| b.is_ascii_whitespace()) {
                self.pos += 1;
            }

            let offset = self.pos;
            let Some(ch) = self.peek() else {
                tokens.push(Token {
                    kind: TokenKind::Eof,
                    offset,
                });
                return Ok(tokens);
            };

            let kind = match ch {
                b'0'..=b'9' => self.scan_number()?,
                b'+' | b'-' | b'*' | b'/' | b'%' => {
                    self.pos += 1;
                    TokenKind::Operator(char::from(ch))
                }
                b'(' => {
                    self.pos += 1;
                    TokenKind::LParen
                }
                b')' => {
                    self.pos += 1;
                    TokenKind::RParen
                }
                _ => return Err(self.unexpected_character()),
            };
            tokens.push(Token { kind, offset });
        }
    }

    fn scan_digits(&mut self) -> usize {
        let start = self.pos;
        while self.peek().is_some_and(|b| b.is_ascii_digit()) {
            self.pos += 1;
        }
        self.pos - start
    }

    fn scan_number(&mut self) -> Result<TokenKind, DomainError> {
        let start = self.pos;
        self.scan_digits();
        if self.peek() == Some(b'.') {
            self.pos += 1;
            if self.scan_digits() == 0 {
                return Err(DomainError::invalid_expression(format!(
                    "malformed number at position {start}"
                )));
            }
        }
        // Only ASCII digits and '.' were consumed, so the slice is valid UTF-8.
        let text = String::from_utf8_lossy(&self.input[start..self.pos]).into_owned();
        Ok(TokenKind::Number(text))
    }

    fn unexpected_character(&self) -> DomainError {
        let rest = String::from_utf8_lossy(&self.input[self.pos..]);
        let ch = rest.chars().next().unwrap_or(char::REPLACEMENT_CHARACTER);
        DomainError::invalid_expression(format!(
            "unexpected character '{ch}' at position {}",
            self.pos
        ))
    }
}

// ---------------------------------------------------------------------------
// Parser
// ---------------------------------------------------------------------------

/// Pending construct waiting for the operand that completes it.
enum Frame {
    Prefix { op: char },
    Binary { op: char, offset: usize, left: Expr },
    Open { offset: usize },
}

const fn precedence(op: char) -> u8 {
    match op {
        '+' | '-' => 1,
        _ => 2,
    }
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    frames: Vec<Frame>,
}

impl Parser {
    fn current(&self) -> &Token {
        // The token list always ends with Eof and `advance` never moves past it.
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn advance(&mut self) -> Token {
        let token = self.current().clone();
        if token.kind != TokenKind::Eof {
            self.pos += 1;
        }
        token
    }

    fn inside_group(&self) -> bool {
        self.frames.iter().any(|f| matches!(f, Frame::Open { .. }))
    }

    /// Alternates between operand and operator positions until end of input.
    fn parse(mut self) -> Result<Expr, DomainError> {
        loop {
            let mut operand = self.parse_operand()?;
            loop {
                let token = self.advance();
                match token.kind {
                    TokenKind::Operator(op) => {
                        let left = self.reduce(operand, precedence(op));
                        self.frames.push(Frame::Binary {
                            op,
                            offset: token.offset,
                            left,
                        });
                        break;
                    }
                    TokenKind::RParen => {
                        operand = self.reduce(operand, 0);
                        if !matches!(self.frames.pop(), Some(Frame::Open { .. })) {
                            return Err(DomainError::invalid_paren(format!(
                                "unmatched ')' at position {}",
                                token.offset
                            )));
                        }
                        operand = Expr::paren(operand);
                    }
                    TokenKind::Eof => {
                        let expr = self.reduce(operand, 0);
                        return match self.frames.last() {
                            Some(Frame::Open { offset }) => Err(DomainError::invalid_paren(
                                format!("unclosed '(' at position {offset}"),
                            )),
                            _ => Ok(expr),
                        };
                    }
                    other => {
                        let message = if self.inside_group() {
                            format!("expected ')' but found {other} at position {}", token.offset)
                        } else {
                            format!("unexpected {other} at position {}", token.offset)
                        };
                        return Err(DomainError::invalid_expression(message));
                    }
                }
            }
        }
    }

    /// Consumes prefix signs and opening parentheses up to the next number.
    fn parse_operand(&mut self) -> Result<Expr, DomainError> {
        loop {
            let token = self.advance();
            match token.kind {
                TokenKind::Number(text) => return Ok(Expr::Literal(text)),
                TokenKind::Operator(op @ ('-' | '+')) => self.frames.push(Frame::Prefix { op }),
                TokenKind::LParen => {
                    if self.current().kind == TokenKind::RParen {
                        return Err(DomainError::invalid_paren(format!(
                            "empty parentheses at position {}",
                            token.offset
                        )));
                    }
                    self.frames.push(Frame::Open {
                        offset: token.offset,
                    });
                }
                other => return Err(self.missing_operand(&other, token.offset)),
            }
        }
    }

    fn missing_operand(&self, found: &TokenKind, offset: usize) -> DomainError {
        match (self.frames.last(), found) {
            (Some(Frame::Binary { op, offset: op_offset, .. }), _) => {
                DomainError::invalid_binary(format!(
                    "operator '{op}' at position {op_offset} is missing its right operand, \
                     found {found}"
                ))
            }
            (_, TokenKind::RParen) => {
                DomainError::invalid_paren(format!("unexpected ')' at position {offset}"))
            }
            _ => DomainError::invalid_expression(format!(
                "expected a number or '(' but found {found} at position {offset}"
            )),
        }
    }

    /// Folds pending prefixes and binary operators of at least `min_precedence`
    /// into `operand`, stopping at the innermost open group.
    fn reduce(&mut self, mut operand: Expr, min_precedence: u8) -> Expr {
        loop {
            match self.frames.pop() {
                Some(Frame::Prefix { op }) => operand = Expr::unary(op, operand),
                Some(Frame::Binary { op, left, .. }) if precedence(op) >= min_precedence => {
                    operand = Expr::binary(op, left, operand);
                }
                Some(frame) => {
                    self.frames.push(frame);
                    return operand;
                }
                None => return operand,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precedence_and_associativity() {
        assert_eq!(parse("2+3*4").unwrap().to_string(), "(2 + (3 * 4))");
        assert_eq!(parse("1-2-3").unwrap().to_string(), "((1 - 2) - 3)");
        assert_eq!(parse("8/4/2").unwrap().to_string(), "((8 / 4) / 2)");
        assert_eq!(parse("(1+2)*3").unwrap().to_string(), "((1 + 2) * 3)");
    }

    #[test]
    fn test_unary_binds_tighter_than_binary() {
        let expr = parse("-2*3").unwrap();
        assert_eq!(
            expr,
            Expr::binary('*', Expr::unary('-', Expr::literal("2")), Expr::literal("3"))
        );
        assert_eq!(parse("1--2").unwrap().to_string(), "(1 - (-2))");
    }

    #[test]
    fn test_parenthesized_node_is_kept() {
        let expr = parse("(7)").unwrap();
        assert_eq!(expr, Expr::paren(Expr::literal("7")));
    }

    #[test]
    fn test_decimal_literals_are_verbatim() {
        let expr = parse(" 3.50 + 007 ").unwrap();
        assert_eq!(
            expr,
            Expr::binary('+', Expr::literal("3.50"), Expr::literal("007"))
        );
    }

    #[test]
    fn test_unsupported_operators_still_parse() {
        assert!(parse("5 % 2").is_ok());
        assert!(parse("+5").is_ok());
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(parse(""), Err(DomainError::EmptyExpression));
        assert_eq!(parse(" \t\n "), Err(DomainError::EmptyExpression));
    }

    #[test]
    fn test_missing_right_operand() {
        assert!(matches!(
            parse("1+"),
            Err(DomainError::InvalidBinaryOperation(_))
        ));
        assert!(matches!(
            parse("1+*2"),
            Err(DomainError::InvalidBinaryOperation(_))
        ));
        assert!(matches!(
            parse("(1*)"),
            Err(DomainError::InvalidBinaryOperation(_))
        ));
    }

    #[test]
    fn test_paren_errors() {
        assert!(matches!(
            parse("(1+2"),
            Err(DomainError::InvalidParenExpression(_))
        ));
        assert!(matches!(
            parse("1+2)"),
            Err(DomainError::InvalidParenExpression(_))
        ));
        assert!(matches!(
            parse("()"),
            Err(DomainError::InvalidParenExpression(_))
        ));
    }

    #[test]
    fn test_invalid_expressions() {
        for input in ["*2", "-", "2 3", "2(3)", "1.", ".5", "1..2", "x+1", "1 + 2 \u{20ac}"] {
            assert!(
                matches!(parse(input), Err(DomainError::InvalidExpression(_))),
                "expected InvalidExpression for {input:?}"
            );
        }
    }

    #[test]
    fn test_error_positions() {
        let err = parse("12 + $").unwrap_err();
        assert_eq!(
            err,
            DomainError::InvalidExpression("unexpected character '$' at position 5".to_owned())
        );
    }

    #[test]
    fn test_mixed_grouping_and_prefixes() {
        assert_eq!(parse("-(1+2)*3").unwrap().to_string(), "((-(1 + 2)) * 3)");
        assert_eq!(parse("(-2*3)").unwrap().to_string(), "((-2) * 3)");
        assert_eq!(parse("2*-3*4").unwrap().to_string(), "((2 * (-3)) * 4)");
        assert_eq!(
            parse("((1+2)+3)*(4-(5))").unwrap().to_string(),
            "(((1 + 2) + 3) * (4 - 5))"
        );
    }

    #[test]
    fn test_innermost_unclosed_group_is_reported() {
        assert_eq!(
            parse("(1+(2"),
            Err(DomainError::InvalidParenExpression(
                "unclosed '(' at position 3".to_owned()
            ))
        );
        assert_eq!(
            parse("((1+2)"),
            Err(DomainError::InvalidParenExpression(
                "unclosed '(' at position 0".to_owned()
            ))
        );
    }

    #[test]
    fn test_unexpected_token_inside_group() {
        assert_eq!(
            parse("(1 2)"),
            Err(DomainError::InvalidExpression(
                "expected ')' but found number '2' at position 3".to_owned()
            ))
        );
    }

    #[test]
    fn test_deep_grouping_has_no_depth_limit() {
        let depth = 100_000;
        let grouped = format!("{}7{}", "(".repeat(depth), ")".repeat(depth));
        assert!(parse(&grouped).is_ok());

        let prefixed = format!("{}7", "-(".repeat(depth)) + &")".repeat(depth);
        assert!(parse(&prefixed).is_ok());

        let right_nested = format!("{}1{}", "1+(".repeat(depth), ")".repeat(depth));
        assert!(parse(&right_nested).is_ok());
    }

    #[test]
    fn test_long_input_has_no_length_limit() {
        let long = format!("{}+1", "1".repeat(10_000));
        let expr = parse(&long).unwrap();
        assert!(matches!(expr, Expr::Binary { op: '+', .. }));
    }
}
