//! Recursive-descent parser for comma-separated expression lists.
//!
//! ```text
//! list    := expr (',' expr)*
//! expr    := term (('+' | '-') term)*
//! term    := unary (('*' | '/') unary)*
//! unary   := '-' unary | power
//! power   := primary ('^' unary)?
//! primary := number | ident | ident '(' args ')' | '(' expr ')'
//! ```

use super::ast::{BinaryOp, Constant, Function, Node};
use super::lexer::{syntax, tokenize, Token, TokenKind};
use crate::solvers::RegressionError;

/// Deepest accepted nesting of parentheses, unary minus and exponents.
const MAX_DEPTH: usize = 256;

/// Longest accepted expression list, in tokens. Bounds the depth of
/// left-associative operator chains, which do not count towards `MAX_DEPTH`.
const MAX_TOKENS: usize = 4096;

pub(crate) struct Parser<'a> {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
    variable: &'a str,
}

impl<'a> Parser<'a> {
    pub fn new(text: &str, variable: &'a str) -> Result<Self, RegressionError> {
        let tokens = tokenize(text)?;
        // the trailing End token is not counted
        if tokens.len() > MAX_TOKENS + 1 {
            return Err(syntax(tokens[MAX_TOKENS].position, "expression list too long"));
        }
        Ok(Self {
            tokens,
            pos: 0,
            depth: 0,
            variable,
        })
    }

    pub fn parse_list(mut self) -> Result<Vec<Node>, RegressionError> {
        if self.peek() == &TokenKind::End {
            return Err(syntax(0, "empty expression list"));
        }
        let mut nodes = Vec::new();
        loop {
            nodes.push(self.expr()?);
            match self.peek() {
                TokenKind::Comma => {
                    self.advance();
                }
                TokenKind::End => break,
                other => {
                    let message = format!("expected `,` or end of input, found {}", describe(other));
                    return Err(syntax(self.position(), message));
                }
            }
        }
        Ok(nodes)
    }

    fn peek(&self) -> &TokenKind {
        &self.tokens[self.pos].kind
    }

    fn position(&self) -> usize {
        self.tokens[self.pos].position
    }

    fn advance(&mut self) -> Token {
        let token = self.tokens[self.pos].clone();
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        token
    }

    fn expect(&mut self, kind: TokenKind) -> Result<(), RegressionError> {
        if *self.peek() == kind {
            self.advance();
            Ok(())
        } else {
            let message = format!("expected {}, found {}", describe(&kind), describe(self.peek()));
            Err(syntax(self.position(), message))
        }
    }

    fn expr(&mut self) -> Result<Node, RegressionError> {
        let mut lhs = self.term()?;
        loop {
            let op = match self.peek() {
                TokenKind::Plus => BinaryOp::Add,
                TokenKind::Minus => BinaryOp::Sub,
                _ => return Ok(lhs),
            };
            self.advance();
            let rhs = self.term()?;
            lhs = Node::Binary(op, Box::new(lhs), Box::new(rhs));
        }
    }

    fn term(&mut self) -> Result<Node, RegressionError> {
        let mut lhs = self.unary()?;
        loop {
            let op = match self.peek() {
                TokenKind::Star => BinaryOp::Mul,
                TokenKind::Slash => BinaryOp::Div,
                _ => return Ok(lhs),
            };
            self.advance();
            let rhs = self.unary()?;
            lhs = Node::Binary(op, Box::new(lhs), Box::new(rhs));
        }
    }

    // Every recursive path passes through here.
    fn unary(&mut self) -> Result<Node, RegressionError> {
        if self.depth >= MAX_DEPTH {
            return Err(syntax(self.position(), "expression nested too deeply"));
        }
        self.depth += 1;
        let node = if self.peek() == &TokenKind::Minus {
            self.advance();
            self.unary().map(|inner| Node::Neg(Box::new(inner)))
        } else {
            self.power()
        };
        self.depth -= 1;
        node
    }

    fn power(&mut self) -> Result<Node, RegressionError> {
        let base = self.primary()?;
        if self.peek() == &TokenKind::Caret {
            self.advance();
            let exponent = self.unary()?;
            return Ok(Node::Binary(
                BinaryOp::Pow,
                Box::new(base),
                Box::new(exponent),
            ));
        }
        Ok(base)
    }

    fn primary(&mut self) -> Result<Node, RegressionError> {
        let token = self.advance();
        match token.kind {
            TokenKind::Number(n) => Ok(Node::Number(n)),
            TokenKind::LParen => {
                let inner = self.expr()?;
                self.expect(TokenKind::RParen)?;
                Ok(inner)
            }
            TokenKind::Ident(name) => self.identifier(&name, token.position),
            other => Err(syntax(
                token.position,
                format!("expected a value, found {}", describe(&other)),
            )),
        }
    }

    fn identifier(&mut self, name: &str, position: usize) -> Result<Node, RegressionError> {
        if name == self.variable {
            return Ok(Node::Variable);
        }
        let normalized = normalize(name);

        if self.peek() == &TokenKind::LParen {
            let function = Function::lookup(&normalized)
                .ok_or_else(|| syntax(position, format!("unknown function `{name}`")))?;
            self.advance();
            let args = self.arguments()?;
            if args.len() != function.arity() {
                return Err(syntax(
                    position,
                    format!(
                        "`{name}` takes {} argument(s), got {}",
                        function.arity(),
                        args.len()
                    ),
                ));
            }
            return Ok(Node::Call(function, args));
        }

        Constant::lookup(&normalized)
            .map(Node::Constant)
            .ok_or_else(|| syntax(position, format!("unknown identifier `{name}`")))
    }

    fn arguments(&mut self) -> Result<Vec<Node>, RegressionError> {
        let mut args = Vec::new();
        if self.peek() == &TokenKind::RParen {
            self.advance();
            return Ok(args);
        }
        loop {
            args.push(self.expr()?);
            match self.peek() {
                TokenKind::Comma => {
                    self.advance();
                }
                _ => {
                    self.expect(TokenKind::RParen)?;
                    return Ok(args);
                }
            }
        }
    }
}

/// Lowercase and drop an optional `math.` package prefix.
fn normalize(name: &str) -> String {
    let lower = name.to_ascii_lowercase();
    match lower.strip_prefix("math.") {
        Some(rest) => rest.to_string(),
        None => lower,
    }
}

fn describe(kind: &TokenKind) -> String {
    match kind {
        TokenKind::Number(n) => format!("number `{n}`"),
        TokenKind::Ident(name) => format!("`{name}`"),
        TokenKind::Plus => "`+`".to_string(),
        TokenKind::Minus => "`-`".to_string(),
        TokenKind::Star => "`*`".to_string(),
        TokenKind::Slash => "`/`".to_string(),
        TokenKind::Caret => "`^`".to_string(),
        TokenKind::LParen => "`(`".to_string(),
        TokenKind::RParen => "`)`".to_string(),
        TokenKind::Comma => "`,`".to_string(),
        TokenKind::End => "end of input".to_string(),
    }
}
