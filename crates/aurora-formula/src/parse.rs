//! Expression parser for formula evaluation.
//!
//! Parses the highlighter's token stream into an AST with conventional
//! operator precedence: `||` < `&&` < comparisons < `&` < `+ -` <
//! `* / %` < unary `- !` < `^` (right-associative).

use aurora_model::{Token, TokenType, Value};

use crate::error::{FormulaError, Result};
use crate::lexer::tokenize;

/// Parsed formula expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(Value),
    /// Column reference (`{name}` or a bare identifier).
    Column(String),
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Call {
        name: String,
        args: Vec<Expr>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Neg,
    Not,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Pow,
    Concat,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    And,
    Or,
}

/// Parse a formula into an expression tree.
pub fn parse(formula: &str) -> Result<Expr> {
    let tokens: Vec<Token> = tokenize(formula)
        .into_iter()
        .filter(|t| !(t.token_type == TokenType::Text && t.value.trim().is_empty()))
        .collect();
    if tokens.is_empty() {
        return Err(FormulaError::Empty);
    }
    let mut parser = Parser { tokens, pos: 0 };
    let expr = parser.parse_or()?;
    match parser.peek() {
        None => Ok(expr),
        Some(token) => Err(unexpected(token)),
    }
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

fn unexpected(token: &Token) -> FormulaError {
    FormulaError::UnexpectedToken {
        found: token.value.clone(),
        offset: token.start,
    }
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn bump(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    /// Consume an operator token with the given text, if present.
    fn eat_operator(&mut self, text: &str) -> bool {
        if let Some(token) = self.peek()
            && token.token_type == TokenType::Operator
            && token.value == text
        {
            self.pos += 1;
            return true;
        }
        false
    }

    fn eat_paren(&mut self, text: &str) -> bool {
        if let Some(token) = self.peek()
            && token.token_type == TokenType::Paren
            && token.value == text
        {
            self.pos += 1;
            return true;
        }
        false
    }

    fn expect_paren(&mut self, text: &str) -> Result<()> {
        if self.eat_paren(text) {
            Ok(())
        } else {
            match self.peek() {
                Some(token) => Err(unexpected(token)),
                None => Err(FormulaError::UnexpectedEnd),
            }
        }
    }

    fn parse_or(&mut self) -> Result<Expr> {
        let mut left = self.parse_and()?;
        while self.eat_operator("||") {
            let right = self.parse_and()?;
            left = binary(BinaryOp::Or, left, right);
        }
        Ok(left)
    }

    fn parse_and(&mut self) -> Result<Expr> {
        let mut left = self.parse_comparison()?;
        while self.eat_operator("&&") {
            let right = self.parse_comparison()?;
            left = binary(BinaryOp::And, left, right);
        }
        Ok(left)
    }

    fn parse_comparison(&mut self) -> Result<Expr> {
        let mut left = self.parse_concat()?;
        loop {
            let op = match self.peek() {
                Some(t) if t.token_type == TokenType::Operator => match t.value.as_str() {
                    "=" => BinaryOp::Eq,
                    "!=" | "<>" => BinaryOp::Ne,
                    "<" => BinaryOp::Lt,
                    "<=" => BinaryOp::Le,
                    ">" => BinaryOp::Gt,
                    ">=" => BinaryOp::Ge,
                    _ => break,
                },
                _ => break,
            };
            self.pos += 1;
            let right = self.parse_concat()?;
            left = binary(op, left, right);
        }
        Ok(left)
    }

    fn parse_concat(&mut self) -> Result<Expr> {
        let mut left = self.parse_additive()?;
        while self.eat_operator("&") {
            let right = self.parse_additive()?;
            left = binary(BinaryOp::Concat, left, right);
        }
        Ok(left)
    }

    fn parse_additive(&mut self) -> Result<Expr> {
        let mut left = self.parse_multiplicative()?;
        loop {
            if self.eat_operator("+") {
                let right = self.parse_multiplicative()?;
                left = binary(BinaryOp::Add, left, right);
            } else if self.eat_operator("-") {
                let right = self.parse_multiplicative()?;
                left = binary(BinaryOp::Sub, left, right);
            } else {
                break;
            }
        }
        Ok(left)
    }

    fn parse_multiplicative(&mut self) -> Result<Expr> {
        let mut left = self.parse_unary()?;
        loop {
            let op = if self.eat_operator("*") {
                BinaryOp::Mul
            } else if self.eat_operator("/") {
                BinaryOp::Div
            } else if self.eat_operator("%") {
                BinaryOp::Rem
            } else {
                break;
            };
            let right = self.parse_unary()?;
            left = binary(op, left, right);
        }
        Ok(left)
    }

    fn parse_unary(&mut self) -> Result<Expr> {
        if self.eat_operator("-") {
            let operand = self.parse_unary()?;
            return Ok(Expr::Unary {
                op: UnaryOp::Neg,
                operand: Box::new(operand),
            });
        }
        if self.eat_operator("!") {
            let operand = self.parse_unary()?;
            return Ok(Expr::Unary {
                op: UnaryOp::Not,
                operand: Box::new(operand),
            });
        }
        self.parse_power()
    }

    fn parse_power(&mut self) -> Result<Expr> {
        let base = self.parse_primary()?;
        if self.eat_operator("^") {
            // Right-associative: 2^3^2 is 2^(3^2).
            let exponent = self.parse_unary()?;
            return Ok(binary(BinaryOp::Pow, base, exponent));
        }
        Ok(base)
    }

    fn parse_primary(&mut self) -> Result<Expr> {
        let Some(token) = self.bump() else {
            return Err(FormulaError::UnexpectedEnd);
        };
        match token.token_type {
            TokenType::Number => {
                let value: f64 = token
                    .value
                    .parse()
                    .map_err(|_| unexpected(&token))?;
                Ok(Expr::Literal(Value::Number(value)))
            }
            TokenType::Str => Ok(Expr::Literal(Value::Text(unquote(&token.value)))),
            TokenType::Column => {
                let inner: String = token
                    .value
                    .trim_start_matches('{')
                    .trim_end_matches('}')
                    .to_string();
                Ok(Expr::Column(inner))
            }
            TokenType::Function => self.parse_call(token.value),
            TokenType::Paren if token.value == "(" => {
                let expr = self.parse_or()?;
                self.expect_paren(")")?;
                Ok(expr)
            }
            TokenType::Text if token.value == "true" => Ok(Expr::Literal(Value::Bool(true))),
            TokenType::Text if token.value == "false" => Ok(Expr::Literal(Value::Bool(false))),
            TokenType::Text if is_identifier(&token.value) => Ok(Expr::Column(token.value)),
            _ => Err(unexpected(&token)),
        }
    }

    fn parse_call(&mut self, name: String) -> Result<Expr> {
        self.expect_paren("(")?;
        let mut args = Vec::new();
        if self.eat_paren(")") {
            return Ok(Expr::Call { name, args });
        }
        loop {
            args.push(self.parse_or()?);
            if self.eat_comma() {
                continue;
            }
            self.expect_paren(")")?;
            return Ok(Expr::Call { name, args });
        }
    }

    fn eat_comma(&mut self) -> bool {
        if let Some(token) = self.peek()
            && token.token_type == TokenType::Text
            && token.value == ","
        {
            self.pos += 1;
            return true;
        }
        false
    }
}

fn binary(op: BinaryOp, left: Expr, right: Expr) -> Expr {
    Expr::Binary {
        op,
        left: Box::new(left),
        right: Box::new(right),
    }
}

/// Strip the surrounding quotes and resolve backslash escapes.
fn unquote(raw: &str) -> String {
    let chars: Vec<char> = raw.chars().collect();
    if chars.len() < 2 {
        return raw.to_string();
    }
    let inner = &chars[1..chars.len() - 1];
    let mut out = String::with_capacity(inner.len());
    let mut i = 0;
    while i < inner.len() {
        if inner[i] == '\\' && i + 1 < inner.len() {
            out.push(inner[i + 1]);
            i += 2;
        } else {
            out.push(inner[i]);
            i += 1;
        }
    }
    out
}

fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        Some(ch) if ch.is_ascii_alphabetic() || ch == '_' => {}
        _ => return false,
    }
    chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '_')
}
