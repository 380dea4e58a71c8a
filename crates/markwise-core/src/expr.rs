//! Numeric expression evaluator.
//!
//! Reduces a sanitized expression string to a single `f64` through an
//! explicit AST: pre-check, tokenize, recursive-descent parse, evaluate.
//! Exponents, division, factorials, degree literals, the six recognized
//! functions, and the `e`/`pi` constants are all resolved structurally, so
//! a constant name inside a function name can never collide.

use crate::error::GradeError;
use crate::token::{self, Token};

/// The constant values the platform has always used for transcendentals.
/// Stored answers were authored against these, so grading keeps them.
const EULER: f64 = 2.71828183;
const PI: f64 = 3.141593;

/// Recognized transcendental and root functions. `log` is base 10.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Function {
    Sqrt,
    Ln,
    Log,
    Sin,
    Cos,
    Tan,
}

impl Function {
    fn from_ident(name: &str) -> Option<Function> {
        match name {
            "sqrt" => Some(Function::Sqrt),
            "ln" => Some(Function::Ln),
            "log" => Some(Function::Log),
            "sin" => Some(Function::Sin),
            "cos" => Some(Function::Cos),
            "tan" => Some(Function::Tan),
            _ => None,
        }
    }

    fn apply(self, x: f64) -> f64 {
        match self {
            Function::Sqrt => x.sqrt(),
            Function::Ln => x.ln(),
            Function::Log => x.log10(),
            Function::Sin => x.sin(),
            Function::Cos => x.cos(),
            Function::Tan => x.tan(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum UnaryOp {
    Negate,
    Factorial,
    /// Degree-angle literal, converts to radians.
    Degrees,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    Power,
}

#[derive(Debug, Clone, PartialEq)]
enum Expr {
    Number(f64),
    Unary(UnaryOp, Box<Expr>),
    Binary(BinaryOp, Box<Expr>, Box<Expr>),
    Call(Function, Box<Expr>),
}

/// Evaluate a sanitized numeric expression string.
///
/// Never panics: every malformed, disallowed, or too-deeply-nested input
/// comes back as a [`GradeError`], which the dispatcher grades as zero.
pub fn resolve_number(input: &str) -> Result<f64, GradeError> {
    token::precheck(input)?;
    let tokens = token::tokenize(input)?;
    if tokens.is_empty() {
        return Err(GradeError::Malformed("empty expression".into()));
    }
    let expr = Parser::new(tokens).parse()?;
    eval(&expr)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0 }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        self.pos += 1;
        token
    }

    fn parse(mut self) -> Result<Expr, GradeError> {
        let expr = self.parse_sum()?;
        match self.peek() {
            None => Ok(expr),
            Some(t) => Err(GradeError::Malformed(format!(
                "unexpected trailing token {t:?}"
            ))),
        }
    }

    /// `+`-separated signed terms, lowest precedence.
    fn parse_sum(&mut self) -> Result<Expr, GradeError> {
        let mut lhs = self.parse_product()?;
        loop {
            let op = match self.peek() {
                Some(Token::Plus) => BinaryOp::Add,
                Some(Token::Minus) => BinaryOp::Subtract,
                _ => break,
            };
            self.advance();
            let rhs = self.parse_product()?;
            lhs = Expr::Binary(op, Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    /// Multiplication chains, explicit or implicit. An operand directly
    /// followed by another operand (`2pi`, `2(3)`, `(2)(3)`) multiplies.
    fn parse_product(&mut self) -> Result<Expr, GradeError> {
        let mut lhs = self.parse_unary()?;
        loop {
            match self.peek() {
                Some(Token::Star) => {
                    self.advance();
                    let rhs = self.parse_unary()?;
                    lhs = Expr::Binary(BinaryOp::Multiply, Box::new(lhs), Box::new(rhs));
                }
                Some(Token::Slash) => {
                    self.advance();
                    let rhs = self.parse_unary()?;
                    lhs = Expr::Binary(BinaryOp::Divide, Box::new(lhs), Box::new(rhs));
                }
                Some(
                    Token::Number(_)
                    | Token::Ident(_)
                    | Token::OpenParen
                    | Token::OpenBracket,
                ) => {
                    let rhs = self.parse_power()?;
                    lhs = Expr::Binary(BinaryOp::Multiply, Box::new(lhs), Box::new(rhs));
                }
                _ => break,
            }
        }
        Ok(lhs)
    }

    /// Unary sign folding: `--x` is `x`, `-x^2` is `-(x^2)`.
    fn parse_unary(&mut self) -> Result<Expr, GradeError> {
        match self.peek() {
            Some(Token::Minus) => {
                self.advance();
                let operand = self.parse_unary()?;
                Ok(Expr::Unary(UnaryOp::Negate, Box::new(operand)))
            }
            Some(Token::Plus) => {
                self.advance();
                self.parse_unary()
            }
            _ => self.parse_power(),
        }
    }

    /// Exponentiation, right-associative; the exponent may carry a sign.
    fn parse_power(&mut self) -> Result<Expr, GradeError> {
        let base = self.parse_postfix()?;
        if matches!(self.peek(), Some(Token::Caret)) {
            self.advance();
            let exponent = self.parse_unary()?;
            return Ok(Expr::Binary(
                BinaryOp::Power,
                Box::new(base),
                Box::new(exponent),
            ));
        }
        Ok(base)
    }

    /// Postfix `!` (factorial) and `°` (degree literal) bind tightest.
    fn parse_postfix(&mut self) -> Result<Expr, GradeError> {
        let mut expr = self.parse_primary()?;
        loop {
            match self.peek() {
                Some(Token::Bang) => {
                    self.advance();
                    expr = Expr::Unary(UnaryOp::Factorial, Box::new(expr));
                }
                Some(Token::Degree) => {
                    self.advance();
                    expr = Expr::Unary(UnaryOp::Degrees, Box::new(expr));
                }
                _ => break,
            }
        }
        Ok(expr)
    }

    fn parse_primary(&mut self) -> Result<Expr, GradeError> {
        match self.advance() {
            Some(Token::Number(value)) => Ok(Expr::Number(value)),
            Some(Token::Ident(name)) => {
                if let Some(function) = Function::from_ident(&name) {
                    let argument = match self.peek() {
                        Some(Token::OpenParen | Token::OpenBracket) => self.parse_group()?,
                        _ => {
                            return Err(GradeError::Malformed(format!(
                                "function '{name}' requires a bracketed argument"
                            )))
                        }
                    };
                    return Ok(Expr::Call(function, Box::new(argument)));
                }
                match name.as_str() {
                    "e" => Ok(Expr::Number(EULER)),
                    "pi" | "π" => Ok(Expr::Number(PI)),
                    _ => Err(GradeError::UnknownIdentifier(name)),
                }
            }
            Some(Token::OpenParen) => {
                let inner = self.parse_sum()?;
                self.expect(Token::CloseParen)?;
                Ok(inner)
            }
            Some(Token::OpenBracket) => {
                let inner = self.parse_sum()?;
                self.expect(Token::CloseBracket)?;
                Ok(inner)
            }
            Some(other) => Err(GradeError::Malformed(format!(
                "unexpected token {other:?}"
            ))),
            None => Err(GradeError::Malformed("unexpected end of expression".into())),
        }
    }

    fn parse_group(&mut self) -> Result<Expr, GradeError> {
        match self.advance() {
            Some(Token::OpenParen) => {
                let inner = self.parse_sum()?;
                self.expect(Token::CloseParen)?;
                Ok(inner)
            }
            Some(Token::OpenBracket) => {
                let inner = self.parse_sum()?;
                self.expect(Token::CloseBracket)?;
                Ok(inner)
            }
            _ => Err(GradeError::Malformed("expected a bracketed group".into())),
        }
    }

    fn expect(&mut self, token: Token) -> Result<(), GradeError> {
        if self.advance().as_ref() == Some(&token) {
            Ok(())
        } else {
            Err(GradeError::UnbalancedBrackets)
        }
    }
}

fn eval(expr: &Expr) -> Result<f64, GradeError> {
    match expr {
        Expr::Number(value) => Ok(*value),
        Expr::Unary(op, operand) => {
            let x = eval(operand)?;
            match op {
                UnaryOp::Negate => Ok(-x),
                UnaryOp::Degrees => Ok(x * PI / 180.0),
                UnaryOp::Factorial => factorial(x),
            }
        }
        Expr::Binary(op, lhs, rhs) => {
            let a = eval(lhs)?;
            let b = eval(rhs)?;
            Ok(match op {
                BinaryOp::Add => a + b,
                BinaryOp::Subtract => a - b,
                BinaryOp::Multiply => a * b,
                BinaryOp::Divide => a / b,
                BinaryOp::Power => a.powf(b),
            })
        }
        Expr::Call(function, argument) => Ok(function.apply(eval(argument)?)),
    }
}

fn factorial(x: f64) -> Result<f64, GradeError> {
    if x < 0.0 || x.fract().abs() > 1e-9 || !x.is_finite() {
        return Err(GradeError::BadFactorial);
    }
    let n = x.round() as u64;
    Ok((1..=n).map(|i| i as f64).product())
}
