//! Shared lexer for numeric and unit expressions.
//!
//! Tokens carry distinct classes for numbers and identifiers, so constant
//! and function names are resolved structurally during parsing instead of
//! by textual substitution.

use crate::error::GradeError;

/// Bracket nesting beyond this depth is rejected before parsing. The cap
/// bounds worst-case work on adversarial or malformed input; real answers
/// never nest this far.
pub(crate) const MAX_NESTING_DEPTH: usize = 3;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Token {
    Number(f64),
    Ident(String),
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    Bang,
    Degree,
    OpenParen,
    CloseParen,
    OpenBracket,
    CloseBracket,
}

/// Fast structural validity scan run before tokenizing: bracket balance,
/// bracket nesting depth, and the accepted character alphabet. Anything
/// that fails here is malformed input, graded incorrect by the caller.
pub(crate) fn precheck(input: &str) -> Result<(), GradeError> {
    let mut stack: Vec<char> = Vec::new();
    let mut max_depth = 0usize;

    for c in input.chars() {
        match c {
            '(' | '[' => {
                stack.push(c);
                max_depth = max_depth.max(stack.len());
            }
            ')' => {
                if stack.pop() != Some('(') {
                    return Err(GradeError::UnbalancedBrackets);
                }
            }
            ']' => {
                if stack.pop() != Some('[') {
                    return Err(GradeError::UnbalancedBrackets);
                }
            }
            '.' | '+' | '-' | '*' | '/' | '^' | '!' | '°' => {}
            c if c.is_alphanumeric() || c.is_whitespace() => {}
            other => return Err(GradeError::DisallowedSymbol(other)),
        }
    }

    if !stack.is_empty() {
        return Err(GradeError::UnbalancedBrackets);
    }
    if max_depth > MAX_NESTING_DEPTH {
        return Err(GradeError::TooDeep {
            depth: max_depth,
            limit: MAX_NESTING_DEPTH,
        });
    }
    Ok(())
}

pub(crate) fn tokenize(input: &str) -> Result<Vec<Token>, GradeError> {
    let mut tokens = Vec::new();
    let mut chars = input.chars().peekable();

    while let Some(&c) = chars.peek() {
        match c {
            c if c.is_whitespace() => {
                chars.next();
            }
            '0'..='9' | '.' => {
                let mut lexeme = String::new();
                while let Some(&d) = chars.peek() {
                    if d.is_ascii_digit() || d == '.' {
                        lexeme.push(d);
                        chars.next();
                    } else {
                        break;
                    }
                }
                let value = lexeme
                    .parse::<f64>()
                    .map_err(|_| GradeError::Malformed(format!("bad numeric literal '{lexeme}'")))?;
                tokens.push(Token::Number(value));
            }
            c if c.is_alphabetic() => {
                let mut ident = String::new();
                while let Some(&d) = chars.peek() {
                    if d.is_alphabetic() {
                        ident.push(d);
                        chars.next();
                    } else {
                        break;
                    }
                }
                tokens.push(Token::Ident(ident));
            }
            '+' => {
                chars.next();
                tokens.push(Token::Plus);
            }
            '-' => {
                chars.next();
                tokens.push(Token::Minus);
            }
            '*' => {
                chars.next();
                tokens.push(Token::Star);
            }
            '/' => {
                chars.next();
                tokens.push(Token::Slash);
            }
            '^' => {
                chars.next();
                tokens.push(Token::Caret);
            }
            '!' => {
                chars.next();
                tokens.push(Token::Bang);
            }
            '°' => {
                chars.next();
                tokens.push(Token::Degree);
            }
            '(' => {
                chars.next();
                tokens.push(Token::OpenParen);
            }
            ')' => {
                chars.next();
                tokens.push(Token::CloseParen);
            }
            '[' => {
                chars.next();
                tokens.push(Token::OpenBracket);
            }
            ']' => {
                chars.next();
                tokens.push(Token::CloseBracket);
            }
            other => return Err(GradeError::DisallowedSymbol(other)),
        }
    }

    Ok(tokens)
}
