//! Arithmetic expression evaluation.
//!
//! A tokenizer plus a recursive-descent evaluator over numbers, cell
//! references, `+ - * / %`, parentheses and the range built-ins. Cell
//! references resolve to the numeric value of the referenced cell's raw text;
//! a referenced formula is never evaluated.
//!
//! ```text
//! expr    := term (('+' | '-') term)*
//! term    := unary (('*' | '/' | '%') unary)*
//! unary   := ('+' | '-') unary | primary
//! primary := NUMBER | REF | NAME '(' REF ':' REF ')' | '(' expr ')'
//! ```

use super::cell_ref::{CellRef, letters_to_col};
use super::error::{FormulaError, Result};
use super::number::coerce_number;
use super::range::CellRange;
use super::store::CellStore;
use crate::builtins::range_builtin;

/// Deepest nesting of parentheses and unary signs a formula may use.
pub const MAX_NESTING_DEPTH: usize = 64;

#[derive(Clone, Debug, PartialEq)]
enum Token {
    Number(f64),
    Ref(CellRef),
    Name(String),
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Colon,
    LParen,
    RParen,
}

fn tokenize(input: &str) -> Result<Vec<Token>> {
    let bytes = input.as_bytes();
    let mut tokens = Vec::new();
    let mut pos = 0;

    while pos < bytes.len() {
        let b = bytes[pos];
        match b {
            b' ' | b'\t' | b'\r' | b'\n' => pos += 1,
            b'0'..=b'9' | b'.' => {
                let (n, next) = scan_number(input, pos)?;
                tokens.push(Token::Number(n));
                pos = next;
            }
            b'A'..=b'Z' | b'a'..=b'z' => {
                let start = pos;
                while pos < bytes.len() && bytes[pos].is_ascii_alphabetic() {
                    pos += 1;
                }
                let letters = &input[start..pos];
                let digits_start = pos;
                while pos < bytes.len() && bytes[pos].is_ascii_digit() {
                    pos += 1;
                }
                if pos == digits_start {
                    tokens.push(Token::Name(letters.to_string()));
                } else {
                    let text = &input[start..pos];
                    let col = letters_to_col(letters);
                    let row = input[digits_start..pos]
                        .parse::<usize>()
                        .ok()
                        .and_then(|r| r.checked_sub(1));
                    match (row, col) {
                        (Some(row), Some(col)) => tokens.push(Token::Ref(CellRef::new(row, col))),
                        _ => return Err(FormulaError::InvalidReference(text.to_string())),
                    }
                }
            }
            b'+' => {
                tokens.push(Token::Plus);
                pos += 1;
            }
            b'-' => {
                tokens.push(Token::Minus);
                pos += 1;
            }
            b'*' => {
                tokens.push(Token::Star);
                pos += 1;
            }
            b'/' => {
                tokens.push(Token::Slash);
                pos += 1;
            }
            b'%' => {
                tokens.push(Token::Percent);
                pos += 1;
            }
            b':' => {
                tokens.push(Token::Colon);
                pos += 1;
            }
            b'(' => {
                tokens.push(Token::LParen);
                pos += 1;
            }
            b')' => {
                tokens.push(Token::RParen);
                pos += 1;
            }
            _ => {
                let ch = input[pos..].chars().next().unwrap_or('\u{FFFD}');
                return Err(FormulaError::UnexpectedChar { ch, pos });
            }
        }
    }

    Ok(tokens)
}

/// Scan a number literal starting at `start`: digits, an optional fraction and
/// an optional exponent. Returns the value and the offset just past it.
fn scan_number(input: &str, start: usize) -> Result<(f64, usize)> {
    let bytes = input.as_bytes();
    let mut pos = start;
    while pos < bytes.len() && bytes[pos].is_ascii_digit() {
        pos += 1;
    }
    if pos < bytes.len() && bytes[pos] == b'.' {
        pos += 1;
        while pos < bytes.len() && bytes[pos].is_ascii_digit() {
            pos += 1;
        }
    }
    if pos < bytes.len() && matches!(bytes[pos], b'e' | b'E') {
        let mut exp = pos + 1;
        if exp < bytes.len() && matches!(bytes[exp], b'+' | b'-') {
            exp += 1;
        }
        let exp_digits = exp;
        while exp < bytes.len() && bytes[exp].is_ascii_digit() {
            exp += 1;
        }
        if exp > exp_digits {
            pos = exp;
        }
    }

    let text = &input[start..pos];
    text.parse::<f64>()
        .map(|n| (n, pos))
        .map_err(|_| FormulaError::UnexpectedToken(format!("'{}'", text)))
}

struct Parser<'a> {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
    store: &'a CellStore,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn expect(&mut self, expected: Token) -> Result<()> {
        match self.next() {
            Some(token) if token == expected => Ok(()),
            Some(token) => Err(FormulaError::UnexpectedToken(format!("{:?}", token))),
            None => Err(FormulaError::UnexpectedEnd),
        }
    }

    /// Run `f` one nesting level deeper, failing past `MAX_NESTING_DEPTH`.
    fn nested<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(FormulaError::TooDeep(MAX_NESTING_DEPTH));
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    fn expr(&mut self) -> Result<f64> {
        let mut acc = self.term()?;
        loop {
            match self.peek() {
                Some(Token::Plus) => {
                    self.pos += 1;
                    acc += self.term()?;
                }
                Some(Token::Minus) => {
                    self.pos += 1;
                    acc -= self.term()?;
                }
                _ => return Ok(acc),
            }
        }
    }

    fn term(&mut self) -> Result<f64> {
        let mut acc = self.unary()?;
        loop {
            match self.peek() {
                Some(Token::Star) => {
                    self.pos += 1;
                    acc *= self.unary()?;
                }
                Some(Token::Slash) => {
                    self.pos += 1;
                    let rhs = self.unary()?;
                    if rhs == 0.0 {
                        return Err(FormulaError::DivisionByZero);
                    }
                    acc /= rhs;
                }
                Some(Token::Percent) => {
                    self.pos += 1;
                    let rhs = self.unary()?;
                    if rhs == 0.0 {
                        return Err(FormulaError::DivisionByZero);
                    }
                    acc %= rhs;
                }
                _ => return Ok(acc),
            }
        }
    }

    fn unary(&mut self) -> Result<f64> {
        match self.peek() {
            Some(Token::Minus) => {
                self.pos += 1;
                Ok(-self.nested(Self::unary)?)
            }
            Some(Token::Plus) => {
                self.pos += 1;
                self.nested(Self::unary)
            }
            _ => self.primary(),
        }
    }

    fn primary(&mut self) -> Result<f64> {
        match self.next() {
            Some(Token::Number(n)) => Ok(n),
            Some(Token::Ref(cell)) => Ok(coerce_number(self.store.get(&cell))),
            Some(Token::LParen) => {
                let value = self.nested(Self::expr)?;
                self.expect(Token::RParen)?;
                Ok(value)
            }
            Some(Token::Name(name)) => self.call(&name),
            Some(token) => Err(FormulaError::UnexpectedToken(format!("{:?}", token))),
            None => Err(FormulaError::UnexpectedEnd),
        }
    }

    fn call(&mut self, name: &str) -> Result<f64> {
        let builtin =
            range_builtin(name).ok_or_else(|| FormulaError::UnknownFunction(name.to_string()))?;
        self.expect(Token::LParen)?;
        let start = self.range_corner()?;
        self.expect(Token::Colon)?;
        let end = self.range_corner()?;
        self.expect(Token::RParen)?;
        let range = CellRange::bounded(&start, &end)?;
        Ok((builtin.apply)(self.store, &range))
    }

    fn range_corner(&mut self) -> Result<CellRef> {
        match self.next() {
            Some(Token::Ref(cell)) => Ok(cell),
            Some(token) => Err(FormulaError::InvalidRange(format!("{:?}", token))),
            None => Err(FormulaError::UnexpectedEnd),
        }
    }
}

/// Evaluate an arithmetic expression against the store.
///
/// Fails on syntax errors, unknown functions, division by zero and
/// non-finite results.
pub fn evaluate_expression(expr: &str, store: &CellStore) -> Result<f64> {
    let tokens = tokenize(expr)?;
    let mut parser = Parser {
        tokens,
        pos: 0,
        depth: 0,
        store,
    };
    let value = parser.expr()?;
    if let Some(token) = parser.next() {
        return Err(FormulaError::UnexpectedToken(format!("{:?}", token)));
    }
    if !value.is_finite() {
        return Err(FormulaError::NotFinite);
    }
    Ok(value)
}
