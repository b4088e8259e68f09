//! Restricted arithmetic parser.
//!
//! Recursive descent over `+ - * /`, parentheses, decimals, and unary
//! minus with standard precedence. This replaces any form of general
//! code evaluation: the grammar is closed, so there is no execution
//! surface beyond float arithmetic.

use lumen_common::EngineError;

/// Evaluate a bare arithmetic expression such as `(2+3)*4`.
pub fn evaluate(input: &str) -> Result<f64, EngineError> {
    let mut parser = Parser {
        input: input.as_bytes(),
        pos: 0,
    };
    let value = parser.expression()?;
    if parser.pos != parser.input.len() {
        return Err(EngineError::ParseFailure);
    }
    Ok(value)
}

struct Parser<'a> {
    input: &'a [u8],
    pos: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<u8> {
        let c = self.peek()?;
        self.pos += 1;
        Some(c)
    }

    // expression := term (('+' | '-') term)*
    fn expression(&mut self) -> Result<f64, EngineError> {
        let mut value = self.term()?;
        while let Some(op @ (b'+' | b'-')) = self.peek() {
            self.pos += 1;
            let rhs = self.term()?;
            value = if op == b'+' { value + rhs } else { value - rhs };
        }
        Ok(value)
    }

    // term := factor (('*' | '/') factor)*
    fn term(&mut self) -> Result<f64, EngineError> {
        let mut value = self.factor()?;
        while let Some(op @ (b'*' | b'/')) = self.peek() {
            self.pos += 1;
            let rhs = self.factor()?;
            if op == b'*' {
                value *= rhs;
            } else {
                if rhs == 0.0 {
                    return Err(EngineError::InvalidOperand("division by zero".into()));
                }
                value /= rhs;
            }
        }
        Ok(value)
    }

    // factor := '-' factor | '(' expression ')' | number
    fn factor(&mut self) -> Result<f64, EngineError> {
        match self.peek() {
            Some(b'-') => {
                self.pos += 1;
                Ok(-self.factor()?)
            }
            Some(b'(') => {
                self.pos += 1;
                let value = self.expression()?;
                if self.bump() != Some(b')') {
                    return Err(EngineError::ParseFailure);
                }
                Ok(value)
            }
            Some(c) if c.is_ascii_digit() || c == b'.' => self.number(),
            _ => Err(EngineError::ParseFailure),
        }
    }

    fn number(&mut self) -> Result<f64, EngineError> {
        let start = self.pos;
        let mut seen_dot = false;
        while let Some(c) = self.peek() {
            match c {
                b'0'..=b'9' => self.pos += 1,
                b'.' if !seen_dot => {
                    seen_dot = true;
                    self.pos += 1;
                }
                _ => break,
            }
        }
        std::str::from_utf8(&self.input[start..self.pos])
            .ok()
            .and_then(|s| s.parse::<f64>().ok())
            .ok_or(EngineError::ParseFailure)
    }
}
