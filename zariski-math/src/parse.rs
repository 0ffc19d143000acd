//! Boundary parsing for rationals, polynomials and monomial orders.
//!
//! Polynomials use a flat sum-of-terms syntax with no parentheses:
//!
//! ```text
//! 3/4*x^2*y - 2*z + 0.5
//! ```
//!
//! Variables are resolved against a declared list; their position in that
//! list is the exponent index. Errors carry the byte offset of the problem.

use crate::error::{MathResult, ParseError};
use crate::monomial::{Monomial, MonomialOrder};
use crate::polynomial::{Polynomial, Term};
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::Zero;

/// Parse `"3/4"`, `"-2"` or `"0.25"` into an exact rational.
///
/// Zero denominators are rejected, never coerced.
pub fn parse_rational(text: &str) -> Result<BigRational, ParseError> {
    let start = text.len() - text.trim_start().len();
    parse_rational_at(text.trim(), start)
}

fn parse_rational_at(s: &str, base: usize) -> Result<BigRational, ParseError> {
    let (negative, body, body_base) = match s.as_bytes().first() {
        None => return Err(ParseError::new(base, "expected a number")),
        Some(b'-') => (true, &s[1..], base + 1),
        Some(b'+') => (false, &s[1..], base + 1),
        Some(_) => (false, s, base),
    };

    let value = if let Some((num, den)) = body.split_once('/') {
        let n = parse_digits(num, body_base)?;
        let den_base = body_base + num.len() + 1;
        let d = parse_digits(den, den_base)?;
        if d.is_zero() {
            return Err(ParseError::new(den_base, "zero denominator"));
        }
        BigRational::new(n, d)
    } else if let Some((int, frac)) = body.split_once('.') {
        if int.is_empty() && frac.is_empty() {
            return Err(ParseError::new(body_base, "expected digits around '.'"));
        }
        let i = if int.is_empty() {
            BigInt::zero()
        } else {
            parse_digits(int, body_base)?
        };
        let f = if frac.is_empty() {
            BigInt::zero()
        } else {
            parse_digits(frac, body_base + int.len() + 1)?
        };
        let scale = num_traits::pow(BigInt::from(10), frac.len());
        BigRational::new(i * &scale + f, scale)
    } else {
        BigRational::from_integer(parse_digits(body, body_base)?)
    };

    Ok(if negative { -value } else { value })
}

fn parse_digits(s: &str, offset: usize) -> Result<BigInt, ParseError> {
    if s.is_empty() {
        return Err(ParseError::new(offset, "expected digits"));
    }
    if let Some(pos) = s.bytes().position(|b| !b.is_ascii_digit()) {
        let c = s[pos..].chars().next().unwrap_or('?');
        return Err(ParseError::new(
            offset + pos,
            format!("unexpected character '{c}' in number"),
        ));
    }
    s.parse::<BigInt>()
        .map_err(|e| ParseError::new(offset, e.to_string()))
}

/// Parse a polynomial over the declared variables.
pub fn parse_polynomial(text: &str, vars: &[String]) -> Result<Polynomial, ParseError> {
    PolyParser::new(text, vars).parse()
}

/// Parse `"lex"`, `"grlex"` or `"grevlex"`.
pub fn parse_order(text: &str) -> MathResult<MonomialOrder> {
    text.parse()
}

struct PolyParser<'a> {
    input: &'a str,
    pos: usize,
    vars: &'a [String],
}

impl<'a> PolyParser<'a> {
    fn new(input: &'a str, vars: &'a [String]) -> Self {
        Self {
            input,
            pos: 0,
            vars,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.input.as_bytes().get(self.pos).copied()
    }

    fn skip_ws(&mut self) {
        while self.peek().is_some_and(|b| b.is_ascii_whitespace()) {
            self.pos += 1;
        }
    }

    fn unexpected(&self) -> ParseError {
        match self.input[self.pos..].chars().next() {
            Some(c) => ParseError::new(self.pos, format!("unexpected character '{c}'")),
            None => ParseError::new(self.pos, "unexpected end of input"),
        }
    }

    fn scan_while(&mut self, pred: impl Fn(u8) -> bool) -> &'a str {
        let input = self.input;
        let start = self.pos;
        while self.peek().is_some_and(&pred) {
            self.pos += 1;
        }
        &input[start..self.pos]
    }

    fn parse(mut self) -> Result<Polynomial, ParseError> {
        let mut terms = Vec::new();

        self.skip_ws();
        let mut negative = match self.peek() {
            Some(b'-') => {
                self.pos += 1;
                true
            }
            Some(b'+') => {
                self.pos += 1;
                false
            }
            _ => false,
        };

        loop {
            let mut term = self.parse_term()?;
            if negative {
                term.coeff = -term.coeff;
            }
            terms.push(term);

            self.skip_ws();
            match self.peek() {
                None => break,
                Some(b'+') => negative = false,
                Some(b'-') => negative = true,
                Some(_) => return Err(self.unexpected()),
            }
            self.pos += 1;
        }

        Ok(Polynomial::from_terms(self.vars.len(), terms))
    }

    fn parse_term(&mut self) -> Result<Term, ParseError> {
        let mut coeff = BigRational::from_integer(BigInt::from(1));
        let mut exps = vec![0u32; self.vars.len()];

        loop {
            self.skip_ws();
            match self.peek() {
                Some(b) if b.is_ascii_digit() || b == b'.' => {
                    let start = self.pos;
                    let literal =
                        self.scan_while(|b| b.is_ascii_digit() || b == b'.' || b == b'/');
                    coeff *= parse_rational_at(literal, start)?;
                }
                Some(b) if b.is_ascii_alphabetic() || b == b'_' => {
                    let (var, e) = self.parse_power()?;
                    exps[var] = exps[var]
                        .checked_add(e)
                        .ok_or_else(|| ParseError::new(self.pos, "exponent overflow"))?;
                }
                _ => return Err(self.unexpected()),
            }

            self.skip_ws();
            if self.peek() == Some(b'*') {
                self.pos += 1;
            } else {
                break;
            }
        }

        Ok(Term::new(coeff, Monomial::new(exps)))
    }

    fn parse_power(&mut self) -> Result<(usize, u32), ParseError> {
        let start = self.pos;
        let name = self.scan_while(|b| b.is_ascii_alphanumeric() || b == b'_');
        let var = self
            .vars
            .iter()
            .position(|v| v == name)
            .ok_or_else(|| ParseError::new(start, format!("unknown variable '{name}'")))?;

        self.skip_ws();
        if self.peek() != Some(b'^') {
            return Ok((var, 1));
        }
        self.pos += 1;
        self.skip_ws();

        let exp_start = self.pos;
        let digits = self.scan_while(|b| b.is_ascii_digit());
        if digits.is_empty() {
            return Err(ParseError::new(exp_start, "expected exponent"));
        }
        let e = digits
            .parse::<u32>()
            .map_err(|_| ParseError::new(exp_start, format!("exponent '{digits}' too large")))?;
        Ok((var, e))
    }
}
