//! Unit symbols and the unit-expression parser
//!
//! # Grammar
//!
//! ```text
//! expr    := power ( ('*' | '/' | <implicit>) power )*
//! power   := primary ( ('**' | '^') integer )?
//! primary := number | symbol | '(' expr ')'
//! symbol  := [prefix] atom
//! ```
//!
//! Juxtaposition (`1E-8 m**2/(V*s)`) multiplies. Recognised prefixes are
//! `p n u µ μ m c d k`; atoms are listed in [`ATOMS`]. A bare atom is always
//! matched before a prefixed one, so `min` is minutes and `mm` is millimetres.

use std::fmt;
use std::ops::{Div, Mul};
use std::str::FromStr;

use crate::error::{GelError, Result};
use crate::units::Dimension;

/// A unit: display symbol, scale factor to SI, and dimension
#[derive(Debug, Clone, PartialEq)]
pub struct Unit {
    symbol: String,
    factor: f64,
    dimension: Dimension,
}

struct Atom {
    symbol: &'static str,
    factor: f64,
    dimension: Dimension,
    prefixable: bool,
}

const fn atom(symbol: &'static str, factor: f64, dimension: Dimension, prefixable: bool) -> Atom {
    Atom {
        symbol,
        factor,
        dimension,
        prefixable,
    }
}

const ENERGY: Dimension = Dimension::new(1, 2, -2, 0, 0, 0);
const FORCE: Dimension = Dimension::new(1, 1, -2, 0, 0, 0);
const PRESSURE: Dimension = Dimension::new(1, -1, -2, 0, 0, 0);
const CHARGE: Dimension = Dimension::new(0, 0, 1, 1, 0, 0);

/// Base symbols known to the parser
const ATOMS: &[Atom] = &[
    atom("g", 1e-3, Dimension::MASS, true),
    atom("m", 1.0, Dimension::LENGTH, true),
    atom("s", 1.0, Dimension::TIME, true),
    atom("A", 1.0, Dimension::CURRENT, true),
    atom("K", 1.0, Dimension::TEMPERATURE, false),
    atom("mol", 1.0, Dimension::AMOUNT, true),
    atom("V", 1.0, Dimension::VOLTAGE, true),
    atom("L", 1e-3, Dimension::VOLUME, true),
    atom("l", 1e-3, Dimension::VOLUME, true),
    atom("J", 1.0, ENERGY, true),
    atom("N", 1.0, FORCE, true),
    atom("Pa", 1.0, PRESSURE, true),
    atom("C", 1.0, CHARGE, true),
    atom("M", 1e3, Dimension::MOLAR_CONCENTRATION, true),
    atom("Da", 1.660_539_066_60e-27, Dimension::MASS, true),
    atom("bp", 1.0, Dimension::DIMENSIONLESS, true),
    atom("px", 1.0, Dimension::DIMENSIONLESS, false),
    atom("%", 0.01, Dimension::DIMENSIONLESS, false),
    atom("min", 60.0, Dimension::TIME, false),
    atom("h", 3600.0, Dimension::TIME, false),
    atom("hr", 3600.0, Dimension::TIME, false),
    atom("in", 0.0254, Dimension::LENGTH, false),
];

const PREFIXES: &[(&str, f64)] = &[
    ("p", 1e-12),
    ("n", 1e-9),
    ("u", 1e-6),
    ("µ", 1e-6),
    ("μ", 1e-6),
    ("m", 1e-3),
    ("c", 1e-2),
    ("d", 1e-1),
    ("k", 1e3),
];

impl Unit {
    /// The dimensionless unit with factor 1
    pub fn dimensionless() -> Self {
        Self {
            symbol: String::new(),
            factor: 1.0,
            dimension: Dimension::DIMENSIONLESS,
        }
    }

    /// Parse a unit expression such as `"ng"`, `"cm**2/V/s"` or `"1E-8 m**2/(V*s)"`
    ///
    /// # Errors
    ///
    /// [`GelError::UnitParse`] on unknown symbols, unbalanced parentheses,
    /// non-integer exponents or trailing garbage.
    pub fn parse(text: &str) -> Result<Self> {
        let trimmed = text.trim();
        if trimmed.is_empty() || trimmed == "dimensionless" {
            return Ok(Self::dimensionless());
        }

        let tokens = tokenize(trimmed)?;
        let mut parser = Parser {
            text: trimmed,
            tokens,
            pos: 0,
        };
        let mut unit = parser.expr()?;
        if parser.pos != parser.tokens.len() {
            return Err(parser.error("unexpected trailing input"));
        }

        unit.symbol = trimmed.to_string();
        Ok(unit)
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Multiplicative factor from this unit to the coherent SI unit
    pub fn factor(&self) -> f64 {
        self.factor
    }

    pub fn dimension(&self) -> Dimension {
        self.dimension
    }

    pub fn is_compatible(&self, other: &Unit) -> bool {
        self.dimension == other.dimension
    }

    /// Factor that converts a magnitude in `self` into a magnitude in `target`
    pub fn conversion_factor(&self, target: &Unit) -> Result<f64> {
        if !self.is_compatible(target) {
            return Err(GelError::dimensionality(
                format!("conversion from '{}' to '{}'", self.symbol, target.symbol),
                target.dimension,
                self.dimension,
            ));
        }
        Ok(self.factor / target.factor)
    }

    pub fn powi(&self, power: i32) -> Unit {
        let symbol = if self.symbol.is_empty() {
            String::new()
        } else if is_composite(&self.symbol) {
            format!("({})**{}", self.symbol, power)
        } else {
            format!("{}**{}", self.symbol, power)
        };
        Unit {
            symbol,
            factor: self.factor.powi(power),
            dimension: self.dimension.powi(power),
        }
    }

    fn scalar(value: f64) -> Unit {
        Unit {
            symbol: format!("{}", value),
            factor: value,
            dimension: Dimension::DIMENSIONLESS,
        }
    }

    fn lookup(symbol: &str) -> Option<Unit> {
        let make = |a: &Atom, scale: f64| Unit {
            symbol: symbol.to_string(),
            factor: a.factor * scale,
            dimension: a.dimension,
        };

        if let Some(a) = ATOMS.iter().find(|a| a.symbol == symbol) {
            return Some(make(a, 1.0));
        }

        PREFIXES.iter().find_map(|(prefix, scale)| {
            let rest = symbol.strip_prefix(prefix)?;
            ATOMS
                .iter()
                .find(|a| a.prefixable && a.symbol == rest)
                .map(|a| make(a, *scale))
        })
    }
}

fn is_composite(symbol: &str) -> bool {
    symbol.contains(['*', '/', ' ', '^'])
}

impl Mul for Unit {
    type Output = Unit;

    fn mul(self, rhs: Unit) -> Unit {
        let symbol = match (self.symbol.is_empty(), rhs.symbol.is_empty()) {
            (true, _) => rhs.symbol,
            (_, true) => self.symbol,
            _ => format!("{}*{}", self.symbol, rhs.symbol),
        };
        Unit {
            symbol,
            factor: self.factor * rhs.factor,
            dimension: self.dimension * rhs.dimension,
        }
    }
}

impl Div for Unit {
    type Output = Unit;

    fn div(self, rhs: Unit) -> Unit {
        let denominator = if is_composite(&rhs.symbol) {
            format!("({})", rhs.symbol)
        } else {
            rhs.symbol.clone()
        };
        let symbol = match (self.symbol.is_empty(), rhs.symbol.is_empty()) {
            (_, true) => self.symbol,
            (true, false) => format!("1/{}", denominator),
            _ => format!("{}/{}", self.symbol, denominator),
        };
        Unit {
            symbol,
            factor: self.factor / rhs.factor,
            dimension: self.dimension / rhs.dimension,
        }
    }
}

impl FromStr for Unit {
    type Err = GelError;

    fn from_str(s: &str) -> Result<Self> {
        Unit::parse(s)
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol)
    }
}

// =================================================================================================
// Tokenizer and parser
// =================================================================================================

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(f64),
    Symbol(String),
    Star,
    Slash,
    Pow,
    Open,
    Close,
}

fn parse_error(text: &str, reason: impl Into<String>) -> GelError {
    GelError::UnitParse {
        text: text.to_string(),
        reason: reason.into(),
    }
}

fn is_symbol_char(c: char) -> bool {
    c.is_alphabetic() || c == '%' || c == 'µ' || c == 'μ'
}

fn tokenize(text: &str) -> Result<Vec<Token>> {
    let chars: Vec<char> = text.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        match c {
            ' ' | '\t' => i += 1,
            '*' => {
                if chars.get(i + 1) == Some(&'*') {
                    tokens.push(Token::Pow);
                    i += 2;
                } else {
                    tokens.push(Token::Star);
                    i += 1;
                }
            }
            '^' => {
                tokens.push(Token::Pow);
                i += 1;
            }
            '/' => {
                tokens.push(Token::Slash);
                i += 1;
            }
            '(' => {
                tokens.push(Token::Open);
                i += 1;
            }
            ')' => {
                tokens.push(Token::Close);
                i += 1;
            }
            _ if c.is_ascii_digit()
                || c == '.'
                || ((c == '-' || c == '+')
                    && chars.get(i + 1).is_some_and(|n| n.is_ascii_digit())) =>
            {
                let start = i;
                i += 1;
                while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                    i += 1;
                }
                // scientific exponent: e/E followed by an optionally signed digit
                if i < chars.len() && (chars[i] == 'e' || chars[i] == 'E') {
                    let mut j = i + 1;
                    if j < chars.len() && (chars[j] == '-' || chars[j] == '+') {
                        j += 1;
                    }
                    if j < chars.len() && chars[j].is_ascii_digit() {
                        i = j;
                        while i < chars.len() && chars[i].is_ascii_digit() {
                            i += 1;
                        }
                    }
                }
                let literal: String = chars[start..i].iter().collect();
                let value = literal
                    .parse::<f64>()
                    .map_err(|_| parse_error(text, format!("bad number '{}'", literal)))?;
                tokens.push(Token::Number(value));
            }
            _ if is_symbol_char(c) => {
                let start = i;
                while i < chars.len() && is_symbol_char(chars[i]) {
                    i += 1;
                }
                tokens.push(Token::Symbol(chars[start..i].iter().collect()));
            }
            _ => return Err(parse_error(text, format!("unexpected character '{}'", c))),
        }
    }

    Ok(tokens)
}

struct Parser<'a> {
    text: &'a str,
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser<'_> {
    fn error(&self, reason: impl Into<String>) -> GelError {
        parse_error(self.text, reason)
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        self.pos += 1;
        token
    }

    fn expr(&mut self) -> Result<Unit> {
        let mut acc = self.power()?;
        loop {
            match self.peek() {
                Some(Token::Star) => {
                    self.pos += 1;
                    acc = acc * self.power()?;
                }
                Some(Token::Slash) => {
                    self.pos += 1;
                    acc = acc / self.power()?;
                }
                Some(Token::Number(_)) | Some(Token::Symbol(_)) | Some(Token::Open) => {
                    acc = acc * self.power()?;
                }
                _ => break,
            }
        }
        Ok(acc)
    }

    fn power(&mut self) -> Result<Unit> {
        let base = self.primary()?;
        if self.peek() != Some(&Token::Pow) {
            return Ok(base);
        }
        self.pos += 1;
        match self.next() {
            Some(Token::Number(e)) if e.fract() == 0.0 && e.abs() <= 32.0 => Ok(base.powi(e as i32)),
            Some(Token::Number(e)) => Err(self.error(format!("exponent {} is not a small integer", e))),
            _ => Err(self.error("missing exponent")),
        }
    }

    fn primary(&mut self) -> Result<Unit> {
        match self.next() {
            Some(Token::Number(v)) => Ok(Unit::scalar(v)),
            Some(Token::Symbol(s)) => {
                Unit::lookup(&s).ok_or_else(|| self.error(format!("unknown unit '{}'", s)))
            }
            Some(Token::Open) => {
                let inner = self.expr()?;
                match self.next() {
                    Some(Token::Close) => Ok(inner),
                    _ => Err(self.error("unbalanced parentheses")),
                }
            }
            Some(other) => Err(self.error(format!("unexpected token {:?}", other))),
            None => Err(self.error("unexpected end of input")),
        }
    }
}
