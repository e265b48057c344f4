//! 2D points used as bezier control points and table samples

use std::fmt;
use std::str::FromStr;

use crate::error::{AnimationError, Result};

const BYTE_ORDER_MARK: char = '\u{FEFF}';

/// A mutable 2D coordinate
///
/// The arithmetic helpers mutate in place and hand back `&mut Self` so calls
/// can be chained:
///
/// ```
/// use glide_animation::Point;
///
/// let mut p = Point::new(1.0, 2.0);
/// p.add(1.0, 1.0).scale(2.0);
/// assert_eq!(p, Point::new(4.0, 6.0));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn set(&mut self, x: f64, y: f64) -> &mut Self {
        self.x = x;
        self.y = y;
        self
    }

    pub fn add(&mut self, x: f64, y: f64) -> &mut Self {
        self.x += x;
        self.y += y;
        self
    }

    pub fn subtract(&mut self, x: f64, y: f64) -> &mut Self {
        self.x -= x;
        self.y -= y;
        self
    }

    pub fn multiply(&mut self, x: f64, y: f64) -> &mut Self {
        self.x *= x;
        self.y *= y;
        self
    }

    pub fn divide(&mut self, x: f64, y: f64) -> &mut Self {
        self.x /= x;
        self.y /= y;
        self
    }

    /// Multiply both coordinates by the same factor
    pub fn scale(&mut self, factor: f64) -> &mut Self {
        self.multiply(factor, factor)
    }

    pub fn add_point(&mut self, other: Point) -> &mut Self {
        self.add(other.x, other.y)
    }

    pub fn subtract_point(&mut self, other: Point) -> &mut Self {
        self.subtract(other.x, other.y)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

impl FromStr for Point {
    type Err = AnimationError;

    /// Parse `"x,y"`, ignoring whitespace and byte-order marks
    fn from_str(s: &str) -> Result<Self> {
        let c = parse_components(s, 2)?;
        Ok(Self::new(c[0], c[1]))
    }
}

/// Split a comma-separated list of exactly `expected` finite numbers.
///
/// Whitespace and byte-order marks anywhere in the input are dropped first,
/// which keeps strings copied out of web curve editors parseable.
pub(crate) fn parse_components(input: &str, expected: usize) -> Result<Vec<f64>> {
    let cleaned: String = input
        .chars()
        .filter(|c| !c.is_whitespace() && *c != BYTE_ORDER_MARK)
        .collect();

    let tokens: Vec<&str> = cleaned.split(',').collect();
    if tokens.len() != expected {
        return Err(AnimationError::parse(
            input,
            format!("expected {} components, got {}", expected, tokens.len()),
        ));
    }

    tokens
        .iter()
        .map(|token| match token.parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(v),
            Ok(_) => Err(AnimationError::parse(
                input,
                format!("component `{token}` is not finite"),
            )),
            Err(_) => Err(AnimationError::parse(
                input,
                format!("component `{token}` is not a number"),
            )),
        })
        .collect()
}
