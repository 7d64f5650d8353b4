//! Representation of carlae numbers.

use std::cmp::Ordering;
use std::fmt;
use std::ops;
use std::str;

use self::Number::*;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Number {
    Integer(i64),
    Float(f64),
}

impl Number {
    pub fn is_zero(&self) -> bool {
        match self {
            Integer(i) => *i == 0,
            Float(f) => *f == 0.0,
        }
    }

    /// Numeric comparison across representations, so that 1 and 1.0 are
    /// considered equal.
    pub fn compare(&self, other: &Number) -> Option<Ordering> {
        match (self, other) {
            (Integer(a), Integer(b)) => Some(a.cmp(b)),
            _ => {
                let a: f64 = (*self).into();
                let b: f64 = (*other).into();
                a.partial_cmp(&b)
            }
        }
    }

    fn combine(
        &mut self,
        other: Self,
        int_op: fn(i64, i64) -> Option<i64>,
        float_op: fn(f64, f64) -> f64,
    ) {
        if let (Integer(a), Integer(b)) = (*self, other) {
            // Overflow falls back to float rather than wrapping.
            *self = match int_op(a, b) {
                Some(res) => Integer(res),
                None => Float(float_op(a as f64, b as f64)),
            };
            return;
        }

        let a: f64 = (*self).into();
        let b: f64 = other.into();
        *self = Float(float_op(a, b));
    }
}

impl From<Number> for f64 {
    fn from(num: Number) -> f64 {
        match num {
            Integer(i) => i as f64,
            Float(f) => f,
        }
    }
}

#[derive(Debug)]
pub struct ParseNumberError(String);

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Integer(i) => write!(f, "{}", i),
            // Debug keeps the trailing ".0" on integral floats.
            Float(ff) => write!(f, "{:?}", ff),
        }
    }
}

impl fmt::Display for ParseNumberError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Not a number: \"{}\"", self.0)
    }
}

impl str::FromStr for Number {
    type Err = ParseNumberError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let integer = s.parse::<i64>();
        if let Ok(int) = integer {
            return Ok(Integer(int));
        }

        // Keep words like `inf` and `nan` available as symbols.
        let digits = s.trim_start_matches(|c| c == '+' || c == '-');
        let numeric = match digits.chars().next() {
            Some(c) => c.is_ascii_digit() || c == '.',
            None => false,
        };
        if numeric {
            if let Ok(f) = s.parse::<f64>() {
                return Ok(Float(f));
            }
        }

        Err(ParseNumberError(s.to_string()))
    }
}

impl Default for Number {
    fn default() -> Self {
        Number::Integer(0)
    }
}

impl ops::Neg for Number {
    type Output = Number;

    fn neg(self) -> Number {
        match self {
            Integer(i) => match i.checked_neg() {
                Some(res) => Integer(res),
                None => Float(-(i as f64)),
            },
            Float(f) => Float(-f),
        }
    }
}

impl ops::AddAssign for Number {
    fn add_assign(&mut self, other: Self) {
        self.combine(other, i64::checked_add, |a, b| a + b);
    }
}

impl ops::SubAssign for Number {
    fn sub_assign(&mut self, other: Self) {
        self.combine(other, i64::checked_sub, |a, b| a - b);
    }
}

impl ops::MulAssign for Number {
    fn mul_assign(&mut self, other: Self) {
        self.combine(other, i64::checked_mul, |a, b| a * b);
    }
}

impl ops::DivAssign for Number {
    /// Division always produces a Float.
    fn div_assign(&mut self, other: Self) {
        let a: f64 = (*self).into();
        let b: f64 = other.into();
        *self = Float(a / b);
    }
}
