/*!
Numbers, preserving the integer/float distinction.

Arithmetic on two integers stays integer whenever the operation supports it, with two exceptions:
- `/` falls back to a float when the division is inexact.
- `**` falls back to a float when the exponent is negative.

Any float operand makes the result a float.
Operations which leave the representable range of an integer are reported rather than wrapped.
*/

use std::cmp::Ordering;

use crate::types::err::EvaluateError;

/// An integer or floating-point value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Number {
    /// An integer.
    Int(i64),

    /// A float.
    Float(f64),
}

impl Number {
    /// The value as a float, promoting an integer if required.
    pub fn as_f64(self) -> f64 {
        match self {
            Self::Int(i) => i as f64,
            Self::Float(f) => f,
        }
    }

    /// Numeric comparison, promoting to float on mixed operands.
    ///
    /// None only when a float operand is NaN.
    pub fn compare(self, other: Number) -> Option<Ordering> {
        match (self, other) {
            (Self::Int(a), Self::Int(b)) => Some(a.cmp(&b)),
            _ => self.as_f64().partial_cmp(&other.as_f64()),
        }
    }

    pub fn add(self, other: Number) -> Result<Number, EvaluateError> {
        match (self, other) {
            (Self::Int(a), Self::Int(b)) => match a.checked_add(b) {
                Some(c) => Ok(Self::Int(c)),
                None => Err(EvaluateError::Overflow),
            },
            _ => Ok(Self::Float(self.as_f64() + other.as_f64())),
        }
    }

    pub fn sub(self, other: Number) -> Result<Number, EvaluateError> {
        match (self, other) {
            (Self::Int(a), Self::Int(b)) => match a.checked_sub(b) {
                Some(c) => Ok(Self::Int(c)),
                None => Err(EvaluateError::Overflow),
            },
            _ => Ok(Self::Float(self.as_f64() - other.as_f64())),
        }
    }

    pub fn mul(self, other: Number) -> Result<Number, EvaluateError> {
        match (self, other) {
            (Self::Int(a), Self::Int(b)) => match a.checked_mul(b) {
                Some(c) => Ok(Self::Int(c)),
                None => Err(EvaluateError::Overflow),
            },
            _ => Ok(Self::Float(self.as_f64() * other.as_f64())),
        }
    }

    /// Division.
    ///
    /// Exact division of two integers yields an integer, otherwise the result is a float.
    pub fn div(self, other: Number) -> Result<Number, EvaluateError> {
        match (self, other) {
            (_, Self::Int(0)) => Err(EvaluateError::DivisionByZero),
            (Self::Int(a), Self::Int(b)) => {
                if a % b == 0 {
                    match a.checked_div(b) {
                        Some(c) => Ok(Self::Int(c)),
                        None => Err(EvaluateError::Overflow),
                    }
                } else {
                    Ok(Self::Float(a as f64 / b as f64))
                }
            }
            _ => {
                let divisor = other.as_f64();
                if divisor == 0.0 {
                    Err(EvaluateError::DivisionByZero)
                } else {
                    Ok(Self::Float(self.as_f64() / divisor))
                }
            }
        }
    }

    /// Floor division, restricted to integers.
    pub fn int_div(self, other: Number) -> Result<Number, EvaluateError> {
        let (a, b) = self.int_pair(other)?;
        if b == 0 {
            return Err(EvaluateError::DivisionByZero);
        }
        match a.checked_div(b) {
            None => Err(EvaluateError::Overflow),
            Some(q) => {
                // Truncated quotient steps down when the remainder is negative with respect to the divisor.
                if (a % b != 0) && ((a < 0) != (b < 0)) {
                    Ok(Self::Int(q - 1))
                } else {
                    Ok(Self::Int(q))
                }
            }
        }
    }

    /// Modulus, restricted to integers, with the sign of the divisor.
    pub fn modulo(self, other: Number) -> Result<Number, EvaluateError> {
        let (a, b) = self.int_pair(other)?;
        if b == 0 {
            return Err(EvaluateError::DivisionByZero);
        }
        let r = a % b;
        if r != 0 && ((r < 0) != (b < 0)) {
            Ok(Self::Int(r + b))
        } else {
            Ok(Self::Int(r))
        }
    }

    /// Exponentiation.
    ///
    /// An integer raised to a non-negative integer stays integer.
    pub fn pow(self, other: Number) -> Result<Number, EvaluateError> {
        match (self, other) {
            (Self::Int(a), Self::Int(b)) if b >= 0 => {
                let exp = match u32::try_from(b) {
                    Ok(e) => e,
                    Err(_) => return Err(EvaluateError::Overflow),
                };
                match a.checked_pow(exp) {
                    Some(c) => Ok(Self::Int(c)),
                    None => Err(EvaluateError::Overflow),
                }
            }
            _ => Ok(Self::Float(self.as_f64().powf(other.as_f64()))),
        }
    }

    pub fn neg(self) -> Result<Number, EvaluateError> {
        match self {
            Self::Int(a) => match a.checked_neg() {
                Some(c) => Ok(Self::Int(c)),
                None => Err(EvaluateError::Overflow),
            },
            Self::Float(f) => Ok(Self::Float(-f)),
        }
    }

    pub fn abs(self) -> Result<Number, EvaluateError> {
        match self {
            Self::Int(a) => match a.checked_abs() {
                Some(c) => Ok(Self::Int(c)),
                None => Err(EvaluateError::Overflow),
            },
            Self::Float(f) => Ok(Self::Float(f.abs())),
        }
    }

    pub fn min(self, other: Number) -> Result<Number, EvaluateError> {
        match self.compare(other) {
            Some(Ordering::Greater) => Ok(other),
            Some(_) => Ok(self),
            None => Err(EvaluateError::NotNumeric {
                term: "nan".to_string(),
            }),
        }
    }

    pub fn max(self, other: Number) -> Result<Number, EvaluateError> {
        match self.compare(other) {
            Some(Ordering::Less) => Ok(other),
            Some(_) => Ok(self),
            None => Err(EvaluateError::NotNumeric {
                term: "nan".to_string(),
            }),
        }
    }

    fn int_pair(self, other: Number) -> Result<(i64, i64), EvaluateError> {
        match (self, other) {
            (Self::Int(a), Self::Int(b)) => Ok((a, b)),
            (Self::Float(f), _) | (_, Self::Float(f)) => Err(EvaluateError::IntegerExpected {
                found: Self::Float(f).to_string(),
            }),
        }
    }
}

impl std::fmt::Display for Number {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => {
                // Keep the decimal point so the printed form reads back as a float.
                if x.is_finite() && x.fract() == 0.0 {
                    write!(f, "{x:.1}")
                } else {
                    write!(f, "{x}")
                }
            }
        }
    }
}
