//! Arbitrary-precision decimals for issued values.
//!
//! An issued value keeps 16 significant digits under an exponent between -96
//! and 80, so its plain form runs to nearly a hundred digits. That is well past
//! a 96-bit decimal, so values here are a signed integer mantissa scaled by a
//! power of ten. Parsing accepts plain and scientific notation; display is
//! always plain.

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};
use std::str::FromStr;

use num_bigint::BigInt;
use num_traits::{One, Signed, Zero};
use rust_decimal::Decimal;

use crate::error::{CodecError, CodecResult};

/// Largest exponent magnitude accepted when parsing.
pub const MAX_EXPONENT: i64 = 1_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rounding {
    /// Any discarded digit moves the magnitude up.
    AwayFromZero,
    /// Half or more moves the magnitude up.
    MidpointAwayFromZero,
}

/// `mantissa * 10^exponent`, with trailing zeros kept out of the mantissa.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IouDecimal {
    mantissa: BigInt,
    exponent: i64,
}

fn pow10(places: i64) -> BigInt {
    // Exponents stay within a few multiples of MAX_EXPONENT.
    BigInt::from(10u8).pow(places.unsigned_abs() as u32)
}

impl IouDecimal {
    pub fn zero() -> Self {
        Self {
            mantissa: BigInt::zero(),
            exponent: 0,
        }
    }

    /// Parses `[+-]digits[.digits][(e|E)[+-]digits]`. `field` names the
    /// value in errors.
    pub fn parse(field: &'static str, text: &str) -> CodecResult<Self> {
        let invalid = || CodecError::invalid(field, format!("{text:?} is not a decimal number"));
        let (negative, unsigned) = match text.as_bytes().first() {
            Some(b'-') => (true, &text[1..]),
            Some(b'+') => (false, &text[1..]),
            _ => (false, text),
        };
        let (number, exponent) = match unsigned.find(|c: char| c == 'e' || c == 'E') {
            Some(at) => (&unsigned[..at], Some(&unsigned[at + 1..])),
            None => (unsigned, None),
        };
        let (int, frac) = number.split_once('.').unwrap_or((number, ""));
        let digits_only = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
        if (int.is_empty() && frac.is_empty()) || !digits_only(int) || !digits_only(frac) {
            return Err(invalid());
        }
        let exponent = match exponent {
            None => 0,
            Some(e) => e.parse::<i64>().map_err(|_| invalid())?,
        };
        if !(-MAX_EXPONENT..=MAX_EXPONENT).contains(&exponent) {
            return Err(CodecError::out_of_range(
                field,
                text,
                format!("1e-{MAX_EXPONENT}"),
                format!("1e{MAX_EXPONENT}"),
            ));
        }
        let digits = format!("{int}{frac}");
        let magnitude = BigInt::parse_bytes(digits.as_bytes(), 10).ok_or_else(invalid)?;
        let frac_len = i64::try_from(frac.len()).map_err(|_| invalid())?;
        Ok(Self {
            mantissa: if negative { -magnitude } else { magnitude },
            exponent: exponent - frac_len,
        }
        .normalized())
    }

    fn normalized(mut self) -> Self {
        if self.mantissa.is_zero() {
            self.exponent = 0;
            return self;
        }
        let ten = BigInt::from(10u8);
        while (&self.mantissa % &ten).is_zero() {
            self.mantissa /= &ten;
            self.exponent += 1;
        }
        self
    }

    pub fn is_zero(&self) -> bool {
        self.mantissa.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.mantissa.is_negative()
    }

    pub fn abs(&self) -> Self {
        Self {
            mantissa: self.mantissa.abs(),
            exponent: self.exponent,
        }
    }

    /// Multiplies by `10^places`.
    pub fn shift(self, places: i64) -> Self {
        Self {
            exponent: self.exponent + places,
            ..self
        }
        .normalized()
    }

    /// Number of significant digits.
    pub fn precision(&self) -> u64 {
        if self.is_zero() {
            return 0;
        }
        self.mantissa.magnitude().to_string().len() as u64
    }

    /// Rounds to `places` digits after the decimal point.
    pub fn round_dp(&self, places: u32, mode: Rounding) -> Self {
        self.round_to_exponent(-i64::from(places), mode)
    }

    /// Rounds to `digits` significant digits, possibly left of the point.
    pub fn round_significant(&self, digits: u32, mode: Rounding) -> Self {
        let excess = self.precision().saturating_sub(u64::from(digits));
        self.round_to_exponent(self.exponent + excess as i64, mode)
    }

    fn round_to_exponent(&self, target: i64, mode: Rounding) -> Self {
        if self.exponent >= target {
            return self.clone();
        }
        let step = pow10(target - self.exponent);
        let magnitude = self.mantissa.abs();
        let mut quotient = &magnitude / &step;
        let remainder = magnitude - &quotient * &step;
        let round_up = match mode {
            Rounding::AwayFromZero => !remainder.is_zero(),
            Rounding::MidpointAwayFromZero => &remainder + &remainder >= step,
        };
        if round_up {
            quotient += BigInt::one();
        }
        Self {
            mantissa: if self.is_negative() { -quotient } else { quotient },
            exponent: target,
        }
        .normalized()
    }

    fn aligned(&self, exponent: i64) -> BigInt {
        &self.mantissa * pow10(self.exponent - exponent)
    }
}

impl Default for IouDecimal {
    fn default() -> Self {
        Self::zero()
    }
}

impl From<Decimal> for IouDecimal {
    fn from(value: Decimal) -> Self {
        Self {
            mantissa: BigInt::from(value.mantissa()),
            exponent: -i64::from(value.scale()),
        }
        .normalized()
    }
}

impl From<i64> for IouDecimal {
    fn from(value: i64) -> Self {
        Self {
            mantissa: BigInt::from(value),
            exponent: 0,
        }
        .normalized()
    }
}

impl FromStr for IouDecimal {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse("value", s)
    }
}

impl Add for IouDecimal {
    type Output = IouDecimal;

    fn add(self, rhs: IouDecimal) -> IouDecimal {
        let exponent = self.exponent.min(rhs.exponent);
        Self {
            mantissa: self.aligned(exponent) + rhs.aligned(exponent),
            exponent,
        }
        .normalized()
    }
}

impl Neg for IouDecimal {
    type Output = IouDecimal;

    fn neg(self) -> IouDecimal {
        Self {
            mantissa: -self.mantissa,
            exponent: self.exponent,
        }
    }
}

impl Sub for IouDecimal {
    type Output = IouDecimal;

    fn sub(self, rhs: IouDecimal) -> IouDecimal {
        self + -rhs
    }
}

impl Mul for IouDecimal {
    type Output = IouDecimal;

    fn mul(self, rhs: IouDecimal) -> IouDecimal {
        Self {
            mantissa: self.mantissa * rhs.mantissa,
            exponent: self.exponent + rhs.exponent,
        }
        .normalized()
    }
}

impl fmt::Display for IouDecimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.is_negative() { "-" } else { "" };
        let digits = self.mantissa.magnitude().to_string();
        if self.exponent >= 0 {
            return write!(f, "{sign}{digits}{}", "0".repeat(self.exponent as usize));
        }
        let point = self.exponent.unsigned_abs() as usize;
        if digits.len() > point {
            let (int, frac) = digits.split_at(digits.len() - point);
            write!(f, "{sign}{int}.{frac}")
        } else {
            write!(f, "{sign}0.{}{digits}", "0".repeat(point - digits.len()))
        }
    }
}
