//! Exact scalar type and the conversion boundary into it.
//!
//! Every coefficient, constant term and multiplier in this crate is a
//! [`Scalar`] (an arbitrary-precision rational). Values coming from outside
//! pass through [`IntoScalar`] exactly once, so no other numeric
//! representation flows through vectors, hyperplanes or systems.

use num_bigint::BigInt;
use num_integer::{Integer, Roots};
use num_rational::BigRational;
use num_traits::{One, Signed, ToPrimitive, Zero};

use crate::error::{LinSysError, Result};

/// Exact scalar used for all coordinates and constants
pub type Scalar = BigRational;

/// Magnitudes below this are treated as zero
pub const NEAR_ZERO_TOLERANCE: f64 = 1e-10;

/// Decimal places kept by [`sqrt`]
pub const DECIMAL_PLACES: u32 = 30;

/// Decimal places the cosine is rounded to before taking an angle
pub const ANGLE_ROUNDING_PLACES: u32 = 3;

/// Largest decimal exponent accepted by [`parse_decimal`]
const MAX_EXPONENT: i64 = 4096;

/// Conversion into the exact [`Scalar`] type.
///
/// Implemented for decimal literal strings, integers, big integers, rationals
/// and `f64` (via its shortest round-trip decimal representation).
pub trait IntoScalar {
    /// Convert into an exact scalar
    fn into_scalar(self) -> Result<Scalar>;
}

/// Convert any supported value into a [`Scalar`]
pub fn to_scalar<S: IntoScalar>(value: S) -> Result<Scalar> {
    value.into_scalar()
}

impl IntoScalar for Scalar {
    fn into_scalar(self) -> Result<Scalar> {
        Ok(self)
    }
}

impl IntoScalar for &Scalar {
    fn into_scalar(self) -> Result<Scalar> {
        Ok(self.clone())
    }
}

impl IntoScalar for BigInt {
    fn into_scalar(self) -> Result<Scalar> {
        Ok(Scalar::from_integer(self))
    }
}

impl IntoScalar for &str {
    fn into_scalar(self) -> Result<Scalar> {
        parse_decimal(self)
    }
}

impl IntoScalar for String {
    fn into_scalar(self) -> Result<Scalar> {
        parse_decimal(&self)
    }
}

impl IntoScalar for &String {
    fn into_scalar(self) -> Result<Scalar> {
        parse_decimal(self)
    }
}

impl IntoScalar for f64 {
    fn into_scalar(self) -> Result<Scalar> {
        from_f64(self)
    }
}

macro_rules! impl_into_scalar_for_int {
    ($($t:ty),*) => {
        $(
            impl IntoScalar for $t {
                #[inline]
                fn into_scalar(self) -> Result<Scalar> {
                    Ok(Scalar::from_integer(BigInt::from(self)))
                }
            }
        )*
    };
}

impl_into_scalar_for_int!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

/// Parse a decimal literal such as `"4.046"`, `"-2"`, `"+1.5e-3"` or `"1/3"`.
pub fn parse_decimal(literal: &str) -> Result<Scalar> {
    let invalid = || LinSysError::InvalidScalar {
        literal: literal.to_string(),
    };
    let text = literal.trim();

    if let Some((numer, denom)) = text.split_once('/') {
        if denom.contains('/') {
            return Err(invalid());
        }
        let numer = parse_decimal(numer).map_err(|_| invalid())?;
        let denom = parse_decimal(denom).map_err(|_| invalid())?;
        if denom.is_zero() {
            return Err(invalid());
        }
        return Ok(numer / denom);
    }

    let (mantissa, exponent) = match text.find(|c: char| c == 'e' || c == 'E') {
        Some(pos) => {
            let exponent: i64 = text[pos + 1..].parse().map_err(|_| invalid())?;
            (&text[..pos], exponent)
        }
        None => (text, 0),
    };
    if exponent.abs() > MAX_EXPONENT {
        return Err(invalid());
    }

    let (negative, digits) = match mantissa.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, mantissa.strip_prefix('+').unwrap_or(mantissa)),
    };
    let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits, ""));
    let all_digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());
    if (int_part.is_empty() && frac_part.is_empty()) || !all_digits(int_part) || !all_digits(frac_part)
    {
        return Err(invalid());
    }

    let mut numer: BigInt = format!("{int_part}{frac_part}")
        .parse()
        .map_err(|_| invalid())?;
    if negative {
        numer = -numer;
    }

    let scale = exponent - frac_part.len() as i64;
    let value = if scale >= 0 {
        Scalar::from_integer(numer * pow10(scale as usize))
    } else {
        Scalar::new(numer, pow10((-scale) as usize))
    };
    Ok(value)
}

/// Convert a finite `f64` through its shortest round-trip decimal representation.
pub fn from_f64(value: f64) -> Result<Scalar> {
    if !value.is_finite() {
        return Err(LinSysError::InvalidScalar {
            literal: value.to_string(),
        });
    }
    parse_decimal(&value.to_string())
}

/// Nearest `f64` to an exact scalar
pub fn to_f64(value: &Scalar) -> f64 {
    match (value.numer().to_f64(), value.denom().to_f64()) {
        (Some(numer), Some(denom)) => numer / denom,
        _ => f64::NAN,
    }
}

/// The default near-zero tolerance as an exact scalar
pub fn near_zero_tolerance() -> Scalar {
    Scalar::new(BigInt::one(), pow10(10))
}

/// `|value| < 1e-10`
pub fn is_near_zero(value: &Scalar) -> bool {
    is_near_zero_within(value, &near_zero_tolerance())
}

/// `|value| < tolerance`
pub fn is_near_zero_within(value: &Scalar, tolerance: &Scalar) -> bool {
    value.abs() < *tolerance
}

/// Round to `places` decimal places, ties to even.
pub fn round_half_even(value: &Scalar, places: u32) -> Scalar {
    let factor = Scalar::from_integer(pow10(places as usize));
    let scaled = value * &factor;
    let floor = scaled.floor();
    let frac = &scaled - &floor;
    let half = Scalar::new(BigInt::one(), BigInt::from(2));

    let rounded = if frac > half {
        floor + Scalar::one()
    } else if frac < half {
        floor
    } else if floor.to_integer().is_even() {
        floor
    } else {
        floor + Scalar::one()
    };
    rounded / factor
}

/// Square root truncated to [`DECIMAL_PLACES`] decimal places.
///
/// Perfect squares of rationals come out exact. Non-positive input yields zero.
pub fn sqrt(value: &Scalar) -> Scalar {
    if !value.is_positive() {
        return Scalar::zero();
    }
    let scale = pow10(DECIMAL_PLACES as usize);
    // sqrt(n/d) = sqrt(n*d)/d
    let radicand = value.numer() * value.denom() * &scale * &scale;
    let root = Roots::sqrt(&radicand);
    Scalar::new(root, value.denom() * scale)
}

pub(crate) fn pow10(exponent: usize) -> BigInt {
    num_traits::pow(BigInt::from(10), exponent)
}
