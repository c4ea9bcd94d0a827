//! Human-readable rendering of hyperplanes and systems

use std::fmt;

use num_bigint::BigInt;
use num_traits::{One, Signed, Zero};

use crate::hyperplane::Hyperplane;
use crate::linear_system::LinearSystem;
use crate::scalar::{pow10, round_half_even, Scalar};
use crate::vector::Vector;

/// Decimal places shown for coefficients and constants
pub const DISPLAY_DECIMAL_PLACES: u32 = 3;

/// Render `value` rounded to `places` decimal places, trailing zeros trimmed.
///
/// ```
/// use linsys::format::format_decimal;
/// use linsys::scalar::parse_decimal;
///
/// assert_eq!(format_decimal(&parse_decimal("-2.50049").unwrap(), 3), "-2.5");
/// assert_eq!(format_decimal(&parse_decimal("1/3").unwrap(), 3), "0.333");
/// assert_eq!(format_decimal(&parse_decimal("7").unwrap(), 3), "7");
/// ```
pub fn format_decimal(value: &Scalar, places: u32) -> String {
    let factor = pow10(places as usize);
    let scaled: BigInt =
        (round_half_even(value, places) * Scalar::from_integer(factor.clone())).to_integer();

    let sign = if scaled.is_negative() { "-" } else { "" };
    let magnitude = scaled.abs();
    let int_part = &magnitude / &factor;
    let frac_part = &magnitude % &factor;

    if frac_part.is_zero() {
        return format!("{sign}{int_part}");
    }
    let frac = format!("{:0>width$}", frac_part.to_string(), width = places as usize);
    format!("{sign}{int_part}.{}", frac.trim_end_matches('0'))
}

fn write_coefficient(rounded: &Scalar, is_initial_term: bool) -> String {
    let mut output = String::new();
    if rounded.is_negative() {
        output.push('-');
    }
    if rounded.is_positive() && !is_initial_term {
        output.push('+');
    }
    if !is_initial_term {
        output.push(' ');
    }
    if rounded.abs() != Scalar::one() {
        output.push_str(&format_decimal(&rounded.abs(), DISPLAY_DECIMAL_PLACES));
    }
    output
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let coordinates: Vec<String> = self
            .iter()
            .map(|x| format_decimal(x, DISPLAY_DECIMAL_PLACES))
            .collect();
        write!(f, "Vector: ({})", coordinates.join(", "))
    }
}

impl fmt::Display for Hyperplane {
    /// `x_1 - 2.5x_2 + x_3 = 4`; degenerate rows render as `0 = c`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let terms: Vec<String> = self
            .normal_vector()
            .iter()
            .enumerate()
            .map(|(i, c)| (i, round_half_even(c, DISPLAY_DECIMAL_PLACES)))
            .filter(|(_, rounded)| !rounded.is_zero())
            .enumerate()
            .map(|(term, (i, rounded))| {
                format!("{}x_{}", write_coefficient(&rounded, term == 0), i + 1)
            })
            .collect();

        if terms.is_empty() {
            write!(f, "0")?;
        } else {
            write!(f, "{}", terms.join(" "))?;
        }
        write!(
            f,
            " = {}",
            format_decimal(self.constant_term(), DISPLAY_DECIMAL_PLACES)
        )
    }
}

impl fmt::Display for LinearSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Linear System:")?;
        for (i, plane) in self.planes().iter().enumerate() {
            write!(f, "\nEquation {}: {}", i + 1, plane)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_hyperplane() {
        let p = Hyperplane::plane("1", "1", "1", "1").unwrap();
        assert_eq!(p.to_string(), "x_1 + x_2 + x_3 = 1");

        let q = Hyperplane::plane("-2", "0", "3.5", "-1").unwrap();
        assert_eq!(q.to_string(), "-2x_1 + 3.5x_3 = -1");

        let r = Hyperplane::line("0", "-1", "0.1234").unwrap();
        assert_eq!(r.to_string(), "-x_2 = 0.123");

        let tiny = Hyperplane::line("0.0001", "2", "3").unwrap();
        assert_eq!(tiny.to_string(), "2x_2 = 3");
    }

    #[test]
    fn test_format_degenerate() {
        assert_eq!(Hyperplane::constant_only(3, "1").unwrap().to_string(), "0 = 1");
        assert_eq!(Hyperplane::zero(2).unwrap().to_string(), "0 = 0");
    }

    #[test]
    fn test_format_system() {
        let s = LinearSystem::new(vec![
            Hyperplane::plane("1", "1", "1", "1").unwrap(),
            Hyperplane::plane("0", "1", "1", "2").unwrap(),
        ])
        .unwrap();
        assert_eq!(
            s.to_string(),
            "Linear System:\nEquation 1: x_1 + x_2 + x_3 = 1\nEquation 2: x_2 + x_3 = 2"
        );
    }

    #[test]
    fn test_format_decimal_rounding() {
        let half_up = crate::scalar::parse_decimal("0.0015").unwrap();
        assert_eq!(format_decimal(&half_up, 3), "0.002");
        let negative = crate::scalar::parse_decimal("-0.0004").unwrap();
        assert_eq!(format_decimal(&negative, 3), "0");
    }
}
