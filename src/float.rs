// Copyright notice and licensing information.
// These lines indicate the copyright of the software and its licensing terms.
// SPDX-License-Identifier: Apache-2.0 OR MIT indicates dual licensing under Apache 2.0 or MIT licenses.
// Copyright © 2024 Serde YML, Seamless YAML Serialization for Rust. All rights reserved.

//! Deterministic, round-trip-safe float formatting (spec §4.3.1).
//!
//! The `Decimal` strategy reuses `ryu`'s shortest-round-trip formatting, the
//! same crate and call shape the teacher's serializer uses for its one float
//! strategy (`ryu::Buffer::format_finite`). The `Scientific` strategy has no
//! teacher counterpart — it emulates libc's `%.*g` with `DBL_DECIMAL_DIG`
//! precision from scratch, since no portable `%g` is available in Rust.

use crate::options::FloatFormatStrategy;

/// A value that can be classified and formatted as an IEEE-754 float.
pub trait Float: Copy {
    /// Number of significant decimal digits needed to round-trip this width
    /// (`DBL_DECIMAL_DIG`: 17 for `f64`, 9 for `f32`).
    const DECIMAL_DIG: usize;

    /// True if the value is positive or negative infinity.
    fn is_infinite(self) -> bool;
    /// True if the value is positive infinity specifically.
    fn is_sign_positive(self) -> bool;
    /// True if the value is NaN.
    fn is_nan(self) -> bool;
    /// Shortest round-trip decimal formatting of a finite value.
    fn format_ryu(self) -> String;
    /// Exact widening to `f64`, used by the formatters below.
    fn as_f64(self) -> f64;
}

impl Float for f64 {
    const DECIMAL_DIG: usize = 17;

    fn is_infinite(self) -> bool {
        f64::is_infinite(self)
    }
    fn is_sign_positive(self) -> bool {
        f64::is_sign_positive(self)
    }
    fn is_nan(self) -> bool {
        f64::is_nan(self)
    }
    fn format_ryu(self) -> String {
        ryu::Buffer::new().format_finite(self).to_owned()
    }
    fn as_f64(self) -> f64 {
        self
    }
}

impl Float for f32 {
    const DECIMAL_DIG: usize = 9;

    fn is_infinite(self) -> bool {
        f32::is_infinite(self)
    }
    fn is_sign_positive(self) -> bool {
        f32::is_sign_positive(self)
    }
    fn is_nan(self) -> bool {
        f32::is_nan(self)
    }
    fn format_ryu(self) -> String {
        ryu::Buffer::new().format_finite(self).to_owned()
    }
    fn as_f64(self) -> f64 {
        self as f64
    }
}

/// Formats `value` per `strategy`, producing the scalar text the
/// representer emits for a host float.
pub fn format<T: Float>(value: T, strategy: FloatFormatStrategy) -> String {
    if value.is_nan() {
        return ".nan".to_owned();
    }
    if value.is_infinite() {
        return if value.is_sign_positive() { ".inf" } else { "-.inf" }.to_owned();
    }
    match strategy {
        FloatFormatStrategy::Decimal => value.format_ryu(),
        FloatFormatStrategy::Scientific => format_scientific(value.as_f64(), T::DECIMAL_DIG),
    }
}

/// `%.*g` with `precision` significant digits, always rendered in forced
/// exponential notation: when `format_g` itself already chose the
/// exponential branch the result is kept verbatim; otherwise its
/// already-exact fixed-point digit string is repositioned into `D.DDDDe±EE`
/// form by moving the decimal point, never by re-deriving the mantissa via
/// floating-point division (which would reintroduce rounding error `format_g`
/// already avoided). Either path is passed through the `+-` fixup before
/// returning.
fn format_scientific(value: f64, precision: usize) -> String {
    let g = format_g(value, precision);
    let g = if g.contains('e') { g } else { reposition_decimal_point(&g) };
    // A sign-on-exponent formatter can produce the `e+-NN` digraph for a
    // negative exponent; this must never reach emitted output.
    g.replace("+-", "-")
}

/// Converts an exact fixed-point digit string into `D.DDDDe±EE` form by
/// relocating the decimal point across the existing digits — a lossless
/// textual operation, unlike deriving the mantissa via
/// `value / 10f64.powi(exponent)`.
fn reposition_decimal_point(fixed: &str) -> String {
    let negative = fixed.starts_with('-');
    let unsigned = fixed.strip_prefix('-').unwrap_or(fixed);
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((i, f)) => (i, f),
        None => (unsigned, ""),
    };
    let digits: String = int_part.chars().chain(frac_part.chars()).collect();
    let Some(first_nonzero) = digits.find(|c: char| c != '0') else {
        return if negative { "-0e+00".to_owned() } else { "0e+00".to_owned() };
    };
    let exponent = if first_nonzero < int_part.len() {
        (int_part.len() - first_nonzero - 1) as i32
    } else {
        -((first_nonzero - int_part.len() + 1) as i32)
    };
    let mantissa_digits = digits[first_nonzero..].trim_end_matches('0');
    let mantissa = if mantissa_digits.len() <= 1 {
        mantissa_digits.to_owned()
    } else {
        format!("{}.{}", &mantissa_digits[..1], &mantissa_digits[1..])
    };
    let sign = if negative { "-" } else { "" };
    format!("{sign}{mantissa}e{exponent:+03}")
}

/// `%.*g` emulation: `precision` significant digits, trailing fractional
/// zeros trimmed, switching to exponential form outside `%g`'s usual
/// positional range (exponent < -4 or >= precision). Both branches are
/// derived from the same exact fixed-point expansion of `value` — the
/// exponential branch repositions its decimal point rather than dividing
/// by a power of ten, so it never introduces rounding error beyond what
/// `format!("{value:.N}")` itself (exact, for any `N`) already carries.
fn format_g(value: f64, precision: usize) -> String {
    if value == 0.0 {
        return if value.is_sign_negative() { "-0" } else { "0" }.to_owned();
    }
    let exponent = value.abs().log10().floor() as i32;
    let decimals = (precision as i32 - 1 - exponent).max(0) as usize;
    let fixed = trim_trailing_fraction(&format!("{value:.decimals$}"));
    if exponent < -4 || exponent >= precision as i32 {
        reposition_decimal_point(&fixed)
    } else {
        fixed
    }
}

fn trim_trailing_fraction(s: &str) -> String {
    if !s.contains('.') {
        return s.to_owned();
    }
    let trimmed = s.trim_end_matches('0');
    let trimmed = trimmed.trim_end_matches('.');
    if trimmed.is_empty() || trimmed == "-" {
        "0".to_owned()
    } else {
        trimmed.to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decimal_strategy_specials() {
        assert_eq!(format(f64::INFINITY, FloatFormatStrategy::Decimal), ".inf");
        assert_eq!(
            format(f64::NEG_INFINITY, FloatFormatStrategy::Decimal),
            "-.inf"
        );
        assert_eq!(format(f64::NAN, FloatFormatStrategy::Decimal), ".nan");
        assert_eq!(format(1.5f64, FloatFormatStrategy::Decimal), "1.5");
    }

    #[test]
    fn scientific_strategy_specials() {
        assert_eq!(
            format(f64::INFINITY, FloatFormatStrategy::Scientific),
            ".inf"
        );
        assert_eq!(format(f64::NAN, FloatFormatStrategy::Scientific), ".nan");
    }

    #[test]
    fn scientific_strategy_never_emits_plus_minus_digraph() {
        for value in [0.0001f64, 1.0, -123456.0, 1e-300, 1e300] {
            let formatted = format(value, FloatFormatStrategy::Scientific);
            assert!(!formatted.contains("+-"), "{formatted}");
        }
    }

    #[test]
    fn scientific_strategy_small_value_contains_exponent() {
        let formatted = format(0.0001f64, FloatFormatStrategy::Scientific);
        assert!(formatted.contains('e'), "{formatted}");
    }

    #[test]
    fn scientific_strategy_round_trips_ordinary_magnitude_values() {
        for value in [234.60120683551673f64, 6045.358701505793f64] {
            let formatted = format(value, FloatFormatStrategy::Scientific);
            let parsed: f64 = formatted.parse().unwrap();
            assert_eq!(parsed.to_bits(), value.to_bits(), "{formatted}");
        }
    }
}
