// Copyright notice and licensing information.
// These lines indicate the copyright of the software and its licensing terms.
// SPDX-License-Identifier: Apache-2.0 OR MIT indicates dual licensing under Apache 2.0 or MIT licenses.
// Copyright © 2024 Serde YML, Seamless YAML Serialization for Rust. All rights reserved.

//! ISO-8601 timestamp formatting (spec §4.3.2), backed by `time::OffsetDateTime`.

use time::OffsetDateTime;

/// A timestamp representable value, newtyped over `time::OffsetDateTime` so
/// the representer can dispatch on it distinctly from a plain string.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Timestamp(pub OffsetDateTime);

impl From<OffsetDateTime> for Timestamp {
    fn from(dt: OffsetDateTime) -> Self {
        Timestamp(dt)
    }
}

/// Fractional-second digit count, 3 (milliseconds, the default) or 9 (nanoseconds).
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Precision {
    /// Millisecond precision, trailing zeros trimmed.
    Milliseconds,
    /// Nanosecond precision, trailing zeros trimmed.
    Nanoseconds,
}

impl Precision {
    fn digits(self) -> u32 {
        match self {
            Precision::Milliseconds => 3,
            Precision::Nanoseconds => 9,
        }
    }
}

/// Formats `timestamp` as `YYYY-MM-DDTHH:MM:SS[.FFF...]Z`.
///
/// The fractional part is rounded to `precision` digits, renormalized into
/// the whole seconds if rounding carries (e.g. `.9996` at millisecond
/// precision carries to the next second), and trailing zeros are trimmed —
/// the fractional portion is omitted entirely when it rounds to zero.
pub fn format(timestamp: Timestamp, precision: Precision) -> String {
    let dt = timestamp.0.to_offset(time::UtcOffset::UTC);
    let digits = precision.digits();
    let divisor = 10u64.pow(9 - digits);
    let scaled_max = 10u64.pow(digits);

    let nanos = dt.nanosecond() as u64;
    let rounded = (nanos + divisor / 2) / divisor;
    let (carry, fraction) = if rounded >= scaled_max {
        (1i64, 0u64)
    } else {
        (0i64, rounded)
    };

    let dt = if carry != 0 {
        dt + time::Duration::SECOND
    } else {
        dt
    };

    let mut out = format!(
        "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}",
        dt.year(),
        u8::from(dt.month()),
        dt.day(),
        dt.hour(),
        dt.minute(),
        dt.second(),
    );

    if fraction != 0 {
        let digit_str = format!("{fraction:0width$}", width = digits as usize);
        let trimmed = digit_str.trim_end_matches('0');
        out.push('.');
        out.push_str(trimmed);
    }

    out.push('Z');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn whole_second_has_no_fraction() {
        let ts = Timestamp(datetime!(2001-01-01 00:00:00 UTC));
        assert_eq!(format(ts, Precision::Milliseconds), "2001-01-01T00:00:00Z");
    }

    #[test]
    fn fractional_trailing_zeros_trimmed() {
        let ts = Timestamp(datetime!(2001-01-01 00:00:00.120 UTC));
        assert_eq!(
            format(ts, Precision::Milliseconds),
            "2001-01-01T00:00:00.12Z"
        );
    }

    #[test]
    fn rounding_carry_renormalizes_seconds() {
        // 0.9996 rounds to 1.000 at millisecond precision and must carry.
        let ts = Timestamp(datetime!(2001-01-01 00:00:00.9996 UTC));
        assert_eq!(format(ts, Precision::Milliseconds), "2001-01-01T00:00:01Z");
    }

    #[test]
    fn nanosecond_precision_trims_to_the_significant_digits() {
        let ts = Timestamp(datetime!(2001-01-01 00:00:00.000000500 UTC));
        assert_eq!(
            format(ts, Precision::Nanoseconds),
            "2001-01-01T00:00:00.0000005Z"
        );
    }
}
