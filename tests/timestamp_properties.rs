// Copyright notice and licensing information.
// These lines indicate the copyright of the software and its licensing terms.
// SPDX-License-Identifier: Apache-2.0 OR MIT indicates dual licensing under Apache 2.0 or MIT licenses.
// Copyright © 2024 Serde YML, Seamless YAML Serialization for Rust. All rights reserved.

//! Property-based round-trip coverage for timestamp formatting, arbitrary
//! over whole seconds and millisecond fractions rather than the handful of
//! fixed instants in `tests/emission.rs`.

#[macro_use]
extern crate quickcheck;

use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use yaml_emit::timestamp::{self, Precision, Timestamp};

// A 50-year window around 2000-01-01, comfortably inside `time`'s supported
// date range and broad enough to exercise leap years and month boundaries.
const REFERENCE_UNIX_SECONDS: i64 = 946_684_800;
const WINDOW_SECONDS: i64 = 50 * 365 * 24 * 3600;

fn arbitrary_instant(raw_seconds: i64, raw_millis: u16) -> OffsetDateTime {
    let offset = raw_seconds.rem_euclid(WINDOW_SECONDS) - WINDOW_SECONDS / 2;
    let millis = u32::from(raw_millis % 1000);
    OffsetDateTime::from_unix_timestamp(REFERENCE_UNIX_SECONDS + offset)
        .unwrap()
        .replace_nanosecond(millis * 1_000_000)
        .unwrap()
}

quickcheck! {
    fn millisecond_precision_round_trips_exactly(raw_seconds: i64, raw_millis: u16) -> bool {
        let instant = arbitrary_instant(raw_seconds, raw_millis);
        let formatted = timestamp::format(Timestamp(instant), Precision::Milliseconds);
        let parsed = OffsetDateTime::parse(&formatted, &Rfc3339).unwrap();
        parsed == instant
    }

    fn whole_second_instants_round_trip_under_either_precision(raw_seconds: i64) -> bool {
        let offset = raw_seconds.rem_euclid(WINDOW_SECONDS) - WINDOW_SECONDS / 2;
        let instant = OffsetDateTime::from_unix_timestamp(REFERENCE_UNIX_SECONDS + offset).unwrap();
        [Precision::Milliseconds, Precision::Nanoseconds]
            .into_iter()
            .all(|precision| {
                let formatted = timestamp::format(Timestamp(instant), precision);
                OffsetDateTime::parse(&formatted, &Rfc3339).unwrap() == instant
            })
    }
}
