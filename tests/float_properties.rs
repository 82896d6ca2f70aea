// Copyright notice and licensing information.
// These lines indicate the copyright of the software and its licensing terms.
// SPDX-License-Identifier: Apache-2.0 OR MIT indicates dual licensing under Apache 2.0 or MIT licenses.
// Copyright © 2024 Serde YML, Seamless YAML Serialization for Rust. All rights reserved.

//! Property-based round-trip coverage for spec §8's
//! `decode(serialize(x)) == x` invariant, arbitrary-sampled rather than the
//! handful of fixed values in `tests/emission.rs`.

#[macro_use]
extern crate quickcheck;

use quickcheck::TestResult;
use yaml_emit::{float, FloatFormatStrategy};

fn round_trips(value: f64, strategy: FloatFormatStrategy) -> TestResult {
    if value.is_nan() || value.is_infinite() {
        return TestResult::discard();
    }
    let text = float::format(value, strategy);
    match text.parse::<f64>() {
        Ok(parsed) => TestResult::from_bool(parsed.to_bits() == value.to_bits()),
        Err(_) => TestResult::error(format!("unparsable: {text}")),
    }
}

quickcheck! {
    fn decimal_strategy_round_trips_bit_for_bit(value: f64) -> TestResult {
        round_trips(value, FloatFormatStrategy::Decimal)
    }

    fn scientific_strategy_round_trips_bit_for_bit(value: f64) -> TestResult {
        round_trips(value, FloatFormatStrategy::Scientific)
    }
}
