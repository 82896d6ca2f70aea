// Copyright notice and licensing information.
// These lines indicate the copyright of the software and its licensing terms.
// SPDX-License-Identifier: Apache-2.0 OR MIT indicates dual licensing under Apache 2.0 or MIT licenses.
// Copyright © 2024 Serde YML, Seamless YAML Serialization for Rust. All rights reserved.

use indoc::indoc;
use std::collections::HashMap;
use yaml_emit::{
    node::{Node, NodeRef},
    options::{FloatFormatStrategy, RedundancyAliasingStrategy},
    timestamp::{self, Precision, Timestamp},
    to_string_from_node, Options,
};

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Scenario 1: key sort, spec §8.
#[test]
fn key_sort_orders_mapping_entries_lexicographically() {
    init();
    let mut map = HashMap::new();
    map.insert("b".to_owned(), 2i32);
    map.insert("a".to_owned(), 1i32);
    map.insert("c".to_owned(), 3i32);
    let options = Options {
        sort_keys: true,
        ..Options::default()
    };
    let yaml = yaml_emit::dump(&map, &options).unwrap();
    assert_eq!(
        yaml,
        indoc! {"
            a: 1
            b: 2
            c: 3
        "}
    );
}

/// Scenario 2: string masquerade, spec §8.
#[test]
fn string_masquerade_quotes_ambiguous_host_strings() {
    init();
    let yaml = yaml_emit::dump(&"true".to_owned(), &Options::default()).unwrap();
    assert_eq!(yaml, "'true'\n");
}

/// Scenario 3: float decimal strategy specials and a plain value, spec §8.
#[test]
fn float_decimal_strategy_specials_and_plain_value() {
    init();
    let options = Options {
        floating_point_number_format_strategy: FloatFormatStrategy::Decimal,
        ..Options::default()
    };
    assert_eq!(yaml_emit::dump(&(1.0f64 / 0.0), &options).unwrap(), ".inf\n");
    assert_eq!(yaml_emit::dump(&(-1.0f64 / 0.0), &options).unwrap(), "-.inf\n");
    assert_eq!(yaml_emit::dump(&(0.0f64 / 0.0), &options).unwrap(), ".nan\n");
    assert_eq!(yaml_emit::dump(&1.5f64, &options).unwrap(), "1.5\n");
}

/// Scenario 4: float scientific strategy, spec §8.
#[test]
fn float_scientific_strategy_uses_exponent_and_never_emits_plus_minus_digraph() {
    init();
    let options = Options {
        floating_point_number_format_strategy: FloatFormatStrategy::Scientific,
        ..Options::default()
    };
    let small = yaml_emit::dump(&0.0001f64, &options).unwrap();
    assert!(small.contains('e'), "{small}");
    assert!(!small.contains("+-"), "{small}");

    for value in [1.0f64, -123456.0, 1e-300, 1e300] {
        let formatted = yaml_emit::dump(&value, &options).unwrap();
        assert!(!formatted.contains("+-"), "{formatted}");
    }

    // Ordinary-magnitude values must round-trip bit-for-bit under the
    // default strategy, not just avoid the `+-` digraph.
    for value in [234.60120683551673f64, 6045.358701505793f64] {
        let formatted = yaml_emit::dump(&value, &options).unwrap();
        let parsed: f64 = formatted.trim().parse().unwrap();
        assert_eq!(parsed.to_bits(), value.to_bits(), "{formatted}");
    }
}

/// Scenario 5: timestamp formatting, spec §8.
#[test]
fn timestamp_formats_whole_and_fractional_seconds() {
    init();
    let whole = timestamp::format(
        Timestamp(time::macros::datetime!(2001-01-01 00:00:00 UTC)),
        Precision::Milliseconds,
    );
    assert_eq!(whole, "2001-01-01T00:00:00Z");

    let fractional = timestamp::format(
        Timestamp(time::macros::datetime!(2001-01-01 00:00:00.120 UTC)),
        Precision::Milliseconds,
    );
    assert_eq!(fractional, "2001-01-01T00:00:00.12Z");
}

/// Scenario 6: value-strategy aliasing, spec §8.
#[test]
fn value_strategy_aliasing_emits_one_anchor_and_n_minus_one_aliases() {
    init();
    let shared = Node::mapping(vec![(Node::scalar("a", None, None, None), Node::scalar("1", None, None, None))], None, None, None).unwrap();
    let tree = Node::sequence(vec![shared.clone(), shared], None, None, None);
    let options = Options {
        redundancy_aliasing_strategy: RedundancyAliasingStrategy::Value,
        ..Options::default()
    };
    let yaml = to_string_from_node(&tree, &options).unwrap();
    assert_eq!(yaml.matches('&').count(), 1, "{yaml}");
    assert_eq!(yaml.matches('*').count(), 1, "{yaml}");
}

/// Boundary case: empty sequence and mapping, spec §8.
#[test]
fn empty_collections_emit_as_empty_flow_forms() {
    init();
    let empty_seq: NodeRef = Node::sequence(vec![], None, None, None);
    let yaml = to_string_from_node(&empty_seq, &Options::default()).unwrap();
    assert_eq!(yaml.trim(), "[]");

    let empty_map: NodeRef = Node::mapping(vec![], None, None, None).unwrap();
    let yaml = to_string_from_node(&empty_map, &Options::default()).unwrap();
    assert_eq!(yaml.trim(), "{}");
}

/// Boundary case: null/true/false host strings are never emitted bare, spec §8.
#[test]
fn reserved_word_strings_are_never_emitted_bare() {
    init();
    for word in ["null", "true", "false"] {
        let yaml = yaml_emit::dump(&word.to_owned(), &Options::default()).unwrap();
        assert_eq!(yaml, format!("'{word}'\n"));
    }
}

/// Boundary case: width = -1 disables line wrapping, spec §8.
#[test]
fn negative_width_disables_line_wrapping() {
    init();
    let long = "a".repeat(500);
    let options = Options {
        width: -1,
        ..Options::default()
    };
    let yaml = yaml_emit::dump(&long, &options).unwrap();
    assert_eq!(yaml.lines().count(), 1);
}
