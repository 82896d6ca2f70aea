// Copyright notice and licensing information.
// These lines indicate the copyright of the software and its licensing terms.
// SPDX-License-Identifier: Apache-2.0 OR MIT indicates dual licensing under Apache 2.0 or MIT licenses.
// Copyright © 2024 Serde YML, Seamless YAML Serialization for Rust. All rights reserved.

//! Implicit-tag resolution: maps a plain scalar's textual content to one of
//! `null | bool | int | float | timestamp | str`, first match wins.
//!
//! Grounded in the equivalent classification performed while decoding a
//! scalar event (see the `parse_null`/`parse_bool`/`parse_unsigned_int`/
//! `parse_f64`/`digits_but_not_number` family in the teacher's deserializer);
//! this module runs the same lexeme checks in the emission direction.

use crate::node::Tag;
use regex::Regex;
use std::sync::OnceLock;

/// Whether the resolver accepts the YAML 1.1 `yes/no/on/off` boolean
/// extension in addition to the YAML 1.2 core schema spellings.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum ResolverMode {
    /// YAML 1.2 core schema only.
    #[default]
    Core,
    /// YAML 1.2 core schema, plus the YAML 1.1 boolean extension.
    Yaml11,
}

fn int_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?x)^
            [+-]?(
                0o[0-7]+
                | 0x[0-9A-Fa-f]+
                | 0b[01]+
                | [0-9]+
            )$",
        )
        .expect("static regex is valid")
    })
}

fn float_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?xi)^
            [+-]?(
                (\. inf)
                | ( nan )
                | (
                    ( [0-9]+ \. [0-9]* | \. [0-9]+ | [0-9]+ )
                    ( e [+-]? [0-9]+ )?
                )
            )$",
        )
        .expect("static regex is valid")
    })
}

fn timestamp_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?x)^
            [0-9]{4} - [0-9]{1,2} - [0-9]{1,2}
            (
                ( [Tt] | [ \t]+ )
                [0-9]{1,2} : [0-9]{2} : [0-9]{2}
                ( \. [0-9]* )?
                ( [ \t]* ( Z | [+-] [0-9]{1,2} ( : [0-9]{2} )? ) )?
            )?
            $",
        )
        .expect("static regex is valid")
    })
}

/// Resolves `scalar`'s implicit tag under `mode`, first match wins:
/// `null`, `bool`, `int`, `float`, `timestamp`, else `str`.
pub fn resolve(scalar: &str, mode: ResolverMode) -> Tag {
    if is_null(scalar) {
        return Tag::Null;
    }
    if is_bool(scalar, mode) {
        return Tag::Bool;
    }
    if !digits_but_not_number(scalar) && int_regex().is_match(scalar) {
        return Tag::Int;
    }
    if !digits_but_not_number(scalar) && float_regex().is_match(scalar) {
        return Tag::Float;
    }
    if timestamp_regex().is_match(scalar) {
        return Tag::Timestamp;
    }
    Tag::Str
}

fn is_null(scalar: &str) -> bool {
    matches!(scalar, "" | "~" | "null" | "Null" | "NULL")
}

fn is_bool(scalar: &str, mode: ResolverMode) -> bool {
    if matches!(
        scalar,
        "true" | "True" | "TRUE" | "false" | "False" | "FALSE"
    ) {
        return true;
    }
    if mode == ResolverMode::Yaml11 {
        return matches!(
            scalar.to_ascii_lowercase().as_str(),
            "yes" | "no" | "on" | "off"
        );
    }
    false
}

/// Leading zero(s) followed by further digits is a `str` under the YAML 1.2
/// spec (https://yaml.org/spec/1.2/spec.html#id2761292), not an `int`/`float`.
fn digits_but_not_number(scalar: &str) -> bool {
    let scalar = scalar.strip_prefix(['-', '+']).unwrap_or(scalar);
    scalar.len() > 1
        && scalar.starts_with('0')
        && scalar.as_bytes()[1].is_ascii_digit()
}

/// True if `scalar` would be misread as a non-`str` type by some YAML
/// parser on round-trip and so must be quoted when representing a string.
/// Mirrors the teacher's `ambiguous_string` (the "Norway problem" guard).
pub fn ambiguous_string(scalar: &str) -> bool {
    if scalar.is_empty() {
        return true;
    }
    !matches!(resolve(scalar, ResolverMode::Yaml11), Tag::Str)
        || matches!(scalar.to_ascii_lowercase().as_str(), "nan" | "nil" | "y" | "n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_core_primitives() {
        assert_eq!(resolve("", ResolverMode::Core), Tag::Null);
        assert_eq!(resolve("~", ResolverMode::Core), Tag::Null);
        assert_eq!(resolve("true", ResolverMode::Core), Tag::Bool);
        assert_eq!(resolve("False", ResolverMode::Core), Tag::Bool);
        assert_eq!(resolve("42", ResolverMode::Core), Tag::Int);
        assert_eq!(resolve("-0x1F", ResolverMode::Core), Tag::Int);
        assert_eq!(resolve("0b101", ResolverMode::Core), Tag::Int);
        assert_eq!(resolve("3.14", ResolverMode::Core), Tag::Float);
        assert_eq!(resolve(".inf", ResolverMode::Core), Tag::Float);
        assert_eq!(resolve("-.inf", ResolverMode::Core), Tag::Float);
        assert_eq!(resolve(".NaN", ResolverMode::Core), Tag::Float);
        assert_eq!(resolve("2001-01-01", ResolverMode::Core), Tag::Timestamp);
        assert_eq!(
            resolve("2001-01-01T00:00:00Z", ResolverMode::Core),
            Tag::Timestamp
        );
        assert_eq!(resolve("hello", ResolverMode::Core), Tag::Str);
    }

    #[test]
    fn leading_zero_digits_are_strings() {
        assert_eq!(resolve("0123", ResolverMode::Core), Tag::Str);
        assert_eq!(resolve("-0123", ResolverMode::Core), Tag::Str);
    }

    #[test]
    fn yaml11_mode_accepts_extended_booleans() {
        assert_eq!(resolve("yes", ResolverMode::Core), Tag::Str);
        assert_eq!(resolve("yes", ResolverMode::Yaml11), Tag::Bool);
        assert_eq!(resolve("off", ResolverMode::Yaml11), Tag::Bool);
    }

    #[test]
    fn ambiguous_strings_are_flagged() {
        assert!(ambiguous_string("true"));
        assert!(ambiguous_string("null"));
        assert!(ambiguous_string("42"));
        assert!(ambiguous_string(""));
        assert!(ambiguous_string("nan"));
        assert!(!ambiguous_string("hello world"));
    }
}
