// Copyright notice and licensing information.
// These lines indicate the copyright of the software and its licensing terms.
// SPDX-License-Identifier: Apache-2.0 OR MIT indicates dual licensing under Apache 2.0 or MIT licenses.
// Copyright © 2024 Serde YML, Seamless YAML Serialization for Rust. All rights reserved.

//! Maps host values into [`Node`]s (spec §4.3). Dispatch is a closed set of
//! trait impls rather than an open-world type query, per the design note in
//! spec §9: `ScalarRepresentable` covers values that always produce a single
//! scalar (numbers, strings, timestamps, ...), `NodeRepresentable` is the
//! wider capability collections and optionals use to recurse.

use crate::float;
use crate::modules::error::{new, Error, ErrorImpl};
use crate::node::{Node, NodeRef, ScalarStyle, Tag};
use crate::options::Options;
use crate::resolver::{ambiguous_string, resolve, ResolverMode};
use crate::timestamp::{self, Precision, Timestamp};
use indexmap::IndexMap;
use std::collections::{BTreeMap, HashMap};
use std::fmt::Display;
use std::hash::Hash;

/// A value that always represents as a single scalar node.
pub trait ScalarRepresentable {
    /// Produces the scalar's textual value and declared tag.
    fn represent_scalar(&self, options: &Options) -> (String, Tag, ScalarStyle);
}

/// A value that can produce a [`Node`], scalar or otherwise. Blanket-derived
/// for every [`ScalarRepresentable`] type; implemented directly for
/// collections and `Option`.
pub trait NodeRepresentable {
    /// Converts `self` into a [`Node`].
    fn represent(&self, options: &Options) -> Result<NodeRef, Error>;
}

/// Implements both `ScalarRepresentable` and `NodeRepresentable` for a
/// concrete (non-generic-over-bare-`T`) type in terms of `represent_scalar`.
///
/// `NodeRepresentable` is implemented per concrete type rather than via a
/// blanket `impl<T: ScalarRepresentable> NodeRepresentable for T`: a bare-`T`
/// blanket would conflict with the `Vec<T>`/`Option<T>`/map impls below,
/// since the compiler cannot prove those container types never also
/// implement `ScalarRepresentable`.
macro_rules! node_representable_via_scalar {
    ($ty:ty) => {
        impl NodeRepresentable for $ty {
            fn represent(&self, options: &Options) -> Result<NodeRef, Error> {
                let (value, tag, style) = self.represent_scalar(options);
                Ok(Node::scalar(value, Some(tag), Some(style), None))
            }
        }
    };
}

/// Fails representation for a value matching neither capability.
pub fn failed(what: impl Display) -> Error {
    let what = what.to_string();
    log::warn!("failed to represent {what}");
    new(ErrorImpl::RepresenterFailed(what))
}

impl ScalarRepresentable for () {
    fn represent_scalar(&self, _options: &Options) -> (String, Tag, ScalarStyle) {
        ("null".to_owned(), Tag::Null, ScalarStyle::Plain)
    }
}
node_representable_via_scalar!(());

impl ScalarRepresentable for bool {
    fn represent_scalar(&self, _options: &Options) -> (String, Tag, ScalarStyle) {
        (
            if *self { "true" } else { "false" }.to_owned(),
            Tag::Bool,
            ScalarStyle::Plain,
        )
    }
}
node_representable_via_scalar!(bool);

macro_rules! impl_scalar_for_int {
    ($($ty:ty),* $(,)?) => {
        $(
            impl ScalarRepresentable for $ty {
                fn represent_scalar(&self, _options: &Options) -> (String, Tag, ScalarStyle) {
                    let mut buffer = itoa::Buffer::new();
                    (buffer.format(*self).to_owned(), Tag::Int, ScalarStyle::Plain)
                }
            }
            node_representable_via_scalar!($ty);
        )*
    };
}

impl_scalar_for_int!(i8, i16, i32, i64, i128, u8, u16, u32, u64, u128);

impl ScalarRepresentable for f32 {
    fn represent_scalar(&self, options: &Options) -> (String, Tag, ScalarStyle) {
        (
            float::format(*self, options.floating_point_number_format_strategy),
            Tag::Float,
            ScalarStyle::Plain,
        )
    }
}
node_representable_via_scalar!(f32);

impl ScalarRepresentable for f64 {
    fn represent_scalar(&self, options: &Options) -> (String, Tag, ScalarStyle) {
        (
            float::format(*self, options.floating_point_number_format_strategy),
            Tag::Float,
            ScalarStyle::Plain,
        )
    }
}
node_representable_via_scalar!(f64);

/// Masquerade-or-not: a plain string is emitted as-is unless its content
/// would be misread as a non-`str` type on decode, in which case it is
/// single-quoted with an explicit `!!str` tag so round-tripping stays exact.
fn represent_str_scalar(s: &str) -> (String, Tag, ScalarStyle) {
    if ambiguous_string(s) {
        (s.to_owned(), Tag::Str, ScalarStyle::SingleQuoted)
    } else {
        (s.to_owned(), Tag::Str, ScalarStyle::Plain)
    }
}

impl ScalarRepresentable for str {
    fn represent_scalar(&self, _options: &Options) -> (String, Tag, ScalarStyle) {
        represent_str_scalar(self)
    }
}
node_representable_via_scalar!(str);

impl ScalarRepresentable for String {
    fn represent_scalar(&self, _options: &Options) -> (String, Tag, ScalarStyle) {
        represent_str_scalar(self)
    }
}
node_representable_via_scalar!(String);

/// A binary blob, represented as unwrapped base64 (RFC 4648).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binary(pub Vec<u8>);

impl ScalarRepresentable for Binary {
    fn represent_scalar(&self, _options: &Options) -> (String, Tag, ScalarStyle) {
        use base64::Engine as _;
        (
            base64::engine::general_purpose::STANDARD.encode(&self.0),
            Tag::Binary,
            ScalarStyle::Plain,
        )
    }
}
node_representable_via_scalar!(Binary);

impl ScalarRepresentable for Timestamp {
    fn represent_scalar(&self, _options: &Options) -> (String, Tag, ScalarStyle) {
        (
            timestamp::format(*self, Precision::Milliseconds),
            Tag::Timestamp,
            ScalarStyle::Plain,
        )
    }
}
node_representable_via_scalar!(Timestamp);

/// A decimal literal, passed through textually. The resolved tag (per the
/// usual implicit-tag rule) decides whether it prints untagged as an
/// `int`/`float`, or masquerades as an explicit `!!str` when its text
/// wouldn't otherwise round-trip through the core schema. No binary-float
/// range validation is performed; this is a textual passthrough by design.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decimal(pub String);

impl ScalarRepresentable for Decimal {
    fn represent_scalar(&self, _options: &Options) -> (String, Tag, ScalarStyle) {
        match resolve(&self.0, ResolverMode::Core) {
            Tag::Str => (self.0.clone(), Tag::Str, ScalarStyle::SingleQuoted),
            _ => (self.0.clone(), Tag::Str, ScalarStyle::Plain),
        }
    }
}
node_representable_via_scalar!(Decimal);

impl ScalarRepresentable for uuid::Uuid {
    fn represent_scalar(&self, _options: &Options) -> (String, Tag, ScalarStyle) {
        represent_str_scalar(&self.to_string())
    }
}
node_representable_via_scalar!(uuid::Uuid);

/// A bounded fallback for any other `Display`-able textual type (e.g. a
/// caller's own URL newtype), per the "one clearly bounded fallback" design
/// note — not an open-world type query, an explicit opt-in wrapper.
#[derive(Debug, Clone)]
pub struct Displayable<T: Display>(pub T);

impl<T: Display> ScalarRepresentable for Displayable<T> {
    fn represent_scalar(&self, _options: &Options) -> (String, Tag, ScalarStyle) {
        represent_str_scalar(&self.0.to_string())
    }
}

impl<T: Display> NodeRepresentable for Displayable<T> {
    fn represent(&self, options: &Options) -> Result<NodeRef, Error> {
        let (value, tag, style) = self.represent_scalar(options);
        Ok(Node::scalar(value, Some(tag), Some(style), None))
    }
}

impl<T: NodeRepresentable> NodeRepresentable for Option<T> {
    fn represent(&self, options: &Options) -> Result<NodeRef, Error> {
        match self {
            Some(value) => value.represent(options),
            None => Ok(Node::scalar("null", Some(Tag::Null), Some(ScalarStyle::Plain), None)),
        }
    }
}

impl<T: NodeRepresentable> NodeRepresentable for [T] {
    fn represent(&self, options: &Options) -> Result<NodeRef, Error> {
        let items = self
            .iter()
            .map(|item| item.represent(options))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Node::sequence(items, Some(Tag::Seq), None, None))
    }
}

impl<T: NodeRepresentable> NodeRepresentable for Vec<T> {
    fn represent(&self, options: &Options) -> Result<NodeRef, Error> {
        self.as_slice().represent(options)
    }
}

impl<K: NodeRepresentable, V: NodeRepresentable> NodeRepresentable for IndexMap<K, V> {
    fn represent(&self, options: &Options) -> Result<NodeRef, Error> {
        let pairs = self
            .iter()
            .map(|(k, v)| Ok((k.represent(options)?, v.represent(options)?)))
            .collect::<Result<Vec<_>, Error>>()?;
        Node::mapping(pairs, Some(Tag::Map), None, None)
    }
}

impl<K: NodeRepresentable + Ord, V: NodeRepresentable> NodeRepresentable for BTreeMap<K, V> {
    fn represent(&self, options: &Options) -> Result<NodeRef, Error> {
        let pairs = self
            .iter()
            .map(|(k, v)| Ok((k.represent(options)?, v.represent(options)?)))
            .collect::<Result<Vec<_>, Error>>()?;
        Node::mapping(pairs, Some(Tag::Map), None, None)
    }
}

/// `HashMap`'s iteration order is not deterministic, so its entries are
/// resorted by node order (spec §4.1's mapping-key ordering) at
/// representation time rather than left to iteration order.
impl<K: NodeRepresentable + Eq + Hash, V: NodeRepresentable> NodeRepresentable for HashMap<K, V> {
    fn represent(&self, options: &Options) -> Result<NodeRef, Error> {
        let mut pairs = self
            .iter()
            .map(|(k, v)| Ok((k.represent(options)?, v.represent(options)?)))
            .collect::<Result<Vec<_>, Error>>()?;
        pairs.sort_by(|(a, _), (b, _)| a.cmp(b));
        Node::mapping(pairs, Some(Tag::Map), None, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts() -> Options {
        Options::default()
    }

    #[test]
    fn unit_represents_as_null() {
        let node = ().represent(&opts()).unwrap();
        match &*node {
            Node::Scalar(s) => assert_eq!(s.value, "null"),
            _ => panic!("expected scalar"),
        }
    }

    #[test]
    fn ambiguous_string_is_quoted() {
        let node = "true".to_owned().represent(&opts()).unwrap();
        match &*node {
            Node::Scalar(s) => {
                assert_eq!(s.value, "true");
                assert_eq!(s.style, ScalarStyle::SingleQuoted);
                assert_eq!(s.tag, Tag::Str);
            }
            _ => panic!("expected scalar"),
        }
    }

    #[test]
    fn plain_string_is_unquoted() {
        let node = "hello world".to_owned().represent(&opts()).unwrap();
        match &*node {
            Node::Scalar(s) => assert_eq!(s.style, ScalarStyle::Plain),
            _ => panic!("expected scalar"),
        }
    }

    #[test]
    fn vec_of_int_represents_as_sequence() {
        let node = vec![1i32, 2, 3].represent(&opts()).unwrap();
        match &*node {
            Node::Sequence(s) => assert_eq!(s.items.len(), 3),
            _ => panic!("expected sequence"),
        }
    }

    #[test]
    fn hashmap_representation_is_sorted_deterministically() {
        let mut map = HashMap::new();
        map.insert("b".to_owned(), 2i32);
        map.insert("a".to_owned(), 1i32);
        let first = map.represent(&opts()).unwrap();
        let second = map.represent(&opts()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn binary_blob_base64_round_trips_length() {
        let node = Binary(vec![0, 1, 2, 255]).represent(&opts()).unwrap();
        match &*node {
            Node::Scalar(s) => {
                use base64::Engine as _;
                let decoded = base64::engine::general_purpose::STANDARD
                    .decode(&s.value)
                    .unwrap();
                assert_eq!(decoded, vec![0, 1, 2, 255]);
            }
            _ => panic!("expected scalar"),
        }
    }
}
