// Copyright notice and licensing information.
// These lines indicate the copyright of the software and its licensing terms.
// SPDX-License-Identifier: Apache-2.0 OR MIT indicates dual licensing under Apache 2.0 or MIT licenses.
// Copyright © 2024 Serde YML, Seamless YAML Serialization for Rust. All rights reserved.

//! A YAML emission core.
//!
//! This crate turns typed host values into conforming, round-trippable
//! YAML 1.2 text. The pipeline is a small pipeline of independently usable
//! stages:
//!
//! - [`node`] — the recursive `Node`/`Tag` value model every other stage
//!   operates on.
//! - [`resolver`] — YAML 1.2 core-schema tag resolution (and an optional
//!   YAML 1.1 boolean-extension compatibility mode).
//! - [`represent`] — maps host values (`bool`, integers, floats, strings,
//!   timestamps, collections, ...) into [`node::Node`]s.
//! - [`alias`] — an optional pass that rewrites repeated subtrees into an
//!   anchor declaration plus aliases.
//! - [`emitter`] — a small state machine that walks a `Node` tree and drives
//!   the libyaml-style event API.
//!
//! [`dump`] and [`dump_all`] compose the whole pipeline for the common case
//! of serializing one value (or one `Node`, for callers building their own
//! tree) to a `String`; [`to_writer`]/[`to_writer_all`] do the same to any
//! `io::Write`.
//!
//! ```
//! use yaml_emit::Options;
//!
//! let yaml = yaml_emit::dump(&42i32, &Options::default()).unwrap();
//! assert_eq!(yaml, "42\n");
//! ```

#![deny(missing_docs)]
#![doc(html_root_url = "https://docs.rs/yaml_emit")]
#![crate_name = "yaml_emit"]
#![crate_type = "lib"]

pub use crate::modules::error::{Error, Result};
pub use crate::node::{
    Alias, CollectionStyle, Mapping, Node, NodeRef, Scalar, ScalarStyle, Sequence, Tag,
};
pub use crate::options::{
    FloatFormatStrategy, LineBreak, Options, RedundancyAliasingStrategy, YamlVersion,
};
pub use crate::represent::{Binary, Decimal, Displayable, NodeRepresentable, ScalarRepresentable};
pub use crate::resolver::ResolverMode;
pub use crate::timestamp::{Precision, Timestamp};

use std::io;

/// The alias/redundancy engine (spec §4.4): rewrites repeated subtrees into
/// an anchor declaration plus aliases before emission.
pub mod alias;
/// The event emitter (spec §4.5): a state machine over the libyaml-style
/// event API.
pub mod emitter;
/// Deterministic, round-trip-safe float formatting (spec §4.3.1).
pub mod float;
/// The `libyaml` module wraps the `unsafe-libyaml` FFI backend.
pub mod libyaml;
/// The `modules` module contains the crate's error type.
pub mod modules;
/// The recursive node model: `Node`, `Tag`, and style metadata.
pub mod node;
/// Options shared by the representer, alias engine, and emitter.
pub mod options;
/// Maps host values into `Node`s.
pub mod represent;
/// YAML 1.2 core-schema tag resolution.
pub mod resolver;
/// ISO-8601 timestamp formatting, backed by `time::OffsetDateTime`.
pub mod timestamp;

use crate::node::NodeRef as Tree;

/// Runs each node through the alias engine and the emitter, one document
/// per node, and returns the writer for the caller to recover or discard.
fn emit_nodes<'a>(
    writer: Box<dyn io::Write + 'a>,
    nodes: &[Tree],
    options: &Options,
) -> Result<Box<dyn io::Write + 'a>> {
    let mut emitter = emitter::Emitter::new(writer, options.clone());
    emitter.open()?;
    for node in nodes {
        let aliased = alias::apply(node, options.redundancy_aliasing_strategy);
        emitter.serialize(&aliased)?;
    }
    emitter.close()?;
    Ok(emitter.into_inner())
}

fn represent_all<T: NodeRepresentable>(values: &[T], options: &Options) -> Result<Vec<Tree>> {
    values.iter().map(|value| value.represent(options)).collect()
}

/// Serializes a single value to a YAML `String`.
///
/// Equivalent to representing `value` into a [`Node`], aliasing it per
/// `options.redundancy_aliasing_strategy`, and emitting one document.
pub fn dump<T: NodeRepresentable + ?Sized>(value: &T, options: &Options) -> Result<String> {
    let node = value.represent(options)?;
    to_string_from_node(&node, options)
}

/// Serializes a sequence of values as consecutive YAML documents in one stream.
pub fn dump_all<T: NodeRepresentable>(values: &[T], options: &Options) -> Result<String> {
    let nodes = represent_all(values, options)?;
    let writer = emit_nodes(Box::new(Vec::new()), &nodes, options)?;
    bytes_from_boxed_writer(writer)
}

/// Serializes an already-built [`Node`] tree to a YAML `String`, without
/// going through [`NodeRepresentable`]. Useful for callers that construct
/// their `Node` tree directly.
pub fn to_string_from_node(node: &Tree, options: &Options) -> Result<String> {
    let writer = emit_nodes(Box::new(Vec::new()), std::slice::from_ref(node), options)?;
    bytes_from_boxed_writer(writer)
}

/// Serializes a single value as YAML directly to `writer`.
pub fn to_writer<T, W>(writer: W, value: &T, options: &Options) -> Result<()>
where
    T: NodeRepresentable + ?Sized,
    W: io::Write,
{
    let node = value.represent(options)?;
    emit_nodes(Box::new(writer), std::slice::from_ref(&node), options)?;
    Ok(())
}

/// Serializes a sequence of values as consecutive YAML documents directly
/// to `writer`.
pub fn to_writer_all<T, W>(writer: W, values: &[T], options: &Options) -> Result<()>
where
    T: NodeRepresentable,
    W: io::Write,
{
    let nodes = represent_all(values, options)?;
    emit_nodes(Box::new(writer), &nodes, options)?;
    Ok(())
}

/// Recovers the `Vec<u8>` backing a `Box<dyn io::Write>` that is known to
/// have been constructed from one (every call site above constructs its
/// writer as `Box::new(Vec::new())`), mirroring the teacher's own
/// `into_inner` downcast.
fn bytes_from_boxed_writer(writer: Box<dyn io::Write>) -> Result<String> {
    let bytes: Box<Vec<u8>> =
        unsafe { Box::from_raw(Box::into_raw(writer).cast::<Vec<u8>>()) };
    Ok(String::from_utf8(*bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dump_scalar_round_trips_simple_value() {
        let yaml = dump(&42i32, &Options::default()).unwrap();
        assert_eq!(yaml, "42\n");
    }

    #[test]
    fn dump_all_emits_one_document_per_value() {
        let yaml = dump_all(&[1i32, 2i32], &Options::default()).unwrap();
        assert_eq!(yaml, "1\n---\n2\n");
    }

    #[test]
    fn to_writer_writes_through_an_external_buffer() {
        let mut buf = Vec::new();
        to_writer(&mut buf, "hello", &Options::default()).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "hello\n");
    }
}
