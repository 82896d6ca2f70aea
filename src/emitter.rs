// Copyright notice and licensing information.
// These lines indicate the copyright of the software and its licensing terms.
// SPDX-License-Identifier: Apache-2.0 OR MIT indicates dual licensing under Apache 2.0 or MIT licenses.
// Copyright © 2024 Serde YML, Seamless YAML Serialization for Rust. All rights reserved.

//! The event emitter (spec §4.5): a small state machine wrapping the
//! libyaml-style event API, `{ initialized, opened, closed }`.

use crate::libyaml::emitter as backend;
use crate::modules::error::{new, Error, ErrorImpl};
use crate::node::{CollectionStyle, Node, NodeRef, ScalarStyle, Tag};
use crate::options::Options;
use std::io;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum State {
    Initialized,
    Opened,
    Closed,
}

/// Converts a node-level `ScalarStyle` to the backend's, honoring
/// `Options.new_line_scalar_style` for scalars containing embedded newlines.
fn backend_scalar_style(style: ScalarStyle, value: &str, options: &Options) -> backend::ScalarStyle {
    let style = if style == ScalarStyle::Any && value.contains('\n') {
        options.new_line_scalar_style
    } else {
        style
    };
    match style {
        ScalarStyle::Any => backend::ScalarStyle::Any,
        ScalarStyle::Plain => backend::ScalarStyle::Plain,
        ScalarStyle::SingleQuoted => backend::ScalarStyle::SingleQuoted,
        ScalarStyle::DoubleQuoted => backend::ScalarStyle::DoubleQuoted,
        ScalarStyle::Literal => backend::ScalarStyle::Literal,
        ScalarStyle::Folded => backend::ScalarStyle::Folded,
    }
}

fn backend_collection_style(style: CollectionStyle, override_style: CollectionStyle) -> backend::CollectionStyle {
    let style = if style == CollectionStyle::Any {
        override_style
    } else {
        style
    };
    style.into()
}

/// Tag text to print for a scalar's `declared` tag given its `resolved`
/// (content-derived) tag: printed whenever they differ, per the §3
/// resolved-vs-declared invariant.
fn scalar_tag_text(declared: &Tag, resolved: &Tag) -> Option<String> {
    if declared == resolved {
        None
    } else {
        Some(declared.uri().to_owned())
    }
}

/// Tag text to print for a collection's `declared` tag: implicit exactly
/// when it equals the variant's default (`!!seq`/`!!map`).
fn collection_tag_text(declared: &Tag, default: &Tag) -> Option<String> {
    if declared == default {
        None
    } else {
        Some(declared.uri().to_owned())
    }
}

/// The YAML event emitter: open a stream, serialize documents, close it.
pub struct Emitter<'a> {
    backend: backend::Emitter<'a>,
    state: State,
    options: Options,
}

impl<'a> Emitter<'a> {
    /// Constructs an emitter writing to `write`, applying `options` to the backend.
    pub fn new(write: Box<dyn io::Write + 'a>, options: Options) -> Self {
        let mut backend = backend::Emitter::new(write);
        backend.set_canonical(options.canonical);
        // `0` means "defer to the backend default"; `-1` is the sentinel for
        // unlimited width and is passed through as-is.
        backend.set_indent(if options.indent == 0 { 2 } else { options.indent });
        backend.set_width(if options.width == 0 { 80 } else { options.width });
        backend.set_unicode(options.allow_unicode);
        backend.set_line_break(options.line_break.into());
        Emitter {
            backend,
            state: State::Initialized,
            options,
        }
    }

    /// Emits stream-start. Must be called exactly once, before any `serialize`.
    pub fn open(&mut self) -> Result<(), Error> {
        match self.state {
            State::Opened => return Err(new(ErrorImpl::EmitterAlreadyOpened)),
            State::Closed => return Err(new(ErrorImpl::EmitterAlreadyClosed)),
            State::Initialized => {}
        }
        self.backend.emit(backend::Event::StreamStart)?;
        self.state = State::Opened;
        log::debug!("emitter opened");
        Ok(())
    }

    /// Emits document-start, recursively emits `node`, emits document-end.
    pub fn serialize(&mut self, node: &NodeRef) -> Result<(), Error> {
        match self.state {
            State::Initialized => return Err(new(ErrorImpl::EmitterNotOpened)),
            State::Closed => return Err(new(ErrorImpl::EmitterAlreadyClosed)),
            State::Opened => {}
        }
        self.backend.emit(backend::Event::DocumentStart {
            version: self.options.version.map(|v| (v.major, v.minor)),
            implicit: !self.options.explicit_start,
        })?;
        self.emit_node(node)?;
        self.backend.emit(backend::Event::DocumentEnd {
            implicit: !self.options.explicit_end,
        })?;
        Ok(())
    }

    /// Emits stream-end. A no-op if already closed; fails if never opened.
    pub fn close(&mut self) -> Result<(), Error> {
        match self.state {
            State::Initialized => return Err(new(ErrorImpl::EmitterNotOpened)),
            State::Closed => return Ok(()),
            State::Opened => {}
        }
        self.backend.emit(backend::Event::StreamEnd)?;
        self.backend.flush()?;
        self.state = State::Closed;
        log::debug!("emitter closed");
        Ok(())
    }

    /// Returns the accumulated UTF-8 output, consuming the emitter.
    pub fn into_inner(self) -> Box<dyn io::Write + 'a> {
        self.backend.into_inner()
    }

    fn emit_node(&mut self, node: &NodeRef) -> Result<(), Error> {
        match node.as_ref() {
            Node::Scalar(scalar) => {
                let resolved = node.resolved_tag_with_mode(self.options.resolver_mode);
                let tag = scalar_tag_text(&scalar.tag, &resolved);
                self.backend.emit(backend::Event::Scalar(backend::Scalar {
                    anchor: scalar.anchor.clone(),
                    tag,
                    value: &scalar.value,
                    style: backend_scalar_style(scalar.style, &scalar.value, &self.options),
                }))?;
            }
            Node::Sequence(seq) => {
                let tag = collection_tag_text(&seq.tag, &Tag::Seq);
                self.backend.emit(backend::Event::SequenceStart(backend::Sequence {
                    anchor: seq.anchor.clone(),
                    tag,
                    style: backend_collection_style(seq.style, self.options.sequence_style),
                }))?;
                for item in &seq.items {
                    self.emit_node(item)?;
                }
                self.backend.emit(backend::Event::SequenceEnd)?;
            }
            Node::Mapping(map) => {
                let tag = collection_tag_text(&map.tag, &Tag::Map);
                self.backend.emit(backend::Event::MappingStart(backend::Mapping {
                    anchor: map.anchor.clone(),
                    tag,
                    style: backend_collection_style(map.style, self.options.mapping_style),
                }))?;
                let mut pairs: Vec<&(NodeRef, NodeRef)> = map.pairs.iter().collect();
                if self.options.sort_keys {
                    pairs.sort_by(|(a, _), (b, _)| a.as_ref().cmp(b.as_ref()));
                }
                for (key, value) in pairs {
                    self.emit_node(key)?;
                    self.emit_node(value)?;
                }
                self.backend.emit(backend::Event::MappingEnd)?;
            }
            Node::Alias(alias) => {
                self.backend.emit(backend::Event::Alias {
                    anchor: alias.anchor.clone(),
                })?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Node;

    fn emit_one(node: &NodeRef, options: Options) -> String {
        let mut emitter = Emitter::new(Box::new(Vec::new()), options);
        emitter.open().unwrap();
        emitter.serialize(node).unwrap();
        emitter.close().unwrap();
        let buf = emitter.into_inner();
        let buf: Box<Vec<u8>> =
            unsafe { Box::from_raw(Box::into_raw(buf).cast::<Vec<u8>>()) };
        String::from_utf8(*buf).unwrap()
    }

    #[test]
    fn serialize_before_open_fails() {
        let node = Node::scalar("hi", None, None, None);
        let mut emitter = Emitter::new(Box::new(Vec::new()), Options::default());
        assert!(emitter.serialize(&node).is_err());
    }

    #[test]
    fn open_twice_fails() {
        let mut emitter = Emitter::new(Box::new(Vec::new()), Options::default());
        emitter.open().unwrap();
        assert!(emitter.open().is_err());
    }

    #[test]
    fn close_is_idempotent() {
        let mut emitter = Emitter::new(Box::new(Vec::new()), Options::default());
        emitter.open().unwrap();
        emitter.close().unwrap();
        assert!(emitter.close().is_ok());
    }

    #[test]
    fn scalar_round_trips_through_backend() {
        let node = Node::scalar("hello", None, None, None);
        let out = emit_one(&node, Options::default());
        assert!(out.contains("hello"));
    }
}
