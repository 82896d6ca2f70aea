// Copyright notice and licensing information.
// These lines indicate the copyright of the software and its licensing terms.
// SPDX-License-Identifier: Apache-2.0 OR MIT indicates dual licensing under Apache 2.0 or MIT licenses.
// Copyright © 2024 Serde YML, Seamless YAML Serialization for Rust. All rights reserved.

use crate::libyaml;
use crate::libyaml::util::Owned;
use std::ffi::c_void;
use std::io;
use std::mem::{self, MaybeUninit};
use std::ptr::{self, addr_of_mut};
use std::slice;
#[allow(clippy::unsafe_removed_from_name)]
use unsafe_libyaml as sys;

/// Errors that can occur during YAML emission.
#[derive(Debug)]
pub(crate) enum Error {
    /// Errors related to libyaml.
    Libyaml(libyaml::error::Error),
    /// I/O errors.
    Io(io::Error),
}

/// A YAML emitter.
pub(crate) struct Emitter<'a> {
    pin: Owned<EmitterPinned<'a>>,
}

struct EmitterPinned<'a> {
    sys: sys::yaml_emitter_t,
    write: Box<dyn io::Write + 'a>,
    write_error: Option<io::Error>,
}

/// YAML event types.
#[derive(Debug)]
pub(crate) enum Event<'a> {
    /// Start of a YAML stream.
    StreamStart,
    /// End of a YAML stream.
    StreamEnd,
    /// Start of a YAML document.
    DocumentStart {
        /// `%YAML major.minor` directive, if the caller requested one.
        version: Option<(u8, u8)>,
        /// Suppress the `---` marker when true.
        implicit: bool,
    },
    /// End of a YAML document.
    DocumentEnd {
        /// Suppress the `...` marker when true.
        implicit: bool,
    },
    /// Scalar value.
    Scalar(Scalar<'a>),
    /// Start of a sequence.
    SequenceStart(Sequence),
    /// End of a sequence.
    SequenceEnd,
    /// Start of a mapping.
    MappingStart(Mapping),
    /// End of a mapping.
    MappingEnd,
    /// A `*anchor` reference to a previously anchored node.
    Alias {
        /// The anchor name being referenced.
        anchor: String,
    },
}

/// Represents a scalar value in YAML.
#[derive(Debug)]
pub(crate) struct Scalar<'a> {
    /// `&name` to declare on this node, if any.
    pub anchor: Option<String>,
    /// Optional tag for the scalar.
    pub tag: Option<String>,
    /// Value of the scalar.
    pub value: &'a str,
    /// Style of the scalar.
    pub style: ScalarStyle,
}

/// Styles for YAML scalars, matching all six libyaml scalar styles.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum ScalarStyle {
    /// Any scalar style.
    Any,
    /// Plain scalar style.
    Plain,
    /// Single quoted scalar style.
    SingleQuoted,
    /// Double quoted scalar style.
    DoubleQuoted,
    /// Literal scalar style (`|`).
    Literal,
    /// Folded scalar style (`>`).
    Folded,
}

/// Represents a YAML sequence.
#[derive(Debug)]
pub(crate) struct Sequence {
    /// `&name` to declare on this node, if any.
    pub anchor: Option<String>,
    /// Optional tag for the sequence.
    pub tag: Option<String>,
    /// Block or flow style.
    pub style: CollectionStyle,
}

/// Represents a YAML mapping.
#[derive(Debug)]
pub(crate) struct Mapping {
    /// `&name` to declare on this node, if any.
    pub anchor: Option<String>,
    /// Optional tag for the mapping.
    pub tag: Option<String>,
    /// Block or flow style.
    pub style: CollectionStyle,
}

/// Block/flow style shared by sequences and mappings.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum CollectionStyle {
    /// Let the backend decide.
    Any,
    /// Block style (one entry per line).
    Block,
    /// Flow style (`[...]` / `{...}`).
    Flow,
}

/// Line break policy applied to the backend.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum LineBreak {
    /// `\r`
    Cr,
    /// `\n`
    Ln,
    /// `\r\n`
    CrLn,
}

impl<'a> Emitter<'a> {
    /// Creates a new YAML emitter.
    pub fn new(write: Box<dyn io::Write + 'a>) -> Emitter<'a> {
        let owned = Owned::<EmitterPinned<'a>>::new_uninit();
        let pin = unsafe {
            let emitter = addr_of_mut!((*owned.ptr).sys);
            if sys::yaml_emitter_initialize(emitter).fail {
                panic!("malloc error: {}", libyaml::Error::emit_error(emitter));
            }
            sys::yaml_emitter_set_unicode(emitter, true);
            sys::yaml_emitter_set_width(emitter, -1);
            addr_of_mut!((*owned.ptr).write).write(write);
            addr_of_mut!((*owned.ptr).write_error).write(None);
            sys::yaml_emitter_set_output(emitter, write_handler, owned.ptr.cast());
            Owned::assume_init(owned)
        };
        Emitter { pin }
    }

    /// Toggles fully-tagged, double-quoted canonical output.
    pub fn set_canonical(&mut self, canonical: bool) {
        unsafe {
            sys::yaml_emitter_set_canonical(addr_of_mut!((*self.pin.ptr).sys), canonical);
        }
    }

    /// Sets the indent increment in spaces (libyaml defaults to 2 when `0`).
    pub fn set_indent(&mut self, indent: i32) {
        unsafe {
            sys::yaml_emitter_set_indent(addr_of_mut!((*self.pin.ptr).sys), indent);
        }
    }

    /// Sets the preferred line width (`-1` disables wrapping).
    pub fn set_width(&mut self, width: i32) {
        unsafe {
            sys::yaml_emitter_set_width(addr_of_mut!((*self.pin.ptr).sys), width);
        }
    }

    /// Toggles verbatim non-ASCII output vs. `\xNN`/`\uNNNN` escaping.
    pub fn set_unicode(&mut self, allow_unicode: bool) {
        unsafe {
            sys::yaml_emitter_set_unicode(addr_of_mut!((*self.pin.ptr).sys), allow_unicode);
        }
    }

    /// Sets the line terminator.
    pub fn set_line_break(&mut self, line_break: LineBreak) {
        let sys_break = match line_break {
            LineBreak::Cr => sys::YAML_CR_BREAK,
            LineBreak::Ln => sys::YAML_LN_BREAK,
            LineBreak::CrLn => sys::YAML_CRLN_BREAK,
        };
        unsafe {
            sys::yaml_emitter_set_break(addr_of_mut!((*self.pin.ptr).sys), sys_break);
        }
    }

    /// Emits a YAML event.
    pub fn emit(&mut self, event: Event<'_>) -> Result<(), Error> {
        let mut sys_event = MaybeUninit::<sys::yaml_event_t>::uninit();
        let sys_event = sys_event.as_mut_ptr();
        unsafe {
            let emitter = addr_of_mut!((*self.pin.ptr).sys);
            let initialize_status = match event {
                Event::StreamStart => {
                    sys::yaml_stream_start_event_initialize(sys_event, sys::YAML_UTF8_ENCODING)
                }
                Event::StreamEnd => sys::yaml_stream_end_event_initialize(sys_event),
                Event::DocumentStart { version, implicit } => {
                    let mut version_storage = version.map(|(major, minor)| sys::yaml_version_directive_t {
                        major: major.into(),
                        minor: minor.into(),
                    });
                    let version_directive = version_storage
                        .as_mut()
                        .map_or(ptr::null_mut(), |v| v as *mut _);
                    let tag_directives_start = ptr::null_mut();
                    let tag_directives_end = ptr::null_mut();
                    sys::yaml_document_start_event_initialize(
                        sys_event,
                        version_directive,
                        tag_directives_start,
                        tag_directives_end,
                        implicit,
                    )
                }
                Event::DocumentEnd { implicit } => {
                    sys::yaml_document_end_event_initialize(sys_event, implicit)
                }
                Event::Scalar(mut scalar) => {
                    let anchor = c_string_ptr(&mut scalar.anchor);
                    let tag = c_string_ptr(&mut scalar.tag);
                    let value = scalar.value.as_ptr();
                    let length = scalar.value.len() as i32;
                    let plain_implicit = tag.is_null();
                    let quoted_implicit = tag.is_null();
                    let style = match scalar.style {
                        ScalarStyle::Any => sys::YAML_ANY_SCALAR_STYLE,
                        ScalarStyle::Plain => sys::YAML_PLAIN_SCALAR_STYLE,
                        ScalarStyle::SingleQuoted => sys::YAML_SINGLE_QUOTED_SCALAR_STYLE,
                        ScalarStyle::DoubleQuoted => sys::YAML_DOUBLE_QUOTED_SCALAR_STYLE,
                        ScalarStyle::Literal => sys::YAML_LITERAL_SCALAR_STYLE,
                        ScalarStyle::Folded => sys::YAML_FOLDED_SCALAR_STYLE,
                    };
                    sys::yaml_scalar_event_initialize(
                        sys_event,
                        anchor,
                        tag,
                        value,
                        length,
                        plain_implicit,
                        quoted_implicit,
                        style,
                    )
                }
                Event::SequenceStart(mut sequence) => {
                    let anchor = c_string_ptr(&mut sequence.anchor);
                    let tag = c_string_ptr(&mut sequence.tag);
                    let implicit = tag.is_null();
                    let style = match sequence.style {
                        CollectionStyle::Any => sys::YAML_ANY_SEQUENCE_STYLE,
                        CollectionStyle::Block => sys::YAML_BLOCK_SEQUENCE_STYLE,
                        CollectionStyle::Flow => sys::YAML_FLOW_SEQUENCE_STYLE,
                    };
                    sys::yaml_sequence_start_event_initialize(
                        sys_event, anchor, tag, implicit, style,
                    )
                }
                Event::SequenceEnd => sys::yaml_sequence_end_event_initialize(sys_event),
                Event::MappingStart(mut mapping) => {
                    let anchor = c_string_ptr(&mut mapping.anchor);
                    let tag = c_string_ptr(&mut mapping.tag);
                    let implicit = tag.is_null();
                    let style = match mapping.style {
                        CollectionStyle::Any => sys::YAML_ANY_MAPPING_STYLE,
                        CollectionStyle::Block => sys::YAML_BLOCK_MAPPING_STYLE,
                        CollectionStyle::Flow => sys::YAML_FLOW_MAPPING_STYLE,
                    };
                    sys::yaml_mapping_start_event_initialize(
                        sys_event, anchor, tag, implicit, style,
                    )
                }
                Event::MappingEnd => sys::yaml_mapping_end_event_initialize(sys_event),
                Event::Alias { anchor: mut anchor_name } => {
                    anchor_name.push('\0');
                    let anchor = anchor_name.as_ptr();
                    sys::yaml_alias_event_initialize(sys_event, anchor)
                }
            };
            if initialize_status.fail {
                return Err(Error::Libyaml(libyaml::Error::emit_error(emitter)));
            }
            if sys::yaml_emitter_emit(emitter, sys_event).fail {
                return Err(self.error());
            }
        }
        Ok(())
    }

    /// Flushes the YAML emitter.
    pub fn flush(&mut self) -> Result<(), Error> {
        unsafe {
            let emitter = addr_of_mut!((*self.pin.ptr).sys);
            if sys::yaml_emitter_flush(emitter).fail {
                return Err(self.error());
            }
        }
        Ok(())
    }

    /// Retrieves the inner writer from the YAML emitter.
    #[allow(unused_mut)]
    pub fn into_inner(mut self) -> Box<dyn io::Write + 'a> {
        let sink = Box::new(io::sink());
        unsafe { mem::replace(&mut (*self.pin.ptr).write, sink) }
    }

    /// Retrieves the error from the YAML emitter.
    fn error(&mut self) -> Error {
        let emitter = unsafe { &mut *self.pin.ptr };
        if let Some(write_error) = emitter.write_error.take() {
            Error::Io(write_error)
        } else {
            Error::Libyaml(unsafe { libyaml::Error::emit_error(&emitter.sys) })
        }
    }
}

/// Null-terminates `s` in place and returns a pointer suitable for the
/// `anchor`/`tag` parameters libyaml expects, or null if there is none.
fn c_string_ptr(s: &mut Option<String>) -> *const u8 {
    s.as_mut().map_or_else(ptr::null, |s| {
        s.push('\0');
        s.as_ptr()
    })
}

/// Writes data to a buffer using a provided callback function.
unsafe fn write_handler(data: *mut c_void, buffer: *mut u8, size: u64) -> i32 {
    let data = data.cast::<EmitterPinned<'_>>();
    match io::Write::write_all(unsafe { &mut *(*data).write }, unsafe {
        slice::from_raw_parts(buffer, size as usize)
    }) {
        Ok(()) => 1,
        Err(err) => {
            unsafe {
                (*data).write_error = Some(err);
            }
            0
        }
    }
}

impl Drop for EmitterPinned<'_> {
    /// Drops the YAML emitter, deallocating resources.
    fn drop(&mut self) {
        unsafe { sys::yaml_emitter_delete(&mut self.sys) }
    }
}
