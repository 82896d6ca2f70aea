// Copyright notice and licensing information.
// These lines indicate the copyright of the software and its licensing terms.
// SPDX-License-Identifier: Apache-2.0 OR MIT indicates dual licensing under Apache 2.0 or MIT licenses.
// Copyright © 2024 Serde YML, Seamless YAML Serialization for Rust. All rights reserved.

use crate::libyaml::{emitter, error as libyaml};
use std::{
    error::Error as StdError,
    fmt::{self, Debug, Display},
    io, result, string,
};

/// An error that happened representing or emitting YAML data.
pub struct Error(Box<ErrorImpl>);

/// Alias for a `Result` with the crate's [`Error`] type.
pub type Result<T> = result::Result<T, Error>;

/// The internal representation of an error.
#[derive(Debug)]
pub enum ErrorImpl {
    /// A generic error message.
    Message(String),
    /// An error originating from the `libyaml` emitter backend.
    Libyaml(libyaml::Error),
    /// An I/O error writing the output buffer.
    Io(io::Error),
    /// An error encountered while converting emitted bytes to a string using UTF-8 encoding.
    FromUtf8(string::FromUtf8Error),
    /// `serialize`/`close` called before `open`.
    EmitterNotOpened,
    /// `open` called on an already-open emitter.
    EmitterAlreadyOpened,
    /// `serialize`/`open` called on a closed emitter.
    EmitterAlreadyClosed,
    /// A host value matched neither `NodeRepresentable` nor `ScalarRepresentable`.
    RepresenterFailed(String),
    /// Two mapping keys compared structurally equal.
    DuplicateMappingKey(String),
}

impl Error {
    /// Returns the libyaml emitter mark associated with this error, if any.
    pub fn mark(&self) -> Option<libyaml::Mark> {
        match &*self.0 {
            ErrorImpl::Libyaml(err) => Some(err.mark()),
            _ => None,
        }
    }
}

/// Creates a new `Error` from an `ErrorImpl`.
pub(crate) fn new(inner: ErrorImpl) -> Error {
    Error(Box::new(inner))
}

impl From<libyaml::Error> for Error {
    fn from(err: libyaml::Error) -> Self {
        Error(Box::new(ErrorImpl::Libyaml(err)))
    }
}

impl From<emitter::Error> for Error {
    fn from(err: emitter::Error) -> Self {
        match err {
            emitter::Error::Libyaml(err) => Self::from(err),
            emitter::Error::Io(err) => new(ErrorImpl::Io(err)),
        }
    }
}

impl From<string::FromUtf8Error> for Error {
    fn from(err: string::FromUtf8Error) -> Self {
        new(ErrorImpl::FromUtf8(err))
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.0.source()
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.display(f)
    }
}

// Remove a layer of verbosity from the debug representation. Humans often
// end up seeing this representation because it is what unwrap() shows.
impl Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.debug(f)
    }
}

impl ErrorImpl {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            ErrorImpl::Io(err) => err.source(),
            ErrorImpl::FromUtf8(err) => err.source(),
            _ => None,
        }
    }

    fn message(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorImpl::Message(msg) => f.write_str(msg),
            ErrorImpl::Libyaml(err) => Display::fmt(err, f),
            ErrorImpl::Io(err) => Display::fmt(err, f),
            ErrorImpl::FromUtf8(err) => Display::fmt(err, f),
            ErrorImpl::EmitterNotOpened => f.write_str("emitter has not been opened"),
            ErrorImpl::EmitterAlreadyOpened => f.write_str("emitter is already opened"),
            ErrorImpl::EmitterAlreadyClosed => f.write_str("emitter is already closed"),
            ErrorImpl::RepresenterFailed(what) => {
                write!(f, "failed to represent {what}")
            }
            ErrorImpl::DuplicateMappingKey(key) => {
                write!(f, "duplicate mapping key {key}")
            }
        }
    }

    fn display(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.message(f)
    }

    fn debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Error(")?;
        struct Message<'a>(&'a ErrorImpl);
        impl Display for Message<'_> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.message(f)
            }
        }
        let msg = Message(self).to_string();
        Debug::fmt(&msg, f)?;
        f.write_str(")")
    }
}
