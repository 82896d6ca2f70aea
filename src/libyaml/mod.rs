// Copyright notice and licensing information.
// These lines indicate the copyright of the software and its licensing terms.
// SPDX-License-Identifier: Apache-2.0 OR MIT indicates dual licensing under Apache 2.0 or MIT licenses.
// Copyright © 2024 Serde YML, Seamless YAML Serialization for Rust. All rights reserved.

//! Thin safe wrapper around `unsafe-libyaml`'s emitter half, the
//! concrete backend this crate uses to reproduce libyaml's event → text
//! contract (spec §6/§9). Only the emitter side is kept; parsing is out
//! of scope for this crate.

mod cstr;
pub mod emitter;
pub mod error;
mod util;

pub(crate) use self::error::Error;
