// Copyright notice and licensing information.
// These lines indicate the copyright of the software and its licensing terms.
// SPDX-License-Identifier: Apache-2.0 OR MIT indicates dual licensing under Apache 2.0 or MIT licenses.
// Copyright © 2024 Serde YML, Seamless YAML Serialization for Rust. All rights reserved.

//! Options shared by the representer, alias engine, and emitter.

use crate::libyaml::emitter::{CollectionStyle as BackendCollectionStyle, LineBreak as BackendLineBreak};
use crate::node::{CollectionStyle, ScalarStyle};
use crate::resolver::ResolverMode;

/// Aliasing strategy applied by the redundancy engine before emission.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum RedundancyAliasingStrategy {
    /// No aliasing; every node is emitted in full at every occurrence.
    #[default]
    None,
    /// Alias only nodes that are the literal same `Rc` allocation.
    Identity,
    /// Alias any subtree that is structurally equal to a previously emitted one.
    Value,
}

/// Float formatting strategy, see spec §4.3.1.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FloatFormatStrategy {
    /// Shortest round-trip decimal representation (ryu).
    Decimal,
    /// `%.*g`-style formatting with a scientific fallback.
    Scientific,
}

impl Default for FloatFormatStrategy {
    fn default() -> Self {
        FloatFormatStrategy::Scientific
    }
}

/// Line terminator policy applied to the backend.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum LineBreak {
    /// `\r`
    Cr,
    /// `\n`
    #[default]
    Ln,
    /// `\r\n`
    CrLn,
}

impl From<LineBreak> for BackendLineBreak {
    fn from(line_break: LineBreak) -> Self {
        match line_break {
            LineBreak::Cr => BackendLineBreak::Cr,
            LineBreak::Ln => BackendLineBreak::Ln,
            LineBreak::CrLn => BackendLineBreak::CrLn,
        }
    }
}

impl From<CollectionStyle> for BackendCollectionStyle {
    fn from(style: CollectionStyle) -> Self {
        match style {
            CollectionStyle::Any => BackendCollectionStyle::Any,
            CollectionStyle::Block => BackendCollectionStyle::Block,
            CollectionStyle::Flow => BackendCollectionStyle::Flow,
        }
    }
}

/// A `%YAML major.minor` directive.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct YamlVersion {
    /// Major version component.
    pub major: u8,
    /// Minor version component.
    pub minor: u8,
}

/// Options controlling representation, aliasing, and emission.
#[derive(Debug, Clone)]
pub struct Options {
    /// Force fully-tagged, double-quoted output.
    pub canonical: bool,
    /// Indent increment in spaces. `0` defers to the backend default (2).
    pub indent: i32,
    /// Preferred line width. `0` defers to the backend default (80); `-1` means unlimited.
    pub width: i32,
    /// If true, emit non-ASCII verbatim; else escape.
    pub allow_unicode: bool,
    /// Line terminator policy.
    pub line_break: LineBreak,
    /// Print `---` before each document.
    pub explicit_start: bool,
    /// Print `...` after each document.
    pub explicit_end: bool,
    /// Emit a `%YAML major.minor` directive.
    pub version: Option<YamlVersion>,
    /// Sort mapping keys lexicographically on output.
    pub sort_keys: bool,
    /// Override sequence style; `Any` lets the emitter choose.
    pub sequence_style: CollectionStyle,
    /// Override mapping style; `Any` lets the emitter choose.
    pub mapping_style: CollectionStyle,
    /// Style used for scalars containing embedded newlines.
    pub new_line_scalar_style: ScalarStyle,
    /// Aliasing strategy applied before emission.
    pub redundancy_aliasing_strategy: RedundancyAliasingStrategy,
    /// Float formatting strategy used by the representer.
    pub floating_point_number_format_strategy: FloatFormatStrategy,
    /// Whether the tag resolver accepts the YAML 1.1 boolean extension.
    pub resolver_mode: ResolverMode,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            canonical: false,
            indent: 0,
            width: 0,
            allow_unicode: false,
            line_break: LineBreak::default(),
            explicit_start: false,
            explicit_end: false,
            version: None,
            sort_keys: false,
            sequence_style: CollectionStyle::Any,
            mapping_style: CollectionStyle::Any,
            new_line_scalar_style: ScalarStyle::Any,
            redundancy_aliasing_strategy: RedundancyAliasingStrategy::default(),
            floating_point_number_format_strategy: FloatFormatStrategy::default(),
            resolver_mode: ResolverMode::default(),
        }
    }
}
