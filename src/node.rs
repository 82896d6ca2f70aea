// Copyright notice and licensing information.
// These lines indicate the copyright of the software and its licensing terms.
// SPDX-License-Identifier: Apache-2.0 OR MIT indicates dual licensing under Apache 2.0 or MIT licenses.
// Copyright © 2024 Serde YML, Seamless YAML Serialization for Rust. All rights reserved.

//! The recursive node model: `Scalar`, `Sequence`, `Mapping`, and `Alias`,
//! plus the `Tag` and style metadata every variant carries.

use crate::modules::error::{new, Error, ErrorImpl};
use crate::resolver::{resolve, ResolverMode};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

/// A reference-counted handle to a [`Node`].
///
/// Cloning a `NodeRef` clones the `Rc`, not the node; two clones of the same
/// `NodeRef` are identity-equal via [`Rc::ptr_eq`], which is what the
/// `Identity` redundancy-aliasing strategy keys on.
pub type NodeRef = Rc<Node>;

/// YAML's core-schema primitive tags, plus an explicit URI escape hatch.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Tag {
    /// `tag:yaml.org,2002:null`
    Null,
    /// `tag:yaml.org,2002:bool`
    Bool,
    /// `tag:yaml.org,2002:int`
    Int,
    /// `tag:yaml.org,2002:float`
    Float,
    /// `tag:yaml.org,2002:str`
    Str,
    /// `tag:yaml.org,2002:seq`
    Seq,
    /// `tag:yaml.org,2002:map`
    Map,
    /// `tag:yaml.org,2002:timestamp`
    Timestamp,
    /// `tag:yaml.org,2002:binary`
    Binary,
    /// A caller-supplied explicit tag URI, used verbatim.
    Uri(String),
}

impl Tag {
    /// The `tag:yaml.org,2002:...` URI this tag resolves to on the wire.
    pub fn uri(&self) -> &str {
        match self {
            Tag::Null => "tag:yaml.org,2002:null",
            Tag::Bool => "tag:yaml.org,2002:bool",
            Tag::Int => "tag:yaml.org,2002:int",
            Tag::Float => "tag:yaml.org,2002:float",
            Tag::Str => "tag:yaml.org,2002:str",
            Tag::Seq => "tag:yaml.org,2002:seq",
            Tag::Map => "tag:yaml.org,2002:map",
            Tag::Timestamp => "tag:yaml.org,2002:timestamp",
            Tag::Binary => "tag:yaml.org,2002:binary",
            Tag::Uri(uri) => uri,
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.uri())
    }
}

/// Advisory textual form for a scalar. `Any` lets the emitter choose.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum ScalarStyle {
    /// Let the emitter choose.
    #[default]
    Any,
    /// Unquoted, e.g. `foo`.
    Plain,
    /// `'foo'`
    SingleQuoted,
    /// `"foo"`
    DoubleQuoted,
    /// `|`-block style.
    Literal,
    /// `>`-block style.
    Folded,
}

/// Advisory textual form for a sequence or mapping.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum CollectionStyle {
    /// Let the emitter choose.
    #[default]
    Any,
    /// One entry per line.
    Block,
    /// `[...]` / `{...}`.
    Flow,
}

/// A scalar leaf: string content plus tag/style/anchor metadata.
#[derive(Debug, Clone)]
pub struct Scalar {
    /// The scalar's textual content, exactly as it will be emitted.
    pub value: String,
    /// The node's declared tag.
    pub tag: Tag,
    /// Advisory textual form.
    pub style: ScalarStyle,
    /// `&name` declared on this node, if any.
    pub anchor: Option<String>,
}

/// An ordered sequence of child nodes.
#[derive(Debug, Clone)]
pub struct Sequence {
    /// The sequence's children, in order.
    pub items: Vec<NodeRef>,
    /// The node's declared tag.
    pub tag: Tag,
    /// Advisory textual form.
    pub style: CollectionStyle,
    /// `&name` declared on this node, if any.
    pub anchor: Option<String>,
}

/// An ordered sequence of key/value pairs.
#[derive(Debug, Clone)]
pub struct Mapping {
    /// The mapping's entries, in insertion order.
    pub pairs: Vec<(NodeRef, NodeRef)>,
    /// The node's declared tag.
    pub tag: Tag,
    /// Advisory textual form.
    pub style: CollectionStyle,
    /// `&name` declared on this node, if any.
    pub anchor: Option<String>,
}

/// A reference to a previously anchored node.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Alias {
    /// The anchor name this alias points to.
    pub anchor: String,
}

/// The recursive algebraic value this crate emits as YAML.
#[derive(Debug, Clone)]
pub enum Node {
    /// A scalar leaf.
    Scalar(Scalar),
    /// An ordered sequence.
    Sequence(Sequence),
    /// An ordered mapping.
    Mapping(Mapping),
    /// A reference to a previously anchored node.
    Alias(Alias),
}

impl Node {
    /// Constructs a scalar node. If `tag` is omitted, it is resolved from
    /// `value`'s content under the YAML 1.2 core schema.
    pub fn scalar(
        value: impl Into<String>,
        tag: Option<Tag>,
        style: Option<ScalarStyle>,
        anchor: Option<String>,
    ) -> NodeRef {
        let value = value.into();
        let tag = tag.unwrap_or_else(|| resolve(&value, ResolverMode::Core));
        Rc::new(Node::Scalar(Scalar {
            value,
            tag,
            style: style.unwrap_or_default(),
            anchor,
        }))
    }

    /// Constructs a sequence node.
    pub fn sequence(
        items: Vec<NodeRef>,
        tag: Option<Tag>,
        style: Option<CollectionStyle>,
        anchor: Option<String>,
    ) -> NodeRef {
        Rc::new(Node::Sequence(Sequence {
            items,
            tag: tag.unwrap_or(Tag::Seq),
            style: style.unwrap_or_default(),
            anchor,
        }))
    }

    /// Constructs a mapping node, rejecting structurally duplicate keys.
    pub fn mapping(
        pairs: Vec<(NodeRef, NodeRef)>,
        tag: Option<Tag>,
        style: Option<CollectionStyle>,
        anchor: Option<String>,
    ) -> Result<NodeRef, Error> {
        for (i, (key, _)) in pairs.iter().enumerate() {
            for (other_key, _) in &pairs[..i] {
                if key == other_key {
                    return Err(new(ErrorImpl::DuplicateMappingKey(
                        describe(key),
                    )));
                }
            }
        }
        Ok(Rc::new(Node::Mapping(Mapping {
            pairs,
            tag: tag.unwrap_or(Tag::Map),
            style: style.unwrap_or_default(),
            anchor,
        })))
    }

    /// Constructs an alias node referencing `anchor`.
    pub fn alias(anchor: impl Into<String>) -> NodeRef {
        Rc::new(Node::Alias(Alias {
            anchor: anchor.into(),
        }))
    }

    /// The node's declared tag.
    pub fn declared_tag(&self) -> &Tag {
        match self {
            Node::Scalar(s) => &s.tag,
            Node::Sequence(s) => &s.tag,
            Node::Mapping(m) => &m.tag,
            Node::Alias(_) => unreachable!("alias nodes carry no tag"),
        }
    }

    /// `&name` declared on this node, if any.
    pub fn anchor(&self) -> Option<&str> {
        match self {
            Node::Scalar(s) => s.anchor.as_deref(),
            Node::Sequence(s) => s.anchor.as_deref(),
            Node::Mapping(m) => m.anchor.as_deref(),
            Node::Alias(_) => None,
        }
    }

    /// For a scalar, the content-derived tag under the YAML 1.2 core schema.
    /// For collections, the declared tag (resolution only applies to scalars).
    pub fn resolved_tag(&self) -> Tag {
        self.resolved_tag_with_mode(ResolverMode::Core)
    }

    /// Like [`Node::resolved_tag`], but resolves scalar content under the
    /// given [`ResolverMode`] (e.g. to enable the YAML 1.1 boolean extension).
    ///
    /// Implicit tag resolution only ever applies to a *plain* scalar; a
    /// quoted or block-style scalar always resolves as `str`, matching the
    /// YAML core schema rather than guessing from content a reader would
    /// never actually run the resolver against.
    pub fn resolved_tag_with_mode(&self, mode: ResolverMode) -> Tag {
        match self {
            Node::Scalar(s) => match s.style {
                ScalarStyle::Any | ScalarStyle::Plain => resolve(&s.value, mode),
                ScalarStyle::SingleQuoted
                | ScalarStyle::DoubleQuoted
                | ScalarStyle::Literal
                | ScalarStyle::Folded => Tag::Str,
            },
            Node::Sequence(s) => s.tag.clone(),
            Node::Mapping(m) => m.tag.clone(),
            Node::Alias(_) => unreachable!("alias nodes carry no tag"),
        }
    }
}

/// A short textual description of `node`, used in duplicate-key error messages.
fn describe(node: &Node) -> String {
    match node {
        Node::Scalar(s) => s.value.clone(),
        Node::Sequence(_) => "<sequence>".to_owned(),
        Node::Mapping(_) => "<mapping>".to_owned(),
        Node::Alias(a) => format!("*{}", a.anchor),
    }
}

/// Structural equality: same variant, identical payload. Anchors are
/// emission bookkeeping, not document identity, and are ignored; scalar
/// equality compares the *resolved* tag rather than the declared one so
/// that e.g. an explicitly `!!str`-tagged `"1"` and a plain `1` are
/// distinguished by what they actually mean on decode.
impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Node::Scalar(a), Node::Scalar(b)) => {
                a.value == b.value && a.resolved_tag() == b.resolved_tag()
            }
            (Node::Sequence(a), Node::Sequence(b)) => {
                a.tag == b.tag && a.items == b.items
            }
            (Node::Mapping(a), Node::Mapping(b)) => {
                a.tag == b.tag && a.pairs == b.pairs
            }
            (Node::Alias(a), Node::Alias(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Node {}

impl Hash for Node {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Node::Scalar(s) => {
                0u8.hash(state);
                s.value.hash(state);
                s.resolved_tag().hash(state);
            }
            Node::Sequence(s) => {
                1u8.hash(state);
                s.tag.hash(state);
                s.items.hash(state);
            }
            Node::Mapping(m) => {
                2u8.hash(state);
                m.tag.hash(state);
                m.pairs.hash(state);
            }
            Node::Alias(a) => {
                3u8.hash(state);
                a.hash(state);
            }
        }
    }
}

/// Rank used to order distinct node variants: scalars below sequences
/// below mappings, per the mapping-key sort order in the node model.
fn variant_rank(node: &Node) -> u8 {
    match node {
        Node::Scalar(_) => 0,
        Node::Sequence(_) => 1,
        Node::Mapping(_) => 2,
        Node::Alias(_) => 3,
    }
}

impl PartialOrd for Node {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Node {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Node::Scalar(a), Node::Scalar(b)) => a.value.cmp(&b.value),
            (Node::Sequence(a), Node::Sequence(b)) => a.items.cmp(&b.items),
            (Node::Mapping(a), Node::Mapping(b)) => a.pairs.cmp(&b.pairs),
            (Node::Alias(a), Node::Alias(b)) => a.anchor.cmp(&b.anchor),
            _ => variant_rank(self).cmp(&variant_rank(other)),
        }
    }
}

impl PartialOrd for Alias {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.anchor.cmp(&other.anchor))
    }
}

impl Ord for Alias {
    fn cmp(&self, other: &Self) -> Ordering {
        self.anchor.cmp(&other.anchor)
    }
}

impl Mapping {
    /// Looks up a value by a key that compares structurally equal.
    pub fn get(&self, key: &Node) -> Option<&NodeRef> {
        self.pairs
            .iter()
            .find(|(k, _)| k.as_ref() == key)
            .map(|(_, v)| v)
    }
}
