// Copyright notice and licensing information.
// These lines indicate the copyright of the software and its licensing terms.
// SPDX-License-Identifier: Apache-2.0 OR MIT indicates dual licensing under Apache 2.0 or MIT licenses.
// Copyright © 2024 Serde YML, Seamless YAML Serialization for Rust. All rights reserved.

//! The alias/redundancy engine (spec §4.4): an optional pre-emission pass
//! that rewrites repeated subtrees into an anchor declaration plus aliases.
//!
//! Two passes over the tree: the first counts occurrences (by pointer
//! identity or by structural value, per strategy) so only nodes that
//! actually repeat receive an anchor; the second rewrites, handing out
//! anchors to first occurrences of repeated nodes and aliases to the rest.

use crate::node::{Mapping, Node, NodeRef, Sequence};
use crate::options::RedundancyAliasingStrategy;
use std::collections::HashMap;
use std::rc::Rc;

/// Deterministic anchor name generator: `a1, a2, ...` in depth-first
/// pre-order, stable across identical inputs.
struct AnchorNames {
    next: u64,
}

impl AnchorNames {
    fn new() -> Self {
        AnchorNames { next: 1 }
    }

    fn next(&mut self) -> String {
        let name = format!("a{}", self.next);
        self.next += 1;
        name
    }
}

/// A node is a candidate for aliasing if it is a collection, or if it is a
/// scalar that already carries a user-supplied anchor (the one exemption to
/// "scalars are never aliased", per spec §4.4).
fn aliasable(node: &Node) -> bool {
    matches!(node, Node::Sequence(_) | Node::Mapping(_)) || node.anchor().is_some()
}

/// Rewrites `root` per `strategy`, returning a new tree in which repeated
/// subtrees have been replaced by `Alias` nodes after their first
/// occurrence. A no-op for `RedundancyAliasingStrategy::None`.
pub fn apply(root: &NodeRef, strategy: RedundancyAliasingStrategy) -> NodeRef {
    match strategy {
        RedundancyAliasingStrategy::None => Rc::clone(root),
        RedundancyAliasingStrategy::Identity => {
            let mut counts: HashMap<*const Node, usize> = HashMap::new();
            count_by_identity(root, &mut counts);
            let mut anchors: HashMap<*const Node, String> = HashMap::new();
            let mut names = AnchorNames::new();
            let rewritten = rewrite_by_identity(root, &counts, &mut anchors, &mut names);
            log::debug!("identity aliasing assigned {} anchor(s)", anchors.len());
            rewritten
        }
        RedundancyAliasingStrategy::Value => {
            let mut counts: HashMap<NodeRef, usize> = HashMap::new();
            count_by_value(root, &mut counts);
            let mut anchors: HashMap<NodeRef, String> = HashMap::new();
            let mut names = AnchorNames::new();
            let rewritten = rewrite_by_value(root, &counts, &mut anchors, &mut names);
            log::debug!("value aliasing assigned {} anchor(s)", anchors.len());
            rewritten
        }
    }
}

fn children(node: &Node) -> Vec<&NodeRef> {
    match node {
        Node::Sequence(seq) => seq.items.iter().collect(),
        Node::Mapping(map) => map.pairs.iter().flat_map(|(k, v)| [k, v]).collect(),
        Node::Scalar(_) | Node::Alias(_) => Vec::new(),
    }
}

fn count_by_identity(node: &NodeRef, counts: &mut HashMap<*const Node, usize>) {
    if !aliasable(node) {
        return;
    }
    let key = Rc::as_ptr(node);
    *counts.entry(key).or_insert(0) += 1;
    for child in children(node) {
        count_by_identity(child, counts);
    }
}

fn rewrite_by_identity(
    node: &NodeRef,
    counts: &HashMap<*const Node, usize>,
    anchors: &mut HashMap<*const Node, String>,
    names: &mut AnchorNames,
) -> NodeRef {
    if !aliasable(node) {
        return Rc::clone(node);
    }
    let key = Rc::as_ptr(node);
    if let Some(anchor) = anchors.get(&key) {
        return Node::alias(anchor.clone());
    }
    let repeated = counts.get(&key).copied().unwrap_or(0) > 1;
    let anchor = if repeated {
        let anchor = names.next();
        anchors.insert(key, anchor.clone());
        Some(anchor)
    } else {
        node.anchor().map(str::to_owned)
    };
    rebuild(node, anchor, |child| rewrite_by_identity(child, counts, anchors, names))
}

fn count_by_value(node: &NodeRef, counts: &mut HashMap<NodeRef, usize>) {
    if !aliasable(node) {
        return;
    }
    *counts.entry(Rc::clone(node)).or_insert(0) += 1;
    for child in children(node) {
        count_by_value(child, counts);
    }
}

fn rewrite_by_value(
    node: &NodeRef,
    counts: &HashMap<NodeRef, usize>,
    anchors: &mut HashMap<NodeRef, String>,
    names: &mut AnchorNames,
) -> NodeRef {
    if !aliasable(node) {
        return Rc::clone(node);
    }
    if let Some(anchor) = anchors.get(node) {
        return Node::alias(anchor.clone());
    }
    let repeated = counts.get(node).copied().unwrap_or(0) > 1;
    let anchor = if repeated {
        Some(names.next())
    } else {
        node.anchor().map(str::to_owned)
    };
    let original = Rc::clone(node);
    let rewritten = rebuild(node, anchor.clone(), |child| {
        rewrite_by_value(child, counts, anchors, names)
    });
    if let Some(anchor) = anchor {
        if repeated {
            anchors.insert(original, anchor);
        }
    }
    rewritten
}

fn rebuild(node: &NodeRef, anchor: Option<String>, mut recurse: impl FnMut(&NodeRef) -> NodeRef) -> NodeRef {
    match node.as_ref() {
        Node::Sequence(seq) => {
            let items = seq.items.iter().map(&mut recurse).collect();
            Rc::new(Node::Sequence(Sequence {
                items,
                tag: seq.tag.clone(),
                style: seq.style,
                anchor,
            }))
        }
        Node::Mapping(map) => {
            let pairs = map
                .pairs
                .iter()
                .map(|(k, v)| (recurse(k), recurse(v)))
                .collect();
            Rc::new(Node::Mapping(Mapping {
                pairs,
                tag: map.tag.clone(),
                style: map.style,
                anchor,
            }))
        }
        Node::Scalar(scalar) => Rc::new(Node::Scalar(crate::node::Scalar {
            value: scalar.value.clone(),
            tag: scalar.tag.clone(),
            style: scalar.style,
            anchor,
        })),
        Node::Alias(_) => unreachable!("alias nodes are not aliasable"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Node;

    fn leaf(v: &str) -> NodeRef {
        Node::scalar(v, None, None, None)
    }

    #[test]
    fn none_strategy_is_a_no_op() {
        let tree = Node::sequence(vec![leaf("a")], None, None, None);
        let rewritten = apply(&tree, RedundancyAliasingStrategy::None);
        assert!(Rc::ptr_eq(&tree, &rewritten));
    }

    #[test]
    fn value_strategy_aliases_structural_duplicates() {
        let x = Node::mapping(vec![(leaf("a"), leaf("1"))], None, None, None).unwrap();
        let tree = Node::sequence(vec![Rc::clone(&x), Rc::clone(&x)], None, None, None);
        let rewritten = apply(&tree, RedundancyAliasingStrategy::Value);
        match rewritten.as_ref() {
            Node::Sequence(seq) => {
                assert_eq!(seq.items.len(), 2);
                assert!(matches!(seq.items[0].as_ref(), Node::Mapping(m) if m.anchor.is_some()));
                assert!(matches!(seq.items[1].as_ref(), Node::Alias(_)));
            }
            _ => panic!("expected sequence"),
        }
    }

    #[test]
    fn value_strategy_leaves_non_duplicate_collections_unanchored() {
        let tree = Node::sequence(
            vec![
                Node::mapping(vec![(leaf("a"), leaf("1"))], None, None, None).unwrap(),
                Node::mapping(vec![(leaf("b"), leaf("2"))], None, None, None).unwrap(),
            ],
            None,
            None,
            None,
        );
        let rewritten = apply(&tree, RedundancyAliasingStrategy::Value);
        match rewritten.as_ref() {
            Node::Sequence(seq) => {
                assert!(matches!(seq.items[0].as_ref(), Node::Mapping(m) if m.anchor.is_none()));
                assert!(matches!(seq.items[1].as_ref(), Node::Mapping(m) if m.anchor.is_none()));
            }
            _ => panic!("expected sequence"),
        }
    }

    #[test]
    fn identity_strategy_ignores_structural_duplicates_of_distinct_objects() {
        let a = Node::mapping(vec![(leaf("a"), leaf("1"))], None, None, None).unwrap();
        let b = Node::mapping(vec![(leaf("a"), leaf("1"))], None, None, None).unwrap();
        let tree = Node::sequence(vec![a, b], None, None, None);
        let rewritten = apply(&tree, RedundancyAliasingStrategy::Identity);
        match rewritten.as_ref() {
            Node::Sequence(seq) => {
                assert!(matches!(seq.items[0].as_ref(), Node::Mapping(m) if m.anchor.is_none()));
                assert!(matches!(seq.items[1].as_ref(), Node::Mapping(m) if m.anchor.is_none()));
            }
            _ => panic!("expected sequence"),
        }
    }

    #[test]
    fn identity_strategy_aliases_the_same_object_referenced_twice() {
        let shared = Node::mapping(vec![(leaf("a"), leaf("1"))], None, None, None).unwrap();
        let tree = Node::sequence(vec![Rc::clone(&shared), Rc::clone(&shared)], None, None, None);
        let rewritten = apply(&tree, RedundancyAliasingStrategy::Identity);
        match rewritten.as_ref() {
            Node::Sequence(seq) => {
                assert!(matches!(seq.items[0].as_ref(), Node::Mapping(m) if m.anchor.is_some()));
                assert!(matches!(seq.items[1].as_ref(), Node::Alias(_)));
            }
            _ => panic!("expected sequence"),
        }
    }
}
