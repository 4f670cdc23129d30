// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Mindtree and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::ids::NodeId;
use super::node::Node;
use super::tree::{Container, Tree};

pub(crate) fn id(value: u64) -> NodeId {
    NodeId::new(value)
}

fn add(tree: &mut Tree, parent: Option<u64>, node: u64, label: &str) {
    tree.insert(Container::from(parent.map(id)), Node::new(id(node), label))
        .expect("fixture insert");
}

/// ```text
/// 1 "one"
/// ├─ 11 "one.one"
/// │  └─ 111 "one.one.one"
/// └─ 12 "one.two"
/// 2 "two"
/// ```
pub(crate) fn three_level_tree() -> Tree {
    let mut tree = Tree::new();
    add(&mut tree, None, 1, "one");
    add(&mut tree, Some(1), 11, "one.one");
    add(&mut tree, Some(11), 111, "one.one.one");
    add(&mut tree, Some(1), 12, "one.two");
    add(&mut tree, None, 2, "two");
    tree
}

/// One top-level node `1` with `n` leaf children numbered `101..`.
pub(crate) fn fan_out_tree(n: u64) -> Tree {
    let mut tree = Tree::new();
    add(&mut tree, None, 1, "hub");
    for child in 0..n {
        add(&mut tree, Some(1), 101 + child, &format!("spoke {child}"));
    }
    tree
}

/// A single path `1 -> 2 -> .. -> depth`, each node the only child of the previous one.
pub(crate) fn chain_tree(depth: u64) -> Tree {
    let mut tree = Tree::new();
    add(&mut tree, None, 1, "level 1");
    for level in 2..=depth {
        add(&mut tree, Some(level - 1), level, &format!("level {level}"));
    }
    tree
}
