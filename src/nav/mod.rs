// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Mindtree and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Spatial navigation over the outline.
//!
//! The outline is laid out like a mind map growing to the right: a node's parent is to its
//! left, its children to its right, and its siblings above and below. Everything here is a pure
//! query over [`Tree`]; moving the active pointer is done by [`crate::ops::Outline`].

use std::fmt;

use crate::model::{Container, NodeId, Tree};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    /// To the parent.
    Left,
    /// Into the children, landing on the entry child.
    Right,
    /// To the previous sibling.
    Up,
    /// To the next sibling.
    Down,
}

impl Direction {
    pub const ALL: [Self; 4] = [Self::Left, Self::Right, Self::Up, Self::Down];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::Up => "up",
            Self::Down => "down",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn can_go_parent(tree: &Tree, id: NodeId) -> bool {
    tree.parent_of(id).is_some()
}

pub fn can_go_child(tree: &Tree, id: NodeId) -> bool {
    tree.get(id).is_some_and(|node| node.is_expanded())
}

/// Siblings are only reachable under a parent node; top-level nodes never move up or down.
fn sibling_index(tree: &Tree, id: NodeId) -> Option<(NodeId, usize)> {
    let parent = tree.parent_of(id)?;
    Some((parent, tree.index_in_container(id)?))
}

pub fn can_go_prev_sibling(tree: &Tree, id: NodeId) -> bool {
    prev_sibling(tree, id).is_some()
}

pub fn can_go_next_sibling(tree: &Tree, id: NodeId) -> bool {
    next_sibling(tree, id).is_some()
}

/// The child entered when moving right: index `floor((n - 1) / 2)`, so the landing spot sits
/// near the vertical middle of the subtree rather than at its top.
///
/// Ignores the collapsed flag; [`can_go_child`] is the guard for actually moving.
pub fn entry_child(tree: &Tree, id: NodeId) -> Option<NodeId> {
    let children = tree.children_of(Container::Node(id));
    if !tree.contains(id) || children.is_empty() {
        return None;
    }
    children.get((children.len() - 1) / 2).copied()
}

pub fn prev_sibling(tree: &Tree, id: NodeId) -> Option<NodeId> {
    let (parent, index) = sibling_index(tree, id)?;
    let prev = index.checked_sub(1)?;
    tree.children_of(Container::Node(parent)).get(prev).copied()
}

pub fn next_sibling(tree: &Tree, id: NodeId) -> Option<NodeId> {
    let (parent, index) = sibling_index(tree, id)?;
    tree.children_of(Container::Node(parent)).get(index + 1).copied()
}

pub fn can_go(tree: &Tree, id: NodeId, direction: Direction) -> bool {
    match direction {
        Direction::Left => can_go_parent(tree, id),
        Direction::Right => can_go_child(tree, id),
        Direction::Up => can_go_prev_sibling(tree, id),
        Direction::Down => can_go_next_sibling(tree, id),
    }
}

/// Target of a move from `id`, or `None` when the move is not available.
pub fn neighbor(tree: &Tree, id: NodeId, direction: Direction) -> Option<NodeId> {
    if !can_go(tree, id, direction) {
        return None;
    }
    match direction {
        Direction::Left => tree.parent_of(id),
        Direction::Right => entry_child(tree, id),
        Direction::Up => prev_sibling(tree, id),
        Direction::Down => next_sibling(tree, id),
    }
}
