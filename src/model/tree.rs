// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Mindtree and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::{BTreeMap, BTreeSet};

use thiserror::Error;

use super::ids::NodeId;
use super::node::{Node, DEFAULT_NODE_LABEL};

/// Anything that owns an ordered child list: the (label-less) root or a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Container {
    Root,
    Node(NodeId),
}

impl Container {
    pub fn node_id(self) -> Option<NodeId> {
        match self {
            Self::Root => None,
            Self::Node(id) => Some(id),
        }
    }
}

impl From<Option<NodeId>> for Container {
    fn from(parent: Option<NodeId>) -> Self {
        parent.map_or(Self::Root, Self::Node)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("node id {0} is already in use")]
    DuplicateId(NodeId),
    #[error("container node {0} does not exist")]
    UnknownContainer(NodeId),
    #[error("node {0} is already linked to a container")]
    AlreadyLinked(NodeId),
    #[error("node {child} is listed under {listed_under:?} but records parent {recorded:?}")]
    ParentMismatch {
        child: NodeId,
        listed_under: Option<NodeId>,
        recorded: Option<NodeId>,
    },
    #[error("node {0} is not reachable from the top level")]
    Unreachable(NodeId),
    #[error("node {0} appears in more than one child list")]
    Shared(NodeId),
    #[error("active pointer {pointer:?} disagrees with active flags {flagged:?}")]
    ActiveMismatch {
        pointer: Option<NodeId>,
        flagged: Vec<NodeId>,
    },
}

/// Arena holding every node of an outline, keyed by id.
///
/// The parent relation is a field on each [`Node`] and is only written by [`Tree::link`] and
/// [`Tree::unlink`], so it always mirrors the child lists. The active pointer is written only by
/// [`Tree::set_active`], which keeps it and the per-node `active` flag consistent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tree {
    nodes: BTreeMap<NodeId, Node>,
    top_level: Vec<NodeId>,
    active: Option<NodeId>,
}

impl Tree {
    pub fn new() -> Self {
        Self::default()
    }

    /// A tree holding one top-level node with the prompt label; nothing active.
    pub fn with_default_node(id: NodeId) -> Self {
        let mut tree = Self::new();
        tree.nodes.insert(id, Node::new(id, DEFAULT_NODE_LABEL));
        tree.top_level.push(id);
        tree
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub(crate) fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(&id)
    }

    pub fn top_level(&self) -> &[NodeId] {
        &self.top_level
    }

    /// Child ids of `container`; empty for an unknown node.
    pub fn children_of(&self, container: Container) -> &[NodeId] {
        match container {
            Container::Root => &self.top_level,
            Container::Node(id) => self.nodes.get(&id).map(Node::children).unwrap_or(&[]),
        }
    }

    fn children_of_mut(&mut self, container: Container) -> Option<&mut Vec<NodeId>> {
        match container {
            Container::Root => Some(&mut self.top_level),
            Container::Node(id) => self.nodes.get_mut(&id).map(Node::children_mut),
        }
    }

    /// Parent of `id`. `None` means top level, and is also what an unknown id yields.
    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(&id).and_then(Node::parent)
    }

    pub fn container_of(&self, id: NodeId) -> Container {
        Container::from(self.parent_of(id))
    }

    /// Position of `id` inside its container, if the node is linked.
    pub fn index_in_container(&self, id: NodeId) -> Option<usize> {
        if !self.contains(id) {
            return None;
        }
        self.children_of(self.container_of(id)).iter().position(|&child| child == id)
    }

    pub fn active(&self) -> Option<NodeId> {
        self.active
    }

    /// Moves the active pointer to `target` and returns the previously active node.
    ///
    /// An unknown target clears the pointer.
    pub(crate) fn set_active(&mut self, target: Option<NodeId>) -> Option<NodeId> {
        let target = target.filter(|id| self.nodes.contains_key(id));
        let previous = self.active.take();
        if let Some(node) = previous.and_then(|id| self.nodes.get_mut(&id)) {
            node.set_active(false);
        }
        if let Some(node) = target.and_then(|id| self.nodes.get_mut(&id)) {
            node.set_active(true);
        }
        self.active = target;
        previous
    }

    /// Adds a detached record and links it at the end of `container`.
    pub(crate) fn insert(&mut self, container: Container, mut node: Node) -> Result<(), TreeError> {
        let id = node.id();
        if self.nodes.contains_key(&id) {
            return Err(TreeError::DuplicateId(id));
        }
        if let Container::Node(parent) = container {
            if !self.nodes.contains_key(&parent) {
                return Err(TreeError::UnknownContainer(parent));
            }
        }
        node.set_parent(None);
        node.children_mut().clear();
        node.set_active(false);
        self.nodes.insert(id, node);
        self.link(container, id)
    }

    /// Appends `child` to `container` and records the parent link.
    pub(crate) fn link(&mut self, container: Container, child: NodeId) -> Result<(), TreeError> {
        if self.is_linked(child) {
            return Err(TreeError::AlreadyLinked(child));
        }
        let Some(children) = self.children_of_mut(container) else {
            return Err(TreeError::UnknownContainer(container.node_id().unwrap_or(child)));
        };
        children.push(child);
        if let Some(node) = self.nodes.get_mut(&child) {
            node.set_parent(container.node_id());
        }
        Ok(())
    }

    /// Detaches `child` from its container, returning where it was.
    pub(crate) fn unlink(&mut self, child: NodeId) -> Option<(Container, usize)> {
        let container = self.container_of(child);
        let children = self.children_of_mut(container)?;
        let index = children.iter().position(|&id| id == child)?;
        children.remove(index);
        if let Some(node) = self.nodes.get_mut(&child) {
            node.set_parent(None);
        }
        Some((container, index))
    }

    fn is_linked(&self, id: NodeId) -> bool {
        match self.parent_of(id) {
            Some(parent) => self.children_of(Container::Node(parent)).contains(&id),
            None => self.top_level.contains(&id),
        }
    }

    /// Ids below `id` in depth-first pre-order, `id` itself excluded.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> =
            self.children_of(Container::Node(id)).iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.children_of(Container::Node(next)).iter().rev().copied());
        }
        out
    }

    /// Unlinks `id` and drops it together with its whole subtree.
    ///
    /// Returns the removed ids (pre-order, `id` first) and the position `id` held in its
    /// container. Clears the active pointer when it pointed into the subtree.
    pub(crate) fn remove_subtree(&mut self, id: NodeId) -> Option<(Vec<NodeId>, Container, usize)> {
        let (container, index) = self.unlink(id)?;
        let mut removed = vec![id];
        removed.extend(self.descendants(id));
        for removed_id in &removed {
            self.nodes.remove(removed_id);
        }
        if self.active.is_some_and(|active| removed.contains(&active)) {
            self.active = None;
        }
        Some((removed, container, index))
    }

    /// Depth-first pre-order walk over every node, yielding `(depth, node)`.
    pub fn iter(&self) -> DepthFirst<'_> {
        DepthFirst::new(self, false)
    }

    /// Like [`Tree::iter`] but does not descend into collapsed nodes.
    pub fn iter_visible(&self) -> DepthFirst<'_> {
        DepthFirst::new(self, true)
    }

    /// Verifies the structural invariants; used after decoding and by tests.
    pub fn check_invariants(&self) -> Result<(), TreeError> {
        let mut seen = BTreeSet::new();
        let mut stack: Vec<(Option<NodeId>, NodeId)> =
            self.top_level.iter().rev().map(|&id| (None, id)).collect();
        while let Some((listed_under, id)) = stack.pop() {
            if !seen.insert(id) {
                return Err(TreeError::Shared(id));
            }
            let Some(node) = self.nodes.get(&id) else {
                return Err(TreeError::Unreachable(id));
            };
            if node.parent() != listed_under {
                return Err(TreeError::ParentMismatch {
                    child: id,
                    listed_under,
                    recorded: node.parent(),
                });
            }
            stack.extend(node.children().iter().rev().map(|&child| (Some(id), child)));
        }
        if let Some(orphan) = self.nodes.keys().find(|id| !seen.contains(id)) {
            return Err(TreeError::Unreachable(*orphan));
        }

        let flagged: Vec<NodeId> =
            self.nodes.values().filter(|node| node.is_active()).map(Node::id).collect();
        let consistent = match (self.active, flagged.as_slice()) {
            (None, []) => true,
            (Some(pointer), [only]) => pointer == *only,
            _ => false,
        };
        if !consistent {
            return Err(TreeError::ActiveMismatch {
                pointer: self.active,
                flagged,
            });
        }
        Ok(())
    }
}

pub struct DepthFirst<'a> {
    tree: &'a Tree,
    stack: Vec<(usize, NodeId)>,
    visible_only: bool,
}

impl<'a> DepthFirst<'a> {
    fn new(tree: &'a Tree, visible_only: bool) -> Self {
        let stack = tree.top_level.iter().rev().map(|&id| (0, id)).collect();
        Self {
            tree,
            stack,
            visible_only,
        }
    }
}

impl<'a> Iterator for DepthFirst<'a> {
    type Item = (usize, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (depth, id) = self.stack.pop()?;
            let Some(node) = self.tree.get(id) else {
                continue;
            };
            if !(self.visible_only && node.is_collapsed()) {
                self.stack.extend(node.children().iter().rev().map(|&child| (depth + 1, child)));
            }
            return Some((depth, node));
        }
    }
}
