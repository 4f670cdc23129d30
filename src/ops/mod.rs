// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Mindtree and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Mutation operations on an outline session.
//!
//! [`Outline`] owns the tree, the id source, the dirty flag and the listener registry. Every
//! operation applies its mutation completely, then dispatches the resulting [`Changes`] to the
//! listeners and returns it. Operations that cannot apply (unknown node, illegal move, removing
//! the last top-level node) return an empty [`Changes`] and leave everything untouched.

use tracing::{debug, info, warn};

use crate::command::Capabilities;
use crate::model::{Container, IdSource, Node, NodeId, Tree};
use crate::nav::{self, Direction};
use crate::notify::{ChangeSet, Changes, Listeners};
use crate::store::{codec, BlobStore, CodecError, StoreError};

#[derive(Debug)]
pub struct Outline {
    tree: Tree,
    ids: IdSource,
    dirty: bool,
    listeners: Listeners,
}

impl Default for Outline {
    fn default() -> Self {
        Self::new()
    }
}

impl Outline {
    /// A fresh session holding the default prompt node, with wall-clock ids.
    pub fn new() -> Self {
        Self::with_id_source(IdSource::wall_clock())
    }

    pub fn with_id_source(mut ids: IdSource) -> Self {
        let tree = Tree::with_default_node(ids.next_id());
        Self {
            tree,
            ids,
            dirty: false,
            listeners: Listeners::default(),
        }
    }

    /// Wraps an existing tree, advancing `ids` past every id it contains.
    pub fn from_tree(tree: Tree, mut ids: IdSource) -> Self {
        for (_, node) in tree.iter() {
            ids.observe(node.id());
        }
        Self {
            tree,
            ids,
            dirty: false,
            listeners: Listeners::default(),
        }
    }

    /// Opens the outline persisted in `store`, falling back to the default tree.
    pub fn open<S: BlobStore + ?Sized>(store: &S, ids: IdSource) -> Self {
        let mut outline = Self::with_id_source(ids);
        outline.load(store);
        outline
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.tree.get(id)
    }

    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.tree.parent_of(id)
    }

    pub fn active(&self) -> Option<NodeId> {
        self.tree.active()
    }

    pub fn active_node(&self) -> Option<&Node> {
        self.tree.active().and_then(|id| self.tree.get(id))
    }

    /// Unsaved changes exist.
    pub fn can_save(&self) -> bool {
        self.dirty
    }

    pub fn can_move(&self, direction: Direction) -> bool {
        self.active().is_some_and(|id| nav::can_go(&self.tree, id, direction))
    }

    pub fn capabilities(&self) -> Capabilities {
        Capabilities {
            can_save: self.can_save(),
            can_move_left: self.can_move(Direction::Left),
            can_move_right: self.can_move(Direction::Right),
            can_move_up: self.can_move(Direction::Up),
            can_move_down: self.can_move(Direction::Down),
        }
    }

    pub fn listeners(&self) -> &Listeners {
        &self.listeners
    }

    pub fn listeners_mut(&mut self) -> &mut Listeners {
        &mut self.listeners
    }

    fn commit(&mut self, set: ChangeSet) -> Changes {
        let changes = set.finish();
        debug_assert!(self.tree.check_invariants().is_ok(), "outline invariants violated");
        if !changes.is_empty() {
            let capabilities = self.capabilities();
            self.listeners.dispatch(&changes, &self.tree, capabilities);
        }
        changes
    }

    /// Moves the active pointer. The previously active node is recorded as updated; recording
    /// the new target is left to the calling operation.
    fn activate(&mut self, target: Option<NodeId>, set: &mut ChangeSet) {
        let target = target.filter(|id| self.tree.contains(*id));
        if target == self.tree.active() {
            return;
        }
        if let Some(previous) = self.tree.set_active(target) {
            set.record_updated(previous);
        }
    }

    /// Appends a new, empty-labeled node to `parent` (top level for `None`) and activates it.
    pub fn create_child(&mut self, parent: Option<NodeId>) -> Changes {
        self.create_child_with_label(parent, "")
    }

    pub fn create_child_with_label(&mut self, parent: Option<NodeId>, label: &str) -> Changes {
        if parent.is_some_and(|id| !self.tree.contains(id)) {
            debug!(parent = ?parent, "create skipped: unknown parent");
            return Changes::default();
        }

        let id = self.ids.next_id();
        if let Err(err) = self.tree.insert(Container::from(parent), Node::new(id, label)) {
            warn!(error = %err, "create failed");
            return Changes::default();
        }

        let mut set = ChangeSet::default();
        set.record_added(id);
        self.activate(Some(id), &mut set);

        match parent.and_then(|parent| self.tree.get_mut(parent)) {
            Some(parent_node) => {
                parent_node.set_collapsed(false);
                set.record_updated(parent_node.id());
            }
            None => set.record_root(),
        }

        self.dirty = true;
        set.record_toolbar();
        debug!(node = %id, parent = ?parent, "created node");
        self.commit(set)
    }

    /// Creates a node in the same container as `node`.
    pub fn create_sibling(&mut self, node: NodeId) -> Changes {
        if !self.tree.contains(node) {
            return Changes::default();
        }
        self.create_child(self.tree.parent_of(node))
    }

    /// Removes `node` with its subtree and moves focus to the nearest survivor.
    ///
    /// Focus goes to the node now at the removed position, else the container's last child,
    /// else the container itself (when it is a node). Removing the only top-level node is refused.
    pub fn remove(&mut self, node: NodeId) -> Changes {
        if !self.tree.contains(node) {
            return Changes::default();
        }
        let container = self.tree.container_of(node);
        if container == Container::Root && self.tree.top_level().len() < 2 {
            debug!(node = %node, "remove refused: last top-level node");
            return Changes::default();
        }

        let Some((removed, container, index)) = self.tree.remove_subtree(node) else {
            return Changes::default();
        };

        let mut set = ChangeSet::default();
        for id in &removed {
            set.record_removed(*id);
        }

        let remaining = self.tree.children_of(container);
        let focus = remaining
            .get(index)
            .or_else(|| remaining.last())
            .copied()
            .or_else(|| container.node_id());
        if let Some(focus) = focus {
            self.activate(Some(focus), &mut set);
            set.record_updated(focus);
        }

        match container {
            Container::Node(parent) => set.record_updated(parent),
            Container::Root => set.record_root(),
        }

        self.dirty = true;
        set.record_toolbar();
        debug!(node = %node, removed = removed.len(), focus = ?focus, "removed subtree");
        self.commit(set)
    }

    /// Replaces the label verbatim. Callers feeding user-edited text should pass it through
    /// [`crate::command::sanitize_label`] first.
    pub fn set_label(&mut self, node: NodeId, label: impl Into<String>) -> Changes {
        let Some(target) = self.tree.get_mut(node) else {
            return Changes::default();
        };
        target.set_label(label);

        let mut set = ChangeSet::default();
        set.record_updated(node);
        set.record_toolbar();
        self.dirty = true;
        self.commit(set)
    }

    pub fn set_collapsed(&mut self, node: NodeId, collapsed: bool) -> Changes {
        let Some(target) = self.tree.get_mut(node) else {
            return Changes::default();
        };
        target.set_collapsed(collapsed);

        let mut set = ChangeSet::default();
        set.record_updated(node);
        set.record_toolbar();
        self.commit(set)
    }

    pub fn toggle_collapsed(&mut self, node: NodeId) -> Changes {
        match self.tree.get(node) {
            Some(target) => {
                let collapsed = !target.is_collapsed();
                self.set_collapsed(node, collapsed)
            }
            None => Changes::default(),
        }
    }

    /// Expands `node` and sets `collapsed` on each direct child that has children of its own.
    /// Leaf children keep their flag.
    pub fn set_children_collapsed(&mut self, node: NodeId, collapsed: bool) -> Changes {
        let Some(target) = self.tree.get_mut(node) else {
            return Changes::default();
        };
        target.set_collapsed(false);
        let children = target.children().to_vec();

        let mut set = ChangeSet::default();
        set.record_updated(node);
        for child in children {
            let Some(child_node) = self.tree.get_mut(child) else {
                continue;
            };
            if child_node.has_children() {
                child_node.set_collapsed(collapsed);
                set.record_updated(child);
            }
        }
        set.record_toolbar();
        self.commit(set)
    }

    /// Collapses the expandable children if any of them is open, otherwise expands them all.
    pub fn toggle_children_collapsed(&mut self, node: NodeId) -> Changes {
        let Some(target) = self.tree.get(node) else {
            return Changes::default();
        };
        let any_open = target
            .children()
            .iter()
            .filter_map(|child| self.tree.get(*child))
            .any(|child| child.is_expanded());
        self.set_children_collapsed(node, any_open)
    }

    /// Explicit selection. `None` (or an unknown id) clears activation.
    pub fn activate_node(&mut self, target: Option<NodeId>) -> Changes {
        let target = target.filter(|id| self.tree.contains(*id));
        let mut set = ChangeSet::default();
        self.activate(target, &mut set);
        if let Some(id) = target {
            set.record_updated(id);
        }
        set.record_toolbar();
        self.commit(set)
    }

    /// Activates the neighbor of `node` in `direction`, when there is one.
    pub fn move_from(&mut self, node: NodeId, direction: Direction) -> Changes {
        let Some(target) = nav::neighbor(&self.tree, node, direction) else {
            return Changes::default();
        };
        let mut set = ChangeSet::default();
        self.activate(Some(target), &mut set);
        set.record_toolbar();
        set.record_updated(target);
        self.commit(set)
    }

    pub fn move_left(&mut self, node: NodeId) -> Changes {
        self.move_from(node, Direction::Left)
    }

    pub fn move_right(&mut self, node: NodeId) -> Changes {
        self.move_from(node, Direction::Right)
    }

    pub fn move_up(&mut self, node: NodeId) -> Changes {
        self.move_from(node, Direction::Up)
    }

    pub fn move_down(&mut self, node: NodeId) -> Changes {
        self.move_from(node, Direction::Down)
    }

    /// Moves from the active node; a no-op when nothing is active.
    pub fn activate_dir(&mut self, direction: Direction) -> Changes {
        match self.active() {
            Some(active) if self.can_move(direction) => self.move_from(active, direction),
            _ => Changes::default(),
        }
    }

    pub fn activate_left(&mut self) -> Changes {
        self.activate_dir(Direction::Left)
    }

    pub fn activate_right(&mut self) -> Changes {
        self.activate_dir(Direction::Right)
    }

    pub fn activate_up(&mut self) -> Changes {
        self.activate_dir(Direction::Up)
    }

    pub fn activate_down(&mut self) -> Changes {
        self.activate_dir(Direction::Down)
    }

    /// Serializes the top-level sequence.
    pub fn to_blob(&self) -> Result<String, CodecError> {
        codec::encode(&self.tree)
    }

    /// Writes the outline into `store` and clears the dirty flag.
    ///
    /// On a write error the dirty flag stays set and nothing is dispatched.
    pub fn save<S: BlobStore + ?Sized>(&mut self, store: &mut S) -> Result<Changes, StoreError> {
        let blob = self.to_blob()?;
        store.write(&blob)?;
        self.dirty = false;
        info!(nodes = self.tree.len(), bytes = blob.len(), "saved outline");

        let mut set = ChangeSet::default();
        set.record_toolbar();
        Ok(self.commit(set))
    }

    /// Replaces the outline with what `store` holds.
    ///
    /// Missing, unreadable or invalid data resets to the default single-node tree. Either way
    /// the outline ends up clean.
    pub fn load<S: BlobStore + ?Sized>(&mut self, store: &S) -> Changes {
        let blob = match store.read() {
            Ok(blob) => blob,
            Err(err) => {
                warn!(error = %err, "could not read saved outline; starting fresh");
                None
            }
        };
        self.restore(blob.as_deref())
    }

    /// Like [`Outline::load`] but from an in-memory blob.
    pub fn restore(&mut self, blob: Option<&str>) -> Changes {
        let decoded = match blob {
            None => {
                info!("no saved outline; starting fresh");
                None
            }
            Some(text) => match codec::decode(text) {
                Ok(tree) => Some(tree),
                Err(err) => {
                    warn!(error = %err, "discarding invalid saved outline");
                    None
                }
            },
        };

        let tree = match decoded {
            Some(tree) => {
                for (_, node) in tree.iter() {
                    self.ids.observe(node.id());
                }
                info!(nodes = tree.len(), active = ?tree.active(), "loaded outline");
                tree
            }
            None => Tree::with_default_node(self.ids.next_id()),
        };

        self.tree = tree;
        self.dirty = false;
        self.listeners.retain_existing(&self.tree);

        let mut set = ChangeSet::default();
        set.record_root();
        set.record_toolbar();
        self.commit(set)
    }
}
