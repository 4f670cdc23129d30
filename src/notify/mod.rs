// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Mindtree and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Change notification.
//!
//! Every outline operation produces a [`Changes`] value describing what it touched. The outline
//! hands it to its [`Listeners`] registry right after the mutation, and also returns it so a
//! caller can diff it against whatever it has rendered.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::command::Capabilities;
use crate::model::{Node, NodeId, Tree};

/// Coarse description of what an operation changed.
///
/// `updated` never lists ids that are also in `added` or `removed`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Changes {
    pub added: Vec<NodeId>,
    pub removed: Vec<NodeId>,
    pub updated: Vec<NodeId>,
    /// The top-level sequence changed (or was replaced wholesale).
    pub root: bool,
    /// Capability flags (save state, directional moves) may have changed.
    pub toolbar: bool,
}

impl Changes {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty()
            && self.removed.is_empty()
            && self.updated.is_empty()
            && !self.root
            && !self.toolbar
    }

    pub fn touches(&self, id: NodeId) -> bool {
        self.updated.contains(&id) || self.added.contains(&id) || self.removed.contains(&id)
    }
}

#[derive(Debug, Default)]
pub(crate) struct ChangeSet {
    added: BTreeSet<NodeId>,
    removed: BTreeSet<NodeId>,
    updated: BTreeSet<NodeId>,
    root: bool,
    toolbar: bool,
}

impl ChangeSet {
    pub(crate) fn record_added(&mut self, id: NodeId) {
        self.removed.remove(&id);
        self.updated.remove(&id);
        self.added.insert(id);
    }

    pub(crate) fn record_removed(&mut self, id: NodeId) {
        self.added.remove(&id);
        self.updated.remove(&id);
        self.removed.insert(id);
    }

    pub(crate) fn record_updated(&mut self, id: NodeId) {
        if self.added.contains(&id) || self.removed.contains(&id) {
            return;
        }
        self.updated.insert(id);
    }

    pub(crate) fn record_root(&mut self) {
        self.root = true;
    }

    pub(crate) fn record_toolbar(&mut self) {
        self.toolbar = true;
    }

    pub(crate) fn finish(self) -> Changes {
        Changes {
            added: self.added.into_iter().collect(),
            removed: self.removed.into_iter().collect(),
            updated: self.updated.into_iter().collect(),
            root: self.root,
            toolbar: self.toolbar,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

pub type NodeListener = Box<dyn FnMut(&Node)>;
pub type RootListener = Box<dyn FnMut(&Tree)>;
pub type ToolbarListener = Box<dyn FnMut(Capabilities)>;

/// Subscription registry: any number of listeners per node, plus root and toolbar listeners.
#[derive(Default)]
pub struct Listeners {
    next_id: u64,
    nodes: BTreeMap<NodeId, Vec<(SubscriptionId, NodeListener)>>,
    root: Vec<(SubscriptionId, RootListener)>,
    toolbar: Vec<(SubscriptionId, ToolbarListener)>,
}

impl fmt::Debug for Listeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("nodes", &self.nodes.values().map(Vec::len).sum::<usize>())
            .field("root", &self.root.len())
            .field("toolbar", &self.toolbar.len())
            .finish()
    }
}

impl Listeners {
    fn allocate(&mut self) -> SubscriptionId {
        self.next_id += 1;
        SubscriptionId(self.next_id)
    }

    pub fn subscribe_node(
        &mut self,
        node_id: NodeId,
        listener: impl FnMut(&Node) + 'static,
    ) -> SubscriptionId {
        let id = self.allocate();
        self.nodes.entry(node_id).or_default().push((id, Box::new(listener)));
        id
    }

    pub fn subscribe_root(&mut self, listener: impl FnMut(&Tree) + 'static) -> SubscriptionId {
        let id = self.allocate();
        self.root.push((id, Box::new(listener)));
        id
    }

    pub fn subscribe_toolbar(
        &mut self,
        listener: impl FnMut(Capabilities) + 'static,
    ) -> SubscriptionId {
        let id = self.allocate();
        self.toolbar.push((id, Box::new(listener)));
        id
    }

    /// Returns `false` when the subscription was already gone.
    pub fn unsubscribe(&mut self, subscription: SubscriptionId) -> bool {
        let before = self.len();
        for listeners in self.nodes.values_mut() {
            listeners.retain(|(id, _)| *id != subscription);
        }
        self.nodes.retain(|_, listeners| !listeners.is_empty());
        self.root.retain(|(id, _)| *id != subscription);
        self.toolbar.retain(|(id, _)| *id != subscription);
        self.len() != before
    }

    pub fn len(&self) -> usize {
        self.nodes.values().map(Vec::len).sum::<usize>() + self.root.len() + self.toolbar.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops node listeners whose node no longer exists in `tree`.
    pub(crate) fn retain_existing(&mut self, tree: &Tree) {
        self.nodes.retain(|id, _| tree.contains(*id));
    }

    /// Fires listeners for `changes`: updated nodes first, then root, then toolbar.
    pub(crate) fn dispatch(&mut self, changes: &Changes, tree: &Tree, capabilities: Capabilities) {
        for id in &changes.removed {
            self.nodes.remove(id);
        }
        for id in &changes.updated {
            let (Some(node), Some(listeners)) = (tree.get(*id), self.nodes.get_mut(id)) else {
                continue;
            };
            for (_, listener) in listeners.iter_mut() {
                listener(node);
            }
        }
        if changes.root {
            for (_, listener) in self.root.iter_mut() {
                listener(tree);
            }
        }
        if changes.toolbar {
            for (_, listener) in self.toolbar.iter_mut() {
                listener(capabilities);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::{ChangeSet, Changes, Listeners};
    use crate::command::Capabilities;
    use crate::model::fixtures::{id, three_level_tree};

    #[test]
    fn change_set_keeps_added_and_removed_out_of_updated() {
        let mut set = ChangeSet::default();
        set.record_added(id(5));
        set.record_updated(id(5));
        set.record_updated(id(2));
        set.record_updated(id(1));
        set.record_removed(id(2));
        set.record_toolbar();

        let changes = set.finish();
        assert_eq!(changes.added, vec![id(5)]);
        assert_eq!(changes.removed, vec![id(2)]);
        assert_eq!(changes.updated, vec![id(1)]);
        assert!(changes.toolbar);
        assert!(!changes.root);
        assert!(changes.touches(id(2)));
        assert!(!changes.touches(id(3)));
    }

    #[test]
    fn empty_change_set_finishes_empty() {
        assert!(ChangeSet::default().finish().is_empty());
        assert_eq!(ChangeSet::default().finish(), Changes::default());
    }

    #[test]
    fn dispatch_reaches_every_listener_of_a_node() {
        let tree = three_level_tree();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut listeners = Listeners::default();
        for tag in ["a", "b"] {
            let seen = seen.clone();
            listeners.subscribe_node(id(11), move |node| {
                seen.borrow_mut().push(format!("{tag}:{}", node.label()));
            });
        }

        let changes = Changes {
            updated: vec![id(11), id(12)],
            ..Changes::default()
        };
        listeners.dispatch(&changes, &tree, Capabilities::default());
        assert_eq!(*seen.borrow(), vec!["a:one.one".to_owned(), "b:one.one".to_owned()]);
    }

    #[test]
    fn unsubscribe_stops_delivery() {
        let tree = three_level_tree();
        let count = Rc::new(RefCell::new(0));
        let mut listeners = Listeners::default();
        let subscription = {
            let count = count.clone();
            listeners.subscribe_toolbar(move |_| *count.borrow_mut() += 1)
        };
        let changes = Changes {
            toolbar: true,
            ..Changes::default()
        };

        listeners.dispatch(&changes, &tree, Capabilities::default());
        assert!(listeners.unsubscribe(subscription));
        assert!(!listeners.unsubscribe(subscription));
        listeners.dispatch(&changes, &tree, Capabilities::default());

        assert_eq!(*count.borrow(), 1);
        assert!(listeners.is_empty());
    }

    #[test]
    fn removed_nodes_lose_their_listeners() {
        let tree = three_level_tree();
        let mut listeners = Listeners::default();
        listeners.subscribe_node(id(111), |_| {});
        listeners.subscribe_root(|_| {});

        let changes = Changes {
            removed: vec![id(111)],
            root: true,
            ..Changes::default()
        };
        listeners.dispatch(&changes, &tree, Capabilities::default());
        assert_eq!(listeners.len(), 1);
    }
}
