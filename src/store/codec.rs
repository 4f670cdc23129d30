// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Mindtree and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! JSON blob format.
//!
//! The blob is the array of top-level nodes, each `{id, label, active, collapsed, children}`
//! with `children` nesting the same shape. There is no version field. Decoding is strict: every
//! field is required and typed, ids must be unique, and the top level must not be empty. The
//! parent links and the active pointer are rebuilt from the nesting. Nesting depth is not
//! limited, so any tree that encodes also decodes.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::model::{Container, Node, NodeId, Tree, TreeError};

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("malformed outline json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("outline has no top-level nodes")]
    Empty,
    #[error("inconsistent outline: {0}")]
    Tree(#[from] TreeError),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct PersistedNode {
    id: NodeId,
    label: String,
    active: bool,
    collapsed: bool,
    children: Vec<PersistedNode>,
}

impl PersistedNode {
    fn from_tree(tree: &Tree, id: NodeId) -> Option<Self> {
        let node = tree.get(id)?;
        Some(Self {
            id,
            label: node.label().to_owned(),
            active: node.is_active(),
            collapsed: node.is_collapsed(),
            children: node
                .children()
                .iter()
                .filter_map(|child| Self::from_tree(tree, *child))
                .collect(),
        })
    }
}

pub fn encode(tree: &Tree) -> Result<String, CodecError> {
    let top_level: Vec<PersistedNode> = tree
        .top_level()
        .iter()
        .filter_map(|id| PersistedNode::from_tree(tree, *id))
        .collect();
    Ok(serde_json::to_string(&top_level)?)
}

pub fn decode(text: &str) -> Result<Tree, CodecError> {
    let mut json = serde_json::Deserializer::from_str(text);
    json.disable_recursion_limit();
    let top_level =
        Vec::<PersistedNode>::deserialize(serde_stacker::Deserializer::new(&mut json))?;
    json.end()?;
    if top_level.is_empty() {
        return Err(CodecError::Empty);
    }

    let mut tree = Tree::new();
    let mut active: Option<NodeId> = None;
    let mut extra_active = Vec::new();

    let mut stack: Vec<(Container, PersistedNode)> =
        top_level.into_iter().rev().map(|node| (Container::Root, node)).collect();
    while let Some((container, persisted)) = stack.pop() {
        let PersistedNode {
            id,
            label,
            active: flagged,
            collapsed,
            children,
        } = persisted;
        tree.insert(container, Node::new(id, label).with_collapsed(collapsed))?;
        if flagged {
            if active.is_none() {
                active = Some(id);
            } else {
                extra_active.push(id);
            }
        }
        stack.extend(children.into_iter().rev().map(|child| (Container::Node(id), child)));
    }

    if !extra_active.is_empty() {
        warn!(kept = ?active, cleared = ?extra_active, "outline had several active nodes");
    }
    tree.set_active(active);
    tree.check_invariants()?;
    Ok(tree)
}
