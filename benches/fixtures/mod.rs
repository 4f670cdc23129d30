// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Mindtree and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

#![allow(dead_code)]

// Shared deterministic benchmark fixtures (no RNG).

use mindtree::model::{IdSource, NodeId};
use mindtree::ops::Outline;

#[derive(Debug, Clone, Copy)]
pub enum Case {
    /// 4 wide, 3 deep: 84 nodes.
    Small,
    /// 8 wide, 4 deep: 4680 nodes.
    Medium,
    /// 2 wide, 12 deep with long labels.
    DeepLongLabels,
}

impl Case {
    pub fn id(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::DeepLongLabels => "deep_long_labels",
        }
    }

    fn shape(self) -> (usize, usize, usize) {
        match self {
            Self::Small => (4, 3, 12),
            Self::Medium => (8, 4, 16),
            Self::DeepLongLabels => (2, 12, 160),
        }
    }
}

fn label(prefix: &str, len: usize) -> String {
    let mut out = prefix.to_owned();
    while out.len() < len {
        out.push('x');
    }
    out.truncate(len.max(prefix.len()));
    out
}

/// Balanced outline: `width` top-level nodes, each with `width` children, `depth` levels deep.
pub fn outline(case: Case) -> Outline {
    let (width, depth, label_len) = case.shape();
    let mut outline = Outline::with_id_source(IdSource::sequential(1));
    let seed = outline.tree().top_level()[0];

    let mut frontier: Vec<Option<NodeId>> = vec![None];
    for level in 0..depth {
        let mut next = Vec::with_capacity(frontier.len() * width);
        for parent in frontier {
            for index in 0..width {
                let text = label(&format!("n{level}_{index}_"), label_len);
                let changes = outline.create_child_with_label(parent, &text);
                next.push(changes.added.first().copied());
            }
        }
        frontier = next;
    }

    outline.remove(seed);
    outline.activate_node(None);
    outline
}

/// Node ids in depth-first order.
pub fn node_ids(outline: &Outline) -> Vec<NodeId> {
    outline.tree().iter().map(|(_, node)| node.id()).collect()
}

/// The deepest-first leaf, handy as a starting point for moves.
pub fn first_leaf(outline: &Outline) -> Option<NodeId> {
    outline.tree().iter().find(|(_, node)| !node.has_children()).map(|(_, node)| node.id())
}
