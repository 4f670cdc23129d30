// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Mindtree and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Flattening of the outline into display rows.

use crate::model::{Node, NodeId, Tree};

const INDENT: &str = "  ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub id: NodeId,
    pub depth: usize,
    pub marker: &'static str,
    pub label: String,
    pub active: bool,
}

fn marker(node: &Node) -> &'static str {
    if !node.has_children() {
        "• "
    } else if node.is_collapsed() {
        "▸ "
    } else {
        "▾ "
    }
}

/// Visible rows in display order; collapsed nodes hide their subtrees.
pub fn rows(tree: &Tree) -> Vec<Row> {
    tree.iter_visible()
        .map(|(depth, node)| Row {
            id: node.id(),
            depth,
            marker: marker(node),
            label: node.label().to_owned(),
            active: node.is_active(),
        })
        .collect()
}

pub fn active_row(rows: &[Row]) -> Option<usize> {
    rows.iter().position(|row| row.active)
}

pub fn indent(depth: usize) -> String {
    INDENT.repeat(depth)
}

/// Plain-text rendering of every visible row, one per line.
pub fn outline_text(tree: &Tree) -> String {
    let mut out = String::new();
    for row in rows(tree) {
        out.push_str(&indent(row.depth));
        out.push_str(row.marker);
        out.push_str(&row.label);
        out.push('\n');
    }
    out
}
