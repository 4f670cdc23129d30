// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Mindtree and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Logical command surface.
//!
//! Front ends decode raw input into [`Command`]s and run them through [`dispatch`]; toolbars
//! read [`Capabilities`] to decide which controls are enabled.

use std::sync::OnceLock;

use regex::Regex;

use crate::model::NodeId;
use crate::nav::Direction;
use crate::notify::Changes;
use crate::ops::Outline;
use crate::store::{BlobStore, StoreError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// New child under the active node, or a new top-level node when nothing is active.
    CreateChild,
    /// New node next to the active one (same container).
    CreateSibling,
    RemoveCurrent,
    Move(Direction),
    ToggleChildrenCollapsed,
    ToggleCollapsed,
    SetLabel(String),
    /// Explicit selection; `None` clears activation.
    ActivateNode(Option<NodeId>),
    Save,
}

/// Snapshot of what the toolbar may offer, computed from the active node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Capabilities {
    pub can_save: bool,
    pub can_move_left: bool,
    pub can_move_right: bool,
    pub can_move_up: bool,
    pub can_move_down: bool,
}

impl Capabilities {
    pub fn can_move(&self, direction: Direction) -> bool {
        match direction {
            Direction::Left => self.can_move_left,
            Direction::Right => self.can_move_right,
            Direction::Up => self.can_move_up,
            Direction::Down => self.can_move_down,
        }
    }
}

/// Runs one command against `outline`. Only [`Command::Save`] can fail.
pub fn dispatch<S: BlobStore + ?Sized>(
    outline: &mut Outline,
    command: Command,
    store: &mut S,
) -> Result<Changes, StoreError> {
    let active = outline.active();
    let changes = match command {
        Command::CreateChild => outline.create_child(active),
        Command::CreateSibling => match active {
            Some(id) => outline.create_sibling(id),
            None => outline.create_child(None),
        },
        Command::RemoveCurrent => active.map(|id| outline.remove(id)).unwrap_or_default(),
        Command::Move(direction) => outline.activate_dir(direction),
        Command::ToggleChildrenCollapsed => {
            active.map(|id| outline.toggle_children_collapsed(id)).unwrap_or_default()
        }
        Command::ToggleCollapsed => {
            active.map(|id| outline.toggle_collapsed(id)).unwrap_or_default()
        }
        Command::SetLabel(text) => {
            active.map(|id| outline.set_label(id, text)).unwrap_or_default()
        }
        Command::ActivateNode(target) => outline.activate_node(target),
        Command::Save => outline.save(store)?,
    };
    Ok(changes)
}

fn tag_pattern() -> &'static Regex {
    static TAG: OnceLock<Regex> = OnceLock::new();
    TAG.get_or_init(|| Regex::new(r"<([^>]+)>").expect("tag pattern compiles"))
}

/// Strips tag-like `<...>` substrings from edited label text.
pub fn sanitize_label(text: &str) -> String {
    tag_pattern().replace_all(text, "").into_owned()
}
