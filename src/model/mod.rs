// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Mindtree and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model.
//!
//! An outline is an arena of [`Node`]s keyed by [`NodeId`], with an ordered top level acting
//! as the root container.

#[cfg(test)]
pub(crate) mod fixtures;
pub mod ids;
pub mod node;
pub mod tree;

pub use ids::{IdSource, NodeId};
pub use node::{Node, DEFAULT_NODE_LABEL};
pub use tree::{Container, DepthFirst, Tree, TreeError};
