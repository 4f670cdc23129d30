// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Mindtree and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Mindtree: a keyboard-driven outliner / mind-map engine.
//!
//! [`ops::Outline`] is the session: a tree of labeled, collapsible nodes with a single active
//! node, spatial navigation, change notification and JSON persistence into a storage slot.
//! [`tui`] is the terminal front end.

pub mod command;
pub mod config;
pub mod model;
pub mod nav;
pub mod notify;
pub mod ops;
pub mod store;
pub mod tui;
