// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Mindtree and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Runtime configuration resolved by the binary.

use std::path::PathBuf;

use crate::store::{FileStore, WriteDurability, DEFAULT_SLOT};

/// Environment variable holding the `tracing` filter directives.
pub const LOG_ENV: &str = "MINDTREE_LOG";
pub const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub storage_dir: PathBuf,
    pub slot: String,
    pub durability: WriteDurability,
    /// Where log records go; logging is off when unset, since the TUI owns the terminal.
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage_dir: PathBuf::from("."),
            slot: DEFAULT_SLOT.to_owned(),
            durability: WriteDurability::default(),
            log_file: None,
        }
    }
}

impl Config {
    pub fn file_store(&self) -> FileStore {
        FileStore::new(&self.storage_dir)
            .with_slot(self.slot.clone())
            .with_durability(self.durability)
    }
}
