// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Mindtree and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Persistence for outlines.
//!
//! [`codec`] turns a [`crate::model::Tree`] into the JSON blob format and back; [`BlobStore`]
//! implementations decide where that blob lives (a slot file on disk, or memory for tests).

use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub mod codec;
mod slot;

pub use codec::CodecError;
pub use slot::{BlobStore, FileStore, MemoryStore, WriteDurability, DEFAULT_SLOT};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid slot name {0:?}")]
    InvalidSlot(String),
    #[error(transparent)]
    Codec(#[from] CodecError),
}
