// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Mindtree and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use super::StoreError;

pub const DEFAULT_SLOT: &str = "mindmap";

const SLOT_EXTENSION: &str = "json";

/// A single named slot holding one outline blob.
pub trait BlobStore {
    /// `Ok(None)` when nothing has been saved yet.
    fn read(&self) -> Result<Option<String>, StoreError>;

    fn write(&mut self, blob: &str) -> Result<(), StoreError>;
}

/// How hard a save tries to reach stable storage. Either way the slot file is replaced by a
/// rename, so a reader sees the old outline or the new one, never a partial write.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum WriteDurability {
    /// Rename only; the OS flushes the slot file whenever it likes.
    #[default]
    BestEffort,

    /// Also fsyncs the temp file before the rename and, on unix, the storage directory after
    /// it, so a saved outline survives a crash right after `Ctrl+S`.
    Durable,
}

/// Slot file `<dir>/<slot>.json` on disk.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
    slot: String,
    durability: WriteDurability,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            slot: DEFAULT_SLOT.to_owned(),
            durability: WriteDurability::default(),
        }
    }

    pub fn with_slot(mut self, slot: impl Into<String>) -> Self {
        self.slot = slot.into();
        self
    }

    pub fn with_durability(mut self, durability: WriteDurability) -> Self {
        self.durability = durability;
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn slot(&self) -> &str {
        &self.slot
    }

    pub fn durability(&self) -> WriteDurability {
        self.durability
    }

    /// Path of the slot file. Slot names are plain file stems: ASCII letters, digits, `-`, `_`.
    pub fn slot_path(&self) -> Result<PathBuf, StoreError> {
        let valid = !self.slot.is_empty()
            && self.slot.chars().all(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '-' | '_'));
        if !valid {
            return Err(StoreError::InvalidSlot(self.slot.clone()));
        }
        Ok(self.dir.join(format!("{}.{SLOT_EXTENSION}", self.slot)))
    }
}

impl BlobStore for FileStore {
    fn read(&self) -> Result<Option<String>, StoreError> {
        let path = self.slot_path()?;
        match fs::read_to_string(&path) {
            Ok(text) => Ok(Some(text)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(io_error(path)(source)),
        }
    }

    fn write(&mut self, blob: &str) -> Result<(), StoreError> {
        let path = self.slot_path()?;
        fs::create_dir_all(&self.dir).map_err(io_error(self.dir.clone()))?;
        write_atomic(&self.dir, &path, blob.as_bytes(), self.durability)
    }
}

fn io_error(path: PathBuf) -> impl FnOnce(io::Error) -> StoreError {
    move |source| StoreError::Io { path, source }
}

/// Moves the finished temp file over the slot file.
///
/// Windows refuses to rename onto an existing file, so the old slot file is dropped first and
/// the rename retried once.
fn replace_slot_file(tmp_path: &Path, slot_path: &Path) -> io::Result<()> {
    let first = fs::rename(tmp_path, slot_path);
    if cfg!(windows) {
        if let Err(err) = &first {
            if matches!(
                err.kind(),
                io::ErrorKind::AlreadyExists | io::ErrorKind::PermissionDenied
            ) {
                let _ = fs::remove_file(slot_path);
                return fs::rename(tmp_path, slot_path);
            }
        }
    }
    first
}

fn write_atomic(
    dir: &Path,
    path: &Path,
    contents: &[u8],
    durability: WriteDurability,
) -> Result<(), StoreError> {
    let Some(file_name) = path.file_name() else {
        return Err(StoreError::Io {
            path: path.to_path_buf(),
            source: io::Error::other("path has no file name"),
        });
    };

    let nanos = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_nanos();
    let tmp_path = dir.join(format!(".mindtree.tmp.{}.{nanos}", file_name.to_string_lossy()));

    let mut file = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&tmp_path)
        .map_err(io_error(tmp_path.clone()))?;

    if let Err(source) = file.write_all(contents) {
        drop(file);
        let _ = fs::remove_file(&tmp_path);
        return Err(io_error(tmp_path)(source));
    }

    if durability == WriteDurability::Durable {
        file.sync_all().map_err(io_error(tmp_path.clone()))?;
    }
    drop(file);

    if let Err(source) = replace_slot_file(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(io_error(path.to_path_buf())(source));
    }

    if durability == WriteDurability::Durable {
        #[cfg(unix)]
        {
            let handle = fs::File::open(dir).map_err(io_error(dir.to_path_buf()))?;
            handle.sync_all().map_err(io_error(dir.to_path_buf()))?;
        }
    }

    Ok(())
}

/// In-memory slot.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    blob: Option<String>,
    read_only: bool,
}

impl MemoryStore {
    pub fn with_blob(blob: impl Into<String>) -> Self {
        Self {
            blob: Some(blob.into()),
            read_only: false,
        }
    }

    pub fn blob(&self) -> Option<&str> {
        self.blob.as_deref()
    }

    /// Makes every subsequent write fail with `PermissionDenied`.
    pub fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }
}

impl BlobStore for MemoryStore {
    fn read(&self) -> Result<Option<String>, StoreError> {
        Ok(self.blob.clone())
    }

    fn write(&mut self, blob: &str) -> Result<(), StoreError> {
        if self.read_only {
            return Err(StoreError::Io {
                path: PathBuf::from("<memory>"),
                source: io::Error::new(io::ErrorKind::PermissionDenied, "store is read-only"),
            });
        }
        self.blob = Some(blob.to_owned());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use rstest::rstest;

    use super::{BlobStore, FileStore, MemoryStore, WriteDurability, DEFAULT_SLOT};
    use crate::store::StoreError;

    #[test]
    fn missing_slot_reads_as_none() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = FileStore::new(dir.path());
        assert_eq!(store.slot(), DEFAULT_SLOT);
        assert_eq!(store.read().expect("read"), None);
    }

    #[rstest]
    #[case(WriteDurability::BestEffort)]
    #[case(WriteDurability::Durable)]
    fn write_then_read_returns_the_blob(#[case] durability: WriteDurability) {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut store = FileStore::new(dir.path().join("nested")).with_durability(durability);

        store.write("[1]").expect("first write");
        store.write("[2]").expect("overwrite");

        assert_eq!(store.read().expect("read").as_deref(), Some("[2]"));
        let path = store.slot_path().expect("path");
        assert_eq!(path, dir.path().join("nested").join("mindmap.json"));
        assert_eq!(fs::read_to_string(path).expect("file"), "[2]");
    }

    #[test]
    fn write_leaves_no_temp_files_behind() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut store = FileStore::new(dir.path()).with_slot("work");
        store.write("[]").expect("write");

        let names: Vec<String> = fs::read_dir(dir.path())
            .expect("read_dir")
            .map(|entry| entry.expect("entry").file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["work.json".to_owned()]);
    }

    #[rstest]
    #[case("")]
    #[case("../escape")]
    #[case("a/b")]
    #[case("with space")]
    fn invalid_slot_names_are_refused(#[case] slot: &str) {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut store = FileStore::new(dir.path()).with_slot(slot);
        assert!(matches!(store.read(), Err(StoreError::InvalidSlot(_))));
        assert!(matches!(store.write("[]"), Err(StoreError::InvalidSlot(_))));
    }

    #[test]
    fn unreadable_slot_reports_io_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = FileStore::new(dir.path());
        fs::create_dir(store.slot_path().expect("path")).expect("dir in place of file");
        assert!(matches!(store.read(), Err(StoreError::Io { .. })));
    }

    #[test]
    fn failed_replace_reports_the_slot_path_and_removes_the_temp_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut store = FileStore::new(dir.path());
        let slot_path = store.slot_path().expect("path");
        fs::create_dir(&slot_path).expect("dir in place of file");
        fs::write(slot_path.join("keep"), "x").expect("occupy dir");

        match store.write("[]") {
            Err(StoreError::Io { path, .. }) => assert_eq!(path, slot_path),
            other => panic!("expected io error, got {other:?}"),
        }
        let leftovers = fs::read_dir(dir.path())
            .expect("read_dir")
            .filter(|entry| {
                let name = entry.as_ref().expect("entry").file_name();
                name.to_string_lossy().starts_with(".mindtree.tmp.")
            })
            .count();
        assert_eq!(leftovers, 0);
    }

    #[test]
    fn read_only_memory_store_rejects_writes() {
        let mut store = MemoryStore::with_blob("[]");
        store.set_read_only(true);
        assert!(store.write("[1]").is_err());
        assert_eq!(store.blob(), Some("[]"));
    }
}
