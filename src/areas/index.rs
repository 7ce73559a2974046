//! Staging index (staging area)
//!
//! The index tracks what the next commit will change relative to the current
//! commit: pending additions (path → new blob hash) and pending removals
//! (path → the blob hash being removed, kept for bookkeeping). A path lives
//! in at most one of the two sets at a time.
//!
//! Once staged, a hash is fixed even if the working file changes again; the
//! index is the sole source of "what will change" independent of the working
//! tree's current bytes.
//!
//! Persistence uses the binary format described in `artifacts::index`:
//! header, 8-byte-aligned entries (additions then removals), SHA-1 checksum.

use crate::artifacts::index::checksum::Checksum;
use crate::artifacts::index::stage_entry::StageEntry;
use crate::artifacts::index::stage_header::StageHeader;
use crate::artifacts::index::{ENTRY_BLOCK, ENTRY_MIN_SIZE, HEADER_SIZE, SIGNATURE, VERSION};
use crate::artifacts::objects::object::{Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::anyhow;
use bytes::Bytes;
use std::collections::BTreeMap;
use std::ops::DerefMut;
use std::path::{Path, PathBuf};

/// Staging index
#[derive(Debug, Clone)]
pub struct Index {
    /// Path to the index file (`.gitlet/index`)
    path: Box<Path>,
    /// Pending additions: path → blob hash to record in the next commit
    added: BTreeMap<PathBuf, ObjectId>,
    /// Pending removals: path → the blob hash being removed
    removed: BTreeMap<PathBuf, ObjectId>,
    /// Flag indicating if the index has been modified since loading
    changed: bool,
}

impl Index {
    pub fn new(path: Box<Path>) -> Self {
        Index {
            path,
            added: BTreeMap::new(),
            removed: BTreeMap::new(),
            changed: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The index is empty exactly when no commit-worthy change is pending
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }

    pub fn added(&self) -> &BTreeMap<PathBuf, ObjectId> {
        &self.added
    }

    pub fn removed(&self) -> &BTreeMap<PathBuf, ObjectId> {
        &self.removed
    }

    /// Stage a path for addition, clearing any pending removal for it
    pub fn stage_add(&mut self, path: PathBuf, oid: ObjectId) {
        self.removed.remove(&path);
        self.added.insert(path, oid);
        self.changed = true;
    }

    /// Stage a path for removal, clearing any pending addition for it
    pub fn stage_remove(&mut self, path: PathBuf, oid: ObjectId) {
        self.added.remove(&path);
        self.removed.insert(path, oid);
        self.changed = true;
    }

    /// Drop a pending addition
    pub fn unstage(&mut self, path: &Path) {
        if self.added.remove(path).is_some() {
            self.changed = true;
        }
    }

    /// Drop a pending removal
    pub fn clear_removal(&mut self, path: &Path) {
        if self.removed.remove(path).is_some() {
            self.changed = true;
        }
    }

    /// Atomically forget every pending change
    pub fn clear(&mut self) {
        self.added.clear();
        self.removed.clear();
        self.changed = true;
    }

    fn reset(&mut self) {
        self.added.clear();
        self.removed.clear();
        self.changed = false;
    }

    /// Load the index from disk
    ///
    /// Parses the header and entries and verifies the checksum. A missing or
    /// empty file leaves the index empty.
    ///
    /// # Locking
    ///
    /// Acquires a shared lock on the index file during reading.
    pub fn rehydrate(&mut self) -> anyhow::Result<()> {
        if !self.path().exists() {
            self.reset();
            // create the index file
            std::fs::File::create(self.path())?;
        }

        let mut index_file = std::fs::OpenOptions::new().read(true).open(self.path())?;
        let mut lock = file_guard::lock(&mut index_file, file_guard::Lock::Shared, 0, 1)?;

        self.reset();

        // if the index file is empty, return early
        if lock.deref_mut().metadata()?.len() == 0 {
            return Ok(());
        }

        let mut reader = Checksum::new(lock);
        let (added_count, removed_count) = self.parse_header(&mut reader)?;
        self.parse_entries(added_count, removed_count, &mut reader)?;

        reader.verify()
    }

    fn parse_header(&self, reader: &mut Checksum) -> anyhow::Result<(u32, u32)> {
        let header_bytes = reader.read(HEADER_SIZE)?;
        let header_reader = std::io::Cursor::new(header_bytes);
        let header = StageHeader::deserialize(header_reader)?;

        if header.marker != SIGNATURE {
            return Err(anyhow!("Invalid index file signature"));
        }

        if header.version != VERSION {
            return Err(anyhow!(
                "Unsupported index file version: {}",
                header.version
            ));
        }

        Ok((header.added_count, header.removed_count))
    }

    /// Parse all entries from the index file
    ///
    /// Entries are variable-length with 8-byte alignment; the padded tail is
    /// always NUL, so blocks are read until one ends in NUL.
    fn parse_entries(
        &mut self,
        added_count: u32,
        removed_count: u32,
        reader: &mut Checksum,
    ) -> anyhow::Result<()> {
        for slot in 0..added_count + removed_count {
            let entry = Self::parse_entry(reader)?;

            if slot < added_count {
                self.added.insert(entry.path, entry.oid);
            } else {
                self.removed.insert(entry.path, entry.oid);
            }
        }

        Ok(())
    }

    fn parse_entry(reader: &mut Checksum) -> anyhow::Result<StageEntry> {
        let entry_bytes = reader.read(ENTRY_MIN_SIZE)?;
        let mut entry_bytes = entry_bytes.to_vec();

        while entry_bytes[entry_bytes.len() - 1] != 0 {
            entry_bytes = [entry_bytes, reader.read(ENTRY_BLOCK)?.to_vec()].concat();
        }

        let entry_bytes = Bytes::from(entry_bytes);
        let entry_reader = std::io::Cursor::new(entry_bytes);

        StageEntry::deserialize(entry_reader)
    }

    /// Write the index back to disk
    ///
    /// # Locking
    ///
    /// Acquires an exclusive lock on the index file during writing.
    pub fn write_updates(&mut self) -> anyhow::Result<()> {
        let mut index_file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(self.path())?;
        let lock = file_guard::lock(&mut index_file, file_guard::Lock::Exclusive, 0, 1)?;

        let mut writer = Checksum::new(lock);

        let header = StageHeader::new(
            String::from(SIGNATURE),
            VERSION,
            self.added.len() as u32,
            self.removed.len() as u32,
        );
        writer.write(&header.serialize()?)?;

        for (path, oid) in self.added.iter().chain(self.removed.iter()) {
            let entry = StageEntry::new(path.clone(), oid.clone());
            writer.write(&entry.serialize()?)?;
        }

        writer.write_checksum()?;
        self.changed = false;

        Ok(())
    }
}
