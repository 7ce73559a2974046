//! Gitlet commit object
//!
//! Commits are immutable snapshot records. They contain:
//! - A log message
//! - A timestamp string (the fixed epoch string for the root commit)
//! - Zero, one or two parent commit IDs (two only for merge commits)
//! - A file map from path to blob hash covering every tracked file
//!
//! ## Format
//!
//! On disk (zlib-compressed by the database):
//! ```text
//! timestamp <timestamp>
//! parent <parent-sha>
//! blob <blob-sha> <path>
//!
//! <commit message>
//! ```
//!
//! The commit's identity is the SHA-1 hash of this record, so it is a pure
//! function of the commit's content. Two commits with identical message,
//! parents, timestamp and file map collide; accepted behavior, since
//! timestamps differ for non-root commits in practice.

use crate::artifacts::objects::OBJECT_ID_LENGTH;
use crate::artifacts::objects::object::Unpackable;
use crate::artifacts::objects::object::{Object, Packable};
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use bytes::Bytes;
use std::collections::BTreeMap;
use std::io::{BufRead, Write};
use std::path::PathBuf;

/// Snapshot of all tracked files at one commit: path → blob hash.
///
/// Ordered so the serialized record (and therefore the commit hash) is
/// deterministic.
pub type FileMap = BTreeMap<PathBuf, ObjectId>;

/// Timestamp recorded by the root commit
pub const ROOT_TIMESTAMP: &str = "Thu Jan 1 00:00:00 1970 +0000";

/// Wall-clock format for every non-root commit
const TIMESTAMP_FORMAT: &str = "%a %b %d %H:%M:%S %Y %z";

/// Gitlet commit object
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Commit {
    /// Commit message
    message: String,
    /// Timestamp string as recorded at creation time
    timestamp: String,
    /// Parent commit IDs: empty for the root commit, two for merge commits
    parents: Vec<ObjectId>,
    /// Tracked files at this commit
    files: FileMap,
}

impl Commit {
    /// Create a new commit stamped with the current wall-clock time
    ///
    /// A commit without parents is the root commit and receives the fixed
    /// epoch timestamp instead.
    pub fn new(message: String, parents: Vec<ObjectId>, files: FileMap) -> Self {
        let timestamp = if parents.is_empty() {
            ROOT_TIMESTAMP.to_string()
        } else {
            chrono::Local::now()
                .fixed_offset()
                .format(TIMESTAMP_FORMAT)
                .to_string()
        };

        Self::new_with_timestamp(message, timestamp, parents, files)
    }

    /// Create a commit with an explicit timestamp string
    pub fn new_with_timestamp(
        message: String,
        timestamp: String,
        parents: Vec<ObjectId>,
        files: FileMap,
    ) -> Self {
        Commit {
            message,
            timestamp,
            parents,
            files,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    pub fn parent_one(&self) -> Option<&ObjectId> {
        self.parents.first()
    }

    pub fn parent_two(&self) -> Option<&ObjectId> {
        self.parents.get(1)
    }

    pub fn parents(&self) -> &[ObjectId] {
        &self.parents
    }

    pub fn files(&self) -> &FileMap {
        &self.files
    }
}

impl Packable for Commit {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let mut record = vec![];

        record.push(format!("timestamp {}", self.timestamp));
        for parent in &self.parents {
            record.push(format!("parent {}", parent.as_ref()));
        }
        for (path, oid) in &self.files {
            record.push(format!("blob {} {}", oid.as_ref(), path.display()));
        }
        record.push(String::new());
        record.push(self.message.to_string());

        let record = record.join("\n");

        let mut commit_bytes = Vec::new();
        commit_bytes.write_all(record.as_bytes())?;

        Ok(Bytes::from(commit_bytes))
    }
}

impl Unpackable for Commit {
    fn deserialize(reader: impl BufRead) -> anyhow::Result<Self> {
        let content = reader
            .bytes()
            .collect::<Result<Vec<u8>, std::io::Error>>()?;

        let content = String::from_utf8(content)?;
        let mut lines = content.lines();

        let timestamp_line = lines
            .next()
            .context("Invalid commit record: missing timestamp line")?;
        let timestamp = timestamp_line
            .strip_prefix("timestamp ")
            .context("Invalid commit record: invalid timestamp line")?
            .to_string();

        let mut parents = Vec::new();
        let mut files = FileMap::new();

        let mut next_line = lines
            .next()
            .context("Invalid commit record: missing separator line")?;

        while let Some(parent_oid) = next_line.strip_prefix("parent ") {
            parents.push(ObjectId::try_parse(parent_oid.to_string())?);

            next_line = lines
                .next()
                .context("Invalid commit record: missing separator line")?;
        }

        while let Some(blob_line) = next_line.strip_prefix("blob ") {
            // fixed-width oid, then a single space, then the path
            if blob_line.len() < OBJECT_ID_LENGTH + 2 {
                anyhow::bail!("Invalid commit record: invalid blob line");
            }
            let oid = ObjectId::try_parse(blob_line[..OBJECT_ID_LENGTH].to_string())?;
            let path = PathBuf::from(&blob_line[OBJECT_ID_LENGTH + 1..]);
            files.insert(path, oid);

            next_line = lines
                .next()
                .context("Invalid commit record: missing separator line")?;
        }

        if !next_line.is_empty() {
            anyhow::bail!("Invalid commit record: missing separator line");
        }

        let message = lines.collect::<Vec<&str>>().join("\n");
        Ok(Self::new_with_timestamp(message, timestamp, parents, files))
    }
}

impl Object for Commit {}
