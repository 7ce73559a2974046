//! Gitlet object types and operations
//!
//! All recorded content lives in objects identified by SHA-1 hashes:
//!
//! - **Blob**: one file version's raw bytes, keyed by the hash of those bytes
//! - **Commit**: a snapshot record (message, timestamp, parent hash(es),
//!   path → blob-hash map), keyed by the hash of its serialized form
//!
//! Objects are immutable: created once, never mutated, never deleted.

pub mod blob;
pub mod commit;
pub mod object;
pub mod object_id;

/// Length of a SHA-1 hash in hexadecimal format
pub const OBJECT_ID_LENGTH: usize = 40;
