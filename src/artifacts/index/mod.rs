//! Staging index file format
//!
//! The staging index tracks pending file additions and removals relative to
//! the current commit. It is persisted as a single binary file:
//!
//! ```text
//! Header (16 bytes):
//!   - Signature: "GLET" (4 bytes)
//!   - Version: 1 (4 bytes)
//!   - Staged-addition count (4 bytes)
//!   - Staged-removal count (4 bytes)
//!
//! Entries (variable length, additions then removals):
//!   - Each entry padded to 8-byte alignment
//!   - Contains the blob hash and the path
//!
//! Checksum (20 bytes):
//!   - SHA-1 hash of all preceding bytes
//! ```

pub mod checksum;
pub mod stage_entry;
pub mod stage_header;

/// Size of SHA-1 checksum in bytes
pub const CHECKSUM_SIZE: usize = 20;

/// Size of the index header in bytes
pub const HEADER_SIZE: usize = 16; // 4 marker, 4 version, 4 added, 4 removed

/// Magic signature identifying staging index files
pub const SIGNATURE: &str = "GLET";

/// Staging index file format version
pub const VERSION: u32 = 1;

/// Smallest possible entry size (oid + path length + one path byte + NUL, padded)
pub const ENTRY_MIN_SIZE: usize = 24;

/// Entries are padded to multiples of this block size
pub const ENTRY_BLOCK: usize = 8;
