//! Gitlet data structures and algorithms
//!
//! - `objects`: the object model (blob, commit, object ids)
//! - `index`: staging index file format (header, entries, checksum)
//! - `checkout`: working-tree migration between two snapshots
//! - `merge`: split-point search and three-way resolution
//! - `diff`: line-diff engine (Myers' diff) and hunk grouping

pub mod checkout;
pub mod diff;
pub mod index;
pub mod merge;
pub mod objects;
