//! Gitlet: a local, single-user version-control engine.
//!
//! A content-addressed object store (commits and blobs keyed by SHA-1 of
//! their content) layered with a mutable staging index, named branch
//! references and a commit graph supporting divergence and three-way merge.
//!
//! The crate is organized into three layers:
//!
//! - `areas`: the persistent repository areas (object database, staging
//!   index, references, workspace) plus the `Repository` context tying them
//!   together
//! - `artifacts`: data structures and algorithms (object model, index file
//!   format, checkout migration, split-point search, merge resolution,
//!   line diffing)
//! - `commands`: the user-facing porcelain commands, one file each

pub mod areas;
pub mod artifacts;
pub mod commands;
