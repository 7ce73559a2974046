//! Gitlet command implementations
//!
//! All user-facing commands live under `porcelain`, one file per command.
//! Each command loads the state it needs at the start, prints its fixed
//! messages through the repository writer and writes mutated state back at
//! the end. Recoverable failures print exactly one explanatory line and
//! leave repository state untouched; only storage/IO failures propagate.

pub mod porcelain;
