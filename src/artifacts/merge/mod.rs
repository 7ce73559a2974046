//! Merge algorithms
//!
//! - `split_finder`: locates the split point (common ancestor) of two
//!   branch tips in the commit DAG
//! - `resolution`: per-file three-way resolution against the split point,
//!   including conflict-marker rendering

pub mod resolution;
pub mod split_finder;
