//! Split-point (common ancestor) search for merges
//!
//! The search runs in two phases over the commit DAG:
//!
//! 1. Collect *all* ancestors of the target branch tip with a depth-first
//!    traversal (explicit stack). Merge commits contribute both parents, so
//!    this is the full reachable set, not just the first-parent chain.
//! 2. Walk the current branch tip's ancestry breadth-first (explicit queue),
//!    parent-one enqueued before parent-two, and return the first commit
//!    already present in the target's ancestor set.
//!
//! The phase-2 visitation order is part of the observable behavior: on some
//! diamond topologies the returned commit is the first common ancestor this
//! traversal reaches, which is not always the graph-theoretic lowest one.
//! Callers rely on that exact order, so no general LCA algorithm is
//! substituted here.

use crate::artifacts::objects::object_id::ObjectId;
use std::collections::{HashSet, VecDeque};

/// Finds the split point between two commits
///
/// Generic over a loader returning the parent IDs of a commit so the search
/// can run against the object database or an in-memory graph in tests.
pub struct SplitFinder<ParentsFn>
where
    ParentsFn: Fn(&ObjectId) -> anyhow::Result<Vec<ObjectId>>,
{
    parents_of: ParentsFn,
}

impl<ParentsFn> SplitFinder<ParentsFn>
where
    ParentsFn: Fn(&ObjectId) -> anyhow::Result<Vec<ObjectId>>,
{
    pub fn new(parents_of: ParentsFn) -> Self {
        SplitFinder { parents_of }
    }

    /// Find the split point of `current` and `target`
    ///
    /// Both tips descend from the single root commit, so a common ancestor
    /// always exists.
    pub fn find_split_point(
        &self,
        current: &ObjectId,
        target: &ObjectId,
    ) -> anyhow::Result<ObjectId> {
        let target_ancestors = self.collect_ancestors(target)?;

        let mut queue = VecDeque::new();
        let mut enqueued = HashSet::new();
        queue.push_back(current.clone());
        enqueued.insert(current.clone());

        while let Some(oid) = queue.pop_front() {
            if target_ancestors.contains(&oid) {
                return Ok(oid);
            }

            for parent in (self.parents_of)(&oid)? {
                if enqueued.insert(parent.clone()) {
                    queue.push_back(parent);
                }
            }
        }

        anyhow::bail!(
            "no common ancestor between {} and {}",
            current.to_short_oid(),
            target.to_short_oid()
        )
    }

    /// Depth-first collection of every ancestor of `tip` (tip included)
    fn collect_ancestors(&self, tip: &ObjectId) -> anyhow::Result<HashSet<ObjectId>> {
        let mut visited = HashSet::new();
        let mut stack = vec![tip.clone()];

        while let Some(oid) = stack.pop() {
            if !visited.insert(oid.clone()) {
                continue;
            }

            for parent in (self.parents_of)(&oid)? {
                stack.push(parent);
            }
        }

        Ok(visited)
    }
}
