//! Branch references and HEAD
//!
//! Branches are human-readable names pointing to commits: one plain-text
//! file per branch under `.gitlet/branches/<name>` holding the tip's hash.
//! HEAD is a single file holding the *name* of the currently active branch —
//! gitlet has no detached-HEAD state, the active branch is always named.

use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use derive_new::new;
use file_guard::Lock;
use std::io::Write;
use std::ops::DerefMut;
use std::path::Path;
use walkdir::WalkDir;

/// Name of the branch created by `init` and recorded as the initial HEAD
pub const DEFAULT_BRANCH: &str = "master";

/// Reference manager
///
/// Reads and writes branch tip files and the HEAD file, with file locking
/// around every write.
#[derive(Debug, new)]
pub struct Refs {
    /// Path to the repository directory (`.gitlet`)
    path: Box<Path>,
}

impl Refs {
    /// Read the name of the currently active branch
    pub fn read_head(&self) -> anyhow::Result<String> {
        let head_path = self.head_path();
        let content = std::fs::read_to_string(&head_path)
            .with_context(|| format!("failed to read HEAD file at {:?}", head_path))?;

        Ok(content.trim().to_string())
    }

    /// Switch the active branch
    pub fn set_head(&self, branch_name: &str) -> anyhow::Result<()> {
        self.update_ref_file(self.head_path(), branch_name.to_string())
    }

    /// Read the tip commit of a branch, if the branch exists
    pub fn read_ref(&self, branch_name: &str) -> anyhow::Result<Option<ObjectId>> {
        let branch_path = self.branch_path(branch_name);
        if !branch_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&branch_path)
            .with_context(|| format!("failed to read ref file at {:?}", branch_path))?;

        Ok(Some(ObjectId::try_parse(content.trim().to_string())?))
    }

    /// Point a branch at a commit, creating the ref file if needed
    pub fn update_ref(&self, branch_name: &str, oid: &ObjectId) -> anyhow::Result<()> {
        self.update_ref_file(self.branch_path(branch_name), oid.as_ref().to_string())
    }

    pub fn branch_exists(&self, branch_name: &str) -> bool {
        self.branch_path(branch_name).exists()
    }

    pub fn delete_branch(&self, branch_name: &str) -> anyhow::Result<()> {
        let branch_path = self.branch_path(branch_name);

        std::fs::remove_file(&branch_path)
            .with_context(|| format!("failed to delete branch file at {:?}", branch_path))
    }

    /// List every branch name, sorted
    pub fn list_branches(&self) -> anyhow::Result<Vec<String>> {
        let mut branches = WalkDir::new(self.branches_path())
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| {
                if entry.path().is_file() {
                    Some(entry.file_name().to_string_lossy().to_string())
                } else {
                    None
                }
            })
            .collect::<Vec<_>>();

        branches.sort();
        Ok(branches)
    }

    fn update_ref_file(&self, path: Box<Path>, raw_ref: String) -> anyhow::Result<()> {
        std::fs::create_dir_all(path.parent().with_context(|| {
            format!(
                "failed to create parent directories for ref file at {:?}",
                path
            )
        })?)?;

        let mut ref_file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path.clone())
            .with_context(|| format!("failed to open ref file at {:?}", path))?;
        let mut lock = file_guard::lock(&mut ref_file, Lock::Exclusive, 0, 1)?;
        lock.deref_mut().write_all(raw_ref.as_bytes())?;

        Ok(())
    }

    fn branch_path(&self, branch_name: &str) -> Box<Path> {
        self.branches_path().join(branch_name).into_boxed_path()
    }

    pub fn head_path(&self) -> Box<Path> {
        self.path.join("HEAD").into_boxed_path()
    }

    pub fn branches_path(&self) -> Box<Path> {
        self.path.join("branches").into_boxed_path()
    }
}
