use crate::areas::refs::DEFAULT_BRANCH;
use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::{Commit, FileMap};
use anyhow::Context;
use std::fs;
use std::io::Write;

impl Repository {
    /// Initialize a new repository with its root commit
    ///
    /// The root commit ("initial commit", fixed epoch timestamp, no tracked
    /// files) is shared by construction between all repositories, the
    /// `master` branch points at it and becomes HEAD.
    pub async fn init(&mut self) -> anyhow::Result<()> {
        if self.is_initialized() {
            writeln!(
                self.writer(),
                "A Gitlet version-control system already exists in the current directory."
            )?;
            return Ok(());
        }

        fs::create_dir_all(self.database().commits_path())
            .context("Failed to create .gitlet/commits directory")?;
        fs::create_dir_all(self.database().blobs_path())
            .context("Failed to create .gitlet/blobs directory")?;
        fs::create_dir_all(self.refs().branches_path())
            .context("Failed to create .gitlet/branches directory")?;

        let root_commit = Commit::new("initial commit".to_string(), vec![], FileMap::new());
        let root_oid = self.database().store_commit(&root_commit)?;

        self.refs()
            .update_ref(DEFAULT_BRANCH, &root_oid)
            .context("Failed to create the default branch")?;
        self.refs()
            .set_head(DEFAULT_BRANCH)
            .context("Failed to create the HEAD reference")?;

        let index = self.index();
        let mut index = index.lock().await;
        index.write_updates()?;

        Ok(())
    }
}
