use crate::areas::repository::Repository;
use crate::artifacts::checkout::migration::Migration;
use crate::artifacts::objects::commit::Commit;
use std::io::Write;
use std::path::{Path, PathBuf};

impl Repository {
    /// `checkout -- <file>`: restore one file from the head commit
    pub async fn checkout_file(&mut self, file: &str) -> anyhow::Result<()> {
        let head = self.head_commit()?;
        self.restore_file_from(&head, file)
    }

    /// `checkout <commit> -- <file>`: restore one file from any commit
    ///
    /// The commit may be given as an unambiguous hash prefix. No
    /// untracked-file check is performed at file granularity.
    pub async fn checkout_commit_file(&mut self, commit_id: &str, file: &str) -> anyhow::Result<()> {
        let Some(oid) = self.database().resolve_commit_id(commit_id)? else {
            writeln!(self.writer(), "No commit with that id exists.")?;
            return Ok(());
        };

        let commit = self.database().load_commit(&oid)?;
        self.restore_file_from(&commit, file)
    }

    /// `checkout <branch>`: switch the working tree to another branch's tip
    pub async fn checkout_branch(&mut self, branch_name: &str) -> anyhow::Result<()> {
        if !self.refs().branch_exists(branch_name) {
            writeln!(self.writer(), "No such branch exists.")?;
            return Ok(());
        }

        if self.refs().read_head()? == branch_name {
            writeln!(self.writer(), "No need to checkout the current branch.")?;
            return Ok(());
        }

        let target_oid = self
            .refs()
            .read_ref(branch_name)?
            .ok_or_else(|| anyhow::anyhow!("branch {} has no recorded commit", branch_name))?;
        let target = self.database().load_commit(&target_oid)?;
        let current = self.head_commit()?;

        if self.migrate_working_tree(&current, &target).await? {
            self.refs().set_head(branch_name)?;
        }

        Ok(())
    }

    /// `reset <commit>`: move the active branch to an arbitrary commit
    ///
    /// Checks out the commit's full snapshot, then points the current branch
    /// at the resolved hash. Accepts hash prefixes like file checkout does.
    pub async fn reset(&mut self, commit_id: &str) -> anyhow::Result<()> {
        let Some(oid) = self.database().resolve_commit_id(commit_id)? else {
            writeln!(self.writer(), "No commit with that id exists.")?;
            return Ok(());
        };

        let target = self.database().load_commit(&oid)?;
        let current = self.head_commit()?;

        if self.migrate_working_tree(&current, &target).await? {
            let branch = self.refs().read_head()?;
            self.refs().update_ref(&branch, &oid)?;
        }

        Ok(())
    }

    /// Overwrite the working tree with `target`'s snapshot and clear the
    /// staging index; aborts without changes on the untracked-file hazard
    ///
    /// Returns whether the migration was applied.
    async fn migrate_working_tree(
        &mut self,
        current: &Commit,
        target: &Commit,
    ) -> anyhow::Result<bool> {
        if self
            .workspace()
            .untracked_file_in_the_way(current.files(), target.files())?
        {
            writeln!(
                self.writer(),
                "There is an untracked file in the way; delete it, or add and commit it first."
            )?;
            return Ok(false);
        }

        Migration::between(current.files(), target.files())
            .apply(self.workspace(), self.database())?;

        let index = self.index();
        let mut index = index.lock().await;
        index.rehydrate()?;
        index.clear();
        index.write_updates()?;

        Ok(true)
    }

    fn restore_file_from(&mut self, commit: &Commit, file: &str) -> anyhow::Result<()> {
        let path = PathBuf::from(file);

        let Some(blob_oid) = commit.files().get(&path) else {
            writeln!(self.writer(), "File does not exist in that commit.")?;
            return Ok(());
        };

        let blob = self.database().load_blob(blob_oid)?;
        self.workspace().write_file(Path::new(file), blob.content())?;

        Ok(())
    }
}
