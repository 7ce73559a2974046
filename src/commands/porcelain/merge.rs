use crate::areas::repository::Repository;
use crate::artifacts::merge::resolution::{self, MergeAction};
use crate::artifacts::merge::split_finder::SplitFinder;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use std::io::Write;

impl Repository {
    /// Merge another branch into the current one
    ///
    /// Locates the split point of the two tips, resolves every file
    /// three-way against it, stages the results (writing conflict markers
    /// where both sides disagree) and records a two-parent merge commit.
    /// A merge commit is produced even when conflicts occurred.
    pub async fn merge(&mut self, branch_name: &str) -> anyhow::Result<()> {
        {
            let index = self.index();
            let mut index = index.lock().await;
            index.rehydrate()?;

            if !index.is_empty() {
                writeln!(self.writer(), "You have uncommitted changes.")?;
                return Ok(());
            }
        }

        if !self.refs().branch_exists(branch_name) {
            writeln!(self.writer(), "A branch with that name does not exist.")?;
            return Ok(());
        }

        let current_branch = self.refs().read_head()?;
        if current_branch == branch_name {
            writeln!(self.writer(), "Cannot merge a branch with itself.")?;
            return Ok(());
        }

        let current = self.head_commit()?;
        let current_oid = current.object_id()?;
        let target_oid = self
            .refs()
            .read_ref(branch_name)?
            .ok_or_else(|| anyhow::anyhow!("branch {} has no recorded commit", branch_name))?;
        let target = self.database().load_commit(&target_oid)?;

        if self
            .workspace()
            .untracked_file_in_the_way(current.files(), target.files())?
        {
            writeln!(
                self.writer(),
                "There is an untracked file in the way; delete it, or add and commit it first."
            )?;
            return Ok(());
        }

        let split_oid = {
            let database = self.database();
            let finder = SplitFinder::new(|oid: &ObjectId| {
                Ok(database.load_commit(oid)?.parents().to_vec())
            });

            finder.find_split_point(&current_oid, &target_oid)?
        };

        if split_oid == current_oid {
            // no divergence: the target strictly descends from the head
            self.checkout_branch(branch_name).await?;
            writeln!(self.writer(), "Current branch fast-forwarded.")?;
            return Ok(());
        }

        if split_oid == target_oid {
            writeln!(
                self.writer(),
                "Given branch is an ancestor of the current branch."
            )?;
            return Ok(());
        }

        let split = self.database().load_commit(&split_oid)?;
        let actions = resolution::resolve(split.files(), current.files(), target.files());

        let mut conflicted = false;
        {
            let index = self.index();
            let mut index = index.lock().await;
            index.rehydrate()?;

            for (path, action) in actions {
                match action {
                    MergeAction::TakeTarget(blob_oid) => {
                        let blob = self.database().load_blob(&blob_oid)?;
                        self.workspace().write_file(&path, blob.content())?;
                        index.stage_add(path, blob_oid);
                    }
                    MergeAction::Remove => {
                        let blob_oid = current.files().get(&path).cloned().ok_or_else(|| {
                            anyhow::anyhow!("file {} is not tracked by HEAD", path.display())
                        })?;

                        index.stage_remove(path.clone(), blob_oid);
                        if self.workspace().file_exists(&path) {
                            self.workspace().remove_file(&path)?;
                        }
                    }
                    MergeAction::Conflict {
                        current: current_oid,
                        target: target_oid,
                    } => {
                        let current_content = match current_oid {
                            Some(oid) => self.database().load_blob(&oid)?.into_content(),
                            None => String::new(),
                        };
                        let target_content = match target_oid {
                            Some(oid) => self.database().load_blob(&oid)?.into_content(),
                            None => String::new(),
                        };

                        let content =
                            resolution::conflict_file_content(&current_content, &target_content);
                        self.workspace().write_file(&path, &content)?;

                        let blob_oid = self.database().store_blob(&Blob::new(content))?;
                        index.stage_add(path, blob_oid);
                        conflicted = true;
                    }
                }
            }

            index.write_updates()?;
        }

        if conflicted {
            writeln!(self.writer(), "Encountered a merge conflict.")?;
            self.write_commit("Encountered a merge conflict.", Some(target_oid))
                .await
        } else {
            let message = format!("Merged {} into {}.", branch_name, current_branch);
            self.write_commit(&message, Some(target_oid)).await
        }
    }
}
