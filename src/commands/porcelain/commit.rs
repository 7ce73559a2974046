use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use std::io::Write;

impl Repository {
    /// Record the staged changes as a new commit on the active branch
    pub async fn commit(&mut self, message: &str) -> anyhow::Result<()> {
        self.write_commit(message, None).await
    }

    /// Shared commit engine, also driven by `merge` with a second parent
    ///
    /// The new file map is the head commit's map with every staged addition
    /// overlaid and every staged removal deleted. Writes happen in a fixed
    /// order: commit object, then branch reference, then index clear — a
    /// crash in between leaves intermediate state (no transaction spans the
    /// three files).
    pub(crate) async fn write_commit(
        &mut self,
        message: &str,
        parent_two: Option<ObjectId>,
    ) -> anyhow::Result<()> {
        if message.is_empty() {
            writeln!(self.writer(), "Please enter a commit message.")?;
            return Ok(());
        }

        let index = self.index();
        let mut index = index.lock().await;
        index.rehydrate()?;

        if index.is_empty() {
            writeln!(self.writer(), "No changes added to the commit.")?;
            return Ok(());
        }

        let head = self.head_commit()?;

        let mut files = head.files().clone();
        for (path, oid) in index.added() {
            files.insert(path.clone(), oid.clone());
        }
        for path in index.removed().keys() {
            files.remove(path);
        }

        let mut parents = vec![head.object_id()?];
        parents.extend(parent_two);

        let commit = Commit::new(message.to_string(), parents, files);
        let commit_oid = self.database().store_commit(&commit)?;

        let branch = self.refs().read_head()?;
        self.refs().update_ref(&branch, &commit_oid)?;

        index.clear();
        index.write_updates()?;

        Ok(())
    }
}
