use crate::areas::repository::Repository;
use crate::artifacts::objects::object::Object;
use std::io::Write;
use std::path::PathBuf;

impl Repository {
    /// Stage one file for the next commit
    ///
    /// The working content is re-checked against the head commit before
    /// staging: content whose hash already matches the recorded version is
    /// not staged (a pending removal for the path is dropped instead).
    pub async fn add(&mut self, file: &str) -> anyhow::Result<()> {
        let path = PathBuf::from(file);
        if !self.workspace().file_exists(&path) {
            writeln!(self.writer(), "File does not exist.")?;
            return Ok(());
        }

        let index = self.index();
        let mut index = index.lock().await;
        index.rehydrate()?;

        let head = self.head_commit()?;
        let blob = self.workspace().parse_blob(&path)?;
        let blob_oid = blob.object_id()?;

        if head.files().get(&path) == Some(&blob_oid) {
            // already recorded as-is: only a pending removal needs undoing
            index.clear_removal(&path);
        } else {
            index.clear_removal(&path);
            self.database().store_blob(&blob)?;
            index.stage_add(path, blob_oid);
        }

        index.write_updates()?;

        Ok(())
    }
}
