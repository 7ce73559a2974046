use crate::areas::repository::Repository;
use std::io::Write;
use std::path::PathBuf;

impl Repository {
    /// Unstage a pending addition, or stage a tracked file's removal
    ///
    /// Removing a tracked file also deletes it from the working tree.
    pub async fn rm(&mut self, file: &str) -> anyhow::Result<()> {
        let index = self.index();
        let mut index = index.lock().await;
        index.rehydrate()?;

        let head = self.head_commit()?;
        let path = PathBuf::from(file);

        if index.added().contains_key(&path) {
            index.unstage(&path);
        } else if let Some(oid) = head.files().get(&path) {
            index.stage_remove(path.clone(), oid.clone());
            if self.workspace().file_exists(&path) {
                self.workspace().remove_file(&path)?;
            }
        } else {
            writeln!(self.writer(), "No reason to remove the file.")?;
            return Ok(());
        }

        index.write_updates()?;

        Ok(())
    }
}
