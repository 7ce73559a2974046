use crate::areas::repository::Repository;
use crate::artifacts::objects::object::Object;
use std::collections::{BTreeMap, BTreeSet};
use std::io::Write;
use std::path::PathBuf;

// Terminology:
// - staged files: pending additions in the index
// - removed files: pending removals in the index
// - modifications not staged: working content disagreeing with the staged or
//   committed hash, or tracked files missing from disk
// - untracked files: on disk, neither staged for addition nor tracked by HEAD
impl Repository {
    /// Show branches, staged changes, unstaged modifications and untracked
    /// files, every section sorted
    pub async fn status(&mut self) -> anyhow::Result<()> {
        let index = self.index();
        let mut index = index.lock().await;
        index.rehydrate()?;

        let head_branch = self.refs().read_head()?;
        let head = self.head_commit()?;
        let disk_files = self.workspace().list_files()?;

        writeln!(self.writer(), "=== Branches ===")?;
        for branch in self.refs().list_branches()? {
            if branch == head_branch {
                writeln!(self.writer(), "*{}", branch)?;
            } else {
                writeln!(self.writer(), "{}", branch)?;
            }
        }
        writeln!(self.writer())?;

        writeln!(self.writer(), "=== Staged Files ===")?;
        for path in index.added().keys() {
            writeln!(self.writer(), "{}", path.display())?;
        }
        writeln!(self.writer())?;

        writeln!(self.writer(), "=== Removed Files ===")?;
        for path in index.removed().keys() {
            writeln!(self.writer(), "{}", path.display())?;
        }
        writeln!(self.writer())?;

        let mut unstaged = BTreeMap::<PathBuf, &str>::new();
        let disk_set = disk_files.iter().cloned().collect::<BTreeSet<_>>();

        for path in &disk_files {
            let disk_oid = self.workspace().parse_blob(path)?.object_id()?;

            if let Some(staged_oid) = index.added().get(path) {
                if staged_oid != &disk_oid {
                    unstaged.insert(path.clone(), "modified");
                }
            } else if let Some(tracked_oid) = head.files().get(path)
                && tracked_oid != &disk_oid
            {
                unstaged.insert(path.clone(), "modified");
            }
        }

        for path in head.files().keys() {
            if !disk_set.contains(path) && !index.removed().contains_key(path) {
                unstaged.insert(path.clone(), "deleted");
            }
        }

        writeln!(self.writer(), "=== Modifications Not Staged For Commit ===")?;
        for (path, annotation) in &unstaged {
            writeln!(self.writer(), "{} ({})", path.display(), annotation)?;
        }
        writeln!(self.writer())?;

        writeln!(self.writer(), "=== Untracked Files ===")?;
        for path in &disk_files {
            if !index.added().contains_key(path) && !head.files().contains_key(path) {
                writeln!(self.writer(), "{}", path.display())?;
            }
        }
        writeln!(self.writer())?;

        Ok(())
    }
}
