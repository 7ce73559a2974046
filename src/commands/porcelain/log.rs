use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::Object;
use std::io::Write;

impl Repository {
    /// Show the history of the current head commit
    ///
    /// Follows the first-parent chain only; the second parent of a merge
    /// commit is not traversed.
    pub async fn log(&mut self) -> anyhow::Result<()> {
        let mut commit = self.head_commit()?;

        loop {
            self.print_commit(&commit)?;

            match commit.parent_one() {
                Some(parent_oid) => {
                    let parent = self.database().load_commit(parent_oid)?;
                    commit = parent;
                }
                None => break,
            }
        }

        Ok(())
    }

    /// Show every commit ever made, in sorted-id order
    pub async fn global_log(&mut self) -> anyhow::Result<()> {
        for oid in self.database().list_commit_ids()? {
            let commit = self.database().load_commit(&oid)?;
            self.print_commit(&commit)?;
        }

        Ok(())
    }

    /// Print the ids of all commits with the given message
    pub async fn find(&mut self, message: &str) -> anyhow::Result<()> {
        let mut found = false;

        for oid in self.database().list_commit_ids()? {
            let commit = self.database().load_commit(&oid)?;
            if commit.message() == message {
                writeln!(self.writer(), "{}", oid)?;
                found = true;
            }
        }

        if !found {
            writeln!(self.writer(), "Found no commit with that message.")?;
        }

        Ok(())
    }

    fn print_commit(&self, commit: &Commit) -> anyhow::Result<()> {
        writeln!(self.writer(), "===")?;
        writeln!(self.writer(), "commit {}", commit.object_id()?)?;
        writeln!(self.writer(), "Date: {}", commit.timestamp())?;
        writeln!(self.writer(), "{}", commit.message())?;
        writeln!(self.writer())?;

        Ok(())
    }
}
