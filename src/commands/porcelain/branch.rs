use crate::areas::repository::Repository;
use crate::artifacts::objects::object::Object;
use std::io::Write;

impl Repository {
    /// Create a new branch pointing at the current head commit
    ///
    /// The new branch is not checked out.
    pub async fn branch(&mut self, branch_name: &str) -> anyhow::Result<()> {
        if self.refs().branch_exists(branch_name) {
            writeln!(self.writer(), "A branch with that name already exists.")?;
            return Ok(());
        }

        let head_oid = self.head_commit()?.object_id()?;
        self.refs().update_ref(branch_name, &head_oid)?;

        Ok(())
    }

    /// Delete a branch reference
    ///
    /// Only the pointer is removed; commits reachable from it stay in the
    /// object store.
    pub async fn rm_branch(&mut self, branch_name: &str) -> anyhow::Result<()> {
        if self.refs().read_head()? == branch_name {
            writeln!(self.writer(), "Cannot remove the current branch.")?;
            return Ok(());
        }

        if !self.refs().branch_exists(branch_name) {
            writeln!(self.writer(), "A branch with that name does not exist.")?;
            return Ok(());
        }

        self.refs().delete_branch(branch_name)?;

        Ok(())
    }
}
