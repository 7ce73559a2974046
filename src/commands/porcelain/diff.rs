use crate::areas::repository::Repository;
use crate::artifacts::diff::diff_hunks;
use crate::artifacts::objects::commit::Commit;
use std::collections::BTreeSet;
use std::io::Write;
use std::path::Path;

impl Repository {
    /// Show line differences
    ///
    /// - no arguments: the head commit's tracked files against the working
    ///   tree
    /// - one branch: that branch tip's tracked files against the working tree
    /// - two branches: the first tip against the second, over the union of
    ///   their tracked paths
    pub async fn diff(
        &mut self,
        branch_one: Option<&str>,
        branch_two: Option<&str>,
    ) -> anyhow::Result<()> {
        match (branch_one, branch_two) {
            (None, None) => {
                let head = self.head_commit()?;
                self.diff_commit_against_workspace(&head)
            }
            (Some(branch), None) => {
                if !self.refs().branch_exists(branch) {
                    writeln!(self.writer(), "A branch with that name does not exist.")?;
                    return Ok(());
                }

                let commit = self.branch_tip(branch)?;
                self.diff_commit_against_workspace(&commit)
            }
            (Some(first), Some(second)) => {
                if !self.refs().branch_exists(first) || !self.refs().branch_exists(second) {
                    writeln!(self.writer(), "At least one branch does not exist.")?;
                    return Ok(());
                }

                let first = self.branch_tip(first)?;
                let second = self.branch_tip(second)?;
                self.diff_commits(&first, &second)
            }
            (None, Some(_)) => unreachable!("second branch requires a first"),
        }
    }

    fn branch_tip(&self, branch: &str) -> anyhow::Result<Commit> {
        let oid = self
            .refs()
            .read_ref(branch)?
            .ok_or_else(|| anyhow::anyhow!("branch {} has no recorded commit", branch))?;

        self.database().load_commit(&oid)
    }

    fn diff_commit_against_workspace(&self, commit: &Commit) -> anyhow::Result<()> {
        for (path, blob_oid) in commit.files() {
            let recorded = self.database().load_blob(blob_oid)?.into_content();
            let working = if self.workspace().file_exists(path) {
                Some(self.workspace().read_file(path)?)
            } else {
                None
            };

            self.print_file_diff(path, Some(recorded.as_str()), working.as_deref())?;
        }

        Ok(())
    }

    fn diff_commits(&self, first: &Commit, second: &Commit) -> anyhow::Result<()> {
        let paths = first
            .files()
            .keys()
            .chain(second.files().keys())
            .collect::<BTreeSet<_>>();

        for path in paths {
            let old = match first.files().get(path) {
                Some(oid) => Some(self.database().load_blob(oid)?.into_content()),
                None => None,
            };
            let new = match second.files().get(path) {
                Some(oid) => Some(self.database().load_blob(oid)?.into_content()),
                None => None,
            };

            self.print_file_diff(path, old.as_deref(), new.as_deref())?;
        }

        Ok(())
    }

    fn print_file_diff(
        &self,
        path: &Path,
        old: Option<&str>,
        new: Option<&str>,
    ) -> anyhow::Result<()> {
        if old == new {
            return Ok(());
        }

        let name = path.display();
        match (old, new) {
            (Some(_), Some(_)) => {
                writeln!(self.writer(), "diff --git a/{name} b/{name}")?;
                writeln!(self.writer(), "--- a/{name}")?;
                writeln!(self.writer(), "+++ b/{name}")?;
            }
            (Some(_), None) => {
                writeln!(self.writer(), "diff --git a/{name} /dev/null")?;
                writeln!(self.writer(), "--- a/{name}")?;
                writeln!(self.writer(), "+++ /dev/null")?;
            }
            (None, Some(_)) => {
                writeln!(self.writer(), "diff --git /dev/null b/{name}")?;
                writeln!(self.writer(), "--- /dev/null")?;
                writeln!(self.writer(), "+++ b/{name}")?;
            }
            (None, None) => return Ok(()),
        }

        for hunk in diff_hunks(old, new) {
            writeln!(self.writer(), "{}", hunk.header())?;
            for line in hunk.deleted() {
                writeln!(self.writer(), "-{}", line)?;
            }
            for line in hunk.inserted() {
                writeln!(self.writer(), "+{}", line)?;
            }
        }

        Ok(())
    }
}
