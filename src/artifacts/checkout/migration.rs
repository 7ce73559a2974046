use crate::areas::database::Database;
use crate::areas::workspace::Workspace;
use crate::artifacts::objects::commit::FileMap;
use crate::artifacts::objects::object_id::ObjectId;
use std::path::PathBuf;

/// Planned working-tree transition from one snapshot to another
///
/// Deletions are applied before writes so a path can move between the two
/// sets without ordering hazards.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Migration {
    /// Paths tracked by the current commit but absent from the target
    deletes: Vec<PathBuf>,
    /// Every file of the target snapshot, written or overwritten
    writes: Vec<(PathBuf, ObjectId)>,
}

impl Migration {
    /// Plan the transition from `current` to `target`
    pub fn between(current: &FileMap, target: &FileMap) -> Self {
        let deletes = current
            .keys()
            .filter(|path| !target.contains_key(*path))
            .cloned()
            .collect::<Vec<_>>();

        let writes = target
            .iter()
            .map(|(path, oid)| (path.clone(), oid.clone()))
            .collect::<Vec<_>>();

        Migration { deletes, writes }
    }

    /// Apply the planned transition to the working tree
    pub fn apply(&self, workspace: &Workspace, database: &Database) -> anyhow::Result<()> {
        for path in &self.deletes {
            if workspace.file_exists(path) {
                workspace.remove_file(path)?;
            }
        }

        for (path, oid) in &self.writes {
            let blob = database.load_blob(oid)?;
            workspace.write_file(path, blob.content())?;
        }

        Ok(())
    }

    pub fn deletes(&self) -> &[PathBuf] {
        &self.deletes
    }

    pub fn writes(&self) -> &[(PathBuf, ObjectId)] {
        &self.writes
    }
}
