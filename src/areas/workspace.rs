use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::FileMap;
use anyhow::Context;
use std::io::Write;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const IGNORED_PATHS: [&str; 3] = [".gitlet", ".", ".."];

/// Working directory operations
///
/// Gitlet tracks plain files at the top level of the working directory;
/// the repository directory itself is ignored.
#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn parse_blob(&self, path: &Path) -> anyhow::Result<Blob> {
        let data = self.read_file(path)?;
        Ok(Blob::new(data))
    }

    /// List the plain files at the top level of the working directory
    pub fn list_files(&self) -> anyhow::Result<Vec<PathBuf>> {
        let mut files = WalkDir::new(self.path.as_ref())
            .max_depth(1)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| self.check_if_not_ignored_file_path(entry.path()))
            .collect::<Vec<_>>();

        files.sort();
        Ok(files)
    }

    fn is_ignored(path: &Path) -> bool {
        path.components().any(|component| {
            if let std::path::Component::Normal(name) = component {
                let name_str = name.to_string_lossy();
                IGNORED_PATHS.contains(&name_str.as_ref())
            } else {
                false
            }
        })
    }

    fn check_if_not_ignored_file_path(&self, path: &Path) -> Option<PathBuf> {
        if path.is_file() && !Self::is_ignored(path) {
            Some(path.strip_prefix(self.path.as_ref()).ok()?.to_path_buf())
        } else {
            None
        }
    }

    pub fn file_exists(&self, file_path: &Path) -> bool {
        self.path.join(file_path).is_file()
    }

    pub fn read_file(&self, file_path: &Path) -> anyhow::Result<String> {
        let file_path = self.path.join(file_path);

        std::fs::read_to_string(&file_path)
            .with_context(|| format!("Unable to read file {}", file_path.display()))
    }

    /// Write (or overwrite) one working file
    pub fn write_file(&self, file_path: &Path, content: &str) -> anyhow::Result<()> {
        let file_path = self.path.join(file_path);

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&file_path)
            .with_context(|| format!("Failed to open file: {}", file_path.display()))?;

        file.write_all(content.as_bytes())
            .with_context(|| format!("Failed to write to file: {}", file_path.display()))?;

        Ok(())
    }

    pub fn remove_file(&self, file_path: &Path) -> anyhow::Result<()> {
        let file_path = self.path.join(file_path);

        std::fs::remove_file(&file_path)
            .with_context(|| format!("Failed to remove file: {}", file_path.display()))
    }

    /// Scan for the untracked-file hazard before a destructive operation
    ///
    /// A hazard is any file present on disk, absent from the current
    /// commit's file map, but present in the target commit's file map: the
    /// pending overwrite would destroy content no commit has recorded.
    pub fn untracked_file_in_the_way(
        &self,
        current: &FileMap,
        target: &FileMap,
    ) -> anyhow::Result<bool> {
        for path in self.list_files()? {
            if target.contains_key(&path) && !current.contains_key(&path) {
                return Ok(true);
            }
        }

        Ok(false)
    }
}
