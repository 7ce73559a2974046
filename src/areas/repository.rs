use crate::areas::database::Database;
use crate::areas::index::Index;
use crate::areas::refs::Refs;
use crate::areas::workspace::Workspace;
use crate::artifacts::objects::commit::Commit;
use std::cell::RefCell;
use std::cell::RefMut;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Name of the repository directory inside the working directory
pub const REPOSITORY_DIR: &str = ".gitlet";

/// Repository context
///
/// All persistent state (object database, staging index, references) plus
/// the working directory, constructed once per command invocation and passed
/// into every operation.
pub struct Repository {
    path: Box<Path>,
    writer: RefCell<Box<dyn std::io::Write>>,
    index: Arc<Mutex<Index>>,
    database: Database,
    workspace: Workspace,
    refs: Refs,
}

impl Repository {
    pub fn new(path: &str, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        let path = Path::new(path).canonicalize()?;
        let gitlet_path = path.join(REPOSITORY_DIR);

        let index = Index::new(gitlet_path.join("index").into_boxed_path());
        let database = Database::new(gitlet_path.clone().into_boxed_path());
        let workspace = Workspace::new(path.clone().into_boxed_path());
        let refs = Refs::new(gitlet_path.into_boxed_path());

        Ok(Repository {
            path: path.into_boxed_path(),
            writer: RefCell::new(writer),
            index: Arc::new(Mutex::new(index)),
            database,
            workspace,
            refs,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn gitlet_path(&self) -> Box<Path> {
        self.path.join(REPOSITORY_DIR).into_boxed_path()
    }

    /// Whether `init` has run in this working directory
    pub fn is_initialized(&self) -> bool {
        self.gitlet_path().exists()
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn index(&self) -> Arc<Mutex<Index>> {
        self.index.clone()
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn refs(&self) -> &Refs {
        &self.refs
    }

    /// Load the commit the active branch points at
    pub fn head_commit(&self) -> anyhow::Result<Commit> {
        let branch = self.refs.read_head()?;
        let oid = self
            .refs
            .read_ref(&branch)?
            .ok_or_else(|| anyhow::anyhow!("branch {} has no recorded commit", branch))?;

        self.database.load_commit(&oid)
    }
}
