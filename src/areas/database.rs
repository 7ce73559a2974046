use crate::artifacts::objects::OBJECT_ID_LENGTH;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::{Object, Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use bytes::Bytes;
use fake::rand;
use std::io::{Cursor, Read, Write};
use std::path::{Path, PathBuf};

/// Content-addressed object store
///
/// Commits live under `.gitlet/commits/<hash>` as zlib-compressed records,
/// blobs under `.gitlet/blobs/<hash>` as the raw file bytes. Hashes are
/// computed by the objects themselves before storage; the store never
/// rehashes. Overwriting an existing hash is skipped since the content is
/// identical by construction.
#[derive(Debug)]
pub struct Database {
    path: Box<Path>,
}

impl Database {
    pub fn new(path: Box<Path>) -> Self {
        Database { path }
    }

    pub fn commits_path(&self) -> PathBuf {
        self.path.join("commits")
    }

    pub fn blobs_path(&self) -> PathBuf {
        self.path.join("blobs")
    }

    pub fn store_commit(&self, commit: &Commit) -> anyhow::Result<ObjectId> {
        let oid = commit.object_id()?;
        let record = Self::compress(commit.serialize()?)?;

        self.write_object(self.commits_path().join(oid.as_ref()), record)?;
        Ok(oid)
    }

    pub fn load_commit(&self, oid: &ObjectId) -> anyhow::Result<Commit> {
        let record = self.read_object(self.commits_path().join(oid.as_ref()))?;
        let record = Self::decompress(record)?;

        Commit::deserialize(Cursor::new(record))
    }

    pub fn store_blob(&self, blob: &Blob) -> anyhow::Result<ObjectId> {
        let oid = blob.object_id()?;

        self.write_object(self.blobs_path().join(oid.as_ref()), blob.serialize()?)?;
        Ok(oid)
    }

    pub fn load_blob(&self, oid: &ObjectId) -> anyhow::Result<Blob> {
        let content = self.read_object(self.blobs_path().join(oid.as_ref()))?;

        Blob::deserialize(Cursor::new(content))
    }

    /// Resolve a full or abbreviated commit ID
    ///
    /// A 40-character ID is looked up directly; anything shorter is resolved
    /// by a linear scan over the stored commit identifiers, first prefix
    /// match (in sorted order) wins. An empty string resolves to nothing.
    pub fn resolve_commit_id(&self, id: &str) -> anyhow::Result<Option<ObjectId>> {
        if id.is_empty() || id.len() > OBJECT_ID_LENGTH {
            return Ok(None);
        }

        if id.len() == OBJECT_ID_LENGTH {
            return if self.commits_path().join(id).exists() {
                Ok(Some(ObjectId::try_parse(id.to_string())?))
            } else {
                Ok(None)
            };
        }

        Ok(self
            .list_commit_ids()?
            .into_iter()
            .find(|oid| oid.as_ref().starts_with(id)))
    }

    /// Every stored commit ID, sorted
    ///
    /// Directory entries that are not object IDs (leftover temp files) are
    /// skipped.
    pub fn list_commit_ids(&self) -> anyhow::Result<Vec<ObjectId>> {
        let mut ids = std::fs::read_dir(self.commits_path())?
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| {
                ObjectId::try_parse(entry.file_name().to_string_lossy().to_string()).ok()
            })
            .collect::<Vec<_>>();

        ids.sort();
        Ok(ids)
    }

    fn read_object(&self, object_path: PathBuf) -> anyhow::Result<Bytes> {
        let object_content = std::fs::read(&object_path).context(format!(
            "Unable to read object file {}",
            object_path.display()
        ))?;

        Ok(object_content.into())
    }

    fn write_object(&self, object_path: PathBuf, object_content: Bytes) -> anyhow::Result<()> {
        // content-addressed: an existing file already holds these exact bytes
        if object_path.exists() {
            return Ok(());
        }

        let object_dir = object_path
            .parent()
            .context(format!("Invalid object path {}", object_path.display()))?;
        let temp_object_path = object_dir.join(Self::generate_temp_name());

        let mut file = std::fs::OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_object_path)
            .context(format!(
                "Unable to open object file {}",
                temp_object_path.display()
            ))?;

        file.write_all(&object_content).context(format!(
            "Unable to write object file {}",
            temp_object_path.display()
        ))?;

        // rename the temp file to the object file to make it atomic
        std::fs::rename(&temp_object_path, &object_path).context(format!(
            "Unable to rename object file to {}",
            object_path.display()
        ))?;

        Ok(())
    }

    fn compress(data: Bytes) -> anyhow::Result<Bytes> {
        let mut encoder =
            flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
        encoder
            .write_all(&data)
            .context("Unable to compress object content")?;

        encoder
            .finish()
            .map(|compressed_content| compressed_content.into())
            .context("Unable to finish compressing object content")
    }

    fn decompress(data: Bytes) -> anyhow::Result<Bytes> {
        let mut decoder = flate2::read::ZlibDecoder::new(&*data);
        let mut decompressed_content = Vec::new();
        decoder
            .read_to_end(&mut decompressed_content)
            .context("Unable to decompress object content")?;

        Ok(decompressed_content.into())
    }

    fn generate_temp_name() -> String {
        format!("tmp-obj-{}", rand::random::<u32>())
    }
}
