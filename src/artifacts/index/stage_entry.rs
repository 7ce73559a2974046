use crate::artifacts::index::ENTRY_BLOCK;
use crate::artifacts::objects::object::{Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::anyhow;
use byteorder::{ReadBytesExt, WriteBytesExt};
use bytes::Bytes;
use derive_new::new;
use std::io::{BufRead, Read, Write};
use std::path::PathBuf;

/// One staged path in the index file
///
/// Layout: 20-byte binary oid, 2-byte path length, path bytes, NUL
/// terminator, zero-padded to an 8-byte boundary. The trailing NUL (padding
/// is NUL too) lets the reader detect the end of a variable-length entry.
#[derive(Debug, Clone, Eq, PartialEq, new)]
pub struct StageEntry {
    pub path: PathBuf,
    pub oid: ObjectId,
}

impl Packable for StageEntry {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let path = self.path.display().to_string();
        if path.len() > u16::MAX as usize {
            return Err(anyhow!("Path too long for index entry: {}", path));
        }

        let mut bytes = Vec::new();
        self.oid.write_h40_to(&mut bytes)?;
        bytes.write_u16::<byteorder::NetworkEndian>(path.len() as u16)?;
        bytes.write_all(path.as_bytes())?;
        bytes.push(0);

        while bytes.len() % ENTRY_BLOCK != 0 {
            bytes.push(0);
        }

        Ok(Bytes::from(bytes))
    }
}

impl Unpackable for StageEntry {
    fn deserialize(mut reader: impl BufRead) -> anyhow::Result<Self> {
        let oid = ObjectId::read_h40_from(&mut reader)?;
        let path_len = reader.read_u16::<byteorder::NetworkEndian>()? as usize;

        let mut path_bytes = vec![0u8; path_len];
        reader.read_exact(&mut path_bytes)?;
        let path = String::from_utf8(path_bytes)
            .map_err(|_| anyhow!("Invalid path bytes in index entry"))?;

        // trailing NUL and alignment padding are left to the framing layer
        Ok(StageEntry::new(PathBuf::from(path), oid))
    }
}
