use crate::artifacts::index::HEADER_SIZE;
use crate::artifacts::objects::object::{Packable, Unpackable};
use anyhow::anyhow;
use byteorder::{ReadBytesExt, WriteBytesExt};
use bytes::Bytes;
use derive_new::new;
use std::io::{BufRead, Read, Write};

/// Header of the staging index file
#[derive(Debug, Clone, new)]
pub struct StageHeader {
    pub(crate) marker: String,
    pub(crate) version: u32,
    pub(crate) added_count: u32,
    pub(crate) removed_count: u32,
}

impl Packable for StageHeader {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let mut bytes = Vec::with_capacity(HEADER_SIZE);
        bytes.write_all(self.marker.as_bytes())?;
        bytes.write_u32::<byteorder::NetworkEndian>(self.version)?;
        bytes.write_u32::<byteorder::NetworkEndian>(self.added_count)?;
        bytes.write_u32::<byteorder::NetworkEndian>(self.removed_count)?;

        Ok(Bytes::from(bytes))
    }
}

impl Unpackable for StageHeader {
    fn deserialize(mut reader: impl BufRead) -> anyhow::Result<Self> {
        let mut marker = [0u8; 4];
        reader.read_exact(&mut marker)?;
        let marker = String::from_utf8(marker.to_vec())
            .map_err(|_| anyhow!("Invalid marker in index header"))?;

        let version = reader.read_u32::<byteorder::NetworkEndian>()?;
        let added_count = reader.read_u32::<byteorder::NetworkEndian>()?;
        let removed_count = reader.read_u32::<byteorder::NetworkEndian>()?;

        Ok(StageHeader {
            marker,
            version,
            added_count,
            removed_count,
        })
    }
}
