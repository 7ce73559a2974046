//! Gitlet blob object
//!
//! Blobs store file content. They carry only the raw file data, no metadata.
//! A blob's identity is the SHA-1 hash of its raw bytes, so the serialized
//! form is exactly the content with no framing header.

use crate::artifacts::objects::object::Unpackable;
use crate::artifacts::objects::object::{Object, Packable};
use bytes::Bytes;
use derive_new::new;
use std::io::{BufRead, Write};

/// Blob object representing one file version's content
#[derive(Debug, Clone, Eq, PartialEq, new)]
pub struct Blob {
    content: String,
}

impl Blob {
    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn into_content(self) -> String {
        self.content
    }
}

impl Packable for Blob {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let mut content_bytes = Vec::new();
        content_bytes.write_all(self.content.as_bytes())?;

        Ok(Bytes::from(content_bytes))
    }
}

impl Unpackable for Blob {
    fn deserialize(reader: impl BufRead) -> anyhow::Result<Self> {
        let content = reader
            .bytes()
            .collect::<Result<Vec<u8>, std::io::Error>>()?;

        let content = String::from_utf8(content)?;
        Ok(Self::new(content))
    }
}

impl Object for Blob {}
