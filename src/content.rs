//! File contents stored in a pack.

use crate::error::Result;
use base64::Engine;
use serde::Serialize;
use std::borrow::Cow;

/// The contents of a single file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileContent {
    /// UTF-8 text, e.g. JSON or Lua source.
    Text(String),
    /// Raw bytes, e.g. a PNG.
    Binary(Vec<u8>),
    /// Base64-encoded bytes. Decoded when the file is added to an archive.
    Base64(String),
}

impl FileContent {
    /// Serialize a value as pretty-printed JSON (two-space indent).
    pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<Self> {
        Ok(FileContent::Text(serde_json::to_string_pretty(value)?))
    }

    /// Get the raw bytes of this file, decoding base64 contents.
    pub fn bytes(&self) -> Result<Cow<'_, [u8]>> {
        match self {
            FileContent::Text(text) => Ok(Cow::Borrowed(text.as_bytes())),
            FileContent::Binary(data) => Ok(Cow::Borrowed(data)),
            FileContent::Base64(encoded) => {
                Ok(Cow::Owned(base64::engine::general_purpose::STANDARD.decode(encoded)?))
            }
        }
    }

    /// Convert base64 contents to binary; other kinds are returned unchanged.
    pub fn decoded(self) -> Result<Self> {
        match self {
            FileContent::Base64(encoded) => Ok(FileContent::Binary(
                base64::engine::general_purpose::STANDARD.decode(encoded)?,
            )),
            other => Ok(other),
        }
    }

    /// Get the contents as text, if this is a text file.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FileContent::Text(text) => Some(text),
            FileContent::Binary(_) | FileContent::Base64(_) => None,
        }
    }
}

impl From<String> for FileContent {
    fn from(text: String) -> Self {
        FileContent::Text(text)
    }
}

impl From<&str> for FileContent {
    fn from(text: &str) -> Self {
        FileContent::Text(text.to_string())
    }
}

impl From<Vec<u8>> for FileContent {
    fn from(data: Vec<u8>) -> Self {
        FileContent::Binary(data)
    }
}
