//! Assembled archive contents.

use crate::content::FileContent;
use crate::error::{PackError, Result};
use serde::Serialize;
use std::collections::BTreeMap;

/// A finished archive: a mapping from path to file contents, ready to be
/// written out as a zip (see [`crate::export`]).
///
/// Base64 contents are decoded on insertion, so an archive only holds text
/// and binary files.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Archive {
    files: BTreeMap<String, FileContent>,
}

impl Archive {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file. Adding the same path twice is an error.
    pub fn add(&mut self, path: impl Into<String>, contents: FileContent) -> Result<()> {
        let path = path.into();
        if self.files.contains_key(&path) {
            return Err(PackError::DuplicatePath(path));
        }

        self.files.insert(path, contents.decoded()?);
        Ok(())
    }

    /// Add a pretty-printed JSON file.
    pub fn add_json<T: Serialize + ?Sized>(&mut self, path: impl Into<String>, value: &T) -> Result<()> {
        self.add(path, FileContent::json(value)?)
    }

    /// Get a file's contents.
    pub fn get(&self, path: &str) -> Option<&FileContent> {
        self.files.get(path)
    }

    /// Get a text file's contents.
    pub fn text(&self, path: &str) -> Option<&str> {
        self.get(path).and_then(FileContent::as_text)
    }

    /// Check if the archive contains a path.
    pub fn contains(&self, path: &str) -> bool {
        self.files.contains_key(path)
    }

    /// Iterate over all files in path order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FileContent)> {
        self.files.iter().map(|(path, contents)| (path.as_str(), contents))
    }

    /// Iterate over all paths in order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(|s| s.as_str())
    }

    /// Get the number of files.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Check if the archive has no files.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
