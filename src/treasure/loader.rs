//! Loading treasure disks from a checkout of the treasure-disks repository
//! or from a pre-bundled JSON file.

use super::{DiskSource, TreasureDisk};
use crate::error::{PackError, Result};
use async_trait::async_trait;
use md5::{Digest, Md5};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Location of the disks inside a treasure-disks checkout.
const TREASURE_ROOT: &str = "data/computercraft/lua/treasure";

/// Authors whose disks are not shipped.
const SKIPPED_AUTHORS: &[&str] = &["deprecated"];

/// The sixteen dye colours disks may take.
const DISK_COLOURS: [u32; 16] = [
    0x111111, // Black
    0xcc4c4c, // Red
    0x57a64e, // Green
    0x7f664c, // Brown
    0x3366cc, // Blue
    0xb266e5, // Purple
    0x4c99b2, // Cyan
    0x999999, // Light grey
    0x4c4c4c, // Grey
    0xf2b2cc, // Pink
    0x7fcc19, // Lime
    0xdede6c, // Yellow
    0x99b2f2, // Light blue
    0xe57fd8, // Magenta
    0xf2b233, // Orange
    0xf0f0f0, // White
];

/// Pick a disk's colour from a hash of its author and name.
pub fn disk_colour(author: &str, name: &str) -> u32 {
    let digest = Md5::digest(format!("{}/{}", author, name).as_bytes());
    DISK_COLOURS[((digest[0] >> 4) & 0xf) as usize]
}

/// Reads disks from a treasure-disks checkout, laid out as
/// `data/computercraft/lua/treasure/{author}/{name}/...`.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl DiskSource for DirectorySource {
    async fn load(&self) -> Result<Vec<TreasureDisk>> {
        let root = self.root.clone();
        let disks = tokio::task::spawn_blocking(move || load_from_directory(&root))
            .await
            .map_err(|e| PackError::CorpusLoad(e.to_string()))?;

        disks.map_err(|e| match e {
            PackError::CorpusLoad(_) => e,
            other => PackError::CorpusLoad(format!("{}: {}", self.root.display(), other)),
        })
    }
}

/// Reads disks from a JSON array of [`TreasureDisk`] records.
#[derive(Debug, Clone)]
pub struct JsonSource {
    path: PathBuf,
}

impl JsonSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl DiskSource for JsonSource {
    async fn load(&self) -> Result<Vec<TreasureDisk>> {
        let contents = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| PackError::CorpusLoad(format!("{}: {}", self.path.display(), e)))?;

        serde_json::from_str(&contents)
            .map_err(|e| PackError::CorpusLoad(format!("{}: {}", self.path.display(), e)))
    }
}

/// Load every disk below a treasure-disks checkout.
fn load_from_directory(path: &Path) -> Result<Vec<TreasureDisk>> {
    let treasure_path = path.join(TREASURE_ROOT);
    if !treasure_path.is_dir() {
        return Err(PackError::CorpusLoad(format!(
            "No treasure directory found at {}",
            treasure_path.display()
        )));
    }

    let mut disks = Vec::new();
    for (author, author_path) in sorted_subdirectories(&treasure_path)? {
        if SKIPPED_AUTHORS.contains(&author.as_str()) {
            debug!(author = %author, "Skipping treasure disk author");
            continue;
        }

        for (name, program_path) in sorted_subdirectories(&author_path)? {
            let mut files = BTreeMap::new();
            load_files_recursive(&program_path, &program_path, &mut |relative, contents| {
                files.insert(relative.to_string(), contents);
            })?;

            debug!(author = %author, name = %name, files = files.len(), "Found treasure disk");
            disks.push(TreasureDisk {
                colour: disk_colour(&author, &name),
                author: author.clone(),
                name,
                files,
            });
        }
    }

    Ok(disks)
}

/// List the subdirectories of `dir` as (name, path), sorted by name.
fn sorted_subdirectories(dir: &Path) -> Result<Vec<(String, PathBuf)>> {
    let mut entries = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }

        entries.push((entry.file_name().to_string_lossy().to_string(), entry.path()));
    }
    entries.sort();
    Ok(entries)
}

/// Load text files recursively from a directory, passing each file's path
/// relative to `base` with `/` separators.
fn load_files_recursive<F>(base: &Path, dir: &Path, handler: &mut F) -> Result<()>
where
    F: FnMut(&str, String),
{
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();

        if path.is_dir() {
            load_files_recursive(base, &path, handler)?;
        } else if path.is_file() {
            let Ok(relative) = path.strip_prefix(base) else {
                continue;
            };
            let relative = relative.to_string_lossy().replace('\\', "/");

            let contents = std::fs::read_to_string(&path)?;
            handler(&relative, contents);
        }
    }
    Ok(())
}
