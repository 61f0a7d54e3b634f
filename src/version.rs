//! Supported Minecraft versions and their pack format numbers.
//!
//! Data packs and resource packs are versioned independently by the game,
//! so every [`GameVersion`] maps to two format numbers. See
//! <https://minecraft.wiki/w/Pack_format> for the upstream numbering.

use crate::error::{PackError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A Minecraft version we can generate packs for.
///
/// Variants are declared oldest first, so the derived ordering can be used
/// for "version X or later" checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum GameVersion {
    V1_20_1,
    V1_20_6,
    V1_21,
}

/// A row of the version table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VersionInfo {
    pub version: GameVersion,
    /// Human readable label, e.g. "1.20.1".
    pub label: &'static str,
    /// `pack_format` used by resource packs.
    pub resource_format: u32,
    /// `pack_format` used by data packs.
    pub data_format: u32,
}

/// The version table. Rows are only ever appended.
pub const VERSIONS: &[VersionInfo] = &[
    VersionInfo { version: GameVersion::V1_20_1, label: "1.20.1", resource_format: 15, data_format: 15 },
    VersionInfo { version: GameVersion::V1_20_6, label: "1.20.6", resource_format: 32, data_format: 41 },
    VersionInfo { version: GameVersion::V1_21, label: "1.21", resource_format: 34, data_format: 48 },
];

/// Look up the table row for a version.
///
/// # Panics
///
/// Panics if the table has no row for `version`. Every variant has a row, so
/// this indicates a variant was added without updating [`VERSIONS`].
pub fn lookup(version: GameVersion) -> &'static VersionInfo {
    match VERSIONS.iter().find(|info| info.version == version) {
        Some(info) => info,
        None => unreachable!("no version table entry for {:?}", version),
    }
}

/// Pick the behaviour for `version` from a threshold table.
///
/// `table` lists `(first version, behaviour)` pairs in ascending order; the
/// entry with the newest threshold not after `version` wins. Each processor
/// keeps its version-dependent decisions in one such table.
///
/// # Panics
///
/// Panics if `version` predates the first threshold. Tables are expected to
/// start at [`GameVersion::OLDEST`].
pub fn select<T: Copy>(table: &[(GameVersion, T)], version: GameVersion) -> T {
    match table.iter().rev().find(|(since, _)| *since <= version) {
        Some((_, value)) => *value,
        None => unreachable!("capability table does not cover {:?}", version),
    }
}

impl GameVersion {
    /// All versions, oldest first.
    pub const ALL: [GameVersion; 3] = [GameVersion::V1_20_1, GameVersion::V1_20_6, GameVersion::V1_21];

    /// The oldest supported version.
    pub const OLDEST: GameVersion = GameVersion::V1_20_1;

    /// Get the table row for this version.
    pub fn info(self) -> &'static VersionInfo {
        lookup(self)
    }

    /// Get the display label, e.g. "1.20.6".
    pub fn label(self) -> &'static str {
        self.info().label
    }

    /// Get the data pack format number.
    pub fn data_format(self) -> u32 {
        self.info().data_format
    }

    /// Get the resource pack format number.
    pub fn resource_format(self) -> u32 {
        self.info().resource_format
    }
}

impl fmt::Display for GameVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for GameVersion {
    type Err = PackError;

    fn from_str(s: &str) -> Result<Self> {
        VERSIONS
            .iter()
            .find(|info| info.label == s.trim())
            .map(|info| info.version)
            .ok_or_else(|| PackError::UnknownVersion(s.to_string()))
    }
}

impl TryFrom<String> for GameVersion {
    type Error = PackError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<GameVersion> for String {
    fn from(version: GameVersion) -> Self {
        version.label().to_string()
    }
}
