//! Ships the treasure disk corpus and a loot table to find them with.

use super::{Category, FeatureInfo, PackFeature};
use crate::error::Result;
use crate::pack::PackOutput;
use crate::treasure::{DiskCache, TreasureDisk};
use crate::version::{self, GameVersion};
use async_trait::async_trait;
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::debug;

/// How disk metadata is attached to the loot item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DiskFunction {
    SetNbt,
    SetComponents,
}

const DISK_FUNCTIONS: &[(GameVersion, DiskFunction)] = &[
    (GameVersion::V1_20_1, DiskFunction::SetNbt),
    (GameVersion::V1_20_6, DiskFunction::SetComponents),
];

const LOOT_TABLE_DIRS: &[(GameVersion, &str)] = &[
    (GameVersion::V1_20_1, "loot_tables"),
    (GameVersion::V1_21, "loot_table"),
];

/// Item NBT of a treasure disk before item components.
#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct DiskNbt<'a> {
    title: &'a str,
    sub_path: &'a str,
    colour: u32,
}

fn loot_function(kind: DiskFunction, disk: &TreasureDisk) -> Result<Value> {
    let title = disk.title();
    let path = disk.sub_path();

    Ok(match kind {
        DiskFunction::SetComponents => json!({
            "function": "minecraft:set_components",
            "components": {
                "computercraft:treasure_disk": { "name": title, "path": path },
                "minecraft:dyed_color": { "rgb": disk.colour, "show_in_tooltip": false },
            },
        }),
        DiskFunction::SetNbt => {
            let tag = serde_json::to_string(&DiskNbt {
                title: &title,
                sub_path: &path,
                colour: disk.colour,
            })?;
            json!({ "function": "minecraft:set_nbt", "tag": tag })
        }
    })
}

/// Adds every treasure disk, read through a shared [`DiskCache`].
#[derive(Debug)]
pub struct TreasureFeature {
    info: FeatureInfo,
    disks: Arc<DiskCache>,
}

impl TreasureFeature {
    pub fn new(disks: Arc<DiskCache>) -> Self {
        Self {
            info: FeatureInfo {
                id: "treasure_disks".to_string(),
                name: "Treasure Disks".to_string(),
                description: "Add all of ComputerCraft's old treasure disks.".to_string(),
                icon: "assets/treasure.png".to_string(),
                icon_alt: "A blue ComputerCraft floppy disk.".to_string(),
                category: Category::Tweaks,
            },
            disks,
        }
    }
}

#[async_trait]
impl PackFeature for TreasureFeature {
    fn info(&self) -> &FeatureInfo {
        &self.info
    }

    fn suspends(&self) -> bool {
        true
    }

    async fn process(&self, pack: &mut PackOutput) -> Result<()> {
        let disks = self.disks.disks().await?;
        let function = version::select(DISK_FUNCTIONS, pack.version());

        let mut entries = Vec::with_capacity(disks.len());
        for disk in disks.iter() {
            for (file, contents) in &disk.files {
                pack.data(
                    "computercraft",
                    &format!("lua/treasure/{}/{}", disk.sub_path(), file),
                    contents.as_str(),
                )?;
            }

            entries.push(json!({
                "type": "minecraft:item",
                "name": "computercraft:treasure_disk",
                "functions": [loot_function(function, disk)?],
            }));
        }
        debug!(disks = disks.len(), "Added treasure disks");

        let dir = version::select(LOOT_TABLE_DIRS, pack.version());
        pack.data_json(
            "computercraft",
            &format!("{}/treasure_disk.json", dir),
            &json!({
                "pools": [{ "name": "main", "rolls": 1, "entries": entries }],
            }),
        )
    }
}
