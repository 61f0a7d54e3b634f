//! Turtle tools made from other materials.
//!
//! CC: Tweaked only ships diamond tool upgrades. These features add a
//! `computercraft:tool` upgrade for every tool of another material.

use super::{Category, FeatureInfo, PackFeature};
use crate::error::Result;
use crate::pack::PackOutput;
use crate::version::{self, GameVersion};
use async_trait::async_trait;
use serde::Serialize;

/// When a tool loses durability as a turtle uses it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DurabilityConsumption {
    Always,
    WhenEnchanted,
    Never,
}

/// A material a tool is made from.
#[derive(Debug, Clone, Copy)]
pub struct Material {
    /// The display name (e.g. "Netherite").
    pub display_name: &'static str,
    /// The path to the icon.
    pub icon: &'static str,
    /// The Minecraft identifier (e.g. "netherite").
    pub identifier: &'static str,
    /// A description of how these tools behave.
    pub description: &'static str,
    pub allow_enchantments: bool,
    pub consume_durability: DurabilityConsumption,
}

/// A tool that we will generate.
#[derive(Debug, Clone, Copy)]
pub struct Tool {
    pub name: &'static str,
    pub damage_multiplier: Option<u32>,
}

/// The list of built-in materials.
pub const MATERIALS: &[Material] = &[
    Material {
        display_name: "Netherite",
        icon: "assets/netherite_pickaxe.png",
        identifier: "netherite",
        description: "These tools can be enchanted, but enchanted tools will lose durability when used.",
        allow_enchantments: true,
        consume_durability: DurabilityConsumption::WhenEnchanted,
    },
    Material {
        display_name: "Golden",
        icon: "assets/golden_pickaxe.png",
        identifier: "golden",
        description: "These tools can be enchanted. They will always lose durability when used.",
        allow_enchantments: true,
        consume_durability: DurabilityConsumption::Always,
    },
    Material {
        display_name: "Iron",
        icon: "assets/iron_pickaxe.png",
        identifier: "iron",
        description: "These tools will always lose durability when used",
        allow_enchantments: false,
        consume_durability: DurabilityConsumption::Always,
    },
    Material {
        display_name: "Stone",
        icon: "assets/stone_pickaxe.png",
        identifier: "stone",
        description: "These tools will always lose durability when used",
        allow_enchantments: false,
        consume_durability: DurabilityConsumption::Always,
    },
    Material {
        display_name: "Wooden",
        icon: "assets/wooden_pickaxe.png",
        identifier: "wooden",
        description: "These tools will always lose durability when used",
        allow_enchantments: false,
        consume_durability: DurabilityConsumption::Always,
    },
];

/// The list of built-in tools.
pub const TOOLS: &[Tool] = &[
    Tool { name: "axe", damage_multiplier: Some(6) },
    Tool { name: "pickaxe", damage_multiplier: None },
    Tool { name: "hoe", damage_multiplier: None },
    Tool { name: "shovel", damage_multiplier: None },
    Tool { name: "sword", damage_multiplier: Some(9) },
];

/// How upgrade definitions are laid out for a version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpgradeLayout {
    /// `computercraft/turtle_upgrades`, adjective as a translation key.
    Legacy,
    /// `computercraft/turtle_upgrade`, adjective as a text component.
    Component,
}

const UPGRADE_LAYOUTS: &[(GameVersion, UpgradeLayout)] = &[
    (GameVersion::V1_20_1, UpgradeLayout::Legacy),
    (GameVersion::V1_20_6, UpgradeLayout::Component),
];

impl UpgradeLayout {
    /// Get the layout used by a version.
    pub fn for_version(version: GameVersion) -> Self {
        version::select(UPGRADE_LAYOUTS, version)
    }

    /// The registry directory upgrades are read from.
    pub fn directory(self) -> &'static str {
        match self {
            UpgradeLayout::Legacy => "computercraft/turtle_upgrades",
            UpgradeLayout::Component => "computercraft/turtle_upgrade",
        }
    }

    fn adjective(self, key: &str) -> Adjective<'_> {
        match self {
            UpgradeLayout::Legacy => Adjective::Key(key),
            UpgradeLayout::Component => Adjective::Component { translate: key },
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Adjective<'a> {
    Key(&'a str),
    Component { translate: &'a str },
}

/// A `computercraft:tool` upgrade definition.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ToolUpgrade<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    item: &'a str,
    adjective: Adjective<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    damage_multiplier: Option<u32>,
    allow_enchantments: bool,
    consume_durability: DurabilityConsumption,
}

/// Allows turtles to equip every tool of one material.
#[derive(Debug, Clone)]
pub struct ToolFeature {
    material: &'static Material,
    info: FeatureInfo,
}

impl ToolFeature {
    pub fn new(material: &'static Material) -> Self {
        let info = FeatureInfo {
            id: format!("{}_tools", material.identifier),
            name: format!("{} Tools", material.display_name),
            description: format!(
                "Allow {} tools to be equipped by turtles. {}",
                material.display_name.to_lowercase(),
                material.description
            ),
            icon: material.icon.to_string(),
            icon_alt: format!("A {} pickaxe", material.display_name),
            category: Category::TurtleTools,
        };
        Self { material, info }
    }

    pub fn material(&self) -> &Material {
        self.material
    }
}

#[async_trait]
impl PackFeature for ToolFeature {
    fn info(&self) -> &FeatureInfo {
        &self.info
    }

    async fn process(&self, pack: &mut PackOutput) -> Result<()> {
        let layout = UpgradeLayout::for_version(pack.version());

        for tool in TOOLS {
            let name = format!("{}_{}", self.material.identifier, tool.name);
            let adjective = format!("upgrade.minecraft.diamond_{}.adjective", tool.name);

            let upgrade = ToolUpgrade {
                kind: "computercraft:tool",
                item: &name,
                adjective: layout.adjective(&adjective),
                damage_multiplier: tool.damage_multiplier,
                allow_enchantments: self.material.allow_enchantments,
                consume_durability: self.material.consume_durability,
            };
            pack.data_json("minecraft", &format!("{}/{}.json", layout.directory(), name), &upgrade)?;
        }
        Ok(())
    }
}
