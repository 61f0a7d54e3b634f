//! Tweaks which let `turtle.place()` interact with more blocks.

use super::{Category, FeatureInfo, PackFeature};
use crate::error::Result;
use crate::pack::PackOutput;
use async_trait::async_trait;

/// Blocks in this tag are "used" rather than placed against.
pub const TURTLE_CAN_USE: &str = "computercraft:turtle_can_use";

/// Adds a fixed set of blocks to [`TURTLE_CAN_USE`].
#[derive(Debug, Clone)]
pub struct TurtleUseFeature {
    info: FeatureInfo,
    entries: &'static [&'static str],
}

impl TurtleUseFeature {
    fn new(id: &str, name: &str, description: &str, icon: &str, icon_alt: &str, entries: &'static [&'static str]) -> Self {
        Self {
            info: FeatureInfo {
                id: id.to_string(),
                name: name.to_string(),
                description: description.to_string(),
                icon: icon.to_string(),
                icon_alt: icon_alt.to_string(),
                category: Category::Tweaks,
            },
            entries,
        }
    }

    /// The tag entries this tweak adds.
    pub fn entries(&self) -> &[&'static str] {
        self.entries
    }
}

/// All turtle-use tweaks.
pub fn tweaks() -> Vec<TurtleUseFeature> {
    vec![
        TurtleUseFeature::new(
            "turtle_levers",
            "Turtles ❤ Levers",
            "Allow turtle.place() to flip levers and press buttons.",
            "assets/turtle_lever.png",
            "A picture of a turtle next to a lever.",
            &["minecraft:lever", "#minecraft:buttons"],
        ),
        TurtleUseFeature::new(
            "turtle_modems",
            "Turtles ❤ Modems",
            "Allow turtle.place() to activate wired modems.",
            "assets/turtle_modem.png",
            "A picture of a turtle next to a wired modem.",
            &["#computercraft:wired_modem"],
        ),
    ]
}

#[async_trait]
impl PackFeature for TurtleUseFeature {
    fn info(&self) -> &FeatureInfo {
        &self.info
    }

    async fn process(&self, pack: &mut PackOutput) -> Result<()> {
        pack.block_tag(TURTLE_CAN_USE, self.entries.iter().copied());
        Ok(())
    }
}
