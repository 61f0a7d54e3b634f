//! The catalogue of optional pack features.
//!
//! Each feature is a processor which writes a self-contained set of files
//! into a [`PackOutput`]. Features only use the output's public write
//! operations, so they can run in any order.

pub mod overlay;
pub mod tools;
pub mod treasure;
pub mod turtle_use;

pub use overlay::{Ingredient, Overlay, OverlayFeature};
pub use tools::{DurabilityConsumption, Material, Tool, ToolFeature};
pub use treasure::TreasureFeature;
pub use turtle_use::TurtleUseFeature;

use crate::error::Result;
use crate::pack::PackOutput;
use crate::treasure::DiskCache;
use crate::version::GameVersion;
use async_trait::async_trait;
use std::sync::Arc;

/// Where a feature is listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Extra tools turtles can equip.
    TurtleTools,
    /// Everything else.
    Tweaks,
}

/// Display information about a feature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureInfo {
    /// Stable identifier used to select the feature, e.g. "netherite_tools".
    pub id: String,
    /// Display name, e.g. "Netherite Tools".
    pub name: String,
    /// A longer description of what the feature does.
    pub description: String,
    /// Path to the feature's icon.
    pub icon: String,
    /// Alt text for the icon.
    pub icon_alt: String,
    pub category: Category,
}

/// A feature which can be added to a pack.
#[async_trait]
pub trait PackFeature: Send + Sync {
    /// Display information about this feature.
    fn info(&self) -> &FeatureInfo;

    /// Whether this feature is available for a version. Defaults to always.
    fn enabled_for(&self, _version: GameVersion) -> bool {
        true
    }

    /// Whether processing may wait on external data. Such features run
    /// after all others.
    fn suspends(&self) -> bool {
        false
    }

    /// Write this feature's files into the pack.
    async fn process(&self, pack: &mut PackOutput) -> Result<()>;
}

/// Build the full feature catalogue, in display order.
pub fn catalogue(disks: Arc<DiskCache>) -> Vec<Box<dyn PackFeature>> {
    let mut features: Vec<Box<dyn PackFeature>> = Vec::new();
    features.extend(
        tools::MATERIALS
            .iter()
            .map(|material| Box::new(ToolFeature::new(material)) as Box<dyn PackFeature>),
    );
    features.push(Box::new(OverlayFeature::turtle_flags()));
    features.extend(
        turtle_use::tweaks()
            .into_iter()
            .map(|tweak| Box::new(tweak) as Box<dyn PackFeature>),
    );
    features.push(Box::new(TreasureFeature::new(disks)));
    features
}
