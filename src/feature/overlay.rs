//! Turtle overlays: cosmetic flags a turtle can hold.
//!
//! Each overlay gets a model, a texture, a data-driven overlay definition
//! pointing at that model, and a crafting recipe for each turtle family.

use super::{Category, FeatureInfo, PackFeature};
use crate::content::FileContent;
use crate::error::{PackError, Result};
use crate::pack::PackOutput;
use crate::resource_pack::{BlockModel, ElementRotation, ModelElement, ModelFace, Rgba, TextureData};
use crate::types::{Axis, Direction};
use crate::version::{self, GameVersion};
use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;

/// Data-driven overlays were added in Minecraft 1.21.
const OVERLAY_SUPPORT: &[(GameVersion, bool)] = &[(GameVersion::V1_20_1, false), (GameVersion::V1_21, true)];

/// Turtle families every overlay gets a recipe for.
const TURTLE_FAMILIES: [&str; 2] = ["normal", "advanced"];

/// Size of overlay textures, in pixels.
const TEXTURE_SIZE: u32 = 16;

/// Bottom of the flag, in model coordinates.
const FLAG_BASE: f32 = 13.5;

const STICK_COLOUR: Rgba = [0x6b, 0x4f, 0x2a, 0xff];

/// An ingredient of a crafting recipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ingredient {
    Item(String),
    Tag(String),
}

/// A turtle overlay.
#[derive(Debug, Clone, Deserialize)]
pub struct Overlay {
    /// The id of this overlay, unique within the pack.
    pub id: String,
    /// The height of the flag, in pixels.
    pub height: f32,
    /// The texture. Custom overlays supply it base64 encoded.
    #[serde(deserialize_with = "base64_texture")]
    pub texture: FileContent,
    /// Whether to keep showing the elf overlay (Christmas hats) with this overlay.
    #[serde(default)]
    pub show_elf_overlay: Option<bool>,
    /// Ingredients used to craft this overlay, besides the turtle.
    pub ingredients: Vec<Ingredient>,
}

impl Overlay {
    /// Check the id is a valid resource location path segment and the
    /// flag fits on its texture.
    pub fn validate(&self) -> Result<()> {
        let valid_id = !self.id.is_empty()
            && self
                .id
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_');
        if !valid_id {
            return Err(PackError::InvalidOverlay(format!(
                "id \"{}\" must only contain [a-z0-9_]",
                self.id
            )));
        }

        if !(self.height.is_finite() && self.height > 0.0 && self.height <= TEXTURE_SIZE as f32) {
            return Err(PackError::InvalidOverlay(format!(
                "height of \"{}\" must be between 0 and {}, got {}",
                self.id, TEXTURE_SIZE, self.height
            )));
        }
        Ok(())
    }
}

fn base64_texture<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<FileContent, D::Error> {
    String::deserialize(deserializer).map(FileContent::Base64)
}

/// The data pack definition of an overlay.
#[derive(Debug, Serialize)]
struct OverlayDefinition<'a> {
    model: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    show_elf_overlay: Option<bool>,
}

/// A built-in pride flag, painted as horizontal stripes.
struct Flag {
    id: &'static str,
    stripes: &'static [Rgba],
    ingredients: &'static [&'static str],
}

const FLAGS: &[Flag] = &[
    Flag {
        id: "ace_flag",
        stripes: &[
            [0x00, 0x00, 0x00, 0xff],
            [0xa3, 0xa3, 0xa3, 0xff],
            [0xff, 0xff, 0xff, 0xff],
            [0x80, 0x00, 0x80, 0xff],
        ],
        ingredients: &[
            "minecraft:stick",
            "minecraft:black_dye",
            "minecraft:light_gray_dye",
            "minecraft:white_dye",
            "minecraft:purple_dye",
        ],
    },
    Flag {
        id: "bisexual_flag",
        stripes: &[
            [0xd6, 0x02, 0x70, 0xff],
            [0xd6, 0x02, 0x70, 0xff],
            [0x9b, 0x4f, 0x96, 0xff],
            [0x00, 0x38, 0xa8, 0xff],
            [0x00, 0x38, 0xa8, 0xff],
        ],
        ingredients: &[
            "minecraft:stick",
            "minecraft:purple_dye",
            "minecraft:magenta_dye",
            "minecraft:blue_dye",
        ],
    },
    Flag {
        id: "non_binary_flag",
        stripes: &[
            [0xfc, 0xf4, 0x34, 0xff],
            [0xff, 0xff, 0xff, 0xff],
            [0x9c, 0x59, 0xd1, 0xff],
            [0x2c, 0x2c, 0x2c, 0xff],
        ],
        ingredients: &[
            "minecraft:stick",
            "minecraft:yellow_dye",
            "minecraft:white_dye",
            "minecraft:purple_dye",
            "minecraft:black_dye",
        ],
    },
];

impl Flag {
    /// One pixel of flag per stripe.
    fn height(&self) -> u32 {
        self.stripes.len() as u32
    }

    /// Paint the flag's texture. The flag occupies the top-left of the
    /// texture and the stick sits to its right, matching the UVs used by
    /// [`overlay_model`].
    fn paint(&self) -> Result<Vec<u8>> {
        let mut texture = TextureData::new(TEXTURE_SIZE, TEXTURE_SIZE);
        for (row, colour) in self.stripes.iter().enumerate() {
            let row = row as u32;
            texture.fill_rect(0, row, 11, row + 1, *colour);
        }
        texture.fill_rect(12, 0, 14, 7, STICK_COLOUR);
        texture.to_png()
    }

    fn overlay(&self) -> Result<Overlay> {
        Ok(Overlay {
            id: self.id.to_string(),
            height: self.height() as f32,
            texture: FileContent::Binary(self.paint()?),
            show_elf_overlay: Some(true),
            ingredients: self
                .ingredients
                .iter()
                .map(|item| Ingredient::Item(item.to_string()))
                .collect(),
        })
    }
}

/// Build the model for a flag of the given height.
pub fn overlay_model(texture: &str, height: f32) -> BlockModel {
    let rotation = ElementRotation {
        angle: 22.5,
        axis: Axis::X,
        origin: [2.0, 11.0, 10.75],
    };
    let face = |uv: [f32; 4]| ModelFace::new(uv, "#texture");

    let flag = ModelElement::new("Flag", [1.5, FLAG_BASE, 10.5], [2.0, FLAG_BASE + height / 2.0, 15.5])
        .rotated(rotation)
        .face(Direction::North, face([0.0, 0.0, 1.0, height]))
        .face(Direction::East, face([0.0, 0.0, 7.0, height]))
        .face(Direction::South, face([0.0, 0.0, 1.0, height]))
        .face(Direction::West, face([0.0, 0.0, 7.0, height]))
        .face(Direction::Up, face([10.0, 0.0, 11.0, height]))
        .face(Direction::Down, face([8.0, 0.0, 9.0, height]));

    let stick = ModelElement::new("Stick", [1.5, 10.5, 10.5], [2.0, FLAG_BASE, 11.0])
        .rotated(rotation)
        .face(Direction::North, face([12.0, 0.0, 13.0, 6.0]))
        .face(Direction::East, face([13.0, 0.0, 14.0, 6.0]))
        .face(Direction::South, face([12.0, 0.0, 13.0, 6.0]))
        .face(Direction::West, face([13.0, 0.0, 14.0, 6.0]))
        .face(Direction::Up, face([12.0, 6.0, 13.0, 7.0]))
        .face(Direction::Down, face([13.0, 6.0, 14.0, 7.0]));

    BlockModel::with_parent("block/block")
        .texture("particle", texture)
        .texture("texture", texture)
        .element(flag)
        .element(stick)
}

/// Where overlays come from.
#[derive(Debug, Clone)]
enum OverlaySet {
    /// The built-in flags, painted when processed.
    Flags,
    /// Overlays supplied with the request.
    Custom(Vec<Overlay>),
}

/// Adds a set of turtle overlays.
#[derive(Debug, Clone)]
pub struct OverlayFeature {
    info: FeatureInfo,
    overlays: OverlaySet,
}

impl OverlayFeature {
    /// The built-in "More Turtle Flags" feature.
    pub fn turtle_flags() -> Self {
        Self {
            info: FeatureInfo {
                id: "turtle_flags".to_string(),
                name: "More Turtle Flags".to_string(),
                description: "Add extra flags for turtles to hold.".to_string(),
                icon: "assets/flags.png".to_string(),
                icon_alt: "A Non-Binary and Bisexual flag crossed.".to_string(),
                category: Category::Tweaks,
            },
            overlays: OverlaySet::Flags,
        }
    }

    /// A feature adding user supplied overlays. Fails if any overlay is
    /// invalid.
    pub fn custom(overlays: Vec<Overlay>) -> Result<Self> {
        for overlay in &overlays {
            overlay.validate()?;
        }

        Ok(Self {
            info: FeatureInfo {
                id: "custom_overlays".to_string(),
                name: "Custom Overlays".to_string(),
                description: "Add your own overlays for turtles to hold.".to_string(),
                icon: "assets/flags.png".to_string(),
                icon_alt: "A turtle holding a flag.".to_string(),
                category: Category::Tweaks,
            },
            overlays: OverlaySet::Custom(overlays),
        })
    }

    fn overlays(&self) -> Result<Vec<Overlay>> {
        match &self.overlays {
            OverlaySet::Flags => FLAGS.iter().map(Flag::overlay).collect(),
            OverlaySet::Custom(overlays) => Ok(overlays.clone()),
        }
    }
}

#[async_trait]
impl PackFeature for OverlayFeature {
    fn info(&self) -> &FeatureInfo {
        &self.info
    }

    fn enabled_for(&self, version: GameVersion) -> bool {
        version::select(OVERLAY_SUPPORT, version)
    }

    async fn process(&self, pack: &mut PackOutput) -> Result<()> {
        if !self.enabled_for(pack.version()) {
            debug!(version = %pack.version(), "Turtle overlays are not supported, skipping");
            return Ok(());
        }

        for overlay in self.overlays()? {
            add_overlay(pack, overlay)?;
        }
        Ok(())
    }
}

fn add_overlay(pack: &mut PackOutput, overlay: Overlay) -> Result<()> {
    let namespace = pack.id().to_string();
    let model_path = format!("block/turtle_overlay_{}", overlay.id);
    let model_id = format!("{}:{}", namespace, model_path);

    pack.extra_model(model_id.as_str());
    pack.data_json(
        &namespace,
        &format!("computercraft/turtle_overlay/{}.json", overlay.id),
        &OverlayDefinition {
            model: &model_id,
            show_elf_overlay: overlay.show_elf_overlay,
        },
    )?;
    pack.resource_json(
        &namespace,
        &format!("models/{}.json", model_path),
        &overlay_model(&model_id, overlay.height),
    )?;
    pack.resource(&namespace, &format!("textures/{}.png", model_path), overlay.texture)?;

    for family in TURTLE_FAMILIES {
        let turtle = format!("computercraft:turtle_{}", family);

        let mut ingredients = overlay.ingredients.clone();
        ingredients.push(Ingredient::Item(turtle.clone()));

        let recipe = serde_json::json!({
            "type": "computercraft:transform_shapeless",
            "category": "redstone",
            "function": [
                {
                    "type": "computercraft:copy_components",
                    "exclude": ["computercraft:overlay"],
                    "from": Ingredient::Item(turtle.clone()),
                }
            ],
            "group": format!("computercraft:turtle_{}_overlay", family),
            "ingredients": ingredients,
            "result": {
                "components": { "computercraft:overlay": format!("{}:{}", namespace, overlay.id) },
                "count": 1,
                "id": turtle,
            },
        });
        pack.data_json(
            &namespace,
            &format!("recipe/turtle_{}_overlays/{}.json", family, overlay.id),
            &recipe,
        )?;
    }

    Ok(())
}
