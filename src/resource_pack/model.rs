//! Block model definitions.
//!
//! Block models define 3D geometry using cuboid elements. These types only
//! need to be written, so they serialize to the vanilla model format and
//! omit anything left at its default.

use crate::types::{Axis, Direction};
use serde::Serialize;
use std::collections::BTreeMap;

/// A block model, written to `models/*.json`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BlockModel {
    /// Parent model to inherit from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,

    /// Texture variable definitions.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub textures: BTreeMap<String, String>,

    /// Model elements (cuboids).
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub elements: Vec<ModelElement>,
}

impl BlockModel {
    /// Create a model inheriting from `parent`.
    pub fn with_parent(parent: impl Into<String>) -> Self {
        Self {
            parent: Some(parent.into()),
            ..Default::default()
        }
    }

    /// Set a texture variable.
    pub fn texture(mut self, name: impl Into<String>, texture: impl Into<String>) -> Self {
        self.textures.insert(name.into(), texture.into());
        self
    }

    /// Add an element.
    pub fn element(mut self, element: ModelElement) -> Self {
        self.elements.push(element);
        self
    }
}

/// A cuboid element within a model.
#[derive(Debug, Clone, Serialize)]
pub struct ModelElement {
    /// Name shown in model editors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Minimum corner (0-16 range).
    pub from: [f32; 3],
    /// Maximum corner (0-16 range).
    pub to: [f32; 3],
    /// Optional rotation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation: Option<ElementRotation>,
    /// Face definitions.
    pub faces: BTreeMap<Direction, ModelFace>,
}

impl ModelElement {
    pub fn new(name: impl Into<String>, from: [f32; 3], to: [f32; 3]) -> Self {
        Self {
            name: Some(name.into()),
            from,
            to,
            rotation: None,
            faces: BTreeMap::new(),
        }
    }

    /// Set the element's rotation.
    pub fn rotated(mut self, rotation: ElementRotation) -> Self {
        self.rotation = Some(rotation);
        self
    }

    /// Add a face.
    pub fn face(mut self, direction: Direction, face: ModelFace) -> Self {
        self.faces.insert(direction, face);
        self
    }
}

/// Element-level rotation.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ElementRotation {
    /// Rotation angle in degrees (-45 to 45, in 22.5 increments).
    pub angle: f32,
    /// Axis to rotate around.
    pub axis: Axis,
    /// Origin point for rotation (in 0-16 Minecraft coordinates).
    pub origin: [f32; 3],
}

/// A face of a model element.
#[derive(Debug, Clone, Serialize)]
pub struct ModelFace {
    /// UV coordinates [u1, v1, u2, v2] in 0-16 range.
    pub uv: [f32; 4],
    /// Texture reference (e.g., "#texture").
    pub texture: String,
}

impl ModelFace {
    pub fn new(uv: [f32; 4], texture: impl Into<String>) -> Self {
        Self {
            uv,
            texture: texture.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_model() {
        let model = BlockModel::with_parent("block/block")
            .texture("texture", "mymod:block/flag")
            .element(
                ModelElement::new("Stick", [0.0, 0.0, 0.0], [1.0, 2.5, 1.0])
                    .rotated(ElementRotation {
                        angle: 22.5,
                        axis: Axis::X,
                        origin: [2.0, 11.0, 10.75],
                    })
                    .face(Direction::Up, ModelFace::new([0.0, 0.0, 1.0, 1.0], "#texture")),
            );

        let json = serde_json::to_value(&model).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "parent": "block/block",
                "textures": { "texture": "mymod:block/flag" },
                "elements": [{
                    "name": "Stick",
                    "from": [0.0, 0.0, 0.0],
                    "to": [1.0, 2.5, 1.0],
                    "rotation": { "angle": 22.5, "axis": "x", "origin": [2.0, 11.0, 10.75] },
                    "faces": { "up": { "uv": [0.0, 0.0, 1.0, 1.0], "texture": "#texture" } },
                }],
            })
        );
    }

    #[test]
    fn test_empty_fields_are_omitted() {
        let json = serde_json::to_string(&BlockModel::default()).unwrap();
        assert_eq!(json, "{}");
    }

    #[test]
    fn test_faces_written_in_direction_order() {
        let mut element = ModelElement::new("Cube", [0.0; 3], [16.0; 3]);
        for direction in Direction::ALL.iter().rev() {
            element = element.face(*direction, ModelFace::new([0.0, 0.0, 16.0, 16.0], "#all"));
        }

        let json = serde_json::to_string(&element).unwrap();
        let order: Vec<_> = Direction::ALL
            .iter()
            .map(|d| json.find(&format!("\"{}\"", d)).unwrap())
            .collect();
        assert!(order.windows(2).all(|w| w[0] < w[1]));
    }
}
