//! Resource pack assets: block models and textures.
//!
//! These are the building blocks features use when they generate client
//! assets, such as the models and textures of turtle overlays.

pub mod model;
pub mod texture;

pub use model::{BlockModel, ElementRotation, ModelElement, ModelFace};
pub use texture::{Rgba, TextureData};
