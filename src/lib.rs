//! # CC: Tweaked Pack Generator
//!
//! A Rust library for generating customised CC: Tweaked add-ons for
//! Minecraft: data packs, resource packs, and mod jars containing both.
//!
//! ## Overview
//!
//! A pack is built from a selection of features (extra turtle tools, turtle
//! overlays, treasure disks, block tag tweaks). Each feature writes files
//! into a [`PackOutput`], which is then assembled into one or more
//! [`Archive`]s and exported as zip files.
//!
//! ## Quick Start
//!
//! ```ignore
//! use cct_packgen::{export, GameVersion, JsonSource, PackRequest, Session};
//! use std::sync::Arc;
//!
//! // Create a session, reading treasure disks from a bundled corpus
//! let session = Session::new(Arc::new(JsonSource::new("treasure.json")));
//!
//! // Generate a pack
//! let request = PackRequest::new("My Pack", GameVersion::V1_20_1)
//!     .with_feature("netherite_tools")
//!     .with_feature("treasure_disks");
//! let pack = session.generate(&request).await?;
//!
//! // Export the data pack
//! if pack.has_data() {
//!     export::write_zip(&pack.make_data_pack()?, "my-pack.zip")?;
//! }
//! ```

pub mod error;
pub mod version;
pub mod content;
pub mod types;
pub mod pack;
pub mod resource_pack;
pub mod treasure;
pub mod feature;
pub mod session;
pub mod export;

// Re-export main types for convenience
pub use error::{PackError, Result};
pub use version::GameVersion;
pub use content::FileContent;
pub use types::ResourceLocation;
pub use pack::{make_mod_id, pack_file_name, Archive, PackOutput};
pub use treasure::{DirectorySource, DiskCache, DiskSource, JsonSource, StaticSource, TreasureDisk};
pub use feature::{FeatureInfo, Overlay, PackFeature};
pub use session::{PackRequest, Session};
pub use export::{to_zip_bytes, write_zip};
