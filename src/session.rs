//! Generation sessions.
//!
//! A [`Session`] owns the feature catalogue and the treasure disk cache, and
//! turns [`PackRequest`]s into populated [`PackOutput`]s. The session may be
//! shared between concurrent generations; each generation gets its own
//! output.

use crate::error::{PackError, Result};
use crate::feature::{self, Overlay, OverlayFeature, PackFeature};
use crate::pack::{is_valid_namespace, make_mod_id, PackOutput};
use crate::treasure::{DiskCache, DiskSource};
use crate::version::GameVersion;
use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

/// What to generate.
#[derive(Debug, Clone, Deserialize)]
pub struct PackRequest {
    /// Display name of the pack.
    pub name: String,
    /// Namespace override. Derived from the name when absent or empty.
    #[serde(default)]
    pub id: Option<String>,
    /// Target Minecraft version, e.g. "1.20.1".
    pub version: GameVersion,
    /// Ids of the features to include.
    #[serde(default)]
    pub features: Vec<String>,
    /// Extra turtle overlays, with base64 textures.
    #[serde(default)]
    pub overlays: Vec<Overlay>,
}

impl PackRequest {
    pub fn new(name: impl Into<String>, version: GameVersion) -> Self {
        Self {
            name: name.into(),
            id: None,
            version,
            features: Vec::new(),
            overlays: Vec::new(),
        }
    }

    /// Use an explicit namespace.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Include a feature by id.
    pub fn with_feature(mut self, id: impl Into<String>) -> Self {
        self.features.push(id.into());
        self
    }

    /// Include a custom overlay.
    pub fn with_overlay(mut self, overlay: Overlay) -> Self {
        self.overlays.push(overlay);
        self
    }

    /// Load a request from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// The namespace files will be written under.
    pub fn namespace(&self) -> String {
        match self.id.as_deref() {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => make_mod_id(&self.name),
        }
    }
}

/// Owns the feature catalogue and shared caches.
pub struct Session {
    disks: Arc<DiskCache>,
    features: Vec<Box<dyn PackFeature>>,
}

impl Session {
    /// Create a session reading treasure disks from `source`.
    pub fn new(source: Arc<dyn DiskSource>) -> Self {
        let disks = Arc::new(DiskCache::new(source));
        let features = feature::catalogue(Arc::clone(&disks));
        Self { disks, features }
    }

    /// Every feature, in display order.
    pub fn features(&self) -> impl Iterator<Item = &(dyn PackFeature + 'static)> {
        self.features.iter().map(|f| f.as_ref())
    }

    /// Features which can be used with a version.
    pub fn available_features(&self, version: GameVersion) -> impl Iterator<Item = &(dyn PackFeature + 'static)> {
        self.features().filter(move |f| f.enabled_for(version))
    }

    /// Find a feature by id.
    pub fn feature(&self, id: &str) -> Option<&dyn PackFeature> {
        self.features().find(|f| f.info().id == id)
    }

    /// The shared treasure disk cache.
    pub fn disk_cache(&self) -> &Arc<DiskCache> {
        &self.disks
    }

    /// Generate a pack.
    pub async fn generate(&self, request: &PackRequest) -> Result<PackOutput> {
        let namespace = request.namespace();
        if !is_valid_namespace(&namespace) {
            return Err(PackError::InvalidNamespace(namespace));
        }

        let custom = if request.overlays.is_empty() {
            None
        } else {
            Some(OverlayFeature::custom(request.overlays.clone())?)
        };

        let mut selected: Vec<&dyn PackFeature> = Vec::new();
        for id in &request.features {
            let feature = self
                .feature(id)
                .ok_or_else(|| PackError::UnknownFeature(id.clone()))?;
            if selected.iter().any(|f| f.info().id == feature.info().id) {
                continue;
            }
            selected.push(feature);
        }

        if let Some(custom) = &custom {
            selected.push(custom);
        }

        selected.retain(|f| {
            let enabled = f.enabled_for(request.version);
            if !enabled {
                warn!(feature = %f.info().id, version = %request.version, "Feature is not available for this version, skipping");
            }
            enabled
        });

        let mut pack = PackOutput::new(request.version, request.name.as_str(), Some(namespace));
        for feature in run_order(selected) {
            info!(feature = %feature.info().id, "Processing feature");
            feature.process(&mut pack).await?;
        }

        info!(
            name = %pack.name(),
            version = %pack.version(),
            has_data = pack.has_data(),
            has_resources = pack.has_resources(),
            "Generated pack"
        );
        Ok(pack)
    }
}

/// Order features for processing. Features which may suspend run after all
/// others have written their files; request order is kept within each group.
fn run_order(mut features: Vec<&dyn PackFeature>) -> Vec<&dyn PackFeature> {
    features.sort_by_key(|f| f.suspends());
    features
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let ids: Vec<_> = self.features().map(|f| f.info().id.as_str()).collect();
        f.debug_struct("Session")
            .field("disks", &self.disks)
            .field("features", &ids)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::to_zip_bytes;
    use crate::treasure::tests::{disk, CountingSource};
    use crate::treasure::{CacheState, StaticSource};
    use std::io::{Cursor, Read};
    use std::sync::atomic::Ordering;

    fn session() -> Session {
        Session::new(Arc::new(StaticSource::new(vec![disk("alice", "hello", 0x4c99b2)])))
    }

    #[test]
    fn test_request_from_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("request.json");
        std::fs::write(
            &path,
            r#"{ "name": "My Pack", "version": "1.21", "features": ["turtle_flags"] }"#,
        )
        .unwrap();

        let request = PackRequest::from_json_file(&path).unwrap();
        assert_eq!(request.name, "My Pack");
        assert_eq!(request.version, GameVersion::V1_21);
        assert_eq!(request.features, vec!["turtle_flags"]);
        assert!(request.overlays.is_empty());
        assert_eq!(request.namespace(), "my_pack");
    }

    #[test]
    fn test_request_with_unknown_version() {
        let result: std::result::Result<PackRequest, _> =
            serde_json::from_str(r#"{ "name": "My Pack", "version": "1.19.2" }"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_id_is_derived() {
        let request = PackRequest::new("My Pack", GameVersion::V1_21).with_id("");
        assert_eq!(request.namespace(), "my_pack");
        assert_eq!(request.with_id("explicit").namespace(), "explicit");
    }

    #[test]
    fn test_available_features() {
        let session = session();
        assert_eq!(session.available_features(GameVersion::V1_20_1).count(), 8);
        assert_eq!(session.available_features(GameVersion::V1_21).count(), 9);
        assert!(session.feature("golden_tools").is_some());
        assert!(session.feature("diamond_tools").is_none());
    }

    #[tokio::test]
    async fn test_netherite_data_pack() {
        let request = PackRequest::new("Netherite Turtles", GameVersion::V1_20_1).with_feature("netherite_tools");
        let pack = session().generate(&request).await.unwrap();

        assert!(pack.has_data());
        assert!(!pack.has_resources());

        let archive = pack.make_data_pack().unwrap();
        let upgrades: Vec<_> = archive
            .paths()
            .filter(|p| p.starts_with("data/minecraft/computercraft/turtle_upgrades/"))
            .collect();
        assert_eq!(upgrades.len(), 5);

        let bytes = to_zip_bytes(&archive).unwrap();
        let mut zip = ::zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut manifest = String::new();
        zip.by_name("pack.mcmeta").unwrap().read_to_string(&mut manifest).unwrap();
        let manifest: serde_json::Value = serde_json::from_str(&manifest).unwrap();
        assert_eq!(manifest["pack"]["pack_format"], 15);
        assert_eq!(manifest["pack"]["description"], "Netherite Turtles");

        let mut pickaxe = String::new();
        zip.by_name("data/minecraft/computercraft/turtle_upgrades/netherite_pickaxe.json")
            .unwrap()
            .read_to_string(&mut pickaxe)
            .unwrap();
        let pickaxe: serde_json::Value = serde_json::from_str(&pickaxe).unwrap();
        assert!(pickaxe["adjective"].is_string());
    }

    #[tokio::test]
    async fn test_overlays_skipped_on_old_versions() {
        let request = PackRequest::new("Flags", GameVersion::V1_20_1).with_feature("turtle_flags");
        let pack = session().generate(&request).await.unwrap();
        assert!(!pack.has_resources());
        assert!(!pack.has_data());
    }

    #[tokio::test]
    async fn test_everything_on_1_21() {
        let session = session();
        let mut request = PackRequest::new("Everything", GameVersion::V1_21);
        for feature in session.features() {
            request = request.with_feature(feature.info().id.clone());
        }

        let pack = session.generate(&request).await.unwrap();
        assert!(pack.has_data());
        assert!(pack.has_resources());
        assert!(pack
            .get_data("data/computercraft/loot_table/treasure_disk.json")
            .is_some());
        assert_eq!(pack.extra_models().count(), 3);

        let jar = pack.make_mod().unwrap();
        assert!(jar.contains("fabric.mod.json"));
        assert!(jar.contains("data/computercraft/tags/block/turtle_can_use.json"));
        assert!(jar.contains("assets/everything/textures/block/turtle_overlay_ace_flag.png"));
    }

    #[tokio::test]
    async fn test_duplicate_feature_ids_run_once() {
        let request = PackRequest::new("Tools", GameVersion::V1_20_6)
            .with_feature("iron_tools")
            .with_feature("iron_tools");
        assert!(session().generate(&request).await.is_ok());
    }

    #[tokio::test]
    async fn test_custom_overlays() {
        let overlay: Overlay = serde_json::from_str(
            r#"{ "id": "pirate_flag", "height": 6, "texture": "iVBORw==", "ingredients": [] }"#,
        )
        .unwrap();

        let request = PackRequest::new("Pirates", GameVersion::V1_21).with_overlay(overlay.clone());
        let pack = session().generate(&request).await.unwrap();
        assert_eq!(
            pack.extra_models().collect::<Vec<_>>(),
            vec!["pirates:block/turtle_overlay_pirate_flag"]
        );

        let request = PackRequest::new("Pirates", GameVersion::V1_20_6).with_overlay(overlay);
        let pack = session().generate(&request).await.unwrap();
        assert!(!pack.has_resources());
    }

    #[tokio::test]
    async fn test_treasure_cached_across_generations() {
        let source = Arc::new(CountingSource {
            disks: vec![disk("alice", "hello", 1)],
            ..Default::default()
        });
        let session = Session::new(source.clone());
        assert_eq!(session.disk_cache().state(), CacheState::NotLoaded);

        for version in GameVersion::ALL {
            let request = PackRequest::new("Treasure", version).with_feature("treasure_disks");
            session.generate(&request).await.unwrap();
        }

        assert_eq!(source.loads.load(Ordering::SeqCst), 1);
        assert_eq!(session.disk_cache().state(), CacheState::Loaded);
    }

    #[tokio::test]
    async fn test_failed_corpus_fails_generation() {
        let source = Arc::new(CountingSource {
            fail: true,
            ..Default::default()
        });
        let session = Session::new(source);

        let request = PackRequest::new("Treasure", GameVersion::V1_21)
            .with_feature("treasure_disks")
            .with_feature("iron_tools");
        assert!(matches!(
            session.generate(&request).await,
            Err(PackError::CorpusLoad(_))
        ));
    }

    #[tokio::test]
    async fn test_invalid_namespace() {
        let request = PackRequest::new("My Pack", GameVersion::V1_21).with_id("My-Pack");
        assert!(matches!(
            session().generate(&request).await,
            Err(PackError::InvalidNamespace(id)) if id == "My-Pack"
        ));

        // Too short once derived.
        let request = PackRequest::new("abc", GameVersion::V1_21);
        assert!(matches!(
            session().generate(&request).await,
            Err(PackError::InvalidNamespace(_))
        ));
    }

    #[tokio::test]
    async fn test_unknown_feature() {
        let request = PackRequest::new("My Pack", GameVersion::V1_21).with_feature("diamond_tools");
        assert!(matches!(
            session().generate(&request).await,
            Err(PackError::UnknownFeature(id)) if id == "diamond_tools"
        ));
    }

    #[test]
    fn test_suspending_features_run_last() {
        let session = session();
        let requested: Vec<_> = ["treasure_disks", "iron_tools", "turtle_levers", "golden_tools"]
            .iter()
            .map(|id| session.feature(id).unwrap())
            .collect();

        let order: Vec<_> = run_order(requested).iter().map(|f| f.info().id.clone()).collect();
        assert_eq!(order, vec!["iron_tools", "turtle_levers", "golden_tools", "treasure_disks"]);
    }

    #[tokio::test]
    async fn test_treasure_requested_first_still_runs_last() {
        let request = PackRequest::new("Treasure", GameVersion::V1_20_1)
            .with_feature("treasure_disks")
            .with_feature("iron_tools");
        let pack = session().generate(&request).await.unwrap();

        assert!(pack
            .get_data("data/minecraft/computercraft/turtle_upgrades/iron_axe.json")
            .is_some());
        assert!(pack
            .get_data("data/computercraft/loot_tables/treasure_disk.json")
            .is_some());
    }

    #[tokio::test]
    async fn test_invalid_custom_overlay() {
        let overlay: Overlay = serde_json::from_str(
            r#"{ "id": "../../../Evil Flag", "height": -40, "texture": "iVBORw==", "ingredients": [] }"#,
        )
        .unwrap();

        let request = PackRequest::new("Pirates", GameVersion::V1_21).with_overlay(overlay);
        assert!(matches!(
            session().generate(&request).await,
            Err(PackError::InvalidOverlay(_))
        ));
    }
}
