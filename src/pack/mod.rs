//! Pack output: accumulating files and assembling archives.
//!
//! Features write into a [`PackOutput`], which keeps data pack files,
//! resource pack files, block tags, translation keys and extra model
//! references apart. Once every feature has run, the output is assembled
//! into a data pack, a resource pack, or a mod jar containing both.

pub mod archive;
pub mod descriptor;
pub mod id;

pub use archive::Archive;
pub use id::{is_valid_namespace, make_mod_id, pack_file_name};

use crate::content::FileContent;
use crate::error::{PackError, Result};
use crate::types::ResourceLocation;
use crate::version::{self, GameVersion};
use descriptor::{FabricModJson, PackMcmeta};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, trace};

/// Where extra model references are listed, for CC: Tweaked to load.
pub const EXTRA_MODELS_PATH: &str = "assets/computercraft/extra_models.json";

/// Directory holding block tags. Minecraft 1.21 singularised it.
const BLOCK_TAG_DIRS: &[(GameVersion, &str)] = &[
    (GameVersion::V1_20_1, "tags/blocks"),
    (GameVersion::V1_21, "tags/block"),
];

/// A builder for data and resource packs.
///
/// A fresh output is created for every generation. Files are only ever
/// added: writing a path twice is an error rather than an overwrite.
#[derive(Debug, Clone)]
pub struct PackOutput {
    data: BTreeMap<String, FileContent>,
    assets: BTreeMap<String, FileContent>,
    translations: BTreeSet<String>,
    extra_models: BTreeSet<String>,
    block_tags: BTreeMap<ResourceLocation, Vec<String>>,

    version: GameVersion,
    name: String,
    id: String,
}

/// A block tag file.
#[derive(Debug, Serialize)]
struct TagFile<'a> {
    replace: bool,
    values: &'a [String],
}

impl PackOutput {
    /// Create an empty output.
    ///
    /// When `id` is `None` the namespace is derived from `name` with
    /// [`make_mod_id`].
    pub fn new(version: GameVersion, name: impl Into<String>, id: Option<String>) -> Self {
        let name = name.into();
        let id = id.unwrap_or_else(|| make_mod_id(&name));
        Self {
            data: BTreeMap::new(),
            assets: BTreeMap::new(),
            translations: BTreeSet::new(),
            extra_models: BTreeSet::new(),
            block_tags: BTreeMap::new(),
            version,
            name,
            id,
        }
    }

    /// The version this pack targets.
    pub fn version(&self) -> GameVersion {
        self.version
    }

    /// The pack's display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The pack's namespace.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Add a data pack entry at `data/{namespace}/{path}`.
    pub fn data(&mut self, namespace: &str, path: &str, contents: impl Into<FileContent>) -> Result<()> {
        let full_path = compose_path("data", namespace, path)?;
        insert_unique(&mut self.data, full_path, contents.into())
    }

    /// Add a data pack entry serialized as JSON.
    pub fn data_json<T: Serialize + ?Sized>(&mut self, namespace: &str, path: &str, value: &T) -> Result<()> {
        self.data(namespace, path, FileContent::json(value)?)
    }

    /// Add a resource pack entry at `assets/{namespace}/{path}`.
    pub fn resource(&mut self, namespace: &str, path: &str, contents: impl Into<FileContent>) -> Result<()> {
        let full_path = compose_path("assets", namespace, path)?;
        insert_unique(&mut self.assets, full_path, contents.into())
    }

    /// Add a resource pack entry serialized as JSON.
    pub fn resource_json<T: Serialize + ?Sized>(&mut self, namespace: &str, path: &str, value: &T) -> Result<()> {
        self.resource(namespace, path, FileContent::json(value)?)
    }

    /// Add a translation key.
    pub fn translation(&mut self, key: impl Into<String>) {
        self.translations.insert(key.into());
    }

    /// Add an extra model, which CC: Tweaked will load alongside its own.
    pub fn extra_model(&mut self, model: impl Into<String>) {
        self.extra_models.insert(model.into());
    }

    /// Add entries to a block tag, e.g. `computercraft:turtle_can_use`.
    ///
    /// Entries already in the tag are ignored.
    pub fn block_tag<I, S>(&mut self, tag: &str, entries: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values = self.block_tags.entry(ResourceLocation::parse(tag)).or_default();
        for entry in entries {
            let entry = entry.into();
            if !values.contains(&entry) {
                values.push(entry);
            }
        }
    }

    /// Get a data pack entry by its full path (e.g. `data/minecraft/...`).
    pub fn get_data(&self, full_path: &str) -> Option<&FileContent> {
        self.data.get(full_path)
    }

    /// Get a resource pack entry by its full path (e.g. `assets/mymod/...`).
    pub fn get_resource(&self, full_path: &str) -> Option<&FileContent> {
        self.assets.get(full_path)
    }

    /// Get the entries of a block tag.
    pub fn get_block_tag(&self, tag: &str) -> Option<&[String]> {
        self.block_tags.get(&ResourceLocation::parse(tag)).map(|v| v.as_slice())
    }

    /// All translation keys.
    pub fn translations(&self) -> impl Iterator<Item = &str> {
        self.translations.iter().map(|s| s.as_str())
    }

    /// All extra model references.
    pub fn extra_models(&self) -> impl Iterator<Item = &str> {
        self.extra_models.iter().map(|s| s.as_str())
    }

    /// Determine if the data pack has any files.
    pub fn has_data(&self) -> bool {
        !self.data.is_empty() || !self.block_tags.is_empty()
    }

    /// Determine if the resource pack has any files.
    pub fn has_resources(&self) -> bool {
        !self.assets.is_empty() || !self.translations.is_empty() || !self.extra_models.is_empty()
    }

    /// Determine if neither pack has any files, in which case there is
    /// nothing worth building a mod from either.
    pub fn is_empty(&self) -> bool {
        !self.has_data() && !self.has_resources()
    }

    fn fill_data_pack(&self, archive: &mut Archive) -> Result<()> {
        for (path, contents) in &self.data {
            archive.add(path.as_str(), contents.clone())?;
        }

        let tag_dir = version::select(BLOCK_TAG_DIRS, self.version);
        for (tag, values) in &self.block_tags {
            let path = format!("data/{}/{}/{}.json", tag.namespace, tag_dir, tag.path);
            archive.add_json(path, &TagFile { replace: false, values })?;
        }
        Ok(())
    }

    fn fill_resource_pack(&self, archive: &mut Archive) -> Result<()> {
        for (path, contents) in &self.assets {
            archive.add(path.as_str(), contents.clone())?;
        }

        if !self.extra_models.is_empty() {
            let models: Vec<&str> = self.extra_models().collect();
            archive.add_json(EXTRA_MODELS_PATH, &models)?;
        }
        Ok(())
    }

    fn new_archive(&self, pack_format: u32) -> Result<Archive> {
        let mut archive = Archive::new();
        archive.add_json(descriptor::PACK_MCMETA, &PackMcmeta::new(pack_format, &self.name))?;
        Ok(archive)
    }

    /// Assemble the data pack.
    pub fn make_data_pack(&self) -> Result<Archive> {
        let mut archive = self.new_archive(self.version.data_format())?;
        self.fill_data_pack(&mut archive)?;

        debug!(files = archive.len(), version = %self.version, "Assembled data pack");
        Ok(archive)
    }

    /// Assemble the resource pack.
    pub fn make_resource_pack(&self) -> Result<Archive> {
        let mut archive = self.new_archive(self.version.resource_format())?;
        self.fill_resource_pack(&mut archive)?;

        debug!(files = archive.len(), version = %self.version, "Assembled resource pack");
        Ok(archive)
    }

    /// Assemble a mod jar containing both packs, loadable by Fabric and
    /// (Neo)Forge.
    pub fn make_mod(&self) -> Result<Archive> {
        let mut archive = self.new_archive(self.version.data_format())?;
        archive.add(descriptor::JAR_MANIFEST, FileContent::from(descriptor::JAR_MANIFEST_CONTENTS))?;
        self.fill_data_pack(&mut archive)?;
        self.fill_resource_pack(&mut archive)?;

        archive.add_json(descriptor::FABRIC_MOD_JSON, &FabricModJson::new(&self.id, &self.name))?;
        archive.add(
            descriptor::forge_descriptor_path(self.version),
            FileContent::Text(descriptor::mods_toml(&self.id, &self.name)),
        )?;

        debug!(files = archive.len(), version = %self.version, "Assembled mod");
        Ok(archive)
    }
}

/// Build `{root}/{namespace}/{path}`, rejecting absolute paths.
fn compose_path(root: &str, namespace: &str, path: &str) -> Result<String> {
    if path.starts_with('/') {
        return Err(PackError::AbsolutePath(path.to_string()));
    }
    Ok(format!("{}/{}/{}", root, namespace, path))
}

fn insert_unique(files: &mut BTreeMap<String, FileContent>, full_path: String, contents: FileContent) -> Result<()> {
    if files.contains_key(&full_path) {
        return Err(PackError::DuplicatePath(full_path));
    }

    trace!(path = %full_path, "Added file");
    files.insert(full_path, contents);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output(version: GameVersion) -> PackOutput {
        PackOutput::new(version, "Test Pack", None)
    }

    #[test]
    fn test_id_is_derived_from_name() {
        assert_eq!(output(GameVersion::V1_21).id(), "test_pack");
        let explicit = PackOutput::new(GameVersion::V1_21, "Test Pack", Some("custom_id".to_string()));
        assert_eq!(explicit.id(), "custom_id");
    }

    #[test]
    fn test_data_round_trip() {
        let mut pack = output(GameVersion::V1_20_1);
        pack.data("computercraft", "lua/hello.lua", "print('hi')").unwrap();

        assert_eq!(
            pack.get_data("data/computercraft/lua/hello.lua"),
            Some(&FileContent::from("print('hi')"))
        );
        assert!(pack.has_data());
        assert!(!pack.has_resources());
    }

    #[test]
    fn test_duplicate_data_path() {
        let mut pack = output(GameVersion::V1_20_1);
        pack.data("minecraft", "a.json", "1").unwrap();

        let result = pack.data("minecraft", "a.json", "2");
        assert!(matches!(result, Err(PackError::DuplicatePath(p)) if p == "data/minecraft/a.json"));
        assert_eq!(pack.get_data("data/minecraft/a.json"), Some(&FileContent::from("1")));
    }

    #[test]
    fn test_duplicate_resource_path() {
        let mut pack = output(GameVersion::V1_20_1);
        pack.resource("mymod", "models/a.json", "1").unwrap();

        let result = pack.resource("mymod", "models/a.json", "2");
        assert!(matches!(result, Err(PackError::DuplicatePath(p)) if p == "assets/mymod/models/a.json"));
    }

    #[test]
    fn test_absolute_paths_rejected() {
        let mut pack = output(GameVersion::V1_20_1);
        assert!(matches!(pack.data("minecraft", "/etc/passwd", "x"), Err(PackError::AbsolutePath(_))));
        assert!(matches!(pack.resource("minecraft", "/a.png", vec![1u8]), Err(PackError::AbsolutePath(_))));
        assert!(!pack.has_data());
        assert!(!pack.has_resources());
    }

    #[test]
    fn test_data_and_resources_are_separate() {
        // The same relative path may be used in both packs.
        let mut pack = output(GameVersion::V1_20_1);
        pack.data("mymod", "thing.json", "data").unwrap();
        pack.resource("mymod", "thing.json", "asset").unwrap();

        assert_eq!(pack.get_data("data/mymod/thing.json"), Some(&FileContent::from("data")));
        assert_eq!(pack.get_resource("assets/mymod/thing.json"), Some(&FileContent::from("asset")));
        assert_eq!(pack.get_data("assets/mymod/thing.json"), None);

        let data_pack = pack.make_data_pack().unwrap();
        assert!(data_pack.contains("data/mymod/thing.json"));
        assert!(!data_pack.contains("assets/mymod/thing.json"));
    }

    #[test]
    fn test_translations_and_models_are_idempotent() {
        let mut pack = output(GameVersion::V1_21);
        pack.translation("upgrade.mymod.flag.adjective");
        pack.translation("upgrade.mymod.flag.adjective");
        pack.extra_model("mymod:block/flag");
        pack.extra_model("mymod:block/flag");

        assert_eq!(pack.translations().count(), 1);
        assert_eq!(pack.extra_models().collect::<Vec<_>>(), vec!["mymod:block/flag"]);
        assert!(pack.has_resources());
        assert!(!pack.has_data());
    }

    #[test]
    fn test_is_empty() {
        let mut pack = output(GameVersion::V1_21);
        assert!(pack.is_empty());

        pack.block_tag("computercraft:turtle_can_use", ["minecraft:lever"]);
        assert!(!pack.is_empty());

        let mut pack = output(GameVersion::V1_21);
        pack.extra_model("test_pack:block/a");
        assert!(!pack.is_empty());
    }

    #[test]
    fn test_translation_alone_counts_as_resources() {
        let mut pack = output(GameVersion::V1_21);
        pack.translation("some.key");
        assert!(pack.has_resources());
    }

    #[test]
    fn test_data_pack_manifest() {
        let pack = output(GameVersion::V1_20_6);
        let archive = pack.make_data_pack().unwrap();

        let manifest: serde_json::Value =
            serde_json::from_str(archive.text("pack.mcmeta").unwrap()).unwrap();
        assert_eq!(
            manifest,
            serde_json::json!({ "pack": { "pack_format": 41, "description": "Test Pack" } })
        );
        assert_eq!(archive.len(), 1);
    }

    #[test]
    fn test_resource_pack_extra_models() {
        let mut pack = output(GameVersion::V1_21);
        pack.extra_model("test_pack:block/b");
        pack.extra_model("test_pack:block/a");
        pack.resource("test_pack", "textures/block/a.png", FileContent::Base64("iVBORw==".to_string()))
            .unwrap();

        let archive = pack.make_resource_pack().unwrap();
        let manifest: serde_json::Value =
            serde_json::from_str(archive.text("pack.mcmeta").unwrap()).unwrap();
        assert_eq!(manifest["pack"]["pack_format"], 34);

        let models: Vec<String> = serde_json::from_str(archive.text(EXTRA_MODELS_PATH).unwrap()).unwrap();
        assert_eq!(models, vec!["test_pack:block/a", "test_pack:block/b"]);
        assert_eq!(
            archive.get("assets/test_pack/textures/block/a.png"),
            Some(&FileContent::Binary(vec![0x89, b'P', b'N', b'G']))
        );
    }

    #[test]
    fn test_resource_pack_without_extra_models() {
        let mut pack = output(GameVersion::V1_21);
        pack.resource("test_pack", "lang/en_us.json", "{}").unwrap();

        let archive = pack.make_resource_pack().unwrap();
        assert!(!archive.contains(EXTRA_MODELS_PATH));
        assert_eq!(archive.len(), 2);
    }

    #[test]
    fn test_block_tags() {
        let mut pack = output(GameVersion::V1_20_1);
        pack.block_tag("computercraft:turtle_can_use", ["minecraft:lever", "#minecraft:buttons"]);
        pack.block_tag("computercraft:turtle_can_use", ["minecraft:lever", "#computercraft:wired_modem"]);

        assert!(pack.has_data());
        assert_eq!(
            pack.get_block_tag("computercraft:turtle_can_use").unwrap(),
            ["minecraft:lever", "#minecraft:buttons", "#computercraft:wired_modem"]
        );

        let archive = pack.make_data_pack().unwrap();
        let tag: serde_json::Value = serde_json::from_str(
            archive.text("data/computercraft/tags/blocks/turtle_can_use.json").unwrap(),
        )
        .unwrap();
        assert_eq!(
            tag,
            serde_json::json!({
                "replace": false,
                "values": ["minecraft:lever", "#minecraft:buttons", "#computercraft:wired_modem"],
            })
        );
    }

    #[test]
    fn test_block_tag_directory_changes_in_1_21() {
        let mut pack = output(GameVersion::V1_21);
        pack.block_tag("computercraft:turtle_can_use", ["minecraft:lever"]);

        let archive = pack.make_data_pack().unwrap();
        assert!(archive.contains("data/computercraft/tags/block/turtle_can_use.json"));
        assert!(!archive.contains("data/computercraft/tags/blocks/turtle_can_use.json"));
    }

    #[test]
    fn test_block_tag_conflicting_with_data_file() {
        let mut pack = output(GameVersion::V1_21);
        pack.data("computercraft", "tags/block/turtle_can_use.json", "{}").unwrap();
        pack.block_tag("computercraft:turtle_can_use", ["minecraft:lever"]);

        assert!(matches!(pack.make_data_pack(), Err(PackError::DuplicatePath(_))));
    }

    #[test]
    fn test_mod_contents() {
        let mut pack = PackOutput::new(GameVersion::V1_20_1, "Test Pack", Some("test_mod".to_string()));
        pack.data("minecraft", "a.json", "{}").unwrap();
        pack.resource("test_mod", "b.json", "{}").unwrap();
        pack.extra_model("test_mod:block/c");

        let archive = pack.make_mod().unwrap();
        let paths: Vec<_> = archive.paths().collect();
        assert_eq!(
            paths,
            vec![
                "META-INF/MANIFEST.MF",
                "META-INF/mods.toml",
                EXTRA_MODELS_PATH,
                "assets/test_mod/b.json",
                "data/minecraft/a.json",
                "fabric.mod.json",
                "pack.mcmeta",
            ]
        );
        assert_eq!(archive.text("META-INF/MANIFEST.MF"), Some("Manifest-Version: 1.0\n"));

        let manifest: serde_json::Value =
            serde_json::from_str(archive.text("pack.mcmeta").unwrap()).unwrap();
        assert_eq!(manifest["pack"]["pack_format"], 15);

        let fabric: serde_json::Value =
            serde_json::from_str(archive.text("fabric.mod.json").unwrap()).unwrap();
        assert_eq!(fabric["id"], "test_mod");
        assert_eq!(fabric["name"], "Test Pack");
        assert!(archive.text("META-INF/mods.toml").unwrap().contains("modId=\"test_mod\""));
    }

    #[test]
    fn test_mod_uses_neoforge_descriptor_on_newer_versions() {
        for version in [GameVersion::V1_20_6, GameVersion::V1_21] {
            let archive = output(version).make_mod().unwrap();
            assert!(archive.contains("META-INF/neoforge.mods.toml"));
            assert!(!archive.contains("META-INF/mods.toml"));

            let manifest: serde_json::Value =
                serde_json::from_str(archive.text("pack.mcmeta").unwrap()).unwrap();
            assert_eq!(manifest["pack"]["pack_format"], version.data_format());
        }
    }
}
