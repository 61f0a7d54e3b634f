//! Manifest and mod loader descriptor files.

use crate::version::{self, GameVersion};
use serde::Serialize;

/// Path of the pack manifest.
pub const PACK_MCMETA: &str = "pack.mcmeta";

/// Path of the jar manifest in a mod.
pub const JAR_MANIFEST: &str = "META-INF/MANIFEST.MF";

/// Contents of the jar manifest.
pub const JAR_MANIFEST_CONTENTS: &str = "Manifest-Version: 1.0\n";

/// Path of the Fabric mod descriptor.
pub const FABRIC_MOD_JSON: &str = "fabric.mod.json";

/// Where the Forge-family descriptor lives. NeoForge renamed it in 1.20.5.
const FORGE_DESCRIPTOR_PATHS: &[(GameVersion, &str)] = &[
    (GameVersion::V1_20_1, "META-INF/mods.toml"),
    (GameVersion::V1_20_6, "META-INF/neoforge.mods.toml"),
];

/// The licence generated mods are published under.
const LICENSE: &str = "CC0-1.0";

/// The version generated mods report.
const MOD_VERSION: &str = "1.0.0";

/// The `pack.mcmeta` manifest.
#[derive(Debug, Clone, Serialize)]
pub struct PackMcmeta<'a> {
    pub pack: PackSection<'a>,
}

/// The `pack` section of a `pack.mcmeta` file.
#[derive(Debug, Clone, Serialize)]
pub struct PackSection<'a> {
    pub pack_format: u32,
    pub description: &'a str,
}

impl<'a> PackMcmeta<'a> {
    pub fn new(pack_format: u32, description: &'a str) -> Self {
        Self {
            pack: PackSection {
                pack_format,
                description,
            },
        }
    }
}

/// A `fabric.mod.json` with no entrypoints.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FabricModJson<'a> {
    pub schema_version: u32,
    pub id: &'a str,
    pub version: &'a str,
    pub name: &'a str,
    pub license: &'a str,
    pub environment: &'a str,
}

impl<'a> FabricModJson<'a> {
    pub fn new(id: &'a str, name: &'a str) -> Self {
        Self {
            schema_version: 1,
            id,
            version: MOD_VERSION,
            name,
            license: LICENSE,
            environment: "*",
        }
    }
}

/// Create a `mods.toml` using Forge's lowcode loader, which loads a jar of
/// plain data and resources without any code.
pub fn mods_toml(id: &str, name: &str) -> String {
    // A JSON string literal is also a valid TOML basic string.
    let display_name = serde_json::Value::from(name).to_string();
    format!(
        "modLoader=\"lowcodefml\"\n\
         loaderVersion=\"[1,)\"\n\
         license=\"{LICENSE}\"\n\
         [[mods]]\n\
         modId=\"{id}\"\n\
         version=\"{MOD_VERSION}\"\n\
         displayName={display_name}"
    )
}

/// Get the path of the Forge-family descriptor for a version.
pub fn forge_descriptor_path(version: GameVersion) -> &'static str {
    version::select(FORGE_DESCRIPTOR_PATHS, version)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_mcmeta_shape() {
        let json = serde_json::to_value(PackMcmeta::new(41, "My Pack")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "pack": { "pack_format": 41, "description": "My Pack" } })
        );
    }

    #[test]
    fn test_fabric_mod_json() {
        let json = serde_json::to_value(FabricModJson::new("my_pack", "My Pack")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "schemaVersion": 1,
                "id": "my_pack",
                "version": "1.0.0",
                "name": "My Pack",
                "license": "CC0-1.0",
                "environment": "*",
            })
        );
    }

    #[test]
    fn test_mods_toml_escapes_display_name() {
        let toml = mods_toml("my_pack", "Say \"hi\"");
        assert_eq!(
            toml,
            "modLoader=\"lowcodefml\"\nloaderVersion=\"[1,)\"\nlicense=\"CC0-1.0\"\n[[mods]]\nmodId=\"my_pack\"\nversion=\"1.0.0\"\ndisplayName=\"Say \\\"hi\\\"\""
        );
    }

    #[test]
    fn test_forge_descriptor_path() {
        assert_eq!(forge_descriptor_path(GameVersion::V1_20_1), "META-INF/mods.toml");
        assert_eq!(forge_descriptor_path(GameVersion::V1_20_6), "META-INF/neoforge.mods.toml");
        assert_eq!(forge_descriptor_path(GameVersion::V1_21), "META-INF/neoforge.mods.toml");
    }
}
