//! CC: Tweaked Pack Generator CLI
//!
//! Generate data packs, resource packs and mods for CC: Tweaked.

use cct_packgen::{
    export, pack_file_name, version, DirectorySource, DiskSource, GameVersion, JsonSource, PackRequest,
    Session, StaticSource,
};
use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "cct-packgen")]
#[command(author, version, about = "Generate customised CC: Tweaked packs and mods", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List supported Minecraft versions
    Versions,

    /// List the features available for a version
    Features {
        /// Minecraft version (e.g., "1.20.1")
        #[arg(short, long = "mc-version", default_value = "1.21")]
        mc_version: String,
    },

    /// Generate a pack
    Build {
        /// Pack request JSON file. Other options override its values.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Pack display name
        #[arg(short, long)]
        name: Option<String>,

        /// Pack namespace (derived from the name if not given)
        #[arg(long)]
        id: Option<String>,

        /// Minecraft version (e.g., "1.20.1")
        #[arg(short, long = "mc-version")]
        mc_version: Option<String>,

        /// Feature to include (may be repeated)
        #[arg(short, long = "feature")]
        features: Vec<String>,

        /// Checkout of the treasure-disks repository
        #[arg(long, conflicts_with = "treasure_json")]
        treasure_dir: Option<PathBuf>,

        /// JSON file of bundled treasure disks
        #[arg(long)]
        treasure_json: Option<PathBuf>,

        /// Output directory
        #[arg(short, long, default_value = ".")]
        output: PathBuf,

        /// What to write
        #[arg(long, value_enum, default_value = "packs")]
        format: OutputFormat,
    },
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// A data pack and a resource pack, as needed
    Packs,
    /// A single mod jar containing both
    Mod,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Versions => {
            for info in version::VERSIONS {
                println!(
                    "{:<8} data pack format {:<3} resource pack format {}",
                    info.label, info.data_format, info.resource_format
                );
            }
        }
        Commands::Features { mc_version } => {
            let version: GameVersion = mc_version.parse()?;
            let session = Session::new(Arc::new(StaticSource::default()));
            for feature in session.available_features(version) {
                let info = feature.info();
                println!("{:<16} {}", info.id, info.name);
                println!("{:<16} {}", "", info.description);
            }
        }
        Commands::Build {
            config,
            name,
            id,
            mc_version,
            features,
            treasure_dir,
            treasure_json,
            output,
            format,
        } => {
            let mut request = match config {
                Some(path) => PackRequest::from_json_file(&path)?,
                None => {
                    let name = name.clone().ok_or("--name is required without --config")?;
                    let version = mc_version.as_deref().ok_or("--mc-version is required without --config")?;
                    PackRequest::new(name, version.parse()?)
                }
            };
            if let Some(name) = name {
                request.name = name;
            }
            if let Some(version) = mc_version {
                request.version = version.parse()?;
            }
            if let Some(id) = id {
                request.id = Some(id);
            }
            request.features.extend(features);

            let source: Arc<dyn DiskSource> = match (treasure_dir, treasure_json) {
                (Some(dir), _) => Arc::new(DirectorySource::new(dir)),
                (None, Some(json)) => Arc::new(JsonSource::new(json)),
                (None, None) => Arc::new(StaticSource::default()),
            };

            build(&Session::new(source), &request, &output, format).await?;
        }
    }

    Ok(())
}

async fn build(
    session: &Session,
    request: &PackRequest,
    output: &Path,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("Generating {} for Minecraft {}...", request.name, request.version);
    let pack = session.generate(request).await?;

    fs::create_dir_all(output)?;
    let file_name = pack_file_name(&request.name);

    let mut written = Vec::new();
    match format {
        OutputFormat::Mod if pack.is_empty() => {}
        OutputFormat::Mod => {
            let path = output.join(format!("{}.jar", file_name));
            export::write_zip(&pack.make_mod()?, &path)?;
            written.push(path);
        }
        OutputFormat::Packs => {
            if pack.has_data() {
                let path = output.join(format!("{}.zip", file_name));
                export::write_zip(&pack.make_data_pack()?, &path)?;
                written.push(path);
            }
            if pack.has_resources() {
                let path = output.join(format!("{}-resources.zip", file_name));
                export::write_zip(&pack.make_resource_pack()?, &path)?;
                written.push(path);
            }
        }
    }

    if written.is_empty() {
        println!("Nothing to write: no selected feature produced any files.");
    }
    for path in written {
        println!("  Wrote {}", path.display());
    }

    Ok(())
}
