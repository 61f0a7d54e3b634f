//! Error types for pack generation.

use thiserror::Error;

/// Result type alias using PackError.
pub type Result<T> = std::result::Result<T, PackError>;

/// Main error type for pack generation.
///
/// Any of these aborts the generation it was raised in; no archive is
/// produced from a store that failed part-way through.
#[derive(Error, Debug)]
pub enum PackError {
    /// A file was written with an absolute path.
    #[error("Invalid path \"{0}\": paths must be relative")]
    AbsolutePath(String),

    /// A file was written twice to the same location.
    #[error("Duplicate path \"{0}\"")]
    DuplicatePath(String),

    /// The pack namespace does not match `[a-z][a-z0-9_]{3,63}`.
    #[error("Invalid namespace \"{0}\": expected a lowercase letter followed by 3-63 of [a-z0-9_]")]
    InvalidNamespace(String),

    /// A custom overlay has an unusable id or height.
    #[error("Invalid overlay: {0}")]
    InvalidOverlay(String),

    /// A version label did not match any known game version.
    #[error("Unknown Minecraft version: {0}")]
    UnknownVersion(String),

    /// A requested feature is not in the catalogue.
    #[error("Unknown feature: {0}")]
    UnknownFeature(String),

    /// The treasure disk corpus could not be loaded.
    #[error("Failed to load treasure disks: {0}")]
    CorpusLoad(String),

    /// Failed to serialize or parse JSON data.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Failed to write a ZIP archive.
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Failed to encode an image.
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// Base64 file contents could not be decoded.
    #[error("Base64 decode error: {0}")]
    Base64(#[from] base64::DecodeError),

    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
