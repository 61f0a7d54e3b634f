//! Zip export for data packs, resource packs and mod jars.

use crate::content::FileContent;
use crate::error::Result;
use crate::pack::Archive;
use std::io::{Cursor, Write};
use std::path::Path;
use tracing::debug;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Encode an archive as a zip file, in path order.
pub fn to_zip_bytes(archive: &Archive) -> Result<Vec<u8>> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for (path, contents) in archive.iter() {
        writer.start_file(path, options)?;
        match contents {
            FileContent::Text(text) => writer.write_all(text.as_bytes())?,
            FileContent::Binary(data) => writer.write_all(data)?,
            FileContent::Base64(_) => writer.write_all(&contents.bytes()?)?,
        }
    }

    let bytes = writer.finish()?.into_inner();
    debug!(files = archive.len(), bytes = bytes.len(), "Wrote zip");
    Ok(bytes)
}

/// Write an archive to a zip file at `path`.
pub fn write_zip<P: AsRef<Path>>(archive: &Archive, path: P) -> Result<()> {
    let bytes = to_zip_bytes(archive)?;
    std::fs::write(path, bytes)?;
    Ok(())
}
