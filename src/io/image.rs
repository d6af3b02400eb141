//! Image decoding, tile discovery and mosaic persistence

use crate::io::error::{MosaicError, Result};
use image::{DynamicImage, ImageReader, ImageResult, RgbImage};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Decode an image, sniffing the format from content before the extension
///
/// # Errors
///
/// Returns an error if the file cannot be opened or decoded
pub fn decode_image(path: &Path) -> ImageResult<DynamicImage> {
    ImageReader::open(path)?.with_guessed_format()?.decode()
}

/// Load the source photograph
///
/// # Errors
///
/// Returns [`MosaicError::SourceDecode`] if the file cannot be read or decoded
pub fn load_source(path: &Path) -> Result<DynamicImage> {
    decode_image(path).map_err(|source| MosaicError::SourceDecode {
        path: path.to_path_buf(),
        source,
    })
}

/// Recursively list every regular file under a tile directory
///
/// Symbolic links are followed, so linked tiles and linked subdirectories
/// are listed like any other entry. Entries are sorted by file name within
/// each directory, so repeated walks over the same tree yield the same order.
///
/// # Errors
///
/// Returns an error if the directory or any of its children cannot be read,
/// including links that form a cycle
pub fn collect_tile_paths(directory: &Path) -> Result<Vec<PathBuf>> {
    let walker = WalkDir::new(directory)
        .follow_links(true)
        .sort_by_file_name();
    let mut paths = Vec::new();
    for entry in walker {
        let entry = entry.map_err(|error| {
            let path = error
                .path()
                .map_or_else(|| directory.to_path_buf(), Path::to_path_buf);
            MosaicError::FileSystem {
                path,
                operation: "walk tile directory",
                source: error.into(),
            }
        })?;
        if entry.file_type().is_file() {
            paths.push(entry.into_path());
        }
    }
    Ok(paths)
}

/// Destination for a finished mosaic
pub trait MosaicSink {
    /// Persist the mosaic
    ///
    /// # Errors
    ///
    /// Returns an error if the mosaic cannot be written
    fn persist(&mut self, mosaic: &RgbImage) -> Result<()>;
}

/// Writes the mosaic to disk, encoding by the path's extension
#[derive(Clone, Debug)]
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    /// Create a sink writing to `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Output path
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl MosaicSink for FileSink {
    fn persist(&mut self, mosaic: &RgbImage) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| MosaicError::FileSystem {
                path: parent.to_path_buf(),
                operation: "create directory",
                source: e,
            })?;
        }

        mosaic
            .save(&self.path)
            .map_err(|e| MosaicError::ImageExport {
                path: self.path.clone(),
                source: e,
            })
    }
}
