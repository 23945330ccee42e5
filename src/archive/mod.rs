//! Archive extraction
//!
//! An `.ipa` is a zip archive. It is unpacked into a temporary directory that
//! lives as long as the returned [`ExtractedArchive`], so nothing is left
//! behind in the working directory.

use std::fs::File;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::error::{Result, archive_extract_failed, archive_not_found};
use crate::temp::temp_dir_base;

/// Prefix for extraction directories under the system temp dir
const EXTRACT_DIR_PREFIX: &str = "ipa-analyze-";

/// Size of the archive file in bytes
pub fn archive_size(archive: &Path) -> Result<u64> {
    if !archive.is_file() {
        return Err(archive_not_found(archive.display().to_string()));
    }
    Ok(std::fs::metadata(archive)?.len())
}

/// An archive unpacked into a temporary directory
#[derive(Debug)]
pub struct ExtractedArchive {
    dir: TempDir,
    entries: usize,
}

impl ExtractedArchive {
    /// Root of the extracted tree (contains `Payload/` for a valid .ipa)
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Number of entries in the archive
    pub fn entries(&self) -> usize {
        self.entries
    }

    /// Keep the extracted tree on disk and return its path
    pub fn keep(self) -> PathBuf {
        self.dir.keep()
    }
}

/// Extract a zip archive into a fresh temporary directory
pub fn extract_archive(archive: &Path) -> Result<ExtractedArchive> {
    let display = archive.display().to_string();
    if !archive.is_file() {
        return Err(archive_not_found(display));
    }

    let file = File::open(archive).map_err(|e| archive_extract_failed(&display, e.to_string()))?;
    let mut zip =
        zip::ZipArchive::new(file).map_err(|e| archive_extract_failed(&display, e.to_string()))?;

    let dir = tempfile::Builder::new()
        .prefix(EXTRACT_DIR_PREFIX)
        .tempdir_in(temp_dir_base())?;

    log::info!(
        "Extracting {} ({} entries) to {}",
        display,
        zip.len(),
        dir.path().display()
    );

    let entries = zip.len();
    zip.extract(dir.path())
        .map_err(|e| archive_extract_failed(&display, e.to_string()))?;

    Ok(ExtractedArchive { dir, entries })
}
