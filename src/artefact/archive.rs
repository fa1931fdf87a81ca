//! Zip archive creation for assembled release trees.
//!
//! Entries are stored under a top-level folder named after the directory
//! being archived, so unpacking recreates it. Directory contents are added
//! in sorted order to keep entry layout deterministic for a given tree.

use crate::error::{ReleaseError, Result};
use camino::Utf8Path;
use std::fs;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// Create a zip archive of `source_dir` at `zip_path`.
///
/// # Errors
///
/// Returns [`ReleaseError::StagingFailed`] when `source_dir` has no
/// directory name, [`ReleaseError::Archive`] when the zip writer fails,
/// and [`ReleaseError::Io`] for filesystem errors.
pub fn zip_directory(source_dir: &Utf8Path, zip_path: &Utf8Path) -> Result<()> {
    let dir_name = source_dir
        .file_name()
        .ok_or_else(|| ReleaseError::StagingFailed {
            reason: format!("cannot archive {source_dir}: it has no directory name"),
        })?;
    let file = fs::File::create(zip_path)?;
    let mut writer = ZipWriter::new(file);
    add_directory(&mut writer, source_dir, dir_name)?;
    writer.finish()?;
    log::debug!("archived {source_dir} to {zip_path}");
    Ok(())
}

fn add_directory(writer: &mut ZipWriter<fs::File>, dir: &Utf8Path, prefix: &str) -> Result<()> {
    let mut entries = Vec::new();
    for entry in dir.read_dir_utf8()? {
        entries.push(entry?.into_path());
    }
    entries.sort();

    for path in entries {
        let Some(file_name) = path.file_name() else {
            continue;
        };
        let entry_name = format!("{prefix}/{file_name}");
        if path.is_dir() {
            add_directory(writer, &path, &entry_name)?;
        } else {
            writer.start_file(entry_name.as_str(), SimpleFileOptions::default())?;
            let mut source = fs::File::open(&path)?;
            std::io::copy(&mut source, writer)?;
        }
    }
    Ok(())
}
