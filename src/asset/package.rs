//! Asset zip packaging
//!
//! Validates the asset directory, then assembles a deterministic zip of its
//! contents. The archive is built in a temporary file next to the final
//! destination and persisted only on success, so a failed run never leaves
//! a partial zip behind.

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use walkdir::WalkDir;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::asset::validate::validate_asset_structure;
use crate::error::{BartError, Result};

/// Directory names excluded from asset archives, at any depth
pub const IGNORED_DIR_NAMES: &[&str] = &[".git", ".svn", ".cons3rt"];

/// File name prefixes excluded from asset archives (prefix match covers
/// AppleDouble files like `._foo` as well as the exact names)
pub const IGNORED_FILE_PREFIXES: &[&str] = &["._", ".DS_Store", ".gitignore"];

/// Package an asset directory into a zip archive
///
/// Returns the absolute path of the created zip. The output file name is
/// derived from the manifest name (`asset-<name without spaces>.zip`) and an
/// existing zip at that path is overwritten.
pub fn package_asset(asset_dir: &Path, destination: Option<&Path>) -> Result<PathBuf> {
    if !asset_dir.is_dir() {
        return Err(BartError::AssetDirNotFound {
            path: asset_dir.display().to_string(),
        });
    }

    let dest_dir = match destination {
        Some(d) => d.to_path_buf(),
        None => default_destination(),
    };
    fs::create_dir_all(&dest_dir)?;
    if !dest_dir.is_dir() {
        return Err(BartError::DestinationNotDirectory {
            path: dest_dir.display().to_string(),
        });
    }

    let asset_name = validate_asset_structure(asset_dir)?;

    let zip_path = dest_dir.join(format!("asset-{}.zip", asset_name.replace(' ', "")));
    if zip_path.is_file() {
        fs::remove_file(&zip_path)?;
    }

    write_zip(asset_dir, &dest_dir, &zip_path)?;

    Ok(dunce::canonicalize(&zip_path).unwrap_or(zip_path))
}

/// Default destination for asset zips: the platform download directory
fn default_destination() -> PathBuf {
    dirs::download_dir()
        .or_else(|| dirs::home_dir().map(|h| h.join("Downloads")))
        .unwrap_or_else(std::env::temp_dir)
}

/// Whether a file is excluded from the archive
///
/// `relative` is the path below the asset root. A file is skipped when any
/// ancestor directory segment is an ignored directory name, or its file name
/// starts with an ignored prefix.
fn is_ignored(relative: &Path) -> bool {
    let mut components: Vec<&str> = Vec::new();
    for component in relative.components() {
        if let std::path::Component::Normal(os) = component {
            if let Some(s) = os.to_str() {
                components.push(s);
            }
        }
    }

    let Some((file_name, dir_segments)) = components.split_last() else {
        return false;
    };

    if dir_segments
        .iter()
        .any(|segment| IGNORED_DIR_NAMES.contains(segment))
    {
        return true;
    }

    IGNORED_FILE_PREFIXES
        .iter()
        .any(|prefix| file_name.starts_with(prefix))
}

/// Assemble the archive in a temp file and persist it to `zip_path`
fn write_zip(asset_dir: &Path, dest_dir: &Path, zip_path: &Path) -> Result<()> {
    let zip_failed = |reason: String| BartError::ZipCreationFailed {
        path: zip_path.display().to_string(),
        reason,
    };

    let temp = NamedTempFile::new_in(dest_dir).map_err(|e| zip_failed(e.to_string()))?;
    let mut writer = ZipWriter::new(temp);
    let options = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    // Sorted walk for a deterministic member order
    let mut files: Vec<PathBuf> = WalkDir::new(asset_dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.path().to_path_buf())
        .collect();
    files.sort();

    for file_path in files {
        let relative = file_path.strip_prefix(asset_dir).unwrap_or(&file_path);
        if is_ignored(relative) {
            continue;
        }

        writer
            .start_file(archive_name(relative), options)
            .map_err(|e| zip_failed(e.to_string()))?;
        let mut source = File::open(&file_path).map_err(|e| zip_failed(e.to_string()))?;
        io::copy(&mut source, &mut writer).map_err(|e| zip_failed(e.to_string()))?;
    }

    let temp = writer.finish().map_err(|e| zip_failed(e.to_string()))?;
    temp.persist(zip_path)
        .map_err(|e| zip_failed(e.to_string()))?;

    Ok(())
}

/// Archive member name: the relative path with forward slashes
fn archive_name(relative: &Path) -> String {
    relative
        .components()
        .filter_map(|c| match c {
            std::path::Component::Normal(os) => Some(os.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
