//! Structural validation of asset directories
//!
//! An asset root is accepted only if every direct child is whitelisted:
//! the manifest, declared doc/license files, ignorable entries, the known
//! subdirectories, or a legacy VERSION file (which is deleted). The first
//! violation aborts validation.

use std::fs;
use std::path::{Path, PathBuf};

use crate::asset::manifest::{AssetManifest, MANIFEST_FILE_NAME};
use crate::error::{BartError, Result};

/// Root entries that are always ignored during validation
pub const IGNORED_ROOT_ITEMS: &[&str] = &[".DS_Store", ".git", ".gitignore", ".svn", ".cons3rt"];

/// Subdirectories an asset may carry at its root
pub const ACCEPTED_DIRS: &[&str] = &["scripts", "media", "config"];

/// Known documentation file names at the asset root
pub const DOC_FILE_NAMES: &[&str] = &["README", "README.md", "README.txt", "HELP", "HELP.md"];

/// Known license file names at the asset root
pub const LICENSE_FILE_NAMES: &[&str] = &["LICENSE", "LICENSE.md", "LICENSE.txt", "NOTICE"];

/// Legacy artifact deleted on sight, with a warning
pub const LEGACY_VERSION_FILE: &str = "VERSION";

/// Validate the structure of an asset directory
///
/// Returns the asset name from the manifest on success. Fails fast with the
/// first structural violation found.
pub fn validate_asset_structure(asset_dir: &Path) -> Result<String> {
    let manifest = AssetManifest::load(asset_dir)?;

    let doc_path = resolve_declared_file(&manifest.documentation_path(asset_dir), "documentationFile")?;
    let license_path = resolve_declared_file(&manifest.license_path(asset_dir), "licenseFile")?;

    if manifest.is_software() {
        check_install_script(asset_dir, &manifest)?;
    }

    let manifest_path = asset_dir.join(MANIFEST_FILE_NAME);
    for entry in fs::read_dir(asset_dir)? {
        let entry = entry?;
        classify_root_entry(
            &entry.path(),
            &manifest_path,
            doc_path.as_deref(),
            license_path.as_deref(),
        )?;
    }

    Ok(manifest.name)
}

/// Require a declared manifest file path to exist as a file
fn resolve_declared_file(path: &Option<PathBuf>, property: &str) -> Result<Option<PathBuf>> {
    match path {
        Some(p) if p.is_file() => Ok(Some(p.clone())),
        Some(p) => Err(BartError::DeclaredFileMissing {
            property: property.to_string(),
            path: p.display().to_string(),
        }),
        None => Ok(None),
    }
}

/// Software assets must declare an installScript that exists under scripts/
fn check_install_script(asset_dir: &Path, manifest: &AssetManifest) -> Result<()> {
    let script_path = manifest
        .install_script_path(asset_dir)
        .ok_or_else(|| BartError::ManifestProperty {
            property: "installScript".to_string(),
            message: "required for software assets".to_string(),
        })?;
    if !script_path.is_file() {
        return Err(BartError::InstallScriptMissing {
            path: script_path.display().to_string(),
        });
    }
    Ok(())
}

/// Classify a single top-level asset entry, in whitelist order
///
/// Path equality against the manifest-declared files is checked before the
/// ignore-list and subdirectory checks.
fn classify_root_entry(
    path: &Path,
    manifest_path: &Path,
    doc_path: Option<&Path>,
    license_path: Option<&Path>,
) -> Result<()> {
    if path == manifest_path || Some(path) == doc_path || Some(path) == license_path {
        return Ok(());
    }

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    if IGNORED_ROOT_ITEMS.contains(&name.as_str()) {
        return Ok(());
    }

    if ACCEPTED_DIRS.contains(&name.as_str()) && path.is_dir() {
        return Ok(());
    }

    if name == LEGACY_VERSION_FILE {
        // Legacy artifact from older asset layouts: remove it, do not fail
        println!(
            "Warning: removing legacy VERSION file: {}",
            path.display()
        );
        fs::remove_file(path)?;
        return Ok(());
    }

    if name == "doc" {
        return Err(BartError::DocItemNotPermitted {
            path: path.display().to_string(),
        });
    }

    if DOC_FILE_NAMES.contains(&name.as_str()) {
        return Err(if doc_path.is_some() {
            BartError::DuplicateDocFile {
                path: path.display().to_string(),
            }
        } else {
            BartError::UndeclaredDocFile {
                path: path.display().to_string(),
            }
        });
    }

    if LICENSE_FILE_NAMES.contains(&name.as_str()) {
        return Err(if license_path.is_some() {
            BartError::DuplicateLicenseFile {
                path: path.display().to_string(),
            }
        } else {
            BartError::UndeclaredLicenseFile {
                path: path.display().to_string(),
            }
        });
    }

    Err(BartError::IllegalRootItem {
        path: path.display().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_manifest(dir: &Path, content: &str) {
        std::fs::write(dir.join(MANIFEST_FILE_NAME), content).unwrap();
    }

    #[test]
    fn test_valid_minimal_asset() {
        let temp = TempDir::new().unwrap();
        write_manifest(temp.path(), "name=My Asset\nassetType=scenario\n");

        let name = validate_asset_structure(temp.path()).unwrap();
        assert_eq!(name, "My Asset");
    }

    #[test]
    fn test_missing_manifest_is_fatal() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("something.txt"), "x").unwrap();

        let result = validate_asset_structure(temp.path());
        assert!(matches!(
            result.unwrap_err(),
            BartError::ManifestNotFound { .. }
        ));
    }

    #[test]
    fn test_accepted_subdirectories() {
        let temp = TempDir::new().unwrap();
        write_manifest(temp.path(), "name=x\nassetType=scenario\n");
        for dir in ACCEPTED_DIRS {
            std::fs::create_dir(temp.path().join(dir)).unwrap();
        }
        std::fs::write(temp.path().join("media/logo.png"), "png").unwrap();

        assert!(validate_asset_structure(temp.path()).is_ok());
    }

    #[test]
    fn test_accepted_name_as_file_rejected() {
        let temp = TempDir::new().unwrap();
        write_manifest(temp.path(), "name=x\nassetType=scenario\n");
        // "media" is only acceptable as a directory
        std::fs::write(temp.path().join("media"), "not a directory").unwrap();

        let result = validate_asset_structure(temp.path());
        assert!(matches!(
            result.unwrap_err(),
            BartError::IllegalRootItem { .. }
        ));
    }

    #[test]
    fn test_ignored_root_items() {
        let temp = TempDir::new().unwrap();
        write_manifest(temp.path(), "name=x\nassetType=scenario\n");
        std::fs::create_dir(temp.path().join(".git")).unwrap();
        std::fs::write(temp.path().join(".DS_Store"), "").unwrap();
        std::fs::write(temp.path().join(".gitignore"), "*.zip").unwrap();

        assert!(validate_asset_structure(temp.path()).is_ok());
    }

    #[test]
    fn test_doc_directory_always_rejected() {
        let temp = TempDir::new().unwrap();
        write_manifest(temp.path(), "name=x\nassetType=scenario\n");
        std::fs::create_dir(temp.path().join("doc")).unwrap();

        let result = validate_asset_structure(temp.path());
        assert!(matches!(
            result.unwrap_err(),
            BartError::DocItemNotPermitted { .. }
        ));
    }

    #[test]
    fn test_doc_file_named_doc_rejected() {
        let temp = TempDir::new().unwrap();
        write_manifest(temp.path(), "name=x\nassetType=scenario\n");
        std::fs::write(temp.path().join("doc"), "docs").unwrap();

        let result = validate_asset_structure(temp.path());
        assert!(matches!(
            result.unwrap_err(),
            BartError::DocItemNotPermitted { .. }
        ));
    }

    #[test]
    fn test_version_file_deleted_not_rejected() {
        let temp = TempDir::new().unwrap();
        write_manifest(temp.path(), "name=x\nassetType=scenario\n");
        let version_path = temp.path().join(LEGACY_VERSION_FILE);
        std::fs::write(&version_path, "1.0.0").unwrap();

        assert!(validate_asset_structure(temp.path()).is_ok());
        assert!(!version_path.exists());
    }

    #[test]
    fn test_declared_doc_file_accepted() {
        let temp = TempDir::new().unwrap();
        write_manifest(
            temp.path(),
            "name=x\nassetType=scenario\ndocumentationFile=README.md\n",
        );
        std::fs::write(temp.path().join("README.md"), "# x").unwrap();

        assert!(validate_asset_structure(temp.path()).is_ok());
    }

    #[test]
    fn test_declared_doc_file_missing() {
        let temp = TempDir::new().unwrap();
        write_manifest(
            temp.path(),
            "name=x\nassetType=scenario\ndocumentationFile=README.md\n",
        );

        let result = validate_asset_structure(temp.path());
        assert!(matches!(
            result.unwrap_err(),
            BartError::DeclaredFileMissing { property, .. } if property == "documentationFile"
        ));
    }

    #[test]
    fn test_undeclared_doc_file_rejected() {
        let temp = TempDir::new().unwrap();
        write_manifest(temp.path(), "name=x\nassetType=scenario\n");
        std::fs::write(temp.path().join("README.md"), "# x").unwrap();

        let result = validate_asset_structure(temp.path());
        assert!(matches!(
            result.unwrap_err(),
            BartError::UndeclaredDocFile { .. }
        ));
    }

    #[test]
    fn test_second_doc_file_is_duplicate() {
        let temp = TempDir::new().unwrap();
        write_manifest(
            temp.path(),
            "name=x\nassetType=scenario\ndocumentationFile=README.md\n",
        );
        std::fs::write(temp.path().join("README.md"), "# x").unwrap();
        std::fs::write(temp.path().join("HELP.md"), "help").unwrap();

        let result = validate_asset_structure(temp.path());
        assert!(matches!(
            result.unwrap_err(),
            BartError::DuplicateDocFile { .. }
        ));
    }

    #[test]
    fn test_undeclared_license_file_rejected() {
        let temp = TempDir::new().unwrap();
        write_manifest(temp.path(), "name=x\nassetType=scenario\n");
        std::fs::write(temp.path().join("LICENSE"), "GPL").unwrap();

        let result = validate_asset_structure(temp.path());
        assert!(matches!(
            result.unwrap_err(),
            BartError::UndeclaredLicenseFile { .. }
        ));
    }

    #[test]
    fn test_declared_license_file_accepted() {
        let temp = TempDir::new().unwrap();
        write_manifest(
            temp.path(),
            "name=x\nassetType=scenario\nlicenseFile=LICENSE\n",
        );
        std::fs::write(temp.path().join("LICENSE"), "GPL").unwrap();

        assert!(validate_asset_structure(temp.path()).is_ok());
    }

    #[test]
    fn test_illegal_root_item_rejected() {
        let temp = TempDir::new().unwrap();
        write_manifest(temp.path(), "name=x\nassetType=scenario\n");
        std::fs::write(temp.path().join("notes.txt"), "scratch").unwrap();

        let result = validate_asset_structure(temp.path());
        assert!(matches!(
            result.unwrap_err(),
            BartError::IllegalRootItem { path } if path.contains("notes.txt")
        ));
    }

    #[test]
    fn test_software_requires_install_script() {
        let temp = TempDir::new().unwrap();
        write_manifest(temp.path(), "name=x\nassetType=software\n");

        let result = validate_asset_structure(temp.path());
        assert!(matches!(
            result.unwrap_err(),
            BartError::ManifestProperty { property, .. } if property == "installScript"
        ));
    }

    #[test]
    fn test_software_install_script_must_exist() {
        let temp = TempDir::new().unwrap();
        write_manifest(
            temp.path(),
            "name=x\nassetType=software\ninstallScript=install.sh\n",
        );
        std::fs::create_dir(temp.path().join("scripts")).unwrap();

        let result = validate_asset_structure(temp.path());
        assert!(matches!(
            result.unwrap_err(),
            BartError::InstallScriptMissing { .. }
        ));
    }

    #[test]
    fn test_software_with_install_script() {
        let temp = TempDir::new().unwrap();
        write_manifest(
            temp.path(),
            "name=Installer\nassetType=Software\ninstallScript=install.sh\n",
        );
        std::fs::create_dir(temp.path().join("scripts")).unwrap();
        std::fs::write(temp.path().join("scripts/install.sh"), "#!/bin/sh\n").unwrap();

        let name = validate_asset_structure(temp.path()).unwrap();
        assert_eq!(name, "Installer");
    }
}
