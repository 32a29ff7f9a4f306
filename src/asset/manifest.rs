//! Asset manifest (asset.properties) parsing
//!
//! The manifest is a flat key=value properties file at the asset root.
//! Later duplicate keys overwrite earlier ones.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{BartError, Result};

/// Required descriptor file at the root of every asset
pub const MANIFEST_FILE_NAME: &str = "asset.properties";

/// Directory that install scripts are resolved against
pub const SCRIPTS_DIR_NAME: &str = "scripts";

/// Parsed asset manifest
///
/// Invariant: `name` and `asset_type` are always present and non-blank once
/// a manifest has been loaded; `asset_type` is lower-cased.
#[derive(Debug, Clone)]
pub struct AssetManifest {
    /// Asset name, returned unchanged by validation
    pub name: String,
    /// Asset type (software, scenario, deployment, system, test), lower-cased
    pub asset_type: String,
    /// Install script file name, relative to scripts/ (required for software)
    pub install_script: Option<String>,
    /// Documentation file path, relative to the asset root
    pub documentation_file: Option<String>,
    /// License file path, relative to the asset root
    pub license_file: Option<String>,
}

impl AssetManifest {
    /// Load and parse the manifest from an asset directory
    pub fn load(asset_dir: &Path) -> Result<Self> {
        let manifest_path = asset_dir.join(MANIFEST_FILE_NAME);
        if !manifest_path.is_file() {
            return Err(BartError::ManifestNotFound {
                path: manifest_path.display().to_string(),
            });
        }

        let content =
            fs::read_to_string(&manifest_path).map_err(|e| BartError::FileReadFailed {
                path: manifest_path.display().to_string(),
                reason: e.to_string(),
            })?;

        Self::from_properties(&content)
    }

    /// Parse a manifest from properties-file content
    pub fn from_properties(content: &str) -> Result<Self> {
        let props = parse_properties(content);

        let name = required_property(&props, "name")?;
        let asset_type = required_property(&props, "assetType")?.to_lowercase();

        Ok(Self {
            name,
            asset_type,
            install_script: optional_property(&props, "installScript"),
            documentation_file: optional_property(&props, "documentationFile"),
            license_file: optional_property(&props, "licenseFile"),
        })
    }

    /// Whether this manifest describes a software asset
    pub fn is_software(&self) -> bool {
        self.asset_type == "software"
    }

    /// Declared documentation file resolved against the asset root
    pub fn documentation_path(&self, asset_dir: &Path) -> Option<PathBuf> {
        self.documentation_file.as_ref().map(|f| asset_dir.join(f))
    }

    /// Declared license file resolved against the asset root
    pub fn license_path(&self, asset_dir: &Path) -> Option<PathBuf> {
        self.license_file.as_ref().map(|f| asset_dir.join(f))
    }

    /// Declared install script resolved under the scripts/ directory
    pub fn install_script_path(&self, asset_dir: &Path) -> Option<PathBuf> {
        self.install_script
            .as_ref()
            .map(|f| asset_dir.join(SCRIPTS_DIR_NAME).join(f))
    }
}

/// Parse key=value lines into a map, last-write-wins on duplicate keys
///
/// Blank lines, comment lines (#) and lines without '=' are skipped.
fn parse_properties(content: &str) -> HashMap<String, String> {
    let mut props = HashMap::new();
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some((key, value)) = line.split_once('=') {
            props.insert(key.trim().to_string(), value.trim().to_string());
        }
    }
    props
}

fn required_property(props: &HashMap<String, String>, key: &str) -> Result<String> {
    match props.get(key) {
        Some(value) if !value.trim().is_empty() => Ok(value.clone()),
        Some(_) => Err(BartError::ManifestProperty {
            property: key.to_string(),
            message: "property is blank".to_string(),
        }),
        None => Err(BartError::ManifestProperty {
            property: key.to_string(),
            message: "required property is missing".to_string(),
        }),
    }
}

fn optional_property(props: &HashMap<String, String>, key: &str) -> Option<String> {
    props.get(key).filter(|v| !v.trim().is_empty()).cloned()
}
