//! Common test utilities for Bart integration tests

use std::path::PathBuf;
use tempfile::TempDir;

/// An asset directory fixture for integration tests
#[allow(dead_code)]
pub struct TestAsset {
    /// Temporary directory holding the asset
    #[allow(dead_code)]
    pub temp: TempDir,
    /// Path to the asset root
    pub path: PathBuf,
}

#[allow(dead_code)]
impl TestAsset {
    /// Create an asset directory with the given manifest content
    pub fn with_manifest(manifest: &str) -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = temp.path().join("asset");
        std::fs::create_dir_all(&path).expect("Failed to create asset directory");
        std::fs::write(path.join("asset.properties"), manifest)
            .expect("Failed to write manifest");
        Self { temp, path }
    }

    /// Create a minimal valid non-software asset
    pub fn new(name: &str) -> Self {
        Self::with_manifest(&format!("name={}\nassetType=scenario\n", name))
    }

    /// Create a minimal valid software asset with an install script
    pub fn software(name: &str, script: &str) -> Self {
        let asset = Self::with_manifest(&format!(
            "name={}\nassetType=software\ninstallScript={}\n",
            name, script
        ));
        asset.write_file(&format!("scripts/{}", script), "#!/bin/bash\n");
        asset
    }

    /// Write a file under the asset root, creating parent directories
    pub fn write_file(&self, path: &str, content: &str) {
        let file_path = self.path.join(path);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&file_path, content).expect("Failed to write file");
    }

    /// Directory to package zips into, separate from the asset root
    pub fn dest_dir(&self) -> PathBuf {
        let dest = self.temp.path().join("out");
        std::fs::create_dir_all(&dest).expect("Failed to create destination directory");
        dest
    }
}
