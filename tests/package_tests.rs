//! Packaging integration tests exercising the produced zip archives

mod common;

use std::fs::File;

use assert_cmd::Command;
use predicates::prelude::*;
use zip::ZipArchive;

#[allow(deprecated)]
fn bart_cmd() -> Command {
    let mut cmd = Command::cargo_bin("bart").unwrap();
    cmd.env_remove("BART_URL");
    cmd
}

fn zip_entry_names(zip_path: &std::path::Path) -> Vec<String> {
    let file = File::open(zip_path).expect("Failed to open zip");
    let mut archive = ZipArchive::new(file).expect("Failed to read zip");
    let mut names = Vec::new();
    for i in 0..archive.len() {
        let entry = archive.by_index(i).expect("Failed to read zip entry");
        names.push(entry.name().to_string());
    }
    names
}

#[test]
fn test_package_produces_named_zip() {
    let asset = common::TestAsset::new("My Asset");
    asset.write_file("media/logo.png", "png bytes");
    let dest = asset.dest_dir();

    bart_cmd()
        .arg("package")
        .arg(&asset.path)
        .args(["--dest"])
        .arg(&dest)
        .assert()
        .success()
        .stdout(predicate::str::contains("asset-MyAsset.zip"));

    let zip_path = dest.join("asset-MyAsset.zip");
    assert!(zip_path.is_file());

    let names = zip_entry_names(&zip_path);
    assert!(names.contains(&"asset.properties".to_string()));
    assert!(names.contains(&"media/logo.png".to_string()));
}

#[test]
fn test_package_excludes_scm_and_hidden_files() {
    let asset = common::TestAsset::new("My Asset");
    asset.write_file("media/logo.png", "png bytes");
    asset.write_file(".git/HEAD", "ref: refs/heads/main");
    asset.write_file(".gitignore", "target/");
    asset.write_file("media/.DS_Store", "junk");
    let dest = asset.dest_dir();

    bart_cmd()
        .arg("package")
        .arg(&asset.path)
        .args(["--dest"])
        .arg(&dest)
        .assert()
        .success();

    let names = zip_entry_names(&dest.join("asset-MyAsset.zip"));
    assert_eq!(
        names,
        vec!["asset.properties".to_string(), "media/logo.png".to_string()]
    );
}

#[test]
fn test_package_is_idempotent() {
    let asset = common::TestAsset::software("Tool", "install.sh");
    let dest = asset.dest_dir();

    for _ in 0..2 {
        bart_cmd()
            .arg("package")
            .arg(&asset.path)
            .args(["--dest"])
            .arg(&dest)
            .assert()
            .success();
    }

    let names = zip_entry_names(&dest.join("asset-Tool.zip"));
    assert_eq!(
        names,
        vec![
            "asset.properties".to_string(),
            "scripts/install.sh".to_string()
        ]
    );
}

#[test]
fn test_package_rejects_invalid_structure_without_zip() {
    let asset = common::TestAsset::new("My Asset");
    asset.write_file("doc/manual.pdf", "pdf");
    let dest = asset.dest_dir();

    bart_cmd()
        .arg("package")
        .arg(&asset.path)
        .args(["--dest"])
        .arg(&dest)
        .assert()
        .failure()
        .stderr(predicate::str::contains("not permitted"));

    assert!(!dest.join("asset-MyAsset.zip").exists());
    // No partial zip or stray temp files either
    let leftovers: Vec<_> = std::fs::read_dir(&dest).unwrap().collect();
    assert!(leftovers.is_empty());
}

#[test]
fn test_package_deletes_legacy_version_file() {
    let asset = common::TestAsset::new("My Asset");
    asset.write_file("VERSION", "1.2.3");
    let dest = asset.dest_dir();

    bart_cmd()
        .arg("package")
        .arg(&asset.path)
        .args(["--dest"])
        .arg(&dest)
        .assert()
        .success();

    assert!(!asset.path.join("VERSION").exists());
    let names = zip_entry_names(&dest.join("asset-MyAsset.zip"));
    assert!(!names.contains(&"VERSION".to_string()));
}

#[test]
fn test_package_missing_directory() {
    let temp = tempfile::TempDir::new().unwrap();
    bart_cmd()
        .arg("package")
        .arg(temp.path().join("nope"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Asset directory not found"));
}
