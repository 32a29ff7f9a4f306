//! Error types and handling for Bart
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.

#![allow(dead_code)]

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for Bart operations
#[derive(Error, Diagnostic, Debug)]
pub enum BartError {
    // Asset structure errors
    #[error("Asset manifest not found: {path}")]
    #[diagnostic(
        code(bart::asset::manifest_not_found),
        help("Every asset must have an asset.properties file at its root")
    )]
    ManifestNotFound { path: String },

    #[error("Invalid manifest property '{property}': {message}")]
    #[diagnostic(code(bart::asset::manifest_property))]
    ManifestProperty { property: String, message: String },

    #[error("File declared as '{property}' not found: {path}")]
    #[diagnostic(
        code(bart::asset::declared_file_missing),
        help("Paths in asset.properties are resolved relative to the asset root")
    )]
    DeclaredFileMissing { property: String, path: String },

    #[error("Install script not found: {path}")]
    #[diagnostic(
        code(bart::asset::install_script_missing),
        help("Software assets must keep their installScript under the scripts/ directory")
    )]
    InstallScriptMissing { path: String },

    #[error("A 'doc' item is not permitted at the asset root: {path}")]
    #[diagnostic(
        code(bart::asset::doc_item),
        help("Declare documentation with the documentationFile manifest property instead")
    )]
    DocItemNotPermitted { path: String },

    #[error("Documentation file not declared in the manifest: {path}")]
    #[diagnostic(
        code(bart::asset::undeclared_doc_file),
        help("Declare it with the documentationFile property in asset.properties")
    )]
    UndeclaredDocFile { path: String },

    #[error("Additional documentation file found: {path}")]
    #[diagnostic(
        code(bart::asset::duplicate_doc_file),
        help("Only the file declared as documentationFile may live at the asset root")
    )]
    DuplicateDocFile { path: String },

    #[error("License file not declared in the manifest: {path}")]
    #[diagnostic(
        code(bart::asset::undeclared_license_file),
        help("Declare it with the licenseFile property in asset.properties")
    )]
    UndeclaredLicenseFile { path: String },

    #[error("Additional license file found: {path}")]
    #[diagnostic(
        code(bart::asset::duplicate_license_file),
        help("Only the file declared as licenseFile may live at the asset root")
    )]
    DuplicateLicenseFile { path: String },

    #[error("Item not permitted at the asset root: {path}")]
    #[diagnostic(
        code(bart::asset::illegal_root_item),
        help(
            "Allowed at the asset root: asset.properties, declared doc/license files, and the scripts/, media/, config/ directories"
        )
    )]
    IllegalRootItem { path: String },

    // Packaging errors
    #[error("Asset directory not found: {path}")]
    #[diagnostic(code(bart::package::asset_dir_not_found))]
    AssetDirNotFound { path: String },

    #[error("Destination is not a directory: {path}")]
    #[diagnostic(code(bart::package::bad_destination))]
    DestinationNotDirectory { path: String },

    #[error("Failed to create asset zip '{path}': {reason}")]
    #[diagnostic(code(bart::package::zip_failed))]
    ZipCreationFailed { path: String, reason: String },

    // Virtualization realm errors
    #[error("Allocation request for realm '{vr_name}' in cloud {cloud_id} was not affirmed")]
    #[diagnostic(
        code(bart::realm::allocation_rejected),
        help("A non-affirming response from the site is fatal and is never retried")
    )]
    AllocationRejected { cloud_id: u32, vr_name: String },

    #[error(
        "Realm '{vr_name}' was not allocated after {retries} request(s) of {queries} quer(ies) each"
    )]
    #[diagnostic(code(bart::realm::allocation_exhausted))]
    AllocationExhausted {
        vr_name: String,
        retries: u32,
        queries: u32,
    },

    #[error("Virtualization realm '{vr_name}' not found in cloud {cloud_id}")]
    #[diagnostic(code(bart::realm::not_found))]
    RealmNotFound { cloud_id: u32, vr_name: String },

    #[error("Invalid deployment run search type: {search_type}")]
    #[diagnostic(code(bart::realm::invalid_search_type))]
    InvalidSearchType { search_type: String },

    // Client errors
    #[error("No CONS3RT site URL given")]
    #[diagnostic(
        code(bart::client::url_missing),
        help("Pass --url or set the BART_URL environment variable")
    )]
    SiteUrlMissing,

    #[error("Request to {url} failed: {reason}")]
    #[diagnostic(code(bart::client::request_failed))]
    HttpRequestFailed { url: String, reason: String },

    #[error("Unexpected response from {url}: {message}")]
    #[diagnostic(code(bart::client::unexpected_response))]
    UnexpectedResponse { url: String, message: String },

    #[error("Project not found: {name}")]
    #[diagnostic(code(bart::client::project_not_found))]
    ProjectNotFound { name: String },

    // Configuration errors
    #[error("Configuration file not found: {path}")]
    #[diagnostic(
        code(bart::config::not_found),
        help("Run 'bart config <FILE>' to stage a configuration file")
    )]
    ConfigNotFound { path: String },

    #[error("Failed to parse configuration file: {path}")]
    #[diagnostic(code(bart::config::parse_failed))]
    ConfigParseFailed { path: String, reason: String },

    #[error("Invalid configuration: {message}")]
    #[diagnostic(code(bart::config::invalid))]
    ConfigInvalid { message: String },

    #[error("No ReST API token configured for project: {project}")]
    #[diagnostic(
        code(bart::config::token_not_found),
        help("Add an entry with 'name' and 'rest_key' to the projects list in config.json")
    )]
    ProjectTokenNotFound { project: String },

    #[error("Certificate file not found: {path}")]
    #[diagnostic(code(bart::config::cert_not_found))]
    CertNotFound { path: String },

    // File system errors
    #[error("File not found: {path}")]
    #[diagnostic(code(bart::fs::not_found))]
    FileNotFound { path: String },

    #[error("Failed to read file: {path}")]
    #[diagnostic(code(bart::fs::read_failed))]
    FileReadFailed { path: String, reason: String },

    #[error("Failed to write file: {path}")]
    #[diagnostic(code(bart::fs::write_failed))]
    FileWriteFailed { path: String, reason: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(bart::fs::io_error))]
    IoError { message: String },
}

impl From<std::io::Error> for BartError {
    fn from(err: std::io::Error) -> Self {
        BartError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for BartError {
    fn from(err: serde_json::Error) -> Self {
        BartError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<reqwest::Error> for BartError {
    fn from(err: reqwest::Error) -> Self {
        BartError::HttpRequestFailed {
            url: err
                .url()
                .map(ToString::to_string)
                .unwrap_or_else(|| "unknown".to_string()),
            reason: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, BartError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BartError::ManifestNotFound {
            path: "/tmp/myasset/asset.properties".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Asset manifest not found: /tmp/myasset/asset.properties"
        );
    }

    #[test]
    fn test_error_code() {
        let err = BartError::IllegalRootItem {
            path: "notes.txt".to_string(),
        };
        assert_eq!(
            err.code().map(|c| c.to_string()),
            Some("bart::asset::illegal_root_item".to_string())
        );
    }

    #[test]
    fn test_allocation_exhausted_error() {
        let err = BartError::AllocationExhausted {
            vr_name: "Springfield".to_string(),
            retries: 3,
            queries: 2,
        };
        assert!(err.to_string().contains("Springfield"));
        assert!(err.to_string().contains('3'));
        assert!(err.to_string().contains('2'));
    }

    #[test]
    fn test_allocation_rejected_error() {
        let err = BartError::AllocationRejected {
            cloud_id: 12,
            vr_name: "Springfield".to_string(),
        };
        assert!(err.to_string().contains("was not affirmed"));
        assert!(err.to_string().contains("12"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let bart_err: BartError = io_err.into();
        assert!(matches!(bart_err, BartError::IoError { .. }));
    }

    #[test]
    fn test_json_error_conversion() {
        let parse_result: std::result::Result<serde_json::Value, _> =
            serde_json::from_str("not json");
        let json_err = parse_result.unwrap_err();
        let bart_err: BartError = json_err.into();
        assert!(matches!(bart_err, BartError::ConfigParseFailed { .. }));
    }

    #[test]
    fn test_duplicate_doc_file_error() {
        let err = BartError::DuplicateDocFile {
            path: "HELP.md".to_string(),
        };
        assert!(err.to_string().contains("Additional documentation file"));
        assert!(err.to_string().contains("HELP.md"));
    }
}
