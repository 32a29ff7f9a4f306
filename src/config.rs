//! Bart configuration (~/.bart/config.json) and ReST credentials
//!
//! The config file carries a username (or a client certificate path) and a
//! list of projects, each with its own ReST API token. The first usable
//! project entry provides the default credentials.

#![allow(dead_code)]

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{BartError, Result};

/// Config directory name under the home directory
pub const CONFIG_DIR_NAME: &str = ".bart";

/// Config file name inside the config directory
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Credentials for one ReST API session
///
/// Authentication is either username-based or certificate-based; when a
/// certificate is configured it takes precedence.
#[derive(Debug, Clone)]
pub struct RestUser {
    pub token: String,
    pub project_name: String,
    pub username: Option<String>,
    pub cert_file_path: Option<PathBuf>,
}

impl fmt::Display for RestUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ReST user with token: {}, for project: {}",
            self.token, self.project_name
        )?;
        if let Some(ref cert) = self.cert_file_path {
            write!(f, ", using cert auth: {}", cert.display())
        } else if let Some(ref username) = self.username {
            write!(f, ", using username auth: {}", username)
        } else {
            Ok(())
        }
    }
}

/// On-disk config file format
#[derive(Debug, Clone, Deserialize)]
struct ConfigFile {
    /// Site username
    name: Option<String>,
    /// Client certificate file path (takes precedence over the username)
    cert: Option<String>,
    /// Per-project ReST API tokens
    #[serde(default)]
    projects: Vec<ProjectEntry>,
}

#[derive(Debug, Clone, Deserialize)]
struct ProjectEntry {
    name: Option<String>,
    rest_key: Option<String>,
}

/// Loaded Bart configuration
#[derive(Debug, Clone)]
pub struct Config {
    data: ConfigFile,
}

impl Config {
    /// Default config file path: ~/.bart/config.json
    pub fn default_path() -> PathBuf {
        config_dir().join(CONFIG_FILE_NAME)
    }

    /// Load configuration from the given path, or the default location
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = path.map(Path::to_path_buf).unwrap_or_else(Self::default_path);
        if !path.is_file() {
            return Err(BartError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }

        let content = fs::read_to_string(&path).map_err(|e| BartError::FileReadFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let data: ConfigFile =
            serde_json::from_str(&content).map_err(|e| BartError::ConfigParseFailed {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;

        if data.projects.is_empty() {
            return Err(BartError::ConfigInvalid {
                message: "at least one project token must be configured in [projects]".to_string(),
            });
        }

        Ok(Self { data })
    }

    /// Credentials from the first project entry carrying a token
    pub fn default_user(&self) -> Result<RestUser> {
        let (project, token) = self
            .data
            .projects
            .iter()
            .find_map(|p| Some((p.name.clone()?, p.rest_key.clone()?)))
            .ok_or_else(|| BartError::ConfigInvalid {
                message: "no project entry with a name and rest_key was found".to_string(),
            })?;
        self.build_user(project, token)
    }

    /// Credentials for a specific configured project
    pub fn user_for_project(&self, project_name: &str) -> Result<RestUser> {
        let token = self
            .data
            .projects
            .iter()
            .filter(|p| p.name.as_deref() == Some(project_name))
            .find_map(|p| p.rest_key.clone())
            .ok_or_else(|| BartError::ProjectTokenNotFound {
                project: project_name.to_string(),
            })?;
        self.build_user(project_name.to_string(), token)
    }

    fn build_user(&self, project_name: String, token: String) -> Result<RestUser> {
        let username = self.data.name.clone();
        let cert_file_path = self.data.cert.as_ref().map(PathBuf::from);

        if username.is_none() && cert_file_path.is_none() {
            return Err(BartError::ConfigInvalid {
                message: "config.json must contain a value for either name or cert".to_string(),
            });
        }

        if let Some(ref cert) = cert_file_path {
            if !cert.is_file() {
                return Err(BartError::CertNotFound {
                    path: cert.display().to_string(),
                });
            }
        }

        Ok(RestUser {
            token,
            project_name,
            username,
            cert_file_path,
        })
    }
}

/// Config directory: ~/.bart
pub fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(CONFIG_DIR_NAME)
}

/// Stage a config file (and optional certificate) into the config directory
///
/// An existing config file is replaced. Returns the staged config path.
pub fn stage_config(config_file: &Path, cert_file: Option<&Path>) -> Result<PathBuf> {
    stage_config_in(&config_dir(), config_file, cert_file)
}

/// Stage into an explicit directory (separated out for tests)
pub fn stage_config_in(
    dir: &Path,
    config_file: &Path,
    cert_file: Option<&Path>,
) -> Result<PathBuf> {
    if !config_file.is_file() {
        return Err(BartError::ConfigNotFound {
            path: config_file.display().to_string(),
        });
    }

    fs::create_dir_all(dir)?;

    let dest = dir.join(CONFIG_FILE_NAME);
    if dest.is_file() {
        fs::remove_file(&dest)?;
    }
    fs::copy(config_file, &dest).map_err(|e| BartError::FileWriteFailed {
        path: dest.display().to_string(),
        reason: e.to_string(),
    })?;

    if let Some(cert) = cert_file {
        if !cert.is_file() {
            return Err(BartError::CertNotFound {
                path: cert.display().to_string(),
            });
        }
        let cert_name = cert.file_name().ok_or_else(|| BartError::CertNotFound {
            path: cert.display().to_string(),
        })?;
        let cert_dest = dir.join(cert_name);
        fs::copy(cert, &cert_dest).map_err(|e| BartError::FileWriteFailed {
            path: cert_dest.display().to_string(),
            reason: e.to_string(),
        })?;
    }

    Ok(dest)
}
