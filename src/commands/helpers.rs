//! Shared helpers for commands that talk to a CONS3RT site

use std::path::Path;

use crate::client::Cons3rtClient;
use crate::config::Config;
use crate::error::{BartError, Result};

/// Build a site client from the global CLI options
///
/// Credentials come from the config file; the `--project` option selects
/// which project token to authenticate with, otherwise the first usable
/// entry is used.
pub fn build_client(
    url: Option<&str>,
    config_path: Option<&Path>,
    project: Option<&str>,
) -> Result<Cons3rtClient> {
    let url = url.ok_or(BartError::SiteUrlMissing)?;

    let config = Config::load(config_path)?;
    let user = match project {
        Some(name) => config.user_for_project(name)?,
        None => config.default_user()?,
    };

    Cons3rtClient::new(url, user)
}
