//! Typed HTTP wrappers over the CONS3RT ReST API
//!
//! Each method is a direct call to one endpoint: typed ids in, parsed JSON
//! out, errors translated into `BartError` with the URL attached. The realm
//! lifecycle traits are implemented here so the allocation and teardown
//! engines can run against this client or a fake.

#![allow(dead_code)]

use std::fs;
use std::path::Path;

use reqwest::blocking::multipart::Form;
use reqwest::blocking::{Client, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::config::RestUser;
use crate::error::{BartError, Result};
use crate::realm::{RealmApi, RealmCleanup, SearchType};

/// An id/name pair as returned by the site's list endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct NamedItem {
    pub id: u32,
    #[serde(default)]
    pub name: String,
}

/// Blocking CONS3RT ReST client
#[derive(Debug)]
pub struct Cons3rtClient {
    base_url: String,
    user: RestUser,
    http: Client,
}

impl Cons3rtClient {
    /// Create a client for the given site base URL and credentials
    pub fn new(base_url: &str, user: RestUser) -> Result<Self> {
        let mut builder = Client::builder();

        // Certificate auth presents the configured client identity
        if let Some(ref cert_path) = user.cert_file_path {
            let pem = fs::read(cert_path).map_err(|e| BartError::FileReadFailed {
                path: cert_path.display().to_string(),
                reason: e.to_string(),
            })?;
            let identity =
                reqwest::Identity::from_pem(&pem).map_err(|e| BartError::ConfigInvalid {
                    message: format!("invalid client certificate: {}", e),
                })?;
            builder = builder.identity(identity);
        }

        let http = builder.build()?;
        Ok(Self {
            base_url: format!("{}/rest/api", base_url.trim_end_matches('/')),
            user,
            http,
        })
    }

    /// Credentials this client authenticates with
    pub fn user(&self) -> &RestUser {
        &self.user
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// Attach auth headers and execute, rejecting non-success statuses
    fn execute(&self, request: reqwest::blocking::RequestBuilder, url: &str) -> Result<Response> {
        let mut request = request.header("token", &self.user.token);
        if let Some(ref username) = self.user.username {
            request = request.header("username", username);
        }

        let response = request.send().map_err(|e| BartError::HttpRequestFailed {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        if !response.status().is_success() {
            return Err(BartError::UnexpectedResponse {
                url: url.to_string(),
                message: format!("HTTP status {}", response.status()),
            });
        }
        Ok(response)
    }

    fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.url(path);
        let response = self.execute(self.http.get(&url), &url)?;
        response.json().map_err(|e| BartError::UnexpectedResponse {
            url,
            message: format!("failed to parse response body: {}", e),
        })
    }

    fn put(&self, path: &str) -> Result<Response> {
        let url = self.url(path);
        self.execute(self.http.put(&url), &url)
    }

    fn delete(&self, path: &str) -> Result<Response> {
        let url = self.url(path);
        self.execute(self.http.delete(&url), &url)
    }

    fn post_zip(&self, path: &str, zip_file: &Path) -> Result<Response> {
        let url = self.url(path);
        let form = Form::new()
            .file("file", zip_file)
            .map_err(|e| BartError::FileReadFailed {
                path: zip_file.display().to_string(),
                reason: e.to_string(),
            })?;
        self.execute(self.http.post(&url).multipart(form), &url)
    }

    fn put_zip(&self, path: &str, zip_file: &Path) -> Result<Response> {
        let url = self.url(path);
        let form = Form::new()
            .file("file", zip_file)
            .map_err(|e| BartError::FileReadFailed {
                path: zip_file.display().to_string(),
                reason: e.to_string(),
            })?;
        self.execute(self.http.put(&url).multipart(form), &url)
    }

    // Listings

    pub fn list_projects(&self) -> Result<Vec<NamedItem>> {
        self.get("projects")
    }

    pub fn list_clouds(&self) -> Result<Vec<NamedItem>> {
        self.get("clouds")
    }

    pub fn list_teams(&self) -> Result<Vec<NamedItem>> {
        self.get("teams")
    }

    pub fn list_scenarios(&self) -> Result<Vec<NamedItem>> {
        self.get("scenarios")
    }

    pub fn list_deployments(&self) -> Result<Vec<NamedItem>> {
        self.get("deployments")
    }

    /// Id of a project by its exact name
    pub fn get_project_id(&self, project_name: &str) -> Result<u32> {
        self.list_projects()?
            .into_iter()
            .find(|p| p.name == project_name)
            .map(|p| p.id)
            .ok_or_else(|| BartError::ProjectNotFound {
                name: project_name.to_string(),
            })
    }

    // Virtualization realms

    pub fn list_virtualization_realms(&self, cloud_id: u32) -> Result<Vec<NamedItem>> {
        self.get(&format!("clouds/{}/virtualizationrealms", cloud_id))
    }

    /// Id of a realm by name, if the site has assigned one
    pub fn get_virtualization_realm_id(
        &self,
        cloud_id: u32,
        vr_name: &str,
    ) -> Result<Option<u32>> {
        Ok(self
            .list_virtualization_realms(cloud_id)?
            .into_iter()
            .find(|vr| vr.name == vr_name)
            .map(|vr| vr.id))
    }

    /// Request allocation of a realm; `true` only on a literal affirmation
    pub fn allocate_virtualization_realm(&self, cloud_id: u32) -> Result<bool> {
        let response = self.put(&format!("clouds/{}/virtualizationrealms/allocate", cloud_id))?;
        let body = response.text()?;
        Ok(is_affirmative(&body))
    }

    pub fn add_virtualization_realm_admin(&self, vr_id: u32, username: &str) -> Result<()> {
        self.put(&format!(
            "virtualizationrealms/{}/admins?username={}",
            vr_id, username
        ))?;
        Ok(())
    }

    pub fn add_project_to_virtualization_realm(&self, vr_id: u32, project_id: u32) -> Result<()> {
        self.put(&format!(
            "virtualizationrealms/{}/projects?projectId={}",
            vr_id, project_id
        ))?;
        Ok(())
    }

    pub fn remove_project_from_virtualization_realm(
        &self,
        vr_id: u32,
        project_id: u32,
    ) -> Result<()> {
        self.delete(&format!(
            "virtualizationrealms/{}/projects/{}",
            vr_id, project_id
        ))?;
        Ok(())
    }

    pub fn list_projects_in_virtualization_realm(&self, vr_id: u32) -> Result<Vec<NamedItem>> {
        self.get(&format!("virtualizationrealms/{}/projects", vr_id))
    }

    pub fn deactivate_virtualization_realm(&self, vr_id: u32) -> Result<()> {
        self.put(&format!(
            "virtualizationrealms/{}/activate?activate=false",
            vr_id
        ))?;
        Ok(())
    }

    pub fn deallocate_virtualization_realm(&self, cloud_id: u32, vr_id: u32) -> Result<()> {
        self.delete(&format!(
            "clouds/{}/virtualizationrealms/{}",
            cloud_id, vr_id
        ))?;
        Ok(())
    }

    // Deployment runs

    pub fn list_deployment_runs(&self, vr_id: u32, search: SearchType) -> Result<Vec<NamedItem>> {
        self.get(&format!(
            "virtualizationrealms/{}/deploymentruns?search_type={}",
            vr_id,
            search.as_str()
        ))
    }

    pub fn release_deployment_run(&self, dr_id: u32) -> Result<()> {
        self.put(&format!("deploymentruns/{}/release", dr_id))?;
        Ok(())
    }

    pub fn delete_deployment_run(&self, dr_id: u32) -> Result<()> {
        self.delete(&format!("deploymentruns/{}", dr_id))?;
        Ok(())
    }

    // Assets

    /// Import a new asset from a zip file
    pub fn import_asset(&self, zip_file: &Path) -> Result<()> {
        if !zip_file.is_file() {
            return Err(BartError::FileNotFound {
                path: zip_file.display().to_string(),
            });
        }
        self.post_zip("import/asset", zip_file)?;
        Ok(())
    }

    /// Replace the content of an existing asset from a zip file
    pub fn update_asset_content(&self, asset_id: u32, zip_file: &Path) -> Result<()> {
        if !zip_file.is_file() {
            return Err(BartError::FileNotFound {
                path: zip_file.display().to_string(),
            });
        }
        self.put_zip(&format!("assets/{}/updatecontent", asset_id), zip_file)?;
        Ok(())
    }
}

/// Whether a response body is a literal affirmation
///
/// Anything but "true" (ignoring case and surrounding whitespace) is
/// negative; the allocator treats a negative as immediately fatal.
fn is_affirmative(body: &str) -> bool {
    body.trim().eq_ignore_ascii_case("true")
}

impl RealmApi for Cons3rtClient {
    fn request_allocation(&self, cloud_id: u32) -> Result<bool> {
        self.allocate_virtualization_realm(cloud_id)
    }

    fn find_realm_id(&self, cloud_id: u32, vr_name: &str) -> Result<Option<u32>> {
        self.get_virtualization_realm_id(cloud_id, vr_name)
    }

    fn grant_realm_admin(&self, vr_id: u32, username: &str) -> Result<()> {
        self.add_virtualization_realm_admin(vr_id, username)
    }

    fn attach_project(&self, vr_id: u32, project_id: u32) -> Result<()> {
        self.add_project_to_virtualization_realm(vr_id, project_id)
    }
}

impl RealmCleanup for Cons3rtClient {
    fn deactivate_realm(&self, vr_id: u32) -> Result<()> {
        self.deactivate_virtualization_realm(vr_id)
    }

    fn list_realm_projects(&self, vr_id: u32) -> Result<Vec<u32>> {
        Ok(self
            .list_projects_in_virtualization_realm(vr_id)?
            .into_iter()
            .map(|p| p.id)
            .collect())
    }

    fn detach_project(&self, vr_id: u32, project_id: u32) -> Result<()> {
        self.remove_project_from_virtualization_realm(vr_id, project_id)
    }

    fn list_runs(&self, vr_id: u32, search: SearchType) -> Result<Vec<u32>> {
        Ok(self
            .list_deployment_runs(vr_id, search)?
            .into_iter()
            .map(|dr| dr.id)
            .collect())
    }

    fn release_run(&self, dr_id: u32) -> Result<()> {
        self.release_deployment_run(dr_id)
    }

    fn delete_run(&self, dr_id: u32) -> Result<()> {
        self.delete_deployment_run(dr_id)
    }

    fn deallocate_realm(&self, cloud_id: u32, vr_id: u32) -> Result<()> {
        self.deallocate_virtualization_realm(cloud_id, vr_id)
    }
}
