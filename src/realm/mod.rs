//! Virtualization realm lifecycle driving
//!
//! The site allocates realms asynchronously: a request only starts the
//! provisioning, and the realm id becomes visible some time later. The
//! allocator in this module drives that with a bounded retry/poll loop;
//! the deallocator runs the teardown sequence. Both talk to the site
//! through the traits below so they can be exercised against fakes.

pub mod allocate;
pub mod deallocate;

use std::time::Duration;

use crate::error::{BartError, Result};

/// Site operations needed to allocate a virtualization realm
pub trait RealmApi {
    /// Request allocation of a realm in a cloud; `true` means the site
    /// affirmed that provisioning started
    fn request_allocation(&self, cloud_id: u32) -> Result<bool>;

    /// Look up the id of a realm by name, if the site has assigned one yet
    fn find_realm_id(&self, cloud_id: u32, vr_name: &str) -> Result<Option<u32>>;

    /// Grant a user admin rights on a realm
    fn grant_realm_admin(&self, vr_id: u32, username: &str) -> Result<()>;

    /// Attach a project to a realm
    fn attach_project(&self, vr_id: u32, project_id: u32) -> Result<()>;
}

/// Site operations needed to tear a virtualization realm down
pub trait RealmCleanup {
    fn deactivate_realm(&self, vr_id: u32) -> Result<()>;
    fn list_realm_projects(&self, vr_id: u32) -> Result<Vec<u32>>;
    fn detach_project(&self, vr_id: u32, project_id: u32) -> Result<()>;
    fn list_runs(&self, vr_id: u32, search: SearchType) -> Result<Vec<u32>>;
    fn release_run(&self, dr_id: u32) -> Result<()>;
    fn delete_run(&self, dr_id: u32) -> Result<()>;
    fn deallocate_realm(&self, cloud_id: u32, vr_id: u32) -> Result<()>;
}

/// Retry and poll budget for realm allocation
#[derive(Debug, Clone)]
pub struct AllocationSettings {
    /// Allocation requests to make before giving up
    pub max_retries: u32,
    /// Realm-id queries per allocation request
    pub max_queries: u32,
    /// Blocking wait between queries
    pub poll_interval: Duration,
}

impl Default for AllocationSettings {
    fn default() -> Self {
        Self {
            max_retries: 5,
            max_queries: 45,
            poll_interval: Duration::from_secs(20),
        }
    }
}

/// Deployment run search filters accepted by the site
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchType {
    Active,
    All,
    Available,
    Composing,
    Decomposing,
    Inactive,
    Processing,
    Scheduled,
    Testing,
    ScheduledAndActive,
}

impl SearchType {
    /// Wire value for the search type
    pub fn as_str(self) -> &'static str {
        match self {
            SearchType::Active => "SEARCH_ACTIVE",
            SearchType::All => "SEARCH_ALL",
            SearchType::Available => "SEARCH_AVAILABLE",
            SearchType::Composing => "SEARCH_COMPOSING",
            SearchType::Decomposing => "SEARCH_DECOMPOSING",
            SearchType::Inactive => "SEARCH_INACTIVE",
            SearchType::Processing => "SEARCH_PROCESSING",
            SearchType::Scheduled => "SEARCH_SCHEDULED",
            SearchType::Testing => "SEARCH_TESTING",
            SearchType::ScheduledAndActive => "SEARCH_SCHEDULED_AND_ACTIVE",
        }
    }

    /// Parse a user-provided search type, case-insensitively
    pub fn parse(value: &str) -> Result<Self> {
        match value.to_uppercase().as_str() {
            "SEARCH_ACTIVE" => Ok(SearchType::Active),
            "SEARCH_ALL" => Ok(SearchType::All),
            "SEARCH_AVAILABLE" => Ok(SearchType::Available),
            "SEARCH_COMPOSING" => Ok(SearchType::Composing),
            "SEARCH_DECOMPOSING" => Ok(SearchType::Decomposing),
            "SEARCH_INACTIVE" => Ok(SearchType::Inactive),
            "SEARCH_PROCESSING" => Ok(SearchType::Processing),
            "SEARCH_SCHEDULED" => Ok(SearchType::Scheduled),
            "SEARCH_TESTING" => Ok(SearchType::Testing),
            "SEARCH_SCHEDULED_AND_ACTIVE" => Ok(SearchType::ScheduledAndActive),
            _ => Err(BartError::InvalidSearchType {
                search_type: value.to_string(),
            }),
        }
    }
}
