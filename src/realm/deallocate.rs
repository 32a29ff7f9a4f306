//! Realm teardown flow
//!
//! Deallocation requires the realm to be empty: deactivate it, detach every
//! project, release active deployment runs and wait until none remain, then
//! delete the remaining runs and deallocate. Per-run release/delete failures
//! during the bulk cleanup are warnings; the flow continues with the next
//! run.

use std::thread;
use std::time::Duration;

use crate::error::Result;
use crate::realm::{RealmCleanup, SearchType};

/// Drives realm teardown against a site client
pub struct RealmReclaimer<'a, C: RealmCleanup> {
    client: &'a C,
    /// Blocking wait between active-run checks
    wait_interval: Duration,
}

impl<'a, C: RealmCleanup> RealmReclaimer<'a, C> {
    pub fn new(client: &'a C, wait_interval: Duration) -> Self {
        Self {
            client,
            wait_interval,
        }
    }

    /// Empty and deallocate a virtualization realm
    pub fn deallocate(&self, cloud_id: u32, vr_id: u32) -> Result<()> {
        println!("Deactivating virtualization realm {}", vr_id);
        self.client.deactivate_realm(vr_id)?;

        self.detach_projects(vr_id)?;
        self.release_active_runs(vr_id)?;
        self.delete_runs(vr_id)?;

        println!("Deallocating virtualization realm {}", vr_id);
        self.client.deallocate_realm(cloud_id, vr_id)?;
        Ok(())
    }

    fn detach_projects(&self, vr_id: u32) -> Result<()> {
        let projects = self.client.list_realm_projects(vr_id)?;
        if projects.is_empty() {
            println!("No projects attached to realm {}", vr_id);
            return Ok(());
        }
        for project_id in projects {
            println!("Detaching project {} from realm {}", project_id, vr_id);
            self.client.detach_project(vr_id, project_id)?;
        }
        Ok(())
    }

    /// Release every active run, then wait until none are left
    fn release_active_runs(&self, vr_id: u32) -> Result<()> {
        let active = self.client.list_runs(vr_id, SearchType::Active)?;
        if active.is_empty() {
            println!("No active deployment runs in realm {}", vr_id);
            return Ok(());
        }

        for dr_id in active {
            println!("Releasing deployment run {}", dr_id);
            if let Err(e) = self.client.release_run(dr_id) {
                println!("Warning: unable to release deployment run {}: {}", dr_id, e);
            }
        }

        loop {
            let remaining = self.client.list_runs(vr_id, SearchType::Active)?;
            if remaining.is_empty() {
                break;
            }
            println!(
                "{} deployment run(s) still active in realm {}, waiting...",
                remaining.len(),
                vr_id
            );
            thread::sleep(self.wait_interval);
        }
        println!("All deployment runs released in realm {}", vr_id);
        Ok(())
    }

    fn delete_runs(&self, vr_id: u32) -> Result<()> {
        let runs = self.client.list_runs(vr_id, SearchType::All)?;
        if runs.is_empty() {
            println!("No deployment runs to delete in realm {}", vr_id);
            return Ok(());
        }
        for dr_id in runs {
            println!("Deleting deployment run {}", dr_id);
            if let Err(e) = self.client.delete_run(dr_id) {
                println!("Warning: unable to delete deployment run {}: {}", dr_id, e);
            }
        }
        Ok(())
    }
}
