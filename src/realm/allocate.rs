//! Realm allocation retry/poll state machine
//!
//! One allocation attempt is: request provisioning, then poll for the
//! assigned realm id up to the query budget, sleeping a fixed interval
//! between polls. Exhausting the queries re-issues the request, up to the
//! retry budget. A request the site does not affirm is fatal immediately
//! and is never retried.

use std::thread;

use crate::error::{BartError, Result};
use crate::realm::{AllocationSettings, RealmApi};

/// Drives realm allocation against a site client
pub struct RealmAllocator<'a, C: RealmApi> {
    client: &'a C,
    settings: AllocationSettings,
}

impl<'a, C: RealmApi> RealmAllocator<'a, C> {
    pub fn new(client: &'a C, settings: AllocationSettings) -> Self {
        Self { client, settings }
    }

    /// Allocate a realm, grant `username` admin rights on it, and attach
    /// `project_id` to it
    ///
    /// The two post-allocation steps run in sequence with no rollback: if
    /// the project attach fails, the realm stays allocated and the admin
    /// grant stays in place, and the error propagates.
    pub fn allocate(
        &self,
        cloud_id: u32,
        vr_name: &str,
        username: &str,
        project_id: u32,
    ) -> Result<u32> {
        let vr_id = self.await_allocation(cloud_id, vr_name)?;

        self.client.grant_realm_admin(vr_id, username)?;
        self.client.attach_project(vr_id, project_id)?;

        Ok(vr_id)
    }

    /// Run the retry/poll loop until the realm id is known
    fn await_allocation(&self, cloud_id: u32, vr_name: &str) -> Result<u32> {
        let mut retry_count = 0;
        while retry_count < self.settings.max_retries {
            let affirmed = self.client.request_allocation(cloud_id)?;
            if !affirmed {
                return Err(BartError::AllocationRejected {
                    cloud_id,
                    vr_name: vr_name.to_string(),
                });
            }

            for _query in 0..self.settings.max_queries {
                if let Some(vr_id) = self.client.find_realm_id(cloud_id, vr_name)? {
                    return Ok(vr_id);
                }
                thread::sleep(self.settings.poll_interval);
            }

            retry_count += 1;
        }

        Err(BartError::AllocationExhausted {
            vr_name: vr_name.to_string(),
            retries: self.settings.max_retries,
            queries: self.settings.max_queries,
        })
    }
}
