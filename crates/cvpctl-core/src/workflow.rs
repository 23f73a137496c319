// ── Reconciliation workflows ──
//
// Flows composed from the directory and the staged commit: validating a
// device's whole configlet set, and folding its running config into a
// per-device reconcile configlet.

use std::collections::HashSet;

use cvpctl_api::ReconcileBody;
use tracing::{debug, info, warn};

use crate::commit::{CommitOutcome, DeviceTarget};
use crate::controller::Controller;
use crate::error::CoreError;
use crate::reconcile;

/// Name of the reconcile configlet for a device FQDN.
pub fn reconcile_configlet_name(fqdn: &str) -> String {
    format!("RECONCILE_{fqdn}")
}

/// Result of [`Controller::sync_running_config`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncReport {
    /// The device the hostname resolved to.
    pub target: DeviceTarget,
    /// The reconcile configlet that was applied.
    pub configlet: String,
    pub outcome: CommitOutcome,
}

impl Controller {
    /// Validate every configlet assigned to a device against it.
    ///
    /// Keys are submitted as listed by the controller, duplicates included.
    /// The remote call is not idempotent and is never retried here.
    pub async fn validate_and_reconcile_all(&self, device_key: &str) -> Result<(), CoreError> {
        let configlets = self.directory().configlets_by_device(device_key).await?;
        let keys = reconcile::keys_of(&configlets);

        let distinct: HashSet<&str> = keys.iter().map(String::as_str).collect();
        if distinct.len() < keys.len() {
            warn!(
                device = device_key,
                total = keys.len(),
                distinct = distinct.len(),
                "device lists duplicate configlet assignments"
            );
        }

        debug!(device = device_key, keys = ?keys, "validating all configlets");
        self.client().validate_and_compare(device_key, keys).await?;
        info!(device = device_key, "configlets validated");
        Ok(())
    }

    /// Validate a single configlet against a device.
    pub async fn validate_configlet(&self, device_key: &str, name: &str) -> Result<(), CoreError> {
        let configlet = self.directory().configlet_by_name(name).await?;
        self.client()
            .validate_and_compare(device_key, vec![configlet.key])
            .await?;
        Ok(())
    }

    /// Capture a device's running config as `RECONCILE_<fqdn>` and apply
    /// that configlet with a saved commit.
    ///
    /// The apply is attempted even if creating/updating the reconcile
    /// configlet fails, so an existing one still gets (re)applied. That
    /// creation failure is still returned, ahead of any apply result.
    pub async fn sync_running_config(&self, hostname: &str) -> Result<SyncReport, CoreError> {
        let device = self.device(hostname).await?;
        let target = DeviceTarget::from(&device);
        let config = self.running_config(&target.key).await?;
        debug!(device = %target.key, bytes = config.len(), "got running config");

        let name = reconcile_configlet_name(&device.fqdn);
        let body = ReconcileBody {
            name: name.clone(),
            config,
            reconciled: false,
        };
        let created = self
            .client()
            .update_reconcile_configlet(&target.key, &body)
            .await
            .map_err(CoreError::from);
        if let Err(ref e) = created {
            warn!(device = %target.name, error = %e, "failed to update reconcile configlet");
        }

        let applied = self
            .apply_configlets_to_device(&target, &[name.as_str()], true)
            .await;

        match (created, applied) {
            (Err(create_err), Err(apply_err)) => {
                warn!(device = %target.name, error = %apply_err, "failed to apply reconcile configlet");
                Err(create_err)
            }
            (Err(create_err), Ok(_)) => Err(create_err),
            (Ok(()), applied) => Ok(SyncReport {
                outcome: applied?,
                configlet: name,
                target,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reconcile_name_uses_fqdn() {
        assert_eq!(
            reconcile_configlet_name("leaf1.lab.example.com"),
            "RECONCILE_leaf1.lab.example.com"
        );
    }
}
