// ── Apply / remove ──
//
// Read the device's current set and resolve the requested names, compute
// the resulting set, then run the staged commit. Every lookup happens
// before anything is staged.

use tracing::{info, warn};

use crate::commit::{self, CommitOutcome, DeviceTarget};
use crate::controller::Controller;
use crate::error::CoreError;
use crate::reconcile;

impl Controller {
    /// Associate the named configlets with a device, keeping what it has.
    ///
    /// Configlets already assigned are left in place and not duplicated.
    /// With `save == false` the change is only staged.
    pub async fn apply_configlets_to_device<S: AsRef<str>>(
        &self,
        target: &DeviceTarget,
        names: &[S],
        save: bool,
    ) -> Result<CommitOutcome, CoreError> {
        let directory = self.directory();
        let current = directory.configlets_by_device(&target.key).await?;
        let requested = directory.configlets_by_name(names).await?;

        let assigned = reconcile::merge(&current, &requested);
        info!(
            device = %target.name,
            current = current.len(),
            assigned = assigned.len(),
            "applying configlets"
        );

        let action = commit::association_action(target, &assigned);
        commit::stage_and_commit(self.client(), &action, save).await
    }

    /// Drop the named configlets from a device, keeping the rest.
    ///
    /// The staged action lists both the configlets that stay and the ones
    /// being removed. Names that resolve but are not assigned to the device
    /// are skipped.
    pub async fn remove_configlets_from_device<S: AsRef<str>>(
        &self,
        target: &DeviceTarget,
        names: &[S],
        save: bool,
    ) -> Result<CommitOutcome, CoreError> {
        let directory = self.directory();
        let current = directory.configlets_by_device(&target.key).await?;
        let removal = directory.configlets_by_name(names).await?;

        let (remaining, excluded) = reconcile::partition_removal(&current, &removal);
        if excluded.len() < removal.len() {
            warn!(
                device = %target.name,
                requested = removal.len(),
                assigned = excluded.len(),
                "some configlets to remove are not assigned to the device"
            );
        }
        info!(
            device = %target.name,
            remaining = remaining.len(),
            removed = excluded.len(),
            "removing configlets"
        );

        let action = commit::removal_action(target, &remaining, &excluded);
        commit::stage_and_commit(self.client(), &action, save).await
    }
}
