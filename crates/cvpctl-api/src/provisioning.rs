// Provisioning endpoints
//
// The two halves of a topology change: `addTempAction.do` stages an
// action, `saveTopology.do` persists it. Also the reconcile-configlet
// update used by config sync.

use tracing::{debug, info};

use crate::client::CvpClient;
use crate::error::Error;
use crate::models::{AssignmentAction, DataBody, ReconcileBody};

impl CvpClient {
    /// Stage an action without making it durable.
    ///
    /// `POST /web/provisioning/addTempAction.do?format=topology&queryParam=&nodeId=root`
    /// with `{"data": [action]}`
    pub async fn add_temp_action(&self, action: &AssignmentAction) -> Result<(), Error> {
        let url =
            self.web_url("/provisioning/addTempAction.do?format=topology&queryParam=&nodeId=root")?;
        info!(target_device = %action.to_id, "staging action");
        self.post_checked(url, &DataBody { data: [action] }).await
    }

    /// Persist a previously staged action.
    ///
    /// `POST /web/provisioning/v2/saveTopology.do` with `{"data": [action]}`
    pub async fn save_topology(&self, action: &AssignmentAction) -> Result<(), Error> {
        let url = self.web_url("/provisioning/v2/saveTopology.do")?;
        info!(target_device = %action.to_id, "saving topology");
        self.post_checked(url, &DataBody { data: [action] }).await
    }

    /// Create or update a device's reconcile configlet.
    ///
    /// `POST /web/provisioning/updateReconcileConfiglet.do?netElementId={key}`
    pub async fn update_reconcile_configlet(
        &self,
        device_key: &str,
        body: &ReconcileBody,
    ) -> Result<(), Error> {
        let url = self.web_url_with_query(
            "/provisioning/updateReconcileConfiglet.do",
            &[("netElementId", device_key)],
        )?;
        debug!(device = device_key, name = %body.name, "updating reconcile configlet");
        self.post_checked(url, body).await
    }
}
