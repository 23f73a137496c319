// ── Configlet directory ──
//
// Name ↔ key translation for everything above it. Each call goes to the
// controller; nothing is cached between operations.

use cvpctl_api::{Configlet, CvpClient};
use tracing::debug;

use crate::error::CoreError;

/// Configlet lookups against one CVP session.
#[derive(Debug, Clone, Copy)]
pub struct Directory<'a> {
    client: &'a CvpClient,
}

impl<'a> Directory<'a> {
    pub fn new(client: &'a CvpClient) -> Self {
        Self { client }
    }

    /// Fetch one configlet by name. [`CoreError::NotFound`] if it has no key.
    pub async fn configlet_by_name(&self, name: &str) -> Result<Configlet, CoreError> {
        Ok(self.client.get_configlet_by_name(name).await?)
    }

    /// Resolve `names` in order, stopping at the first failure.
    pub async fn configlets_by_name<S: AsRef<str>>(
        &self,
        names: &[S],
    ) -> Result<Vec<Configlet>, CoreError> {
        let mut resolved = Vec::with_capacity(names.len());
        for name in names {
            resolved.push(self.configlet_by_name(name.as_ref()).await?);
        }
        debug!(count = resolved.len(), "resolved configlets by name");
        Ok(resolved)
    }

    /// The configlets currently assigned to a device. May be empty.
    pub async fn configlets_by_device(&self, device_key: &str) -> Result<Vec<Configlet>, CoreError> {
        let configlets = self.client.get_configlets_by_device(device_key).await?;
        debug!(
            device = device_key,
            count = configlets.len(),
            "fetched device configlets"
        );
        Ok(configlets)
    }
}
