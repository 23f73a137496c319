// ── Controller facade ──
//
// One CVP session: builds the HTTP client from `ControllerConfig`, logs in
// and out, and hosts the assignment and workflow operations implemented in
// `assignment.rs` and `workflow.rs`.

use std::future::Future;

use cvpctl_api::transport::{TlsMode, TransportConfig};
use cvpctl_api::{CvpClient, Device};
use tracing::{debug, warn};

use crate::config::{ControllerConfig, TlsVerification};
use crate::directory::Directory;
use crate::error::CoreError;

/// Entry point for consumers.
///
/// Cheap to clone. Operations take `&self` and keep no state between
/// calls, so distinct devices may be worked on concurrently. Concurrent
/// apply/remove against the *same* device is not safe: the controller's
/// staging is last-writer-wins and the current-set read is unguarded.
#[derive(Debug, Clone)]
pub struct Controller {
    config: ControllerConfig,
    client: CvpClient,
}

impl Controller {
    /// Build a controller. Does NOT log in; call [`connect()`](Self::connect).
    pub fn new(config: ControllerConfig) -> Result<Self, CoreError> {
        let transport = build_transport(&config);
        let client = CvpClient::new(config.url.clone(), &transport)?;
        Ok(Self { config, client })
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// The underlying API client.
    pub fn client(&self) -> &CvpClient {
        &self.client
    }

    pub fn directory(&self) -> Directory<'_> {
        Directory::new(&self.client)
    }

    // ── Session lifecycle ────────────────────────────────────────

    /// Log in with the configured credentials, if any.
    pub async fn connect(&self) -> Result<(), CoreError> {
        match self.config.credentials {
            Some(ref creds) => {
                self.client.login(&creds.username, &creds.password).await?;
                debug!(user = %creds.username, "session established");
            }
            None => debug!("no credentials configured, skipping login"),
        }
        Ok(())
    }

    /// Log out. Failures are logged, not returned.
    pub async fn disconnect(&self) {
        if self.config.credentials.is_none() {
            return;
        }
        if let Err(e) = self.client.logout().await {
            warn!(error = %e, "logout failed");
        }
    }

    /// Connect, run `f`, disconnect, and return `f`'s result.
    pub async fn oneshot<F, Fut, T>(config: ControllerConfig, f: F) -> Result<T, CoreError>
    where
        F: FnOnce(Controller) -> Fut,
        Fut: Future<Output = Result<T, CoreError>>,
    {
        let controller = Controller::new(config)?;
        controller.connect().await?;
        let result = f(controller.clone()).await;
        controller.disconnect().await;
        result
    }

    // ── Inventory & configlet passthroughs ───────────────────────

    /// Find a device by hostname or FQDN.
    pub async fn device(&self, name: &str) -> Result<Device, CoreError> {
        Ok(self.client.get_device(name).await?)
    }

    pub async fn list_devices(&self) -> Result<Vec<Device>, CoreError> {
        Ok(self.client.list_devices().await?)
    }

    /// A device's running configuration.
    pub async fn running_config(&self, device_key: &str) -> Result<String, CoreError> {
        Ok(self.client.get_inventory_config(device_key).await?)
    }

    pub async fn add_device(&self, ip_address: &str) -> Result<(), CoreError> {
        Ok(self.client.add_device(ip_address).await?)
    }

    pub async fn add_configlet(&self, name: &str, config: &str) -> Result<(), CoreError> {
        Ok(self.client.add_configlet(name, config).await?)
    }

    /// Validate raw config text against a device.
    pub async fn validate_config(&self, device_key: &str, config: &str) -> Result<(), CoreError> {
        Ok(self.client.validate_config(device_key, config).await?)
    }

    /// Resolve a configlet by name and delete it.
    pub async fn delete_configlet(&self, name: &str) -> Result<(), CoreError> {
        let configlet = self.directory().configlet_by_name(name).await?;
        Ok(self.client.delete_configlet(&configlet).await?)
    }
}

fn build_transport(config: &ControllerConfig) -> TransportConfig {
    TransportConfig {
        tls: tls_to_transport(&config.tls),
        timeout: config.timeout,
        cookie_jar: None,
    }
}

fn tls_to_transport(tls: &TlsVerification) -> TlsMode {
    match tls {
        TlsVerification::SystemDefaults => TlsMode::System,
        TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
        TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
    }
}
