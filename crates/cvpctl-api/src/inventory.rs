// Inventory endpoints
//
// Device lookup, running-config retrieval, and adding devices to the
// inventory.

use tracing::debug;

use crate::client::CvpClient;
use crate::error::Error;
use crate::models::{AddInventoryElement, DataBody, Device, InventoryConfig};

impl CvpClient {
    /// List every device in the inventory.
    ///
    /// `GET /web/inventory/devices`
    pub async fn list_devices(&self) -> Result<Vec<Device>, Error> {
        let url = self.web_url("/inventory/devices")?;
        debug!("listing devices");
        self.get_json(url).await
    }

    /// Find a device by hostname or FQDN.
    ///
    /// Filters the inventory listing; [`Error::NotFound`] if nothing matches.
    pub async fn get_device(&self, name: &str) -> Result<Device, Error> {
        self.list_devices()
            .await?
            .into_iter()
            .find(|d| d.matches_name(name))
            .ok_or_else(|| Error::NotFound {
                entity: "device".into(),
                identifier: name.into(),
            })
    }

    /// Fetch a device's running configuration.
    ///
    /// `GET /web/inventory/device/config?netElementId={key}`
    pub async fn get_inventory_config(&self, device_key: &str) -> Result<String, Error> {
        let url = self.web_url_with_query("/inventory/device/config", &[("netElementId", device_key)])?;
        debug!(device = device_key, "fetching running config");
        let config: InventoryConfig = self.get_json(url).await?;
        Ok(config.output)
    }

    /// Add a device to the inventory under the root container.
    ///
    /// `POST /web/inventory/add/addToInventory.do?startIndex=0&endIndex=15`
    pub async fn add_device(&self, ip_address: &str) -> Result<(), Error> {
        let url = self.web_url("/inventory/add/addToInventory.do?startIndex=0&endIndex=15")?;
        debug!(ip = ip_address, "adding device to inventory");
        let body = DataBody {
            data: vec![AddInventoryElement {
                container_name: "Tenant".into(),
                container_id: "root".into(),
                container_type: "Existing".into(),
                ip_address: ip_address.into(),
                container_list: Vec::new(),
            }],
        };
        self.post_checked(url, &body).await
    }
}
