// Configlet endpoints
//
// Lookup by name or by device, plus create/delete/validate. Lookups return
// `Configlet` records; everything else only checks the envelope.

use tracing::debug;

use crate::client::CvpClient;
use crate::error::Error;
use crate::models::{Configlet, ConfigletList, DataBody, ValidateConfig, ValidateRequest};

impl CvpClient {
    /// Fetch a configlet by its name.
    ///
    /// `GET /web/configlet/getConfigletByName.do?name={name}`
    ///
    /// Fails with [`Error::NotFound`] when the response carries no key.
    pub async fn get_configlet_by_name(&self, name: &str) -> Result<Configlet, Error> {
        let url = self.web_url_with_query("/configlet/getConfigletByName.do", &[("name", name)])?;
        debug!(name, "fetching configlet");
        let configlet: Configlet = self.get_json(url).await?;
        if configlet.key.is_empty() {
            return Err(Error::NotFound {
                entity: "configlet".into(),
                identifier: name.into(),
            });
        }
        Ok(configlet)
    }

    /// List the configlets currently assigned to a device.
    ///
    /// `GET /web/provisioning/getConfigletsByNetElementId.do?netElementId={key}&queryParam=&startIndex=0&endIndex=0`
    ///
    /// `endIndex=0` asks for the full list. An empty list is a valid answer.
    pub async fn get_configlets_by_device(&self, device_key: &str) -> Result<Vec<Configlet>, Error> {
        let url = self.web_url_with_query(
            "/provisioning/getConfigletsByNetElementId.do",
            &[
                ("netElementId", device_key),
                ("queryParam", ""),
                ("startIndex", "0"),
                ("endIndex", "0"),
            ],
        )?;
        debug!(device = device_key, "listing device configlets");
        let list: ConfigletList = self.get_json(url).await?;
        Ok(list.list)
    }

    /// Create a configlet.
    ///
    /// `POST /web/configlet/addConfiglet.do` with `{"name", "config"}`
    pub async fn add_configlet(&self, name: &str, config: &str) -> Result<(), Error> {
        let url = self.web_url("/configlet/addConfiglet.do")?;
        debug!(name, "adding configlet");
        let body = Configlet {
            name: name.into(),
            key: String::new(),
            config: config.into(),
        };
        self.post_checked(url, &body).await
    }

    /// Delete a configlet.
    ///
    /// `POST /web/configlet/deleteConfiglet.do` with `[{"name", "key"}]`.
    /// The schema rejects `config`, so it is stripped here.
    pub async fn delete_configlet(&self, configlet: &Configlet) -> Result<(), Error> {
        let url = self.web_url("/configlet/deleteConfiglet.do")?;
        debug!(name = %configlet.name, key = %configlet.key, "deleting configlet");
        self.post_checked(url, &[configlet.without_config()]).await
    }

    /// Validate configlets (by key) against a device and compare with its
    /// running configuration.
    ///
    /// `POST /web/provisioning/v2/validateAndCompareConfiglets.do`
    pub async fn validate_and_compare(
        &self,
        device_key: &str,
        configlet_keys: Vec<String>,
    ) -> Result<(), Error> {
        let url = self.web_url("/provisioning/v2/validateAndCompareConfiglets.do")?;
        debug!(
            device = device_key,
            count = configlet_keys.len(),
            "validating configlets"
        );
        let body = ValidateRequest {
            net_element_id: device_key.into(),
            config_id_list: configlet_keys,
            page_type: String::new(),
        };
        self.post_checked(url, &body).await
    }

    /// Validate raw configuration text against a device.
    ///
    /// `POST /web/configlet/validateConfig.do` with `{"data": {"netElementId", "config"}}`
    pub async fn validate_config(&self, device_key: &str, config: &str) -> Result<(), Error> {
        let url = self.web_url("/configlet/validateConfig.do")?;
        debug!(device = device_key, "validating config text");
        let body = DataBody {
            data: ValidateConfig {
                net_element_id: device_key.into(),
                config: config.into(),
            },
        };
        self.post_checked(url, &body).await
    }
}
