// CVP wire models
//
// Field names on these types are the remote system's compatibility contract
// and are reproduced verbatim via serde renames. Response types default
// liberally because CVP omits fields freely across releases.

use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

/// `action` value for an assignment staged against a device.
pub const ACTION_ASSOCIATE: &str = "associate";
/// `nodeType` value when the staged node is a configlet.
pub const NODE_TYPE_CONFIGLET: &str = "configlet";
/// `toIdType` value when the target is a device.
pub const TO_ID_TYPE_NETELEMENT: &str = "netelement";

// ── Response Envelope ────────────────────────────────────────────────

/// Generic CVP response envelope.
///
/// ```json
/// { "data": ..., "errorCode": "", "errorMessage": "" }
/// ```
///
/// A non-empty `errorCode` means the request failed, whatever the HTTP
/// status said.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope<T> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default)]
    pub error_code: String,
    #[serde(default)]
    pub error_message: String,
}

/// Request body wrapper used by the provisioning endpoints: `{"data": ...}`.
#[derive(Debug, Clone, Serialize)]
pub struct DataBody<T> {
    pub data: T,
}

// ── Configlet ────────────────────────────────────────────────────────

/// A named configuration fragment.
///
/// `key` is empty until the configlet exists remotely. `config` is left
/// empty when the text is not needed (deletes, device listings) and is then
/// omitted on the wire.
///
/// `PartialEq` is full structural equality over all three fields. Set
/// membership in the reconciler deliberately does not use it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Configlet {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub key: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub config: String,
}

impl Configlet {
    pub fn new(name: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            key: key.into(),
            config: String::new(),
        }
    }

    /// Same configlet without its config text (the shape delete accepts).
    pub fn without_config(&self) -> Self {
        Self {
            name: self.name.clone(),
            key: self.key.clone(),
            config: String::new(),
        }
    }
}

/// `getConfigletsByNetElementId.do` response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigletList {
    #[serde(default, rename = "configletList")]
    pub list: Vec<Configlet>,
}

// ── Device ───────────────────────────────────────────────────────────

/// Inventory record for a managed device.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    /// MAC-derived net element id.
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub fqdn: String,
    #[serde(default)]
    pub hostname: String,
    #[serde(default)]
    pub ip_address: String,
    #[serde(default)]
    pub system_mac_address: String,
    #[serde(default)]
    pub model_name: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub serial_number: Option<String>,
    #[serde(default)]
    pub container_name: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    /// Catch-all for the remaining inventory fields.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Device {
    /// Whether `name` identifies this device by hostname or FQDN.
    pub fn matches_name(&self, name: &str) -> bool {
        (!self.hostname.is_empty() && self.hostname.eq_ignore_ascii_case(name))
            || (!self.fqdn.is_empty() && self.fqdn.eq_ignore_ascii_case(name))
    }
}

/// `inventory/device/config` response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InventoryConfig {
    #[serde(default)]
    pub output: String,
}

/// Body for `addToInventory.do`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddInventoryElement {
    pub container_name: String,
    pub container_id: String,
    pub container_type: String,
    pub ip_address: String,
    pub container_list: Vec<serde_json::Value>,
}

// ── Provisioning ─────────────────────────────────────────────────────

/// A staged provisioning intent for one device.
///
/// Built per request, submitted once to the staging endpoint and, when
/// saved, once more to the topology commit endpoint.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentAction {
    pub info: String,
    pub info_preview: String,
    pub action: String,
    pub node_type: String,
    pub node_id: String,
    pub to_id: String,
    pub to_id_type: String,
    pub from_id: String,
    pub node_name: String,
    pub from_name: String,
    pub to_name: String,
    pub node_ip_address: String,
    pub node_target_ip_address: String,
    pub configlet_list: Vec<String>,
    pub configlet_names_list: Vec<String>,
    pub ignore_configlet_list: Vec<String>,
    pub ignore_configlet_names_list: Vec<String>,
    #[serde(flatten)]
    pub builders: EmptyBuilderLists,
}

/// The four configlet-builder lists of an [`AssignmentAction`].
///
/// Builders are never staged by this client, but the remote schema expects
/// the fields to be present, so they always serialize as empty arrays.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmptyBuilderLists;

impl Serialize for EmptyBuilderLists {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let none: &[String] = &[];
        let mut s = serializer.serialize_struct("EmptyBuilderLists", 4)?;
        s.serialize_field("configletBuilderList", none)?;
        s.serialize_field("configletBuilderNamesList", none)?;
        s.serialize_field("ignoreConfigletBuilderList", none)?;
        s.serialize_field("ignoreConfigletBuilderNamesList", none)?;
        s.end()
    }
}

/// Body for `validateAndCompareConfiglets.do`.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateRequest {
    pub net_element_id: String,
    pub config_id_list: Vec<String>,
    pub page_type: String,
}

/// Body for `validateConfig.do` (wrapped in `{"data": ...}`).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateConfig {
    pub net_element_id: String,
    pub config: String,
}

/// Body for `updateReconcileConfiglet.do`.
#[derive(Debug, Clone, Serialize)]
pub struct ReconcileBody {
    pub name: String,
    pub config: String,
    pub reconciled: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configlet_omits_empty_key_and_config() {
        let c = Configlet {
            name: "Test1".into(),
            ..Configlet::default()
        };
        assert_eq!(
            serde_json::to_value(&c).unwrap_or_default(),
            serde_json::json!({ "name": "Test1" })
        );
    }

    #[test]
    fn configlet_structural_equality_includes_config() {
        let bare = Configlet::new("A", "1");
        let full = Configlet {
            config: "hostname a".into(),
            ..bare.clone()
        };
        assert_ne!(bare, full);
        assert_eq!(full.without_config(), bare);
    }

    #[test]
    fn action_serializes_builder_lists_empty() {
        let action = AssignmentAction {
            configlet_list: vec!["1".into()],
            ..AssignmentAction::default()
        };
        let value = serde_json::to_value(&action).unwrap_or_default();
        for field in [
            "configletBuilderList",
            "configletBuilderNamesList",
            "ignoreConfigletBuilderList",
            "ignoreConfigletBuilderNamesList",
        ] {
            assert_eq!(value[field], serde_json::json!([]), "{field}");
        }
        assert_eq!(value["configletList"], serde_json::json!(["1"]));
    }

    #[test]
    fn device_matches_hostname_or_fqdn() {
        let device = Device {
            hostname: "leaf1".into(),
            fqdn: "leaf1.lab.example.com".into(),
            ..Device::default()
        };
        assert!(device.matches_name("leaf1"));
        assert!(device.matches_name("LEAF1.lab.example.com"));
        assert!(!device.matches_name("leaf2"));
        assert!(!Device::default().matches_name(""));
    }
}
