// ── Staged commit protocol ──
//
// An assignment change reaches the controller in two steps: the action is
// staged (`addTempAction.do`), then, when the caller asks to save, the
// topology is persisted (`saveTopology.do`). There is no rollback: a failed
// commit leaves the staged action on the controller.

use cvpctl_api::models::{ACTION_ASSOCIATE, NODE_TYPE_CONFIGLET, TO_ID_TYPE_NETELEMENT};
use cvpctl_api::{AssignmentAction, Configlet, CvpClient, Device};
use serde::Serialize;
use tracing::{info, warn};

use crate::error::CoreError;
use crate::reconcile::{keys_of, names_of};

/// How far an assignment change got.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum CommitOutcome {
    /// Staged on the controller, awaiting review and save.
    Staged,
    /// Staged and persisted.
    Committed,
}

/// The device an assignment targets: IP, display name (FQDN), and the
/// MAC-derived key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceTarget {
    pub ip: String,
    pub name: String,
    pub key: String,
}

impl DeviceTarget {
    pub fn new(ip: impl Into<String>, name: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            ip: ip.into(),
            name: name.into(),
            key: key.into(),
        }
    }
}

impl From<&Device> for DeviceTarget {
    fn from(device: &Device) -> Self {
        let key = if device.key.is_empty() {
            &device.system_mac_address
        } else {
            &device.key
        };
        Self::new(&device.ip_address, &device.fqdn, key)
    }
}

fn base_action(target: &DeviceTarget, info: String, info_preview: String) -> AssignmentAction {
    AssignmentAction {
        info,
        info_preview,
        action: ACTION_ASSOCIATE.into(),
        node_type: NODE_TYPE_CONFIGLET.into(),
        to_id: target.key.clone(),
        to_id_type: TO_ID_TYPE_NETELEMENT.into(),
        to_name: target.name.clone(),
        node_ip_address: target.ip.clone(),
        node_target_ip_address: target.ip.clone(),
        ..AssignmentAction::default()
    }
}

/// Action associating exactly `assigned` with the device.
pub fn association_action(target: &DeviceTarget, assigned: &[Configlet]) -> AssignmentAction {
    AssignmentAction {
        configlet_list: keys_of(assigned),
        configlet_names_list: names_of(assigned),
        ..base_action(
            target,
            format!("Configlet Assign to device: {}", target.name),
            format!("<b>Configlet assign</b> to Device {}", target.name),
        )
    }
}

/// Action keeping `remaining` on the device and explicitly dropping `excluded`.
pub fn removal_action(
    target: &DeviceTarget,
    remaining: &[Configlet],
    excluded: &[Configlet],
) -> AssignmentAction {
    AssignmentAction {
        configlet_list: keys_of(remaining),
        configlet_names_list: names_of(remaining),
        ignore_configlet_list: keys_of(excluded),
        ignore_configlet_names_list: names_of(excluded),
        ..base_action(
            target,
            format!("Configlet Remove from device: {}", target.name),
            format!("<b>Configlet remove</b> from Device {}", target.name),
        )
    }
}

/// Stage `action`, then commit it iff `save`.
///
/// A staging failure is returned as-is and nothing is committed. A commit
/// failure is wrapped in [`CoreError::PartialCommit`].
pub async fn stage_and_commit(
    client: &CvpClient,
    action: &AssignmentAction,
    save: bool,
) -> Result<CommitOutcome, CoreError> {
    client.add_temp_action(action).await?;
    info!(device = %action.to_id, "action staged");

    if !save {
        return Ok(CommitOutcome::Staged);
    }

    if let Err(e) = client.save_topology(action).await {
        warn!(device = %action.to_id, error = %e, "commit failed after staging");
        return Err(CoreError::PartialCommit {
            device: action.to_id.clone(),
            source: Box::new(e.into()),
        });
    }
    info!(device = %action.to_id, "topology saved");
    Ok(CommitOutcome::Committed)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn target() -> DeviceTarget {
        DeviceTarget::new("10.0.0.2", "leaf1.lab", "00:00:00:00:00:02")
    }

    #[test]
    fn association_action_lists_assigned_set() {
        let assigned = vec![
            Configlet::new("A", "1"),
            Configlet::new("B", "2"),
            Configlet::new("C", "3"),
        ];
        let action = association_action(&target(), &assigned);

        assert_eq!(action.action, "associate");
        assert_eq!(action.node_type, "configlet");
        assert_eq!(action.to_id_type, "netelement");
        assert_eq!(action.to_id, "00:00:00:00:00:02");
        assert_eq!(action.configlet_list, ["1", "2", "3"]);
        assert_eq!(action.configlet_names_list, ["A", "B", "C"]);
        assert!(action.ignore_configlet_list.is_empty());
        assert!(action.ignore_configlet_names_list.is_empty());
    }

    #[test]
    fn removal_action_lists_both_sides() {
        let action = removal_action(
            &target(),
            &[Configlet::new("B", "2")],
            &[Configlet::new("A", "1")],
        );

        assert_eq!(action.configlet_list, ["2"]);
        assert_eq!(action.ignore_configlet_list, ["1"]);
        assert_eq!(action.ignore_configlet_names_list, ["A"]);
        assert_eq!(action.info, "Configlet Remove from device: leaf1.lab");
    }

    #[test]
    fn association_action_wire_shape() {
        let action = association_action(&target(), &[Configlet::new("A", "1")]);
        insta::assert_json_snapshot!(action, @r#"
        {
          "info": "Configlet Assign to device: leaf1.lab",
          "infoPreview": "<b>Configlet assign</b> to Device leaf1.lab",
          "action": "associate",
          "nodeType": "configlet",
          "nodeId": "",
          "toId": "00:00:00:00:00:02",
          "toIdType": "netelement",
          "fromId": "",
          "nodeName": "",
          "fromName": "",
          "toName": "leaf1.lab",
          "nodeIpAddress": "10.0.0.2",
          "nodeTargetIpAddress": "10.0.0.2",
          "configletList": [
            "1"
          ],
          "configletNamesList": [
            "A"
          ],
          "ignoreConfigletList": [],
          "ignoreConfigletNamesList": [],
          "configletBuilderList": [],
          "configletBuilderNamesList": [],
          "ignoreConfigletBuilderList": [],
          "ignoreConfigletBuilderNamesList": []
        }
        "#);
    }

    #[test]
    fn target_from_device_falls_back_to_system_mac() {
        let device = Device {
            fqdn: "leaf1.lab".into(),
            ip_address: "10.0.0.2".into(),
            system_mac_address: "00:00:00:00:00:02".into(),
            ..Device::default()
        };
        assert_eq!(DeviceTarget::from(&device), target());
    }

    #[test]
    fn outcome_display() {
        assert_eq!(CommitOutcome::Staged.to_string(), "staged");
        assert_eq!(CommitOutcome::Committed.to_string(), "committed");
    }
}
