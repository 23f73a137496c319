//! Shared helpers for command handlers.

use std::io::IsTerminal;
use std::path::Path;

use serde::Serialize;

use cvpctl_core::{CommitOutcome, Controller, DeviceTarget};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

/// Look up a device by hostname or FQDN and build its assignment target.
pub async fn resolve_target(controller: &Controller, device: &str) -> Result<DeviceTarget, CliError> {
    let found = controller.device(device).await?;
    Ok(DeviceTarget::from(&found))
}

/// Prompt for confirmation, auto-approving if `--yes` was passed.
pub fn confirm(message: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    if !std::io::stdin().is_terminal() {
        return Err(CliError::NonInteractiveRequiresYes {
            action: message.into(),
        });
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    Ok(confirmed)
}

/// Read configuration text for `--file` flags.
pub fn read_config_file(path: &Path) -> Result<String, CliError> {
    let contents = std::fs::read_to_string(path)?;
    if contents.trim().is_empty() {
        return Err(CliError::Validation {
            field: "file".into(),
            reason: format!("{} is empty", path.display()),
        });
    }
    Ok(contents)
}

// ── Assignment report ───────────────────────────────────────────────

#[derive(Serialize)]
struct AssignmentReport<'a> {
    device: &'a str,
    configlets: &'a [String],
    outcome: CommitOutcome,
}

/// Print how far an apply/remove/sync got.
pub fn print_outcome(
    global: &GlobalOpts,
    device: &str,
    configlets: &[String],
    outcome: CommitOutcome,
) -> Result<(), CliError> {
    let color = output::should_color(&global.color);
    let report = AssignmentReport {
        device,
        configlets,
        outcome,
    };
    let out = output::render_single(
        &global.output,
        &report,
        |r| {
            let mut lines = vec![format!("Device:     {}", r.device)];
            if !r.configlets.is_empty() {
                lines.push(format!("Configlets: {}", r.configlets.join(", ")));
            }
            lines.push(format!("Outcome:    {}", output::outcome_label(r.outcome, color)));
            if r.outcome == CommitOutcome::Staged {
                lines.push("Topology not saved; review the pending action on CVP.".into());
            }
            lines.join("\n")
        },
        |r| r.outcome.to_string(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}
