//! Device command handlers.

use serde::Serialize;
use tabled::Tabled;

use cvpctl_core::{Controller, Device};

use crate::cli::{DevicesArgs, DevicesCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct DeviceRow {
    #[tabled(rename = "Hostname")]
    hostname: String,
    #[tabled(rename = "FQDN")]
    fqdn: String,
    #[tabled(rename = "IP")]
    ip: String,
    #[tabled(rename = "Key")]
    key: String,
    #[tabled(rename = "Model")]
    model: String,
    #[tabled(rename = "Version")]
    version: String,
    #[tabled(rename = "Container")]
    container: String,
}

impl From<&Device> for DeviceRow {
    fn from(d: &Device) -> Self {
        Self {
            hostname: d.hostname.clone(),
            fqdn: d.fqdn.clone(),
            ip: d.ip_address.clone(),
            key: d.key.clone(),
            model: d.model_name.clone().unwrap_or_default(),
            version: d.version.clone().unwrap_or_default(),
            container: d.container_name.clone().unwrap_or_default(),
        }
    }
}

fn detail(d: &Device) -> String {
    [
        format!("Hostname:  {}", d.hostname),
        format!("FQDN:      {}", d.fqdn),
        format!("IP:        {}", d.ip_address),
        format!("Key:       {}", d.key),
        format!("MAC:       {}", d.system_mac_address),
        format!("Model:     {}", d.model_name.as_deref().unwrap_or("-")),
        format!("Version:   {}", d.version.as_deref().unwrap_or("-")),
        format!("Serial:    {}", d.serial_number.as_deref().unwrap_or("-")),
        format!("Container: {}", d.container_name.as_deref().unwrap_or("-")),
        format!("Status:    {}", d.status.as_deref().unwrap_or("-")),
    ]
    .join("\n")
}

#[derive(Serialize)]
struct RunningConfig {
    device: String,
    config: String,
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    controller: &Controller,
    args: DevicesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        DevicesCommand::List => {
            let devices = controller.list_devices().await?;
            let out = output::render_list(&global.output, &devices, |d| DeviceRow::from(d), |d| {
                d.fqdn.clone()
            })?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        DevicesCommand::Get { device } => {
            let found = controller.device(&device).await?;
            let out = output::render_single(&global.output, &found, detail, |d| d.key.clone())?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        DevicesCommand::Add { ip } => {
            controller.add_device(&ip).await?;
            if !global.quiet {
                eprintln!("Device {ip} added to inventory");
            }
            Ok(())
        }

        DevicesCommand::RunningConfig { device } => {
            let target = util::resolve_target(controller, &device).await?;
            let running = RunningConfig {
                config: controller.running_config(&target.key).await?,
                device: target.name,
            };
            let out = output::render_single(
                &global.output,
                &running,
                |r| r.config.trim_end().to_owned(),
                |r| r.config.trim_end().to_owned(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        DevicesCommand::ValidateConfig { device, file } => {
            let config = util::read_config_file(&file)?;
            let target = util::resolve_target(controller, &device).await?;
            controller.validate_config(&target.key, &config).await?;
            if !global.quiet {
                eprintln!("{} validated against {}", file.display(), target.name);
            }
            Ok(())
        }

        DevicesCommand::ValidateAll { device } => {
            let target = util::resolve_target(controller, &device).await?;
            controller.validate_and_reconcile_all(&target.key).await?;
            if !global.quiet {
                eprintln!("All configlets validated against {}", target.name);
            }
            Ok(())
        }

        DevicesCommand::Sync { device } => {
            let report = controller.sync_running_config(&device).await?;
            util::print_outcome(global, &report.target.name, &[report.configlet], report.outcome)
        }
    }
}
