//! Configlet command handlers.

use tabled::Tabled;

use cvpctl_core::{Configlet, Controller};

use crate::cli::{AssignmentArgs, ConfigletsArgs, ConfigletsCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct ConfigletRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Key")]
    key: String,
    #[tabled(rename = "Lines")]
    lines: usize,
}

impl From<&Configlet> for ConfigletRow {
    fn from(c: &Configlet) -> Self {
        Self {
            name: c.name.clone(),
            key: c.key.clone(),
            lines: c.config.lines().count(),
        }
    }
}

fn detail(c: &Configlet) -> String {
    let mut out = format!("Name: {}\nKey:  {}", c.name, c.key);
    if !c.config.is_empty() {
        out.push_str("\n\n");
        out.push_str(c.config.trim_end());
    }
    out
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    controller: &Controller,
    args: ConfigletsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        ConfigletsCommand::Get { name } => {
            let configlet = controller.directory().configlet_by_name(&name).await?;
            let out = output::render_single(&global.output, &configlet, detail, |c| c.key.clone())?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ConfigletsCommand::List { device } => {
            let target = util::resolve_target(controller, &device).await?;
            let configlets = controller
                .directory()
                .configlets_by_device(&target.key)
                .await?;
            let out = output::render_list(
                &global.output,
                &configlets,
                |c| ConfigletRow::from(c),
                |c| c.name.clone(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ConfigletsCommand::Add { name, file } => {
            let config = util::read_config_file(&file)?;
            controller.add_configlet(&name, &config).await?;
            if !global.quiet {
                eprintln!("Configlet '{name}' created");
            }
            Ok(())
        }

        ConfigletsCommand::Delete { name } => {
            if !util::confirm(&format!("Delete configlet {name}?"), global.yes)? {
                return Ok(());
            }
            controller.delete_configlet(&name).await?;
            if !global.quiet {
                eprintln!("Configlet '{name}' deleted");
            }
            Ok(())
        }

        ConfigletsCommand::Validate { name, device } => {
            let target = util::resolve_target(controller, &device).await?;
            controller.validate_configlet(&target.key, &name).await?;
            if !global.quiet {
                eprintln!("Configlet '{name}' validated against {}", target.name);
            }
            Ok(())
        }

        ConfigletsCommand::Apply(AssignmentArgs {
            device,
            names,
            no_save,
        }) => {
            let target = util::resolve_target(controller, &device).await?;
            let outcome = controller
                .apply_configlets_to_device(&target, &names, !no_save)
                .await?;
            util::print_outcome(global, &target.name, &names, outcome)
        }

        ConfigletsCommand::Remove(AssignmentArgs {
            device,
            names,
            no_save,
        }) => {
            let target = util::resolve_target(controller, &device).await?;
            let outcome = controller
                .remove_configlets_from_device(&target, &names, !no_save)
                .await?;
            util::print_outcome(global, &target.name, &names, outcome)
        }
    }
}
