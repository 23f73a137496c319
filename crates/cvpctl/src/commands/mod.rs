//! Command dispatch: bridges CLI args -> core operations -> output formatting.

pub mod config_cmd;
pub mod configlets;
pub mod devices;
pub mod util;

use cvpctl_core::Controller;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a controller-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    controller: &Controller,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Configlets(args) => configlets::handle(controller, args, global).await,
        Command::Devices(args) => devices::handle(controller, args, global).await,
        // Handled before a controller is built
        Command::Config(_) | Command::Completions(_) => Ok(()),
    }
}
