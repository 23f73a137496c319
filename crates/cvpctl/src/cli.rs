//! Clap derive structures for the `cvpctl` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// cvpctl -- manage CloudVision Portal configlets and their device assignments
#[derive(Debug, Parser)]
#[command(
    name = "cvpctl",
    version,
    about = "Manage CloudVision configlets from the command line",
    long_about = "Add, validate, apply, remove, and reconcile CloudVision Portal\n\
        configlets against managed devices.\n\n\
        Apply and remove stage a provisioning action, then save the topology\n\
        unless --no-save is given.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Controller profile to use
    #[arg(long, short = 'p', env = "CVP_PROFILE", global = true)]
    pub profile: Option<String>,

    /// CVP URL (overrides profile)
    #[arg(long, short = 'c', env = "CVP_CONTROLLER", global = true)]
    pub controller: Option<String>,

    /// Login user (overrides profile)
    #[arg(long, short = 'u', env = "CVP_USERNAME", global = true)]
    pub username: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "CVP_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "CVP_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (overrides profile)
    #[arg(long, env = "CVP_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage configlets and their device assignments
    #[command(alias = "cl")]
    Configlets(ConfigletsArgs),

    /// Inspect, add, validate, and reconcile devices
    #[command(alias = "dev", alias = "d")]
    Devices(DevicesArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIGLETS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigletsArgs {
    #[command(subcommand)]
    pub command: ConfigletsCommand,
}

/// Device and configlet names shared by apply and remove.
#[derive(Debug, Args)]
pub struct AssignmentArgs {
    /// Device hostname or FQDN
    #[arg(long, short = 'd')]
    pub device: String,

    /// Configlet names
    #[arg(required = true, num_args = 1..)]
    pub names: Vec<String>,

    /// Stage the change without saving the topology
    #[arg(long)]
    pub no_save: bool,
}

#[derive(Debug, Subcommand)]
pub enum ConfigletsCommand {
    /// Show a configlet
    Get {
        /// Configlet name
        name: String,
    },

    /// List configlets assigned to a device
    #[command(alias = "ls")]
    List {
        /// Device hostname or FQDN
        #[arg(long, short = 'd')]
        device: String,
    },

    /// Create a configlet from a file
    Add {
        /// Configlet name
        name: String,

        /// File holding the configuration text
        #[arg(long, short = 'f')]
        file: PathBuf,
    },

    /// Delete a configlet
    #[command(alias = "rm")]
    Delete {
        /// Configlet name
        name: String,
    },

    /// Validate a configlet against a device
    Validate {
        /// Configlet name
        name: String,

        /// Device hostname or FQDN
        #[arg(long, short = 'd')]
        device: String,
    },

    /// Assign configlets to a device, keeping its current ones
    Apply(AssignmentArgs),

    /// Unassign configlets from a device, keeping the rest
    Remove(AssignmentArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  DEVICES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct DevicesArgs {
    #[command(subcommand)]
    pub command: DevicesCommand,
}

#[derive(Debug, Subcommand)]
pub enum DevicesCommand {
    /// List inventory devices
    #[command(alias = "ls")]
    List,

    /// Show a device
    Get {
        /// Hostname or FQDN
        device: String,
    },

    /// Add a device to the inventory
    Add {
        /// Management IP address
        ip: String,
    },

    /// Print a device's running configuration
    RunningConfig {
        /// Hostname or FQDN
        device: String,
    },

    /// Validate configuration text from a file against a device
    ValidateConfig {
        /// Hostname or FQDN
        device: String,

        /// File holding the configuration text
        #[arg(long, short = 'f')]
        file: PathBuf,
    },

    /// Validate every configlet assigned to a device
    ValidateAll {
        /// Hostname or FQDN
        device: String,
    },

    /// Capture the running config into RECONCILE_<fqdn> and apply it
    Sync {
        /// Hostname or FQDN
        device: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG & COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create initial config file with guided setup
    Init,

    /// Display current configuration (secrets masked)
    Show,

    /// Print the config file path
    Path,

    /// Store the active profile's password in the system keyring
    SetPassword,
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
