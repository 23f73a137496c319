//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text and a stable exit code.

use miette::Diagnostic;
use thiserror::Error;

use cvpctl_config::ConfigError;
use cvpctl_core::{ApiError, CoreError};

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const REJECTED: i32 = 6;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
    pub const PARTIAL_COMMIT: i32 = 9;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not connect to CVP at {url}")]
    #[diagnostic(
        code(cvpctl::connection_failed),
        help(
            "Check that CVP is running and reachable.\n\
             URL: {url}"
        )
    )]
    ConnectionFailed {
        url: String,
        #[source]
        source: ApiError,
    },

    #[error("TLS setup failed: {reason}")]
    #[diagnostic(
        code(cvpctl::tls_error),
        help(
            "CVP usually serves a self-signed certificate.\n\
             Use --insecure (-k) to accept it, or configure ca_cert in your profile."
        )
    )]
    TlsError { reason: String },

    #[error("Request timed out")]
    #[diagnostic(
        code(cvpctl::timeout),
        help("Increase timeout with --timeout or check CVP responsiveness.")
    )]
    Timeout {
        #[source]
        source: ApiError,
    },

    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(cvpctl::auth_failed),
        help(
            "Verify the username and password for this profile.\n\
             Run: cvpctl config set-password"
        )
    )]
    AuthFailed { message: String },

    #[error("No credentials configured for profile '{profile}'")]
    #[diagnostic(
        code(cvpctl::no_credentials),
        help(
            "Configure credentials with: cvpctl config init\n\
             Or set CVP_USERNAME and CVP_PASSWORD."
        )
    )]
    NoCredentials { profile: String },

    // ── Resources ────────────────────────────────────────────────────
    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(cvpctl::not_found),
        help("Run: cvpctl {list_command} to see available {resource_type}s")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    // ── Controller ───────────────────────────────────────────────────
    #[error("CVP rejected the request ({code}): {message}")]
    #[diagnostic(code(cvpctl::rejected))]
    Rejected { code: String, message: String },

    #[error("Change for {device} was staged but the topology save failed: {reason}")]
    #[diagnostic(
        code(cvpctl::partial_commit),
        help(
            "The staged action is still pending on CVP.\n\
             Review and save it from the Network Provisioning view, or re-run the command."
        )
    )]
    PartialCommit { device: String, reason: String },

    #[error("CVP API error: {message}")]
    #[diagnostic(code(cvpctl::api_error))]
    Api { message: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(cvpctl::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(cvpctl::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: cvpctl config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("Configuration file not found")]
    #[diagnostic(
        code(cvpctl::no_config),
        help(
            "Create one with: cvpctl config init\n\
             Expected at: {path}\n\
             Or pass --controller (-c) with CVP_USERNAME and CVP_PASSWORD."
        )
    )]
    NoConfig { path: String },

    #[error(transparent)]
    #[diagnostic(code(cvpctl::config))]
    Config(ConfigError),

    // ── Interactive ──────────────────────────────────────────────────
    #[error("Destructive operation '{action}' requires confirmation")]
    #[diagnostic(
        code(cvpctl::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes { action: String },

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Failed to render JSON: {0}")]
    #[diagnostic(code(cvpctl::json))]
    Json(#[from] serde_json::Error),

    #[error("Failed to render YAML: {0}")]
    #[diagnostic(code(cvpctl::yaml))]
    Yaml(#[from] serde_yaml::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } | Self::TlsError { .. } => exit_code::CONNECTION,
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::AuthFailed { .. } | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Rejected { .. } => exit_code::REJECTED,
            Self::PartialCommit { .. } => exit_code::PARTIAL_COMMIT,
            Self::Validation { .. } | Self::NonInteractiveRequiresYes { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── ConfigError → CliError ───────────────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::NoCredentials { profile } => CliError::NoCredentials { profile },
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            other => CliError::Config(other),
        }
    }
}

// ── CoreError → CliError ─────────────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::AuthenticationFailed { message } => CliError::AuthFailed { message },

            CoreError::NotFound {
                entity_type,
                identifier,
            } => CliError::NotFound {
                list_command: list_command_for(&entity_type).into(),
                resource_type: entity_type,
                identifier,
            },

            CoreError::RemoteRejected { code, message } => CliError::Rejected { code, message },

            CoreError::PartialCommit { device, source } => CliError::PartialCommit {
                device,
                reason: source.to_string(),
            },

            CoreError::Transport { source } => from_transport(source),

            CoreError::Config { message } => CliError::Validation {
                field: "controller".into(),
                reason: message,
            },
        }
    }
}

fn list_command_for(entity_type: &str) -> &'static str {
    match entity_type {
        "device" => "devices list",
        _ => "configlets list --device <host>",
    }
}

fn from_transport(source: ApiError) -> CliError {
    match source {
        ApiError::Tls(reason) => CliError::TlsError { reason },
        ApiError::Transport(ref e) if e.is_timeout() => CliError::Timeout { source },
        ApiError::Transport(ref e) if e.is_connect() => CliError::ConnectionFailed {
            url: e.url().map(ToString::to_string).unwrap_or_default(),
            source,
        },
        other => CliError::Api {
            message: other.to_string(),
        },
    }
}
