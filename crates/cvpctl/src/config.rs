//! CLI configuration: thin wrapper around `cvpctl_config` shared types.
//!
//! Re-exports the shared types and adds resolution that respects
//! `GlobalOpts` flag overrides (--controller, --username, etc.).

use std::time::Duration;

use cvpctl_core::{ControllerConfig, Credentials, TlsVerification};

use crate::cli::GlobalOpts;
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use cvpctl_config::{
    Config, Defaults, Profile, add_profile_to, config_path, load_config, load_config_or_default,
};

// ── CLI-specific helpers ────────────────────────────────────────────

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Translate a `Profile` + global flags into a `ControllerConfig`.
///
/// CLI flag overrides take priority over profile values.
pub fn resolve_profile(
    profile: &Profile,
    profile_name: &str,
    global: &GlobalOpts,
    defaults: &Defaults,
) -> Result<ControllerConfig, CliError> {
    // 1. URL (flag > env > profile)
    let url = parse_url(global.controller.as_deref().unwrap_or(&profile.controller))?;

    // 2. Credentials (flag/env username > profile; password via the shared chain)
    let username = match global.username {
        Some(ref user) => user.clone(),
        None => cvpctl_config::resolve_username(profile, profile_name)?,
    };
    let password = cvpctl_config::resolve_password(profile, profile_name)?;

    // 3. TLS verification
    let tls = if global.insecure || defaults.insecure {
        TlsVerification::DangerAcceptInvalid
    } else {
        cvpctl_config::profile_tls(profile)
    };

    // 4. Timeout (flag > profile > defaults)
    let timeout = global
        .timeout
        .or(profile.timeout)
        .unwrap_or(defaults.timeout);

    Ok(ControllerConfig {
        url,
        credentials: Some(Credentials { username, password }),
        tls,
        timeout: Duration::from_secs(timeout),
    })
}

/// Build a `ControllerConfig` from flags and env alone, for runs with no
/// matching profile.
pub fn resolve_without_profile(
    profile_name: &str,
    global: &GlobalOpts,
    defaults: &Defaults,
) -> Result<ControllerConfig, CliError> {
    let url_str = global
        .controller
        .as_deref()
        .ok_or_else(|| CliError::NoConfig {
            path: config_path().display().to_string(),
        })?;

    let profile = Profile {
        controller: url_str.into(),
        username: global.username.clone(),
        insecure: global.insecure.then_some(true),
        ..Profile::default()
    };
    resolve_profile(&profile, profile_name, global, defaults)
}

/// Error for a profile name missing from the config, listing the known ones.
pub fn profile_not_found(name: String, config: &Config) -> CliError {
    let mut available: Vec<_> = config.profiles.keys().cloned().collect();
    available.sort();
    CliError::ProfileNotFound {
        name,
        available: if available.is_empty() {
            "(none)".into()
        } else {
            available.join(", ")
        },
    }
}

fn parse_url(url_str: &str) -> Result<url::Url, CliError> {
    url_str.parse().map_err(|_| CliError::Validation {
        field: "controller".into(),
        reason: format!("invalid URL: {url_str}"),
    })
}
