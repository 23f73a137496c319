//! Configlet assignment engine between `cvpctl-api` and the `cvpctl` CLI.
//!
//! - **[`Controller`]**: facade over one CVP session.
//!   [`connect()`](Controller::connect) logs in,
//!   [`Controller::oneshot()`](Controller::oneshot) wraps a single
//!   login → work → logout cycle for CLI invocations.
//!
//! - **[`Directory`]**: configlet lookups by name or by owning device.
//!
//! - **[`reconcile`]**: pure set logic computing the configlet set a device
//!   ends up with after an apply or remove.
//!
//! - **[`commit`]**: builds the provisioning action and drives the
//!   stage → commit sequence, reporting [`CommitOutcome`].
//!
//! Apply/remove and the sync/validate workflows are inherent methods on
//! [`Controller`], split across `assignment.rs` and `workflow.rs`.

pub mod assignment;
pub mod commit;
pub mod config;
pub mod controller;
pub mod directory;
pub mod error;
pub mod reconcile;
pub mod workflow;

// ── Primary re-exports ──────────────────────────────────────────────
pub use commit::{CommitOutcome, DeviceTarget};
pub use config::{ControllerConfig, Credentials, TlsVerification};
pub use controller::Controller;
pub use directory::Directory;
pub use error::CoreError;
pub use workflow::{SyncReport, reconcile_configlet_name};

pub use cvpctl_api::{AssignmentAction, Configlet, Device, Error as ApiError};
