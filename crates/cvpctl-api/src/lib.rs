// cvpctl-api: Async Rust client for the CloudVision Portal configlet API

pub mod auth;
pub mod client;
pub mod configlets;
pub mod error;
pub mod inventory;
pub mod models;
pub mod provisioning;
pub mod transport;

pub use client::{CvpClient, check_envelope};
pub use error::Error;
pub use models::{
    AssignmentAction, Configlet, Device, EmptyBuilderLists, ReconcileBody, ResponseEnvelope,
    ValidateRequest,
};
pub use transport::{TlsMode, TransportConfig};
