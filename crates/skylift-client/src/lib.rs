//! Client layer for Skylift.
//!
//! This crate provides the deployment facade ([`DeploymentClient`]) and the
//! settings storage that wires it to a concrete platform session. The heavy
//! lifting (authentication, transport, artifact upload) lives behind the
//! [`PlatformSession`] trait from `skylift-core`; the facade only validates
//! arguments, derives defaults and delegates.

pub mod client;
pub mod settings;

pub use client::DeploymentClient;
pub use settings::{ConnectionSettings, SettingsError, SettingsStore, TargetSettings};

// Re-export the core types callers need to drive the facade.
pub use skylift_core::app::{AppManifest, AppState, Application, DEFAULT_MEMORY_MB, Staging};
pub use skylift_core::config::{DEFAULT_APP_DOMAIN, RoutingConfig};
pub use skylift_core::error::{ClientError, Result, SessionError};
pub use skylift_core::service::ServiceSpec;
pub use skylift_core::session::{Credentials, PlatformSession, Target};
