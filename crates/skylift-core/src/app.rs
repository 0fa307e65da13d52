//! Application descriptors and deployment requests.

use std::fmt;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Memory allocation used when a manifest does not ask for one, in megabytes.
pub const DEFAULT_MEMORY_MB: u32 = 512;

/// Lifecycle state of a deployed application, as reported by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppState {
    /// Application is running.
    Started,
    /// Application is registered but not running.
    Stopped,
    /// A lifecycle transition is in flight.
    Updating,
}

impl AppState {
    /// Returns the platform's token for this state.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Started => "STARTED",
            Self::Stopped => "STOPPED",
            Self::Updating => "UPDATING",
        }
    }
}

impl fmt::Display for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for AppState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "STARTED" => Ok(Self::Started),
            "STOPPED" => Ok(Self::Stopped),
            "UPDATING" => Ok(Self::Updating),
            _ => Err(format!("unknown application state: {s}")),
        }
    }
}

/// Staging choices applied when an application is registered.
///
/// Both fields are optional; absent values leave the platform to detect a
/// buildpack and use its default start command.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Staging {
    /// Start command override (e.g. `node app.js`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    /// Buildpack name or URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buildpack: Option<String>,
}

impl Staging {
    pub fn new(command: Option<String>, buildpack: Option<String>) -> Self {
        Self { command, buildpack }
    }
}

/// A deployment request: what to push and how to run it.
///
/// Only the name and artifact path are mandatory. Everything else has a
/// platform-side default, so the common case stays a two-argument
/// constructor:
///
/// ```
/// use skylift_core::app::AppManifest;
///
/// let manifest = AppManifest::new("orders", "target/orders.war")
///     .with_buildpack("liberty-for-java")
///     .with_memory_mb(128);
/// assert_eq!(manifest.name, "orders");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppManifest {
    /// Application name, unique within the target space.
    pub name: String,
    /// Local path to the artifact to upload.
    pub artifact: PathBuf,
    /// Service instances to bind at registration time.
    pub services: Vec<String>,
    /// Start command override.
    pub command: Option<String>,
    /// Buildpack name or URL.
    pub buildpack: Option<String>,
    /// Memory allocation in megabytes; [`DEFAULT_MEMORY_MB`] when absent.
    pub memory_mb: Option<u32>,
}

impl AppManifest {
    /// Creates a manifest with only the mandatory fields set.
    pub fn new(name: impl Into<String>, artifact: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            artifact: artifact.into(),
            services: Vec::new(),
            command: None,
            buildpack: None,
            memory_mb: None,
        }
    }

    /// Binds the named service instances when the application is registered.
    pub fn with_services(mut self, services: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.services = services.into_iter().map(Into::into).collect();
        self
    }

    /// Overrides the start command.
    pub fn with_command(mut self, command: impl Into<String>) -> Self {
        self.command = Some(command.into());
        self
    }

    /// Selects a buildpack instead of letting the platform detect one.
    pub fn with_buildpack(mut self, buildpack: impl Into<String>) -> Self {
        self.buildpack = Some(buildpack.into());
        self
    }

    /// Requests a memory allocation in megabytes.
    pub fn with_memory_mb(mut self, memory_mb: u32) -> Self {
        self.memory_mb = Some(memory_mb);
        self
    }
}

/// A deployed application as the platform describes it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Application {
    /// Platform-assigned identifier.
    pub guid: Uuid,
    /// Application name.
    pub name: String,
    /// Current lifecycle state.
    pub state: AppState,
    /// Memory allocation in megabytes.
    pub memory_mb: u32,
    /// Routes the application answers on.
    #[serde(default)]
    pub uris: Vec<String>,
    /// Names of bound service instances.
    #[serde(default)]
    pub services: Vec<String>,
    /// When the application was registered, if the platform reports it.
    pub created_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_state_tokens() {
        assert_eq!(AppState::Started.to_string(), "STARTED");
        assert_eq!(AppState::Stopped.to_string(), "STOPPED");
        assert_eq!(AppState::Updating.to_string(), "UPDATING");
    }

    #[test]
    fn test_state_round_trip() {
        for state in [AppState::Started, AppState::Stopped, AppState::Updating] {
            assert_eq!(AppState::from_str(state.as_str()), Ok(state));
        }
        assert!(AppState::from_str("CRASHED").is_err());
    }

    #[test]
    fn test_state_serde_tokens() {
        let json = serde_json::to_string(&AppState::Started).expect("serialize state");
        assert_eq!(json, "\"STARTED\"");
        let back: AppState = serde_json::from_str("\"STOPPED\"").expect("deserialize state");
        assert_eq!(back, AppState::Stopped);
    }

    #[test]
    fn test_manifest_defaults() {
        let manifest = AppManifest::new("demo", "demo.war");
        assert_eq!(manifest.name, "demo");
        assert_eq!(manifest.artifact, PathBuf::from("demo.war"));
        assert!(manifest.services.is_empty());
        assert!(manifest.command.is_none());
        assert!(manifest.buildpack.is_none());
        assert!(manifest.memory_mb.is_none());
    }

    #[test]
    fn test_manifest_builders() {
        let manifest = AppManifest::new("demo", "demo.zip")
            .with_services(["db", "cache"])
            .with_command("node app.js")
            .with_buildpack("sdk-for-nodejs")
            .with_memory_mb(256);
        assert_eq!(manifest.services, vec!["db", "cache"]);
        assert_eq!(manifest.command.as_deref(), Some("node app.js"));
        assert_eq!(manifest.buildpack.as_deref(), Some("sdk-for-nodejs"));
        assert_eq!(manifest.memory_mb, Some(256));
    }

    #[test]
    fn test_staging_empty_serialization() {
        let staging = Staging::default();
        let json = serde_json::to_string(&staging).expect("serialize staging");
        assert_eq!(json, "{}");
    }
}
