//! Connection settings and credential file storage.
//!
//! Skylift reads its configuration from `~/.config/skylift/`:
//!
//! ```text
//! ~/.config/skylift/
//! ├── config.toml              # Connection target and routing options
//! └── secret.json              # Account credentials
//! ```
//!
//! `config.toml` names the platform to talk to:
//!
//! ```toml
//! [target]
//! api = "https://api.ng.bluemix.net"
//! organization = "acme"
//! space = "dev"
//!
//! [routing]
//! app_domain = "mybluemix.net"
//! ```
//!
//! `secret.json` holds the credentials and should be readable only by the
//! owner:
//!
//! ```json
//! { "user": "jane@example.com", "password": "..." }
//! ```

use std::env;
use std::fs;
use std::path::PathBuf;

use serde::Deserialize;
use skylift_core::config::RoutingConfig;
use skylift_core::error::ClientError;
use skylift_core::session::{Credentials, Target};

/// Environment variable consulted when `secret.json` is absent.
pub const USER_VAR: &str = "SKYLIFT_USER";
/// Environment variable consulted when `secret.json` is absent.
pub const PASSWORD_VAR: &str = "SKYLIFT_PASSWORD";

/// Errors that can occur while loading settings files.
#[derive(Debug)]
pub enum SettingsError {
    /// Settings file not found.
    NotFound(PathBuf),
    /// File I/O error.
    IoError(std::io::Error),
    /// TOML parsing error.
    TomlError(toml::de::Error),
    /// JSON parsing error.
    JsonError(serde_json::Error),
    /// Config directory not found.
    ConfigDirNotFound,
    /// The file parsed but its contents are not usable.
    Invalid(ClientError),
}

impl std::fmt::Display for SettingsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SettingsError::NotFound(path) => {
                write!(f, "Settings file not found at: {}", path.display())
            }
            SettingsError::IoError(e) => write!(f, "I/O error: {}", e),
            SettingsError::TomlError(e) => write!(f, "TOML parse error: {}", e),
            SettingsError::JsonError(e) => write!(f, "JSON parse error: {}", e),
            SettingsError::ConfigDirNotFound => {
                write!(f, "Could not determine config directory")
            }
            SettingsError::Invalid(e) => write!(f, "Invalid settings: {}", e),
        }
    }
}

impl std::error::Error for SettingsError {}

impl From<std::io::Error> for SettingsError {
    fn from(e: std::io::Error) -> Self {
        SettingsError::IoError(e)
    }
}

impl From<toml::de::Error> for SettingsError {
    fn from(e: toml::de::Error) -> Self {
        SettingsError::TomlError(e)
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(e: serde_json::Error) -> Self {
        SettingsError::JsonError(e)
    }
}

/// Contents of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct ConnectionSettings {
    /// Which platform, organization and space to talk to.
    pub target: TargetSettings,
    /// Route derivation options; defaulted when the section is missing.
    #[serde(default)]
    pub routing: RoutingConfig,
}

/// The `[target]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct TargetSettings {
    /// Platform API endpoint URL.
    pub api: String,
    /// Organization name.
    pub organization: String,
    /// Space name.
    pub space: String,
}

impl ConnectionSettings {
    /// Validates the configured endpoint and builds a [`Target`] from it.
    pub fn target(&self) -> Result<Target, SettingsError> {
        Target::parse(
            &self.target.api,
            self.target.organization.as_str(),
            self.target.space.as_str(),
        )
        .map_err(SettingsError::Invalid)
    }
}

#[derive(Deserialize)]
struct SecretFile {
    user: String,
    password: String,
}

/// Read-only storage for the settings files.
///
/// Responsibilities:
/// - Load `config.toml` into [`ConnectionSettings`]
/// - Load `secret.json` into [`Credentials`]
/// - Fall back to environment variables when the secret file is absent
///
/// Does NOT:
/// - Write or modify settings files
/// - Validate credentials against the platform
pub struct SettingsStore {
    config_path: PathBuf,
    secret_path: PathBuf,
}

impl SettingsStore {
    /// Creates a store over the default paths under `~/.config/skylift/`.
    pub fn new() -> Result<Self, SettingsError> {
        let dir = dirs::config_dir()
            .ok_or(SettingsError::ConfigDirNotFound)?
            .join("skylift");
        Ok(Self {
            config_path: dir.join("config.toml"),
            secret_path: dir.join("secret.json"),
        })
    }

    /// Creates a store over explicit paths (for testing).
    pub fn with_paths(config_path: PathBuf, secret_path: PathBuf) -> Self {
        Self {
            config_path,
            secret_path,
        }
    }

    /// Loads the connection settings from `config.toml`.
    pub fn load_connection(&self) -> Result<ConnectionSettings, SettingsError> {
        if !self.config_path.exists() {
            return Err(SettingsError::NotFound(self.config_path.clone()));
        }

        let content = fs::read_to_string(&self.config_path)?;
        let settings = toml::from_str(&content)?;

        Ok(settings)
    }

    /// Loads the credentials from `secret.json`.
    pub fn load_credentials(&self) -> Result<Credentials, SettingsError> {
        if !self.secret_path.exists() {
            return Err(SettingsError::NotFound(self.secret_path.clone()));
        }

        let content = fs::read_to_string(&self.secret_path)?;
        let secret: SecretFile = serde_json::from_str(&content)?;

        Ok(Credentials::new(secret.user, secret.password))
    }

    /// Loads credentials from `secret.json`, falling back to the
    /// [`USER_VAR`] and [`PASSWORD_VAR`] environment variables when the file
    /// does not exist.
    pub fn resolve_credentials(&self) -> Result<Credentials, SettingsError> {
        match self.load_credentials() {
            Err(SettingsError::NotFound(path)) => {
                match (env::var(USER_VAR), env::var(PASSWORD_VAR)) {
                    (Ok(user), Ok(password)) => Ok(Credentials::new(user, password)),
                    _ => Err(SettingsError::NotFound(path)),
                }
            }
            other => other,
        }
    }

    /// Returns the path to `config.toml`.
    pub fn config_path(&self) -> &PathBuf {
        &self.config_path
    }

    /// Returns the path to `secret.json`.
    pub fn secret_path(&self) -> &PathBuf {
        &self.secret_path
    }
}
