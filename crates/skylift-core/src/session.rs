//! The session boundary between the facade and a platform client library.
//!
//! The facade owns none of the protocol work: authentication, upload
//! transport and lifecycle transitions all belong to whatever implements
//! [`PlatformSession`]. The trait exists so the facade can be wired to a real
//! client in production and to an in-memory double in tests.

use std::fmt;
use std::path::Path;

use async_trait::async_trait;
use url::Url;

use crate::app::{Application, Staging};
use crate::error::{ClientError, SessionError};
use crate::service::ServiceSpec;

/// Credentials for one platform account.
///
/// The password is kept out of `Debug` output; error messages and logs must
/// never carry it.
#[derive(Clone)]
pub struct Credentials {
    user: String,
    password: String,
}

impl Credentials {
    /// Creates a new credential pair.
    pub fn new(user: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            password: password.into(),
        }
    }

    /// Returns the account user name.
    pub fn user(&self) -> &str {
        &self.user
    }

    /// Returns the account password.
    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// A validated connection target: API endpoint plus the organization and
/// space under which applications and services are scoped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    api: Url,
    organization: String,
    space: String,
}

impl Target {
    /// Parses the API endpoint and binds it to an organization and space.
    ///
    /// This is the single place the endpoint string is validated; a malformed
    /// URL fails with [`ClientError::Configuration`]. No network contact
    /// happens here.
    pub fn parse(
        api: &str,
        organization: impl Into<String>,
        space: impl Into<String>,
    ) -> Result<Self, ClientError> {
        let parsed = Url::parse(api).map_err(|source| ClientError::Configuration {
            endpoint: api.to_string(),
            source,
        })?;
        Ok(Self {
            api: parsed,
            organization: organization.into(),
            space: space.into(),
        })
    }

    /// Returns the API endpoint URL.
    pub fn api(&self) -> &Url {
        &self.api
    }

    /// Returns the organization name.
    pub fn organization(&self) -> &str {
        &self.organization
    }

    /// Returns the space name.
    pub fn space(&self) -> &str {
        &self.space
    }
}

/// One connection handle to a platform, bound to a single organization and
/// space.
///
/// Implementations wrap the actual client library and own every remote
/// behavior: session establishment, request transport, upload streaming and
/// whatever timeout policy applies. The facade awaits these operations one at
/// a time and adds nothing on top.
///
/// # Contract notes
///
/// - Construction must not contact the platform; [`login`](Self::login) is
///   the first operation allowed to do so.
/// - [`upload_artifact`](Self::upload_artifact) reports local read/stream
///   failures as [`SessionError::Io`] — the facade relies on that variant to
///   decide what to translate.
/// - [`fetch_application`](Self::fetch_application) reports an unknown name
///   as [`SessionError::NotFound`].
#[async_trait]
pub trait PlatformSession: Send + Sync {
    /// Establishes the remote session.
    async fn login(&self) -> Result<(), SessionError>;

    /// Terminates the remote session.
    async fn logout(&self) -> Result<(), SessionError>;

    /// Registers a new application under the session's organization and
    /// space.
    ///
    /// # Arguments
    ///
    /// * `name` - Application name, unique within the space
    /// * `staging` - Start command override and buildpack choice
    /// * `memory_mb` - Memory allocation in megabytes
    /// * `uris` - Routes the application will answer on
    /// * `services` - Names of service instances to bind
    async fn register_application(
        &self,
        name: &str,
        staging: &Staging,
        memory_mb: u32,
        uris: &[String],
        services: &[String],
    ) -> Result<(), SessionError>;

    /// Uploads the artifact bytes for an already registered application.
    ///
    /// The artifact is treated as an opaque local file (conventionally a
    /// `.war` or `.zip` bundle) and handed over unmodified.
    async fn upload_artifact(&self, name: &str, artifact: &Path) -> Result<(), SessionError>;

    /// Starts the named application.
    async fn start_application(&self, name: &str) -> Result<(), SessionError>;

    /// Stops the named application.
    async fn stop_application(&self, name: &str) -> Result<(), SessionError>;

    /// Deletes the named application.
    async fn delete_application(&self, name: &str) -> Result<(), SessionError>;

    /// Provisions a new service instance.
    async fn register_service(&self, service: &ServiceSpec) -> Result<(), SessionError>;

    /// Deletes the named service instance.
    async fn delete_service(&self, name: &str) -> Result<(), SessionError>;

    /// Fetches the remote descriptor of the named application.
    async fn fetch_application(&self, name: &str) -> Result<Application, SessionError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    struct NullSession;

    #[async_trait]
    impl PlatformSession for NullSession {
        async fn login(&self) -> Result<(), SessionError> {
            Ok(())
        }

        async fn logout(&self) -> Result<(), SessionError> {
            Ok(())
        }

        async fn register_application(
            &self,
            _name: &str,
            _staging: &Staging,
            _memory_mb: u32,
            _uris: &[String],
            _services: &[String],
        ) -> Result<(), SessionError> {
            Ok(())
        }

        async fn upload_artifact(&self, _name: &str, _artifact: &Path) -> Result<(), SessionError> {
            Ok(())
        }

        async fn start_application(&self, _name: &str) -> Result<(), SessionError> {
            Ok(())
        }

        async fn stop_application(&self, _name: &str) -> Result<(), SessionError> {
            Ok(())
        }

        async fn delete_application(&self, _name: &str) -> Result<(), SessionError> {
            Ok(())
        }

        async fn register_service(&self, _service: &ServiceSpec) -> Result<(), SessionError> {
            Ok(())
        }

        async fn delete_service(&self, _name: &str) -> Result<(), SessionError> {
            Ok(())
        }

        async fn fetch_application(&self, name: &str) -> Result<Application, SessionError> {
            Err(SessionError::not_found("application", name))
        }
    }

    #[tokio::test]
    async fn test_session_trait_object() {
        let session: Arc<dyn PlatformSession> = Arc::new(NullSession);
        session.login().await.expect("login should succeed");
        let err = session
            .fetch_application("ghost")
            .await
            .expect_err("unknown application should not resolve");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_parse_valid_endpoint() {
        let target = Target::parse("https://api.ng.bluemix.net", "acme", "dev")
            .expect("endpoint should parse");
        assert_eq!(target.api().scheme(), "https");
        assert_eq!(target.api().host_str(), Some("api.ng.bluemix.net"));
        assert_eq!(target.organization(), "acme");
        assert_eq!(target.space(), "dev");
    }

    #[test]
    fn test_parse_rejects_missing_scheme() {
        let result = Target::parse("api.ng.bluemix.net", "acme", "dev");
        let err = result.expect_err("bare host should be rejected");
        assert!(err.is_configuration());
    }

    #[test]
    fn test_parse_rejects_malformed_endpoint() {
        let err = Target::parse("http://[not a url", "acme", "dev")
            .expect_err("unparseable endpoint should be rejected");
        assert!(err.is_configuration());
        // The offending string is carried in the message for diagnostics.
        assert!(err.to_string().contains("http://[not a url"));
    }

    #[test]
    fn test_credentials_debug_redacts_password() {
        let credentials = Credentials::new("jane@example.com", "hunter2");
        let rendered = format!("{:?}", credentials);
        assert!(rendered.contains("jane@example.com"));
        assert!(!rendered.contains("hunter2"));
    }
}
