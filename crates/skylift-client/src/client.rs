//! The deployment facade.
//!
//! [`DeploymentClient`] wraps one [`PlatformSession`] and exposes the
//! application and service lifecycle as a handful of methods. Each method
//! performs only trivial local validation, emits a log line where useful, and
//! delegates; authentication, upload transport and lifecycle transitions are
//! owned entirely by the session implementation.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use skylift_core::app::{AppManifest, DEFAULT_MEMORY_MB, Staging};
use skylift_core::config::RoutingConfig;
use skylift_core::error::{ClientError, Result, SessionError};
use skylift_core::service::ServiceSpec;
use skylift_core::session::{Credentials, PlatformSession, Target};

/// A thin client for deploying applications to a Cloud Foundry compatible
/// platform.
///
/// The client holds a session handle and a routing configuration and nothing
/// else; it keeps no cache of remote state and implements no retry policy.
/// Callers own any retry or rollback decisions. One client instance is meant
/// to be used by one caller at a time.
pub struct DeploymentClient {
    session: Arc<dyn PlatformSession>,
    routing: RoutingConfig,
}

impl DeploymentClient {
    /// Wraps an existing session with the default routing configuration.
    pub fn new(session: Arc<dyn PlatformSession>) -> Self {
        Self {
            session,
            routing: RoutingConfig::default(),
        }
    }

    /// Replaces the routing configuration used to derive default routes.
    pub fn with_routing(mut self, routing: RoutingConfig) -> Self {
        self.routing = routing;
        self
    }

    /// Validates the endpoint, then builds a client around the session the
    /// `open` factory produces for the given credentials and target.
    ///
    /// Only the endpoint check can fail here; the factory is not reached for
    /// a malformed URL, and it must not contact the platform itself. Remote
    /// contact starts with [`login`](Self::login).
    pub fn connect<F>(
        user: impl Into<String>,
        password: impl Into<String>,
        organization: impl Into<String>,
        space: impl Into<String>,
        api_url: &str,
        open: F,
    ) -> Result<Self>
    where
        F: FnOnce(Credentials, Target) -> Arc<dyn PlatformSession>,
    {
        let target = Target::parse(api_url, organization, space)?;
        let credentials = Credentials::new(user, password);
        Ok(Self::new(open(credentials, target)))
    }

    /// Returns the underlying session handle.
    ///
    /// Escape hatch for operations the facade does not cover.
    pub fn session(&self) -> Arc<dyn PlatformSession> {
        Arc::clone(&self.session)
    }

    /// Establishes the remote session.
    pub async fn login(&self) -> Result<()> {
        tracing::info!("Logging in to the platform");
        Ok(self.session.login().await?)
    }

    /// Terminates the remote session.
    pub async fn logout(&self) -> Result<()> {
        tracing::info!("Logging out from the platform");
        Ok(self.session.logout().await?)
    }

    /// Deploys a new application: register, upload the artifact, start.
    ///
    /// Memory defaults to [`DEFAULT_MEMORY_MB`] and the application gets a
    /// single route derived from its name and the configured domain. A local
    /// I/O failure during upload surfaces as [`ClientError::Deployment`];
    /// the registration from the first step is left in place in that case,
    /// so a retry with the same name will collide until the caller deletes
    /// the half-deployed application. Failures while registering or starting
    /// propagate untranslated.
    pub async fn create_app(&self, manifest: &AppManifest) -> Result<()> {
        validate_app_args(&manifest.name, &manifest.artifact)?;

        let memory_mb = manifest.memory_mb.unwrap_or(DEFAULT_MEMORY_MB);
        tracing::info!(
            "Creating application '{}' with {} MB of memory",
            manifest.name,
            memory_mb
        );
        let uris = vec![self.routing.default_route(&manifest.name)];
        let staging = Staging::new(manifest.command.clone(), manifest.buildpack.clone());
        self.session
            .register_application(&manifest.name, &staging, memory_mb, &uris, &manifest.services)
            .await?;

        self.upload(&manifest.name, &manifest.artifact).await?;

        Ok(self.session.start_application(&manifest.name).await?)
    }

    /// Replaces the artifact of an existing application and starts it.
    ///
    /// Staging, memory and service bindings are left as they are; only the
    /// bytes change. Validation and upload failure translation match
    /// [`create_app`](Self::create_app).
    pub async fn update_app(&self, name: &str, artifact: &Path) -> Result<()> {
        validate_app_args(name, artifact)?;

        self.upload(name, artifact).await?;

        Ok(self.session.start_application(name).await?)
    }

    /// Provisions a service instance from a marketplace offering.
    pub async fn create_service(&self, label: &str, name: &str, plan: &str) -> Result<()> {
        if label.is_empty() || name.is_empty() || plan.is_empty() {
            return Err(ClientError::validation(
                "label, name and plan must all be given",
            ));
        }

        tracing::info!("Creating service '{}' ({} / {})", name, label, plan);
        let service = ServiceSpec::new(label, name, plan);
        Ok(self.session.register_service(&service).await?)
    }

    /// Starts the named application.
    pub async fn start_app(&self, name: &str) -> Result<()> {
        Ok(self.session.start_application(name).await?)
    }

    /// Stops the named application.
    pub async fn stop_app(&self, name: &str) -> Result<()> {
        Ok(self.session.stop_application(name).await?)
    }

    /// Deletes the named application.
    pub async fn delete_app(&self, name: &str) -> Result<()> {
        tracing::info!("Deleting application '{}'", name);
        Ok(self.session.delete_application(name).await?)
    }

    /// Deletes the named service instance.
    pub async fn delete_service(&self, name: &str) -> Result<()> {
        tracing::info!("Deleting service '{}'", name);
        Ok(self.session.delete_service(name).await?)
    }

    /// Returns the application's lifecycle state token, e.g. `"STARTED"`.
    ///
    /// The state is fetched fresh from the platform on every call. Any
    /// failure, including an unknown name, surfaces as
    /// [`ClientError::Query`].
    pub async fn get_app_state(&self, name: &str) -> Result<String> {
        let app = self
            .session
            .fetch_application(name)
            .await
            .map_err(|source| ClientError::query(name, source))?;
        Ok(app.state.to_string())
    }

    async fn upload(&self, name: &str, artifact: &Path) -> Result<()> {
        tracing::info!("Uploading artifact for '{}'", name);
        match self.session.upload_artifact(name, artifact).await {
            Ok(()) => Ok(()),
            // Only local I/O failures are translated; anything else the
            // session reports crosses through unchanged.
            Err(SessionError::Io(source)) => Err(ClientError::deployment(name, source)),
            Err(other) => Err(other.into()),
        }
    }
}

impl fmt::Debug for DeploymentClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeploymentClient")
            .field("session", &"<dyn PlatformSession>")
            .field("routing", &self.routing)
            .finish()
    }
}

fn validate_app_args(name: &str, artifact: &Path) -> Result<()> {
    if name.is_empty() || artifact.as_os_str().is_empty() {
        return Err(ClientError::validation(
            "application name and artifact path must both be given",
        ));
    }
    if !artifact.exists() {
        return Err(ClientError::validation(format!(
            "artifact {} does not exist",
            artifact.display()
        )));
    }
    Ok(())
}
