//! Error types for the Skylift facade.

use thiserror::Error;

/// An error produced by a [`PlatformSession`](crate::session::PlatformSession)
/// implementation.
///
/// The facade never fabricates these; they are created by whatever client
/// library backs the session and cross the trait boundary unchanged. The
/// variants cover the failure classes the facade needs to distinguish — in
/// particular [`SessionError::Io`], which is the only upload failure the
/// facade translates.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Authentication or token refresh failed.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// The platform reported that a named resource does not exist.
    #[error("{resource} '{name}' not found")]
    NotFound {
        resource: &'static str,
        name: String,
    },

    /// The platform rejected a request.
    #[error("platform request failed: {message}")]
    Api {
        /// HTTP-like status code, when the backing client exposes one.
        status: Option<u16>,
        message: String,
    },

    /// Transport-level failure between the client and the platform.
    #[error("transport error: {0}")]
    Transport(String),

    /// Local I/O failure, e.g. while streaming an artifact upload.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SessionError {
    /// Creates a NotFound error for the given resource kind and name.
    pub fn not_found(resource: &'static str, name: impl Into<String>) -> Self {
        Self::NotFound {
            resource,
            name: name.into(),
        }
    }

    /// Creates an Api error.
    pub fn api(status: impl Into<Option<u16>>, message: impl Into<String>) -> Self {
        Self::Api {
            status: status.into(),
            message: message.into(),
        }
    }

    /// Check if this is a NotFound error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a local I/O error.
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io(_))
    }
}

/// The single error type surfaced by the deployment facade.
///
/// Four variants correspond to failures the facade detects or translates
/// itself. Everything else crosses through [`ClientError::Remote`] untouched:
/// operations without local validation (`login`, `logout`, `start_app`,
/// `stop_app`, `delete_app`, `delete_service`) never wrap a remote failure,
/// and neither do registration or start steps inside `create_app`. That
/// asymmetry is inherited behavior and is kept on purpose.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The configured API endpoint is not a well-formed URL. Detected at
    /// construction time, before any remote contact.
    #[error("invalid target endpoint '{endpoint}': {source}")]
    Configuration {
        endpoint: String,
        #[source]
        source: url::ParseError,
    },

    /// A required argument was missing or the local artifact does not exist.
    /// Detected before any remote call is made.
    #[error("invalid arguments: {0}")]
    Validation(String),

    /// Artifact upload failed for a local I/O reason. The registration that
    /// preceded the upload is left in place.
    #[error("deploy of '{app}' failed: {source}")]
    Deployment {
        app: String,
        #[source]
        source: std::io::Error,
    },

    /// Fetching the remote application state failed.
    #[error("could not get the state of '{app}': {source}")]
    Query {
        app: String,
        #[source]
        source: SessionError,
    },

    /// A remote failure passed through without translation.
    #[error(transparent)]
    Remote(#[from] SessionError),
}

impl ClientError {
    /// Creates a Validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Creates a Deployment error for the given application.
    pub fn deployment(app: impl Into<String>, source: std::io::Error) -> Self {
        Self::Deployment {
            app: app.into(),
            source,
        }
    }

    /// Creates a Query error for the given application.
    pub fn query(app: impl Into<String>, source: SessionError) -> Self {
        Self::Query {
            app: app.into(),
            source,
        }
    }

    /// Check if this is a Configuration error.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration { .. })
    }

    /// Check if this is a Validation error.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is a Deployment error.
    pub fn is_deployment(&self) -> bool {
        matches!(self, Self::Deployment { .. })
    }

    /// Check if this is a Query error.
    pub fn is_query(&self) -> bool {
        matches!(self, Self::Query { .. })
    }

    /// Check if this is an untranslated remote failure.
    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Remote(_))
    }
}

/// A type alias for `Result<T, ClientError>`.
pub type Result<T> = std::result::Result<T, ClientError>;
