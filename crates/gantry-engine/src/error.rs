//! Error types for engine connections and operations.

use thiserror::Error;

// ── Engine operations ──

/// Failure of a single engine API call.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("container engine API error: {0}")]
    Api(#[from] bollard::errors::Error),

    /// The daemon accepted the build but reported a failure mid-stream.
    #[error("image build failed: {detail}")]
    Build { detail: String },
}

// ── Connecting ──

/// Failure to establish (and verify) a connection to the engine.
#[derive(Debug, Error)]
pub enum ConnectError {
    #[error("unable to reach the container engine described by the environment")]
    Env { source: bollard::errors::Error },

    #[error("unable to reach the container engine at {endpoint}")]
    Endpoint {
        endpoint: String,
        source: bollard::errors::Error,
    },

    #[error("unsupported engine endpoint {endpoint}; expected a unix:// or tcp:// address")]
    UnsupportedEndpoint { endpoint: String },

    #[error("DOCKER_CERT_PATH is set but gantry was built without the `tls` feature")]
    TlsUnavailable,
}
