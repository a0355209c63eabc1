//! State inspection and the idempotent container lifecycle.

use gantry_core::EngineConfig;
use thiserror::Error;

use crate::api::{DockerEngine, EngineApi};
use crate::error::{ConnectError, EngineError};
use crate::spec::{ContainerSpec, ContainerSummary};

/// What [`reconcile`](EngineClient::reconcile) did to get a container
/// running.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reconciliation {
    /// The container did not exist; it was created and started.
    Created { id: String },
    /// The container existed but was stopped; it was started.
    Started,
    /// Nothing to do.
    AlreadyRunning,
}

/// Failure while driving a container towards the running state.
#[derive(Debug, Error)]
pub enum ReconcileError {
    #[error("unable to create container {name}")]
    Create { name: String, source: EngineError },

    #[error("unable to start container {name}")]
    Start { name: String, source: EngineError },

    #[error("unable to verify current status of container {name}")]
    Verify { name: String, source: EngineError },
}

/// Engine client with gantry's lifecycle policy layered on top of the raw
/// [`EngineApi`] calls.
///
/// Generic over the API so tests can substitute a mock; production code
/// connects with [`EngineClient::connect`] and gets the bollard-backed
/// [`DockerEngine`].
pub struct EngineClient<A: EngineApi = DockerEngine> {
    api: A,
}

impl EngineClient<DockerEngine> {
    /// Connect to the engine selected by the resolved configuration.
    pub async fn connect(config: &EngineConfig) -> Result<Self, ConnectError> {
        Ok(Self {
            api: DockerEngine::connect(config).await?,
        })
    }
}

impl<A: EngineApi> EngineClient<A> {
    pub fn with_api(api: A) -> Self {
        Self { api }
    }

    /// Whether a container with this name exists at all, running or not.
    ///
    /// Every inspection failure is folded into `false`. A missing container
    /// and an unreachable engine both answer "absent" here; operations that
    /// must distinguish the two use [`running`](Self::running) instead.
    pub async fn exists(&self, name: &str) -> bool {
        match self.api.inspect_container(name).await {
            Ok(_) => true,
            Err(error) => {
                tracing::debug!(name, %error, "treating inspect failure as absent");
                false
            }
        }
    }

    /// Whether the named container is currently running.
    ///
    /// # Errors
    ///
    /// Unlike [`exists`](Self::exists), inspection failures propagate: a
    /// caller asking about runtime state needs a real answer, not a guess.
    pub async fn running(&self, name: &str) -> Result<bool, EngineError> {
        Ok(self.api.inspect_container(name).await?.running)
    }

    /// Drive the described container to the running state.
    ///
    /// Absent containers are created and started; stopped ones are started;
    /// running ones are left alone. Calling this again once it has succeeded
    /// performs no further lifecycle calls.
    pub async fn reconcile(&self, spec: &ContainerSpec) -> Result<Reconciliation, ReconcileError> {
        if !self.exists(&spec.name).await {
            let id = self
                .api
                .create_container(spec)
                .await
                .map_err(|source| ReconcileError::Create {
                    name: spec.name.clone(),
                    source,
                })?;
            self.api
                .start_container(&spec.name)
                .await
                .map_err(|source| ReconcileError::Start {
                    name: spec.name.clone(),
                    source,
                })?;
            tracing::info!(name = %spec.name, id = %id, "container created and started");
            return Ok(Reconciliation::Created { id });
        }

        let running =
            self.running(&spec.name)
                .await
                .map_err(|source| ReconcileError::Verify {
                    name: spec.name.clone(),
                    source,
                })?;
        if running {
            tracing::debug!(name = %spec.name, "container already running");
            return Ok(Reconciliation::AlreadyRunning);
        }

        self.api
            .start_container(&spec.name)
            .await
            .map_err(|source| ReconcileError::Start {
                name: spec.name.clone(),
                source,
            })?;
        tracing::info!(name = %spec.name, "container started");
        Ok(Reconciliation::Started)
    }

    /// Build an image named `tag` from an uncompressed tar build context.
    pub async fn build_image(&self, tag: &str, context: Vec<u8>) -> Result<(), EngineError> {
        self.api.build_image(tag, context).await
    }

    /// All containers carrying the given lifecycle label.
    pub async fn labeled(&self, label: &str) -> Result<Vec<ContainerSummary>, EngineError> {
        self.api.list_containers(label).await
    }

    pub async fn remove(&self, id: &str, force: bool) -> Result<(), EngineError> {
        self.api.remove_container(id, force).await
    }
}
