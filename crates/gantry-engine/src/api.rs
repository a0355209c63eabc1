//! The engine seam: a narrow async trait over the container engine API and
//! its bollard-backed implementation.

use std::collections::HashMap;

use bollard::API_DEFAULT_VERSION;
use bollard::Docker;
use bollard::container::{
    Config, CreateContainerOptions, InspectContainerOptions, ListContainersOptions,
    RemoveContainerOptions, StartContainerOptions,
};
use bollard::image::BuildImageOptions;
use bollard::models::{HostConfig, PortBinding};
use futures::StreamExt;
use gantry_core::{ConnectMode, EngineConfig};

use crate::error::{ConnectError, EngineError};
use crate::spec::{ContainerSnapshot, ContainerSpec, ContainerSummary};

const CONNECT_TIMEOUT_SECS: u64 = 120;

/// The engine operations gantry needs, and nothing more.
///
/// Keeping this narrow lets the lifecycle and deploy logic run against a
/// mock in tests while [`DockerEngine`] talks to a real daemon.
#[allow(async_fn_in_trait)]
pub trait EngineApi: Send + Sync {
    /// Create a container from `spec` and return its engine-assigned id.
    async fn create_container(&self, spec: &ContainerSpec) -> Result<String, EngineError>;

    async fn start_container(&self, name: &str) -> Result<(), EngineError>;

    /// Look up one container by name.
    ///
    /// Errors are returned as-is, including not-found; callers decide which
    /// of them mean "absent".
    async fn inspect_container(&self, name: &str) -> Result<ContainerSnapshot, EngineError>;

    /// List all containers (running or not) carrying `label`.
    async fn list_containers(&self, label: &str) -> Result<Vec<ContainerSummary>, EngineError>;

    async fn remove_container(&self, id: &str, force: bool) -> Result<(), EngineError>;

    /// Build an image named `tag` from an uncompressed tar build context.
    async fn build_image(&self, tag: &str, context: Vec<u8>) -> Result<(), EngineError>;
}

/// Live engine connection backed by bollard.
pub struct DockerEngine {
    docker: Docker,
}

impl DockerEngine {
    /// Connect as the configuration dictates and verify the engine answers
    /// a ping before returning.
    pub async fn connect(config: &EngineConfig) -> Result<Self, ConnectError> {
        let docker = match config.mode() {
            ConnectMode::FromEnv => connect_from_env().await?,
            ConnectMode::Endpoint(endpoint) => connect_endpoint(&endpoint).await?,
        };
        Ok(Self { docker })
    }
}

impl EngineApi for DockerEngine {
    async fn create_container(&self, spec: &ContainerSpec) -> Result<String, EngineError> {
        let options = CreateContainerOptions {
            name: spec.name.clone(),
            ..Default::default()
        };

        let mut exposed_ports: HashMap<String, HashMap<(), ()>> = HashMap::new();
        let mut port_bindings: HashMap<String, Option<Vec<PortBinding>>> = HashMap::new();
        for port in &spec.ports {
            exposed_ports.insert(port.key(), HashMap::new());
            // An empty binding asks the engine to pick a free host port.
            port_bindings.insert(port.key(), Some(vec![PortBinding::default()]));
        }

        let config = Config {
            image: Some(spec.image.clone()),
            labels: spec
                .label
                .as_ref()
                .map(|label| HashMap::from([(label.clone(), String::new())])),
            env: (!spec.env.is_empty()).then(|| spec.env.clone()),
            exposed_ports: Some(exposed_ports),
            host_config: Some(HostConfig {
                port_bindings: Some(port_bindings),
                links: (!spec.links.is_empty()).then(|| spec.links.clone()),
                ..Default::default()
            }),
            ..Default::default()
        };

        let created = self.docker.create_container(Some(options), config).await?;
        tracing::debug!(name = %spec.name, id = %created.id, "container created");
        Ok(created.id)
    }

    async fn start_container(&self, name: &str) -> Result<(), EngineError> {
        self.docker
            .start_container(name, None::<StartContainerOptions<String>>)
            .await?;
        tracing::debug!(name, "container started");
        Ok(())
    }

    async fn inspect_container(&self, name: &str) -> Result<ContainerSnapshot, EngineError> {
        let details = self
            .docker
            .inspect_container(name, None::<InspectContainerOptions>)
            .await?;
        let running = details
            .state
            .and_then(|state| state.running)
            .unwrap_or(false);
        Ok(ContainerSnapshot { running })
    }

    async fn list_containers(&self, label: &str) -> Result<Vec<ContainerSummary>, EngineError> {
        let options = ListContainersOptions {
            all: true,
            filters: HashMap::from([("label".to_owned(), vec![label.to_owned()])]),
            ..Default::default()
        };
        let rows = self.docker.list_containers(Some(options)).await?;
        Ok(rows
            .into_iter()
            .map(|row| ContainerSummary {
                id: row.id.unwrap_or_default(),
                names: row
                    .names
                    .unwrap_or_default()
                    .into_iter()
                    .map(|name| name.trim_start_matches('/').to_owned())
                    .collect(),
            })
            .collect())
    }

    async fn remove_container(&self, id: &str, force: bool) -> Result<(), EngineError> {
        let options = RemoveContainerOptions {
            force,
            ..Default::default()
        };
        self.docker.remove_container(id, Some(options)).await?;
        tracing::debug!(id, force, "container removed");
        Ok(())
    }

    async fn build_image(&self, tag: &str, context: Vec<u8>) -> Result<(), EngineError> {
        let options = BuildImageOptions {
            dockerfile: "Dockerfile".to_owned(),
            t: tag.to_owned(),
            rm: true,
            ..Default::default()
        };
        tracing::debug!(tag, bytes = context.len(), "starting image build");

        let mut stream = self.docker.build_image(options, None, Some(context.into()));
        while let Some(update) = stream.next().await {
            let update = update?;
            if let Some(detail) = update.error {
                return Err(EngineError::Build { detail });
            }
            if let Some(line) = update.stream {
                let line = line.trim_end();
                if !line.is_empty() {
                    println!("{line}");
                }
            }
        }
        Ok(())
    }
}

// ── Connection modes ──

async fn connect_from_env() -> Result<Docker, ConnectError> {
    let docker = if wants_tls() {
        connect_from_env_tls()?
    } else if std::env::var_os("DOCKER_HOST").is_some() {
        Docker::connect_with_http_defaults().map_err(|source| ConnectError::Env { source })?
    } else {
        Docker::connect_with_local_defaults().map_err(|source| ConnectError::Env { source })?
    };

    docker
        .ping()
        .await
        .map_err(|source| ConnectError::Env { source })?;
    tracing::debug!("engine reachable via environment settings");
    Ok(docker)
}

fn wants_tls() -> bool {
    std::env::var_os("DOCKER_CERT_PATH").is_some()
        || std::env::var_os("DOCKER_TLS_VERIFY").is_some_and(|v| !v.is_empty())
}

#[cfg(feature = "tls")]
fn connect_from_env_tls() -> Result<Docker, ConnectError> {
    Docker::connect_with_ssl_defaults().map_err(|source| ConnectError::Env { source })
}

#[cfg(not(feature = "tls"))]
fn connect_from_env_tls() -> Result<Docker, ConnectError> {
    Err(ConnectError::TlsUnavailable)
}

async fn connect_endpoint(endpoint: &str) -> Result<Docker, ConnectError> {
    let docker = if let Some(path) = endpoint.strip_prefix("unix://") {
        Docker::connect_with_unix(path, CONNECT_TIMEOUT_SECS, API_DEFAULT_VERSION)
    } else if endpoint.starts_with("tcp://") || endpoint.starts_with("http://") {
        Docker::connect_with_http(endpoint, CONNECT_TIMEOUT_SECS, API_DEFAULT_VERSION)
    } else if endpoint.starts_with('/') {
        // Bare socket paths are accepted as a convenience.
        Docker::connect_with_unix(endpoint, CONNECT_TIMEOUT_SECS, API_DEFAULT_VERSION)
    } else {
        return Err(ConnectError::UnsupportedEndpoint {
            endpoint: endpoint.to_owned(),
        });
    }
    .map_err(|source| ConnectError::Endpoint {
        endpoint: endpoint.to_owned(),
        source,
    })?;

    docker.ping().await.map_err(|source| ConnectError::Endpoint {
        endpoint: endpoint.to_owned(),
        source,
    })?;
    tracing::debug!(endpoint, "engine reachable");
    Ok(docker)
}
