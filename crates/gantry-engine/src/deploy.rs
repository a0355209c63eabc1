//! The deploy pipeline: mark, package, build, replace, run.

use std::path::Path;

use gantry_core::ServiceIdentity;
use thiserror::Error;

use crate::api::EngineApi;
use crate::client::{EngineClient, ReconcileError, Reconciliation};
use crate::error::EngineError;
use crate::spec::{ContainerSpec, PortSpec};

/// Container port every gantry service is expected to listen on.
pub const APP_PORT: u16 = 8080;

/// What one deploy did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployReport {
    pub service: String,
    /// Ids of the stale instances that were force-removed.
    pub replaced: Vec<String>,
    /// Name of the container the service now runs as.
    pub container: String,
    pub outcome: Reconciliation,
}

/// What one scale operation did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaleReport {
    pub service: String,
    /// Per-replica container names and what it took to get them running.
    pub outcomes: Vec<(String, Reconciliation)>,
    /// Names of the surplus replicas that were removed.
    pub removed: Vec<String>,
}

/// Failure in the deploy or scale pipeline.
///
/// Each step aborts the pipeline on its first failure; nothing later in the
/// sequence runs.
#[derive(Debug, Error)]
pub enum DeployError {
    #[error("unable to resolve the service identity")]
    Identity { source: gantry_core::Error },

    #[error("unable to write the service marker")]
    Marker { source: gantry_core::Error },

    #[error("unable to package the build context")]
    Package { source: gantry_build::ContextError },

    #[error("unable to build image {tag}")]
    Build { tag: String, source: EngineError },

    #[error("unable to verify current status of the service")]
    ListStale { source: EngineError },

    #[error("unable to stop already running instance {id}")]
    RemoveStale { id: String, source: EngineError },

    #[error(transparent)]
    Reconcile(#[from] ReconcileError),
}

/// Build and (re)start the service that lives in `project_dir`.
///
/// The sequence is fixed: write the name marker, package the directory,
/// build the image, force-remove every container labeled with the service
/// name, then reconcile the first replica onto port 8080. Removal happens
/// before the new container is created so its name is free to reuse.
pub async fn run<A: EngineApi>(
    client: &EngineClient<A>,
    project_dir: &Path,
) -> Result<DeployReport, DeployError> {
    let identity =
        ServiceIdentity::from_dir(project_dir).map_err(|source| DeployError::Identity { source })?;
    tracing::info!(service = identity.name(), "deploying");

    identity
        .write_marker(project_dir)
        .map_err(|source| DeployError::Marker { source })?;

    let context =
        gantry_build::package(project_dir).map_err(|source| DeployError::Package { source })?;
    client
        .build_image(identity.name(), context)
        .await
        .map_err(|source| DeployError::Build {
            tag: identity.name().to_owned(),
            source,
        })?;

    let stale = client
        .labeled(identity.name())
        .await
        .map_err(|source| DeployError::ListStale { source })?;
    let mut replaced = Vec::with_capacity(stale.len());
    for instance in stale {
        tracing::info!(
            service = identity.name(),
            id = %instance.id,
            "removing stale instance"
        );
        client
            .remove(&instance.id, true)
            .await
            .map_err(|source| DeployError::RemoveStale {
                id: instance.id.clone(),
                source,
            })?;
        replaced.push(instance.id);
    }

    let spec = service_spec(&identity, 1);
    let outcome = client.reconcile(&spec).await?;

    Ok(DeployReport {
        service: identity.name().to_owned(),
        replaced,
        container: spec.name,
        outcome,
    })
}

/// Bring the service in `project_dir` to exactly `replicas` running
/// containers, without rebuilding the image.
///
/// Replicas `1..=replicas` are reconciled in order; labeled containers with
/// a higher index are removed. Scaling to zero removes every replica.
pub async fn scale<A: EngineApi>(
    client: &EngineClient<A>,
    project_dir: &Path,
    replicas: u32,
) -> Result<ScaleReport, DeployError> {
    let identity =
        ServiceIdentity::from_dir(project_dir).map_err(|source| DeployError::Identity { source })?;
    tracing::info!(service = identity.name(), replicas, "scaling");

    let mut outcomes = Vec::with_capacity(replicas as usize);
    for index in 1..=replicas {
        let spec = service_spec(&identity, index);
        let outcome = client.reconcile(&spec).await?;
        outcomes.push((spec.name, outcome));
    }

    let rows = client
        .labeled(identity.name())
        .await
        .map_err(|source| DeployError::ListStale { source })?;
    let mut removed = Vec::new();
    for row in rows {
        let Some(name) = row.names.iter().find(|name| {
            replica_index(name, identity.name()).is_some_and(|index| index > replicas)
        }) else {
            continue;
        };
        tracing::info!(service = identity.name(), name = %name, "removing surplus replica");
        client
            .remove(&row.id, true)
            .await
            .map_err(|source| DeployError::RemoveStale {
                id: row.id.clone(),
                source,
            })?;
        removed.push(name.clone());
    }

    Ok(ScaleReport {
        service: identity.name().to_owned(),
        outcomes,
        removed,
    })
}

/// The container spec for one replica of a deployed service.
fn service_spec(identity: &ServiceIdentity, index: u32) -> ContainerSpec {
    ContainerSpec::new(identity.container_name(index), identity.name())
        .with_label(identity.name())
        .with_port(PortSpec::tcp(APP_PORT))
}

/// Parse the replica index out of `<service>_<index>`, if `name` has that
/// exact shape.
fn replica_index(name: &str, service: &str) -> Option<u32> {
    name.strip_prefix(service)?.strip_prefix('_')?.parse().ok()
}
