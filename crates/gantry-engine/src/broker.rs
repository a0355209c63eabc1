//! Provisioning of the shared messaging broker services talk through.

use crate::api::EngineApi;
use crate::client::{EngineClient, ReconcileError, Reconciliation};
use crate::spec::{ContainerSpec, PortSpec};

/// Image the broker runs from.
pub const BROKER_IMAGE: &str = "spotify/kafka";
/// Container name, link alias, and lifecycle label of the broker.
pub const BROKER_NAME: &str = "kafka";
/// Coordination port.
pub const BROKER_CONTROL_PORT: u16 = 2181;
/// Port clients publish and consume on.
pub const BROKER_DATA_PORT: u16 = 9092;

/// The fixed, project-independent broker container.
///
/// The advertised host matches the container name so linked services reach
/// the broker under the same address the broker hands back to them.
pub fn broker_spec() -> ContainerSpec {
    ContainerSpec::new(BROKER_NAME, BROKER_IMAGE)
        .with_label(BROKER_NAME)
        .with_port(PortSpec::tcp(BROKER_CONTROL_PORT))
        .with_port(PortSpec::tcp(BROKER_DATA_PORT))
        .with_env(format!("ADVERTISED_HOST={BROKER_NAME}"))
        .with_env(format!("ADVERTISED_PORT={BROKER_DATA_PORT}"))
}

/// Ensure the shared broker is up, creating and starting it if needed.
///
/// Safe to call before every deploy: an already-running broker means no
/// lifecycle calls at all.
pub async fn provision<A: EngineApi>(
    client: &EngineClient<A>,
) -> Result<Reconciliation, ReconcileError> {
    tracing::debug!(name = BROKER_NAME, image = BROKER_IMAGE, "ensuring broker");
    client.reconcile(&broker_spec()).await
}
