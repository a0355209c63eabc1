//! Container-engine operations for gantry.
//!
//! [`EngineApi`] is the narrow seam over the engine's HTTP API, implemented
//! for a live daemon by [`DockerEngine`]. [`EngineClient`] layers state
//! inspection and the idempotent lifecycle reconciler on top. The [`deploy`]
//! and [`broker`] modules compose those pieces into the two flows the CLI
//! drives: shipping a service and provisioning the broker it talks through.

pub mod api;
pub mod broker;
pub mod client;
pub mod deploy;
pub mod error;
pub mod spec;

pub use api::{DockerEngine, EngineApi};
pub use client::{EngineClient, ReconcileError, Reconciliation};
pub use error::{ConnectError, EngineError};
pub use spec::{ContainerSnapshot, ContainerSpec, ContainerSummary, PortSpec, Protocol};
