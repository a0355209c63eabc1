//! Core types and configuration for gantry.
//!
//! This crate defines the `.gantry.json` schema ([`EngineConfig`]), the
//! upward search that locates it, and the directory-derived service
//! identity ([`ServiceIdentity`]) that names everything gantry creates.

pub mod config;
pub mod error;
pub mod identity;

pub use config::{CONFIG_FILE, ConnectMode, DockerConfig, EngineConfig, MachineConfig};
pub use error::{Error, Result};
pub use identity::{MARKER_FILE, ServiceIdentity};
