//! Plain-data descriptions of containers, decoupled from the engine's wire
//! types so the lifecycle logic stays mockable.

use std::fmt;

// ── Ports ──

/// Transport protocol of an exposed port.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Protocol {
    Tcp,
    Udp,
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Protocol::Tcp => write!(f, "tcp"),
            Protocol::Udp => write!(f, "udp"),
        }
    }
}

/// A container port to expose and publish.
///
/// Only the container side is specified; the host port is always left to the
/// engine to assign.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortSpec {
    pub container_port: u16,
    pub protocol: Protocol,
}

impl PortSpec {
    pub fn tcp(container_port: u16) -> Self {
        Self {
            container_port,
            protocol: Protocol::Tcp,
        }
    }

    /// The engine's `port/proto` key form.
    ///
    /// # Examples
    ///
    /// ```
    /// use gantry_engine::spec::PortSpec;
    ///
    /// assert_eq!(PortSpec::tcp(8080).key(), "8080/tcp");
    /// ```
    pub fn key(&self) -> String {
        format!("{}/{}", self.container_port, self.protocol)
    }
}

// ── Containers ──

/// Everything needed to create one container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerSpec {
    pub name: String,
    pub image: String,
    /// Lifecycle label marking the container as managed by gantry.
    pub label: Option<String>,
    pub ports: Vec<PortSpec>,
    /// `KEY=value` pairs.
    pub env: Vec<String>,
    /// `container:alias` pairs.
    pub links: Vec<String>,
}

impl ContainerSpec {
    pub fn new(name: impl Into<String>, image: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            image: image.into(),
            label: None,
            ports: Vec::new(),
            env: Vec::new(),
            links: Vec::new(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_port(mut self, port: PortSpec) -> Self {
        self.ports.push(port);
        self
    }

    pub fn with_env(mut self, var: impl Into<String>) -> Self {
        self.env.push(var.into());
        self
    }

    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.links.push(link.into());
        self
    }
}

// ── Observations ──

/// Runtime state reported by the engine for one container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContainerSnapshot {
    pub running: bool,
}

/// One row of a label-filtered container listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerSummary {
    pub id: String,
    /// Engine-reported names, without the leading slash.
    pub names: Vec<String>,
}
