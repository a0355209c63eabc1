use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// File name gantry resolves by walking from the working directory toward
/// the filesystem root. The nearest hit wins; ancestors are never merged.
pub const CONFIG_FILE: &str = ".gantry.json";

/// .gantry.json configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub docker: DockerConfig,
    #[serde(default)]
    pub machine: MachineConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DockerConfig {
    /// Engine endpoint, e.g. `unix:///var/run/docker.sock` or `tcp://10.0.0.5:2376`.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MachineConfig {
    /// Take connection settings from `DOCKER_HOST` / `DOCKER_CERT_PATH` /
    /// `DOCKER_TLS_VERIFY` instead of `docker.endpoint`.
    #[serde(default)]
    pub from_env: bool,
}

/// How to reach the container engine, decided from config contents alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectMode {
    /// Honor the standard `DOCKER_*` environment variables.
    FromEnv,
    /// Dial the configured endpoint directly.
    Endpoint(String),
}

impl Default for DockerConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
        }
    }
}

impl EngineConfig {
    /// Which connection mode this config selects.
    ///
    /// `machine.from_env` wins over any configured endpoint, so a stale
    /// `docker.endpoint` left in the file cannot shadow an environment
    /// handed over by `docker-machine env` or similar tooling.
    ///
    /// # Examples
    ///
    /// ```
    /// use gantry_core::{ConnectMode, EngineConfig};
    ///
    /// let mut config = EngineConfig::default();
    /// config.docker.endpoint = "tcp://10.0.0.5:2376".to_owned();
    /// config.machine.from_env = true;
    /// assert_eq!(config.mode(), ConnectMode::FromEnv);
    /// ```
    pub fn mode(&self) -> ConnectMode {
        if self.machine.from_env {
            ConnectMode::FromEnv
        } else {
            ConnectMode::Endpoint(self.docker.endpoint.clone())
        }
    }

    /// Load config from an exact file path.
    pub fn load(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| crate::Error::ConfigRead {
            path: path.to_owned(),
            source: e,
        })?;
        serde_json::from_str(&content).map_err(|e| crate::Error::ConfigParse {
            path: path.to_owned(),
            source: e,
        })
    }

    /// Find and load the nearest config at or above `start_dir`.
    ///
    /// # Errors
    ///
    /// [`Error::ConfigNotFound`](crate::Error::ConfigNotFound) when no
    /// ancestor holds a config file. A file that exists but cannot be read
    /// or parsed fails immediately; the walk does not continue past it.
    pub fn resolve(start_dir: &Path) -> crate::Result<Self> {
        let path = Self::find(start_dir).ok_or_else(|| crate::Error::ConfigNotFound {
            start: start_dir.to_owned(),
        })?;
        tracing::debug!(path = %path.display(), "resolved config file");
        Self::load(&path)
    }

    /// Locate the nearest config file at or above `start_dir`, if any.
    pub fn find(start_dir: &Path) -> Option<PathBuf> {
        let mut dir = start_dir;
        loop {
            let candidate = dir.join(CONFIG_FILE);
            if candidate.is_file() {
                return Some(candidate);
            }
            dir = dir.parent()?;
        }
    }

    /// Write this config as pretty-printed JSON into `dir`, returning the
    /// path written.
    pub fn store(&self, dir: &Path) -> crate::Result<PathBuf> {
        let path = dir.join(CONFIG_FILE);
        let mut content = serde_json::to_string_pretty(self)
            .map_err(|e| crate::Error::ConfigEncode { source: e })?;
        content.push('\n');
        std::fs::write(&path, content).map_err(|e| crate::Error::ConfigWrite {
            path: path.clone(),
            source: e,
        })?;
        tracing::debug!(path = %path.display(), "wrote config file");
        Ok(path)
    }
}

fn default_endpoint() -> String {
    "unix:///var/run/docker.sock".to_owned()
}
