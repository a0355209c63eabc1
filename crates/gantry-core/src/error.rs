use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    // ── Config resolution ──
    #[error("no .gantry.json found in {start} or any parent directory; run `gantry configure` first")]
    ConfigNotFound { start: PathBuf },

    #[error("failed to read config at {path}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config at {path}")]
    ConfigParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("failed to encode config")]
    ConfigEncode { source: serde_json::Error },

    #[error("failed to write config to {path}")]
    ConfigWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    // ── Service identity ──
    #[error("cannot derive a service name from {path}")]
    IdentityResolve { path: PathBuf },

    #[error("failed to write service marker at {path}")]
    MarkerWrite {
        path: PathBuf,
        source: std::io::Error,
    },
}
