use gantry_core::{ConnectMode, EngineConfig};

/// Write a `.gantry.json` into the current directory.
///
/// With no flags the default unix socket endpoint is written, matching a
/// stock single-machine engine install.
pub async fn configure(endpoint: Option<String>, from_env: bool) -> anyhow::Result<()> {
    let dir = std::env::current_dir()?;

    let mut config = EngineConfig::default();
    if from_env {
        config.machine.from_env = true;
    } else if let Some(endpoint) = endpoint {
        config.docker.endpoint = endpoint;
    }

    let path = config.store(&dir)?;
    tracing::debug!(mode = ?config.mode(), "engine connection configured");

    println!("Wrote {}", path.display());
    match config.mode() {
        ConnectMode::FromEnv => println!("Engine connection: DOCKER_* environment"),
        ConnectMode::Endpoint(endpoint) => println!("Engine endpoint: {endpoint}"),
    }

    Ok(())
}
