use gantry_core::{ConnectMode, EngineConfig};
use tempfile::TempDir;

#[test]
fn resolve_finds_config_in_same_directory() {
    let tmp = TempDir::new().unwrap();
    let json = r#"{ "docker": { "endpoint": "tcp://local:2376" } }"#;
    std::fs::write(tmp.path().join(".gantry.json"), json).unwrap();

    let config = EngineConfig::resolve(tmp.path()).unwrap();
    assert_eq!(config.docker.endpoint, "tcp://local:2376");
}

#[test]
fn resolve_walks_up_to_ancestor() {
    let tmp = TempDir::new().unwrap();
    let json = r#"{ "docker": { "endpoint": "tcp://ancestor:2376" } }"#;
    std::fs::write(tmp.path().join(".gantry.json"), json).unwrap();

    let deep = tmp.path().join("services").join("orders").join("src");
    std::fs::create_dir_all(&deep).unwrap();

    let config = EngineConfig::resolve(&deep).unwrap();
    assert_eq!(config.docker.endpoint, "tcp://ancestor:2376");
}

#[test]
fn resolve_prefers_nearest_config() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(
        tmp.path().join(".gantry.json"),
        r#"{ "docker": { "endpoint": "tcp://outer:2376" } }"#,
    )
    .unwrap();

    let inner = tmp.path().join("orders");
    std::fs::create_dir_all(&inner).unwrap();
    std::fs::write(
        inner.join(".gantry.json"),
        r#"{ "docker": { "endpoint": "tcp://inner:2376" } }"#,
    )
    .unwrap();

    let config = EngineConfig::resolve(&inner).unwrap();
    assert_eq!(config.docker.endpoint, "tcp://inner:2376");
}

#[test]
fn resolve_without_config_reports_start_dir() {
    let tmp = TempDir::new().unwrap();

    let result = EngineConfig::resolve(tmp.path());
    assert!(result.is_err());
    let err = result.unwrap_err().to_string();
    assert!(err.contains(".gantry.json"), "got: {err}");
    assert!(err.contains(&tmp.path().display().to_string()), "got: {err}");
}

#[test]
fn resolve_malformed_nearest_fails_without_falling_back() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(
        tmp.path().join(".gantry.json"),
        r#"{ "docker": { "endpoint": "tcp://outer:2376" } }"#,
    )
    .unwrap();

    let inner = tmp.path().join("orders");
    std::fs::create_dir_all(&inner).unwrap();
    std::fs::write(inner.join(".gantry.json"), "not { json").unwrap();

    let result = EngineConfig::resolve(&inner);
    assert!(result.is_err());
    let err = result.unwrap_err().to_string();
    assert!(err.contains("parse"), "got: {err}");
}

#[test]
fn load_parses_both_sections() {
    let tmp = TempDir::new().unwrap();
    let json = r#"
{
  "docker": { "endpoint": "tcp://10.0.0.5:2376" },
  "machine": { "from_env": true }
}
"#;
    let path = tmp.path().join(".gantry.json");
    std::fs::write(&path, json).unwrap();

    let config = EngineConfig::load(&path).unwrap();
    assert_eq!(config.docker.endpoint, "tcp://10.0.0.5:2376");
    assert!(config.machine.from_env);
    assert_eq!(config.mode(), ConnectMode::FromEnv);
}

#[test]
fn load_empty_object_fills_defaults() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join(".gantry.json");
    std::fs::write(&path, "{}").unwrap();

    let config = EngineConfig::load(&path).unwrap();
    assert_eq!(config.docker.endpoint, "unix:///var/run/docker.sock");
    assert!(!config.machine.from_env);
}

#[test]
fn endpoint_mode_carries_configured_endpoint() {
    let tmp = TempDir::new().unwrap();
    let json = r#"{ "docker": { "endpoint": "tcp://10.0.0.5:2376" } }"#;
    std::fs::write(tmp.path().join(".gantry.json"), json).unwrap();

    let config = EngineConfig::resolve(tmp.path()).unwrap();
    assert_eq!(
        config.mode(),
        ConnectMode::Endpoint("tcp://10.0.0.5:2376".to_owned())
    );
}

#[test]
fn store_then_resolve_round_trips() {
    let tmp = TempDir::new().unwrap();
    let mut config = EngineConfig::default();
    config.docker.endpoint = "tcp://stored:2376".to_owned();
    config.machine.from_env = true;

    let path = config.store(tmp.path()).unwrap();
    assert_eq!(path, tmp.path().join(".gantry.json"));

    let resolved = EngineConfig::resolve(tmp.path()).unwrap();
    assert_eq!(resolved.docker.endpoint, "tcp://stored:2376");
    assert!(resolved.machine.from_env);
}
