use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;

fn gantry() -> assert_cmd::Command {
    cargo_bin_cmd!("gantry")
}

// ── Help / Version ──

#[test]
fn shows_help() {
    gantry()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Package and run services as containers",
        ));
}

#[test]
fn shows_version() {
    gantry()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("gantry"));
}

// ── Configure Command ──

#[test]
fn configure_writes_the_default_endpoint() {
    let tmp = TempDir::new().unwrap();

    gantry()
        .current_dir(tmp.path())
        .arg("configure")
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote"));

    let content = std::fs::read_to_string(tmp.path().join(".gantry.json")).unwrap();
    assert!(content.contains("unix:///var/run/docker.sock"));
}

#[test]
fn configure_honors_a_custom_endpoint() {
    let tmp = TempDir::new().unwrap();

    gantry()
        .current_dir(tmp.path())
        .args(["configure", "--endpoint", "tcp://10.0.0.5:2376"])
        .assert()
        .success()
        .stdout(predicate::str::contains("tcp://10.0.0.5:2376"));

    let content = std::fs::read_to_string(tmp.path().join(".gantry.json")).unwrap();
    assert!(content.contains("tcp://10.0.0.5:2376"));
}

#[test]
fn configure_from_env_sets_the_flag() {
    let tmp = TempDir::new().unwrap();

    gantry()
        .current_dir(tmp.path())
        .args(["configure", "--from-env"])
        .assert()
        .success()
        .stdout(predicate::str::contains("DOCKER_* environment"));

    let content = std::fs::read_to_string(tmp.path().join(".gantry.json")).unwrap();
    assert!(content.contains("\"from_env\": true"));
}

#[test]
fn configure_rejects_both_connection_modes() {
    let tmp = TempDir::new().unwrap();

    gantry()
        .current_dir(tmp.path())
        .args(["configure", "--endpoint", "tcp://host:2376", "--from-env"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn configure_logs_the_selected_mode_under_rust_log() {
    let tmp = TempDir::new().unwrap();

    gantry()
        .current_dir(tmp.path())
        .env("RUST_LOG", "gantry=debug")
        .args(["configure", "--endpoint", "tcp://10.0.0.5:2376"])
        .assert()
        .success()
        .stdout(predicate::str::contains("engine connection configured"));
}

// ── New Command ──

#[test]
fn new_creates_the_service_structure() {
    let tmp = TempDir::new().unwrap();

    gantry()
        .current_dir(tmp.path())
        .args(["new", "pings"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created service"));

    let service_dir = tmp.path().join("pings");
    assert!(service_dir.join("Cargo.toml").exists());
    assert!(service_dir.join("src/main.rs").exists());
    assert!(service_dir.join("Dockerfile").exists());
    assert!(service_dir.join(".gitignore").exists());
}

#[test]
fn new_scaffold_listens_on_the_published_port() {
    let tmp = TempDir::new().unwrap();

    gantry()
        .current_dir(tmp.path())
        .args(["new", "port-check"])
        .assert()
        .success();

    let main_rs = std::fs::read_to_string(tmp.path().join("port-check/src/main.rs")).unwrap();
    assert!(main_rs.contains("0.0.0.0:8080"));

    let dockerfile = std::fs::read_to_string(tmp.path().join("port-check/Dockerfile")).unwrap();
    assert!(dockerfile.contains("EXPOSE 8080"));
    assert!(dockerfile.contains("port-check"));
}

#[test]
fn new_fails_if_directory_exists() {
    let tmp = TempDir::new().unwrap();
    std::fs::create_dir(tmp.path().join("existing")).unwrap();

    gantry()
        .current_dir(tmp.path())
        .args(["new", "existing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

// ── Deploy Command (no engine) ──

#[test]
fn deploy_fails_without_a_config_file() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path().join("lonely");
    std::fs::create_dir(&dir).unwrap();

    gantry()
        .current_dir(&dir)
        .arg("deploy")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no .gantry.json found"));
}

#[test]
fn deploy_reports_an_unreachable_engine() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path().join("orders");
    std::fs::create_dir(&dir).unwrap();
    std::fs::write(
        dir.join(".gantry.json"),
        r#"{"docker":{"endpoint":"unix:///nonexistent/gantry.sock"}}"#,
    )
    .unwrap();

    gantry()
        .current_dir(&dir)
        .arg("deploy")
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "unable to reach the container engine",
        ));
}

// ── Scale Command ──

#[test]
fn scale_requires_at_least_one_replica() {
    let tmp = TempDir::new().unwrap();

    gantry()
        .current_dir(tmp.path())
        .args(["scale", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value '0'"));
}

#[test]
fn scale_requires_a_replica_count() {
    let tmp = TempDir::new().unwrap();

    gantry()
        .current_dir(tmp.path())
        .arg("scale")
        .assert()
        .failure()
        .stderr(predicate::str::contains("REPLICAS"));
}
