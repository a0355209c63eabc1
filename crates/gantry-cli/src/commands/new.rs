use std::path::Path;

/// Scaffold a new service ready for `gantry deploy`.
pub async fn new_service(name: &str) -> anyhow::Result<()> {
    let project_dir = Path::new(name);
    if project_dir.exists() {
        anyhow::bail!("directory '{name}' already exists");
    }

    std::fs::create_dir_all(project_dir.join("src"))?;

    // Cargo.toml
    let cargo_toml = format!(
        r#"[package]
name = "{name}"
version = "0.1.0"
edition = "2024"

[dependencies]
"#
    );
    std::fs::write(project_dir.join("Cargo.toml"), cargo_toml)?;

    // main.rs: answers on the port gantry publishes
    let main_rs = r#"use std::io::Write;
use std::net::TcpListener;

fn main() -> std::io::Result<()> {
    let listener = TcpListener::bind("0.0.0.0:8080")?;
    println!("listening on {}", listener.local_addr()?);

    for stream in listener.incoming() {
        let mut stream = stream?;
        stream.write_all(b"HTTP/1.1 200 OK\r\nContent-Length: 3\r\n\r\nok\n")?;
    }
    Ok(())
}
"#;
    std::fs::write(project_dir.join("src/main.rs"), main_rs)?;

    // Dockerfile
    let dockerfile = format!(
        r#"FROM rust:1.85 AS build
WORKDIR /app
COPY . .
RUN cargo build --release

FROM debian:bookworm-slim
COPY --from=build /app/target/release/{name} /usr/local/bin/{name}
EXPOSE 8080
CMD ["{name}"]
"#
    );
    std::fs::write(project_dir.join("Dockerfile"), dockerfile)?;

    // .gitignore
    std::fs::write(project_dir.join(".gitignore"), "/target\n")?;

    println!("Created service '{name}'");
    println!();
    println!("  cd {name}");
    println!("  cargo run              # local development");
    println!("  gantry deploy          # build and run as a container");

    Ok(())
}
