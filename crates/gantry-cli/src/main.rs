mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "gantry", about = "Package and run services as containers")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a .gantry.json describing how to reach the container engine
    Configure {
        /// Engine endpoint, e.g. unix:///var/run/docker.sock or tcp://10.0.0.5:2376
        #[arg(long, conflicts_with = "from_env")]
        endpoint: Option<String>,
        /// Connect from the DOCKER_HOST / DOCKER_CERT_PATH environment instead
        #[arg(long)]
        from_env: bool,
    },
    /// Scaffold a new service
    New {
        /// Service name
        name: String,
    },
    /// Build the service in the current directory and run it as a container
    Deploy,
    /// Run the current service as a fixed number of replicas
    Scale {
        /// Desired replica count
        #[arg(value_parser = clap::value_parser!(u32).range(1..))]
        replicas: u32,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Configure { endpoint, from_env } => {
            commands::configure(endpoint, from_env).await?
        }
        Commands::New { name } => commands::new_service(&name).await?,
        Commands::Deploy => commands::deploy().await?,
        Commands::Scale { replicas } => commands::scale(replicas).await?,
    }

    Ok(())
}
