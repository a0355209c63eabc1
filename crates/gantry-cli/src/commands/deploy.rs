use gantry_core::EngineConfig;
use gantry_engine::{EngineClient, broker, deploy};

/// Execute the full deploy pipeline for the service in the current
/// directory.
pub async fn deploy() -> anyhow::Result<()> {
    let project_dir = std::env::current_dir()?;
    let config = EngineConfig::resolve(&project_dir)?;
    let client = EngineClient::connect(&config).await?;

    // The broker comes up first so the service finds it at start.
    println!("Provisioning broker...");
    let broker_outcome = broker::provision(&client).await?;
    println!("Broker: {}", super::outcome_text(&broker_outcome));

    println!("Building and deploying...");
    let report = deploy::run(&client, &project_dir).await?;
    tracing::debug!(
        service = %report.service,
        container = %report.container,
        replaced = report.replaced.len(),
        "deploy pipeline finished"
    );

    for id in &report.replaced {
        println!("Removed stale instance {id}");
    }
    println!();
    println!(
        "Service '{}' {} as '{}'",
        report.service,
        super::outcome_text(&report.outcome),
        report.container
    );

    Ok(())
}
