use gantry_core::EngineConfig;
use gantry_engine::{EngineClient, broker, deploy};

/// Bring the service in the current directory to the requested replica
/// count, reusing the image from the last deploy.
pub async fn scale(replicas: u32) -> anyhow::Result<()> {
    let project_dir = std::env::current_dir()?;
    let config = EngineConfig::resolve(&project_dir)?;
    let client = EngineClient::connect(&config).await?;

    println!("Provisioning broker...");
    let broker_outcome = broker::provision(&client).await?;
    println!("Broker: {}", super::outcome_text(&broker_outcome));

    println!("Scaling to {replicas} replica(s)...");
    let report = deploy::scale(&client, &project_dir, replicas).await?;
    tracing::debug!(
        service = %report.service,
        replicas,
        removed = report.removed.len(),
        "scale pipeline finished"
    );

    for (name, outcome) in &report.outcomes {
        println!("  {name}: {}", super::outcome_text(outcome));
    }
    for name in &report.removed {
        println!("  {name}: removed");
    }
    println!();
    println!("Service '{}' running with {replicas} replica(s)", report.service);

    Ok(())
}
