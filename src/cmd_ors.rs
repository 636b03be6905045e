//! Routing service diagnostics.

use foodroute_config::Config;
use foodroute_matrix::OrsClient;

pub(crate) async fn health(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let client = OrsClient::from_config(&config.routing)?;
    let body = client.health().await?;
    println!("{}", serde_json::to_string_pretty(&body)?);
    Ok(())
}

pub(crate) async fn status(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let client = OrsClient::from_config(&config.routing)?;
    let body = client.status().await?;
    println!("{}", serde_json::to_string_pretty(&body)?);
    Ok(())
}
