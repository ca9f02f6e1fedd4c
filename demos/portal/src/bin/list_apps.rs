use devportal_client::prelude::*;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    setup_logger();
    let config = Config::new();
    info!("Signing in as {}", config.credentials.username);

    let client = match Client::new(config).await {
        Ok(client) => client,
        Err(e) => {
            error!("Login failed: {e}");
            return Err(Box::new(e));
        }
    };

    let team_id = client.team_id().await?;
    match client.team_information().await? {
        Some(team) => info!("Using team {} ({})", team.name, team_id),
        None => info!("Using team {}", team_id),
    }

    let apps = client.apps(Platform::Ios).await?;
    info!("Found {} app identifiers", apps.len());
    for app in &apps {
        let name = app["name"].as_str().unwrap_or("-");
        let identifier = app["identifier"].as_str().unwrap_or("-");
        info!("{:<40} {}", name, identifier);
    }

    if let Ok(json) = serde_json::to_string_pretty(&apps) {
        println!("{json}");
    }
    Ok(())
}
