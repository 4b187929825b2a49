use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use wealthwise_advisor::{api::start_server, config::AdvisorConfig, gemini::GeminiClient};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AdvisorConfig::from_env()?;

    if config.api_key.is_none() {
        warn!("GEMINI_API_KEY not set; AI strategy and advisor chat are disabled");
    }

    info!("WealthWise Advisor - API Server");
    info!("Port: {}", config.port);
    info!("Model: {}", config.model);

    let gateway = Arc::new(GeminiClient::new(&config)?);

    start_server(gateway, config.port).await?;

    Ok(())
}
