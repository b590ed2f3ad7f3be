use otpk_assistant::{api::start_server, config::Config};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env()?;

    info!("🚀 ОТПК Бот - API Server");
    info!("📍 Port: {}", config.api_port);

    start_server(config.api_port).await?;

    Ok(())
}
