use anyhow::Result;
use rmcp::ServiceExt;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use weather_mcp::{Settings, Weather};

#[tokio::main]
async fn main() -> Result<()> {
    // stdout carries the MCP transport
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "weather_mcp=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!("Starting MCP weather server");

    // OPENWEATHER_API_KEY may live in .env; a missing file is fine
    dotenvy::dotenv().ok();

    let settings = Settings::from_env();
    tracing::info!(
        nws = %settings.nws_api_base,
        openweather = %settings.openweather_api_base,
        "upstream APIs configured"
    );

    let weather = Weather::new(settings)?;
    let server = weather.serve(rmcp::transport::stdio()).await?;
    server.waiting().await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}
