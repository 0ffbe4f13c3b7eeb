//! Flamingo Forecast - sunbathing forecasts for Florida beach towns

use anyhow::{Context, Result};
use flamingo_core::Config;
use flamingo_server::{router, AppState};
use flamingo_weather::ForecastClient;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<()> {
    // .env is optional
    dotenv::dotenv().ok();

    flamingo_core::init()?;

    let (config, _) = match Config::load_validated() {
        Ok(loaded) => loaded,
        Err(e) => {
            tracing::error!("{}", e.user_message());
            return Err(e).context("Failed to load configuration");
        }
    };

    let client = ForecastClient::new(&config.contact_email)
        .context("Failed to build weather service client")?;
    let app = router(AppState::new(client));

    let addr = config.bind_addr().context("Failed to read bind address")?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!("Flamingo Forecast listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
