use anyhow::Result;
use bollybook_server::{AppState, BollybookConfig, create_router, init_telemetry};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let config = BollybookConfig::load()?;
    init_telemetry(config.logging.json)?;

    let state = AppState::from_config(&config).await?;
    let app = create_router(state, &config.server.cors_origin_list());

    let addr = config.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, model = %config.llm.model, "Bollybook server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Bollybook server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
