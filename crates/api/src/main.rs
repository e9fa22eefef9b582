use anyhow::Context;

use stockboard_infra::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    stockboard_observability::init();

    let config = AppConfig::from_env().context("invalid configuration")?;
    let app = stockboard_api::app::build_app(&config)
        .await
        .context("failed to initialise inventory service")?;

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}
