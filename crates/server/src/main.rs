mod bootstrap;
mod charts;
mod health;
pub mod web;

use std::time::Duration;

use anyhow::Result;
use boxoffice_core::config::{AppConfig, LoadOptions};
use tokio::sync::oneshot;

fn init_logging(config: &AppConfig) {
    use boxoffice_core::config::LogFormat::*;
    use tracing::Level;

    let log_level = config.logging.level.parse::<Level>().unwrap_or(Level::INFO);

    match config.logging.format {
        Compact => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).compact().init();
        }
        Pretty => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).pretty().init();
        }
        Json => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).json().init();
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    run().await
}

pub async fn run() -> Result<()> {
    // Logging needs the loaded config, so it comes up before bootstrap.
    let config = AppConfig::load(LoadOptions::default())?;
    init_logging(&config);

    let app = bootstrap::bootstrap_with_config(config).await?;
    let server = &app.config.server;

    health::spawn(
        &server.bind_address,
        server.health_check_port,
        app.config.data.movie_data_path.clone(),
    )
    .await?;

    let state = web::WebState::new(app.config.data.movie_data_path.clone(), app.chart_sink.clone());
    let router = web::router(state, app.chart_sink.output_dir());

    let address = format!("{}:{}", server.bind_address, server.port);
    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!(
        event_name = "system.server.started",
        correlation_id = "bootstrap",
        bind_address = %address,
        "boxoffice-server started"
    );

    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
    let serving = tokio::spawn(async move {
        axum::serve(listener, router)
            .with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
            })
            .await
    });

    wait_for_shutdown().await?;
    tracing::info!(
        event_name = "system.server.stopping",
        correlation_id = "shutdown",
        grace_secs = server.graceful_shutdown_secs,
        "boxoffice-server stopping"
    );
    let _ = shutdown_tx.send(());

    match tokio::time::timeout(Duration::from_secs(server.graceful_shutdown_secs), serving).await {
        Ok(joined) => joined??,
        Err(_) => tracing::warn!(
            event_name = "system.server.shutdown_timeout",
            correlation_id = "shutdown",
            "in-flight requests did not finish within the grace period"
        ),
    }

    Ok(())
}

async fn wait_for_shutdown() -> Result<()> {
    tokio::signal::ctrl_c().await?;
    Ok(())
}
