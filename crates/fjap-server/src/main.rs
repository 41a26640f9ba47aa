//! FJAP Server - Main entry point

use anyhow::Result;
use fjap_common::logging::{init_logging, LogConfig};
use std::{net::SocketAddr, time::Duration};
use tokio::signal;
use tracing::{error, info, warn};

use fjap_server::{api, config::Config, db};

#[tokio::main]
async fn main() -> Result<()> {
    let log_config = LogConfig::builder()
        .log_file_prefix("fjap-server")
        .filter_directives("fjap_server=debug,tower_http=debug,sqlx=info")
        .build();

    // LOG_* variables override the defaults above
    let log_config = log_config.merge_env()?;

    let _guard = init_logging(&log_config)?;

    info!("Starting FJAP Server");

    let config = Config::load()?;
    info!(host = %config.server.host, port = config.server.port, "Configuration loaded");

    let pool = db::create_pool(&config.database).await?;
    db::run_migrations(&pool).await?;

    let app = api::create_router(pool, &config);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(config.server.shutdown_timeout_secs))
        .await?;

    info!("Server stopped");

    Ok(())
}

/// Resolves once a stop signal arrives. In-flight requests then get
/// `timeout_secs` to finish before the process exits anyway.
async fn shutdown_signal(timeout_secs: u64) {
    let signal = wait_for_stop_signal().await;
    info!(signal, timeout_secs, "Shutting down, draining open connections");

    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_secs(timeout_secs)).await;
        warn!("Connections still open after {}s, forcing exit", timeout_secs);
        std::process::exit(1);
    });
}

#[cfg(unix)]
async fn wait_for_stop_signal() -> &'static str {
    use signal::unix::{signal as unix_signal, SignalKind};

    let mut terminate = match unix_signal(SignalKind::terminate()) {
        Ok(stream) => stream,
        Err(e) => {
            error!("Failed to install SIGTERM handler: {}", e);
            return ctrl_c().await;
        },
    };

    tokio::select! {
        name = ctrl_c() => name,
        _ = terminate.recv() => "SIGTERM",
    }
}

#[cfg(not(unix))]
async fn wait_for_stop_signal() -> &'static str {
    ctrl_c().await
}

async fn ctrl_c() -> &'static str {
    match signal::ctrl_c().await {
        Ok(()) => "SIGINT",
        Err(e) => {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending().await
        },
    }
}
