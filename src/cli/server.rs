use anyhow::Result;
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

#[tracing::instrument(skip(config))]
pub async fn serve(
    config: crate::config::Config,
    host_override: Option<String>,
    port_override: Option<u16>,
) -> Result<()> {
    tracing::info!("starting dinho server");

    let host = host_override.unwrap_or(config.server.host.to_owned());
    let port = port_override.unwrap_or(config.server.port);

    // The write pool creates the file when missing, so it goes first.
    let write_pool = crate::db::create_write_pool(&config.database.url).await?;
    crate::db::migrate(&write_pool).await?;
    let read_pool =
        crate::db::create_read_pool(&config.database.url, config.database.max_connections)
            .await?;

    let state = dinho_shared::State {
        read_db: read_pool.clone(),
        write_db: write_pool.clone(),
    };

    let app = crate::create_app(config, &state)
        .layer(CompressionLayer::new().br(true).gzip(true))
        .layer(TraceLayer::new_for_http());

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("server listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("closing database pools");
    read_pool.close().await;
    write_pool.close().await;

    tracing::info!("graceful shutdown complete");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("received Ctrl+C signal");
        },
        _ = terminate => {
            tracing::info!("received SIGTERM signal");
        },
    }

    tracing::info!("starting graceful shutdown");
}
