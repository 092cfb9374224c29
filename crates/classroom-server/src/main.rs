mod config;

use std::net::SocketAddr;
use std::sync::Arc;

use tower_http::trace::TraceLayer;
use tracing::info;

use classroom_api::{AppState, AppStateInner};
use classroom_hub::Hub;
use classroom_store::Store;

use crate::config::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "classroom=debug,tower_http=debug".into()),
        )
        .init();

    let config = ServerConfig::from_env()?;

    // Shared state
    let hub = Hub::with_capacity(config.subscriber_capacity);
    let state: AppState = Arc::new(
        AppStateInner::new(Store::new(config.seed.clone()), hub.clone())
            .with_keep_alive(config.keep_alive),
    );

    let app = classroom_api::router(state).layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    info!("Classroom backend listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(hub))
        .await?;

    info!("Classroom backend stopped");
    Ok(())
}

/// Resolves on Ctrl-C or SIGTERM. Closing the hub ends every open event
/// stream so the server can finish draining connections.
async fn shutdown_signal(hub: Hub) {
    let ctrl_c = async {
        let _ = tokio::signal::ctrl_c().await;
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    let closed = hub.close_all();
    info!("Shutting down, closed {} event stream(s)", closed);
}
