use axum::extract::Request;
use axum::{ServiceExt, middleware};
use bitality::context::attach_context;
use bitality::{AppConfig, AppState, Store, router};
use std::net::SocketAddr;
use tower::Layer;
use tokio::fs;
use tokio::net::TcpListener;
use tokio::signal::{
    ctrl_c,
    unix::{SignalKind, signal},
};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = AppConfig::from_env();
    if let Some(parent) = config.database_path.parent() {
        fs::create_dir_all(parent).await?;
    }
    let store = Store::open(&config.database_path)?;

    let state = AppState::new(config, store);
    let port = state.config.port;
    // The context middleware wraps the finished router: the mount-prefix
    // rewrite must run before routing, or prefixed self-path requests would
    // fall through to the 404 handler.
    let app = middleware::from_fn_with_state(state.clone(), attach_context).layer(router(state));

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!("listening on http://{addr}");
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        ctrl_c().await.expect("failed to install Ctrl+C handler");
        info!("received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        signal(SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
        info!("received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
