use std::net::SocketAddr;

use axum::{
    routing::{get, post},
    Extension, Router,
};
use tokio::net::TcpListener;
use tower_http::decompression::RequestDecompressionLayer;
use tracing::info;

use super::{
    services::{
        create_programmer, delete_programmer, list_programmers, show_programmer,
        update_programmer,
    },
    state::{AppState, Principal},
};
use crate::config::Config;
use crate::store::Repository;

type AnyError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Build the application router.
///
/// Shared between `run` and the integration tests so both exercise the same
/// routes and middleware.
pub fn router(state: AppState, principal: Principal) -> Router {
    Router::new()
        .route(
            "/api/programmers",
            post(create_programmer).get(list_programmers),
        )
        .route(
            "/api/programmers/{nickname}",
            get(show_programmer)
                .put(update_programmer)
                .patch(update_programmer)
                .delete(delete_programmer),
        )
        .with_state(state)
        .layer(Extension(principal))
        // Automatically decompress gzip/deflate request bodies
        .layer(RequestDecompressionLayer::new())
}

pub async fn run(address: SocketAddr) -> Result<(), AnyError> {
    info!("Loading configuration");
    let config = Config::load().map_err(|e| format!("Failed to load config: {}", e))?;

    info!(path = %config.server.data_path.display(), "Opening programmer store");
    let store = Repository::open(&config.server.data_path)
        .map_err(|e| format!("Failed to open store: {}", e))?;

    // Resolve the configured account once; every request acts on its behalf.
    let principal_user = store
        .find_or_create_user(&config.principal.username)
        .map_err(|e| format!("Failed to resolve principal: {}", e))?;
    let principal = Principal::from(&principal_user);

    let state = AppState::new(config, store);
    let app = router(state, principal);

    let listener = TcpListener::bind(address).await?;
    info!(%address, "CodeBattle API listening");

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        let mut sigterm =
            signal(SignalKind::terminate()).expect("failed to install signal handler");
        sigterm.recv().await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
