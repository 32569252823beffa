//! HTTP router assembly and server lifecycle helpers.

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{handlers, middleware, state::AppState};

/// Build the full application router.
///
/// # Routes
///
/// - `POST /api/readings` (API key required)
/// - `GET /api/readings`
/// - `GET /api/readings/latest`
/// - `POST /login`
/// - `GET /health`
pub fn router(state: AppState) -> Router {
    // Only ingestion is behind the API key; reads stay public.
    let create_reading = post(handlers::readings::create_reading).route_layer(
        axum_middleware::from_fn_with_state(state.clone(), middleware::auth::auth_middleware),
    );

    Router::new()
        .route(
            "/api/readings",
            get(handlers::readings::list_readings).merge(create_reading),
        )
        .route(
            "/api/readings/latest",
            get(handlers::readings::get_latest_reading),
        )
        .route("/login", post(handlers::login::login))
        .route("/health", get(handlers::health::health_check))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Resolves on Ctrl-C, or SIGTERM on Unix, so a service manager can stop the server cleanly.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl-C");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
