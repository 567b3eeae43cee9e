//! melo-api
//!
//! HTTP surface of the patient summary service.

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod summary;

use std::future::Future;

use axum::Router;
use axum::middleware as axum_mw;
use axum::routing::get;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};

use state::AppState;

/// Build the application router.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let protected = Router::new()
        .route(
            "/patient/summary/{patient_id}",
            get(routes::summary::patient_summary),
        )
        .route_layer(axum_mw::from_fn_with_state(
            state.clone(),
            middleware::auth::require_auth,
        ));

    Router::new()
        // Welcome (no auth)
        .route("/", get(routes::root::welcome))
        .merge(protected)
        .layer(axum_mw::from_fn(middleware::audit::audit_log))
        .layer(cors)
        .with_state(state)
}

/// Serve the application until `shutdown` resolves, then close the database pool.
pub async fn serve(
    listener: TcpListener,
    state: AppState,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> std::io::Result<()> {
    let pool = state.pool.clone();
    let served = axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await;

    pool.close().await;
    tracing::info!("database pool closed");

    served
}
