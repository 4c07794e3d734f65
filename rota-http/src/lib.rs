//! Rota HTTP - JSON API for Reviewer Rota
//!
//! Exposes the [`ReviewService`] operations over HTTP with axum.

mod dto;
mod error;
mod handlers;

use std::future::Future;

use axum::routing::{get, post};
use axum::Router;
use rota_core::ReviewService;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

pub use error::ApiError;

/// Build the application router
pub fn router(service: ReviewService) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/team/add", post(handlers::add_team))
        .route("/team/get", get(handlers::get_team))
        .route("/users/setIsActive", post(handlers::set_is_active))
        .route("/users/getReview", get(handlers::get_reviews))
        .route("/pullRequest/create", post(handlers::create_pull_request))
        .route("/pullRequest/merge", post(handlers::merge_pull_request))
        .route("/pullRequest/reassign", post(handlers::reassign_reviewer))
        .layer(TraceLayer::new_for_http())
        .with_state(service)
}

/// Serve the API on `listener` until `shutdown` resolves
pub async fn serve(
    listener: TcpListener,
    service: ReviewService,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> std::io::Result<()> {
    if let Ok(addr) = listener.local_addr() {
        tracing::info!(%addr, "HTTP API listening");
    }
    axum::serve(listener, router(service))
        .with_graceful_shutdown(shutdown)
        .await
}
