use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;

use domo_core::Result;

pub mod handlers;
pub mod state;

pub use state::AppState;

pub async fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::permissive();

    Router::new()
        .route("/api/chat", post(handlers::chat))
        .route("/api/articles", get(handlers::list_articles))
        .route("/api/articles/:slug", get(handlers::get_article))
        .route("/api/health", get(handlers::health))
        .layer(cors)
        .with_state(Arc::new(state))
}

/// Binds the listener and serves the API until the process is terminated.
pub async fn serve(bind: &str, state: AppState) -> Result<()> {
    let app = create_app(state).await;
    let listener = tokio::net::TcpListener::bind(bind).await?;
    info!("🌐 Listening on http://{}", bind);
    axum::serve(listener, app).await?;
    Ok(())
}

pub mod prelude {
    pub use crate::AppState;
    pub use domo_core::{Article, Error, Result};
}
