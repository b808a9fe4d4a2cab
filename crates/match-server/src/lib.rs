//! Matches Server Library
//!
//! HTTP service for listing and creating matches:
//! - `GET /matches` and `POST /matches` REST endpoints
//! - `GET /ws` feed broadcasting created matches
//! - `GET /health` liveness check

pub mod api;
pub mod config;
pub mod db;
pub mod middleware;
pub mod notify;
pub mod repo;
pub mod ws;

use axum::http::{header::CONTENT_TYPE, Method};
use axum::routing::get;
use axum::Router;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use notify::{MatchNotifier, NoopNotifier};
use repo::MatchRepository;
use ws::FeedBroadcast;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Match storage.
    pub repo: Arc<dyn MatchRepository>,
    /// Told about every created match.
    pub notifier: Arc<dyn MatchNotifier>,
}

impl AppState {
    /// State with the given repository and a no-op notifier.
    pub fn new(repo: Arc<dyn MatchRepository>) -> Self {
        Self {
            repo,
            notifier: Arc::new(NoopNotifier),
        }
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn MatchNotifier>) -> Self {
        self.notifier = notifier;
        self
    }
}

/// Health check endpoint.
///
/// Returns "ok" to indicate the server is running.
pub async fn health() -> &'static str {
    "ok"
}

/// Builds the application router.
///
/// The `/ws` feed is only mounted when `feed` is given.
pub fn build_router(state: AppState, feed: Option<FeedBroadcast>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE]);

    let mut app = Router::new()
        .route("/health", get(health))
        .route(
            "/matches",
            get(api::matches::list_matches).post(api::matches::create_match),
        )
        .with_state(state);

    if let Some(feed) = feed {
        let ws_router = Router::new()
            .route("/ws", get(ws::ws_handler))
            .with_state(feed);
        app = app.merge(ws_router);
    }

    app.layer(axum::middleware::from_fn(middleware::request_timing))
        .layer(cors)
}
