//! Menuboard backend
//!
//! Serves restaurant menus to TV display boards and mobile ordering pages, and hands carts
//! off to a hosted payment checkout.

pub mod api;
pub mod cart;
pub mod checkout;
pub mod config;
pub mod db;
pub mod display;
pub mod errors;
pub mod models;
pub mod payments;

use std::sync::Arc;

use axum::{routing::get, routing::post, Router};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use config::Config;
use db::Repository;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<Repository>,
    /// Shared HTTP client for outbound payment API calls
    pub http: reqwest::Client,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(repo: Repository, config: Config) -> Self {
        Self {
            repo: Arc::new(repo),
            http: reqwest::Client::new(),
            config: Arc::new(config),
        }
    }
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/menu/{slug}", get(api::get_menu))
        .route("/m/{slug}", get(api::get_mobile_menu))
        .route("/display/{slug}", get(api::get_display))
        .route("/display/{slug}/stream", get(api::stream_display))
        .route("/checkout/{slug}", post(api::create_checkout));

    let health_routes = Router::new().route("/health", get(health_check));

    Router::new()
        .nest("/api", api_routes)
        .merge(health_routes)
        .layer(cors)
        .layer(CatchPanicLayer::custom(errors::panic_response))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}
