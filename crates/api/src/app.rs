use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use persistence::DynSheetStore;

use crate::config::Config;
use crate::middleware::{cors_headers_middleware, trace_id};
use crate::routes::{health, webhook};

#[derive(Clone)]
pub struct AppState {
    pub store: DynSheetStore,
    pub config: Arc<Config>,
}

pub fn create_app(config: Config, store: DynSheetStore) -> Router {
    let config = Arc::new(config);

    let state = AppState {
        store,
        config: config.clone(),
    };

    // The webhook surface lives at the root path: form clients POST
    // submissions there, and the same path answers getData queries.
    let webhook_routes = Router::new()
        .route(
            "/",
            post(webhook::handle_post)
                .get(webhook::handle_get)
                .options(webhook::preflight),
        )
        .route_layer(middleware::from_fn(cors_headers_middleware));

    let public_routes = Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/health/ready", get(health::ready))
        .route("/api/health/live", get(health::live));

    // Global middleware (order matters: bottom layers run first)
    Router::new()
        .merge(webhook_routes)
        .merge(public_routes)
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(trace_id)) // Request ID and logging
        .with_state(state)
}
