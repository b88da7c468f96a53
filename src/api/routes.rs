//! API Route Configuration

use axum::{middleware, routing::get, Router};
use std::sync::Arc;
use tower::{limit::GlobalConcurrencyLimitLayer, ServiceBuilder};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use super::handlers::{self, AppState};
use super::middleware::{error_body_middleware, logging_middleware};
use crate::config::ServerConfig;

/// Create the API router with all routes and middleware
pub fn create_router(state: Arc<AppState>) -> Router {
    let config = state.config.clone();

    let routes = Router::new()
        // Documentation
        .route("/", get(handlers::index))
        .route("/meta", get(handlers::meta))
        .route("/context", get(handlers::context))
        .route("/workflow", get(handlers::workflow))
        // Services
        .route("/services", get(handlers::list_services))
        .route("/services/:service", get(handlers::service_detail))
        .route("/endpoints", get(handlers::all_endpoints))
        .route("/mcp", get(handlers::mcp))
        .route("/examples", get(handlers::examples))
        .route("/categories", get(handlers::categories))
        // LLM
        .route("/llm/full", get(handlers::llm_full))
        .route("/llm/compact", get(handlers::llm_compact))
        // Health
        .route("/health", get(handlers::health_check))
        .fallback(handlers::not_found)
        .with_state(state);

    apply_middleware(routes, &config)
}

/// Wrap a router in the server's middleware stack
///
/// The concurrency limit sits inside the timeout. The limited router is
/// reached through a fallback route, so waiting for a permit happens in the
/// request future and counts against the timeout.
pub fn apply_middleware(router: Router, config: &ServerConfig) -> Router {
    // One semaphore shared by every route
    let limited = ServiceBuilder::new()
        .layer(GlobalConcurrencyLimitLayer::new(config.max_concurrent_requests))
        .service(router);

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .fallback_service(limited)
        // Middleware (order matters - bottom runs first)
        .layer(TimeoutLayer::new(config.request_timeout))
        .layer(middleware::from_fn(error_body_middleware))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(middleware::from_fn(logging_middleware))
}
