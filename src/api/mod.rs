//! HTTP API Module
//! Read-only JSON endpoints over the documentation catalog

pub mod handlers;
pub mod middleware;
pub mod routes;

pub use handlers::AppState;
pub use routes::{apply_middleware, create_router};
