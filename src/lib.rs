//! d3bugr Docs Library
//!
//! Documentation gateway for the d3bugr hunting toolkit. Loads service
//! documentation from a directory of JSON files and serves it over HTTP:
//! - Full and per-service documentation
//! - Endpoint, category and example listings
//! - MCP tool mappings
//! - Full and compact views for LLM context windows

pub mod api;
pub mod config;
pub mod core;
pub mod models;
pub mod utils;

pub use api::{create_router, AppState};
pub use config::ServerConfig;
pub use core::{load_docs, DocCatalog, DocumentMap};
pub use models::{AppError, AppResult, DocumentKind, ErrorCode};
