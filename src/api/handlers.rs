//! API Request Handlers
//!
//! Thin wrappers around `DocCatalog`: each handler picks one view and
//! serializes it. Payloads are the bare documents, not an envelope.

use axum::{
    extract::{Json, Path, State},
    http::Uri,
};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

use crate::config::ServerConfig;
use crate::core::{DocCatalog, DocumentMap};
use crate::models::errors::{AppError, AppResult};
use crate::models::types::{ContextView, EndpointEntry, IndexView, McpView, ServiceSummary};

/// Shared application state
pub struct AppState {
    pub catalog: DocCatalog,
    pub config: ServerConfig,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(catalog: DocCatalog, config: ServerConfig) -> Self {
        Self {
            catalog,
            config,
            start_time: Instant::now(),
        }
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}

// ============================================
// Documentation
// ============================================

/// Full documentation: meta plus every service document
pub async fn index(State(state): State<Arc<AppState>>) -> Json<IndexView> {
    Json(state.catalog.index())
}

/// Meta info and LLM context
pub async fn meta(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(state.catalog.meta())
}

/// LLM context: what / why / when
pub async fn context(State(state): State<Arc<AppState>>) -> Json<ContextView> {
    Json(state.catalog.context())
}

/// Hunting workflow phases
pub async fn workflow(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(state.catalog.workflow())
}

// ============================================
// Services
// ============================================

pub async fn list_services(
    State(state): State<Arc<AppState>>,
) -> Json<BTreeMap<String, ServiceSummary>> {
    Json(state.catalog.services())
}

pub async fn service_detail(
    State(state): State<Arc<AppState>>,
    Path(service): Path<String>,
) -> AppResult<Json<Value>> {
    let doc = state.catalog.service(&service)?;
    debug!("📘 Serving docs for {}", service);
    Ok(Json(doc.clone()))
}

pub async fn all_endpoints(State(state): State<Arc<AppState>>) -> Json<Vec<EndpointEntry>> {
    Json(state.catalog.endpoints())
}

/// MCP tool mappings
pub async fn mcp(State(state): State<Arc<AppState>>) -> Json<McpView> {
    Json(state.catalog.mcp())
}

pub async fn examples(State(state): State<Arc<AppState>>) -> Json<Vec<Value>> {
    Json(state.catalog.examples())
}

pub async fn categories(
    State(state): State<Arc<AppState>>,
) -> Json<BTreeMap<String, Vec<String>>> {
    Json(state.catalog.categories())
}

// ============================================
// LLM
// ============================================

/// Complete docs for LLM context
pub async fn llm_full(State(state): State<Arc<AppState>>) -> Json<DocumentMap> {
    Json(state.catalog.full().clone())
}

/// Compact reference
pub async fn llm_compact(
    State(state): State<Arc<AppState>>,
) -> Json<BTreeMap<String, Vec<String>>> {
    Json(state.catalog.compact())
}

// ============================================
// Health Check
// ============================================

pub async fn health_check() -> &'static str {
    "ok"
}

// ============================================
// Fallback
// ============================================

pub async fn not_found(uri: Uri) -> AppError {
    AppError::not_found(uri.path())
}
