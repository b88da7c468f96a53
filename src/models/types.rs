//! Type definitions for the documentation gateway
//! Views derived from the loaded documents, as served over HTTP

use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// Classification of a loaded document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    /// Global meta document (LLM context, workflow, gateway usage)
    Meta,
    /// Object with a `service` field
    Service,
    /// Anything else; only visible through `/` and `/llm/full`
    Other,
}

impl DocumentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentKind::Meta => "meta",
            DocumentKind::Service => "service",
            DocumentKind::Other => "other",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            DocumentKind::Meta => "🧭",
            DocumentKind::Service => "📘",
            DocumentKind::Other => "📄",
        }
    }
}

/// `GET /` - meta plus every non-meta document
#[derive(Debug, Clone, Serialize)]
pub struct IndexView {
    pub meta: Value,
    pub services: BTreeMap<String, Value>,
}

/// `GET /context` - the meta sections an LLM needs first
#[derive(Debug, Clone, Serialize)]
pub struct ContextView {
    pub llm_context: Value,
    pub workflow: Value,
    pub gateway_usage: Value,
}

/// One entry of `GET /services`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServiceSummary {
    pub name: Value,
    pub category: Value,
    pub description: Value,
    /// Endpoint paths; `null` where an endpoint has no path
    pub endpoints: Vec<Value>,
}

/// One entry of `GET /endpoints`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EndpointEntry {
    pub service: String,
    pub method: Value,
    pub path: Value,
    pub description: Value,
}

/// `GET /mcp` - MCP tool names grouped by service and flattened
#[derive(Debug, Clone, Serialize)]
pub struct McpView {
    pub prefix: String,
    pub by_service: BTreeMap<String, Value>,
    pub all: Vec<Value>,
}

/// JSON error body
#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}
