//! Documentation Catalog
//!
//! Immutable, in-memory view over the loaded documents. Every HTTP route
//! maps to one method here; the handlers only serialize what comes back.
//!
//! Lookups are lenient: a missing field, a field of the wrong shape or a
//! document that is not an object all produce the documented default
//! instead of an error.

use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::Path;

use super::loader::{load_docs, DocumentMap};
use crate::models::errors::{AppError, AppResult};
use crate::models::types::{
    ContextView, DocumentKind, EndpointEntry, IndexView, McpView, ServiceSummary,
};
use crate::utils::constants::{
    DEFAULT_CATEGORY, DEFAULT_METHOD, FIELD_CATEGORY, FIELD_DESCRIPTION, FIELD_ENDPOINTS,
    FIELD_EXAMPLES, FIELD_MCP_TOOLS, FIELD_METHOD, FIELD_NAME, FIELD_PATH, FIELD_SERVICE,
    META_GATEWAY_USAGE, META_KEY, META_LLM_CONTEXT, META_WORKFLOW,
};

/// Loaded documents plus the settings needed to render views
#[derive(Debug, Clone)]
pub struct DocCatalog {
    docs: DocumentMap,
    mcp_prefix: String,
}

/// A document that declares a service, with its resolved id
struct ServiceDoc<'a> {
    id: String,
    doc: &'a Map<String, Value>,
}

impl DocCatalog {
    pub fn new(docs: DocumentMap, mcp_prefix: impl Into<String>) -> Self {
        Self {
            docs,
            mcp_prefix: mcp_prefix.into(),
        }
    }

    /// Load the catalog from a docs directory
    pub fn load(dir: &Path, mcp_prefix: impl Into<String>) -> AppResult<Self> {
        Ok(Self::new(load_docs(dir)?, mcp_prefix))
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    /// Document keys in ascending order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.docs.keys().map(String::as_str)
    }

    /// Number of documents declaring a service
    pub fn service_count(&self) -> usize {
        self.service_docs().count()
    }

    pub fn mcp_prefix(&self) -> &str {
        &self.mcp_prefix
    }

    /// Classify the document stored under `key`
    pub fn kind_of(&self, key: &str) -> Option<DocumentKind> {
        let doc = self.docs.get(key)?;
        let kind = if key == META_KEY {
            DocumentKind::Meta
        } else if as_service(doc).is_some() {
            DocumentKind::Service
        } else {
            DocumentKind::Other
        };
        Some(kind)
    }

    // ============================================
    // Meta views
    // ============================================

    /// `GET /` - meta plus every other document
    pub fn index(&self) -> IndexView {
        IndexView {
            meta: self.meta(),
            services: self
                .docs
                .iter()
                .filter(|(key, _)| key.as_str() != META_KEY)
                .map(|(key, doc)| (key.clone(), doc.clone()))
                .collect(),
        }
    }

    /// `GET /meta`
    pub fn meta(&self) -> Value {
        self.docs.get(META_KEY).cloned().unwrap_or_else(empty_object)
    }

    /// `GET /context`
    pub fn context(&self) -> ContextView {
        ContextView {
            llm_context: self.meta_section(META_LLM_CONTEXT),
            workflow: self.meta_section(META_WORKFLOW),
            gateway_usage: self.meta_section(META_GATEWAY_USAGE),
        }
    }

    /// `GET /workflow`
    pub fn workflow(&self) -> Value {
        self.meta_section(META_WORKFLOW)
    }

    fn meta_section(&self, section: &str) -> Value {
        self.docs
            .get(META_KEY)
            .and_then(|meta| meta.get(section))
            .cloned()
            .unwrap_or_else(empty_object)
    }

    // ============================================
    // Service views
    // ============================================

    /// Service documents in key order
    fn service_docs(&self) -> impl Iterator<Item = ServiceDoc<'_>> {
        self.docs.values().filter_map(|doc| {
            let obj = as_service(doc)?;
            Some(ServiceDoc {
                id: render(&obj[FIELD_SERVICE]),
                doc: obj,
            })
        })
    }

    /// `GET /services` - one summary per service id
    pub fn services(&self) -> BTreeMap<String, ServiceSummary> {
        self.service_docs()
            .map(|svc| {
                let summary = ServiceSummary {
                    name: string_field(svc.doc, FIELD_NAME, ""),
                    category: string_field(svc.doc, FIELD_CATEGORY, ""),
                    description: string_field(svc.doc, FIELD_DESCRIPTION, ""),
                    endpoints: endpoints_of(svc.doc)
                        .map(|ep| ep.get(FIELD_PATH).cloned().unwrap_or(Value::Null))
                        .collect(),
                };
                (svc.id, summary)
            })
            .collect()
    }

    /// `GET /services/{id}` - full document of the first matching service
    pub fn service(&self, id: &str) -> AppResult<&Value> {
        self.docs
            .values()
            .find(|doc| doc.get(FIELD_SERVICE).and_then(Value::as_str) == Some(id))
            .ok_or_else(|| AppError::service_not_found(id))
    }

    /// `GET /endpoints` - every endpoint across services
    pub fn endpoints(&self) -> Vec<EndpointEntry> {
        self.service_docs()
            .flat_map(|svc| {
                let ServiceDoc { id, doc } = svc;
                endpoints_of(doc)
                    .map(|ep| EndpointEntry {
                        service: id.clone(),
                        method: lenient_field(ep, FIELD_METHOD, DEFAULT_METHOD),
                        path: lenient_field(ep, FIELD_PATH, ""),
                        description: lenient_field(ep, FIELD_DESCRIPTION, ""),
                    })
                    .collect::<Vec<_>>()
            })
            .collect()
    }

    /// `GET /mcp` - tool names per service and flattened
    pub fn mcp(&self) -> McpView {
        let by_service: BTreeMap<String, Value> = self
            .service_docs()
            .filter_map(|svc| {
                let tools = svc.doc.get(FIELD_MCP_TOOLS)?;
                Some((svc.id, tools.clone()))
            })
            .collect();

        let all = by_service
            .values()
            .flat_map(|tools| match tools {
                Value::Array(items) => items.clone(),
                other => vec![other.clone()],
            })
            .collect();

        McpView {
            prefix: self.mcp_prefix.clone(),
            by_service,
            all,
        }
    }

    /// `GET /examples` - every example tagged with its service id
    pub fn examples(&self) -> Vec<Value> {
        let mut examples = Vec::new();
        for svc in self.service_docs() {
            let Some(Value::Array(items)) = svc.doc.get(FIELD_EXAMPLES) else {
                continue;
            };
            for item in items {
                // Tag a copy; the stored document stays untouched
                if let Value::Object(example) = item {
                    let mut example = example.clone();
                    example.insert(FIELD_SERVICE.to_string(), Value::String(svc.id.clone()));
                    examples.push(Value::Object(example));
                }
            }
        }
        examples
    }

    /// `GET /categories` - service ids grouped by category
    pub fn categories(&self) -> BTreeMap<String, Vec<String>> {
        let mut categories: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for svc in self.service_docs() {
            let category = svc
                .doc
                .get(FIELD_CATEGORY)
                .map(render)
                .unwrap_or_else(|| DEFAULT_CATEGORY.to_string());
            categories.entry(category).or_default().push(svc.id);
        }
        categories
    }

    // ============================================
    // LLM views
    // ============================================

    /// `GET /llm/full` - every document as loaded
    pub fn full(&self) -> &DocumentMap {
        &self.docs
    }

    /// `GET /llm/compact` - `"METHOD path"` lines per service
    pub fn compact(&self) -> BTreeMap<String, Vec<String>> {
        self.service_docs()
            .map(|svc| {
                let lines = endpoints_of(svc.doc)
                    .map(|ep| {
                        let method = ep.get(FIELD_METHOD).map(render);
                        let path = ep.get(FIELD_PATH).map(render);
                        format!(
                            "{} {}",
                            method.as_deref().unwrap_or(DEFAULT_METHOD),
                            path.as_deref().unwrap_or("")
                        )
                    })
                    .collect();
                (svc.id, lines)
            })
            .collect()
    }
}

// ============================================
// Helper Functions
// ============================================

fn empty_object() -> Value {
    Value::Object(Map::new())
}

/// Object documents carrying a `service` field
fn as_service(doc: &Value) -> Option<&Map<String, Value>> {
    doc.as_object().filter(|obj| obj.contains_key(FIELD_SERVICE))
}

/// Strings as-is, everything else as compact JSON
fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn string_field(obj: &Map<String, Value>, name: &str, default: &str) -> Value {
    obj.get(name)
        .cloned()
        .unwrap_or_else(|| Value::String(default.to_string()))
}

/// Like `string_field`, for values that may not be objects at all
fn lenient_field(value: &Value, name: &str, default: &str) -> Value {
    value
        .get(name)
        .cloned()
        .unwrap_or_else(|| Value::String(default.to_string()))
}

/// Entries of the `endpoints` array; anything else counts as none
fn endpoints_of(obj: &Map<String, Value>) -> impl Iterator<Item = &Value> {
    obj.get(FIELD_ENDPOINTS)
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
}
