//! Constants Module - Single Source of Truth
//!
//! Default values, well-known document keys and environment variable names
//! used across the gateway. Other modules read them from here.

// ============================================
// APPLICATION CONSTANTS
// ============================================

/// Application name
pub const APP_NAME: &str = "d3bugr-docs";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================
// SERVER DEFAULTS
// ============================================

/// Default listen host (all interfaces)
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default listen port
pub const DEFAULT_PORT: u16 = 8080;

/// Default per-request timeout (seconds)
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 600;

/// Default cap on in-flight requests
pub const DEFAULT_MAX_CONCURRENT_REQUESTS: usize = 512;

/// Default docs directory, relative to the working directory
pub const DEFAULT_DOCS_DIR: &str = "docs";

/// Prefix reported for MCP tool names
pub const DEFAULT_MCP_PREFIX: &str = "mcp__d3bugr__";

// ============================================
// ENVIRONMENT VARIABLES
// ============================================

/// Platform-provided port (takes precedence)
pub const ENV_PORT: &str = "PORT";
pub const ENV_APP_PORT: &str = "D3BUGR_PORT";
pub const ENV_HOST: &str = "D3BUGR_HOST";
pub const ENV_DOCS_DIR: &str = "D3BUGR_DOCS_DIR";
pub const ENV_REQUEST_TIMEOUT_SECS: &str = "D3BUGR_REQUEST_TIMEOUT_SECS";
pub const ENV_MAX_CONCURRENT_REQUESTS: &str = "D3BUGR_MAX_CONCURRENT_REQUESTS";
pub const ENV_MCP_PREFIX: &str = "D3BUGR_MCP_PREFIX";

// ============================================
// DOCUMENT KEYS
// ============================================

/// Extension of files picked up from the docs directory
pub const DOC_FILE_EXTENSION: &str = ".json";

/// Key of the global meta document
pub const META_KEY: &str = "meta";

/// Field marking a document as a service document
pub const FIELD_SERVICE: &str = "service";
pub const FIELD_NAME: &str = "name";
pub const FIELD_CATEGORY: &str = "category";
pub const FIELD_DESCRIPTION: &str = "description";
pub const FIELD_ENDPOINTS: &str = "endpoints";
pub const FIELD_METHOD: &str = "method";
pub const FIELD_PATH: &str = "path";
pub const FIELD_MCP_TOOLS: &str = "mcp_tools";
pub const FIELD_EXAMPLES: &str = "examples";

/// Meta sections exposed through `/context`
pub const META_LLM_CONTEXT: &str = "llm_context";
pub const META_WORKFLOW: &str = "workflow";
pub const META_GATEWAY_USAGE: &str = "gateway_usage";

/// Method assumed when an endpoint omits one
pub const DEFAULT_METHOD: &str = "GET";

/// Category assigned to services without one
pub const DEFAULT_CATEGORY: &str = "other";

/// Returns the document key for a docs file name, or None if the file is not a doc
pub fn doc_key(file_name: &str) -> Option<&str> {
    file_name
        .strip_suffix(DOC_FILE_EXTENSION)
        .filter(|key| !key.is_empty())
}
