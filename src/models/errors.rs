//! Centralized Error Handling Module
//!
//! Every failure carries a unique error code so it can be grepped in logs
//! and returned to API clients unchanged.
//!
//! Error codes follow pattern: CATEGORY_SPECIFIC_ERROR
//! - DOCS_xxx: documentation loading errors
//! - API_xxx: API errors
//! - CFG_xxx: Configuration errors

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use std::fmt;
use std::path::Path;
use tracing::{error, warn};

use super::types::ErrorBody;

/// Application-wide error type
#[derive(Debug)]
pub struct AppError {
    /// Unique error code for logging/monitoring
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Optional underlying error
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new AppError
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Create AppError with source error
    pub fn with_source(
        code: ErrorCode,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Get error code as string (for logging)
    pub fn code_str(&self) -> &'static str {
        self.code.as_str()
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code.as_str(), self.message)
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source.as_ref().map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Unique error codes for monitoring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // ============================================
    // Documentation Errors (1xx)
    // ============================================
    /// Docs directory missing or unreadable
    DocsDirUnreadable,
    /// A docs file could not be read
    DocsReadFailed,
    /// A docs file is not valid JSON
    DocsParseFailed,

    // ============================================
    // API Errors (3xx)
    // ============================================
    /// Route not found
    ApiNotFound,
    /// Requested service has no document
    ApiServiceNotFound,
    /// Route exists but not for this method
    ApiMethodNotAllowed,
    /// Request exceeded the configured timeout
    ApiRequestTimeout,
    /// Any other rejected request
    ApiBadRequest,
    /// Internal server error
    ApiInternalError,

    // ============================================
    // Configuration Errors (4xx)
    // ============================================
    /// Invalid configuration value
    ConfigInvalidValue,
}

impl ErrorCode {
    /// Get string representation of error code
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DocsDirUnreadable => "DOCS_DIR_UNREADABLE",
            Self::DocsReadFailed => "DOCS_READ_FAILED",
            Self::DocsParseFailed => "DOCS_PARSE_FAILED",

            Self::ApiNotFound => "API_NOT_FOUND",
            Self::ApiServiceNotFound => "API_SERVICE_NOT_FOUND",
            Self::ApiMethodNotAllowed => "API_METHOD_NOT_ALLOWED",
            Self::ApiRequestTimeout => "API_REQUEST_TIMEOUT",
            Self::ApiBadRequest => "API_BAD_REQUEST",
            Self::ApiInternalError => "API_INTERNAL_ERROR",

            Self::ConfigInvalidValue => "CFG_INVALID_VALUE",
        }
    }

    /// Get HTTP status code for API responses
    pub fn http_status(&self) -> u16 {
        match self {
            Self::ConfigInvalidValue | Self::ApiBadRequest => 400,
            Self::ApiNotFound | Self::ApiServiceNotFound => 404,
            Self::ApiMethodNotAllowed => 405,
            Self::ApiRequestTimeout => 408,
            _ => 500,
        }
    }

    /// Code for an error status produced outside the handlers
    pub fn from_status(status: StatusCode) -> Self {
        match status {
            StatusCode::NOT_FOUND => Self::ApiNotFound,
            StatusCode::METHOD_NOT_ALLOWED => Self::ApiMethodNotAllowed,
            StatusCode::REQUEST_TIMEOUT => Self::ApiRequestTimeout,
            s if s.is_client_error() => Self::ApiBadRequest,
            _ => Self::ApiInternalError,
        }
    }

    /// Client errors are expected traffic; server errors need attention
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.http_status())
    }
}

// ============================================
// Convenience constructors
// ============================================

impl AppError {
    /// Docs directory missing or unreadable
    pub fn docs_dir_unreadable(dir: &Path, source: std::io::Error) -> Self {
        Self::with_source(
            ErrorCode::DocsDirUnreadable,
            format!("Cannot read docs directory {}", dir.display()),
            source,
        )
    }

    /// Docs file could not be read
    pub fn docs_read_failed(file: &Path, source: std::io::Error) -> Self {
        Self::with_source(
            ErrorCode::DocsReadFailed,
            format!("Cannot read {}", file.display()),
            source,
        )
    }

    /// Docs file is not valid JSON
    pub fn docs_parse_failed(file: &Path, source: serde_json::Error) -> Self {
        Self::with_source(
            ErrorCode::DocsParseFailed,
            format!("Invalid JSON in {}: {}", file.display(), source),
            source,
        )
    }

    /// Unknown route
    pub fn not_found(path: &str) -> Self {
        Self::new(ErrorCode::ApiNotFound, format!("{} not found", path))
    }

    /// No document for the requested service
    pub fn service_not_found(service: &str) -> Self {
        Self::new(ErrorCode::ApiServiceNotFound, format!("{} not found", service))
    }

    /// Invalid configuration value
    pub fn invalid_config(name: &str, value: &str, reason: impl fmt::Display) -> Self {
        Self::new(
            ErrorCode::ConfigInvalidValue,
            format!("Invalid value {:?} for {}: {}", value, name, reason),
        )
    }
}

// ============================================
// Result type alias
// ============================================

/// Application Result type
pub type AppResult<T> = Result<T, AppError>;

// ============================================
// HTTP response
// ============================================

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.code.http_status())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if self.code.is_client_error() {
            warn!(code = self.code_str(), "{}", self.message);
        } else {
            error!(code = self.code_str(), error = ?self.source, "{}", self.message);
        }

        let body = ErrorBody {
            error: self.message,
            code: Some(self.code.as_str().to_string()),
        };
        (status, Json(body)).into_response()
    }
}
