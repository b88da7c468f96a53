//! API Middleware (Request ID, Logging, Error Bodies)

use axum::{
    extract::Request,
    http::{header, HeaderName, HeaderValue},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use std::time::Instant;
use tracing::{info, warn};
use uuid::Uuid;

use crate::models::{ErrorBody, ErrorCode};

/// Header carrying the per-request id
pub static REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// Request logging middleware
///
/// Reuses an incoming `x-request-id`, otherwise generates one, and echoes
/// it on the response.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let uri = request.uri().clone();

    let request_id = request
        .headers()
        .get(&REQUEST_ID_HEADER)
        .cloned()
        .unwrap_or_else(new_request_id);

    let mut response = next.run(request).await;

    let latency = start.elapsed();
    let status = response.status();
    let id = request_id.to_str().unwrap_or("-").to_string();

    if status.is_server_error() {
        warn!(
            request_id = %id,
            method = %method,
            uri = %uri,
            status = %status.as_u16(),
            latency_ms = %latency.as_millis(),
            "Request failed"
        );
    } else {
        info!(
            request_id = %id,
            method = %method,
            uri = %uri,
            status = %status.as_u16(),
            latency_ms = %latency.as_millis(),
            "Request completed"
        );
    }

    response
        .headers_mut()
        .insert(REQUEST_ID_HEADER.clone(), request_id);
    response
}

/// Error body middleware
///
/// Error responses built by the framework (405 from method routing, 408
/// from the timeout layer) have no body. Give them the same JSON shape
/// handler errors use. Responses that already carry a content type pass
/// through untouched.
pub async fn error_body_middleware(request: Request, next: Next) -> Response {
    let response = next.run(request).await;
    let status = response.status();

    if !(status.is_client_error() || status.is_server_error())
        || response.headers().contains_key(header::CONTENT_TYPE)
    {
        return response;
    }

    let code = ErrorCode::from_status(status);
    let body = ErrorBody {
        error: status
            .canonical_reason()
            .unwrap_or("Request failed")
            .to_string(),
        code: Some(code.as_str().to_string()),
    };

    // Keep status and headers such as `allow`, swap the body
    let (mut parts, _) = response.into_parts();
    let (json_parts, json_body) = Json(body).into_response().into_parts();
    parts.headers.remove(header::CONTENT_LENGTH);
    parts.headers.extend(json_parts.headers);
    Response::from_parts(parts, json_body)
}

fn new_request_id() -> HeaderValue {
    // A hyphenated UUID is always a valid header value
    HeaderValue::from_str(&Uuid::new_v4().to_string())
        .unwrap_or_else(|_| HeaderValue::from_static("unknown"))
}
