//! Router-level tests for the documentation API

use axum::{
    body::{to_bytes, Body},
    http::{header, HeaderMap, Method, Request, StatusCode},
    routing::get,
    Router,
};
use d3bugr_docs::api::apply_middleware;
use d3bugr_docs::{create_router, AppState, DocCatalog, ServerConfig};
use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use tower::ServiceExt;

fn shipped_docs() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("docs")
}

fn app_for(dir: &Path) -> Router {
    let config = ServerConfig {
        docs_dir: dir.to_path_buf(),
        ..ServerConfig::default()
    };
    let catalog = DocCatalog::load(&config.docs_dir, config.mcp_prefix.clone()).unwrap();
    create_router(Arc::new(AppState::new(catalog, config)))
}

async fn send(app: Router, method: Method, uri: &str) -> (StatusCode, Vec<u8>, HeaderMap) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send_request(app, request).await
}

async fn send_request(app: Router, request: Request<Body>) -> (StatusCode, Vec<u8>, HeaderMap) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, body.to_vec(), headers)
}

async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let (status, body, _) = send(app, Method::GET, uri).await;
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn test_health_is_plain_ok() {
    let (status, body, headers) = send(app_for(&shipped_docs()), Method::GET, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"ok");
    assert!(headers[header::CONTENT_TYPE]
        .to_str()
        .unwrap()
        .starts_with("text/plain"));
}

#[tokio::test]
async fn test_index_splits_meta_and_services() {
    let (status, body) = get_json(app_for(&shipped_docs()), "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["meta"]["name"], "d3bugr");

    let services = body["services"].as_object().unwrap();
    assert!(services.contains_key("nuclei"));
    assert!(services.contains_key("subfinder"));
    assert!(!services.contains_key("meta"));
}

#[tokio::test]
async fn test_context_and_workflow() {
    let app = app_for(&shipped_docs());

    let (_, context) = get_json(app.clone(), "/context").await;
    assert!(context["llm_context"]["what"].is_string());
    assert_eq!(context["workflow"]["phases"][0]["name"], "recon");
    assert_eq!(context["gateway_usage"]["base_url"], "http://gateway:8080");

    let (_, workflow) = get_json(app, "/workflow").await;
    assert_eq!(workflow, context["workflow"]);
}

#[tokio::test]
async fn test_services_listing() {
    let (status, body) = get_json(app_for(&shipped_docs()), "/services").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["subfinder"],
        json!({
            "name": "Subfinder",
            "category": "recon",
            "description": "Passive subdomain enumeration",
            "endpoints": ["/subfinder/enumerate"]
        })
    );
    assert_eq!(body["nuclei"]["endpoints"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_service_detail_and_not_found() {
    let app = app_for(&shipped_docs());

    let (status, body) = get_json(app.clone(), "/services/nuclei").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Nuclei");
    assert_eq!(body["mcp_tools"][0], "nuclei_scan");

    let (status, body) = get_json(app, "/services/amass").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "amass not found");
    assert_eq!(body["code"], "API_SERVICE_NOT_FOUND");
}

#[tokio::test]
async fn test_endpoints_and_compact() {
    let app = app_for(&shipped_docs());

    let (_, endpoints) = get_json(app.clone(), "/endpoints").await;
    let endpoints = endpoints.as_array().unwrap();
    assert_eq!(endpoints.len(), 4);
    assert_eq!(
        endpoints[0],
        json!({
            "service": "nuclei",
            "method": "POST",
            "path": "/nuclei/scan",
            "description": "Scan targets with selected templates"
        })
    );

    let (_, compact) = get_json(app, "/llm/compact").await;
    assert_eq!(compact["subfinder"], json!(["POST /subfinder/enumerate"]));
}

#[tokio::test]
async fn test_mcp_and_categories() {
    let app = app_for(&shipped_docs());

    let (_, mcp) = get_json(app.clone(), "/mcp").await;
    assert_eq!(mcp["prefix"], "mcp__d3bugr__");
    assert_eq!(mcp["by_service"]["subfinder"], json!(["subfinder_enumerate"]));
    assert_eq!(mcp["all"].as_array().unwrap().len(), 4);

    let (_, categories) = get_json(app, "/categories").await;
    assert_eq!(
        categories,
        json!({"recon": ["subfinder"], "scanning": ["nuclei"]})
    );
}

#[tokio::test]
async fn test_examples_do_not_leak_into_full_docs() {
    let app = app_for(&shipped_docs());

    let (_, examples) = get_json(app.clone(), "/examples").await;
    let examples = examples.as_array().unwrap();
    assert_eq!(examples.len(), 2);
    assert_eq!(examples[0]["service"], "nuclei");

    let (_, full) = get_json(app, "/llm/full").await;
    assert!(full["nuclei"]["examples"][0].get("service").is_none());
}

#[tokio::test]
async fn test_full_matches_files_on_disk() {
    let dir = shipped_docs();
    let (_, full) = get_json(app_for(&dir), "/llm/full").await;

    let raw = fs::read_to_string(dir.join("subfinder.json")).unwrap();
    let on_disk: Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(full["subfinder"], on_disk);
    assert_eq!(full.as_object().unwrap().len(), 3);
}

#[tokio::test]
async fn test_empty_docs_dir_serves_empty_views() {
    let dir = TempDir::new().unwrap();
    let app = app_for(dir.path());

    let (_, index) = get_json(app.clone(), "/").await;
    assert_eq!(index, json!({"meta": {}, "services": {}}));

    let (_, services) = get_json(app.clone(), "/services").await;
    assert_eq!(services, json!({}));

    let (_, mcp) = get_json(app, "/mcp").await;
    assert_eq!(mcp, json!({"prefix": "mcp__d3bugr__", "by_service": {}, "all": []}));
}

#[tokio::test]
async fn test_unknown_route_is_json_404() {
    let (status, body) = get_json(app_for(&shipped_docs()), "/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "/nope not found");
    assert_eq!(body["code"], "API_NOT_FOUND");
}

#[tokio::test]
async fn test_wrong_method_is_rejected() {
    let (status, body, headers) = send(app_for(&shipped_docs()), Method::POST, "/services").await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert!(headers[header::CONTENT_TYPE]
        .to_str()
        .unwrap()
        .starts_with("application/json"));
    assert!(headers.contains_key(header::ALLOW));

    let body: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["error"], "Method Not Allowed");
    assert_eq!(body["code"], "API_METHOD_NOT_ALLOWED");
}

#[tokio::test]
async fn test_head_is_answered() {
    let (status, body, _) = send(app_for(&shipped_docs()), Method::HEAD, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.is_empty());
}

#[tokio::test]
async fn test_cors_allows_any_origin() {
    let app = app_for(&shipped_docs());

    let preflight = Request::builder()
        .method(Method::OPTIONS)
        .uri("/services")
        .header(header::ORIGIN, "https://agent.example")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
        .body(Body::empty())
        .unwrap();
    let (status, _, headers) = send_request(app.clone(), preflight).await;
    assert!(status.is_success());
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");

    let simple = Request::builder()
        .uri("/health")
        .header(header::ORIGIN, "https://agent.example")
        .body(Body::empty())
        .unwrap();
    let (status, _, headers) = send_request(app, simple).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
}

fn slow_app(config: &ServerConfig) -> Router {
    let routes = Router::new()
        .route(
            "/slow",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                "late"
            }),
        )
        .route(
            // Blocks its worker thread so the timeout cannot fire for it
            "/blocking",
            get(|| async {
                std::thread::sleep(Duration::from_millis(600));
                "done"
            }),
        )
        .route("/fast", get(|| async { "fast" }));
    apply_middleware(routes, config)
}

#[tokio::test]
async fn test_slow_request_times_out_with_json_body() {
    let config = ServerConfig {
        request_timeout: Duration::from_millis(50),
        ..ServerConfig::default()
    };
    let (status, body, _) = send(slow_app(&config), Method::GET, "/slow").await;
    assert_eq!(status, StatusCode::REQUEST_TIMEOUT);

    let body: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["error"], "Request Timeout");
    assert_eq!(body["code"], "API_REQUEST_TIMEOUT");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_waiting_for_a_permit_counts_against_timeout() {
    let config = ServerConfig {
        request_timeout: Duration::from_millis(100),
        max_concurrent_requests: 1,
        ..ServerConfig::default()
    };
    let app = slow_app(&config);

    // Hold the only permit
    let holder = tokio::spawn(send(app.clone(), Method::GET, "/blocking"));
    tokio::time::sleep(Duration::from_millis(50)).await;

    let (status, _, _) = send(app, Method::GET, "/fast").await;
    assert_eq!(status, StatusCode::REQUEST_TIMEOUT);

    holder.await.unwrap();
}

#[tokio::test]
async fn test_request_id_is_generated_and_echoed() {
    let app = app_for(&shipped_docs());

    let (_, _, headers) = send(app.clone(), Method::GET, "/health").await;
    let generated = headers["x-request-id"].to_str().unwrap();
    assert_eq!(generated.len(), 36);

    let request = Request::builder()
        .uri("/health")
        .header("x-request-id", "trace-123")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.headers()["x-request-id"], "trace-123");
}

#[tokio::test]
async fn test_custom_mcp_prefix() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("tool.json"),
        r#"{"service": "tool", "mcp_tools": ["a", "b"]}"#,
    )
    .unwrap();

    let config = ServerConfig {
        docs_dir: dir.path().to_path_buf(),
        mcp_prefix: "mcp__custom__".to_string(),
        ..ServerConfig::default()
    };
    let catalog = DocCatalog::load(&config.docs_dir, config.mcp_prefix.clone()).unwrap();
    let app = create_router(Arc::new(AppState::new(catalog, config)));

    let (_, mcp) = get_json(app, "/mcp").await;
    assert_eq!(mcp["prefix"], "mcp__custom__");
    assert_eq!(mcp["all"], json!(["a", "b"]));
}
