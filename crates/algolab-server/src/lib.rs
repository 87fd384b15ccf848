//! HTTP surface for the algolab execution core
//!
//! This crate hosts the execution core as a network service. The design
//! keeps the boundary thin: handlers never need exception handling around
//! the core call, because every script failure mode arrives as a
//! `success: false` result that is still a well-formed 200 response. Only
//! malformed requests are client errors, and only server plumbing faults
//! are 5xx. The benchmark endpoint is a sibling collaborator that answers
//! from a synthetic cost model without touching the sandbox.

pub mod bench;
pub mod error;

pub use error::{Result, ServerError};

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{DefaultBodyLimit, Json as AxumJson, State};
use axum::http::StatusCode;
use axum::response::Json;
use axum::routing::{get, post};
use axum::{middleware, Router};
use serde::Serialize;
use serde_json::json;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use algolab_core::{ExecutionRequest, ExecutionResult, Runner};

use crate::bench::BenchmarkRequest;

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub version: String,
}

/// Configuration for the playground server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Server bind address
    pub bind_addr: SocketAddr,
    /// Enable CORS
    pub enable_cors: bool,
    /// CORS allowed origins (if None, allows any origin)
    pub cors_origins: Option<Vec<String>>,
    /// Maximum request body size in bytes
    pub max_body_size: usize,
    /// Enable request logging
    pub enable_logging: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:3001".parse().unwrap(),
            enable_cors: true,
            cors_origins: None, // Allow any origin
            max_body_size: 256 * 1024, // generous for short scripts
            enable_logging: true,
        }
    }
}

impl ServerConfig {
    /// Create a new server configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the bind address.
    pub fn with_bind_addr(mut self, addr: SocketAddr) -> Self {
        self.bind_addr = addr;
        self
    }

    /// Parse and set the bind address from a string.
    pub fn with_bind_addr_str(mut self, addr: &str) -> Result<Self> {
        self.bind_addr = addr
            .parse()
            .map_err(|e| ServerError::config_error(format!("Invalid bind address: {}", e)))?;
        Ok(self)
    }

    /// Enable or disable CORS.
    pub fn with_cors(mut self, enable: bool) -> Self {
        self.enable_cors = enable;
        self
    }

    /// Set allowed CORS origins.
    pub fn with_cors_origins(mut self, origins: Vec<String>) -> Self {
        self.cors_origins = Some(origins);
        self
    }

    /// Set maximum request body size.
    pub fn with_max_body_size(mut self, size: usize) -> Self {
        self.max_body_size = size;
        self
    }

    /// Enable or disable request logging.
    pub fn with_logging(mut self, enable: bool) -> Self {
        self.enable_logging = enable;
        self
    }
}

/// Shared application state containing the runner and configuration.
#[derive(Clone)]
pub struct AppState {
    pub runner: Arc<Runner>,
    pub config: ServerConfig,
}

/// Handler for the /api/execute POST endpoint.
async fn execute_handler(
    State(app_state): State<AppState>,
    AxumJson(request): AxumJson<ExecutionRequest>,
) -> std::result::Result<Json<ExecutionResult>, (StatusCode, Json<serde_json::Value>)> {
    log::info!(
        "Received execute request: {} bytes of {}, algo id {:?}",
        request.code.len(),
        request.language.as_str(),
        request.algo_id
    );

    if request.code.trim().is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "Submitted script is empty",
                "timestamp": chrono::Utc::now()
            })),
        ));
    }

    // Script failures come back as success=false results, never as errors.
    // Oversized payloads never reach here; the body limit rejects them.
    let result = app_state.runner.run(request).await;
    Ok(Json(result))
}

/// Handler for the /api/benchmark POST endpoint.
async fn benchmark_handler(
    State(_app_state): State<AppState>,
    AxumJson(request): AxumJson<BenchmarkRequest>,
) -> Json<bench::BenchmarkResponse> {
    log::info!(
        "Received benchmark request for {} ({})",
        request.algo_id,
        request.language.as_str()
    );
    Json(bench::sample(&request.algo_id, request.language))
}

/// The playground HTTP server.
pub struct PlaygroundServer {
    runner: Arc<Runner>,
    config: ServerConfig,
}

impl PlaygroundServer {
    /// Create a new server around the given runner with default configuration.
    pub fn new(runner: Runner) -> Self {
        Self::with_config(runner, ServerConfig::default())
    }

    /// Create a new server with custom configuration.
    pub fn with_config(runner: Runner, config: ServerConfig) -> Self {
        Self {
            runner: Arc::new(runner),
            config,
        }
    }

    /// Get the server configuration.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Build the Axum router with all routes and middleware.
    pub fn build_router(&self) -> Router {
        let state = AppState {
            runner: self.runner.clone(),
            config: self.config.clone(),
        };

        let mut router = Router::new()
            .route(
                "/health",
                get(|| async {
                    Json(HealthResponse {
                        status: "healthy".to_string(),
                        timestamp: chrono::Utc::now(),
                        version: env!("CARGO_PKG_VERSION").to_string(),
                    })
                }),
            )
            .route("/api/execute", post(execute_handler))
            .route("/api/benchmark", post(benchmark_handler))
            .layer(DefaultBodyLimit::max(self.config.max_body_size))
            .with_state(state);

        if self.config.enable_logging {
            router = router.layer(middleware::from_fn(
                |request: axum::http::Request<axum::body::Body>,
                 next: axum::middleware::Next| async {
                    let request_id = uuid::Uuid::new_v4().to_string();
                    let method = request.method().clone();
                    let uri = request.uri().clone();
                    log::info!("Request {} {} {}", request_id, method, uri);

                    let start = std::time::Instant::now();
                    let response = next.run(request).await;
                    let duration = start.elapsed();

                    log::info!("Response {} completed in {:?}", request_id, duration);
                    response
                },
            ));
        }

        router = router.layer(TraceLayer::new_for_http());

        if self.config.enable_cors {
            let cors_layer = if let Some(ref origins) = self.config.cors_origins {
                let origins: std::result::Result<Vec<_>, _> =
                    origins.iter().map(|s| s.parse()).collect();
                match origins {
                    Ok(origins) => CorsLayer::new()
                        .allow_origin(origins)
                        .allow_methods(Any)
                        .allow_headers(Any),
                    Err(_) => CorsLayer::permissive(),
                }
            } else {
                CorsLayer::permissive()
            };
            router = router.layer(cors_layer);
        }

        router
    }

    /// Start the server and listen for connections.
    ///
    /// This method will block until the server is shut down.
    pub async fn serve(self) -> Result<()> {
        let router = self.build_router();
        let listener = TcpListener::bind(self.config.bind_addr)
            .await
            .map_err(|e| {
                ServerError::config_error(format!(
                    "Failed to bind to {}: {}",
                    self.config.bind_addr, e
                ))
            })?;

        log::info!("playground server starting on {}", self.config.bind_addr);
        log::info!("Health check: http://{}/health", self.config.bind_addr);
        log::info!("Execute endpoint: http://{}/api/execute", self.config.bind_addr);
        log::info!(
            "Benchmark endpoint: http://{}/api/benchmark",
            self.config.bind_addr
        );

        axum::serve(listener, router)
            .await
            .map_err(|e| ServerError::internal(format!("Server error: {}", e)))?;

        Ok(())
    }

    /// Start the server with graceful shutdown support.
    ///
    /// The server will shut down when the provided shutdown signal is received.
    pub async fn serve_with_shutdown<F>(self, shutdown_signal: F) -> Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let router = self.build_router();
        let listener = TcpListener::bind(self.config.bind_addr)
            .await
            .map_err(|e| {
                ServerError::config_error(format!(
                    "Failed to bind to {}: {}",
                    self.config.bind_addr, e
                ))
            })?;

        log::info!(
            "playground server starting on {} with graceful shutdown",
            self.config.bind_addr
        );

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal)
            .await
            .map_err(|e| ServerError::internal(format!("Server error: {}", e)))?;

        log::info!("playground server shut down gracefully");
        Ok(())
    }
}

/// Utility function to create a shutdown signal from Ctrl+C.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            log::info!("Received Ctrl+C, shutting down...");
        },
        _ = terminate => {
            log::info!("Received SIGTERM, shutting down...");
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use tower::ServiceExt; // for `oneshot`

    fn test_router() -> Router {
        PlaygroundServer::new(Runner::new()).build_router()
    }

    fn json_post(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), 1024 * 1024).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn health_endpoint_reports_healthy() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "healthy");
    }

    #[tokio::test]
    async fn execute_returns_the_wire_shape_for_a_clean_run() {
        let response = test_router()
            .oneshot(json_post(
                "/api/execute",
                r#"{"code":"console.log('hi')","language":"javascript"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["stdout"], "hi");
        assert_eq!(body["stderr"], "");
        assert_eq!(body["trace"], serde_json::json!([]));
        assert!(body["durationMs"].is_number());
        assert!(body.get("errorKind").is_none());
    }

    #[tokio::test]
    async fn execute_attaches_the_trace_for_a_known_algorithm() {
        let response = test_router()
            .oneshot(json_post(
                "/api/execute",
                r#"{"code":"console.log('sorting')","language":"javascript","algoId":"bubble-sort"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        let trace = body["trace"].as_array().unwrap();
        assert_eq!(trace.len(), 19);
        assert_eq!(trace[0]["step"], 1);
        assert_eq!(
            trace.last().unwrap()["arraySnapshot"],
            serde_json::json!([1, 2, 4, 5, 8])
        );
    }

    #[tokio::test]
    async fn script_failures_are_still_http_200() {
        let response = test_router()
            .oneshot(json_post(
                "/api/execute",
                r#"{"code":"throw new Error('boom')","language":"javascript"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["errorKind"], "script");
        assert!(body["stderr"].as_str().unwrap().contains("boom"));
    }

    #[tokio::test]
    async fn python_submissions_report_unsupported() {
        let response = test_router()
            .oneshot(json_post(
                "/api/execute",
                r#"{"code":"print('hi')","language":"python"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["errorKind"], "unsupported");
    }

    #[tokio::test]
    async fn malformed_requests_are_client_errors() {
        let response = test_router()
            .oneshot(json_post("/api/execute", r#"{"language":"javascript"}"#))
            .await
            .unwrap();

        assert!(response.status().is_client_error());
    }

    #[tokio::test]
    async fn empty_scripts_are_rejected() {
        let response = test_router()
            .oneshot(json_post(
                "/api/execute",
                r#"{"code":"   ","language":"javascript"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn oversized_scripts_are_rejected_before_execution() {
        let config = ServerConfig::default().with_max_body_size(64);
        let router = PlaygroundServer::with_config(Runner::new(), config).build_router();

        let code = "console.log(1);".repeat(100);
        let body = serde_json::json!({ "code": code, "language": "javascript" }).to_string();
        let response = router.oneshot(json_post("/api/execute", &body)).await.unwrap();

        assert!(response.status().is_client_error());
    }

    #[tokio::test]
    async fn benchmark_returns_points_for_every_sample_size() {
        let response = test_router()
            .oneshot(json_post(
                "/api/benchmark",
                r#"{"algoId":"bubble-sort","language":"javascript"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["algoId"], "bubble-sort");
        let points = body["points"].as_array().unwrap();
        assert_eq!(points.len(), bench::SAMPLE_SIZES.len());

        let durations: Vec<f64> = points
            .iter()
            .map(|point| point["durationMs"].as_f64().unwrap())
            .collect();
        assert!(durations.windows(2).all(|pair| pair[1] >= pair[0]));
    }
}
