//! # centralpain HTTP API Module
//!
//! Request/response boundary around the evaluator, built on axum.
//!
//! ## Endpoints
//!
//! - `GET /health` - Health check
//! - `GET /criteria` - List the diagnostic criteria
//! - `POST /evaluate` - Evaluate one criteria set
//!
//! The server keeps no state between requests and stores nothing.
//!
//! ## Security Configuration
//!
//! - `server.cors_origins` / `CENTRALPAIN_CORS_ORIGINS`: allowed origins, or "*" for all (default: localhost only)
//! - `server.rate_limit` / `CENTRALPAIN_RATE_LIMIT`: requests per second (default: 100, 0 to disable)

mod handlers;
mod middleware;
mod types;

pub use handlers::{criteria_handler, evaluate_handler, health_handler};
pub use middleware::{RequestThrottle, request_throttle, throttle_middleware};
pub use types::{
    BundleJson, ChecklistJson, CriteriaResponse, CriterionJson, EvaluateRequest,
    EvaluateResponse, HealthResponse,
};

use crate::config::ServerConfig;
use axum::{
    Router,
    http::{HeaderValue, Method, header},
    middleware as axum_middleware,
    routing::{get, post},
};
use centralpain_core::AssessmentError;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Maximum accepted request body.
const MAX_BODY_BYTES: usize = 64 * 1024;

// =============================================================================
// CORS CONFIGURATION
// =============================================================================

/// Build CORS layer from configuration.
///
/// - `Some(["*"])`: allows all origins
/// - `None`: localhost only
/// - otherwise: the listed origins, falling back to localhost if none parse
fn build_cors_layer(origins: Option<&[String]>) -> CorsLayer {
    match origins {
        Some(list) if list.iter().any(|o| o.trim() == "*") => {
            tracing::warn!("CORS: Allowing ALL origins. This is insecure for production!");
            CorsLayer::permissive()
        }
        Some(list) => {
            let allowed_origins: Vec<HeaderValue> = list
                .iter()
                .filter_map(|s| {
                    let trimmed = s.trim();
                    match trimmed.parse::<HeaderValue>() {
                        Ok(hv) => {
                            tracing::info!("CORS: Allowing origin: {}", trimmed);
                            Some(hv)
                        }
                        Err(e) => {
                            tracing::warn!("CORS: Invalid origin '{}': {}", trimmed, e);
                            None
                        }
                    }
                })
                .collect();

            if allowed_origins.is_empty() {
                tracing::warn!("CORS: No valid origins configured, defaulting to localhost only");
                build_localhost_cors()
            } else {
                CorsLayer::new()
                    .allow_origin(allowed_origins)
                    .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                    .allow_headers([header::CONTENT_TYPE])
            }
        }
        None => build_localhost_cors(),
    }
}

/// Build a restrictive CORS layer that only allows localhost origins.
fn build_localhost_cors() -> CorsLayer {
    let localhost_origins = [
        "http://localhost:3000".parse::<HeaderValue>().ok(),
        "http://localhost:8080".parse::<HeaderValue>().ok(),
        "http://127.0.0.1:3000".parse::<HeaderValue>().ok(),
        "http://127.0.0.1:8080".parse::<HeaderValue>().ok(),
    ];
    let origins: Vec<HeaderValue> = localhost_origins.into_iter().flatten().collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}

// =============================================================================
// ROUTER CREATION
// =============================================================================

/// Create the axum router with all endpoints and middleware.
///
/// Middleware stack (outer to inner):
/// 1. Tracing - logs all requests
/// 2. CORS - handles preflight requests
/// 3. Body limit
/// 4. Rate Limiting - if enabled
pub fn create_router(config: &ServerConfig) -> Router {
    let mut router = Router::new()
        .route("/health", get(handlers::health_handler))
        .route("/criteria", get(handlers::criteria_handler))
        .route("/evaluate", post(handlers::evaluate_handler));

    match request_throttle(config.rate_limit) {
        Some(throttle) => {
            tracing::info!("Rate limiting enabled: {} requests/second", config.rate_limit);
            router = router.layer(axum_middleware::from_fn_with_state(
                throttle,
                middleware::throttle_middleware,
            ));
        }
        None => tracing::info!("Rate limiting disabled"),
    }

    router
        .layer(axum::extract::DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(build_cors_layer(config.cors_origins.as_deref()))
        .layer(TraceLayer::new_for_http())
}

// =============================================================================
// SERVER STARTUP
// =============================================================================

/// Start the HTTP server and run until Ctrl+C.
pub async fn run_server(config: &ServerConfig) -> Result<(), AssessmentError> {
    let addr = config.bind_addr();
    let router = create_router(config);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AssessmentError::IoError(format!("Bind failed: {}", e)))?;

    tracing::info!("centralpain HTTP server listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AssessmentError::IoError(format!("Server error: {}", e)))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
