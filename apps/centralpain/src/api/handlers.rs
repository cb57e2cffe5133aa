//! # API Endpoint Handlers
//!
//! This module implements the actual HTTP endpoint handlers. Every handler is
//! stateless: nothing survives a request.

use super::types::{CriteriaResponse, EvaluateRequest, EvaluateResponse, HealthResponse};
use axum::{Json, http::StatusCode, response::IntoResponse};
use centralpain_core::evaluate;

// =============================================================================
// HEALTH HANDLER
// =============================================================================

/// Health check endpoint.
pub async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse::default())
}

// =============================================================================
// CRITERIA HANDLER
// =============================================================================

/// List the diagnostic criteria.
pub async fn criteria_handler() -> impl IntoResponse {
    (StatusCode::OK, Json(CriteriaResponse::default()))
}

// =============================================================================
// EVALUATE HANDLER
// =============================================================================

/// Evaluate one criteria set.
///
/// Incomplete input is a normal `unevaluated` result, not an error. Only
/// values that cannot be parsed are rejected.
pub async fn evaluate_handler(Json(request): Json<EvaluateRequest>) -> impl IntoResponse {
    let input = match request.to_input() {
        Ok(input) => input,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(EvaluateResponse::error(format!("Invalid criteria: {}", e))),
            );
        }
    };

    if !input.is_consistent() {
        tracing::warn!("block_response supplied without a performed block; ignoring it");
    }

    let result = evaluate(&input);
    tracing::debug!(
        diagnosis = result.diagnosis.key(),
        missing = input.missing_fields().len(),
        "Evaluated criteria"
    );

    (
        StatusCode::OK,
        Json(EvaluateResponse::from_evaluation(&input, &result)),
    )
}
