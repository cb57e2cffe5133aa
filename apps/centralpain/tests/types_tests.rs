//! Unit tests for API types serialization/deserialization.

// Allow unwrap and panic in tests - these are standard for test code
#![allow(clippy::unwrap_used, clippy::panic)]

use centralpain::api::{
    BundleJson, CriteriaResponse, EvaluateRequest, EvaluateResponse, HealthResponse,
};
use centralpain_core::{
    Answer, AssessmentError, BlockResponse, CriteriaInput, Field, RecommendationBundle, evaluate,
};

// =============================================================================
// HEALTH RESPONSE TESTS
// =============================================================================

#[test]
fn test_health_response_default() {
    let health = HealthResponse::default();
    assert_eq!(health.status, "ok");
    assert!(!health.version.is_empty());
}

#[test]
fn test_health_response_serialization() {
    let health = HealthResponse {
        status: "ok".to_string(),
        version: "0.3.1".to_string(),
    };

    let json = serde_json::to_string(&health).unwrap();
    assert!(json.contains("\"status\":\"ok\""));
    assert!(json.contains("\"version\":\"0.3.1\""));
}

// =============================================================================
// EVALUATE REQUEST TESTS
// =============================================================================

#[test]
fn test_evaluate_request_deserialization() {
    let json = r#"{"documented_injury":"yes","block_performed":"yes","block_response":"limited"}"#;
    let request: EvaluateRequest = serde_json::from_str(json).unwrap();

    assert_eq!(request.documented_injury.as_deref(), Some("yes"));
    assert_eq!(request.chronic_pain, None);

    let input = request.to_input().unwrap();
    assert_eq!(input.documented_injury, Some(Answer::Yes));
    assert_eq!(input.block_response, Some(BlockResponse::Limited));
}

#[test]
fn test_evaluate_request_empty_string_is_unset() {
    let request = EvaluateRequest {
        hypersensitivity: Some(String::new()),
        ..EvaluateRequest::default()
    };
    assert_eq!(request.to_input().unwrap(), CriteriaInput::new());
}

#[test]
fn test_evaluate_request_invalid_value_names_field() {
    let request = EvaluateRequest {
        mood_cognitive: Some("sometimes".to_string()),
        ..EvaluateRequest::default()
    };

    match request.to_input() {
        Err(AssessmentError::InvalidField { field, source }) => {
            assert_eq!(field, Field::MoodCognitive);
            assert!(matches!(*source, AssessmentError::InvalidAnswer(_)));
        }
        other => panic!("unexpected: {:?}", other),
    }
}

#[test]
fn test_evaluate_request_keeps_block_response_error_kind() {
    let ambiguous = EvaluateRequest {
        block_response: Some("yes".to_string()),
        ..EvaluateRequest::default()
    };
    let unknown = EvaluateRequest {
        block_response: Some("partial".to_string()),
        ..EvaluateRequest::default()
    };

    match ambiguous.to_input() {
        Err(AssessmentError::InvalidField { field, source }) => {
            assert_eq!(field, Field::BlockResponse);
            assert!(matches!(*source, AssessmentError::AmbiguousBlockResponse(_)));
        }
        other => panic!("unexpected: {:?}", other),
    }
    match unknown.to_input() {
        Err(e @ AssessmentError::InvalidField { .. }) => {
            assert!(e.to_string().starts_with("block_response: Invalid block response"));
        }
        other => panic!("unexpected: {:?}", other),
    }
}

#[test]
fn test_evaluate_request_rejects_unknown_fields() {
    let json = r#"{"block_limited_response":"no"}"#;
    assert!(serde_json::from_str::<EvaluateRequest>(json).is_err());
}

#[test]
fn test_apply_to_keeps_absent_fields() {
    let base = CriteriaInput::new().with_chronic_pain(Answer::Yes);
    let request = EvaluateRequest {
        chronic_pain: None,
        documented_injury: Some("no".to_string()),
        ..EvaluateRequest::default()
    };

    let input = request.apply_to(base).unwrap();
    assert_eq!(input.chronic_pain, Some(Answer::Yes));
    assert_eq!(input.documented_injury, Some(Answer::No));
}

// =============================================================================
// EVALUATE RESPONSE TESTS
// =============================================================================

#[test]
fn test_evaluate_response_from_unevaluated() {
    let input = CriteriaInput::new();
    let response = EvaluateResponse::from_evaluation(&input, &evaluate(&input));

    let json = serde_json::to_string(&response).unwrap();
    assert!(json.contains("\"diagnosis\":\"unevaluated\""));
    assert!(!json.contains("criteria_total"));
    assert!(!json.contains("\"error\""));
}

#[test]
fn test_evaluate_response_from_not_met() {
    let input = CriteriaInput::new()
        .with_documented_injury(Answer::Yes)
        .with_chronic_pain(Answer::Yes)
        .with_hypersensitivity(Answer::Yes)
        .with_mood_cognitive(Answer::No)
        .with_block_performed(Answer::No);
    let response = EvaluateResponse::from_evaluation(&input, &evaluate(&input));

    assert_eq!(response.diagnosis, "criteria_not_met");
    assert_eq!(response.title, "Criteria Not Met for Centralized Pain");
    assert_eq!(
        response.recommendations,
        RecommendationBundle::MoodCognitiveAbsent
            .statements()
            .iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>()
    );
    assert_eq!(response.criteria_satisfied, Some(3));
    assert!(!response.checklist[3].met);
}

#[test]
fn test_evaluate_response_error() {
    let response = EvaluateResponse::error("bad input");
    assert!(!response.success);
    assert_eq!(response.error.as_deref(), Some("bad input"));

    let json = serde_json::to_string(&response).unwrap();
    let roundtrip: EvaluateResponse = serde_json::from_str(&json).unwrap();
    assert_eq!(roundtrip.diagnosis, "unevaluated");
}

// =============================================================================
// REFERENCE DATA TESTS
// =============================================================================

#[test]
fn test_criteria_response_default() {
    let response = CriteriaResponse::default();
    assert_eq!(response.criteria.len(), 5);
    assert!(response.criteria.iter().all(|c| !c.description.is_empty()));
}

#[test]
fn test_bundle_json_from_bundle() {
    let bundle = BundleJson::from(RecommendationBundle::PeripheralDominant);
    assert_eq!(bundle.key, "peripheral_dominant");
    assert_eq!(bundle.statements.len(), 5);
}
