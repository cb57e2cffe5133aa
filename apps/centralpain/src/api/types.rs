//! # API Request/Response Types
//!
//! This module defines the JSON structures for the HTTP API. The CLI reuses
//! them for `--json-mode` output.

use centralpain_core::{
    AssessmentError, ChecklistItem, Criterion, CriteriaInput, EvaluationResult, Field,
    RecommendationBundle, checklist,
};
use serde::{Deserialize, Serialize};

// =============================================================================
// HEALTH RESPONSE
// =============================================================================

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

// =============================================================================
// CRITERIA RESPONSE
// =============================================================================

/// One diagnostic criterion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CriterionJson {
    pub key: String,
    pub label: String,
    pub description: String,
}

impl From<Criterion> for CriterionJson {
    fn from(criterion: Criterion) -> Self {
        Self {
            key: criterion.key().to_string(),
            label: criterion.label().to_string(),
            description: criterion.description().to_string(),
        }
    }
}

/// List of diagnostic criteria.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CriteriaResponse {
    pub criteria: Vec<CriterionJson>,
}

impl Default for CriteriaResponse {
    fn default() -> Self {
        Self {
            criteria: Criterion::ALL.into_iter().map(CriterionJson::from).collect(),
        }
    }
}

// =============================================================================
// CATALOG RESPONSE
// =============================================================================

/// One recommendation bundle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BundleJson {
    pub key: String,
    pub summary: String,
    pub statements: Vec<String>,
}

impl From<RecommendationBundle> for BundleJson {
    fn from(bundle: RecommendationBundle) -> Self {
        Self {
            key: bundle.key().to_string(),
            summary: bundle.summary().to_string(),
            statements: bundle.statements().iter().map(|s| (*s).to_string()).collect(),
        }
    }
}

// =============================================================================
// EVALUATE REQUEST/RESPONSE
// =============================================================================

/// Evaluation request. Every field is optional; absent or `null` means unset.
///
/// Yes/no fields accept `yes`/`no` (or `affirmed`/`denied`). `block_response`
/// accepts only `limited` or `good`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EvaluateRequest {
    pub documented_injury: Option<String>,
    pub chronic_pain: Option<String>,
    pub hypersensitivity: Option<String>,
    pub mood_cognitive: Option<String>,
    pub block_performed: Option<String>,
    pub block_response: Option<String>,
}

impl EvaluateRequest {
    /// Raw values paired with their field, in form order.
    fn values(&self) -> [(Field, Option<&str>); 6] {
        [
            (Field::DocumentedInjury, self.documented_injury.as_deref()),
            (Field::ChronicPain, self.chronic_pain.as_deref()),
            (Field::Hypersensitivity, self.hypersensitivity.as_deref()),
            (Field::MoodCognitive, self.mood_cognitive.as_deref()),
            (Field::BlockPerformed, self.block_performed.as_deref()),
            (Field::BlockResponse, self.block_response.as_deref()),
        ]
    }

    /// Convert to a `CriteriaInput`, validating every supplied value.
    pub fn to_input(&self) -> Result<CriteriaInput, AssessmentError> {
        self.apply_to(CriteriaInput::new())
    }

    /// Apply the supplied values on top of `input`. Absent fields are kept.
    pub fn apply_to(&self, mut input: CriteriaInput) -> Result<CriteriaInput, AssessmentError> {
        for (field, raw) in self.values() {
            if let Some(raw) = raw {
                input
                    .apply(field, raw)
                    .map_err(|source| AssessmentError::InvalidField {
                        field,
                        source: Box::new(source),
                    })?;
            }
        }
        Ok(input)
    }
}

/// One checklist row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChecklistJson {
    pub key: String,
    pub label: String,
    pub met: bool,
}

impl From<ChecklistItem> for ChecklistJson {
    fn from(item: ChecklistItem) -> Self {
        Self {
            key: item.criterion.key().to_string(),
            label: item.criterion.label().to_string(),
            met: item.met,
        }
    }
}

/// Evaluation response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluateResponse {
    pub success: bool,
    pub diagnosis: String,
    pub title: String,
    #[serde(default)]
    pub recommendations: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub criteria_satisfied: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub criteria_total: Option<u8>,
    #[serde(default)]
    pub missing_fields: Vec<String>,
    #[serde(default)]
    pub checklist: Vec<ChecklistJson>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub error: Option<String>,
}

impl EvaluateResponse {
    pub fn from_evaluation(input: &CriteriaInput, result: &EvaluationResult) -> Self {
        Self {
            success: true,
            diagnosis: result.diagnosis.key().to_string(),
            title: result.diagnosis.title().to_string(),
            recommendations: result
                .recommendations()
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
            criteria_satisfied: result.tally.map(|t| t.satisfied()),
            criteria_total: result.tally.map(|t| t.total()),
            missing_fields: input
                .missing_fields()
                .into_iter()
                .map(|f| f.key().to_string())
                .collect(),
            checklist: checklist(input).into_iter().map(ChecklistJson::from).collect(),
            error: None,
        }
    }

    pub fn error(msg: impl Into<String>) -> Self {
        let unevaluated = EvaluationResult::unevaluated();
        Self {
            success: false,
            diagnosis: unevaluated.diagnosis.key().to_string(),
            title: unevaluated.diagnosis.title().to_string(),
            recommendations: Vec::new(),
            criteria_satisfied: None,
            criteria_total: None,
            missing_fields: Vec::new(),
            checklist: Vec::new(),
            error: Some(msg.into()),
        }
    }
}
