//! # Criteria Evaluator
//!
//! Pure mapping from a [`CriteriaInput`] to an [`EvaluationResult`].
//!
//! ## Rules
//!
//! 1. Completeness gate: the four core fields and `block_performed` must be
//!    answered, and `block_response` too when a block was performed.
//!    Otherwise the result is `Unevaluated` with no recommendations.
//! 2. Counting: each core field answered `Yes` satisfies one of four
//!    criteria. A performed block adds a fifth criterion, satisfied only by a
//!    `Limited` response.
//! 3. Diagnosis: `CentralizedPain` iff every counted criterion is satisfied,
//!    else `CriteriaNotMet` with a bundle from [`crate::catalog::NOT_MET_TABLE`].
//!
//! Evaluation holds no state and performs a fixed number of comparisons.

use crate::catalog::{RecommendationBundle, select_not_met_bundle};
use crate::types::{BlockOutcome, CompletedInput, CriteriaInput};
use serde::{Deserialize, Serialize};

/// Number of criteria counted for every complete input.
pub const CORE_CRITERIA: u8 = 4;

/// Number of criteria counted when a nerve block was performed.
pub const MAX_CRITERIA: u8 = 5;

// =============================================================================
// DIAGNOSIS
// =============================================================================

/// Outcome of an evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Diagnosis {
    /// Required input is still missing.
    Unevaluated,
    /// Every counted criterion is satisfied.
    CentralizedPain,
    /// At least one counted criterion is not satisfied.
    CriteriaNotMet,
}

impl Diagnosis {
    /// Display title for the result banner.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Diagnosis::Unevaluated => "Assessment not yet complete",
            Diagnosis::CentralizedPain => "Centralized Pain Following Peripheral Nerve Injury",
            Diagnosis::CriteriaNotMet => "Criteria Not Met for Centralized Pain",
        }
    }

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Diagnosis::Unevaluated => "unevaluated",
            Diagnosis::CentralizedPain => "centralized_pain",
            Diagnosis::CriteriaNotMet => "criteria_not_met",
        }
    }

    #[must_use]
    pub const fn is_evaluated(self) -> bool {
        !matches!(self, Diagnosis::Unevaluated)
    }
}

impl std::fmt::Display for Diagnosis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.title())
    }
}

// =============================================================================
// TALLY
// =============================================================================

/// Satisfied versus counted criteria.
///
/// Only built by [`CriteriaTally::from_completed`], so `total` is
/// [`CORE_CRITERIA`] or [`MAX_CRITERIA`] and `satisfied <= total`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct CriteriaTally {
    satisfied: u8,
    total: u8,
}

impl CriteriaTally {
    #[must_use]
    pub const fn satisfied(&self) -> u8 {
        self.satisfied
    }

    #[must_use]
    pub const fn total(&self) -> u8 {
        self.total
    }

    /// Whether every counted criterion is satisfied.
    #[must_use]
    pub const fn all_satisfied(&self) -> bool {
        self.satisfied == self.total
    }

    /// Count the criteria of a complete input.
    #[must_use]
    pub fn from_completed(input: &CompletedInput) -> Self {
        let satisfied = input
            .core_answers()
            .iter()
            .filter(|answer| answer.is_affirmed())
            .count() as u8;
        let mut tally = Self {
            satisfied,
            total: CORE_CRITERIA,
        };

        if let BlockOutcome::Performed(response) = input.block {
            tally.total = MAX_CRITERIA;
            if response.is_limited() {
                tally.satisfied = tally.satisfied.saturating_add(1);
            }
        }
        tally
    }
}

// =============================================================================
// EVALUATION RESULT
// =============================================================================

/// The evaluator's output. Never persisted; recomputed for every input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct EvaluationResult {
    pub diagnosis: Diagnosis,
    /// `None` exactly when the diagnosis is `Unevaluated`.
    pub bundle: Option<RecommendationBundle>,
    /// `None` exactly when the diagnosis is `Unevaluated`.
    pub tally: Option<CriteriaTally>,
}

impl EvaluationResult {
    /// The result for an incomplete input.
    #[must_use]
    pub const fn unevaluated() -> Self {
        Self {
            diagnosis: Diagnosis::Unevaluated,
            bundle: None,
            tally: None,
        }
    }

    /// Recommendation statements in display order.
    #[must_use]
    pub fn recommendations(&self) -> &'static [&'static str] {
        match self.bundle {
            Some(bundle) => bundle.statements(),
            None => &[],
        }
    }
}

impl Default for EvaluationResult {
    fn default() -> Self {
        Self::unevaluated()
    }
}

// =============================================================================
// EVALUATE
// =============================================================================

/// Evaluate one observation set.
#[must_use]
pub fn evaluate(input: &CriteriaInput) -> EvaluationResult {
    let Some(completed) = input.completed() else {
        return EvaluationResult::unevaluated();
    };

    let tally = CriteriaTally::from_completed(&completed);

    let (diagnosis, bundle) = if tally.all_satisfied() {
        (
            Diagnosis::CentralizedPain,
            RecommendationBundle::CentralizedPain,
        )
    } else {
        (
            Diagnosis::CriteriaNotMet,
            select_not_met_bundle(
                completed.hypersensitivity.is_denied(),
                completed.mood_cognitive.is_denied(),
            ),
        )
    };

    EvaluationResult {
        diagnosis,
        bundle: Some(bundle),
        tally: Some(tally),
    }
}

// =============================================================================
// TESTS
// =============================================================================
