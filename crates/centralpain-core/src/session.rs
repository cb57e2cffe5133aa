//! # Assessment Session
//!
//! Collaborator-side holder for one in-progress assessment.
//!
//! An [`Assessment`] owns a [`CriteriaInput`] and re-runs [`evaluate`] from
//! scratch after every mutation, so the exposed result always matches the
//! current input snapshot. The evaluator itself stays stateless; the cached
//! result is only the last pure output for this session's own input.
//!
//! - Volatile: never serialized to disk
//! - Single patient, single assessment
//! - `reset()` returns to the empty form

use crate::criteria::{ChecklistItem, checklist};
use crate::evaluator::{EvaluationResult, evaluate};
use crate::types::{Answer, AssessmentError, BlockResponse, CriteriaInput, Field};

/// One in-progress assessment.
#[derive(Debug, Clone, Default)]
pub struct Assessment {
    input: CriteriaInput,
    result: EvaluationResult,
}

impl Assessment {
    /// Start a new assessment with every field unset.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing input snapshot.
    #[must_use]
    pub fn from_input(input: CriteriaInput) -> Self {
        Self {
            input,
            result: evaluate(&input),
        }
    }

    #[must_use]
    pub fn input(&self) -> &CriteriaInput {
        &self.input
    }

    /// Result for the current input.
    #[must_use]
    pub fn result(&self) -> &EvaluationResult {
        &self.result
    }

    /// Per-criterion checklist for the current input.
    #[must_use]
    pub fn checklist(&self) -> Vec<ChecklistItem> {
        checklist(&self.input)
    }

    /// Required fields that are still unset.
    #[must_use]
    pub fn missing_fields(&self) -> Vec<Field> {
        self.input.missing_fields()
    }

    /// The next required field in form order, if any.
    #[must_use]
    pub fn next_field(&self) -> Option<Field> {
        self.missing_fields().into_iter().next()
    }

    /// Apply a raw form selection and re-evaluate.
    pub fn apply(&mut self, field: Field, raw: &str) -> Result<&EvaluationResult, AssessmentError> {
        self.input.apply(field, raw)?;
        Ok(self.refresh())
    }

    /// Set or unset one of the yes/no fields and re-evaluate.
    pub fn set_answer(
        &mut self,
        field: Field,
        answer: Option<Answer>,
    ) -> Result<&EvaluationResult, AssessmentError> {
        let slot = self
            .input
            .answer_slot(field)
            .ok_or(AssessmentError::NotAYesNoField(field))?;
        *slot = answer;
        Ok(self.refresh())
    }

    /// Set or unset the block response and re-evaluate.
    pub fn set_block_response(&mut self, response: Option<BlockResponse>) -> &EvaluationResult {
        self.input.block_response = response;
        self.refresh()
    }

    /// Unset one field and re-evaluate.
    pub fn clear(&mut self, field: Field) -> &EvaluationResult {
        self.input.clear(field);
        self.refresh()
    }

    /// Return to the empty form.
    pub fn reset(&mut self) {
        self.input = CriteriaInput::new();
        self.result = EvaluationResult::unevaluated();
    }

    fn refresh(&mut self) -> &EvaluationResult {
        self.result = evaluate(&self.input);
        &self.result
    }
}

// =============================================================================
// TESTS
// =============================================================================
