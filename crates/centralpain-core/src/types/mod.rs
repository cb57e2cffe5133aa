//! # Core Type Definitions
//!
//! This module contains the input side of the evaluator:
//! - Observations (`Answer`, `BlockResponse`)
//! - Input fields and the observation set (`Field`, `CriteriaInput`)
//! - The gated, fully-answered view of an input (`CompletedInput`, `BlockOutcome`)
//! - Error types (`AssessmentError`)
//!
//! ## Tri-State Fields
//!
//! Every field is `Option<_>`: `None` is "unset", `Some` carries the
//! clinician's selection. Unset is never an error, it only keeps the
//! evaluation in the `Unevaluated` state.
//!
//! ## Block Response Polarity
//!
//! The nerve block question is asked as "limited response to block
//! (<50% pain reduction)?", but the form historically labelled its *yes*
//! option as the GOOD response and its *no* option as the LIMITED response.
//! [`BlockResponse`] stores the clinical meaning directly: `Limited`
//! satisfies the central-pain criterion, `Good` does not. Bare yes/no text
//! is rejected for this field so the inverted labels can never leak in.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// =============================================================================
// OBSERVATIONS
// =============================================================================

/// A clinician's selection for a yes/no criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Answer {
    /// The observation is affirmed.
    #[serde(alias = "affirmed")]
    Yes,
    /// The observation is denied.
    #[serde(alias = "denied")]
    No,
}

impl Answer {
    #[must_use]
    pub const fn is_affirmed(self) -> bool {
        matches!(self, Answer::Yes)
    }

    #[must_use]
    pub const fn is_denied(self) -> bool {
        matches!(self, Answer::No)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Answer::Yes => "yes",
            Answer::No => "no",
        }
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Answer {
    type Err = AssessmentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "yes" | "y" | "affirmed" | "true" => Ok(Answer::Yes),
            "no" | "n" | "denied" | "false" => Ok(Answer::No),
            _ => Err(AssessmentError::InvalidAnswer(s.to_string())),
        }
    }
}

/// Outcome of a diagnostic peripheral nerve block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockResponse {
    /// At least 50% pain reduction. Points to a peripheral generator.
    Good,
    /// Less than 50% pain reduction. Satisfies the central-pain criterion.
    Limited,
}

impl BlockResponse {
    #[must_use]
    pub const fn is_limited(self) -> bool {
        matches!(self, BlockResponse::Limited)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            BlockResponse::Good => "good",
            BlockResponse::Limited => "limited",
        }
    }

    /// Human-readable option label as shown on the assessment form.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            BlockResponse::Good => "No, good response (>=50% reduction)",
            BlockResponse::Limited => "Yes, limited response (<50% reduction)",
        }
    }
}

impl fmt::Display for BlockResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BlockResponse {
    type Err = AssessmentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "limited" | "<50%" => Ok(BlockResponse::Limited),
            "good" | ">=50%" => Ok(BlockResponse::Good),
            "yes" | "y" | "no" | "n" | "true" | "false" => {
                Err(AssessmentError::AmbiguousBlockResponse(s.to_string()))
            }
            _ => Err(AssessmentError::InvalidBlockResponse(s.to_string())),
        }
    }
}

// =============================================================================
// FIELDS
// =============================================================================

/// The six input fields of an assessment, in form order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    DocumentedInjury,
    ChronicPain,
    Hypersensitivity,
    MoodCognitive,
    BlockPerformed,
    BlockResponse,
}

impl Field {
    /// All fields in form order.
    pub const ALL: [Field; 6] = [
        Field::DocumentedInjury,
        Field::ChronicPain,
        Field::Hypersensitivity,
        Field::MoodCognitive,
        Field::BlockPerformed,
        Field::BlockResponse,
    ];

    /// Stable snake_case key used on every external surface.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Field::DocumentedInjury => "documented_injury",
            Field::ChronicPain => "chronic_pain",
            Field::Hypersensitivity => "hypersensitivity",
            Field::MoodCognitive => "mood_cognitive",
            Field::BlockPerformed => "block_performed",
            Field::BlockResponse => "block_response",
        }
    }

    /// Question text as asked on the assessment form.
    #[must_use]
    pub const fn prompt(self) -> &'static str {
        match self {
            Field::DocumentedInjury => "1. Documented peripheral nerve injury/compression",
            Field::ChronicPain => "2. Neuropathic pain >= 3 months",
            Field::Hypersensitivity => "3. Hyperalgesia/allodynia beyond injury zone",
            Field::MoodCognitive => "4. Associated mood/cognitive disturbances",
            Field::BlockPerformed => "5a. Has patient undergone a peripheral nerve block?",
            Field::BlockResponse => "5b. Limited response to block (<50% pain reduction)",
        }
    }

    /// Whether this field must be answered before `input` can be evaluated.
    #[must_use]
    pub fn required_for(self, input: &CriteriaInput) -> bool {
        match self {
            Field::BlockResponse => input.block_performed == Some(Answer::Yes),
            _ => true,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Field {
    type Err = AssessmentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('-', "_");
        Field::ALL
            .into_iter()
            .find(|field| field.key() == wanted)
            .ok_or_else(|| AssessmentError::UnknownField(s.to_string()))
    }
}

// =============================================================================
// CRITERIA INPUT
// =============================================================================

/// The observation set for one evaluation.
///
/// Constructed empty at the start of an assessment and mutated one field at
/// a time by the form. Carries no derived state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CriteriaInput {
    pub documented_injury: Option<Answer>,
    pub chronic_pain: Option<Answer>,
    pub hypersensitivity: Option<Answer>,
    pub mood_cognitive: Option<Answer>,
    pub block_performed: Option<Answer>,
    /// Only meaningful while `block_performed` is `Yes`; ignored otherwise.
    pub block_response: Option<BlockResponse>,
}

impl CriteriaInput {
    /// Create an empty input (every field unset).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn with_documented_injury(mut self, answer: Answer) -> Self {
        self.documented_injury = Some(answer);
        self
    }

    #[must_use]
    pub const fn with_chronic_pain(mut self, answer: Answer) -> Self {
        self.chronic_pain = Some(answer);
        self
    }

    #[must_use]
    pub const fn with_hypersensitivity(mut self, answer: Answer) -> Self {
        self.hypersensitivity = Some(answer);
        self
    }

    #[must_use]
    pub const fn with_mood_cognitive(mut self, answer: Answer) -> Self {
        self.mood_cognitive = Some(answer);
        self
    }

    #[must_use]
    pub const fn with_block_performed(mut self, answer: Answer) -> Self {
        self.block_performed = Some(answer);
        self
    }

    #[must_use]
    pub const fn with_block_response(mut self, response: BlockResponse) -> Self {
        self.block_response = Some(response);
        self
    }

    /// Mutable slot for one of the five yes/no fields.
    ///
    /// Returns `None` for [`Field::BlockResponse`], which is not a yes/no field.
    pub fn answer_slot(&mut self, field: Field) -> Option<&mut Option<Answer>> {
        match field {
            Field::DocumentedInjury => Some(&mut self.documented_injury),
            Field::ChronicPain => Some(&mut self.chronic_pain),
            Field::Hypersensitivity => Some(&mut self.hypersensitivity),
            Field::MoodCognitive => Some(&mut self.mood_cognitive),
            Field::BlockPerformed => Some(&mut self.block_performed),
            Field::BlockResponse => None,
        }
    }

    /// Apply one raw form selection to a field.
    ///
    /// An empty string or `unset` clears the field. The input is left
    /// untouched when the value cannot be parsed.
    pub fn apply(&mut self, field: Field, raw: &str) -> Result<(), AssessmentError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("unset") {
            self.clear(field);
            return Ok(());
        }

        match self.answer_slot(field) {
            Some(slot) => *slot = Some(trimmed.parse()?),
            None => self.block_response = Some(trimmed.parse()?),
        }
        Ok(())
    }

    /// Reset a single field to unset.
    pub fn clear(&mut self, field: Field) {
        match self.answer_slot(field) {
            Some(slot) => *slot = None,
            None => self.block_response = None,
        }
    }

    /// Whether `field` currently holds a value.
    #[must_use]
    pub fn is_set(&self, field: Field) -> bool {
        match field {
            Field::DocumentedInjury => self.documented_injury.is_some(),
            Field::ChronicPain => self.chronic_pain.is_some(),
            Field::Hypersensitivity => self.hypersensitivity.is_some(),
            Field::MoodCognitive => self.mood_cognitive.is_some(),
            Field::BlockPerformed => self.block_performed.is_some(),
            Field::BlockResponse => self.block_response.is_some(),
        }
    }

    /// Required fields that are still unset, in form order.
    #[must_use]
    pub fn missing_fields(&self) -> Vec<Field> {
        Field::ALL
            .into_iter()
            .filter(|field| field.required_for(self) && !self.is_set(*field))
            .collect()
    }

    /// Whether every required field has been answered.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.completed().is_some()
    }

    /// False when a block response is recorded without a performed block.
    ///
    /// Such inputs are still evaluated; the stray response is ignored.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.block_response.is_none() || self.block_performed == Some(Answer::Yes)
    }

    /// The fully-answered view of this input, or `None` if anything
    /// required is still unset.
    #[must_use]
    pub fn completed(&self) -> Option<CompletedInput> {
        let block = match self.block_performed? {
            Answer::Yes => BlockOutcome::Performed(self.block_response?),
            Answer::No => BlockOutcome::NotPerformed,
        };

        Some(CompletedInput {
            documented_injury: self.documented_injury?,
            chronic_pain: self.chronic_pain?,
            hypersensitivity: self.hypersensitivity?,
            mood_cognitive: self.mood_cognitive?,
            block,
        })
    }
}

// =============================================================================
// COMPLETED INPUT
// =============================================================================

/// Whether the fifth criterion takes part in the evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "status", content = "response", rename_all = "snake_case")]
pub enum BlockOutcome {
    /// No block was performed; the criterion is excluded from both counts.
    NotPerformed,
    /// A block was performed with the recorded response.
    Performed(BlockResponse),
}

/// A `CriteriaInput` that passed the completeness gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CompletedInput {
    pub documented_injury: Answer,
    pub chronic_pain: Answer,
    pub hypersensitivity: Answer,
    pub mood_cognitive: Answer,
    pub block: BlockOutcome,
}

impl CompletedInput {
    /// The four core answers in form order.
    #[must_use]
    pub const fn core_answers(&self) -> [Answer; 4] {
        [
            self.documented_injury,
            self.chronic_pain,
            self.hypersensitivity,
            self.mood_cognitive,
        ]
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors raised while building inputs or running the surrounding surfaces.
///
/// Evaluation itself never fails: an incomplete input is reported as
/// `Diagnosis::Unevaluated`, not as an error.
#[derive(Debug, Error)]
pub enum AssessmentError {
    /// A yes/no field received something other than yes or no.
    #[error("Invalid answer '{0}': expected yes or no")]
    InvalidAnswer(String),

    /// The block response field received an unrecognized value.
    #[error("Invalid block response '{0}': expected limited or good")]
    InvalidBlockResponse(String),

    /// The block response field received a bare yes/no.
    #[error(
        "Ambiguous block response '{0}': use 'limited' (<50% reduction) or 'good' (>=50% reduction)"
    )]
    AmbiguousBlockResponse(String),

    /// A value was rejected for the named field.
    #[error("{field}: {source}")]
    InvalidField {
        field: Field,
        #[source]
        source: Box<AssessmentError>,
    },

    /// A yes/no setter was given a field that does not hold yes or no.
    #[error("Field '{0}' is not a yes/no field")]
    NotAYesNoField(Field),

    /// The named field does not exist.
    #[error("Unknown field: {0}")]
    UnknownField(String),

    /// A serialization or deserialization error occurred.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    IoError(String),

    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn answer_parsing_accepts_synonyms() {
        assert_eq!("Yes".parse::<Answer>().ok(), Some(Answer::Yes));
        assert_eq!(" affirmed ".parse::<Answer>().ok(), Some(Answer::Yes));
        assert_eq!("n".parse::<Answer>().ok(), Some(Answer::No));
        assert!(matches!(
            "maybe".parse::<Answer>(),
            Err(AssessmentError::InvalidAnswer(_))
        ));
    }

    #[test]
    fn block_response_rejects_bare_yes_no() {
        assert!(matches!(
            "yes".parse::<BlockResponse>(),
            Err(AssessmentError::AmbiguousBlockResponse(_))
        ));
        assert!(matches!(
            "no".parse::<BlockResponse>(),
            Err(AssessmentError::AmbiguousBlockResponse(_))
        ));
        assert_eq!(
            "limited".parse::<BlockResponse>().ok(),
            Some(BlockResponse::Limited)
        );
        assert_eq!(">=50%".parse::<BlockResponse>().ok(), Some(BlockResponse::Good));
    }

    #[test]
    fn field_parsing_accepts_kebab_case() {
        assert_eq!("mood-cognitive".parse::<Field>().ok(), Some(Field::MoodCognitive));
        assert!(matches!(
            "pain_score".parse::<Field>(),
            Err(AssessmentError::UnknownField(_))
        ));
    }

    #[test]
    fn empty_input_is_missing_five_fields() {
        let input = CriteriaInput::new();
        assert_eq!(
            input.missing_fields(),
            vec![
                Field::DocumentedInjury,
                Field::ChronicPain,
                Field::Hypersensitivity,
                Field::MoodCognitive,
                Field::BlockPerformed,
            ]
        );
        assert!(!input.is_complete());
    }

    #[test]
    fn block_response_required_only_after_block() {
        let base = CriteriaInput::new()
            .with_documented_injury(Answer::Yes)
            .with_chronic_pain(Answer::Yes)
            .with_hypersensitivity(Answer::Yes)
            .with_mood_cognitive(Answer::Yes);

        let no_block = base.with_block_performed(Answer::No);
        assert!(no_block.is_complete());

        let block = base.with_block_performed(Answer::Yes);
        assert_eq!(block.missing_fields(), vec![Field::BlockResponse]);
        assert!(!block.is_complete());
    }

    #[test]
    fn stray_block_response_is_ignored_by_gate() {
        let input = CriteriaInput::new()
            .with_documented_injury(Answer::Yes)
            .with_chronic_pain(Answer::Yes)
            .with_hypersensitivity(Answer::Yes)
            .with_mood_cognitive(Answer::Yes)
            .with_block_performed(Answer::No)
            .with_block_response(BlockResponse::Good);

        assert!(!input.is_consistent());
        let completed = input.completed().expect("complete");
        assert_eq!(completed.block, BlockOutcome::NotPerformed);
    }

    #[test]
    fn apply_sets_and_clears() {
        let mut input = CriteriaInput::new();
        input.apply(Field::ChronicPain, "yes").expect("apply");
        assert_eq!(input.chronic_pain, Some(Answer::Yes));

        input.apply(Field::BlockResponse, "limited").expect("apply");
        assert_eq!(input.block_response, Some(BlockResponse::Limited));

        input.apply(Field::ChronicPain, "").expect("clear");
        assert_eq!(input.chronic_pain, None);
    }

    #[test]
    fn apply_leaves_input_untouched_on_error() {
        let mut input = CriteriaInput::new().with_hypersensitivity(Answer::No);
        assert!(input.apply(Field::Hypersensitivity, "sometimes").is_err());
        assert_eq!(input.hypersensitivity, Some(Answer::No));
    }

    #[test]
    fn input_deserializes_with_missing_fields_as_unset() {
        let json = r#"{"documented_injury":"yes","block_performed":"denied"}"#;
        let input: CriteriaInput = serde_json::from_str(json).expect("parse");
        assert_eq!(input.documented_injury, Some(Answer::Yes));
        assert_eq!(input.block_performed, Some(Answer::No));
        assert_eq!(input.chronic_pain, None);
    }
}
