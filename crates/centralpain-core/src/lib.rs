//! # centralpain-core
//!
//! The deterministic criteria evaluator for centralized pain following
//! peripheral nerve injury - THE LOGIC.
//!
//! Given the clinician's observations about one patient, the evaluator
//! produces a diagnosis and an ordered list of recommendations drawn from a
//! fixed catalog. Everything else (forms, rendering, transport) lives in the
//! collaborating application.
//!
//! ## Architectural Constraints
//!
//! The CORE:
//! - Is pure: `evaluate` performs no I/O and keeps no state between calls
//! - Is closed: recommendation text comes only from the static catalog
//! - Treats incomplete input as the `Unevaluated` state, never as an error
//! - Has NO async, NO network, NO logging dependencies
//!
//! ## Example
//!
//! ```
//! use centralpain_core::{Answer, BlockResponse, CriteriaInput, Diagnosis, evaluate};
//!
//! let input = CriteriaInput::new()
//!     .with_documented_injury(Answer::Yes)
//!     .with_chronic_pain(Answer::Yes)
//!     .with_hypersensitivity(Answer::Yes)
//!     .with_mood_cognitive(Answer::Yes)
//!     .with_block_performed(Answer::Yes)
//!     .with_block_response(BlockResponse::Limited);
//!
//! let result = evaluate(&input);
//! assert_eq!(result.diagnosis, Diagnosis::CentralizedPain);
//! assert_eq!(result.recommendations().len(), 5);
//! ```

// =============================================================================
// MODULES
// =============================================================================

pub mod catalog;
pub mod criteria;
pub mod evaluator;
pub mod session;
pub mod types;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{
    Answer, AssessmentError, BlockOutcome, BlockResponse, CompletedInput, CriteriaInput, Field,
};

// =============================================================================
// RE-EXPORTS: Evaluator
// =============================================================================

pub use catalog::{NOT_MET_FALLBACK, NOT_MET_TABLE, RecommendationBundle, select_not_met_bundle};
pub use criteria::{ChecklistItem, Criterion, checklist};
pub use evaluator::{
    CORE_CRITERIA, CriteriaTally, Diagnosis, EvaluationResult, MAX_CRITERIA, evaluate,
};
pub use session::Assessment;
