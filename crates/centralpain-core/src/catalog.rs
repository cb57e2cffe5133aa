//! # Recommendation Catalog
//!
//! Fixed recommendation bundles and the decision table that picks one when
//! the criteria are not met.
//!
//! | Hypersensitivity denied | Mood/cognitive denied | Bundle                   |
//! |-------------------------|-----------------------|--------------------------|
//! | yes                     | yes                   | `PeripheralDominant`     |
//! | yes                     | no                    | `HypersensitivityAbsent` |
//! | no                      | yes                   | `MoodCognitiveAbsent`    |
//! | no                      | no                    | `FurtherEvaluation`      |
//!
//! Rows are checked top to bottom; the last row is the fallback and covers
//! shortfalls that came from the injury, duration or block criteria.

use serde::{Deserialize, Serialize};

// =============================================================================
// STATEMENTS
// =============================================================================

const CENTRALIZED_PAIN: &[&str] = &[
    "Peripheral interventions may have limited effectiveness due to central mechanisms",
    "Consider centrally-targeted treatments (SNRIs, TCAs, gabapentinoids, NMDA receptor antagonists)",
    "Evaluate for neuromodulation devices",
    "Implement comprehensive psychological support (e.g. CBT)",
    "Commence multidisciplinary pain management",
];

const PERIPHERAL_DOMINANT: &[&str] = &[
    "Peripheral interventions may be appropriate as primary treatment",
    "Consider targeted nerve surgery or focal ablative techniques",
    "Monitor for development of central sensitization features",
    "Standard peripheral nerve pain protocols recommended",
    "Follow-up evaluation to assess for changes in presentation",
];

const HYPERSENSITIVITY_ABSENT: &[&str] = &[
    "Peripheral interventions likely appropriate with monitoring",
    "Consider additional assessment for hypersensitivity beyond injury zone",
    "Address mood/cognitive components with psychological support",
    "Monitor for development of additional central sensitization features",
];

const MOOD_COGNITIVE_ABSENT: &[&str] = &[
    "Consider psychological evaluation for subtle mood/cognitive changes",
    "Peripheral interventions with careful monitoring of outcomes",
    "Mixed approach addressing both peripheral and central components",
    "Educate patient on psychosocial aspects of pain management",
];

const FURTHER_EVALUATION: &[&str] = &[
    "Consider further evaluation to confirm diagnosis",
    "Peripheral interventions may be appropriate with monitoring",
    "Consider combined peripheral and central approaches",
    "Follow-up to reassess criteria that were not met",
];

// =============================================================================
// BUNDLES
// =============================================================================

/// A fixed, ordered set of recommendation statements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationBundle {
    /// Every counted criterion satisfied.
    CentralizedPain,
    /// Both hypersensitivity and mood/cognitive disturbance denied.
    PeripheralDominant,
    /// Hypersensitivity denied, mood/cognitive disturbance present.
    HypersensitivityAbsent,
    /// Mood/cognitive disturbance denied, hypersensitivity present.
    MoodCognitiveAbsent,
    /// Shortfall on injury, duration or block criteria.
    FurtherEvaluation,
}

impl RecommendationBundle {
    /// Every bundle in catalog order.
    pub const ALL: [RecommendationBundle; 5] = [
        RecommendationBundle::CentralizedPain,
        RecommendationBundle::PeripheralDominant,
        RecommendationBundle::HypersensitivityAbsent,
        RecommendationBundle::MoodCognitiveAbsent,
        RecommendationBundle::FurtherEvaluation,
    ];

    /// The bundle's statements in display order.
    #[must_use]
    pub const fn statements(self) -> &'static [&'static str] {
        match self {
            RecommendationBundle::CentralizedPain => CENTRALIZED_PAIN,
            RecommendationBundle::PeripheralDominant => PERIPHERAL_DOMINANT,
            RecommendationBundle::HypersensitivityAbsent => HYPERSENSITIVITY_ABSENT,
            RecommendationBundle::MoodCognitiveAbsent => MOOD_COGNITIVE_ABSENT,
            RecommendationBundle::FurtherEvaluation => FURTHER_EVALUATION,
        }
    }

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            RecommendationBundle::CentralizedPain => "centralized_pain",
            RecommendationBundle::PeripheralDominant => "peripheral_dominant",
            RecommendationBundle::HypersensitivityAbsent => "hypersensitivity_absent",
            RecommendationBundle::MoodCognitiveAbsent => "mood_cognitive_absent",
            RecommendationBundle::FurtherEvaluation => "further_evaluation",
        }
    }

    /// One-line summary of when the bundle applies.
    #[must_use]
    pub const fn summary(self) -> &'static str {
        match self {
            RecommendationBundle::CentralizedPain => "All counted criteria met",
            RecommendationBundle::PeripheralDominant => {
                "Hypersensitivity and mood/cognitive symptoms both absent"
            }
            RecommendationBundle::HypersensitivityAbsent => "Hypersensitivity absent",
            RecommendationBundle::MoodCognitiveAbsent => "Mood/cognitive symptoms absent",
            RecommendationBundle::FurtherEvaluation => "Other criteria not met",
        }
    }
}

// =============================================================================
// DECISION TABLE
// =============================================================================

/// Key of the not-met table: (hypersensitivity denied, mood/cognitive denied).
pub type DeniedAxes = (bool, bool);

/// Ordered rows of the not-met table. The first matching row wins.
pub const NOT_MET_TABLE: [(DeniedAxes, RecommendationBundle); 3] = [
    ((true, true), RecommendationBundle::PeripheralDominant),
    ((true, false), RecommendationBundle::HypersensitivityAbsent),
    ((false, true), RecommendationBundle::MoodCognitiveAbsent),
];

/// Bundle used when no row of [`NOT_MET_TABLE`] matches.
pub const NOT_MET_FALLBACK: RecommendationBundle = RecommendationBundle::FurtherEvaluation;

/// Select the bundle for a `CriteriaNotMet` outcome.
#[must_use]
pub fn select_not_met_bundle(
    hypersensitivity_denied: bool,
    mood_cognitive_denied: bool,
) -> RecommendationBundle {
    let key = (hypersensitivity_denied, mood_cognitive_denied);
    NOT_MET_TABLE
        .iter()
        .find(|(row, _)| *row == key)
        .map(|(_, bundle)| *bundle)
        .unwrap_or(NOT_MET_FALLBACK)
}

// =============================================================================
// TESTS
// =============================================================================
