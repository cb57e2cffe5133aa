//! # Diagnostic Criteria
//!
//! The five criteria for centralized pain following peripheral nerve injury,
//! and the per-criterion checklist shown next to a result.
//!
//! The checklist reflects each field on its own. It is not derived from the
//! aggregate diagnosis: a patient can meet three criteria and still be
//! `CriteriaNotMet`.

use crate::types::{Answer, BlockResponse, CriteriaInput};
use serde::{Deserialize, Serialize};

// =============================================================================
// CRITERION
// =============================================================================

/// One diagnostic criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Criterion {
    DocumentedInjury,
    ChronicPain,
    Hypersensitivity,
    MoodCognitive,
    LimitedBlockResponse,
}

impl Criterion {
    /// All criteria in numbered order.
    pub const ALL: [Criterion; 5] = [
        Criterion::DocumentedInjury,
        Criterion::ChronicPain,
        Criterion::Hypersensitivity,
        Criterion::MoodCognitive,
        Criterion::LimitedBlockResponse,
    ];

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Criterion::DocumentedInjury => "documented_injury",
            Criterion::ChronicPain => "chronic_pain",
            Criterion::Hypersensitivity => "hypersensitivity",
            Criterion::MoodCognitive => "mood_cognitive",
            Criterion::LimitedBlockResponse => "limited_block_response",
        }
    }

    /// Short label used in the checklist.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Criterion::DocumentedInjury => "Documented peripheral nerve injury",
            Criterion::ChronicPain => "Neuropathic pain >= 3 months",
            Criterion::Hypersensitivity => "Hypersensitivity beyond injury zone",
            Criterion::MoodCognitive => "Mood/cognitive disturbances",
            Criterion::LimitedBlockResponse => "Limited response to nerve block",
        }
    }

    /// Clinical definition of the criterion.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Criterion::DocumentedInjury => {
                "Documented peripheral nervous system injury or compression, \
                 established through clinical history, imaging, or surgical findings"
            }
            Criterion::ChronicPain => {
                "Neuropathic pain persisting for three months or longer, indicating that \
                 acute post-injury inflammation has resolved"
            }
            Criterion::Hypersensitivity => {
                "Hyperalgesia, allodynia, or hypersensitivity extending beyond the zone of \
                 injury, showing that pain processing has spread beyond the affected nerve territory"
            }
            Criterion::MoodCognitive => {
                "Associated mood and/or cognitive disturbances such as anxiety, depression, \
                 or difficulties with memory and concentration"
            }
            Criterion::LimitedBlockResponse => {
                "If a peripheral nerve block was performed, less than 50% pain reduction \
                 indicates a shift from a peripheral to a more central pain generator"
            }
        }
    }
}

impl std::fmt::Display for Criterion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// CHECKLIST
// =============================================================================

/// Whether a single criterion is met by the raw input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistItem {
    pub criterion: Criterion,
    pub met: bool,
}

/// Build the per-criterion checklist for `input`.
///
/// The four core criteria are always listed and are met only when answered
/// `Yes`. The block criterion is listed only when a block was performed and
/// is met only by a `Limited` response.
#[must_use]
pub fn checklist(input: &CriteriaInput) -> Vec<ChecklistItem> {
    let affirmed = |answer: Option<Answer>| answer == Some(Answer::Yes);

    let mut items = vec![
        ChecklistItem {
            criterion: Criterion::DocumentedInjury,
            met: affirmed(input.documented_injury),
        },
        ChecklistItem {
            criterion: Criterion::ChronicPain,
            met: affirmed(input.chronic_pain),
        },
        ChecklistItem {
            criterion: Criterion::Hypersensitivity,
            met: affirmed(input.hypersensitivity),
        },
        ChecklistItem {
            criterion: Criterion::MoodCognitive,
            met: affirmed(input.mood_cognitive),
        },
    ];

    if affirmed(input.block_performed) {
        items.push(ChecklistItem {
            criterion: Criterion::LimitedBlockResponse,
            met: input.block_response == Some(BlockResponse::Limited),
        });
    }

    items
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checklist_without_block_has_four_items() {
        let input = CriteriaInput::new()
            .with_documented_injury(Answer::Yes)
            .with_block_performed(Answer::No);

        let items = checklist(&input);
        assert_eq!(items.len(), 4);
        assert!(items[0].met);
        assert!(!items[1].met);
    }

    #[test]
    fn checklist_block_item_met_by_limited_response() {
        let limited = CriteriaInput::new()
            .with_block_performed(Answer::Yes)
            .with_block_response(BlockResponse::Limited);
        let good = limited.with_block_response(BlockResponse::Good);

        let limited_items = checklist(&limited);
        assert_eq!(limited_items.len(), 5);
        assert_eq!(limited_items[4].criterion, Criterion::LimitedBlockResponse);
        assert!(limited_items[4].met);

        assert!(!checklist(&good)[4].met);
    }

    #[test]
    fn checklist_ignores_denied_values() {
        let input = CriteriaInput::new()
            .with_hypersensitivity(Answer::No)
            .with_mood_cognitive(Answer::No);
        assert!(checklist(&input).iter().all(|item| !item.met));
    }

    #[test]
    fn criterion_keys_are_unique() {
        let keys: std::collections::BTreeSet<_> =
            Criterion::ALL.iter().map(|c| c.key()).collect();
        assert_eq!(keys.len(), Criterion::ALL.len());
    }
}
