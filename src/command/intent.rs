//! Classify free-text prompts into intents
//!
//! Matching is keyword/substring based on the lower-cased prompt. The table
//! is ordered and the first match wins, so "help me go to Tokyo" is travel.

use serde::{Deserialize, Serialize};

use crate::catalog::PromptCatalog;

/// What the player asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Intent {
    /// Move to another location
    Travel,
    /// Run one of the suggested business actions
    ScriptedAction,
    /// Show the command reference
    Help,
    /// Show the current state
    Status,
    /// Advance one day
    AdvanceDay,
    /// Start over from the template
    Reset,
    /// Move money into investments
    Invest,
    /// Spend energy on research
    Research,
    /// Show market indices
    MarketReport,
    /// Suggest an action to try
    PromptSuggestion,
    /// Could not determine intent
    Unknown,
}

/// How a table row decides whether it matches
#[derive(Debug, Clone, Copy)]
enum Trigger {
    /// Any of these substrings
    Keywords(&'static [&'static str]),
    /// Any phrase from the prompt suggestion catalog
    SuggestedAction,
}

/// Priority order. Earlier rows shadow later ones.
const INTENT_TABLE: &[(Intent, Trigger)] = &[
    (Intent::Travel, Trigger::Keywords(&["go to", "visit", "travel"])),
    (Intent::ScriptedAction, Trigger::SuggestedAction),
    (Intent::Help, Trigger::Keywords(&["help"])),
    (Intent::Status, Trigger::Keywords(&["check state", "status"])),
    (Intent::AdvanceDay, Trigger::Keywords(&["advance day"])),
    (Intent::Reset, Trigger::Keywords(&["reset", "new game"])),
    (Intent::Invest, Trigger::Keywords(&["invest"])),
    (Intent::Research, Trigger::Keywords(&["research"])),
    (Intent::MarketReport, Trigger::Keywords(&["market report"])),
    (Intent::PromptSuggestion, Trigger::Keywords(&["ai prompt"])),
];

/// Classify an already lower-cased prompt
pub fn classify(lowered: &str, prompts: &PromptCatalog) -> Intent {
    INTENT_TABLE
        .iter()
        .find(|(_, trigger)| match trigger {
            Trigger::Keywords(words) => words.iter().any(|w| lowered.contains(*w)),
            Trigger::SuggestedAction => prompts.matching_action(lowered).is_some(),
        })
        .map(|(intent, _)| *intent)
        .unwrap_or(Intent::Unknown)
}
