//! Actions: user intents and async results

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::sprite::SpriteData;
use crate::state::Creature;

/// Every async result carries the `round` sequence it was requested for so the
/// reducer can drop answers that arrive after the round moved on.
#[derive(tui_dispatch::Action, Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[action(infer_categories)]
pub enum Action {
    /// Start the session: first round plus the name index
    Init,

    // ===== Round category =====
    /// Begin a round with a fresh random creature
    RoundStart,
    /// Advance after a guess; also clears the input
    RoundNext,
    /// Give up on the current creature (costs points and the streak)
    RoundSkip,
    /// Re-request the creature of a failed round
    RoundRetry,

    // ===== Creature results =====
    CreatureDidLoad { round: u64, creature: Creature },
    CreatureDidError { round: u64, error: String },

    // ===== Species results =====
    SpeciesDidLoad { round: u64, localized_name: Option<String> },
    SpeciesDidError { round: u64, error: String },

    // ===== Sprite results =====
    SpriteDidLoad { round: u64, sprite: SpriteData },
    SpriteDidError { round: u64, error: String },

    // ===== Name index results =====
    NameIndexDidLoad(Vec<String>),
    NameIndexDidError(String),

    // ===== Guess category =====
    /// Guess field text changed
    GuessInputChange(String),
    /// Evaluate the current input (or the highlighted suggestion)
    GuessSubmit,

    // ===== Suggestion category =====
    /// Move the suggestion highlight up or down
    SuggestionMove(i16),
    /// Take suggestion `n` as the guess and evaluate it
    SuggestionPick(usize),

    /// Force a re-render (cursor movement)
    Render,

    /// Advance virtual time by one tick
    Tick,

    Quit,
}
