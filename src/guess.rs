//! Guess evaluation: compares player input with the current creature.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::state::{AppState, RoundPhase, ERROR_FLASH_TICKS, VICTORY_FLASH_TICKS};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum GuessOutcome {
    Correct,
    Incorrect,
    /// Blank input, or no creature ready to be guessed. Nothing changed.
    Ignored,
}

pub fn normalize(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Evaluate `raw` against the current creature and apply the consequences.
///
/// Only a round in [`RoundPhase::Loaded`] accepts guesses; every other phase
/// returns [`GuessOutcome::Ignored`] without touching state.
pub fn evaluate(state: &mut AppState, raw: &str) -> GuessOutcome {
    let guess = normalize(raw);
    if guess.is_empty() || state.phase() != RoundPhase::Loaded {
        return GuessOutcome::Ignored;
    }
    let Some(creature) = state.creature() else {
        return GuessOutcome::Ignored;
    };

    if creature.name.to_lowercase() == guess {
        state.guessed = true;
        state.stats_revealed = true;
        state.error_until = None;
        state.victory_until = Some(state.tick + VICTORY_FLASH_TICKS);
        state.score.reward();
        state.input.clear();
        GuessOutcome::Correct
    } else {
        state.error_until = Some(state.tick + ERROR_FLASH_TICKS);
        state.score.break_streak();
        state.input.clear();
        GuessOutcome::Incorrect
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{BaseStats, Creature, CreatureType, ScoreState, Sprites};
    use tui_dispatch::DataResource;

    fn pikachu() -> Creature {
        Creature {
            id: 25,
            name: "pikachu".into(),
            localized_name: None,
            sprites: Sprites {
                front: "https://img.test/25.png".into(),
                back: None,
                shiny: None,
            },
            stats: BaseStats::default(),
            types: vec![CreatureType::Electric],
            abilities: Vec::new(),
            height: 4,
            weight: 60,
        }
    }

    fn loaded_state() -> AppState {
        AppState {
            round: DataResource::Loaded(pikachu()),
            score: ScoreState {
                score: 200,
                streak: 3,
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_correct_guess_ignores_case_and_padding() {
        let mut state = loaded_state();
        state.input.text = "  PikaChu ".into();

        let input = state.input.text.clone();
        assert_eq!(evaluate(&mut state, &input), GuessOutcome::Correct);
        assert!(state.guessed);
        assert!(state.stats_revealed);
        assert!(state.show_victory());
        assert!(!state.show_error());
        assert_eq!(state.score.score, 300);
        assert_eq!(state.score.streak, 4);
        assert!(state.input.text.is_empty());
    }

    #[test]
    fn test_incorrect_guess_breaks_streak_only() {
        let mut state = loaded_state();
        assert_eq!(evaluate(&mut state, "raichu"), GuessOutcome::Incorrect);
        assert!(!state.guessed);
        assert!(state.show_error());
        assert_eq!(state.error_until, Some(ERROR_FLASH_TICKS));
        assert_eq!(state.score.score, 200);
        assert_eq!(state.score.streak, 0);
    }

    #[test]
    fn test_partial_name_is_incorrect() {
        let mut state = loaded_state();
        assert_eq!(evaluate(&mut state, "pika"), GuessOutcome::Incorrect);
    }

    #[test]
    fn test_blank_guess_is_ignored() {
        for raw in ["", "   ", "\t"] {
            let mut state = loaded_state();
            assert_eq!(evaluate(&mut state, raw), GuessOutcome::Ignored);
            assert!(!state.guessed);
            assert!(!state.show_error());
            assert_eq!(state.score.score, 200);
            assert_eq!(state.score.streak, 3);
        }
    }

    #[test]
    fn test_guess_while_loading_is_ignored() {
        let mut state = AppState {
            round: DataResource::Loading,
            ..Default::default()
        };
        assert_eq!(evaluate(&mut state, "pikachu"), GuessOutcome::Ignored);
        assert!(!state.guessed);
        assert_eq!(state.score, ScoreState::default());
    }

    #[test]
    fn test_second_guess_after_correct_is_ignored() {
        let mut state = loaded_state();
        assert_eq!(evaluate(&mut state, "pikachu"), GuessOutcome::Correct);
        assert_eq!(evaluate(&mut state, "pikachu"), GuessOutcome::Ignored);
        assert_eq!(state.score.score, 300);
    }
}
