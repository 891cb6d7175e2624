//! Reducer - pure function: (state, action) -> DispatchResult
//!
//! Round lifecycle: `Idle → Loading → Loaded → {Guessed | Skipped} → Loading`,
//! with `Loading → Failed → Loading` when the provider cannot be reached.

use tui_dispatch::{DataResource, DispatchResult};

use crate::action::Action;
use crate::autocomplete::NameIndex;
use crate::effect::Effect;
use crate::guess::{self, GuessOutcome};
use crate::state::{AppState, RoundPhase};

/// The reducer handles all state transitions
pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        Action::Init => {
            let effects = start_round(state);
            DispatchResult::changed_with_many(effects)
        }

        // ===== Round actions =====
        Action::RoundStart => DispatchResult::changed_with_many(start_round(state)),

        Action::RoundNext => {
            if state.phase() == RoundPhase::Idle {
                return DispatchResult::unchanged();
            }
            state.input.clear();
            DispatchResult::changed_with_many(start_round(state))
        }

        Action::RoundSkip => {
            if !state.can_skip() {
                return DispatchResult::unchanged();
            }
            state.score.penalize_skip();
            state.input.clear();
            DispatchResult::changed_with_many(start_round(state))
        }

        Action::RoundRetry => {
            if state.phase() != RoundPhase::Failed {
                return DispatchResult::unchanged();
            }
            let Some(id) = state.round_id else {
                return DispatchResult::changed_with_many(start_round(state));
            };
            DispatchResult::changed_with_many(begin_round(state, id))
        }

        // ===== Creature results =====
        Action::CreatureDidLoad { round, creature } => {
            if round != state.round_seq || !state.round.is_loading() {
                tracing::debug!(round, current = state.round_seq, "discarding stale creature");
                return DispatchResult::unchanged();
            }
            let effects = vec![
                Effect::LoadSpecies {
                    round,
                    id: creature.id,
                },
                Effect::LoadSprite {
                    round,
                    url: creature.sprites.front.clone(),
                },
            ];
            state.round = DataResource::Loaded(creature);
            state.message = None;
            DispatchResult::changed_with_many(effects)
        }

        Action::CreatureDidError { round, error } => {
            if round != state.round_seq || !state.round.is_loading() {
                tracing::debug!(round, current = state.round_seq, "discarding stale error");
                return DispatchResult::unchanged();
            }
            tracing::warn!(round, %error, "creature failed to load");
            state.round = DataResource::Failed(error);
            DispatchResult::changed()
        }

        // ===== Species results =====
        Action::SpeciesDidLoad {
            round,
            localized_name,
        } => {
            if round != state.round_seq {
                return DispatchResult::unchanged();
            }
            let DataResource::Loaded(creature) = &mut state.round else {
                return DispatchResult::unchanged();
            };
            creature.localized_name = localized_name;
            DispatchResult::changed()
        }

        Action::SpeciesDidError { round, error } => {
            if round == state.round_seq {
                tracing::info!(round, %error, "localized name unavailable");
            }
            DispatchResult::unchanged()
        }

        // ===== Sprite results =====
        Action::SpriteDidLoad { round, sprite } => {
            if round != state.round_seq || state.creature().is_none() {
                return DispatchResult::unchanged();
            }
            state.sprite = Some(sprite);
            DispatchResult::changed()
        }

        Action::SpriteDidError { round, error } => {
            if round != state.round_seq {
                return DispatchResult::unchanged();
            }
            tracing::warn!(round, %error, "sprite failed to load");
            state.message = Some(format!("Sprite error: {error}"));
            DispatchResult::changed()
        }

        // ===== Name index results =====
        Action::NameIndexDidLoad(names) => {
            if state.name_index.is_loaded() {
                return DispatchResult::unchanged();
            }
            tracing::info!(count = names.len(), "name index loaded");
            state.name_index = DataResource::Loaded(NameIndex::new(names));
            refresh_candidates(state);
            DispatchResult::changed()
        }

        Action::NameIndexDidError(error) => {
            tracing::warn!(%error, "name index failed to load");
            if !state.name_index.is_loaded() {
                state.name_index = DataResource::Failed(error);
            }
            DispatchResult::changed()
        }

        // ===== Guess actions =====
        Action::GuessInputChange(text) => {
            if state.input.text == text {
                return DispatchResult::unchanged();
            }
            state.input.text = text;
            refresh_candidates(state);
            DispatchResult::changed()
        }

        Action::GuessSubmit => {
            if state.phase() == RoundPhase::Guessed {
                state.input.clear();
                return DispatchResult::changed_with_many(start_round(state));
            }
            if state.phase() == RoundPhase::Failed {
                return reducer(state, Action::RoundRetry);
            }
            let raw = match state.input.highlighted_candidate() {
                Some(name) => name.to_string(),
                None => state.input.text.clone(),
            };
            submit(state, &raw)
        }

        // ===== Suggestion actions =====
        Action::SuggestionMove(delta) => {
            let len = state.input.candidates.len();
            if len == 0 {
                return DispatchResult::unchanged();
            }
            let next = match state.input.highlighted {
                None if delta > 0 => Some(0),
                None => Some(len - 1),
                Some(current) => {
                    let moved = current as i64 + delta as i64;
                    if moved < 0 {
                        None
                    } else {
                        Some((moved as usize).min(len - 1))
                    }
                }
            };
            if next == state.input.highlighted {
                return DispatchResult::unchanged();
            }
            state.input.highlighted = next;
            DispatchResult::changed()
        }

        Action::SuggestionPick(index) => {
            let Some(name) = state.input.candidates.get(index).cloned() else {
                return DispatchResult::unchanged();
            };
            state.input.text = name.clone();
            refresh_candidates(state);
            // The input changed even when the guess itself is ignored
            if guess::evaluate(state, &name) == GuessOutcome::Incorrect {
                refresh_candidates(state);
            }
            DispatchResult::changed()
        }

        Action::Render => DispatchResult::changed(),

        // ===== Global actions =====
        Action::Tick => {
            state.tick = state.tick.wrapping_add(1);
            if expire_flashes(state) {
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::Quit => DispatchResult::unchanged(),
    }
}

/// Pick a random identifier and begin loading it.
fn start_round(state: &mut AppState) -> Vec<Effect> {
    let max_id = state.config.max_id.max(1);
    let id = state.rng.next_in_range(1, max_id);
    state.round_number += 1;
    begin_round(state, id)
}

fn begin_round(state: &mut AppState, id: u16) -> Vec<Effect> {
    state.round_seq += 1;
    state.round_id = Some(id);
    state.round = DataResource::Loading;
    state.guessed = false;
    state.stats_revealed = false;
    state.error_until = None;
    state.victory_until = None;
    state.sprite = None;
    state.message = None;
    tracing::info!(round = state.round_seq, id, "round started");

    let mut effects = vec![Effect::LoadCreature {
        round: state.round_seq,
        id,
    }];
    if !state.name_index.is_loaded() && !state.name_index.is_loading() {
        state.name_index = DataResource::Loading;
        effects.push(Effect::LoadNameIndex {
            limit: state.config.max_id,
        });
    }
    effects
}

fn submit(state: &mut AppState, raw: &str) -> DispatchResult<Effect> {
    match guess::evaluate(state, raw) {
        GuessOutcome::Correct => {
            tracing::info!(round = state.round_seq, score = state.score.score, "correct guess");
            DispatchResult::changed()
        }
        GuessOutcome::Incorrect => {
            refresh_candidates(state);
            DispatchResult::changed()
        }
        GuessOutcome::Ignored => DispatchResult::unchanged(),
    }
}

fn refresh_candidates(state: &mut AppState) {
    state.input.candidates = match state.name_index.data() {
        Some(index) => index.candidates(&state.input.text),
        None => Vec::new(),
    };
    state.input.highlighted = None;
}

fn expire_flashes(state: &mut AppState) -> bool {
    let mut changed = false;
    if state.error_until.is_some_and(|until| state.tick >= until) {
        state.error_until = None;
        changed = true;
    }
    if state.victory_until.is_some_and(|until| state.tick >= until) {
        state.victory_until = None;
        changed = true;
    }
    changed
}
