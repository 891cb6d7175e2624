//! Autocomplete tests: key presses through the game view, actions through
//! the store.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use pretty_assertions::assert_eq;
use tui_dispatch::testing::*;
use tui_dispatch::{EffectStore, EventKind, NumericComponentId};
use pokeguess::{
    action::Action,
    autocomplete::NameIndex,
    components::{Component, GameView, GameViewProps},
    reducer::reducer,
    state::{AppState, BaseStats, Creature, CreatureType, RoundPhase, Sprites},
};

const GEN_ONE_SLICE: [&str; 8] = [
    "bulbasaur",
    "ivysaur",
    "venusaur",
    "charmander",
    "charmeleon",
    "charizard",
    "squirtle",
    "wartortle",
];

fn catalog() -> Vec<String> {
    GEN_ONE_SLICE.iter().map(|name| name.to_string()).collect()
}

/// Round 1 loaded with `name`, index available.
fn ready_state(name: &str) -> AppState {
    let mut state = AppState::default();
    reducer(&mut state, Action::Init);
    let id = state.round_id.unwrap();
    reducer(
        &mut state,
        Action::CreatureDidLoad {
            round: 1,
            creature: Creature {
                id,
                name: name.into(),
                localized_name: None,
                sprites: Sprites {
                    front: format!("https://img.test/{id}.png"),
                    back: None,
                    shiny: None,
                },
                stats: BaseStats::default(),
                types: vec![CreatureType::Fire],
                abilities: Vec::new(),
                height: 6,
                weight: 85,
            },
        },
    );
    reducer(&mut state, Action::NameIndexDidLoad(catalog()));
    state
}

fn press(code: KeyCode) -> EventKind {
    EventKind::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

#[test]
fn test_filter_cha() {
    let index = NameIndex::new(vec![
        "charmander".into(),
        "charmeleon".into(),
        "bulbasaur".into(),
    ]);
    assert_eq!(
        index.filter("cha").collect::<Vec<_>>(),
        vec!["charmander", "charmeleon"]
    );
    // Restartable: a second pass yields the same names
    assert_eq!(index.filter("cha").count(), 2);
}

#[test]
fn test_filter_keeps_catalog_order() {
    let index = NameIndex::new(catalog());
    assert_eq!(
        index.filter("cha").collect::<Vec<_>>(),
        vec!["charmander", "charmeleon", "charizard"]
    );
}

#[test]
fn test_filter_is_case_insensitive_prefix_only() {
    let index = NameIndex::new(catalog());
    assert_eq!(index.candidates("SQUI"), vec!["squirtle".to_string()]);
    assert!(index.candidates("saur").is_empty());
    assert!(index.candidates("").is_empty());
    assert!(index.candidates("   ").is_empty());
}

#[test]
fn test_typing_narrows_candidates() {
    let mut harness = EffectStoreTestHarness::new(ready_state("charmander"), reducer);
    let mut component = GameView::new();

    for ch in ["c", "h", "a"] {
        let actions = harness.send_keys::<NumericComponentId, _, _>(ch, |state, event| {
            let props = GameViewProps {
                state,
                is_focused: true,
            };
            component
                .handle_event(&event.kind, props)
                .into_iter()
                .collect::<Vec<_>>()
        });
        for action in actions {
            harness.dispatch_collect(action);
        }
    }

    harness.assert_state(|s| s.input.text == "cha");
    harness.assert_state(|s| {
        s.input.candidates == vec!["charmander", "charmeleon", "charizard"]
    });
    harness.assert_state(|s| s.input.highlighted.is_none());
}

#[test]
fn test_candidates_only_come_from_index() {
    let mut harness = EffectStoreTestHarness::new(ready_state("charmander"), reducer);
    harness.dispatch_collect(Action::GuessInputChange("mew".into()));
    harness.assert_state(|s| s.input.candidates.is_empty());
}

#[test]
fn test_down_then_enter_picks_suggestion() {
    let mut store = EffectStore::new(ready_state("charmeleon"), reducer);
    let mut component = GameView::new();
    store.dispatch(Action::GuessInputChange("cha".into()));

    for code in [KeyCode::Down, KeyCode::Down, KeyCode::Enter] {
        let actions: Vec<_> = component
            .handle_event(
                &press(code),
                GameViewProps {
                    state: store.state(),
                    is_focused: true,
                },
            )
            .into_iter()
            .collect();
        for action in actions {
            store.dispatch(action);
        }
    }

    assert_eq!(store.state().phase(), RoundPhase::Guessed);
    assert_eq!(store.state().score.score, 100);
}

#[test]
fn test_pick_wrong_suggestion_is_incorrect() {
    let mut harness = EffectStoreTestHarness::new(ready_state("charmeleon"), reducer);
    harness.dispatch_collect(Action::GuessInputChange("cha".into()));
    harness.dispatch_collect(Action::SuggestionPick(0));

    harness.assert_state(|s| s.show_error());
    harness.assert_state(|s| !s.guessed);
    harness.assert_state(|s| s.input.text.is_empty());
    harness.assert_state(|s| s.input.candidates.is_empty());
}

#[test]
fn test_pick_out_of_range_is_ignored() {
    let mut harness = EffectStoreTestHarness::new(ready_state("charmeleon"), reducer);
    harness.dispatch_collect(Action::GuessInputChange("cha".into()));
    harness.dispatch_collect(Action::SuggestionPick(5));
    harness.assert_state(|s| s.input.text == "cha");
}

#[test]
fn test_round_transition_clears_suggestions() {
    let mut harness = EffectStoreTestHarness::new(ready_state("charmeleon"), reducer);
    harness.dispatch_collect(Action::GuessInputChange("cha".into()));
    harness.dispatch_collect(Action::SuggestionMove(1));
    harness.dispatch_collect(Action::RoundSkip);

    harness.assert_state(|s| s.input.text.is_empty());
    harness.assert_state(|s| s.input.candidates.is_empty());
    harness.assert_state(|s| s.input.highlighted.is_none());
}
