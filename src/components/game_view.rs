use crossterm::event::{KeyCode, KeyEventKind};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use tui_dispatch::EventKind;
use tui_dispatch_components::{
    StatusBar, StatusBarHint, StatusBarItem, StatusBarProps, StatusBarSection, StatusBarStyle,
};

use super::{
    Component, GuessInput, GuessInputProps, RoundPanel, RoundPanelProps, ScoreHeader,
    ScoreHeaderProps, ACCENT_GOLD, ACCENT_RED, ACCENT_TEAL, TEXT_DIM,
};
use super::guess_input::MAX_VISIBLE_SUGGESTIONS;
use crate::action::Action;
use crate::state::{AppState, RoundPhase};

/// Props for GameView - read-only view of state
pub struct GameViewProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

/// The whole game screen
pub struct GameView {
    guess: GuessInput,
    status_bar: StatusBar,
}

impl Default for GameView {
    fn default() -> Self {
        Self {
            guess: GuessInput::new(),
            status_bar: StatusBar::new(),
        }
    }
}

impl GameView {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Component<Action> for GameView {
    type Props<'a> = GameViewProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return Vec::new();
        }
        if let EventKind::Key(key) = event {
            if key.code == KeyCode::Esc && key.kind == KeyEventKind::Press {
                return vec![Action::Quit];
            }
        }

        let state = props.state;
        self.guess
            .handle_event(
                event,
                GuessInputProps {
                    value: &state.input.text,
                    candidates: &state.input.candidates,
                    highlighted: state.input.highlighted,
                    phase: state.phase(),
                    is_focused: true,
                },
            )
            .into_iter()
            .collect()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let state = props.state;
        let suggestion_rows = if state.input.candidates.is_empty() {
            0
        } else {
            state.input.candidates.len().min(MAX_VISIBLE_SUGGESTIONS) as u16 + 2
        };
        let chunks = Layout::vertical([
            Constraint::Length(3),                   // Score header
            Constraint::Min(8),                      // Sprite + details
            Constraint::Length(1),                   // Feedback
            Constraint::Length(3 + suggestion_rows), // Guess input + suggestions
            Constraint::Length(1),                   // Help bar
        ])
        .split(area);

        let mut header = ScoreHeader;
        header.render(
            frame,
            chunks[0],
            ScoreHeaderProps {
                score: &state.score,
                round: state.round_number,
            },
        );

        let mut panel = RoundPanel;
        panel.render(frame, chunks[1], RoundPanelProps { state });

        frame.render_widget(
            Paragraph::new(feedback_line(state)).alignment(Alignment::Center),
            chunks[2],
        );

        self.guess.render(
            frame,
            chunks[3],
            GuessInputProps {
                value: &state.input.text,
                candidates: &state.input.candidates,
                highlighted: state.input.highlighted,
                phase: state.phase(),
                is_focused: props.is_focused,
            },
        );

        let hints = status_hints(state.phase());
        let index_status = if state.name_index.is_loading() {
            "loading names..."
        } else if state.name_index.is_failed() {
            "no suggestions"
        } else {
            ""
        };
        let status_items = [StatusBarItem::span(Span::styled(
            index_status,
            Style::default().fg(TEXT_DIM),
        ))];
        <StatusBar as Component<Action>>::render(
            &mut self.status_bar,
            frame,
            chunks[4],
            StatusBarProps {
                left: StatusBarSection::empty(),
                center: StatusBarSection::hints(&hints).with_separator("  "),
                right: StatusBarSection::items(&status_items),
                style: StatusBarStyle::default(),
                is_focused: false,
            },
        );
    }
}

fn feedback_line(state: &AppState) -> Line<'static> {
    if state.show_error() {
        return Line::styled(
            "Nope! Try again.",
            Style::default().fg(ACCENT_RED).add_modifier(Modifier::BOLD),
        );
    }
    if let Some(creature) = state.revealed_creature() {
        let text = if state.show_victory() {
            format!("Correct! It's {}!", creature.display_name())
        } else {
            format!("It's {}! Press Enter for the next one.", creature.display_name())
        };
        return Line::styled(
            text,
            Style::default()
                .fg(ACCENT_TEAL)
                .add_modifier(Modifier::BOLD),
        );
    }
    match &state.message {
        Some(message) => Line::styled(message.clone(), Style::default().fg(ACCENT_GOLD)),
        None => Line::raw(""),
    }
}

fn status_hints(phase: RoundPhase) -> Vec<StatusBarHint<'static>> {
    match phase {
        RoundPhase::Guessed => vec![
            StatusBarHint::new("Enter", "next"),
            StatusBarHint::new("Esc", "quit"),
        ],
        RoundPhase::Failed => vec![
            StatusBarHint::new("Enter", "retry"),
            StatusBarHint::new("Esc", "quit"),
        ],
        _ => vec![
            StatusBarHint::new("Enter", "guess"),
            StatusBarHint::new("Tab", "complete"),
            StatusBarHint::new("↑↓", "select"),
            StatusBarHint::new("Space", "skip"),
            StatusBarHint::new("Esc", "quit"),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{BaseStats, Creature, CreatureType, Sprites};
    use crossterm::event::{KeyEvent, KeyModifiers};
    use tui_dispatch::testing::*;
    use tui_dispatch::DataResource;

    fn eevee() -> Creature {
        Creature {
            id: 133,
            name: "eevee".into(),
            localized_name: Some("Eevee".into()),
            sprites: Sprites {
                front: "https://img.test/133.png".into(),
                back: None,
                shiny: None,
            },
            stats: BaseStats::default(),
            types: vec![CreatureType::Normal],
            abilities: Vec::new(),
            height: 3,
            weight: 65,
        }
    }

    #[test]
    fn test_esc_quits() {
        let mut component = GameView::new();
        let state = AppState::default();
        let props = GameViewProps {
            state: &state,
            is_focused: true,
        };

        let actions: Vec<_> = component
            .handle_event(
                &EventKind::Key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)),
                props,
            )
            .into_iter()
            .collect();
        actions.assert_count(1);
        actions.assert_first(Action::Quit);
    }

    #[test]
    fn test_unfocused_ignores() {
        let mut component = GameView::new();
        let state = AppState::default();
        let props = GameViewProps {
            state: &state,
            is_focused: false,
        };

        let actions: Vec<_> = component
            .handle_event(&EventKind::Key(key("a")), props)
            .into_iter()
            .collect();
        actions.assert_empty();
    }

    #[test]
    fn test_feedback_shows_error_flash() {
        let state = AppState {
            round: DataResource::Loaded(eevee()),
            error_until: Some(12),
            ..Default::default()
        };
        let line = feedback_line(&state);
        assert_eq!(line.to_string(), "Nope! Try again.");
    }

    #[test]
    fn test_feedback_names_creature_after_guess() {
        let state = AppState {
            round: DataResource::Loaded(eevee()),
            guessed: true,
            stats_revealed: true,
            victory_until: Some(30),
            ..Default::default()
        };
        assert_eq!(feedback_line(&state).to_string(), "Correct! It's Eevee!");
    }

    #[test]
    fn test_render_failed_round_hints_retry() {
        let mut render = RenderHarness::new(100, 30);
        let mut component = GameView::new();
        let state = AppState {
            round: DataResource::Failed("timed out".into()),
            ..Default::default()
        };

        let output = render.render_to_string_plain(|frame| {
            let props = GameViewProps {
                state: &state,
                is_focused: true,
            };
            component.render(frame, frame.area(), props);
        });

        assert!(output.contains("retry"));
        assert!(!output.contains("skip"));
    }
}
