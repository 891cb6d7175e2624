use crossterm::event::{KeyCode, KeyEventKind};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tui_dispatch::EventKind;
use tui_dispatch_components::{
    highlight_substring, BaseStyle, Padding, TextInput, TextInputProps, TextInputStyle,
};

use super::{Component, ACCENT_GOLD, ACCENT_TEAL, TEXT_DIM, TEXT_MAIN};
use crate::action::Action;
use crate::state::RoundPhase;

/// Rows of suggestions visible below the input.
pub const MAX_VISIBLE_SUGGESTIONS: usize = 6;

const BG_INPUT: Color = Color::Rgb(50, 50, 60);
const BG_HIGHLIGHT: Color = Color::Rgb(28, 92, 110);

/// Guess text box with the autocomplete list underneath.
pub struct GuessInput {
    input: TextInput,
}

impl Default for GuessInput {
    fn default() -> Self {
        Self {
            input: TextInput::new(),
        }
    }
}

pub struct GuessInputProps<'a> {
    pub value: &'a str,
    pub candidates: &'a [String],
    pub highlighted: Option<usize>,
    pub phase: RoundPhase,
    pub is_focused: bool,
}

impl GuessInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// The cursor lives inside `TextInput`; start over whenever the guess is
    /// cleared by the store.
    fn sync(&mut self, value: &str) {
        if value.is_empty() {
            self.input = TextInput::new();
        }
    }

    fn input_style() -> TextInputStyle {
        TextInputStyle {
            base: BaseStyle {
                border: None,
                padding: Padding::xy(1, 1),
                bg: Some(BG_INPUT),
                fg: Some(TEXT_MAIN),
            },
            placeholder_style: Some(Style::default().fg(TEXT_DIM)),
            cursor_style: None,
        }
    }
}

fn placeholder(phase: RoundPhase) -> &'static str {
    match phase {
        RoundPhase::Guessed => "Press Enter for the next Pokemon",
        RoundPhase::Failed => "Press Enter to retry",
        RoundPhase::Idle | RoundPhase::Loading => "Loading...",
        RoundPhase::Loaded => "Who's that Pokemon?",
    }
}

/// First row to show so the highlight stays on screen.
fn scroll_offset(highlighted: Option<usize>, len: usize) -> usize {
    match highlighted {
        Some(idx) if idx >= MAX_VISIBLE_SUGGESTIONS => {
            (idx + 1 - MAX_VISIBLE_SUGGESTIONS).min(len.saturating_sub(MAX_VISIBLE_SUGGESTIONS))
        }
        _ => 0,
    }
}

impl Component<Action> for GuessInput {
    type Props<'a> = GuessInputProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return Vec::new();
        }
        let EventKind::Key(key) = event else {
            return Vec::new();
        };
        if key.kind != KeyEventKind::Press {
            return Vec::new();
        }

        match key.code {
            KeyCode::Enter => return vec![Action::GuessSubmit],
            KeyCode::Char(' ') => {
                if props.phase == RoundPhase::Guessed {
                    return Vec::new();
                }
                return vec![Action::RoundSkip];
            }
            KeyCode::Up | KeyCode::Down => {
                if props.candidates.is_empty() {
                    return Vec::new();
                }
                let delta = if key.code == KeyCode::Up { -1 } else { 1 };
                return vec![Action::SuggestionMove(delta)];
            }
            KeyCode::Tab => {
                if props.candidates.is_empty() {
                    return Vec::new();
                }
                return vec![Action::SuggestionPick(props.highlighted.unwrap_or(0))];
            }
            _ => {}
        }

        // Typing is locked once the round is won
        if props.phase == RoundPhase::Guessed {
            return Vec::new();
        }
        self.sync(props.value);
        let input_props = TextInputProps {
            value: props.value,
            placeholder: placeholder(props.phase),
            is_focused: true,
            style: Self::input_style(),
            on_change: Action::GuessInputChange,
            on_submit: |_| Action::GuessSubmit,
            on_cursor_move: Some(|_| Action::Render),
        };
        self.input
            .handle_event(event, input_props)
            .into_iter()
            .collect()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let chunks = Layout::vertical([Constraint::Length(3), Constraint::Min(0)]).split(area);

        self.sync(props.value);
        let input_props = TextInputProps {
            value: props.value,
            placeholder: placeholder(props.phase),
            is_focused: props.is_focused && props.phase != RoundPhase::Guessed,
            style: Self::input_style(),
            on_change: Action::GuessInputChange,
            on_submit: |_| Action::GuessSubmit,
            on_cursor_move: Some(|_| Action::Render),
        };
        self.input.render(frame, chunks[0], input_props);

        if props.candidates.is_empty() || chunks[1].height == 0 {
            return;
        }

        let query = props.value.trim();
        let base = Style::default().fg(TEXT_MAIN);
        let matched = Style::default()
            .fg(ACCENT_GOLD)
            .add_modifier(Modifier::BOLD);
        let offset = scroll_offset(props.highlighted, props.candidates.len());
        let lines = props
            .candidates
            .iter()
            .enumerate()
            .skip(offset)
            .take(MAX_VISIBLE_SUGGESTIONS)
            .map(|(idx, name)| {
                let line = highlight_substring(name, query, base, matched);
                if props.highlighted == Some(idx) {
                    line.style(Style::default().bg(BG_HIGHLIGHT))
                } else {
                    line
                }
            })
            .collect::<Vec<_>>();

        let title = format!("{} matches", props.candidates.len());
        let block = Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(Style::default().fg(ACCENT_TEAL));
        frame.render_widget(Paragraph::new(lines).block(block), chunks[1]);
    }
}
