use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::{Component, ACCENT_GOLD, ACCENT_TEAL, BG_PANEL, TEXT_DIM, TEXT_MAIN};
use crate::action::Action;
use crate::state::ScoreState;

/// Title bar with the running score and streak.
pub struct ScoreHeader;

pub struct ScoreHeaderProps<'a> {
    pub score: &'a ScoreState,
    pub round: u32,
}

impl Component<Action> for ScoreHeader {
    type Props<'a> = ScoreHeaderProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let line = Line::from(vec![
            Span::raw("Round "),
            Span::styled(props.round.to_string(), Style::default().fg(TEXT_MAIN)),
            Span::raw("   Score: "),
            Span::styled(
                props.score.score.to_string(),
                Style::default()
                    .fg(ACCENT_GOLD)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("   Streak: "),
            Span::styled(
                props.score.streak.to_string(),
                Style::default().fg(ACCENT_TEAL),
            ),
        ]);

        let block = Block::default()
            .borders(Borders::ALL)
            .style(Style::default().bg(BG_PANEL).fg(TEXT_DIM))
            .title(Span::styled(
                " WHO'S THAT POKEMON? ",
                Style::default().fg(TEXT_MAIN).add_modifier(Modifier::BOLD),
            ));
        frame.render_widget(
            Paragraph::new(line)
                .alignment(Alignment::Center)
                .block(block),
            area,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tui_dispatch::testing::*;

    #[test]
    fn test_render_score_and_streak() {
        let mut render = RenderHarness::new(50, 3);
        let mut header = ScoreHeader;
        let score = ScoreState {
            score: 350,
            streak: 4,
        };

        let output = render.render_to_string_plain(|frame| {
            let props = ScoreHeaderProps {
                score: &score,
                round: 7,
            };
            header.render(frame, frame.area(), props);
        });

        assert!(output.contains("Score: 350"));
        assert!(output.contains("Streak: 4"));
        assert!(output.contains("Round 7"));
    }
}
