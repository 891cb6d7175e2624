use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use tui_dispatch::DataResource;

use super::{type_color, Component, ACCENT_GOLD, ACCENT_RED, ACCENT_TEAL, TEXT_DIM, TEXT_MAIN};
use crate::action::Action;
use crate::sprite::SpriteArt;
use crate::state::{AppState, Creature};

const STAT_BAR_WIDTH: u16 = 20;
const STAT_MAX: u16 = 255;

/// Sprite on the left, creature details on the right.
pub struct RoundPanel;

pub struct RoundPanelProps<'a> {
    pub state: &'a AppState,
}

impl Component<Action> for RoundPanel {
    type Props<'a> = RoundPanelProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let state = props.state;
        let chunks = Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area);

        let sprite_block = Block::default()
            .borders(Borders::ALL)
            .style(Style::default().fg(TEXT_DIM));
        let sprite_area = sprite_block.inner(chunks[0]);
        frame.render_widget(sprite_block, chunks[0]);

        match &state.round {
            DataResource::Empty => placeholder(frame, sprite_area, "Starting..."),
            DataResource::Loading => placeholder(frame, sprite_area, "Loading next Pokemon..."),
            DataResource::Failed(error) => {
                let text = Text::from(vec![
                    Line::styled("Could not reach the Pokedex", Style::default().fg(ACCENT_RED)),
                    Line::styled(error.clone(), Style::default().fg(TEXT_DIM)),
                    Line::raw(""),
                    Line::styled("Press Enter to retry", Style::default().fg(ACCENT_GOLD)),
                ]);
                frame.render_widget(
                    Paragraph::new(text)
                        .alignment(Alignment::Center)
                        .wrap(Wrap { trim: true }),
                    sprite_area,
                );
            }
            DataResource::Loaded(_) => match &state.sprite {
                Some(sprite) => frame.render_widget(
                    SpriteArt {
                        sprite,
                        silhouette: state.config.silhouette && !state.guessed,
                    },
                    sprite_area,
                ),
                None if state.message.is_some() => placeholder(frame, sprite_area, "[no sprite]"),
                None => placeholder(frame, sprite_area, "[loading sprite]"),
            },
        }

        let details = details_text(state);
        let details_block = Block::default()
            .borders(Borders::ALL)
            .title("DETAILS")
            .style(Style::default().fg(TEXT_MAIN));
        frame.render_widget(
            Paragraph::new(details)
                .block(details_block)
                .wrap(Wrap { trim: true }),
            chunks[1],
        );
    }
}

fn placeholder(frame: &mut Frame, area: Rect, content: &str) {
    let rows = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(1),
        Constraint::Fill(1),
    ])
    .split(area);
    frame.render_widget(
        Paragraph::new(content.to_string())
            .alignment(Alignment::Center)
            .style(Style::default().fg(TEXT_DIM)),
        rows[1],
    );
}

fn details_text(state: &AppState) -> Text<'static> {
    let Some(creature) = state.creature() else {
        return Text::from(Line::styled("No Pokemon yet.", Style::default().fg(TEXT_DIM)));
    };
    let mut lines = vec![title_line(state, creature), types_line(creature)];

    let Some(creature) = state.revealed_creature() else {
        lines.push(Line::raw(""));
        lines.push(Line::styled(
            "Stats are revealed once you guess.",
            Style::default().fg(TEXT_DIM),
        ));
        return Text::from(lines);
    };

    lines.push(Line::from(vec![
        Span::styled("Height ", Style::default().fg(TEXT_DIM)),
        Span::raw(format!("{:.1} m", creature.height as f32 / 10.0)),
        Span::styled("   Weight ", Style::default().fg(TEXT_DIM)),
        Span::raw(format!("{:.1} kg", creature.weight as f32 / 10.0)),
    ]));
    if !creature.abilities.is_empty() {
        let abilities = creature
            .abilities
            .iter()
            .map(|ability| {
                if ability.hidden {
                    format!("{} (hidden)", ability.name)
                } else {
                    ability.name.clone()
                }
            })
            .collect::<Vec<_>>()
            .join(", ");
        lines.push(Line::from(vec![
            Span::styled("Abilities ", Style::default().fg(TEXT_DIM)),
            Span::raw(abilities),
        ]));
    }
    lines.push(Line::raw(""));
    lines.extend(
        creature
            .stats
            .entries()
            .into_iter()
            .map(|(kind, value)| stat_line(kind.label(), value)),
    );
    lines.push(Line::from(vec![
        Span::styled(format!("{:<7}", "Total"), Style::default().fg(TEXT_DIM)),
        Span::styled(
            format!("{:>4}", creature.stats.total()),
            Style::default().add_modifier(Modifier::BOLD),
        ),
    ]));
    Text::from(lines)
}

fn title_line(state: &AppState, creature: &Creature) -> Line<'static> {
    if state.stats_revealed {
        Line::from(vec![
            Span::styled(format!("#{:03} ", creature.id), Style::default().fg(TEXT_DIM)),
            Span::styled(
                creature.display_name().to_string(),
                Style::default()
                    .fg(ACCENT_TEAL)
                    .add_modifier(Modifier::BOLD),
            ),
        ])
    } else {
        Line::from(vec![
            Span::styled("#??? ", Style::default().fg(TEXT_DIM)),
            Span::styled("???", Style::default().fg(ACCENT_GOLD)),
        ])
    }
}

fn types_line(creature: &Creature) -> Line<'static> {
    let mut spans = Vec::with_capacity(creature.types.len() * 2);
    for (idx, kind) in creature.types.iter().enumerate() {
        if idx > 0 {
            spans.push(Span::raw(" "));
        }
        spans.push(Span::styled(
            format!("[{}]", kind.name()),
            Style::default().fg(type_color(*kind)),
        ));
    }
    Line::from(spans)
}

fn stat_line(label: &str, value: u8) -> Line<'static> {
    let filled = (value as u16 * STAT_BAR_WIDTH).div_ceil(STAT_MAX) as usize;
    let empty = STAT_BAR_WIDTH as usize - filled;
    let color = match value {
        0..=59 => ACCENT_RED,
        60..=99 => ACCENT_GOLD,
        _ => ACCENT_TEAL,
    };
    Line::from(vec![
        Span::styled(format!("{label:<7}"), Style::default().fg(TEXT_DIM)),
        Span::raw(format!("{value:>4} ")),
        Span::styled("█".repeat(filled), Style::default().fg(color)),
        Span::styled("░".repeat(empty), Style::default().fg(TEXT_DIM)),
    ])
}
