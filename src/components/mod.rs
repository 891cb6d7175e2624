pub mod game_view;
pub mod guess_input;
pub mod round_panel;
pub mod score_header;

// Re-export core Component trait
pub use tui_dispatch::Component;

pub use game_view::{GameView, GameViewProps};
pub use guess_input::{GuessInput, GuessInputProps};
pub use round_panel::{RoundPanel, RoundPanelProps};
pub use score_header::{ScoreHeader, ScoreHeaderProps};

use ratatui::style::Color;

use crate::state::CreatureType;

pub(crate) const TEXT_MAIN: Color = Color::Rgb(232, 242, 244);
pub(crate) const TEXT_DIM: Color = Color::Rgb(176, 195, 207);
pub(crate) const ACCENT_TEAL: Color = Color::Rgb(72, 204, 184);
pub(crate) const ACCENT_GOLD: Color = Color::Rgb(228, 176, 88);
pub(crate) const ACCENT_RED: Color = Color::Rgb(230, 90, 90);
pub(crate) const BG_PANEL: Color = Color::Rgb(20, 32, 46);

pub(crate) fn type_color(kind: CreatureType) -> Color {
    match kind {
        CreatureType::Normal => Color::Rgb(168, 168, 120),
        CreatureType::Fire => Color::Rgb(240, 128, 48),
        CreatureType::Water => Color::Rgb(104, 144, 240),
        CreatureType::Electric => Color::Rgb(248, 208, 48),
        CreatureType::Grass => Color::Rgb(120, 200, 80),
        CreatureType::Ice => Color::Rgb(152, 216, 216),
        CreatureType::Fighting => Color::Rgb(192, 48, 40),
        CreatureType::Poison => Color::Rgb(160, 64, 160),
        CreatureType::Ground => Color::Rgb(224, 192, 104),
        CreatureType::Flying => Color::Rgb(168, 144, 240),
        CreatureType::Psychic => Color::Rgb(248, 88, 136),
        CreatureType::Bug => Color::Rgb(168, 184, 32),
        CreatureType::Rock => Color::Rgb(184, 160, 56),
        CreatureType::Ghost => Color::Rgb(112, 88, 152),
        CreatureType::Dragon => Color::Rgb(112, 56, 248),
        CreatureType::Dark => Color::Rgb(112, 88, 72),
        CreatureType::Steel => Color::Rgb(184, 184, 208),
        CreatureType::Fairy => Color::Rgb(238, 153, 172),
    }
}
