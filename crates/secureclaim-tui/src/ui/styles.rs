use ratatui::style::{Color, Modifier, Style};

use crate::dashboard::Tone;

// Color palette
pub const PRIMARY: Color = Color::Rgb(40, 96, 176);
pub const ACCENT: Color = Color::Rgb(32, 168, 160);
pub const WARNING: Color = Color::Rgb(216, 160, 48);
pub const SUCCESS: Color = Color::Rgb(80, 168, 96);
pub const ERROR: Color = Color::Rgb(192, 64, 64);
pub const MUTED: Color = Color::Rgb(128, 128, 128);
pub const HIGHLIGHT: Color = Color::Rgb(40, 48, 72);

pub fn title_style() -> Style {
    Style::default().fg(PRIMARY).add_modifier(Modifier::BOLD)
}

pub fn selected_style() -> Style {
    Style::default().bg(HIGHLIGHT).add_modifier(Modifier::BOLD)
}

pub fn text_style() -> Style {
    Style::default().fg(Color::White)
}

pub fn muted_style() -> Style {
    Style::default().fg(MUTED)
}

pub fn error_style() -> Style {
    Style::default().fg(ERROR)
}

pub fn success_style() -> Style {
    Style::default().fg(SUCCESS)
}

pub fn featured_style() -> Style {
    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
}

pub fn border_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(PRIMARY)
    } else {
        Style::default().fg(MUTED)
    }
}

pub fn status_bar_style() -> Style {
    Style::default().bg(Color::Rgb(32, 32, 40)).fg(Color::White)
}

pub fn help_key_style() -> Style {
    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
}

pub fn tone_style(tone: Tone) -> Style {
    let color = match tone {
        Tone::Accent => ACCENT,
        Tone::Warning => WARNING,
        Tone::Success => SUCCESS,
        Tone::Primary => PRIMARY,
    };
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}
