//! Theme and styling definitions for the biaslens TUI.

use biaslens_engine::BiasLabel;
use ratatui::style::{Color, Modifier, Style};

/// Color palette for the TUI.
pub struct Palette;

impl Palette {
    // Base colors
    pub const BG: Color = Color::Rgb(28, 30, 36);
    pub const FG: Color = Color::Rgb(222, 222, 228);
    pub const DIM: Color = Color::Rgb(135, 140, 155);

    // Accent colors
    pub const ACCENT: Color = Color::Rgb(120, 180, 250);

    // Status bar colors (high contrast)
    pub const STATUS_BG: Color = Color::Rgb(44, 48, 60);

    // Verdict colors
    pub const BIASED: Color = Color::Rgb(240, 110, 110);
    pub const UNBIASED: Color = Color::Rgb(130, 215, 140);
    pub const UNKNOWN: Color = Color::Rgb(235, 200, 110);

    // Border colors
    pub const BORDER: Color = Color::Rgb(80, 84, 100);
    pub const BORDER_ACTIVE: Color = Color::Rgb(120, 180, 250);

    pub const ERROR: Color = Color::Rgb(240, 110, 110);
}

/// Status indicator symbols (ASCII, terminal-safe).
pub struct Symbols;

impl Symbols {
    pub const OK: &'static str = "[ok]";
    pub const WARN: &'static str = "[!]";
    pub const UNKNOWN: &'static str = "[?]";
    pub const SPINNER: [&'static str; 4] = ["|", "/", "-", "\\"];
}

impl Symbols {
    /// Icon shown next to an evaluation verdict.
    pub fn verdict_icon(label: BiasLabel) -> &'static str {
        match label {
            BiasLabel::Biased => Self::WARN,
            BiasLabel::Unbiased => Self::OK,
            BiasLabel::Unknown => Self::UNKNOWN,
        }
    }
}

/// Common styles used throughout the TUI.
pub struct Styles;

impl Styles {
    /// Default text style.
    pub fn default() -> Style {
        Style::default().fg(Palette::FG)
    }

    /// Dimmed text for secondary information.
    pub fn dim() -> Style {
        Style::default().fg(Palette::DIM)
    }

    /// Active/focused element.
    pub fn active() -> Style {
        Style::default().fg(Palette::ACCENT)
    }

    /// Inline error message.
    pub fn error() -> Style {
        Style::default().fg(Palette::ERROR)
    }

    /// Panel border.
    pub fn border() -> Style {
        Style::default().fg(Palette::BORDER)
    }

    /// Focused panel border.
    pub fn border_active() -> Style {
        Style::default().fg(Palette::BORDER_ACTIVE)
    }

    /// Status bar background.
    pub fn status_bar() -> Style {
        Style::default().fg(Palette::FG).bg(Palette::STATUS_BG)
    }

    /// Badge style for an evaluation verdict, keyed by label.
    pub fn badge(label: BiasLabel) -> Style {
        let color = match label {
            BiasLabel::Biased => Palette::BIASED,
            BiasLabel::Unbiased => Palette::UNBIASED,
            BiasLabel::Unknown => Palette::UNKNOWN,
        };
        Style::default().fg(color).add_modifier(Modifier::BOLD)
    }
}
