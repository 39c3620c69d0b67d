//! Centralized theme module for TUI color constants and styles

use ratatui::prelude::*;

/// The two presentation themes. The active one is a saved preference,
/// falling back to terminal background detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

impl Theme {
    pub fn name(&self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    pub fn toggled(&self) -> Theme {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn colors(&self) -> ThemeColors {
        match self {
            Theme::Dark => ThemeColors::dark(),
            Theme::Light => ThemeColors::light(),
        }
    }
}

/// Resolve the active theme from the saved preference. With no saved
/// preference, probe the terminal background (the terminal-side analog of a
/// prefers-color-scheme query); unknowable backgrounds default to dark.
pub fn resolve_theme(saved: Option<&str>) -> Theme {
    match saved {
        Some("light") => Theme::Light,
        Some("dark") => Theme::Dark,
        _ => match terminal_light::luma() {
            Ok(luma) if luma > 0.6 => Theme::Light,
            _ => Theme::Dark,
        },
    }
}

/// Complete color palette for the TUI
#[derive(Debug, Clone)]
pub struct ThemeColors {
    // Card status colors
    pub correct: Color,
    pub wrong: Color,
    pub missed: Color,

    // Progress gauge
    pub gauge_filled: Color,
    pub gauge_empty: Color,

    // General colors
    pub muted: Color,
    pub title_color: Color,
    pub text: Color,

    // Styles
    pub header_style: Style,
    pub row_selected: Style,
    pub selected_choice: Style,

    // Status bar
    pub status_bar_bg: Color,
    pub status_key_color: Color,
    pub flash_success: Color,
    pub flash_error: Color,

    // Popup overlay
    pub popup_border: Color,
    pub popup_title: Style,

    // Tier message colors
    pub tier_good: Color,
    pub tier_ok: Color,
    pub tier_bad: Color,

    // Confetti palette
    pub confetti: [Color; 7],
}

impl ThemeColors {
    pub fn dark() -> Self {
        Self {
            correct: Color::Green,
            wrong: Color::Red,
            missed: Color::Yellow,
            gauge_filled: Color::Cyan,
            gauge_empty: Color::DarkGray,
            muted: Color::Gray,
            title_color: Color::Cyan,
            text: Color::White,
            header_style: Style::new().bold(),
            row_selected: Style::new().reversed(),
            selected_choice: Style::new().fg(Color::Cyan).bold(),
            status_bar_bg: Color::Indexed(236),
            status_key_color: Color::Cyan,
            flash_success: Color::Green,
            flash_error: Color::Red,
            popup_border: Color::Cyan,
            popup_title: Style::new().fg(Color::Cyan).bold(),
            tier_good: Color::Green,
            tier_ok: Color::Yellow,
            tier_bad: Color::Red,
            confetti: [
                Color::Rgb(0xf8, 0x71, 0x71),
                Color::Rgb(0xfb, 0x92, 0x3c),
                Color::Rgb(0x34, 0xd3, 0x99),
                Color::Rgb(0x60, 0xa5, 0xfa),
                Color::Rgb(0xc0, 0x84, 0xfc),
                Color::Rgb(0xfb, 0xbf, 0x24),
                Color::Rgb(0xf4, 0x72, 0xb6),
            ],
        }
    }

    pub fn light() -> Self {
        Self {
            correct: Color::Indexed(28),
            wrong: Color::Indexed(124),
            missed: Color::Indexed(130),
            gauge_filled: Color::Blue,
            gauge_empty: Color::Indexed(252),
            muted: Color::DarkGray,
            title_color: Color::Blue,
            text: Color::Black,
            header_style: Style::new().bold(),
            row_selected: Style::new().reversed(),
            selected_choice: Style::new().fg(Color::Blue).bold(),
            status_bar_bg: Color::Indexed(254),
            status_key_color: Color::Blue,
            flash_success: Color::Indexed(28),
            flash_error: Color::Indexed(124),
            popup_border: Color::Blue,
            popup_title: Style::new().fg(Color::Blue).bold(),
            tier_good: Color::Indexed(28),
            tier_ok: Color::Indexed(130),
            tier_bad: Color::Indexed(124),
            confetti: [
                Color::Rgb(0xdc, 0x26, 0x26),
                Color::Rgb(0xea, 0x58, 0x0c),
                Color::Rgb(0x05, 0x96, 0x69),
                Color::Rgb(0x25, 0x63, 0xeb),
                Color::Rgb(0x93, 0x33, 0xea),
                Color::Rgb(0xd9, 0x77, 0x06),
                Color::Rgb(0xdb, 0x27, 0x77),
            ],
        }
    }

    /// Color for a card's graded status tag
    pub fn status_color(&self, status: crate::quiz::CardStatus) -> Color {
        match status {
            crate::quiz::CardStatus::Correct => self.correct,
            crate::quiz::CardStatus::Wrong => self.wrong,
            crate::quiz::CardStatus::Unanswered => self.missed,
        }
    }

    pub fn tier_color(&self, tier: crate::grading::PerformanceTier) -> Color {
        match tier {
            crate::grading::PerformanceTier::Good => self.tier_good,
            crate::grading::PerformanceTier::Ok => self.tier_ok,
            crate::grading::PerformanceTier::Bad => self.tier_bad,
        }
    }
}
