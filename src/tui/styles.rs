//! Health-themed color palette and styles.
//!
//! Teal primary with slate surfaces; semantic colors match the BMI and
//! vital-status badges.

use ratatui::style::{Color, Modifier, Style};

use crate::domain::{BmiCategory, VitalStatus};

/// Application theme.
pub struct Theme;

impl Theme {
    // === Primary Colors ===

    /// Brand teal
    pub const PRIMARY: Color = Color::Rgb(15, 181, 174); // #0FB5AE

    /// Lighter teal for highlights
    pub const PRIMARY_LIGHT: Color = Color::Rgb(94, 234, 212); // #5EEAD4

    /// Darker teal for the tab bar
    pub const PRIMARY_DARK: Color = Color::Rgb(17, 94, 89); // #115E59

    /// Light slate for borders
    pub const SECONDARY_LIGHT: Color = Color::Rgb(148, 163, 184); // #94A3B8

    // === Semantic Colors ===

    pub const SUCCESS: Color = Color::Rgb(16, 185, 129); // #10B981
    pub const WARNING: Color = Color::Rgb(251, 191, 36); // #FBBF24
    pub const DANGER: Color = Color::Rgb(239, 68, 68); // #EF4444
    pub const INFO: Color = Color::Rgb(59, 130, 246); // #3B82F6

    // === Background / Text ===

    pub const BG_DARK: Color = Color::Rgb(15, 23, 42); // #0F172A
    pub const TEXT_PRIMARY: Color = Color::Rgb(248, 250, 252); // #F8FAFC
    pub const TEXT_SECONDARY: Color = Color::Rgb(148, 163, 184); // #94A3B8
    pub const TEXT_MUTED: Color = Color::Rgb(100, 116, 139); // #64748B

    // === Preset Styles ===

    #[must_use]
    pub fn title() -> Style {
        Style::default()
            .fg(Self::TEXT_PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn subtitle() -> Style {
        Style::default()
            .fg(Self::PRIMARY_LIGHT)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn text() -> Style {
        Style::default().fg(Self::TEXT_PRIMARY)
    }

    #[must_use]
    pub fn text_secondary() -> Style {
        Style::default().fg(Self::TEXT_SECONDARY)
    }

    #[must_use]
    pub fn text_muted() -> Style {
        Style::default().fg(Self::TEXT_MUTED)
    }

    #[must_use]
    pub fn success() -> Style {
        Style::default().fg(Self::SUCCESS)
    }

    #[must_use]
    pub fn warning() -> Style {
        Style::default().fg(Self::WARNING)
    }

    #[must_use]
    pub fn danger() -> Style {
        Style::default().fg(Self::DANGER)
    }

    #[must_use]
    pub fn info() -> Style {
        Style::default().fg(Self::INFO)
    }

    /// Style for the SOS button
    #[must_use]
    pub fn alarm() -> Style {
        Style::default()
            .fg(Self::TEXT_PRIMARY)
            .bg(Self::DANGER)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for selected list rows and the active tab
    #[must_use]
    pub fn selected() -> Style {
        Style::default()
            .fg(Self::BG_DARK)
            .bg(Self::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn focused() -> Style {
        Style::default()
            .fg(Self::PRIMARY_LIGHT)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn border() -> Style {
        Style::default().fg(Self::SECONDARY_LIGHT)
    }

    #[must_use]
    pub fn border_focused() -> Style {
        Style::default().fg(Self::PRIMARY)
    }

    /// Text cursor in the focused input
    #[must_use]
    pub fn cursor() -> Style {
        Style::default()
            .fg(Self::PRIMARY_LIGHT)
            .add_modifier(Modifier::SLOW_BLINK)
    }

    #[must_use]
    pub fn header() -> Style {
        Style::default()
            .fg(Self::TEXT_PRIMARY)
            .bg(Self::PRIMARY_DARK)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn key_hint() -> Style {
        Style::default()
            .fg(Self::PRIMARY_LIGHT)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn key_desc() -> Style {
        Style::default().fg(Self::TEXT_SECONDARY)
    }

    #[must_use]
    pub fn chart_line() -> Style {
        Style::default().fg(Self::PRIMARY)
    }

    /// Color for a BMI category label
    #[must_use]
    pub fn bmi_category(category: BmiCategory) -> Style {
        let (r, g, b) = category.color();
        Style::default()
            .fg(Color::Rgb(r, g, b))
            .add_modifier(Modifier::BOLD)
    }

    /// Badge color on a vital card
    #[must_use]
    pub fn vital_status(status: VitalStatus) -> Style {
        match status {
            VitalStatus::Normal => Self::success(),
            VitalStatus::High => Self::danger(),
        }
    }
}

/// Tab-bar logo
pub const LOGO_SMALL: &str = "HealthMoniTree";
