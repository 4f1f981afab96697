//! Home view: Hero banner, feature cards and contact footer.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::tui::styles::Theme;

pub const HEADLINE: &str = "AI-Powered Health Monitoring for Your Peace of Mind";

/// (title, blurb)
pub const FEATURES: [(&str, &str); 4] = [
    (
        "AI-Powered Analysis",
        "Advanced algorithms analyze your health data to provide personalized insights.",
    ),
    (
        "Smart Alerts",
        "Get notified instantly when your health metrics need attention.",
    ),
    (
        "Real-time Monitoring",
        "Track your vital signs and health metrics as they change.",
    ),
    (
        "Personalized Care",
        "Recommendations tailored to your unique health profile.",
    ),
];

pub const CONTACT_LINES: [&str; 3] = [
    "support@healthmonitree.com",
    "(555) 123-4567",
    "123 Health Street, Medical City",
];

pub const COPYRIGHT: &str = "© 2024 HealthMoniTree. All rights reserved.";

/// Render the home view.
pub fn render_home(f: &mut Frame, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7), // Hero
            Constraint::Min(6),    // Features
            Constraint::Length(6), // Footer
        ])
        .split(area);

    render_hero(f, chunks[0]);
    render_features(f, chunks[1]);
    render_footer(f, chunks[2]);
}

fn render_hero(f: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(HEADLINE, Theme::title())),
        Line::from(Span::styled(
            "Monitor your health, keep your records in one place and reach help fast.",
            Theme::text_secondary(),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("[Enter] ", Theme::key_hint()),
            Span::styled("Get Started   ", Theme::key_desc()),
            Span::styled("[F2] ", Theme::key_hint()),
            Span::styled("Emergency", Theme::key_desc()),
        ]),
    ];

    let hero = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Theme::border()),
        );
    f.render_widget(hero, area);
}

fn render_features(f: &mut Frame, area: Rect) {
    let cells = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(area);

    for ((title, blurb), cell) in FEATURES.iter().zip(cells.iter()) {
        let block = Block::default()
            .title(Span::styled(format!(" {title} "), Theme::subtitle()))
            .borders(Borders::ALL)
            .border_style(Theme::border());

        let p = Paragraph::new(Span::styled(*blurb, Theme::text()))
            .block(block)
            .wrap(Wrap { trim: true });
        f.render_widget(p, *cell);
    }
}

fn render_footer(f: &mut Frame, area: Rect) {
    let mut lines: Vec<Line> = vec![Line::from(Span::styled("Contact Us", Theme::subtitle()))];
    lines.extend(
        CONTACT_LINES
            .iter()
            .map(|l| Line::from(Span::styled(*l, Theme::text_secondary()))),
    );
    lines.push(Line::from(Span::styled(COPYRIGHT, Theme::text_muted())));

    let footer = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(Theme::border()),
    );
    f.render_widget(footer, area);
}
