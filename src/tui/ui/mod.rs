//! UI module: View components for the TUI.

pub mod dashboard;
pub mod emergency;
pub mod home;
pub mod intake;
pub mod records;

use std::time::{Duration, Instant};

use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Tabs, Wrap},
    Frame,
};

use crate::tui::styles::{Theme, LOGO_SMALL};

/// How long a notification stays on screen.
pub const NOTIFICATION_TTL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Info,
    Alert,
    Error,
}

/// Transient message shown over the current screen.
#[derive(Debug, Clone)]
pub struct Notification {
    pub title: String,
    pub body: String,
    pub kind: NotificationKind,
    created: Instant,
}

impl Notification {
    pub fn new(kind: NotificationKind, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            kind,
            created: Instant::now(),
        }
    }

    #[must_use]
    pub fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.created) >= NOTIFICATION_TTL
    }
}

/// Navigation bar with one tab per screen.
pub fn render_tabs(f: &mut Frame, area: Rect, titles: &[&str], selected: usize) {
    let titles: Vec<Line> = titles
        .iter()
        .enumerate()
        .map(|(i, t)| Line::from(format!("F{} {t}", i + 1)))
        .collect();

    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .title(Span::styled(format!(" {LOGO_SMALL} "), Theme::header()))
                .borders(Borders::BOTTOM)
                .border_style(Theme::border()),
        )
        .style(Theme::text_secondary())
        .highlight_style(Theme::selected())
        .select(selected)
        .divider(Span::styled("│", Theme::text_muted()));

    f.render_widget(tabs, area);
}

/// Notification box in the top-right corner.
pub fn render_notification(f: &mut Frame, area: Rect, notification: &Notification) {
    let width = area.width.min(56);
    let height = 4.min(area.height);
    let rect = Rect {
        x: area.x + area.width.saturating_sub(width + 1),
        y: area.y + 1,
        width,
        height,
    };

    let style = match notification.kind {
        NotificationKind::Success => Theme::success(),
        NotificationKind::Info => Theme::info(),
        NotificationKind::Alert | NotificationKind::Error => Theme::danger(),
    };

    let block = Block::default()
        .title(Span::styled(format!(" {} ", notification.title), style))
        .borders(Borders::ALL)
        .border_style(style);

    let p = Paragraph::new(Span::styled(notification.body.clone(), Theme::text()))
        .block(block)
        .wrap(Wrap { trim: true });

    f.render_widget(Clear, rect);
    f.render_widget(p, rect);
}

pub fn render_disclaimer(f: &mut Frame, area: Rect) {
    let text = vec![
        Line::from(vec![
            Span::styled("[F1-F5] ", Theme::key_hint()),
            Span::styled("Switch screen  ", Theme::key_desc()),
            Span::styled("[Ctrl+Q] ", Theme::key_hint()),
            Span::styled("Quit", Theme::key_desc()),
        ]),
        Line::from(vec![Span::styled(
            "Not a medical device. In an emergency, call your local emergency number.",
            Theme::text_muted(),
        )]),
    ];

    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(Theme::border());

    let p = Paragraph::new(text)
        .block(block)
        .alignment(Alignment::Left)
        .wrap(Wrap { trim: true });

    f.render_widget(p, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notification_expiry() {
        let n = Notification::new(NotificationKind::Info, "API Key Saved", "");
        let now = Instant::now();
        assert!(!n.is_expired(now));
        assert!(n.is_expired(now + NOTIFICATION_TTL));
    }
}
