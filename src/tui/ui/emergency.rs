//! Emergency view: SOS action, fixed contacts, map and map-key settings.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Color,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Map, MapResolution, Points},
        Block, Borders, Paragraph, Wrap,
    },
    Frame,
};
use zeroize::Zeroize;

use crate::config::MapConfig;
use crate::tui::styles::Theme;

/// (service, number)
pub const EMERGENCY_CONTACTS: [(&str, &str); 3] = [
    ("Ambulance", "911"),
    ("Mental Health Helpline", "988"),
    ("Poison Control", "1-800-222-1222"),
];

pub const WHATSAPP_SOS_LINK: &str = "https://wa.me/911";

pub const SOS_TITLE: &str = "Emergency Alert Sent";
pub const SOS_BODY: &str = "Emergency services have been notified of your location.";

/// Emergency screen state: the map-key settings form.
#[derive(Default)]
pub struct EmergencyState {
    pub key_input: String,
    pub editing: bool,
}

impl EmergencyState {
    pub fn input_char(&mut self, c: char) {
        if !c.is_control() {
            self.key_input.push(c);
        }
    }

    pub fn delete_char(&mut self) {
        self.key_input.pop();
    }

    /// Move the typed key out, leaving an empty buffer. The caller wipes it.
    pub fn take_key(&mut self) -> String {
        self.editing = false;
        std::mem::take(&mut self.key_input)
    }

    pub fn cancel(&mut self) {
        self.key_input.zeroize();
        self.editing = false;
    }
}

/// Half-width in degrees of the visible map at a zoom level.
fn half_span(zoom: f64) -> f64 {
    180.0 / 2f64.powf(zoom.max(0.0) - 1.0).max(1.0)
}

/// Render the emergency view.
pub fn render_emergency(f: &mut Frame, area: Rect, state: &EmergencyState, map: &MapConfig) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(area);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // SOS
            Constraint::Length(7), // Contacts
            Constraint::Min(3),    // WhatsApp
        ])
        .split(columns[0]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(8), Constraint::Length(5)])
        .split(columns[1]);

    render_sos(f, left[0]);
    render_contacts(f, left[1]);
    render_whatsapp(f, left[2]);
    render_map(f, right[0], map);
    render_settings(f, right[1], state, map);
}

fn render_sos(f: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(Span::styled("   SOS   ", Theme::alarm())),
        Line::from(vec![
            Span::styled("[F10] ", Theme::key_hint()),
            Span::styled("Send emergency alert", Theme::key_desc()),
        ]),
    ];

    let p = Paragraph::new(lines).block(
        Block::default()
            .title(Span::styled(" Emergency SOS ", Theme::danger()))
            .borders(Borders::ALL)
            .border_style(Theme::danger()),
    );
    f.render_widget(p, area);
}

fn render_contacts(f: &mut Frame, area: Rect) {
    let lines: Vec<Line> = EMERGENCY_CONTACTS
        .iter()
        .map(|(service, number)| {
            Line::from(vec![
                Span::styled(format!(" {service:<24}"), Theme::text()),
                Span::styled(*number, Theme::focused()),
            ])
        })
        .collect();

    let p = Paragraph::new(lines).block(
        Block::default()
            .title(Span::styled(" Emergency Contacts ", Theme::subtitle()))
            .borders(Borders::ALL)
            .border_style(Theme::border()),
    );
    f.render_widget(p, area);
}

fn render_whatsapp(f: &mut Frame, area: Rect) {
    let p = Paragraph::new(vec![
        Line::from(Span::styled(" WhatsApp SOS", Theme::success())),
        Line::from(Span::styled(format!(" {WHATSAPP_SOS_LINK}"), Theme::info())),
    ])
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Theme::border()),
    )
    .wrap(Wrap { trim: false });
    f.render_widget(p, area);
}

fn render_map(f: &mut Frame, area: Rect, map: &MapConfig) {
    let title = format!(" Location │ {} z{} ", map.style, map.zoom);
    let block = Block::default()
        .title(Span::styled(title, Theme::subtitle()))
        .borders(Borders::ALL)
        .border_style(Theme::border());

    if !map.is_enabled() {
        let hint = Paragraph::new(Span::styled(
            " Map unavailable. Add a map API key below.",
            Theme::text_muted(),
        ))
        .block(block);
        f.render_widget(hint, area);
        return;
    }

    let (lon, lat) = map.center;
    let span = half_span(map.zoom);
    let canvas = Canvas::default()
        .block(block)
        .x_bounds([lon - span, lon + span])
        .y_bounds([lat - span / 2.0, lat + span / 2.0])
        .paint(move |ctx| {
            ctx.draw(&Map {
                color: Color::DarkGray,
                resolution: MapResolution::High,
            });
            ctx.layer();
            ctx.draw(&Points {
                coords: &[(lon, lat)],
                color: Theme::DANGER,
            });
        });
    f.render_widget(canvas, area);
}

fn render_settings(f: &mut Frame, area: Rect, state: &EmergencyState, map: &MapConfig) {
    let (border, value) = if state.editing {
        (
            Theme::border_focused(),
            Line::from(vec![
                Span::styled(format!(" {}", "•".repeat(state.key_input.chars().count())), Theme::text()),
                Span::styled("▌", Theme::cursor()),
            ]),
        )
    } else {
        let status = if map.is_enabled() {
            Span::styled(" Key configured", Theme::success())
        } else {
            Span::styled(" No key configured", Theme::text_muted())
        };
        (Theme::border(), Line::from(status))
    };

    let hints = if state.editing {
        Line::from(vec![
            Span::styled(" [Enter] ", Theme::key_hint()),
            Span::styled("Save Key ", Theme::key_desc()),
            Span::styled("[Esc] ", Theme::key_hint()),
            Span::styled("Cancel", Theme::key_desc()),
        ])
    } else {
        Line::from(vec![
            Span::styled(" [Enter] ", Theme::key_hint()),
            Span::styled("Edit API key", Theme::key_desc()),
        ])
    };

    let p = Paragraph::new(vec![value, hints]).block(
        Block::default()
            .title(Span::styled(" Map API Key ", Theme::subtitle()))
            .borders(Borders::ALL)
            .border_style(border),
    );
    f.render_widget(p, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_key_clears_buffer() {
        let mut state = EmergencyState {
            editing: true,
            ..Default::default()
        };
        for c in "pk.abc".chars() {
            state.input_char(c);
        }
        state.input_char('\n');
        let buffer = state.key_input.as_ptr();
        let key = state.take_key();
        assert_eq!(key, "pk.abc");
        assert_eq!(key.as_ptr(), buffer);
        assert!(state.key_input.is_empty());
        assert!(!state.editing);
    }

    #[test]
    fn test_half_span_shrinks_with_zoom() {
        assert!(half_span(9.0) < half_span(3.0));
        assert!((half_span(0.0) - 180.0).abs() < f64::EPSILON);
    }
}
