//! Dashboard view: Patient summary, vital cards and BMI trend.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph},
    Frame,
};

use crate::application::DashboardModel;
use crate::domain::{DerivedMetrics, PatientProfile, VitalReading};
use crate::tui::styles::Theme;

/// Render the dashboard view.
pub fn render_dashboard(f: &mut Frame, area: Rect, model: &DashboardModel) {
    let Some(profile) = model.profile() else {
        render_empty(f, area);
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),  // Patient header
            Constraint::Length(10), // Vital cards
            Constraint::Min(8),     // BMI trend
        ])
        .split(area);

    render_patient_header(f, chunks[0], profile, model.display_id());
    render_vitals(f, chunks[1], &model.vitals());
    render_bmi(f, chunks[2], model);
}

fn render_empty(f: &mut Frame, area: Rect) {
    let block = Block::default()
        .title(Span::styled(" Health Dashboard ", Theme::subtitle()))
        .borders(Borders::ALL)
        .border_style(Theme::border());

    let msg = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            "  No health data yet.",
            Theme::text_secondary(),
        )),
        Line::from(vec![
            Span::styled("  Press ", Theme::text_muted()),
            Span::styled("[F3]", Theme::key_hint()),
            Span::styled(" to fill in the health information form.", Theme::text_muted()),
        ]),
    ])
    .block(block);

    f.render_widget(msg, area);
}

fn render_patient_header(
    f: &mut Frame,
    area: Rect,
    profile: &PatientProfile,
    display_id: Option<&str>,
) {
    let initial = profile
        .initial()
        .map(|c| c.to_uppercase().to_string())
        .unwrap_or_default();

    let lines = vec![
        Line::from(vec![
            Span::styled(format!(" ({initial}) "), Theme::focused()),
            Span::styled(profile.patient_name.clone(), Theme::title()),
            Span::styled(
                format!("  ID: {}", display_id.unwrap_or("-")),
                Theme::text_muted(),
            ),
        ]),
        Line::from(vec![
            Span::styled("     Age ", Theme::text_secondary()),
            Span::styled(format!("{} years", profile.age), Theme::text()),
            Span::styled("   Gender ", Theme::text_secondary()),
            Span::styled(profile.gender.label(), Theme::text()),
        ]),
    ];

    let header = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Theme::border()),
    );
    f.render_widget(header, area);
}

fn render_vitals(f: &mut Frame, area: Rect, vitals: &[VitalReading]) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)])
        .split(area);

    for (row_index, row_area) in rows.iter().enumerate() {
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
            ])
            .split(*row_area);

        for (col, cell) in cells.iter().enumerate() {
            if let Some(vital) = vitals.get(row_index * 3 + col) {
                render_vital_card(f, *cell, vital);
            }
        }
    }
}

fn render_vital_card(f: &mut Frame, area: Rect, vital: &VitalReading) {
    let mut title = vec![Span::styled(format!(" {} ", vital.label), Theme::subtitle())];
    if let Some(status) = vital.status {
        title.push(Span::styled(format!("{status} "), Theme::vital_status(status)));
    }

    let block = Block::default()
        .title(Line::from(title))
        .borders(Borders::ALL)
        .border_style(Theme::border());

    let body = Paragraph::new(vec![
        Line::from(Span::styled(format!(" {}", vital.value), Theme::title())),
        Line::from(Span::styled(format!(" {}", vital.unit), Theme::text_muted())),
    ])
    .block(block);

    f.render_widget(body, area);
}

fn render_bmi(f: &mut Frame, area: Rect, model: &DashboardModel) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
        .split(area);

    let trend = model.trend();
    let points: Vec<(f64, f64)> = trend
        .iter()
        .enumerate()
        .map(|(i, p)| (i as f64, p.bmi))
        .collect();

    let block = Block::default()
        .title(Span::styled(" BMI Trend ", Theme::subtitle()))
        .borders(Borders::ALL)
        .border_style(Theme::border());

    let finite = points.iter().all(|(_, y)| y.is_finite());
    if points.is_empty() || !finite {
        let msg = Paragraph::new(Span::styled(
            " Not enough data to chart.",
            Theme::text_muted(),
        ))
        .block(block);
        f.render_widget(msg, chunks[0]);
    } else {
        let (lo, hi) = points
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &(_, y)| {
                (lo.min(y), hi.max(y))
            });
        let y_bounds = [(lo - 1.0).floor(), (hi + 1.0).ceil()];

        let dataset = Dataset::default()
            .name("BMI")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Theme::chart_line())
            .data(&points);

        let chart = Chart::new(vec![dataset])
            .block(block)
            .x_axis(
                Axis::default()
                    .style(Theme::text_muted())
                    .bounds([0.0, (points.len().saturating_sub(1)) as f64])
                    .labels(trend.iter().map(|p| p.month).collect::<Vec<_>>()),
            )
            .y_axis(
                Axis::default()
                    .style(Theme::text_muted())
                    .bounds(y_bounds)
                    .labels(vec![
                        format!("{:.0}", y_bounds[0]),
                        format!("{:.0}", y_bounds[1]),
                    ]),
            );
        f.render_widget(chart, chunks[0]);
    }

    render_bmi_summary(f, chunks[1], model.metrics());
}

fn render_bmi_summary(f: &mut Frame, area: Rect, metrics: Option<DerivedMetrics>) {
    let block = Block::default()
        .title(Span::styled(" Body Mass Index ", Theme::subtitle()))
        .borders(Borders::ALL)
        .border_style(Theme::border());

    let lines = match metrics {
        Some(m) if m.is_meaningful() => vec![
            Line::from(vec![
                Span::styled(" Current BMI: ", Theme::text_secondary()),
                Span::styled(m.bmi_display(), Theme::title()),
            ]),
            Line::from(vec![
                Span::styled(" Category: ", Theme::text_secondary()),
                Span::styled(m.category.to_string(), Theme::bmi_category(m.category)),
            ]),
        ],
        _ => vec![Line::from(Span::styled(
            " BMI unavailable (check height and weight)",
            Theme::warning(),
        ))],
    };

    f.render_widget(Paragraph::new(lines).block(block), area);
}
