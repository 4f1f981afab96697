//! Records view: Upload form, document list and preview popup.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use crate::domain::document::ACCEPTED_EXTENSIONS;
use crate::domain::{DocumentPreview, DocumentRecord};
use crate::tui::styles::Theme;

/// Focusable parts of the records screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordsFocus {
    Name,
    Description,
    Path,
    List,
}

impl RecordsFocus {
    const ORDER: [Self; 4] = [Self::Name, Self::Description, Self::Path, Self::List];

    fn label(self) -> &'static str {
        match self {
            Self::Name => "Document Name",
            Self::Description => "Description",
            Self::Path => "File Path",
            Self::List => "Documents",
        }
    }
}

/// Records screen state
pub struct RecordsState {
    pub name: String,
    pub description: String,
    pub path: String,
    pub focus: RecordsFocus,
    pub list: ListState,
    /// (file name, preview) while the viewer is open
    pub preview: Option<(String, DocumentPreview)>,
}

impl Default for RecordsState {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            path: String::new(),
            focus: RecordsFocus::Name,
            list: ListState::default(),
            preview: None,
        }
    }
}

impl RecordsState {
    pub fn next_focus(&mut self) {
        let i = RecordsFocus::ORDER
            .iter()
            .position(|f| *f == self.focus)
            .unwrap_or(0);
        self.focus = RecordsFocus::ORDER[(i + 1) % RecordsFocus::ORDER.len()];
    }

    fn input_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            RecordsFocus::Name => Some(&mut self.name),
            RecordsFocus::Description => Some(&mut self.description),
            RecordsFocus::Path => Some(&mut self.path),
            RecordsFocus::List => None,
        }
    }

    pub fn input_char(&mut self, c: char) {
        if c.is_control() {
            return;
        }
        if let Some(s) = self.input_mut() {
            s.push(c);
        }
    }

    pub fn delete_char(&mut self) {
        if let Some(s) = self.input_mut() {
            s.pop();
        }
    }

    /// Reset the upload form after a successful upload.
    pub fn clear_form(&mut self) {
        self.name.clear();
        self.description.clear();
        self.path.clear();
        self.focus = RecordsFocus::Name;
    }

    /// Move the list cursor, wrapping at both ends.
    pub fn select_step(&mut self, len: usize, forward: bool) {
        if len == 0 {
            self.list.select(None);
            return;
        }
        let next = match (self.list.selected(), forward) {
            (None, _) => 0,
            (Some(i), true) => (i + 1) % len,
            (Some(i), false) => (i + len - 1) % len,
        };
        self.list.select(Some(next));
    }

    /// Keep the selection inside the list after it shrinks.
    pub fn clamp_selection(&mut self, len: usize) {
        match self.list.selected() {
            Some(_) if len == 0 => self.list.select(None),
            Some(i) if i >= len => self.list.select(Some(len - 1)),
            _ => {}
        }
    }

    /// Id of the highlighted document.
    #[must_use]
    pub fn selected_id<'a>(&self, docs: &'a [DocumentRecord]) -> Option<&'a str> {
        self.list
            .selected()
            .and_then(|i| docs.get(i))
            .map(|d| d.id.as_str())
    }
}

/// Render the records view.
pub fn render_records(f: &mut Frame, area: Rect, state: &mut RecordsState, docs: &[DocumentRecord]) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    render_upload_form(f, columns[0], state);
    render_document_list(f, columns[1], state, docs);

    if let Some((file_name, preview)) = &state.preview {
        render_preview(f, area, file_name, preview);
    }
}

fn render_upload_form(f: &mut Frame, area: Rect, state: &RecordsState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(3),
        ])
        .split(area);

    let inputs = [
        (RecordsFocus::Name, &state.name),
        (RecordsFocus::Description, &state.description),
        (RecordsFocus::Path, &state.path),
    ];

    for (slot, (focus, value)) in inputs.iter().enumerate() {
        let selected = state.focus == *focus;
        let border = if selected {
            Theme::border_focused()
        } else {
            Theme::border()
        };
        let mut spans = vec![Span::styled(format!(" {value}"), Theme::text())];
        if selected {
            spans.push(Span::styled("▌", Theme::cursor()));
        }
        let p = Paragraph::new(Line::from(spans)).block(
            Block::default()
                .title(Span::styled(format!(" {} ", focus.label()), Theme::text_secondary()))
                .borders(Borders::ALL)
                .border_style(border),
        );
        f.render_widget(p, chunks[slot]);
    }

    let help = Paragraph::new(vec![
        Line::from(Span::styled(
            format!(" Accepted: {}", ACCEPTED_EXTENSIONS.join(", ")),
            Theme::text_muted(),
        )),
        Line::from(vec![
            Span::styled(" [Tab] ", Theme::key_hint()),
            Span::styled("Next ", Theme::key_desc()),
            Span::styled("[Enter] ", Theme::key_hint()),
            Span::styled("Upload Document", Theme::key_desc()),
        ]),
    ])
    .wrap(Wrap { trim: false });
    f.render_widget(help, chunks[3]);
}

fn render_document_list(f: &mut Frame, area: Rect, state: &mut RecordsState, docs: &[DocumentRecord]) {
    let focused = state.focus == RecordsFocus::List;
    let block = Block::default()
        .title(Span::styled(
            format!(" Medical Records ({}) ", docs.len()),
            Theme::subtitle(),
        ))
        .title_bottom(Line::from(vec![
            Span::styled(" [V] ", Theme::key_hint()),
            Span::styled("View ", Theme::key_desc()),
            Span::styled("[D] ", Theme::key_hint()),
            Span::styled("Download ", Theme::key_desc()),
            Span::styled("[Del] ", Theme::key_hint()),
            Span::styled("Delete ", Theme::key_desc()),
        ]))
        .borders(Borders::ALL)
        .border_style(if focused {
            Theme::border_focused()
        } else {
            Theme::border()
        });

    if docs.is_empty() {
        let p = Paragraph::new(Span::styled(
            " No documents uploaded yet.",
            Theme::text_muted(),
        ))
        .block(block);
        f.render_widget(p, area);
        return;
    }

    let items: Vec<ListItem> = docs
        .iter()
        .map(|d| {
            let mut lines = vec![Line::from(vec![
                Span::styled(d.name.clone(), Theme::title()),
                Span::styled(format!("  {}", d.date), Theme::text_muted()),
            ])];
            if !d.description.is_empty() {
                lines.push(Line::from(Span::styled(
                    format!("  {}", d.description),
                    Theme::text_secondary(),
                )));
            }
            lines.push(Line::from(Span::styled(
                format!("  {}", d.file_name),
                Theme::info(),
            )));
            ListItem::new(lines)
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Theme::selected())
        .highlight_symbol("▶ ");

    f.render_stateful_widget(list, area, &mut state.list);
}

fn centered(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let width = area.width * percent_x / 100;
    let height = area.height * percent_y / 100;
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn render_preview(f: &mut Frame, area: Rect, file_name: &str, preview: &DocumentPreview) {
    let rect = centered(area, 80, 80);

    let mut lines: Vec<Line> = match preview {
        DocumentPreview::Text { lines, truncated } => {
            let mut out: Vec<Line> = lines
                .iter()
                .map(|l| Line::from(Span::styled(l.clone(), Theme::text())))
                .collect();
            if *truncated {
                out.push(Line::from(Span::styled("…", Theme::text_muted())));
            }
            out
        }
        DocumentPreview::Binary { kind, size } => vec![
            Line::from(Span::styled(format!("{kind} document"), Theme::title())),
            Line::from(Span::styled(format!("{size} bytes"), Theme::text_secondary())),
            Line::from(Span::styled(
                "Download the file to open it in another program.",
                Theme::text_muted(),
            )),
        ],
    };
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("[Esc] ", Theme::key_hint()),
        Span::styled("Close", Theme::key_desc()),
    ]));

    let p = Paragraph::new(lines)
        .block(
            Block::default()
                .title(Span::styled(format!(" {file_name} "), Theme::subtitle()))
                .borders(Borders::ALL)
                .border_style(Theme::border_focused()),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, rect);
    f.render_widget(p, rect);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_focus_cycles_through_inputs_and_list() {
        let mut state = RecordsState::default();
        state.input_char('A');
        state.next_focus();
        state.input_char('B');
        state.next_focus();
        state.input_char('c');
        state.next_focus();
        assert_eq!(state.focus, RecordsFocus::List);
        state.input_char('x');
        assert_eq!((state.name.as_str(), state.description.as_str(), state.path.as_str()), ("A", "B", "c"));
        state.next_focus();
        assert_eq!(state.focus, RecordsFocus::Name);
    }

    #[test]
    fn test_selection_wraps_and_clamps() {
        let mut state = RecordsState::default();
        state.select_step(3, false);
        assert_eq!(state.list.selected(), Some(0));
        state.select_step(3, false);
        assert_eq!(state.list.selected(), Some(2));
        state.clamp_selection(2);
        assert_eq!(state.list.selected(), Some(1));
        state.clamp_selection(0);
        assert_eq!(state.list.selected(), None);
    }
}
