//! Health information intake form.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use zeroize::Zeroize;

use crate::domain::{ActivityLevel, BloodGroup, Gender, IntakeDraft};
use crate::tui::styles::Theme;

/// Form fields in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    PatientName,
    Age,
    Gender,
    Weight,
    Height,
    BloodGroup,
    MedicalConditions,
    Allergies,
    Medications,
    Smoking,
    Alcohol,
    PhysicalActivity,
    EmergencyContact,
}

impl Field {
    pub const ALL: [Field; 13] = [
        Field::PatientName,
        Field::Age,
        Field::Gender,
        Field::Weight,
        Field::Height,
        Field::BloodGroup,
        Field::MedicalConditions,
        Field::Allergies,
        Field::Medications,
        Field::Smoking,
        Field::Alcohol,
        Field::PhysicalActivity,
        Field::EmergencyContact,
    ];

    fn label(&self) -> &'static str {
        match self {
            Self::PatientName => "Patient Name",
            Self::Age => "Age",
            Self::Gender => "Gender",
            Self::Weight => "Body Weight (kg)",
            Self::Height => "Height (cm)",
            Self::BloodGroup => "Blood Group",
            Self::MedicalConditions => "Existing Medical Conditions",
            Self::Allergies => "Allergies",
            Self::Medications => "Current Medications",
            Self::Smoking => "Smoking",
            Self::Alcohol => "Alcohol Consumption",
            Self::PhysicalActivity => "Physical Activity Level",
            Self::EmergencyContact => "Emergency Contact",
        }
    }

    fn hint(&self) -> &'static str {
        match self {
            Self::PatientName => "Enter full name",
            Self::Age => "Enter age (0-150)",
            Self::Gender => "◀ ▶ Select gender",
            Self::Weight => "Enter weight in kg",
            Self::Height => "Enter height in cm",
            Self::BloodGroup => "◀ ▶ Select blood group",
            Self::MedicalConditions => "List conditions or type 'None'",
            Self::Allergies => "List allergies or type 'None'",
            Self::Medications => "List medications or type 'None'",
            Self::Smoking | Self::Alcohol => "[Space] toggle",
            Self::PhysicalActivity => "◀ ▶ Select activity level",
            Self::EmergencyContact => "10-digit phone number",
        }
    }
}

/// Step through an option list; `None` moves to the first or last entry.
fn cycle<T: Copy + PartialEq>(options: &[T], current: Option<T>, forward: bool) -> Option<T> {
    let len = options.len();
    if len == 0 {
        return current;
    }
    let next = match current.and_then(|c| options.iter().position(|o| *o == c)) {
        None if forward => 0,
        None => len - 1,
        Some(i) if forward => (i + 1) % len,
        Some(i) => (i + len - 1) % len,
    };
    Some(options[next])
}

/// Intake form state
#[derive(Default)]
pub struct IntakeFormState {
    pub draft: IntakeDraft,
    pub selected_field: usize,
    pub error_message: Option<String>,
}

impl IntakeFormState {
    #[must_use]
    pub fn current(&self) -> Field {
        Field::ALL[self.selected_field]
    }

    /// Move to the next field
    pub fn next_field(&mut self) {
        self.selected_field = (self.selected_field + 1) % Field::ALL.len();
    }

    /// Move to the previous field
    pub fn prev_field(&mut self) {
        if self.selected_field == 0 {
            self.selected_field = Field::ALL.len() - 1;
        } else {
            self.selected_field -= 1;
        }
    }

    fn text_mut(&mut self, field: Field) -> Option<&mut String> {
        let draft = &mut self.draft;
        match field {
            Field::PatientName => Some(&mut draft.patient_name),
            Field::Age => Some(&mut draft.age),
            Field::Weight => Some(&mut draft.weight),
            Field::Height => Some(&mut draft.height),
            Field::MedicalConditions => Some(&mut draft.medical_conditions),
            Field::Allergies => Some(&mut draft.allergies),
            Field::Medications => Some(&mut draft.medications),
            Field::EmergencyContact => Some(&mut draft.emergency_contact),
            _ => None,
        }
    }

    /// Add a character to the current field.
    ///
    /// Numeric fields only take digits (and a decimal point for weight/height);
    /// the emergency contact stops at ten digits. Space toggles checkbox fields.
    pub fn input_char(&mut self, c: char) {
        let field = self.current();
        if c == ' ' && matches!(field, Field::Smoking | Field::Alcohol) {
            self.toggle();
            return;
        }

        let accepted = match field {
            Field::Age => c.is_ascii_digit(),
            Field::Weight | Field::Height => c.is_ascii_digit() || c == '.',
            Field::EmergencyContact => {
                c.is_ascii_digit() && self.draft.emergency_contact.len() < 10
            }
            _ => !c.is_control(),
        };
        if !accepted {
            return;
        }

        if let Some(value) = self.text_mut(field) {
            value.push(c);
            self.error_message = None;
        }
    }

    /// Delete the last character
    pub fn delete_char(&mut self) {
        let field = self.current();
        if let Some(value) = self.text_mut(field) {
            value.pop();
        }
    }

    /// Clear the current field
    pub fn clear_field(&mut self) {
        match self.current() {
            Field::Gender => self.draft.gender = None,
            Field::BloodGroup => self.draft.blood_group = None,
            Field::PhysicalActivity => self.draft.physical_activity = None,
            Field::Smoking => self.draft.substances.smoking = false,
            Field::Alcohol => self.draft.substances.alcohol = false,
            field => {
                if let Some(value) = self.text_mut(field) {
                    value.clear();
                }
            }
        }
    }

    /// Flip the current checkbox field.
    pub fn toggle(&mut self) {
        let field = self.current();
        let substances = &mut self.draft.substances;
        match field {
            Field::Smoking => substances.smoking = !substances.smoking,
            Field::Alcohol => substances.alcohol = !substances.alcohol,
            _ => {}
        }
    }

    /// Step the current select field to the next (or previous) option.
    pub fn cycle_option(&mut self, forward: bool) {
        let field = self.current();
        let draft = &mut self.draft;
        match field {
            Field::Gender => draft.gender = cycle(&Gender::ALL, draft.gender, forward),
            Field::BloodGroup => {
                draft.blood_group = cycle(&BloodGroup::ALL, draft.blood_group, forward);
            }
            Field::PhysicalActivity => {
                draft.physical_activity =
                    cycle(&ActivityLevel::ALL, draft.physical_activity, forward);
            }
            Field::Smoking | Field::Alcohol => self.toggle(),
            _ => return,
        }
        self.error_message = None;
    }

    /// Wipe all field buffers from memory and reset the form.
    ///
    /// Called right after a successful submission.
    pub fn clear_sensitive(&mut self) {
        let draft = &mut self.draft;
        for value in [
            &mut draft.patient_name,
            &mut draft.age,
            &mut draft.weight,
            &mut draft.height,
            &mut draft.medical_conditions,
            &mut draft.allergies,
            &mut draft.medications,
            &mut draft.emergency_contact,
        ] {
            value.zeroize();
        }
        *draft = IntakeDraft::default();
        self.error_message = None;
        self.selected_field = 0;
    }

    /// Fill the form with a plausible sample patient.
    pub fn load_sample_data(&mut self) {
        self.draft = IntakeDraft {
            patient_name: "Alex Morgan".to_string(),
            age: "42".to_string(),
            gender: Some(Gender::Other),
            weight: "78.5".to_string(),
            height: "176".to_string(),
            blood_group: Some(BloodGroup::APositive),
            medical_conditions: "Mild asthma".to_string(),
            allergies: "None".to_string(),
            medications: "Salbutamol inhaler".to_string(),
            substances: Default::default(),
            physical_activity: Some(ActivityLevel::LightlyActive),
            emergency_contact: "5550102030".to_string(),
        };
        self.error_message = None;
    }

    /// Display text for a field; `None` when nothing has been entered yet.
    fn display_value(&self, field: Field) -> Option<String> {
        let d = &self.draft;
        let text = |s: &String| (!s.is_empty()).then(|| s.clone());
        let checkbox = |on: bool| Some(if on { "[x] Yes" } else { "[ ] No" }.to_string());
        match field {
            Field::PatientName => text(&d.patient_name),
            Field::Age => text(&d.age),
            Field::Gender => d.gender.map(|g| g.label().to_string()),
            Field::Weight => text(&d.weight),
            Field::Height => text(&d.height),
            Field::BloodGroup => d.blood_group.map(|b| b.label().to_string()),
            Field::MedicalConditions => text(&d.medical_conditions),
            Field::Allergies => text(&d.allergies),
            Field::Medications => text(&d.medications),
            Field::Smoking => checkbox(d.substances.smoking),
            Field::Alcohol => checkbox(d.substances.alcohol),
            Field::PhysicalActivity => d.physical_activity.map(|a| a.label().to_string()),
            Field::EmergencyContact => text(&d.emergency_contact),
        }
    }
}

/// Render the intake form
pub fn render_intake_form(f: &mut Frame, area: Rect, state: &IntakeFormState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Form
            Constraint::Length(3), // Footer/error
        ])
        .split(area);

    render_form_header(f, chunks[0]);
    render_form_fields(f, chunks[1], state);
    render_form_footer(f, chunks[2], state);
}

fn render_form_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(" ", Theme::text()),
        Span::styled("Health Information Form", Theme::title()),
        Span::styled(" │ exported on submit", Theme::text_secondary()),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Theme::border()),
    );

    f.render_widget(header, area);
}

fn render_form_fields(f: &mut Frame, area: Rect, state: &IntakeFormState) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .margin(1)
        .split(area);

    let mid = (Field::ALL.len() + 1) / 2;
    render_field_column(f, columns[0], state, 0..mid);
    render_field_column(f, columns[1], state, mid..Field::ALL.len());
}

fn render_field_column(
    f: &mut Frame,
    area: Rect,
    state: &IntakeFormState,
    range: std::ops::Range<usize>,
) {
    let constraints: Vec<Constraint> = range
        .clone()
        .map(|_| Constraint::Length(3))
        .chain(std::iter::once(Constraint::Min(0)))
        .collect();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for (slot, index) in range.enumerate() {
        let field = Field::ALL[index];
        let is_selected = index == state.selected_field;
        let (border_style, title_style) = if is_selected {
            (Theme::border_focused(), Theme::focused())
        } else {
            (Theme::border(), Theme::text_secondary())
        };

        let block = Block::default()
            .title(Span::styled(format!(" {} ", field.label()), title_style))
            .borders(Borders::ALL)
            .border_style(border_style);

        let value = match state.display_value(field) {
            Some(v) => Span::styled(v, Theme::text()),
            None => Span::styled(field.hint(), Theme::text_muted()),
        };

        let content = Paragraph::new(Line::from(vec![
            Span::raw(" "),
            value,
            if is_selected {
                Span::styled("▌", Theme::cursor())
            } else {
                Span::raw("")
            },
        ]))
        .block(block);

        f.render_widget(content, chunks[slot]);
    }
}

fn render_form_footer(f: &mut Frame, area: Rect, state: &IntakeFormState) {
    let content = if let Some(err) = &state.error_message {
        Line::from(vec![
            Span::styled("! ", Theme::danger()),
            Span::styled(err.clone(), Theme::danger()),
        ])
    } else {
        Line::from(vec![
            Span::styled("[↑↓] ", Theme::key_hint()),
            Span::styled("Navigate ", Theme::key_desc()),
            Span::styled("[◀▶] ", Theme::key_hint()),
            Span::styled("Choose ", Theme::key_desc()),
            Span::styled("[Enter] ", Theme::key_hint()),
            Span::styled("Submit ", Theme::key_desc()),
            Span::styled("[F9] ", Theme::key_hint()),
            Span::styled("Sample Data ", Theme::key_desc()),
            Span::styled("[Esc] ", Theme::key_hint()),
            Span::styled("Cancel", Theme::key_desc()),
        ])
    };

    let footer = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(Theme::border()),
    );

    f.render_widget(footer, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn select(state: &mut IntakeFormState, field: Field) {
        state.selected_field = Field::ALL
            .iter()
            .position(|f| *f == field)
            .expect("Known field");
    }

    #[test]
    fn test_numeric_fields_filter_input() {
        let mut state = IntakeFormState::default();
        select(&mut state, Field::Age);
        for c in "4a2.".chars() {
            state.input_char(c);
        }
        assert_eq!(state.draft.age, "42");

        select(&mut state, Field::Weight);
        for c in "70.5kg".chars() {
            state.input_char(c);
        }
        assert_eq!(state.draft.weight, "70.5");
    }

    #[test]
    fn test_contact_capped_at_ten_digits() {
        let mut state = IntakeFormState::default();
        select(&mut state, Field::EmergencyContact);
        for c in "555-123-456789".chars() {
            state.input_char(c);
        }
        assert_eq!(state.draft.emergency_contact, "5551234567");
    }

    #[test]
    fn test_select_fields_cycle() {
        let mut state = IntakeFormState::default();
        select(&mut state, Field::BloodGroup);
        state.cycle_option(true);
        assert_eq!(state.draft.blood_group, Some(BloodGroup::APositive));
        state.cycle_option(false);
        assert_eq!(state.draft.blood_group, Some(BloodGroup::ONegative));
        state.cycle_option(false);
        assert_eq!(state.draft.blood_group, Some(BloodGroup::OPositive));
    }

    #[test]
    fn test_space_toggles_checkbox() {
        let mut state = IntakeFormState::default();
        select(&mut state, Field::Smoking);
        state.input_char(' ');
        assert!(state.draft.substances.smoking);
        state.input_char(' ');
        assert!(!state.draft.substances.smoking);
    }

    #[test]
    fn test_navigation_wraps() {
        let mut state = IntakeFormState::default();
        state.prev_field();
        assert_eq!(state.current(), Field::EmergencyContact);
        state.next_field();
        assert_eq!(state.current(), Field::PatientName);
    }

    #[test]
    fn test_sample_data_validates_and_clear_resets() {
        let mut state = IntakeFormState::default();
        state.load_sample_data();
        assert!(state.draft.validate().is_ok());

        state.clear_sensitive();
        assert!(state.draft.patient_name.is_empty());
        assert!(state.draft.gender.is_none());
        assert_eq!(state.selected_field, 0);
    }
}
