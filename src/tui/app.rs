//! Main TUI application state machine.
//!
//! Handles:
//! - Screen navigation
//! - Input event handling
//! - Service integration

use std::io;
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Terminal,
};
use zeroize::Zeroize;

use crate::adapters::{DownloadDir, MemoryDocumentStore};
use crate::application::{DashboardModel, IntakeService, RecordsService};
use crate::config::AppConfig;
use crate::HealthError;

use super::ui::{
    dashboard::render_dashboard,
    emergency::{render_emergency, EmergencyState, SOS_BODY, SOS_TITLE},
    home::render_home,
    intake::{render_intake_form, IntakeFormState},
    records::{render_records, RecordsFocus, RecordsState},
    render_disclaimer, render_notification, render_tabs, Notification, NotificationKind,
};

/// Current screen/view in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Home,
    Emergency,
    Intake,
    Dashboard,
    Records,
}

impl Screen {
    pub const ALL: [Self; 5] = [
        Self::Home,
        Self::Emergency,
        Self::Intake,
        Self::Dashboard,
        Self::Records,
    ];

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Emergency => "Emergency",
            Self::Intake => "Health Form",
            Self::Dashboard => "Dashboard",
            Self::Records => "Records",
        }
    }

    fn index(self) -> usize {
        Self::ALL.iter().position(|s| *s == self).unwrap_or(0)
    }

    /// F1..F5 map to screens in tab order.
    fn from_function_key(n: u8) -> Option<Self> {
        Self::ALL.get(usize::from(n).checked_sub(1)?).copied()
    }
}

/// Main application state
pub struct App {
    screen: Screen,
    should_quit: bool,

    /// Owned for the whole session; the emergency settings form writes the map key
    config: AppConfig,

    intake_service: IntakeService<DownloadDir>,
    records_service: RecordsService<MemoryDocumentStore, DownloadDir>,
    dashboard: DashboardModel,

    intake_state: IntakeFormState,
    emergency_state: EmergencyState,
    records_state: RecordsState,

    notification: Option<Notification>,
}

impl App {
    /// Create a new application from startup configuration.
    ///
    /// # Errors
    /// Returns error if the download directory cannot be created.
    pub fn new(config: AppConfig) -> Result<Self> {
        let sink = Arc::new(DownloadDir::new(&config.download_dir).with_context(|| {
            format!(
                "Cannot use download directory {}",
                config.download_dir.display()
            )
        })?);

        let intake_service = IntakeService::new(sink.clone());
        let records_service = RecordsService::new(MemoryDocumentStore::new(), sink);

        Ok(Self::with_dependencies(config, intake_service, records_service))
    }

    /// Create application with injected services.
    pub fn with_dependencies(
        config: AppConfig,
        intake_service: IntakeService<DownloadDir>,
        records_service: RecordsService<MemoryDocumentStore, DownloadDir>,
    ) -> Self {
        Self {
            screen: Screen::Home,
            should_quit: false,
            config,
            intake_service,
            records_service,
            dashboard: DashboardModel::new(),
            intake_state: IntakeFormState::default(),
            emergency_state: EmergencyState::default(),
            records_state: RecordsState::default(),
            notification: None,
        }
    }

    /// Run the main application loop.
    ///
    /// # Errors
    /// Returns error if terminal operations fail.
    pub fn run(&mut self) -> Result<()> {
        tracing::info!(
            map_enabled = self.config.map.is_enabled(),
            downloads = %self.config.download_dir.display(),
            "Session started"
        );

        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.main_loop(&mut terminal);

        // Restore terminal
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    fn main_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
        let titles: Vec<&str> = Screen::ALL.iter().map(|s| s.title()).collect();

        loop {
            if self
                .notification
                .as_ref()
                .is_some_and(|n| n.is_expired(Instant::now()))
            {
                self.notification = None;
            }

            terminal.draw(|f| {
                let area = f.area();
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([
                        Constraint::Length(2),
                        Constraint::Min(0),
                        Constraint::Length(3),
                    ])
                    .split(area);

                let content_area = chunks[1];

                render_tabs(f, chunks[0], &titles, self.screen.index());

                match self.screen {
                    Screen::Home => render_home(f, content_area),
                    Screen::Emergency => {
                        render_emergency(f, content_area, &self.emergency_state, &self.config.map)
                    }
                    Screen::Intake => render_intake_form(f, content_area, &self.intake_state),
                    Screen::Dashboard => render_dashboard(f, content_area, &self.dashboard),
                    Screen::Records => render_records(
                        f,
                        content_area,
                        &mut self.records_state,
                        self.records_service.documents(),
                    ),
                }

                render_disclaimer(f, chunks[2]);

                if let Some(n) = &self.notification {
                    render_notification(f, area, n);
                }
            })?;

            // Handle input (short poll to stay responsive)
            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code, key.modifiers);
                    }
                }
            }

            if self.should_quit {
                break;
            }
        }

        tracing::info!("Session ended");
        Ok(())
    }

    fn notify(&mut self, kind: NotificationKind, title: &str, body: impl Into<String>) {
        self.notification = Some(Notification::new(kind, title, body));
    }

    fn notify_error(&mut self, err: &HealthError) {
        tracing::warn!(error = %err, "Operation failed");
        self.notify(NotificationKind::Error, "Error", err.to_string());
    }

    fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) {
        // Global quit handling
        if key == KeyCode::Char('q') && modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        if let KeyCode::F(n) = key {
            if let Some(screen) = Screen::from_function_key(n) {
                self.screen = screen;
                return;
            }
        }

        match self.screen {
            Screen::Home => self.handle_home_key(key),
            Screen::Emergency => self.handle_emergency_key(key),
            Screen::Intake => self.handle_intake_key(key),
            Screen::Dashboard => self.handle_dashboard_key(key),
            Screen::Records => self.handle_records_key(key),
        }
    }

    fn handle_home_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Enter => self.screen = Screen::Intake,
            KeyCode::Char(c @ '1'..='5') => {
                if let Some(screen) = c.to_digit(10).and_then(|d| Screen::from_function_key(d as u8)) {
                    self.screen = screen;
                }
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => self.should_quit = true,
            _ => {}
        }
    }

    fn handle_emergency_key(&mut self, key: KeyCode) {
        if self.emergency_state.editing {
            match key {
                KeyCode::Esc => self.emergency_state.cancel(),
                KeyCode::Enter => self.save_map_key(),
                KeyCode::Backspace => self.emergency_state.delete_char(),
                KeyCode::Char(c) => self.emergency_state.input_char(c),
                _ => {}
            }
            return;
        }

        match key {
            KeyCode::F(10) | KeyCode::Char('s') | KeyCode::Char('S') => self.send_sos(),
            KeyCode::Enter => self.emergency_state.editing = true,
            KeyCode::Esc => self.screen = Screen::Home,
            _ => {}
        }
    }

    fn send_sos(&mut self) {
        tracing::warn!("SOS alert raised");
        self.notify(NotificationKind::Alert, SOS_TITLE, SOS_BODY);
    }

    /// The configuration keeps the only copy of the key.
    fn save_map_key(&mut self) {
        let mut key = self.emergency_state.take_key();
        if self.config.map.set_access_token(&key) {
            tracing::info!("Map API key updated");
            self.notify(
                NotificationKind::Success,
                "API Key Saved",
                "Your map API key has been saved.",
            );
        }
        key.zeroize();
    }

    fn handle_intake_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc => self.screen = Screen::Home,
            KeyCode::Up | KeyCode::BackTab => self.intake_state.prev_field(),
            KeyCode::Down | KeyCode::Tab => self.intake_state.next_field(),
            KeyCode::Left => self.intake_state.cycle_option(false),
            KeyCode::Right => self.intake_state.cycle_option(true),
            KeyCode::F(9) => self.intake_state.load_sample_data(),
            KeyCode::Char(c) => self.intake_state.input_char(c),
            KeyCode::Backspace => self.intake_state.delete_char(),
            KeyCode::Delete => self.intake_state.clear_field(),
            KeyCode::Enter => self.submit_intake_form(),
            _ => {}
        }
    }

    fn submit_intake_form(&mut self) {
        match self
            .intake_service
            .submit(&self.intake_state.draft, &mut self.dashboard)
        {
            Ok(receipt) => {
                tracing::debug!(path = %receipt.path.display(), "Export written");
                // Clear plaintext buffers from the UI immediately.
                self.intake_state.clear_sensitive();
                self.notify(
                    NotificationKind::Success,
                    "Success!",
                    "Your health data has been successfully saved.",
                );
                self.screen = Screen::Dashboard;
            }
            Err(HealthError::Validation(errors)) => {
                self.intake_state.error_message = Some(errors.join(", "));
            }
            Err(e) => {
                self.intake_state.error_message = Some(e.to_string());
                self.notify_error(&e);
            }
        }
    }

    fn handle_dashboard_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('n') | KeyCode::Char('N') => self.screen = Screen::Intake,
            KeyCode::Esc => self.screen = Screen::Home,
            _ => {}
        }
    }

    fn handle_records_key(&mut self, key: KeyCode) {
        if self.records_state.preview.is_some() {
            if matches!(key, KeyCode::Esc | KeyCode::Enter) {
                self.records_state.preview = None;
            }
            return;
        }

        match key {
            KeyCode::Tab => self.records_state.next_focus(),
            KeyCode::Esc => self.screen = Screen::Home,
            _ if self.records_state.focus == RecordsFocus::List => self.handle_record_list_key(key),
            KeyCode::Enter => self.upload_document(),
            KeyCode::Backspace => self.records_state.delete_char(),
            KeyCode::Char(c) => self.records_state.input_char(c),
            _ => {}
        }
    }

    fn handle_record_list_key(&mut self, key: KeyCode) {
        let len = self.records_service.documents().len();
        match key {
            KeyCode::Down => self.records_state.select_step(len, true),
            KeyCode::Up => self.records_state.select_step(len, false),
            KeyCode::Char('v') | KeyCode::Char('V') | KeyCode::Enter => self.view_document(),
            KeyCode::Char('d') | KeyCode::Char('D') => self.download_document(),
            KeyCode::Delete => self.delete_document(),
            _ => {}
        }
    }

    fn selected_document_id(&self) -> Option<String> {
        self.records_state
            .selected_id(self.records_service.documents())
            .map(str::to_string)
    }

    fn upload_document(&mut self) {
        let path = self.records_state.path.trim().to_string();
        let result = self.records_service.upload(
            self.records_state.name.trim(),
            self.records_state.description.trim(),
            Path::new(&path),
        );

        match result {
            Ok(file_name) => {
                self.records_state.clear_form();
                self.notify(
                    NotificationKind::Success,
                    "Document Uploaded",
                    format!("{file_name} added to your records."),
                );
            }
            Err(e) => self.notify_error(&e),
        }
    }

    fn view_document(&mut self) {
        let Some(id) = self.selected_document_id() else {
            return;
        };
        let file_name = self
            .records_service
            .documents()
            .iter()
            .find(|d| d.id == id)
            .map(|d| d.file_name.clone())
            .unwrap_or_default();

        match self.records_service.view(&id) {
            Ok(preview) => self.records_state.preview = Some((file_name, preview)),
            Err(e) => self.notify_error(&e),
        }
    }

    fn download_document(&mut self) {
        let Some(id) = self.selected_document_id() else {
            return;
        };
        match self.records_service.download(&id) {
            Ok(path) => self.notify(
                NotificationKind::Success,
                "Download Complete",
                format!("Saved to {}", path.display()),
            ),
            Err(e) => self.notify_error(&e),
        }
    }

    fn delete_document(&mut self) {
        let Some(id) = self.selected_document_id() else {
            return;
        };
        if self.records_service.delete(&id) {
            let len = self.records_service.documents().len();
            self.records_state.clamp_selection(len);
            self.notify(
                NotificationKind::Info,
                "Document Deleted",
                "The document has been removed from your records.",
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{LogConfig, LogMode, MapConfig};
    use crate::domain::sample_draft;

    fn app(dir: &tempfile::TempDir) -> App {
        let config = AppConfig {
            map: MapConfig::default(),
            download_dir: dir.path().join("downloads"),
            log: LogConfig {
                mode: LogMode::Stdout,
                file: dir.path().join("app.log"),
            },
        };
        App::new(config).expect("Should build app")
    }

    #[test]
    fn test_function_keys_switch_screens() {
        let dir = tempfile::tempdir().expect("Should create temp dir");
        let mut app = app(&dir);
        app.handle_key(KeyCode::F(5), KeyModifiers::NONE);
        assert_eq!(app.screen, Screen::Records);
        app.handle_key(KeyCode::F(2), KeyModifiers::NONE);
        assert_eq!(app.screen, Screen::Emergency);
        app.handle_key(KeyCode::F(7), KeyModifiers::NONE);
        assert_eq!(app.screen, Screen::Emergency);
        app.handle_key(KeyCode::Char('q'), KeyModifiers::CONTROL);
        assert!(app.should_quit);
    }

    #[test]
    fn test_submit_moves_to_dashboard_and_clears_form() {
        let dir = tempfile::tempdir().expect("Should create temp dir");
        let mut app = app(&dir);
        app.screen = Screen::Intake;
        app.intake_state.draft = sample_draft();

        app.handle_key(KeyCode::Enter, KeyModifiers::NONE);

        assert_eq!(app.screen, Screen::Dashboard);
        assert!(app.dashboard.profile().is_some());
        assert!(app.intake_state.draft.patient_name.is_empty());
        let title = app.notification.as_ref().map(|n| n.title.as_str());
        assert_eq!(title, Some("Success!"));
        let exports = std::fs::read_dir(dir.path().join("downloads"))
            .expect("Should list")
            .count();
        assert_eq!(exports, 1);
    }

    #[test]
    fn test_invalid_submit_stays_on_form() {
        let dir = tempfile::tempdir().expect("Should create temp dir");
        let mut app = app(&dir);
        app.screen = Screen::Intake;

        app.handle_key(KeyCode::Enter, KeyModifiers::NONE);

        assert_eq!(app.screen, Screen::Intake);
        assert!(app.intake_state.error_message.is_some());
        assert!(app.dashboard.profile().is_none());
    }

    #[test]
    fn test_map_key_form_ignores_blank_input() {
        let dir = tempfile::tempdir().expect("Should create temp dir");
        let mut app = app(&dir);
        app.screen = Screen::Emergency;

        app.handle_key(KeyCode::Enter, KeyModifiers::NONE);
        app.handle_key(KeyCode::Char(' '), KeyModifiers::NONE);
        app.handle_key(KeyCode::Enter, KeyModifiers::NONE);
        assert!(!app.config.map.is_enabled());
        assert!(app.notification.is_none());

        app.handle_key(KeyCode::Enter, KeyModifiers::NONE);
        for c in "pk.test".chars() {
            app.handle_key(KeyCode::Char(c), KeyModifiers::NONE);
        }
        app.handle_key(KeyCode::Enter, KeyModifiers::NONE);
        assert_eq!(app.config.map.access_token(), Some("pk.test"));
        let title = app.notification.as_ref().map(|n| n.title.as_str());
        assert_eq!(title, Some("API Key Saved"));
    }

    #[test]
    fn test_sos_raises_alert() {
        let dir = tempfile::tempdir().expect("Should create temp dir");
        let mut app = app(&dir);
        app.screen = Screen::Emergency;
        app.handle_key(KeyCode::F(10), KeyModifiers::NONE);
        let n = app.notification.as_ref().expect("Should notify");
        assert_eq!(n.title, SOS_TITLE);
        assert_eq!(n.kind, NotificationKind::Alert);
    }

    #[test]
    fn test_records_upload_and_delete() {
        let dir = tempfile::tempdir().expect("Should create temp dir");
        let mut app = app(&dir);
        let file = dir.path().join("xray.png");
        std::fs::write(&file, [0x89, b'P', b'N', b'G']).expect("Should write");

        app.screen = Screen::Records;
        for c in "Chest X-ray".chars() {
            app.handle_key(KeyCode::Char(c), KeyModifiers::NONE);
        }
        app.handle_key(KeyCode::Tab, KeyModifiers::NONE);
        app.handle_key(KeyCode::Tab, KeyModifiers::NONE);
        for c in file.to_string_lossy().chars() {
            app.handle_key(KeyCode::Char(c), KeyModifiers::NONE);
        }
        app.handle_key(KeyCode::Enter, KeyModifiers::NONE);
        assert_eq!(app.records_service.documents().len(), 1);
        assert!(app.records_state.path.is_empty());

        app.records_state.focus = RecordsFocus::List;
        app.handle_key(KeyCode::Down, KeyModifiers::NONE);
        app.handle_key(KeyCode::Delete, KeyModifiers::NONE);
        assert!(app.records_service.documents().is_empty());
        assert_eq!(app.records_state.list.selected(), None);
    }
}
