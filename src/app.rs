//! Application state and core logic

use crate::config::TuiConfig;
use crate::state::{AppState, Cycle, FieldId, FieldKind, Form, SubmitOutcome, View};
use crate::upload::{spawn_decode, FsPictureReader, PictureFile, PictureReader, UploadEvent};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use tokio::sync::mpsc::{self, error::TryRecvError, UnboundedReceiver, UnboundedSender};

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// Loaded user configuration
    pub config: TuiConfig,
    /// Status bar feedback message
    pub status_message: Option<String>,
    /// Source for picture uploads
    reader: Arc<dyn PictureReader>,
    upload_tx: UnboundedSender<UploadEvent>,
    upload_rx: UnboundedReceiver<UploadEvent>,
    /// Whether the app should quit
    quit: bool,
}

impl App {
    /// Create a new App instance
    pub fn new(config: TuiConfig) -> Self {
        Self::with_reader(config, Arc::new(FsPictureReader))
    }

    /// Create an App reading pictures through `reader`
    pub fn with_reader(config: TuiConfig, reader: Arc<dyn PictureReader>) -> Self {
        let (upload_tx, upload_rx) = mpsc::unbounded_channel();
        Self {
            state: AppState::new(config.initial_form_data()),
            config,
            status_message: None,
            reader,
            upload_tx,
            upload_rx,
            quit: false,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Handle a key event
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // Alert dialog is modal
        if self.state.has_alerts() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.dismiss_alert();
            }
            return Ok(());
        }

        match self.state.current_view {
            View::Landing => self.handle_landing_key(key),
            View::Registration => self.handle_registration_key(key),
        }
        Ok(())
    }

    fn handle_landing_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.quit = true,
            KeyCode::Down | KeyCode::Char('j') | KeyCode::Tab => {
                self.state.next_landing_button()
            }
            KeyCode::Up | KeyCode::Char('k') | KeyCode::BackTab => {
                self.state.prev_landing_button()
            }
            KeyCode::Enter => {
                self.status_message = None;
                self.state.press_landing_button();
            }
            _ => {}
        }
    }

    fn handle_registration_key(&mut self, key: KeyEvent) {
        let Some(form) = self.state.form.as_mut() else {
            return;
        };
        let active = form.active_field_id();

        match key.code {
            KeyCode::Esc => {
                self.status_message = None;
                self.state.navigate(View::Landing);
            }
            KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => self.submit(),
            KeyCode::Char('s') if key.modifiers.contains(crate::platform::SUBMIT_MODIFIER) => {
                self.submit()
            }
            KeyCode::Tab | KeyCode::Down => form.next_field(),
            KeyCode::BackTab | KeyCode::Up => form.prev_field(),
            KeyCode::Left => form.cycle_active(Cycle::Prev),
            KeyCode::Right => form.cycle_active(Cycle::Next),
            KeyCode::Enter if form.is_submit_active() => self.submit(),
            KeyCode::Enter if active == Some(FieldId::Picture) => self.start_upload(),
            KeyCode::Enter => form.next_field(),
            KeyCode::Char(' ')
                if active.is_some_and(|f| {
                    matches!(f.kind(), FieldKind::Radio | FieldKind::Checkbox | FieldKind::Select)
                }) =>
            {
                form.toggle_active()
            }
            KeyCode::Char(c) => form.input_char(c),
            KeyCode::Backspace => form.backspace(),
            _ => {}
        }
    }

    /// Validate the active form and commit on success
    fn submit(&mut self) {
        match self.state.submit_form() {
            Some(SubmitOutcome::Accepted(_)) => {
                self.status_message = Some("Registration saved".to_string());
            }
            Some(SubmitOutcome::Rejected(count)) => {
                let noun = if count == 1 { "field needs" } else { "fields need" };
                self.status_message = Some(format!("{count} {noun} attention"));
            }
            None => {}
        }
    }

    /// Check the typed picture path and start decoding it in the background
    fn start_upload(&mut self) {
        let Some(typed) = self.state.form.as_ref().map(|f| f.picture_path.clone()) else {
            return;
        };
        if typed.trim().is_empty() {
            return;
        }
        let path = self.config.resolve_picture_path(&typed);
        let id = self.state.next_upload_id();

        let accepted = PictureFile::probe(path).and_then(|file| match self.state.form.as_mut() {
            Some(form) => form.upload_picture(file, id).map(Some),
            None => Ok(None),
        });

        match accepted {
            Ok(Some(ticket)) => {
                tracing::info!("Loading picture {}", ticket.file.path.display());
                self.status_message = Some("Loading picture...".to_string());
                spawn_decode(Arc::clone(&self.reader), ticket, self.upload_tx.clone());
            }
            Ok(None) => {}
            Err(e) => {
                tracing::info!("Picture rejected: {e}");
                self.state.push_alert(e.to_string());
            }
        }
    }

    /// Apply every finished upload waiting on the channel
    pub fn poll_uploads(&mut self) {
        loop {
            match self.upload_rx.try_recv() {
                Ok(event) => {
                    if self.state.apply_upload(event) {
                        self.status_message = Some("Picture loaded".to_string());
                    }
                }
                Err(TryRecvError::Empty) => break,
                // Unreachable while `upload_tx` is held
                Err(TryRecvError::Disconnected) => break,
            }
        }
    }
}
