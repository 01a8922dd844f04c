//! Application state definitions

use super::forms::{RegistrationForm, SubmitOutcome, UploadApplied};
use super::store::{FormAction, FormData, FormStore};
use crate::upload::UploadEvent;
use std::collections::VecDeque;

/// Current view in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Landing,
    Registration,
}

impl View {
    /// Route path shown in the status bar
    pub fn path(&self) -> &'static str {
        match self {
            Self::Landing => "/",
            Self::Registration => "/uncontrolled",
        }
    }
}

/// Buttons on the landing page, top to bottom
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LandingButton {
    /// Opens the registration form
    RegistrationForm,
    /// Rendered but has no action
    HookForm,
}

impl LandingButton {
    pub const ALL: [LandingButton; 2] = [LandingButton::RegistrationForm, LandingButton::HookForm];

    pub fn label(self) -> &'static str {
        match self {
            Self::RegistrationForm => "Uncontrolled form",
            Self::HookForm => "React Hook Form",
        }
    }

    pub fn is_enabled(self) -> bool {
        matches!(self, Self::RegistrationForm)
    }
}

/// Main application state
#[derive(Debug, Default)]
pub struct AppState {
    // Navigation
    pub current_view: View,
    pub landing_selected: usize,

    /// Committed registration record
    pub store: FormStore,
    /// Form for the current visit to the registration page
    pub form: Option<RegistrationForm>,

    /// Blocking alerts, shown one at a time
    alerts: VecDeque<String>,
    last_upload_id: u64,
}

impl AppState {
    pub fn new(initial: FormData) -> Self {
        Self {
            store: FormStore::new(initial),
            ..Default::default()
        }
    }

    /// Switch views. Entering the form seeds a fresh draft from the store;
    /// leaving it drops the draft.
    pub fn navigate(&mut self, view: View) {
        tracing::debug!("Navigating {} -> {}", self.current_view.path(), view.path());
        self.form = match view {
            View::Registration => Some(RegistrationForm::new(self.store.data())),
            View::Landing => None,
        };
        self.current_view = view;
    }

    pub fn selected_landing_button(&self) -> LandingButton {
        LandingButton::ALL[self.landing_selected.min(LandingButton::ALL.len() - 1)]
    }

    /// Move landing selection down (wraps)
    pub fn next_landing_button(&mut self) {
        self.landing_selected = (self.landing_selected + 1) % LandingButton::ALL.len();
    }

    /// Move landing selection up (wraps)
    pub fn prev_landing_button(&mut self) {
        if self.landing_selected == 0 {
            self.landing_selected = LandingButton::ALL.len() - 1;
        } else {
            self.landing_selected -= 1;
        }
    }

    /// Activate the selected landing button
    pub fn press_landing_button(&mut self) {
        match self.selected_landing_button() {
            LandingButton::RegistrationForm => self.navigate(View::Registration),
            LandingButton::HookForm => tracing::debug!("Hook form button has no action"),
        }
    }

    /// Id for the next accepted upload, unique for the app lifetime
    pub fn next_upload_id(&mut self) -> u64 {
        self.last_upload_id += 1;
        self.last_upload_id
    }

    /// Submit the active form. An accepted draft is committed to the store
    /// and the app returns to the landing page.
    pub fn submit_form(&mut self) -> Option<SubmitOutcome> {
        let outcome = self.form.as_mut()?.submit();
        if let SubmitOutcome::Accepted(data) = &outcome {
            self.store.dispatch(FormAction::Commit(data.clone()));
            self.navigate(View::Landing);
        }
        Some(outcome)
    }

    /// Deliver a finished decode to the active form, if any
    pub fn apply_upload(&mut self, event: UploadEvent) -> bool {
        let Some(form) = self.form.as_mut() else {
            tracing::debug!("Upload {} finished with no form open", event.ticket);
            return false;
        };
        match form.apply_upload(event) {
            Ok(applied) => applied == UploadApplied::Updated,
            Err(e) => {
                tracing::warn!("Picture upload failed: {e}");
                self.push_alert(e.to_string());
                false
            }
        }
    }

    pub fn push_alert(&mut self, message: impl Into<String>) {
        self.alerts.push_back(message.into());
    }

    pub fn has_alerts(&self) -> bool {
        !self.alerts.is_empty()
    }

    pub fn current_alert(&self) -> Option<&str> {
        self.alerts.front().map(String::as_str)
    }

    pub fn dismiss_alert(&mut self) {
        self.alerts.pop_front();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{FieldId, Form};
    use pretty_assertions::assert_eq;

    fn valid_data() -> FormData {
        FormData {
            name: "Alice".to_string(),
            age: "0".to_string(),
            email: "alice@example.com".to_string(),
            password: "Passw0rd!".to_string(),
            confirm_password: "Passw0rd!".to_string(),
            terms: true,
            picture: "data:image/jpeg;base64,AAAA".to_string(),
            country_select: "Belarus".to_string(),
            ..FormData::default()
        }
    }

    /// Open the form on a store already holding `data`
    fn open_form_with(data: FormData) -> AppState {
        let mut state = AppState::new(data);
        state.navigate(View::Registration);
        state
    }

    #[test]
    fn test_paths() {
        assert_eq!(View::Landing.path(), "/");
        assert_eq!(View::Registration.path(), "/uncontrolled");
    }

    #[test]
    fn test_starts_on_landing_without_form() {
        let state = AppState::default();
        assert_eq!(state.current_view, View::Landing);
        assert!(state.form.is_none());
    }

    #[test]
    fn test_landing_selection_wraps() {
        let mut state = AppState::default();
        state.prev_landing_button();
        assert_eq!(state.selected_landing_button(), LandingButton::HookForm);
        state.next_landing_button();
        assert_eq!(
            state.selected_landing_button(),
            LandingButton::RegistrationForm
        );
    }

    #[test]
    fn test_hook_form_button_is_inert() {
        let mut state = AppState::default();
        state.landing_selected = 1;
        state.press_landing_button();
        assert_eq!(state.current_view, View::Landing);
        assert!(state.form.is_none());
    }

    #[test]
    fn test_registration_button_opens_form() {
        let mut state = AppState::default();
        state.press_landing_button();
        assert_eq!(state.current_view, View::Registration);
        assert!(state.form.is_some());
    }

    #[test]
    fn test_valid_submit_commits_and_returns_home() {
        let mut state = open_form_with(valid_data());
        assert!(state.store.committed_at().is_none());

        let outcome = state.submit_form().unwrap();

        assert_eq!(outcome, SubmitOutcome::Accepted(valid_data()));
        assert_eq!(state.store.data(), &valid_data());
        assert!(state.store.committed_at().is_some());
        assert_eq!(state.current_view, View::Landing);
        assert!(state.form.is_none());
    }

    #[test]
    fn test_invalid_submit_leaves_store_unchanged() {
        let bad = FormData {
            name: "alice".to_string(),
            ..valid_data()
        };
        let mut state = open_form_with(bad.clone());

        let outcome = state.submit_form().unwrap();

        assert_eq!(outcome, SubmitOutcome::Rejected(1));
        assert_eq!(state.store.data(), &bad);
        assert!(state.store.committed_at().is_none());
        assert_eq!(state.current_view, View::Registration);
        let errors = state.form.as_ref().unwrap().errors();
        assert_eq!(
            errors.message(FieldId::Name).unwrap(),
            "First character must be uppercase"
        );
    }

    #[test]
    fn test_revisit_seeds_from_committed_record() {
        let mut state = open_form_with(valid_data());
        let form = state.form.as_mut().unwrap();
        form.set_active_field(2);
        (0..3).for_each(|_| form.backspace());
        "org".chars().for_each(|c| form.input_char(c));
        state.submit_form();

        state.navigate(View::Registration);
        assert_eq!(state.form.as_ref().unwrap().draft().email, "alice@example.org");
    }

    #[test]
    fn test_leaving_discards_draft() {
        let mut state = AppState::default();
        state.navigate(View::Registration);
        "Draft".chars().for_each(|c| state.form.as_mut().unwrap().input_char(c));
        state.navigate(View::Landing);
        state.navigate(View::Registration);
        assert_eq!(state.form.as_ref().unwrap().draft().name, "");
    }

    #[test]
    fn test_submit_without_form() {
        let mut state = AppState::default();
        assert!(state.submit_form().is_none());
    }

    #[test]
    fn test_upload_ids_are_unique() {
        let mut state = AppState::default();
        let a = state.next_upload_id();
        let b = state.next_upload_id();
        assert_ne!(a, b);
    }

    #[test]
    fn test_upload_after_leaving_form_is_dropped() {
        let mut state = AppState::default();
        let event = UploadEvent {
            ticket: 1,
            result: Ok("data:image/png;base64,AAAA".to_string()),
        };
        assert!(!state.apply_upload(event));
        assert!(!state.has_alerts());
    }

    #[test]
    fn test_alert_queue() {
        let mut state = AppState::default();
        state.push_alert("first");
        state.push_alert("second");
        assert_eq!(state.current_alert(), Some("first"));
        state.dismiss_alert();
        assert_eq!(state.current_alert(), Some("second"));
        state.dismiss_alert();
        assert!(!state.has_alerts());
    }
}
