//! Registration form state: draft, errors and focus

use super::field::{cycle_option, Cycle, FieldId, FieldKind, FieldUpdate};
use crate::state::{FormData, GENDERS};
use crate::upload::{PictureFile, UploadError, UploadEvent, UploadTicket};
use crate::validation::{validate, Validation, ValidationErrors};

/// Trait for common form operations
pub trait Form {
    fn field_count(&self) -> usize;
    fn active_field(&self) -> usize;
    fn set_active_field(&mut self, index: usize);
    fn next_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        self.set_active_field((current + 1) % count);
    }
    fn prev_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        if current == 0 {
            self.set_active_field(count - 1);
        } else {
            self.set_active_field(current - 1);
        }
    }
}

/// Lifecycle of one form visit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormPhase {
    #[default]
    Editing,
    /// Draft accepted; the instance is done
    Submitted,
}

/// Result of a submit attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Draft passed validation and should be committed
    Accepted(FormData),
    /// Draft failed; the error set now lists these many fields
    Rejected(usize),
}

/// What happened to a finished upload
#[derive(Debug, PartialEq, Eq)]
pub enum UploadApplied {
    /// The picture field now holds the decoded image
    Updated,
    /// A newer upload was started after this one, or none was pending
    Stale,
}

/// The registration form for one visit to the form page
#[derive(Debug, Clone)]
pub struct RegistrationForm {
    draft: FormData,
    errors: ValidationErrors,
    phase: FormPhase,
    pub active_field_index: usize,
    /// Path typed into the picture prompt
    pub picture_path: String,
    pending_upload: Option<u64>,
}

impl RegistrationForm {
    /// Index of the Submit button row
    pub const SUBMIT_INDEX: usize = FieldId::INPUTS.len();

    /// Start a visit seeded from the committed record
    pub fn new(seed: &FormData) -> Self {
        Self {
            draft: seed.clone(),
            errors: ValidationErrors::default(),
            phase: FormPhase::Editing,
            active_field_index: 0,
            picture_path: String::new(),
            pending_upload: None,
        }
    }

    pub fn draft(&self) -> &FormData {
        &self.draft
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    /// Ticket id of the upload whose result will be applied
    pub fn pending_upload(&self) -> Option<u64> {
        self.pending_upload
    }

    /// Field under focus, `None` on the Submit row
    pub fn active_field_id(&self) -> Option<FieldId> {
        FieldId::INPUTS.get(self.active_field_index).copied()
    }

    pub fn is_submit_active(&self) -> bool {
        self.active_field_index == Self::SUBMIT_INDEX
    }

    /// Apply one field change, leaving the rest of the draft untouched
    fn update_field(&mut self, update: FieldUpdate) {
        if self.phase == FormPhase::Submitted {
            tracing::debug!("Ignoring {update:?} after submit");
            return;
        }
        let draft = &mut self.draft;
        match update {
            FieldUpdate::Push(field, c) => {
                if let Some(value) = text_value_mut(draft, field) {
                    value.push(c);
                }
            }
            FieldUpdate::Pop(field) => {
                if let Some(value) = text_value_mut(draft, field) {
                    value.pop();
                }
            }
            FieldUpdate::CycleGender(dir) => {
                let options: Vec<String> = GENDERS.iter().map(|g| g.to_string()).collect();
                if let Some(next) = cycle_option(&options, &draft.gender, dir) {
                    draft.gender = next.clone();
                }
            }
            FieldUpdate::Terms(accepted) => draft.terms = accepted,
            FieldUpdate::CycleCountry(dir) => {
                if let Some(next) = cycle_option(&draft.country, &draft.country_select, dir) {
                    draft.country_select = next.clone();
                }
            }
            FieldUpdate::Picture(data_url) => draft.picture = data_url,
        }
    }

    /// Type a character into the focused input
    pub fn input_char(&mut self, c: char) {
        match self.active_field_id() {
            Some(field) if field.accepts_text() => self.update_field(FieldUpdate::Push(field, c)),
            Some(FieldId::Picture) => self.picture_path.push(c),
            _ => {}
        }
    }

    /// Delete the last character of the focused input
    pub fn backspace(&mut self) {
        match self.active_field_id() {
            Some(field) if field.accepts_text() => self.update_field(FieldUpdate::Pop(field)),
            Some(FieldId::Picture) => {
                self.picture_path.pop();
            }
            _ => {}
        }
    }

    /// Space on a radio or checkbox
    pub fn toggle_active(&mut self) {
        match self.active_field_id().map(FieldId::kind) {
            Some(FieldKind::Radio) => self.update_field(FieldUpdate::CycleGender(Cycle::Next)),
            Some(FieldKind::Checkbox) => {
                let accepted = !self.draft.terms;
                self.update_field(FieldUpdate::Terms(accepted));
            }
            Some(FieldKind::Select) => self.update_field(FieldUpdate::CycleCountry(Cycle::Next)),
            _ => {}
        }
    }

    /// Left/Right on a radio or select
    pub fn cycle_active(&mut self, dir: Cycle) {
        match self.active_field_id().map(FieldId::kind) {
            Some(FieldKind::Radio) => self.update_field(FieldUpdate::CycleGender(dir)),
            Some(FieldKind::Select) => self.update_field(FieldUpdate::CycleCountry(dir)),
            _ => {}
        }
    }

    /// Check a chosen file and, when acceptable, hand back a ticket to decode.
    /// A rejected file leaves the draft untouched.
    pub fn upload_picture(
        &mut self,
        file: PictureFile,
        ticket_id: u64,
    ) -> Result<UploadTicket, UploadError> {
        file.check()?;
        tracing::debug!(
            "Accepted upload {ticket_id}: {} ({} bytes)",
            file.path.display(),
            file.size
        );
        self.pending_upload = Some(ticket_id);
        Ok(UploadTicket {
            id: ticket_id,
            file,
        })
    }

    /// Apply a finished decode. Only the most recently accepted upload lands.
    pub fn apply_upload(&mut self, event: UploadEvent) -> Result<UploadApplied, UploadError> {
        if self.pending_upload != Some(event.ticket) {
            tracing::debug!(
                "Dropping stale upload {} (pending {:?})",
                event.ticket,
                self.pending_upload
            );
            return Ok(UploadApplied::Stale);
        }
        self.pending_upload = None;
        let data_url = event.result?;
        self.update_field(FieldUpdate::Picture(data_url));
        Ok(UploadApplied::Updated)
    }

    /// Validate the draft. Errors from a previous attempt are replaced, never merged.
    pub fn submit(&mut self) -> SubmitOutcome {
        match validate(&self.draft) {
            Validation::Valid => {
                self.errors = ValidationErrors::default();
                self.phase = FormPhase::Submitted;
                SubmitOutcome::Accepted(self.draft.clone())
            }
            Validation::Invalid(errors) => {
                let count = errors.len();
                self.errors = errors;
                SubmitOutcome::Rejected(count)
            }
        }
    }
}

fn text_value_mut(draft: &mut FormData, field: FieldId) -> Option<&mut String> {
    match field {
        FieldId::Name => Some(&mut draft.name),
        FieldId::Age => Some(&mut draft.age),
        FieldId::Email => Some(&mut draft.email),
        FieldId::Password => Some(&mut draft.password),
        FieldId::ConfirmPassword => Some(&mut draft.confirm_password),
        _ => None,
    }
}

impl Form for RegistrationForm {
    fn field_count(&self) -> usize {
        Self::SUBMIT_INDEX + 1
    }
    fn active_field(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field(&mut self, index: usize) {
        self.active_field_index = index.min(Self::SUBMIT_INDEX);
    }
}
