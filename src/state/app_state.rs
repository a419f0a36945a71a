//! Application state definitions
//!
//! `AppState` is the view-model of the sign-up page: every region the
//! page exposes (fields, error slots, message banner, preview, consent
//! banner) is a named field here instead of an element looked up by id.

use super::consent::ConsentBanner;
use super::forms::{ErrorMap, FieldId, JoinForm};
use super::preview_state::PhotoPreview;
use super::theme::ThemeMode;
use chrono::{Datelike, Utc};

/// Banner text after a failed submit
pub const SUBMIT_ERROR_MESSAGE: &str =
    "Some fields need attention. Please fix errors and submit again.";

/// Banner text after a successful submit
pub const SUBMIT_SUCCESS_MESSAGE: &str =
    "Submission successful! Welcome to StudEng Forum — a confirmation was simulated (no server).";

/// Kind of the `formMessage` banner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MessageKind {
    Success,
    #[default]
    Error,
}

/// The `formMessage` region
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormMessage {
    pub kind: MessageKind,
    pub text: String,
    pub visible: bool,
}

/// Main application state
#[derive(Debug)]
pub struct AppState {
    pub form: JoinForm,
    /// Contents of the `err-<field>` slots
    pub errors: ErrorMap,
    pub form_message: FormMessage,
    pub preview: PhotoPreview,
    pub consent: ConsentBanner,
    pub theme: ThemeMode,
    /// Transient status bar notice (cookie failures, quit hint)
    pub status_message: Option<String>,
    /// Year shown in the footer
    pub year: i32,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            form: JoinForm::default(),
            errors: ErrorMap::default(),
            form_message: FormMessage::default(),
            preview: PhotoPreview::default(),
            consent: ConsentBanner::default(),
            theme: ThemeMode::default(),
            status_message: None,
            year: Utc::now().year(),
        }
    }
}

impl AppState {
    pub fn show_error(&mut self, field: FieldId, message: impl Into<String>) {
        self.errors.insert(field, message);
    }

    pub fn clear_error(&mut self, field: FieldId) {
        self.errors.remove(field);
    }

    pub fn clear_all_errors(&mut self) {
        self.errors.clear();
    }

    pub fn error_for(&self, field: FieldId) -> Option<&str> {
        self.errors.get(field)
    }

    pub fn show_form_message(&mut self, kind: MessageKind, text: impl Into<String>) {
        self.form_message = FormMessage {
            kind,
            text: text.into(),
            visible: true,
        };
    }

    pub fn hide_form_message(&mut self) {
        self.form_message.visible = false;
    }

    /// Value of the `bioCount` region
    pub fn bio_count(&self) -> usize {
        self.form.bio_count()
    }

    pub fn push_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }
}
