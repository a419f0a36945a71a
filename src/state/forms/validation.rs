//! Sign-up form validation
//!
//! Rules run in a fixed order and every failure lands in an [`ErrorMap`].
//! Bad input is never an `Err`: the map is the whole result.

use super::field::FieldId;
use super::form_state::JoinForm;
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

pub const FULLNAME_REQUIRED: &str = "Please enter your full name.";
pub const EMAIL_INVALID: &str = "Please enter a valid email address.";
pub const PASSWORD_TOO_SHORT: &str = "Password must be at least 6 characters.";
pub const PASSWORDS_DIFFER: &str = "Passwords do not match.";
pub const AGE_TOO_LOW: &str = "You must be at least 18 years old to join.";
pub const CV_MISSING: &str = "Please upload your CV (PDF).";
pub const CV_NOT_PDF: &str = "CV must be a .pdf file.";
pub const PHOTO_MISSING: &str = "Please upload a profile photo (jpg/jpeg).";
pub const PHOTO_NOT_JPEG: &str = "Photo must be .jpg or .jpeg.";
pub const RULES_NOT_ACCEPTED: &str = "You must accept the forum rules.";

pub const MIN_PASSWORD_LEN: usize = 6;
pub const MIN_AGE: f64 = 18.0;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex should compile")
});

/// Field-id to message mapping, ordered by validation order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorMap(BTreeMap<FieldId, String>);

impl ErrorMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: FieldId, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn get(&self, field: FieldId) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn remove(&mut self, field: FieldId) -> Option<String> {
        self.0.remove(&field)
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// First failing field in validation order
    pub fn first_field(&self) -> Option<FieldId> {
        self.0.keys().next().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FieldId, &str)> {
        self.0.iter().map(|(k, v)| (*k, v.as_str()))
    }
}

/// Result of one submit attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationOutcome {
    pub errors: ErrorMap,
}

impl ValidationOutcome {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Field that should receive focus after a failed attempt
    pub fn focus(&self) -> Option<FieldId> {
        self.errors.first_field()
    }
}

/// Run every rule against the current field values
pub fn validate(form: &JoinForm) -> ValidationOutcome {
    let mut errors = ErrorMap::new();

    if form.fullname.as_text().trim().is_empty() {
        errors.insert(FieldId::Fullname, FULLNAME_REQUIRED);
    }

    // Email inputs drop surrounding whitespace before checking
    if !is_valid_email(form.email.as_text().trim()) {
        errors.insert(FieldId::Email, EMAIL_INVALID);
    }

    let password = form.password.as_text();
    // Length in UTF-16 units, like an input's `value.length`
    if password.encode_utf16().count() < MIN_PASSWORD_LEN {
        errors.insert(FieldId::Password, PASSWORD_TOO_SHORT);
    }

    if form.password2.as_text() != password {
        errors.insert(FieldId::Password2, PASSWORDS_DIFFER);
    }

    if !parse_age(form.age.as_text()).is_some_and(|age| age >= MIN_AGE) {
        errors.insert(FieldId::Age, AGE_TOO_LOW);
    }

    match form.cv.selected_files().first() {
        None => errors.insert(FieldId::Cv, CV_MISSING),
        Some(file) if !is_pdf(&file.name) => errors.insert(FieldId::Cv, CV_NOT_PDF),
        Some(_) => {}
    }

    match form.photo.selected_files().first() {
        None => errors.insert(FieldId::Photo, PHOTO_MISSING),
        Some(file) if !is_jpeg(&file.name) => errors.insert(FieldId::Photo, PHOTO_NOT_JPEG),
        Some(_) => {}
    }

    if !form.agree.is_checked() {
        errors.insert(FieldId::Agree, RULES_NOT_ACCEPTED);
    }

    ValidationOutcome { errors }
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

/// Parse an age the way a number input coerces it
///
/// Empty, NaN or infinite input yields `None`; "not a number" and "too
/// young" share one message.
pub fn parse_age(age: &str) -> Option<f64> {
    let age = age.trim();
    if age.is_empty() {
        return None;
    }
    age.parse::<f64>().ok().filter(|n| n.is_finite())
}

pub fn is_pdf(file_name: &str) -> bool {
    file_name.to_lowercase().ends_with(".pdf")
}

pub fn is_jpeg(file_name: &str) -> bool {
    let name = file_name.to_lowercase();
    name.ends_with(".jpg") || name.ends_with(".jpeg")
}
