//! Form field value objects

use std::fmt;
use std::path::PathBuf;

/// Identifier of a sign-up form field
///
/// Declaration order is the validation order, so the first failing field
/// sorts first in an `ErrorMap`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldId {
    Fullname,
    Email,
    Password,
    Password2,
    Age,
    Cv,
    Photo,
    Bio,
    Agree,
}

impl FieldId {
    /// All fields in focus and validation order
    pub const ALL: [FieldId; 9] = [
        FieldId::Fullname,
        FieldId::Email,
        FieldId::Password,
        FieldId::Password2,
        FieldId::Age,
        FieldId::Cv,
        FieldId::Photo,
        FieldId::Bio,
        FieldId::Agree,
    ];

    /// Element identifier of the field
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fullname => "fullname",
            Self::Email => "email",
            Self::Password => "password",
            Self::Password2 => "password2",
            Self::Age => "age",
            Self::Cv => "cv",
            Self::Photo => "photo",
            Self::Bio => "bio",
            Self::Agree => "agree",
        }
    }

    /// Identifier of the error slot next to the field
    pub fn error_slot(&self) -> String {
        format!("err-{}", self.as_str())
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Fullname => "Full name",
            Self::Email => "Email",
            Self::Password => "Password",
            Self::Password2 => "Confirm password",
            Self::Age => "Age",
            Self::Cv => "CV (PDF path)",
            Self::Photo => "Profile photo (JPG path)",
            Self::Bio => "Short bio",
            Self::Agree => "I accept the forum rules",
        }
    }

    /// Position in `ALL`
    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Type-safe field values
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    /// Text rendered masked
    Secret(String),
    /// Path of the selected file, empty when nothing is selected
    File(String),
    Checkbox(bool),
}

impl Default for FieldValue {
    fn default() -> Self {
        FieldValue::Text(String::new())
    }
}

/// A file picked through a file field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub path: PathBuf,
    pub name: String,
}

impl SelectedFile {
    fn from_path(path: &str) -> Self {
        let path = PathBuf::from(path);
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());
        Self { path, name }
    }
}

/// Represents a single form field with its configuration and value
#[derive(Debug, Clone)]
pub struct FormField {
    pub id: FieldId,
    pub value: FieldValue,
    pub is_multiline: bool,
}

impl FormField {
    /// Create a new text field
    pub fn text(id: FieldId, is_multiline: bool) -> Self {
        Self {
            id,
            value: FieldValue::Text(String::new()),
            is_multiline,
        }
    }

    /// Create a new masked field
    pub fn secret(id: FieldId) -> Self {
        Self {
            id,
            value: FieldValue::Secret(String::new()),
            is_multiline: false,
        }
    }

    /// Create a new file field
    pub fn file(id: FieldId) -> Self {
        Self {
            id,
            value: FieldValue::File(String::new()),
            is_multiline: false,
        }
    }

    /// Create a new checkbox field
    pub fn checkbox(id: FieldId) -> Self {
        Self {
            id,
            value: FieldValue::Checkbox(false),
            is_multiline: false,
        }
    }

    pub fn label(&self) -> &'static str {
        self.id.label()
    }

    /// Get the text value (empty for checkboxes)
    pub fn as_text(&self) -> &str {
        match &self.value {
            FieldValue::Text(s) | FieldValue::Secret(s) | FieldValue::File(s) => s,
            FieldValue::Checkbox(_) => "",
        }
    }

    /// Get the checked state (false for non-checkbox fields)
    pub fn is_checked(&self) -> bool {
        matches!(self.value, FieldValue::Checkbox(true))
    }

    /// Files currently selected; file inputs hold at most one
    ///
    /// A typed path only counts once it names an existing regular file.
    pub fn selected_files(&self) -> Vec<SelectedFile> {
        match &self.value {
            FieldValue::File(path) if !path.trim().is_empty() => {
                let file = SelectedFile::from_path(path.trim());
                if file.path.is_file() {
                    vec![file]
                } else {
                    Vec::new()
                }
            }
            _ => Vec::new(),
        }
    }

    /// Set the text value, keeping the field kind
    pub fn set_text(&mut self, value: impl Into<String>) {
        match &mut self.value {
            FieldValue::Text(s) | FieldValue::Secret(s) | FieldValue::File(s) => *s = value.into(),
            FieldValue::Checkbox(_) => {}
        }
    }

    pub fn set_checked(&mut self, checked: bool) {
        if let FieldValue::Checkbox(c) = &mut self.value {
            *c = checked;
        }
    }

    /// Flip a checkbox
    pub fn toggle(&mut self) {
        if let FieldValue::Checkbox(c) = &mut self.value {
            *c = !*c;
        }
    }

    /// Push a character to the field value
    pub fn push_char(&mut self, c: char) {
        match &mut self.value {
            FieldValue::Text(s) | FieldValue::Secret(s) | FieldValue::File(s) => s.push(c),
            FieldValue::Checkbox(_) => {
                if c == ' ' {
                    self.toggle();
                }
            }
        }
    }

    /// Remove the last character from the field value
    pub fn pop_char(&mut self) {
        match &mut self.value {
            FieldValue::Text(s) | FieldValue::Secret(s) | FieldValue::File(s) => {
                s.pop();
            }
            FieldValue::Checkbox(_) => {}
        }
    }

    /// Clear the field value
    pub fn clear(&mut self) {
        match &mut self.value {
            FieldValue::Text(s) | FieldValue::Secret(s) | FieldValue::File(s) => s.clear(),
            FieldValue::Checkbox(c) => *c = false,
        }
    }

    /// Get the display value for rendering
    pub fn display_value(&self) -> String {
        match &self.value {
            FieldValue::Text(s) | FieldValue::File(s) => s.clone(),
            FieldValue::Secret(s) => "•".repeat(s.chars().count()),
            FieldValue::Checkbox(true) => "[x]".to_string(),
            FieldValue::Checkbox(false) => "[ ]".to_string(),
        }
    }
}
