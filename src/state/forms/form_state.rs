//! Form state management for the sign-up form

use super::field::{FieldId, FormField};

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
    fn get_active_field_mut(&mut self) -> Option<&mut FormField>;
}

/// Buttons shown below the fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormButton {
    #[default]
    Join,
    Reset,
}

impl FormButton {
    pub fn toggle(&mut self) {
        *self = match self {
            Self::Join => Self::Reset,
            Self::Reset => Self::Join,
        };
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Join => "Join",
            Self::Reset => "Reset",
        }
    }
}

/// Index of the buttons row, right after the last field
const BUTTONS_ROW: usize = FieldId::ALL.len();

// Join Form
#[derive(Debug, Clone)]
pub struct JoinForm {
    pub fullname: FormField,
    pub email: FormField,
    pub password: FormField,
    pub password2: FormField,
    pub age: FormField,
    pub cv: FormField,
    pub photo: FormField,
    pub bio: FormField,
    pub agree: FormField,
    pub active_field_index: usize,
    /// Which button is selected when on the buttons row
    pub selected_button: FormButton,
}

impl JoinForm {
    pub fn new() -> Self {
        Self {
            fullname: FormField::text(FieldId::Fullname, false),
            email: FormField::text(FieldId::Email, false),
            password: FormField::secret(FieldId::Password),
            password2: FormField::secret(FieldId::Password2),
            age: FormField::text(FieldId::Age, false),
            cv: FormField::file(FieldId::Cv),
            photo: FormField::file(FieldId::Photo),
            bio: FormField::text(FieldId::Bio, true),
            agree: FormField::checkbox(FieldId::Agree),
            active_field_index: 0,
            selected_button: FormButton::default(),
        }
    }

    pub fn field(&self, id: FieldId) -> &FormField {
        match id {
            FieldId::Fullname => &self.fullname,
            FieldId::Email => &self.email,
            FieldId::Password => &self.password,
            FieldId::Password2 => &self.password2,
            FieldId::Age => &self.age,
            FieldId::Cv => &self.cv,
            FieldId::Photo => &self.photo,
            FieldId::Bio => &self.bio,
            FieldId::Agree => &self.agree,
        }
    }

    pub fn field_mut(&mut self, id: FieldId) -> &mut FormField {
        match id {
            FieldId::Fullname => &mut self.fullname,
            FieldId::Email => &mut self.email,
            FieldId::Password => &mut self.password,
            FieldId::Password2 => &mut self.password2,
            FieldId::Age => &mut self.age,
            FieldId::Cv => &mut self.cv,
            FieldId::Photo => &mut self.photo,
            FieldId::Bio => &mut self.bio,
            FieldId::Agree => &mut self.agree,
        }
    }

    /// Move input focus to a field
    pub fn focus(&mut self, id: FieldId) {
        self.active_field_index = id.index();
    }

    /// Field holding focus, `None` on the buttons row
    pub fn focused_field(&self) -> Option<FieldId> {
        FieldId::ALL.get(self.active_field_index).copied()
    }

    /// Returns true if the buttons row is currently active
    pub fn is_buttons_row_active(&self) -> bool {
        self.active_field_index == BUTTONS_ROW
    }

    /// Live length of the bio text in UTF-16 units, as a browser counts it
    pub fn bio_count(&self) -> usize {
        self.bio.as_text().encode_utf16().count()
    }

    /// Clear every field value and return focus to the top
    pub fn clear(&mut self) {
        for id in FieldId::ALL {
            self.field_mut(id).clear();
        }
        self.active_field_index = 0;
        self.selected_button = FormButton::default();
    }
}

impl Default for JoinForm {
    fn default() -> Self {
        Self::new()
    }
}

impl Form for JoinForm {
    fn field_count(&self) -> usize {
        BUTTONS_ROW + 1 // fields, buttons
    }
    fn active_field(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field(&mut self, index: usize) {
        self.active_field_index = index.min(BUTTONS_ROW);
    }
    fn get_active_field_mut(&mut self) -> Option<&mut FormField> {
        let id = self.focused_field()?;
        Some(self.field_mut(id))
    }
}
