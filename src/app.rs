//! Application state and core logic

use crate::config::JoinConfig;
use crate::cookies::{
    CookieError, CookieJarTrait, CookieStore, FileCookieJar, EMAIL_COOKIE, NAME_COOKIE,
};
use crate::platform;
use crate::preview::{FsPhotoSource, PhotoSource, PreviewLoader, PreviewMessage};
use crate::state::{
    is_jpeg, validate, AppState, ConsentBanner, FieldId, Form, FormButton,
    MessageKind, ThemeMode, PHOTO_NOT_JPEG, SUBMIT_ERROR_MESSAGE, SUBMIT_SUCCESS_MESSAGE,
};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::time::{Duration, Instant};

/// Lifetime of the remembered name/email cookies in days
pub const REMEMBER_DAYS: i64 = 7;

/// Window for the second Ctrl+C press
const QUIT_WINDOW: Duration = Duration::from_secs(1);

/// Main application struct
pub struct App<J: CookieJarTrait = FileCookieJar, S: PhotoSource = FsPhotoSource> {
    /// Current application state
    pub state: AppState,
    /// Cookie helpers over the jar
    pub cookies: CookieStore<J>,
    /// Background photo loads
    preview_loader: PreviewLoader<S>,
    /// Photo path the current preview was started for
    last_photo_selection: Option<String>,
    /// Whether the app should quit
    quit: bool,
    /// Timestamp of last Ctrl+C press for double-tap quit
    pub last_ctrl_c: Option<Instant>,
}

impl App {
    /// Create the app from user configuration
    pub fn new(config: &JoinConfig) -> Self {
        let (jar, warning) = match config.cookie_jar_path() {
            Some(path) => match FileCookieJar::open(&path) {
                Ok(jar) => {
                    tracing::debug!("Cookie jar opened at {:?}", jar.path());
                    (jar, None)
                }
                Err(e) => {
                    tracing::warn!("Cookie jar {} unusable: {e}", path.display());
                    (
                        FileCookieJar::in_memory(),
                        Some(format!("Cookies not saved: {e}")),
                    )
                }
            },
            None => {
                tracing::warn!("No data directory available, cookies kept in memory");
                (FileCookieJar::in_memory(), None)
            }
        };

        // Half-block cells show two pixel rows each
        let width = u32::from(config.preview_width());
        let loader = PreviewLoader::new(FsPhotoSource, width, width);

        let mut app = Self::with_parts(
            CookieStore::new(jar),
            loader,
            ThemeMode::from_dark(config.dark_theme()),
        );
        if let Some(warning) = warning {
            app.state.push_status(warning);
        }
        app
    }
}

impl<J: CookieJarTrait, S: PhotoSource + 'static> App<J, S> {
    /// Assemble an app from its collaborators and run the load-time bootstrap
    pub fn with_parts(
        cookies: CookieStore<J>,
        preview_loader: PreviewLoader<S>,
        theme: ThemeMode,
    ) -> Self {
        let mut app = Self {
            state: AppState {
                theme,
                ..AppState::default()
            },
            cookies,
            preview_loader,
            last_photo_selection: None,
            quit: false,
            last_ctrl_c: None,
        };
        app.bootstrap();
        app
    }

    /// Restore remembered values and decide whether the consent banner shows
    fn bootstrap(&mut self) {
        if let Some(name) = self.cookies.get(NAME_COOKIE).filter(|v| !v.is_empty()) {
            self.state.form.fullname.set_text(name);
        }
        if let Some(email) = self.cookies.get(EMAIL_COOKIE).filter(|v| !v.is_empty()) {
            self.state.form.email.set_text(email);
        }
        self.state.consent = ConsentBanner::load(&self.cookies);
        tracing::debug!(
            "Bootstrap done (consent banner visible: {})",
            self.state.consent.visible
        );
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// True while a preview load is outstanding
    pub fn preview_pending(&self) -> bool {
        self.state.preview.is_loading()
    }

    /// Validate the form and either report errors or remember name/email
    ///
    /// Returns whether the submission was accepted.
    pub fn submit(&mut self) -> bool {
        self.state.clear_all_errors();
        self.state.hide_form_message();

        let outcome = validate(&self.state.form);
        if !outcome.is_valid() {
            tracing::info!(
                "Submit rejected, {} field(s) need attention",
                outcome.errors.len()
            );
            for (field, message) in outcome.errors.iter() {
                tracing::debug!("{}: {message}", field.error_slot());
            }
            let first = outcome.focus();
            self.state.errors = outcome.errors;
            self.state
                .show_form_message(MessageKind::Error, SUBMIT_ERROR_MESSAGE);
            if let Some(first) = first {
                self.state.form.focus(first);
            }
            return false;
        }

        let name = self.state.form.fullname.as_text().trim().to_string();
        let email = self.state.form.email.as_text().trim().to_string();
        let saved_name = self.cookies.set(NAME_COOKIE, &name, REMEMBER_DAYS);
        let saved_email = self.cookies.set(EMAIL_COOKIE, &email, REMEMBER_DAYS);
        self.report_cookie_result("remember name/email", saved_name.and(saved_email));

        tracing::info!("Submit accepted (simulated, nothing sent)");
        self.state
            .show_form_message(MessageKind::Success, SUBMIT_SUCCESS_MESSAGE);
        true
    }

    /// Forget remembered values and return the page to its initial look
    pub fn reset(&mut self) {
        let name = self.cookies.erase(NAME_COOKIE);
        let email = self.cookies.erase(EMAIL_COOKIE);
        self.report_cookie_result("erase name/email", name.and(email));

        self.state.preview.clear();
        self.state.hide_form_message();
        self.state.form.clear();
        self.state.clear_all_errors();
        self.last_photo_selection = None;
    }

    pub fn toggle_theme(&mut self) {
        self.state.theme.toggle();
    }

    pub fn accept_consent(&mut self) {
        let result = self.state.consent.accept(&mut self.cookies);
        self.report_cookie_result("save consent", result);
    }

    pub fn decline_consent(&mut self) {
        let result = self.state.consent.decline(&mut self.cookies);
        self.report_cookie_result("save consent", result);
    }

    /// React to a new photo selection: clear, check the extension, start loading
    pub fn select_photo(&mut self) {
        self.state.clear_error(FieldId::Photo);
        self.state.preview.clear();
        self.last_photo_selection = Some(self.state.form.photo.as_text().to_string());

        let Some(file) = self.state.form.photo.selected_files().into_iter().next() else {
            return;
        };
        if !is_jpeg(&file.name) {
            self.state.show_error(FieldId::Photo, PHOTO_NOT_JPEG);
            return;
        }

        let generation = self.state.preview.begin(&file.name);
        tracing::debug!("Loading preview {} (generation {generation})", file.name);
        self.preview_loader.spawn(generation, file.path);
    }

    /// Apply every preview load that finished since the last call
    pub fn poll_preview(&mut self) {
        for message in self.preview_loader.drain() {
            self.apply_preview(message);
        }
    }

    fn apply_preview(&mut self, message: PreviewMessage) {
        self.state.preview.complete(message.generation, message.result);
    }

    /// Treat leaving the photo field like a file input `change` event
    fn commit_photo_if_changed(&mut self) {
        let current = self.state.form.photo.as_text();
        if self.last_photo_selection.as_deref().unwrap_or("") != current {
            self.select_photo();
        }
    }

    fn report_cookie_result(&mut self, action: &str, result: Result<(), CookieError>) {
        if let Err(e) = result {
            tracing::warn!("Failed to {action}: {e}");
            self.state.push_status(format!("Could not {action}: {e}"));
        }
    }

    fn move_focus(&mut self, forward: bool) {
        if self.state.form.focused_field() == Some(FieldId::Photo) {
            self.commit_photo_if_changed();
        }
        if forward {
            self.state.form.next_field();
        } else {
            self.state.form.prev_field();
        }
    }

    /// Edit the focused field; any edit clears that field's error slot
    fn input_char(&mut self, c: char) {
        let Some(field) = self.state.form.get_active_field_mut() else {
            return;
        };
        let id = field.id;
        field.push_char(c);
        self.state.clear_error(id);
    }

    fn backspace(&mut self) {
        let Some(field) = self.state.form.get_active_field_mut() else {
            return;
        };
        let id = field.id;
        field.pop_char();
        self.state.clear_error(id);
    }

    /// Handle a key press
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        let action = platform::is_action(key.modifiers);

        // Global quit: double Ctrl+C
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.handle_ctrl_c();
            return Ok(());
        }

        if action && key.code == KeyCode::Char('t') {
            self.toggle_theme();
            return Ok(());
        }

        if self.state.consent.visible {
            self.handle_banner_key(key);
            return Ok(());
        }

        let focused = self.state.form.focused_field();
        let on_buttons = self.state.form.is_buttons_row_active();

        match key.code {
            KeyCode::Char('s') if action => {
                self.submit();
            }
            KeyCode::Char('r') if action => self.reset(),
            KeyCode::Tab => self.move_focus(true),
            KeyCode::BackTab => self.move_focus(false),
            KeyCode::Left | KeyCode::Right if on_buttons => {
                self.state.form.selected_button.toggle();
            }
            KeyCode::Enter if on_buttons => match self.state.form.selected_button {
                FormButton::Join => {
                    self.submit();
                }
                FormButton::Reset => self.reset(),
            },
            KeyCode::Enter => match focused {
                Some(FieldId::Bio) => self.input_char('\n'),
                Some(FieldId::Agree) => self.input_char(' '),
                Some(FieldId::Photo) => {
                    self.select_photo();
                    self.state.form.next_field();
                }
                Some(FieldId::Cv) => self.state.form.next_field(),
                // Enter in a single-line input submits the form
                Some(_) => {
                    self.submit();
                }
                None => {}
            },
            KeyCode::Char(c) if !action => self.input_char(c),
            KeyCode::Backspace => self.backspace(),
            _ => {}
        }
        Ok(())
    }

    /// Keys while the consent banner is up; the form underneath is inert
    fn handle_banner_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('a') | KeyCode::Char('A') => self.accept_consent(),
            KeyCode::Char('d') | KeyCode::Char('D') => self.decline_consent(),
            KeyCode::Left | KeyCode::Right | KeyCode::Tab | KeyCode::BackTab => {
                self.state.consent.selected.toggle();
            }
            KeyCode::Enter => {
                let result = self.state.consent.confirm(&mut self.cookies);
                self.report_cookie_result("save consent", result);
            }
            _ => {}
        }
    }

    fn handle_ctrl_c(&mut self) {
        let now = Instant::now();
        if self
            .last_ctrl_c
            .is_some_and(|last| now.duration_since(last) < QUIT_WINDOW)
        {
            self.quit = true;
        } else {
            self.last_ctrl_c = Some(now);
            self.state.push_status("Press Ctrl+C again to quit");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cookies::{MockCookieJarTrait, CONSENT_COOKIE};
    use crate::preview::{MockPhotoSource, PreviewError};
    use crate::state::{PreviewSlot, AGE_TOO_LOW, CV_MISSING, PASSWORDS_DIFFER, PHOTO_MISSING};
    use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
    use std::io::Cursor;
    use tempfile::TempDir;

    type TestApp = App<FileCookieJar, MockPhotoSource>;

    fn jpeg_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = RgbImage::from_pixel(width, height, Rgb([90, 90, 200]));
        let mut buf = Vec::new();
        DynamicImage::ImageRgb8(img)
            .write_to(&mut Cursor::new(&mut buf), ImageFormat::Jpeg)
            .unwrap();
        buf
    }

    fn app_with_source(source: MockPhotoSource) -> TestApp {
        App::with_parts(
            CookieStore::new(FileCookieJar::in_memory()),
            PreviewLoader::new(source, 8, 8),
            ThemeMode::Light,
        )
    }

    fn app() -> TestApp {
        app_with_source(MockPhotoSource::new())
    }

    /// Create a file named `name` in `dir` and return its path as typed text
    fn touch(dir: &TempDir, name: &str) -> String {
        let path = dir.path().join(name);
        std::fs::write(&path, b"x").unwrap();
        path.display().to_string()
    }

    /// Fill every field so the form passes; keep the dir alive while testing
    fn fill_valid(app: &mut TestApp) -> TempDir {
        let dir = tempfile::tempdir().unwrap();
        let form = &mut app.state.form;
        form.fullname.set_text("  Alice Dupont  ");
        form.email.set_text(" alice@example.com ");
        form.password.set_text("abcdef");
        form.password2.set_text("abcdef");
        form.age.set_text("30");
        form.cv.set_text(touch(&dir, "cv.pdf"));
        form.photo.set_text(touch(&dir, "me.jpg"));
        form.agree.set_checked(true);
        dir
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    mod submit {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_valid_submit_sets_trimmed_cookies() {
            let mut app = app();
            let _dir = fill_valid(&mut app);

            assert!(app.submit());

            assert!(app.state.errors.is_empty());
            assert!(app.state.form_message.visible);
            assert_eq!(app.state.form_message.kind, MessageKind::Success);
            assert_eq!(app.state.form_message.text, SUBMIT_SUCCESS_MESSAGE);
            assert_eq!(app.cookies.get(NAME_COOKIE), Some("Alice Dupont".to_string()));
            assert_eq!(
                app.cookies.get(EMAIL_COOKIE),
                Some("alice@example.com".to_string())
            );
        }

        #[test]
        fn test_invalid_submit_focuses_first_error() {
            let mut app = app();
            let _dir = fill_valid(&mut app);
            app.state.form.age.set_text("17");
            app.state.form.agree.set_checked(false);
            app.state.form.focus(FieldId::Fullname);

            assert!(!app.submit());

            assert_eq!(app.state.errors.len(), 2);
            assert_eq!(app.state.error_for(FieldId::Age), Some(AGE_TOO_LOW));
            assert_eq!(app.state.form.focused_field(), Some(FieldId::Age));
            assert_eq!(app.state.form_message.kind, MessageKind::Error);
            assert_eq!(app.state.form_message.text, SUBMIT_ERROR_MESSAGE);
            assert_eq!(app.cookies.get(NAME_COOKIE), None);
        }

        #[test]
        fn test_errors_are_rebuilt_each_attempt() {
            let mut app = app();
            let _dir = fill_valid(&mut app);
            app.state.form.password2.set_text("abcdez");
            app.submit();
            assert_eq!(app.state.error_for(FieldId::Password2), Some(PASSWORDS_DIFFER));

            app.state.form.password2.set_text("abcdef");
            app.state.form.email.set_text("broken");
            app.submit();
            assert!(app.state.error_for(FieldId::Password2).is_none());
            assert!(app.state.error_for(FieldId::Email).is_some());
            assert_eq!(app.state.errors.len(), 1);
        }

        #[test]
        fn test_repeated_submit_is_idempotent() {
            let mut app = app();
            app.submit();
            let first = app.state.errors.clone();
            app.submit();
            assert_eq!(app.state.errors, first);
        }

        #[test]
        fn test_cookie_failure_still_shows_success() {
            let mut jar = MockCookieJarTrait::new();
            jar.expect_document_cookie().return_const(String::new());
            jar.expect_write()
                .returning(|_| Err(CookieError::EmptyName));
            let mut app: App<MockCookieJarTrait, MockPhotoSource> = App::with_parts(
                CookieStore::new(jar),
                PreviewLoader::new(MockPhotoSource::new(), 8, 8),
                ThemeMode::Light,
            );
            app.state.consent.visible = false;
            let dir = tempfile::tempdir().unwrap();
            let form = &mut app.state.form;
            form.fullname.set_text("Alice");
            form.email.set_text("alice@example.com");
            form.password.set_text("abcdef");
            form.password2.set_text("abcdef");
            form.age.set_text("30");
            form.cv.set_text(touch(&dir, "cv.pdf"));
            form.photo.set_text(touch(&dir, "me.jpg"));
            form.agree.set_checked(true);

            assert!(app.submit());
            assert_eq!(app.state.form_message.kind, MessageKind::Success);
            assert!(app.state.status_message.is_some());
        }
    }

    mod bootstrap {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_restores_name_and_email() {
            let mut cookies = CookieStore::new(FileCookieJar::in_memory());
            cookies.set(NAME_COOKIE, "Alice Dupont", 7).unwrap();
            cookies.set(EMAIL_COOKIE, "alice@example.com", 7).unwrap();

            let app: TestApp = App::with_parts(
                cookies,
                PreviewLoader::new(MockPhotoSource::new(), 8, 8),
                ThemeMode::Dark,
            );

            assert_eq!(app.state.form.fullname.as_text(), "Alice Dupont");
            assert_eq!(app.state.form.email.as_text(), "alice@example.com");
            assert!(app.state.theme.is_dark());
        }

        #[test]
        fn test_fresh_jar_shows_banner() {
            let app = app();
            assert!(app.state.consent.visible);
            assert_eq!(app.state.form.fullname.as_text(), "");
        }
    }

    mod consent {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_decline_hides_banner_and_erases_fields() {
            let mut app = app();
            app.cookies.set(NAME_COOKIE, "Alice", 7).unwrap();
            app.cookies.set(EMAIL_COOKIE, "alice@example.com", 7).unwrap();
            assert!(app.state.consent.visible);

            app.handle_key(key(KeyCode::Char('d'))).unwrap();

            assert!(!app.state.consent.visible);
            assert_eq!(app.cookies.get(CONSENT_COOKIE), Some("declined".to_string()));
            assert_eq!(app.cookies.get(NAME_COOKIE), None);
            assert_eq!(app.cookies.get(EMAIL_COOKIE), None);
        }

        #[test]
        fn test_accept_via_enter() {
            let mut app = app();
            app.handle_key(key(KeyCode::Enter)).unwrap();
            assert!(!app.state.consent.visible);
            assert_eq!(app.cookies.get(CONSENT_COOKIE), Some("accepted".to_string()));
        }

        #[test]
        fn test_banner_swallows_form_input() {
            let mut app = app();
            app.handle_key(key(KeyCode::Char('x'))).unwrap();
            assert_eq!(app.state.form.fullname.as_text(), "");
            assert!(app.state.consent.visible);
        }
    }

    mod keys {
        use super::*;
        use pretty_assertions::assert_eq;

        fn ready_app() -> TestApp {
            let mut app = app();
            app.accept_consent();
            app
        }

        #[test]
        fn test_typing_clears_only_that_error() {
            let mut app = ready_app();
            app.submit();
            assert!(app.state.error_for(FieldId::Fullname).is_some());
            assert!(app.state.error_for(FieldId::Email).is_some());

            app.state.form.focus(FieldId::Fullname);
            app.handle_key(key(KeyCode::Char('A'))).unwrap();

            assert_eq!(app.state.form.fullname.as_text(), "A");
            assert!(app.state.error_for(FieldId::Fullname).is_none());
            assert!(app.state.error_for(FieldId::Email).is_some());
        }

        #[test]
        fn test_space_toggles_agree_and_clears_error() {
            let mut app = ready_app();
            app.submit();
            app.state.form.focus(FieldId::Agree);
            app.handle_key(key(KeyCode::Char(' '))).unwrap();
            assert!(app.state.form.agree.is_checked());
            assert!(app.state.error_for(FieldId::Agree).is_none());
        }

        #[test]
        fn test_enter_in_bio_adds_newline() {
            let mut app = ready_app();
            app.state.form.focus(FieldId::Bio);
            app.handle_key(key(KeyCode::Char('h'))).unwrap();
            app.handle_key(key(KeyCode::Enter)).unwrap();
            assert_eq!(app.state.form.bio.as_text(), "h\n");
            assert_eq!(app.state.bio_count(), 2);
        }

        #[test]
        fn test_enter_in_text_field_submits() {
            let mut app = ready_app();
            app.state.form.focus(FieldId::Email);
            app.handle_key(key(KeyCode::Enter)).unwrap();
            assert!(app.state.form_message.visible);
            assert_eq!(app.state.form.focused_field(), Some(FieldId::Fullname));
        }

        #[test]
        fn test_ctrl_t_toggles_theme_even_with_banner() {
            let mut app = app();
            app.handle_key(ctrl('t')).unwrap();
            assert!(app.state.theme.is_dark());
            assert!(app.state.consent.visible);
        }

        #[test]
        fn test_reset_button_clears_everything() {
            let mut app = ready_app();
            let _dir = fill_valid(&mut app);
            app.submit();
            assert!(app.cookies.get(NAME_COOKIE).is_some());

            app.state.form.set_active_field(FieldId::ALL.len());
            app.handle_key(key(KeyCode::Right)).unwrap();
            assert_eq!(app.state.form.selected_button, FormButton::Reset);
            app.handle_key(key(KeyCode::Enter)).unwrap();

            assert_eq!(app.cookies.get(NAME_COOKIE), None);
            assert_eq!(app.cookies.get(EMAIL_COOKIE), None);
            assert!(!app.state.form_message.visible);
            assert_eq!(app.state.preview.slot, PreviewSlot::Empty);
            assert_eq!(app.state.form.fullname.as_text(), "");
        }

        #[test]
        fn test_ctrl_s_submits() {
            let mut app = ready_app();
            app.handle_key(ctrl('s')).unwrap();
            assert!(!app.state.errors.is_empty());
            assert_eq!(app.state.form.fullname.as_text(), "");
        }

        #[test]
        fn test_double_ctrl_c_quits() {
            let mut app = app();
            app.handle_key(ctrl('c')).unwrap();
            assert!(!app.should_quit());
            app.handle_key(ctrl('c')).unwrap();
            assert!(app.should_quit());
        }
    }

    mod preview {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_wrong_extension_sets_error_without_loading() {
            let dir = tempfile::tempdir().unwrap();
            let mut app = app();
            app.state.form.photo.set_text(touch(&dir, "me.png"));
            app.select_photo();
            assert_eq!(app.state.error_for(FieldId::Photo), Some(PHOTO_NOT_JPEG));
            assert_eq!(app.state.preview.slot, PreviewSlot::Empty);
        }

        #[test]
        fn test_nonexistent_photo_does_not_load() {
            let dir = tempfile::tempdir().unwrap();
            let mut source = MockPhotoSource::new();
            source.expect_read().never();
            let mut app = app_with_source(source);

            app.state.form.photo.set_text(dir.path().join("gone.jpg").display().to_string());
            app.select_photo();

            assert_eq!(app.state.preview.slot, PreviewSlot::Empty);
            assert!(!app.preview_pending());
            assert!(app.state.error_for(FieldId::Photo).is_none());
        }

        #[test]
        fn test_submit_with_nonexistent_files_reports_missing() {
            let mut app = app();
            let dir = fill_valid(&mut app);
            app.state
                .form
                .cv
                .set_text(dir.path().join("gone.pdf").display().to_string());
            app.state
                .form
                .photo
                .set_text(dir.path().join("gone.jpg").display().to_string());

            assert!(!app.submit());
            assert_eq!(app.state.error_for(FieldId::Cv), Some(CV_MISSING));
            assert_eq!(app.state.error_for(FieldId::Photo), Some(PHOTO_MISSING));
            assert_eq!(app.state.form.focused_field(), Some(FieldId::Cv));
        }

        #[test]
        fn test_empty_selection_clears_preview() {
            let mut app = app();
            app.state.form.photo.set_text("");
            app.select_photo();
            assert_eq!(app.state.preview.slot, PreviewSlot::Empty);
            assert!(app.state.error_for(FieldId::Photo).is_none());
        }

        #[tokio::test]
        async fn test_selection_renders_preview() {
            let bytes = jpeg_bytes(8, 8);
            let mut source = MockPhotoSource::new();
            source.expect_read().returning(move |_| Ok(bytes.clone()));
            let mut app = app_with_source(source);
            let dir = tempfile::tempdir().unwrap();

            app.state.form.photo.set_text(touch(&dir, "me.JPG"));
            app.select_photo();
            assert!(app.preview_pending());

            let message = app.preview_loader.recv().await.unwrap();
            app.apply_preview(message);

            assert!(app.state.preview.image().is_some());
        }

        #[tokio::test]
        async fn test_rapid_reselection_keeps_latest() {
            let square = jpeg_bytes(8, 8);
            let wide = jpeg_bytes(16, 8);
            let mut source = MockPhotoSource::new();
            source.expect_read().returning(move |path| {
                if path.ends_with("first.jpg") {
                    Ok(square.clone())
                } else {
                    Ok(wide.clone())
                }
            });
            let mut app = app_with_source(source);
            let dir = tempfile::tempdir().unwrap();

            app.state.form.photo.set_text(touch(&dir, "first.jpg"));
            app.select_photo();
            app.state.form.photo.set_text(touch(&dir, "second.jpg"));
            app.select_photo();

            for _ in 0..2 {
                let message = app.preview_loader.recv().await.unwrap();
                app.apply_preview(message);
            }

            let image = app.state.preview.image().unwrap();
            assert!(image.width > image.height);
        }

        #[tokio::test]
        async fn test_read_failure_shows_failed_slot() {
            let mut source = MockPhotoSource::new();
            source.expect_read().returning(|_| {
                Err(PreviewError::Read {
                    path: "me.jpg".to_string(),
                    message: "gone".to_string(),
                })
            });
            let mut app = app_with_source(source);
            let dir = tempfile::tempdir().unwrap();

            app.state.form.photo.set_text(touch(&dir, "me.jpg"));
            app.select_photo();
            let message = app.preview_loader.recv().await.unwrap();
            app.apply_preview(message);

            assert!(matches!(app.state.preview.slot, PreviewSlot::Failed(_)));
        }

        #[tokio::test]
        async fn test_tab_away_from_changed_photo_starts_preview() {
            let bytes = jpeg_bytes(8, 8);
            let mut source = MockPhotoSource::new();
            source
                .expect_read()
                .times(1)
                .returning(move |_| Ok(bytes.clone()));
            let mut app = app_with_source(source);
            app.accept_consent();
            let dir = tempfile::tempdir().unwrap();
            let path = touch(&dir, "me.jpg");

            app.state.form.focus(FieldId::Photo);
            for c in path.chars() {
                app.handle_key(key(KeyCode::Char(c))).unwrap();
            }
            app.handle_key(key(KeyCode::Tab)).unwrap();
            assert!(app.preview_pending());
            assert_eq!(app.state.form.focused_field(), Some(FieldId::Bio));

            // Unchanged path does not reload
            app.state.form.focus(FieldId::Photo);
            app.handle_key(key(KeyCode::Tab)).unwrap();

            let message = app.preview_loader.recv().await.unwrap();
            app.apply_preview(message);
            assert!(app.state.preview.image().is_some());
        }
    }
}
