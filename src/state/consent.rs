//! Cookie consent banner state

use crate::cookies::{
    CookieError, CookieJarTrait, CookieStore, CONSENT_COOKIE, EMAIL_COOKIE, NAME_COOKIE,
};

/// Lifetime of the consent cookie in days
pub const CONSENT_DAYS: i64 = 180;

/// Stored consent choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConsentState {
    /// No choice recorded yet
    #[default]
    Unset,
    Accepted,
    Declined,
}

impl ConsentState {
    /// Interpret the stored cookie value
    pub fn from_cookie(value: Option<&str>) -> Self {
        match value {
            Some("accepted") => Self::Accepted,
            Some("declined") => Self::Declined,
            _ => Self::Unset,
        }
    }

    pub fn as_cookie_value(&self) -> Option<&'static str> {
        match self {
            Self::Unset => None,
            Self::Accepted => Some("accepted"),
            Self::Declined => Some("declined"),
        }
    }
}

/// Which banner button is highlighted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConsentChoice {
    #[default]
    Accept,
    Decline,
}

impl ConsentChoice {
    pub fn toggle(&mut self) {
        *self = match self {
            Self::Accept => Self::Decline,
            Self::Decline => Self::Accept,
        };
    }
}

/// The `cookieBanner` region with its accept/decline buttons
#[derive(Debug, Clone, Default)]
pub struct ConsentBanner {
    pub state: ConsentState,
    pub visible: bool,
    pub selected: ConsentChoice,
}

impl ConsentBanner {
    /// Build the banner from the jar: shown only when no choice is stored
    pub fn load<J: CookieJarTrait>(store: &CookieStore<J>) -> Self {
        let stored = store.get(CONSENT_COOKIE);
        let visible = stored.as_deref().is_none_or(str::is_empty);
        Self {
            state: ConsentState::from_cookie(stored.as_deref()),
            visible,
            selected: ConsentChoice::default(),
        }
    }

    /// Record acceptance and hide the banner
    pub fn accept<J: CookieJarTrait>(&mut self, store: &mut CookieStore<J>) -> Result<(), CookieError> {
        self.record(ConsentState::Accepted, store)
    }

    /// Record refusal, hide the banner and forget the remembered name/email
    ///
    /// Every write is attempted; the first failure is returned.
    pub fn decline<J: CookieJarTrait>(&mut self, store: &mut CookieStore<J>) -> Result<(), CookieError> {
        let consent = self.record(ConsentState::Declined, store);
        let name = store.erase(NAME_COOKIE);
        let email = store.erase(EMAIL_COOKIE);
        consent.and(name).and(email)
    }

    fn record<J: CookieJarTrait>(
        &mut self,
        state: ConsentState,
        store: &mut CookieStore<J>,
    ) -> Result<(), CookieError> {
        self.state = state;
        self.visible = false;
        match state.as_cookie_value() {
            Some(value) => store.set(CONSENT_COOKIE, value, CONSENT_DAYS),
            None => Ok(()),
        }
    }

    /// Apply the highlighted button
    pub fn confirm<J: CookieJarTrait>(&mut self, store: &mut CookieStore<J>) -> Result<(), CookieError> {
        match self.selected {
            ConsentChoice::Accept => self.accept(store),
            ConsentChoice::Decline => self.decline(store),
        }
    }
}
