//! get/set/erase helpers over a cookie jar
//!
//! Values are URL-encoded the way `encodeURIComponent` does it and the whole
//! read string is decoded before lookup. Nothing is signed or encrypted, so
//! only display fields and the consent flag belong here.

use super::error::CookieError;
use super::traits::CookieJarTrait;
use chrono::{DateTime, TimeDelta, Utc};
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Remembered full name
pub const NAME_COOKIE: &str = "studeng_name";
/// Remembered email address
pub const EMAIL_COOKIE: &str = "studeng_email";
/// Consent banner choice (`accepted` | `declined`)
pub const CONSENT_COOKIE: &str = "studeng_cookie_consent";

/// Characters `encodeURIComponent` leaves untouched besides alphanumerics
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Cookie helpers bound to a jar
pub struct CookieStore<J: CookieJarTrait> {
    jar: J,
    clock: fn() -> DateTime<Utc>,
}

impl<J: CookieJarTrait> CookieStore<J> {
    pub fn new(jar: J) -> Self {
        Self {
            jar,
            clock: Utc::now,
        }
    }

    /// Replace the clock used to compute expiry dates
    #[cfg(test)]
    pub fn with_clock(mut self, clock: fn() -> DateTime<Utc>) -> Self {
        self.clock = clock;
        self
    }

    /// Write `name` with a `days`-long lifetime on the root path
    pub fn set(&mut self, name: &str, value: &str, days: i64) -> Result<(), CookieError> {
        let expires = (self.clock)() + TimeDelta::days(days);
        let cookie = format!(
            "{name}={}; expires={}; path=/",
            utf8_percent_encode(value, URI_COMPONENT),
            format_cookie_date(expires)
        );
        self.jar.write(&cookie)
    }

    /// Look up `name` in the decoded cookie string
    pub fn get(&self, name: &str) -> Option<String> {
        let prefix = format!("{name}=");
        let raw = self.jar.document_cookie();
        let decoded = percent_decode_str(&raw).decode_utf8_lossy();

        decoded
            .split(';')
            .map(str::trim)
            .find_map(|part| part.strip_prefix(prefix.as_str()))
            .map(str::to_string)
    }

    /// Expire `name` immediately
    pub fn erase(&mut self, name: &str) -> Result<(), CookieError> {
        self.jar.write(&format!("{name}=; Max-Age=0; path=/"))
    }
}

/// Format a date the way `Date.prototype.toUTCString` does
pub fn format_cookie_date(date: DateTime<Utc>) -> String {
    date.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}
