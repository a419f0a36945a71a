//! Trait abstraction for the cookie jar to enable mocking in tests

use super::error::CookieError;

/// Read/write access to a cookie jar, shaped like `document.cookie`
#[cfg_attr(test, mockall::automock)]
pub trait CookieJarTrait: Send {
    /// All live cookies rendered as `name=value; other=value`
    fn document_cookie(&self) -> String;

    /// Apply one cookie assignment, e.g. `name=value; expires=...; path=/`
    fn write(&mut self, cookie: &str) -> Result<(), CookieError>;
}
