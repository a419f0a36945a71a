//! Cookie jar and the get/set/erase helpers used to remember form values

mod error;
mod jar;
mod store;
mod traits;

pub use error::CookieError;
pub use jar::FileCookieJar;
pub use store::{CookieStore, CONSENT_COOKIE, EMAIL_COOKIE, NAME_COOKIE};
pub use traits::CookieJarTrait;

#[cfg(test)]
pub use traits::MockCookieJarTrait;
