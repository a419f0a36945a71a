//! File-backed cookie jar
//!
//! Accepts `document.cookie`-style assignments and renders the
//! `name=value; other=value` read string. Persistent cookies are written to
//! a JSON file after every change; session cookies (no expiry) live only in
//! memory.

use super::error::CookieError;
use super::traits::CookieJarTrait;
use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// A single cookie held by the jar
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredCookie {
    pub name: String,
    /// Raw value exactly as written (still URL-encoded)
    pub value: String,
    /// `None` for a session cookie
    pub expires: Option<DateTime<Utc>>,
    pub path: String,
}

impl StoredCookie {
    fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires.is_some_and(|expires| expires <= now)
    }
}

/// On-disk layout of the jar file
#[derive(Debug, Default, Serialize, Deserialize)]
struct JarFile {
    #[serde(default)]
    cookies: Vec<StoredCookie>,
}

/// Cookie jar persisted as JSON
pub struct FileCookieJar {
    path: Option<PathBuf>,
    cookies: Vec<StoredCookie>,
    clock: fn() -> DateTime<Utc>,
}

impl FileCookieJar {
    /// Create a jar that never touches the filesystem
    pub fn in_memory() -> Self {
        Self {
            path: None,
            cookies: Vec::new(),
            clock: Utc::now,
        }
    }

    /// Open the jar stored at `path`, starting empty if the file does not exist yet
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, CookieError> {
        let path = path.into();
        let cookies = if path.exists() {
            let content = fs::read_to_string(&path)?;
            let file: JarFile = serde_json::from_str(&content)?;
            file.cookies
        } else {
            Vec::new()
        };

        tracing::debug!("Opened cookie jar {} ({} cookies)", path.display(), cookies.len());

        Ok(Self {
            path: Some(path),
            cookies,
            clock: Utc::now,
        })
    }

    /// Replace the clock used for expiry checks
    #[cfg(test)]
    pub fn with_clock(mut self, clock: fn() -> DateTime<Utc>) -> Self {
        self.clock = clock;
        self
    }

    /// Location of the backing file, if any
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Cookies that have not expired yet, in creation order
    pub fn live_cookies(&self) -> impl Iterator<Item = &StoredCookie> {
        let now = (self.clock)();
        self.cookies.iter().filter(move |c| !c.is_expired(now))
    }

    fn save(&self) -> Result<(), CookieError> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        let now = (self.clock)();
        let file = JarFile {
            cookies: self
                .cookies
                .iter()
                .filter(|c| c.expires.is_some() && !c.is_expired(now))
                .cloned()
                .collect(),
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(&file)?)?;
        Ok(())
    }
}

impl CookieJarTrait for FileCookieJar {
    fn document_cookie(&self) -> String {
        self.live_cookies()
            .map(|c| format!("{}={}", c.name, c.value))
            .collect::<Vec<_>>()
            .join("; ")
    }

    fn write(&mut self, cookie: &str) -> Result<(), CookieError> {
        let now = (self.clock)();
        let parsed = parse_assignment(cookie, now)?;

        let existing = self
            .cookies
            .iter()
            .position(|c| c.name == parsed.name && c.path == parsed.path);

        match (existing, parsed.is_expired(now)) {
            // Replacing keeps the original creation slot
            (Some(index), false) => self.cookies[index] = parsed,
            (Some(index), true) => {
                self.cookies.remove(index);
            }
            (None, false) => self.cookies.push(parsed),
            (None, true) => {}
        }

        // Expired entries are never read again
        self.cookies.retain(|c| !c.is_expired(now));

        tracing::debug!("Cookie write: {cookie}");
        self.save()
    }
}

/// Parse a single cookie assignment with its attributes
///
/// `Max-Age` wins over `expires` when both are present. Unknown attributes
/// (`domain`, `secure`, `samesite`, ...) are ignored.
pub fn parse_assignment(cookie: &str, now: DateTime<Utc>) -> Result<StoredCookie, CookieError> {
    let mut parts = cookie.split(';');
    let pair = parts.next().unwrap_or_default();
    let (name, value) = pair
        .split_once('=')
        .ok_or_else(|| CookieError::Malformed(cookie.to_string()))?;

    let name = name.trim();
    if name.is_empty() {
        return Err(CookieError::EmptyName);
    }

    let mut expires = None;
    let mut max_age = None;
    let mut path = "/".to_string();

    for attr in parts {
        let (key, val) = attr.split_once('=').unwrap_or((attr, ""));
        let val = val.trim();
        match key.trim().to_ascii_lowercase().as_str() {
            "expires" => {
                let parsed = DateTime::parse_from_rfc2822(val).map_err(|source| {
                    CookieError::InvalidExpiry {
                        value: val.to_string(),
                        source,
                    }
                })?;
                expires = Some(parsed.with_timezone(&Utc));
            }
            "max-age" => {
                let seconds: i64 = val
                    .parse()
                    .map_err(|_| CookieError::InvalidMaxAge(val.to_string()))?;
                let at = TimeDelta::try_seconds(seconds)
                    .and_then(|delta| now.checked_add_signed(delta))
                    .ok_or_else(|| CookieError::InvalidMaxAge(val.to_string()))?;
                max_age = Some(at);
            }
            "path" if !val.is_empty() => path = val.to_string(),
            _ => {}
        }
    }

    Ok(StoredCookie {
        name: name.to_string(),
        value: value.trim().to_string(),
        expires: max_age.or(expires),
        path,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap()
    }

    fn jar() -> FileCookieJar {
        FileCookieJar::in_memory().with_clock(fixed_now)
    }

    mod parse {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_parses_name_value_and_expiry() {
            let cookie = parse_assignment(
                "studeng_name=Alice%20Dupont; expires=Mon, 26 Oct 2026 12:00:00 GMT; path=/",
                fixed_now(),
            )
            .unwrap();
            assert_eq!(cookie.name, "studeng_name");
            assert_eq!(cookie.value, "Alice%20Dupont");
            assert_eq!(
                cookie.expires,
                Some(Utc.with_ymd_and_hms(2026, 10, 26, 12, 0, 0).unwrap())
            );
            assert_eq!(cookie.path, "/");
        }

        #[test]
        fn test_max_age_zero_expires_now() {
            let cookie = parse_assignment("studeng_email=; Max-Age=0; path=/", fixed_now()).unwrap();
            assert_eq!(cookie.expires, Some(fixed_now()));
            assert!(cookie.is_expired(fixed_now()));
        }

        #[test]
        fn test_max_age_wins_over_expires() {
            let cookie = parse_assignment(
                "a=1; expires=Mon, 26 Oct 2026 12:00:00 GMT; max-age=60",
                fixed_now(),
            )
            .unwrap();
            assert_eq!(cookie.expires, Some(fixed_now() + TimeDelta::seconds(60)));
        }

        #[test]
        fn test_attribute_names_are_case_insensitive() {
            let cookie = parse_assignment("a=1; PATH=/forum; EXPIRES=Mon, 26 Oct 2026 12:00:00 GMT", fixed_now())
                .unwrap();
            assert_eq!(cookie.path, "/forum");
            assert!(cookie.expires.is_some());
        }

        #[test]
        fn test_without_expiry_is_session_cookie() {
            let cookie = parse_assignment("a=1", fixed_now()).unwrap();
            assert!(cookie.expires.is_none());
            assert!(!cookie.is_expired(fixed_now()));
        }

        #[test]
        fn test_missing_equals_is_malformed() {
            let err = parse_assignment("justaname; path=/", fixed_now()).unwrap_err();
            assert!(matches!(err, CookieError::Malformed(_)));
        }

        #[test]
        fn test_empty_name_is_rejected() {
            let err = parse_assignment(" =value", fixed_now()).unwrap_err();
            assert!(matches!(err, CookieError::EmptyName));
        }

        #[test]
        fn test_bad_expiry_is_rejected() {
            let err = parse_assignment("a=1; expires=tomorrow", fixed_now()).unwrap_err();
            assert!(matches!(err, CookieError::InvalidExpiry { .. }));
        }

        #[test]
        fn test_bad_max_age_is_rejected() {
            let err = parse_assignment("a=1; max-age=soon", fixed_now()).unwrap_err();
            assert!(matches!(err, CookieError::InvalidMaxAge(_)));
        }
    }

    mod jar_behaviour {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_empty_jar_reads_empty_string() {
            assert_eq!(jar().document_cookie(), "");
        }

        #[test]
        fn test_document_cookie_joins_in_creation_order() {
            let mut jar = jar();
            jar.write("a=1; max-age=60").unwrap();
            jar.write("b=2; max-age=60").unwrap();
            assert_eq!(jar.document_cookie(), "a=1; b=2");
        }

        #[test]
        fn test_overwrite_keeps_position() {
            let mut jar = jar();
            jar.write("a=1; max-age=60").unwrap();
            jar.write("b=2; max-age=60").unwrap();
            jar.write("a=3; max-age=60").unwrap();
            assert_eq!(jar.document_cookie(), "a=3; b=2");
        }

        #[test]
        fn test_expired_write_removes_cookie() {
            let mut jar = jar();
            jar.write("a=1; max-age=60").unwrap();
            jar.write("a=; Max-Age=0; path=/").unwrap();
            assert_eq!(jar.document_cookie(), "");
        }

        #[test]
        fn test_cookies_with_different_paths_coexist() {
            let mut jar = jar();
            jar.write("a=1; path=/").unwrap();
            jar.write("a=2; path=/forum").unwrap();
            assert_eq!(jar.document_cookie(), "a=1; a=2");
        }

        #[test]
        fn test_past_expiry_is_not_stored() {
            let mut jar = jar();
            jar.write("a=1; expires=Thu, 01 Jan 2026 00:00:00 GMT").unwrap();
            assert_eq!(jar.live_cookies().count(), 0);
        }

        #[test]
        fn test_malformed_write_leaves_jar_unchanged() {
            let mut jar = jar();
            jar.write("a=1; max-age=60").unwrap();
            assert!(jar.write("garbage").is_err());
            assert_eq!(jar.document_cookie(), "a=1");
        }
    }

    mod persistence {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_open_missing_file_starts_empty() {
            let dir = tempfile::tempdir().unwrap();
            let jar = FileCookieJar::open(dir.path().join("cookies.json")).unwrap();
            assert_eq!(jar.document_cookie(), "");
        }

        #[test]
        fn test_persistent_cookies_survive_reopen() {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("nested").join("cookies.json");

            let mut jar = FileCookieJar::open(&path).unwrap().with_clock(fixed_now);
            jar.write("studeng_name=Alice; expires=Mon, 26 Oct 2026 12:00:00 GMT; path=/")
                .unwrap();
            jar.write("session=1").unwrap();

            let reopened = FileCookieJar::open(&path).unwrap().with_clock(fixed_now);
            assert_eq!(reopened.document_cookie(), "studeng_name=Alice");
        }

        #[test]
        fn test_invalid_file_is_an_error() {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("cookies.json");
            fs::write(&path, "not json").unwrap();
            assert!(matches!(
                FileCookieJar::open(&path),
                Err(CookieError::Json(_))
            ));
        }

        #[test]
        fn test_in_memory_jar_has_no_path() {
            assert!(FileCookieJar::in_memory().path().is_none());
        }
    }
}
