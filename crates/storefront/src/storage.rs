//! [`Storage`] backends for the browser-facing records.
//!
//! - [`SessionStorage`] - session-scoped records (the cart). Backed by the
//!   tower-sessions session, whose cookie expires when the browser session
//!   ends.
//! - [`CookieStorage`] - persistent records (the role flag). Each key is its
//!   own long-lived cookie.
//!
//! Both buffer writes in memory so the synchronous core can use them; the
//! handler flushes them before responding.

use std::collections::HashMap;
use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::request::Parts;
use axum::http::{HeaderMap, HeaderName, HeaderValue};
use axum::response::AppendHeaders;
use tower_sessions::Session;
use tower_sessions::cookie::time::Duration;
use tower_sessions::cookie::{Cookie, CookieJar, SameSite};
use tuckshop_core::Storage;

use crate::state::AppState;

/// Lifetime of persistent cookies.
const PERSISTENT_COOKIE_DAYS: i64 = 365;

// =============================================================================
// Session storage
// =============================================================================

/// Session-backed storage.
///
/// Values are loaded up front with [`SessionStorage::load`]; writes are
/// recorded and applied by [`SessionStorage::flush`].
#[derive(Debug, Default)]
pub struct SessionStorage {
    entries: HashMap<String, String>,
    changes: HashMap<String, Option<String>>,
}

impl SessionStorage {
    /// Read `keys` from the session.
    ///
    /// Values that cannot be read are treated as absent.
    pub async fn load(session: &Session, keys: &[&str]) -> Self {
        let mut entries = HashMap::new();
        for key in keys {
            match session.get::<String>(key).await {
                Ok(Some(value)) => {
                    entries.insert((*key).to_string(), value);
                }
                Ok(None) => {}
                Err(e) => tracing::debug!(key, error = %e, "ignoring unreadable session value"),
            }
        }

        Self {
            entries,
            changes: HashMap::new(),
        }
    }

    /// Write recorded changes back to the session.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store rejects the update.
    pub async fn flush(self, session: &Session) -> Result<(), tower_sessions::session::Error> {
        for (key, change) in self.changes {
            match change {
                Some(value) => session.insert(&key, value).await?,
                None => {
                    session.remove_value(&key).await?;
                }
            }
        }
        Ok(())
    }
}

impl Storage for SessionStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.entries.insert(key.to_string(), value.clone());
        self.changes.insert(key.to_string(), Some(value));
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
        self.changes.insert(key.to_string(), None);
    }
}

// =============================================================================
// Cookie storage
// =============================================================================

/// Persistent storage kept in long-lived cookies.
///
/// Extract it in a handler, hand it to the core, then attach
/// [`CookieStorage::set_cookie_headers`] to the response.
#[derive(Debug)]
pub struct CookieStorage {
    jar: CookieJar,
    secure: bool,
}

impl CookieStorage {
    /// Build from the request's `Cookie` headers. Malformed pairs are skipped.
    #[must_use]
    pub fn from_headers(headers: &HeaderMap, secure: bool) -> Self {
        let mut jar = CookieJar::new();
        for header in headers.get_all(COOKIE) {
            let Ok(value) = header.to_str() else {
                continue;
            };
            for cookie in Cookie::split_parse(value.to_owned()).flatten() {
                jar.add_original(cookie);
            }
        }

        Self { jar, secure }
    }

    /// `Set-Cookie` header values for every change made.
    #[must_use]
    pub fn set_cookie_headers(&self) -> Vec<HeaderValue> {
        self.jar
            .delta()
            .filter_map(|cookie| HeaderValue::from_str(&cookie.to_string()).ok())
            .collect()
    }

    /// The changes as response headers.
    #[must_use]
    pub fn into_response_headers(self) -> AppendHeaders<Vec<(HeaderName, HeaderValue)>> {
        AppendHeaders(
            self.set_cookie_headers()
                .into_iter()
                .map(|value| (SET_COOKIE, value))
                .collect(),
        )
    }
}

impl Storage for CookieStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.jar.get(key).map(|cookie| cookie.value().to_string())
    }

    fn set(&mut self, key: &str, value: String) {
        let cookie = Cookie::build((key.to_string(), value))
            .path("/")
            .max_age(Duration::days(PERSISTENT_COOKIE_DAYS))
            .same_site(SameSite::Lax)
            .http_only(true)
            .secure(self.secure);
        self.jar.add(cookie);
    }

    fn remove(&mut self, key: &str) {
        self.jar
            .remove(Cookie::build((key.to_string(), String::new())).path("/"));
    }
}

impl FromRequestParts<AppState> for CookieStorage {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(Self::from_headers(
            &parts.headers,
            state.config().secure_cookies(),
        ))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn headers(cookie: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_str(cookie).unwrap());
        headers
    }

    #[test]
    fn test_cookie_storage_reads_request_cookies() {
        let storage = CookieStorage::from_headers(&headers("userRole=clerk; other=1"), false);
        assert_eq!(storage.get("userRole").as_deref(), Some("clerk"));
        assert!(storage.set_cookie_headers().is_empty());
    }

    #[test]
    fn test_cookie_storage_set_is_persistent() {
        let mut storage = CookieStorage::from_headers(&HeaderMap::new(), true);
        storage.set("userRole", "owner".to_string());

        let set_cookies = storage.set_cookie_headers();
        assert_eq!(set_cookies.len(), 1);
        let header = set_cookies.first().unwrap().to_str().unwrap();
        assert!(header.starts_with("userRole=owner"));
        assert!(header.contains("Max-Age=31536000"));
        assert!(header.contains("Path=/"));
        assert!(header.contains("Secure"));
    }

    #[test]
    fn test_cookie_storage_remove_expires_cookie() {
        let mut storage = CookieStorage::from_headers(&headers("userRole=owner"), false);
        storage.remove("userRole");

        assert_eq!(storage.get("userRole"), None);
        let set_cookies = storage.set_cookie_headers();
        let header = set_cookies.first().unwrap().to_str().unwrap();
        assert!(header.starts_with("userRole="));
        assert!(header.contains("Max-Age=0"));
    }

    #[test]
    fn test_session_storage_reads_own_writes() {
        let mut storage = SessionStorage::default();
        storage.set("shoppingCart", "[]".to_string());
        assert_eq!(storage.get("shoppingCart").as_deref(), Some("[]"));

        storage.remove("shoppingCart");
        assert_eq!(storage.get("shoppingCart"), None);
    }
}
