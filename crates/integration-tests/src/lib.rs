//! Integration tests for the Tuck Shop storefront.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p tuckshop-integration-tests
//! ```
//!
//! The router is driven in-process with `tower::ServiceExt::oneshot`; no
//! socket is bound. [`TestClient`] plays the browser: it keeps the cookies
//! each response sets and sends them back on the next request.
//!
//! # Test Categories
//!
//! - `storefront_cart` - Cart commands, badge, checkout and persistence
//! - `storefront_gate` - Role login, logout and dashboard access

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::collections::BTreeMap;
use std::path::PathBuf;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::header::{CONTENT_TYPE, COOKIE, LOCATION, SET_COOKIE};
use axum::http::{Method, Request, StatusCode};
use tower::ServiceExt;
use tower_sessions::cookie::Cookie;
use tower_sessions::cookie::time::OffsetDateTime;
use tuckshop_storefront::catalog::Catalog;
use tuckshop_storefront::config::StorefrontConfig;
use tuckshop_storefront::state::AppState;

/// A response reduced to what the tests look at.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub location: Option<String>,
    pub request_id: Option<String>,
    pub body: String,
}

impl TestResponse {
    /// Whether the response redirects to `path`.
    #[must_use]
    pub fn redirects_to(&self, path: &str) -> bool {
        self.status.is_redirection() && self.location.as_deref() == Some(path)
    }
}

/// In-process client with a cookie store.
pub struct TestClient {
    app: Router,
    cookies: BTreeMap<String, String>,
}

impl Default for TestClient {
    fn default() -> Self {
        Self::new()
    }
}

impl TestClient {
    /// A fresh visitor against a fresh storefront selling the demo catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::with_catalog(Catalog::demo())
    }

    /// A fresh visitor against a fresh storefront selling `catalog`.
    #[must_use]
    pub fn with_catalog(catalog: Catalog) -> Self {
        let config = StorefrontConfig {
            static_dir: PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/../storefront/static")),
            ..StorefrontConfig::default()
        };
        Self::with_app(tuckshop_storefront::app(AppState::with_catalog(
            config, catalog,
        )))
    }

    /// A fresh visitor against an existing router (sharing its sessions).
    #[must_use]
    pub const fn with_app(app: Router) -> Self {
        Self {
            app,
            cookies: BTreeMap::new(),
        }
    }

    /// A new visitor (no cookies) against the same storefront.
    #[must_use]
    pub fn new_visitor(&self) -> Self {
        Self::with_app(self.app.clone())
    }

    /// The current value of a cookie, if set.
    #[must_use]
    pub fn cookie(&self, name: &str) -> Option<&str> {
        self.cookies.get(name).map(String::as_str)
    }

    /// Drop a cookie, as the browser does with session cookies on close.
    pub fn forget_cookie(&mut self, name: &str) {
        self.cookies.remove(name);
    }

    pub async fn get(&mut self, path: &str) -> TestResponse {
        self.send(Method::GET, path, None).await
    }

    /// POST a urlencoded form.
    pub async fn post(&mut self, path: &str, form: &[(&str, &str)]) -> TestResponse {
        let body = form
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");
        self.send(Method::POST, path, Some(body)).await
    }

    async fn send(&mut self, method: Method, path: &str, form: Option<String>) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(path);
        if !self.cookies.is_empty() {
            let header = self
                .cookies
                .iter()
                .map(|(k, v)| format!("{k}={v}"))
                .collect::<Vec<_>>()
                .join("; ");
            builder = builder.header(COOKIE, header);
        }
        let request = match form {
            Some(body) => builder
                .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(body)),
            None => builder.body(Body::empty()),
        }
        .unwrap();

        let response = self.app.clone().oneshot(request).await.unwrap();

        for value in response.headers().get_all(SET_COOKIE) {
            self.store_cookie(value.to_str().unwrap());
        }

        let status = response.status();
        let header = |name| {
            response
                .headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(String::from)
        };
        let location = header(LOCATION);
        let request_id = header(tuckshop_storefront::REQUEST_ID_HEADER);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();

        TestResponse {
            status,
            location,
            request_id,
            body: String::from_utf8(bytes.to_vec()).unwrap(),
        }
    }

    fn store_cookie(&mut self, set_cookie: &str) {
        let Ok(cookie) = Cookie::parse(set_cookie) else {
            return;
        };
        let expired = cookie.max_age().is_some_and(|age| age.is_zero() || age.is_negative())
            || cookie
                .expires_datetime()
                .is_some_and(|at| at <= OffsetDateTime::now_utc());

        if expired {
            self.cookies.remove(cookie.name());
        } else {
            self.cookies
                .insert(cookie.name().to_string(), cookie.value().to_string());
        }
    }
}
