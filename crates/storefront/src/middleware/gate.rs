//! Role-gate extractors for the staff dashboards.

use std::marker::PhantomData;

use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;
use tuckshop_core::{AccessDenied, Role, RoleGate};

use crate::middleware::flash::set_flash;
use crate::state::AppState;
use crate::storage::CookieStorage;

/// A role a page can require.
pub trait RequiredRole {
    const ROLE: Role;
}

/// Marker for clerk-only pages.
pub struct ClerkOnly;

/// Marker for owner-only pages.
pub struct OwnerOnly;

impl RequiredRole for ClerkOnly {
    const ROLE: Role = Role::Clerk;
}

impl RequiredRole for OwnerOnly {
    const ROLE: Role = Role::Owner;
}

/// Extractor that requires the stored role flag to match `R`.
///
/// On mismatch the access-denied notice is flashed and the visitor is
/// redirected to the login page.
///
/// # Example
///
/// ```rust,ignore
/// async fn clerk_page(_: RequireRole<ClerkOnly>) -> impl IntoResponse {
///     "till open"
/// }
/// ```
pub struct RequireRole<R>(PhantomData<R>);

/// Rejection returned when the required role is missing.
pub struct RoleRejection(AccessDenied);

impl IntoResponse for RoleRejection {
    fn into_response(self) -> Response {
        Redirect::to(self.0.redirect_to()).into_response()
    }
}

impl<R> FromRequestParts<AppState> for RequireRole<R>
where
    R: RequiredRole + Send + Sync,
{
    type Rejection = RoleRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let storage = CookieStorage::from_headers(&parts.headers, state.config().secure_cookies());
        let gate = RoleGate::new(storage);

        match gate.guard(R::ROLE) {
            Ok(_) => Ok(Self(PhantomData)),
            Err(denied) => {
                tracing::info!(required = %denied.required, path = %parts.uri.path(), "access denied");
                if let Some(session) = parts.extensions.get::<Session>() {
                    if let Err(e) = set_flash(session, &denied.notice()).await {
                        tracing::warn!(error = %e, "failed to flash access-denied notice");
                    }
                }
                Err(RoleRejection(denied))
            }
        }
    }
}

/// Extractor that reads the stored role without requiring one.
pub struct CurrentRole(pub Option<Role>);

impl FromRequestParts<AppState> for CurrentRole {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let storage = CookieStorage::from_headers(&parts.headers, state.config().secure_cookies());
        Ok(Self(RoleGate::new(storage).current_role()))
    }
}
