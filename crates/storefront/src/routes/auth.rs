//! Role login and logout handlers.
//!
//! There are no credentials: picking a role from the login form stores the
//! role flag cookie, which the dashboards check.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;
use tuckshop_core::gate::HOME_PATH;
use tuckshop_core::{CartRow, Notice, Role, RoleGate};

use crate::error::Result;
use crate::filters;
use crate::middleware::{CurrentRole, set_flash};
use crate::routes::page::PageContext;
use crate::state::AppState;
use crate::storage::CookieStorage;

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub role: String,
}

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub page: PageContext,
    pub roles: [Role; 2],
}

/// Display the login page.
#[instrument(skip_all)]
pub async fn login_page(
    State(state): State<AppState>,
    session: Session,
    role: CurrentRole,
) -> impl IntoResponse {
    LoginTemplate {
        page: PageContext::load(&state, &session, role.0, false).await,
        roles: Role::ALL,
    }
}

/// Handle the role selection.
///
/// A valid selection stores the role flag and redirects to that role's
/// dashboard. Anything else re-renders the login page with an error and
/// leaves the stored flag alone.
#[instrument(skip(state, session, storage), fields(role = %form.role))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    storage: CookieStorage,
    Form(form): Form<LoginForm>,
) -> Response {
    let mut gate = RoleGate::new(storage);
    match gate.login(&form.role) {
        Ok(role) => {
            let cookies = gate.into_storage().into_response_headers();
            (cookies, Redirect::to(role.dashboard_path())).into_response()
        }
        Err(e) => {
            let notice = Notice::error(e.to_string());
            let page =
                PageContext::load_with_notice(&state, &session, gate.current_role(), notice).await;
            LoginTemplate {
                page,
                roles: Role::ALL,
            }
            .into_response()
        }
    }
}

/// Clear the role flag and go home.
#[instrument(skip_all)]
pub async fn logout(session: Session, storage: CookieStorage) -> Result<Response> {
    let mut gate = RoleGate::new(storage);
    let notice = gate.logout();
    set_flash(&session, &notice).await?;

    let cookies = gate.into_storage().into_response_headers();
    Ok((cookies, Redirect::to(HOME_PATH)).into_response())
}
