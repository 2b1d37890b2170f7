//! Home page route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tower_sessions::Session;
use tracing::instrument;
use tuckshop_core::CartRow;

use crate::catalog::Product;
use crate::filters;
use crate::middleware::CurrentRole;
use crate::routes::page::PageContext;
use crate::state::AppState;

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub page: PageContext,
    pub banners: Vec<Product>,
    pub cards: Vec<Product>,
}

async fn render(state: &AppState, session: &Session, role: CurrentRole, cart_open: bool) -> HomeTemplate {
    let catalog = state.catalog();
    HomeTemplate {
        page: PageContext::load(state, session, role.0, cart_open).await,
        banners: catalog.banners().cloned().collect(),
        cards: catalog.cards().cloned().collect(),
    }
}

/// Display the home page with the product catalog.
#[instrument(skip_all)]
pub async fn home(
    State(state): State<AppState>,
    session: Session,
    role: CurrentRole,
) -> impl IntoResponse {
    render(&state, &session, role, false).await
}

/// Display the home page with the cart modal open.
#[instrument(skip_all)]
pub async fn cart(
    State(state): State<AppState>,
    session: Session,
    role: CurrentRole,
) -> impl IntoResponse {
    render(&state, &session, role, true).await
}
