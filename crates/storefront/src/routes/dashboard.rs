//! Staff dashboards, one per role.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use rust_decimal::Decimal;
use tower_sessions::Session;
use tracing::instrument;
use tuckshop_core::{CartRow, Role};

use crate::catalog::Product;
use crate::filters;
use crate::middleware::{ClerkOnly, OwnerOnly, RequireRole};
use crate::routes::page::PageContext;
use crate::state::AppState;

/// A row of the clerk's price list.
#[derive(Debug, Clone)]
pub struct PriceRow {
    pub id: String,
    pub name: String,
    pub price: String,
}

impl PriceRow {
    fn from_product(product: &Product, state: &AppState) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.heading().to_string(),
            price: state.config().currency.format(product.price.amount()),
        }
    }
}

/// Clerk dashboard template.
#[derive(Template, WebTemplate)]
#[template(path = "dashboard/clerk.html")]
pub struct ClerkDashboardTemplate {
    pub page: PageContext,
    pub prices: Vec<PriceRow>,
}

/// Owner dashboard template.
#[derive(Template, WebTemplate)]
#[template(path = "dashboard/owner.html")]
pub struct OwnerDashboardTemplate {
    pub page: PageContext,
    pub prices: Vec<PriceRow>,
    pub product_count: usize,
    pub banner_count: usize,
    /// Value of one unit of everything on sale.
    pub catalog_value: String,
}

/// Display the clerk dashboard.
#[instrument(skip_all)]
pub async fn clerk(
    _: RequireRole<ClerkOnly>,
    State(state): State<AppState>,
    session: Session,
) -> impl IntoResponse {
    let prices = state
        .catalog()
        .products()
        .iter()
        .map(|p| PriceRow::from_product(p, &state))
        .collect();

    ClerkDashboardTemplate {
        page: PageContext::load(&state, &session, Some(Role::Clerk), false).await,
        prices,
    }
}

/// Display the owner dashboard.
#[instrument(skip_all)]
pub async fn owner(
    _: RequireRole<OwnerOnly>,
    State(state): State<AppState>,
    session: Session,
) -> impl IntoResponse {
    let catalog = state.catalog();
    let value = catalog
        .products()
        .iter()
        .fold(Decimal::ZERO, |acc, p| acc.saturating_add(p.price.amount()));

    OwnerDashboardTemplate {
        page: PageContext::load(&state, &session, Some(Role::Owner), false).await,
        prices: catalog
            .products()
            .iter()
            .map(|p| PriceRow::from_product(p, &state))
            .collect(),
        product_count: catalog.products().len(),
        banner_count: catalog.banners().count(),
        catalog_value: state.config().currency.format_qualified(value),
    }
}
