//! Cart route handlers.
//!
//! Each handler loads the cart from the session, runs one [`CartStore`]
//! command, flushes the session and redirects. The command's notice is
//! flashed and shown on the page the visitor lands on.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;
use tuckshop_core::cart::CART_STORAGE_KEY;
use tuckshop_core::{Badge, CartStore, Notice, Price, ProductId};

use crate::error::Result;
use crate::filters;
use crate::middleware::set_flash;
use crate::storage::SessionStorage;

/// Name used when neither a card title nor a declared name is available.
pub const UNNAMED_PRODUCT: &str = "Unnamed Product";

/// Add to cart form data.
///
/// `title` is the heading of the product card the button sits in; `name` is
/// the name declared on the button itself (used by banner promotions).
/// Missing fields arrive empty and are rejected by validation.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub price: String,
    pub title: Option<String>,
    pub name: Option<String>,
}

/// Form data naming a single cart line.
#[derive(Debug, Deserialize)]
pub struct LineForm {
    #[serde(default)]
    pub id: String,
}

/// Cart count badge fragment template.
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub badge: Badge,
}

/// Resolve the display name of a product: card title, then declared name,
/// then [`UNNAMED_PRODUCT`]. Blank values count as missing.
#[must_use]
pub fn resolve_product_name(title: Option<&str>, declared: Option<&str>) -> String {
    [title, declared]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|candidate| !candidate.is_empty())
        .unwrap_or(UNNAMED_PRODUCT)
        .to_string()
}

/// Validate the add-to-cart input.
fn parse_add_form(form: &AddToCartForm) -> std::result::Result<(ProductId, String, Price), Notice> {
    let id = ProductId::parse(&form.id)
        .map_err(|e| Notice::error(format!("Could not add item: {e}.")))?;
    let price = Price::parse(&form.price)
        .map_err(|e| Notice::error(format!("Could not add item: {e}.")))?;
    let name = resolve_product_name(form.title.as_deref(), form.name.as_deref());
    Ok((id, name, price))
}

/// Add one unit of a product to the cart.
///
/// Invalid ids or prices are rejected with an error notice and leave the
/// cart untouched.
#[instrument(skip(session, form), fields(product_id = %form.id))]
pub async fn add(session: Session, Form(form): Form<AddToCartForm>) -> Result<Response> {
    let notice = match parse_add_form(&form) {
        Ok((id, name, price)) => {
            let mut storage = SessionStorage::load(&session, &[CART_STORAGE_KEY]).await;
            let notice = CartStore::load(&mut storage).add_item(id, &name, price);
            storage.flush(&session).await?;
            notice
        }
        Err(notice) => {
            tracing::info!(price = %form.price, "rejected add-to-cart input");
            notice
        }
    };

    set_flash(&session, &notice).await?;
    Ok(Redirect::to("/").into_response())
}

/// Remove a product's line from the cart. Unknown ids are a no-op.
#[instrument(skip(session, form), fields(product_id = %form.id))]
pub async fn remove(session: Session, Form(form): Form<LineForm>) -> Result<Response> {
    let mut storage = SessionStorage::load(&session, &[CART_STORAGE_KEY]).await;
    if let Ok(id) = ProductId::parse(&form.id) {
        CartStore::load(&mut storage).remove_item(&id);
    }
    storage.flush(&session).await?;

    Ok(Redirect::to("/cart").into_response())
}

/// Take one unit of a product off the cart. Unknown ids are a no-op.
#[instrument(skip(session, form), fields(product_id = %form.id))]
pub async fn decrement(session: Session, Form(form): Form<LineForm>) -> Result<Response> {
    let mut storage = SessionStorage::load(&session, &[CART_STORAGE_KEY]).await;
    if let Ok(id) = ProductId::parse(&form.id) {
        CartStore::load(&mut storage).decrement_item(&id);
    }
    storage.flush(&session).await?;

    Ok(Redirect::to("/cart").into_response())
}

/// Get the cart count badge fragment.
#[instrument(skip_all)]
pub async fn count(session: Session) -> impl IntoResponse {
    let storage = SessionStorage::load(&session, &[CART_STORAGE_KEY]).await;
    CartCountTemplate {
        badge: CartStore::load(storage).badge(),
    }
}

/// Simulate checkout.
///
/// A non-empty cart is cleared and the modal closed (redirect home). An
/// empty cart is rejected and the modal stays open.
#[instrument(skip_all)]
pub async fn checkout(session: Session) -> Result<Response> {
    let mut storage = SessionStorage::load(&session, &[CART_STORAGE_KEY]).await;
    let (notice, location) = match CartStore::load(&mut storage).checkout() {
        Ok(notice) => (notice, "/"),
        Err(e) => (Notice::error(e.to_string()), "/cart"),
    };
    storage.flush(&session).await?;

    set_flash(&session, &notice).await?;
    Ok(Redirect::to(location).into_response())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn form(id: &str, price: &str) -> AddToCartForm {
        AddToCartForm {
            id: id.to_string(),
            price: price.to_string(),
            title: None,
            name: None,
        }
    }

    #[test]
    fn test_resolve_name_prefers_card_title() {
        assert_eq!(
            resolve_product_name(Some("  Plantain Chips "), Some("chips")),
            "Plantain Chips"
        );
    }

    #[test]
    fn test_resolve_name_falls_back_to_declared() {
        assert_eq!(resolve_product_name(None, Some("Hamper")), "Hamper");
        assert_eq!(resolve_product_name(Some("   "), Some("Hamper")), "Hamper");
    }

    #[test]
    fn test_resolve_name_default() {
        assert_eq!(resolve_product_name(None, None), UNNAMED_PRODUCT);
        assert_eq!(resolve_product_name(Some(""), Some("")), UNNAMED_PRODUCT);
    }

    #[test]
    fn test_parse_add_form_rejects_bad_price() {
        for price in ["", "abc", "NaN", "-2"] {
            let notice = parse_add_form(&form("p1", price)).unwrap_err();
            assert!(notice.is_error(), "price {price:?} should be rejected");
        }
    }

    #[test]
    fn test_parse_add_form_rejects_empty_id() {
        assert!(parse_add_form(&form(" ", "1.00")).is_err());
    }

    #[test]
    fn test_parse_add_form_accepts_valid_input() {
        let (id, name, price) = parse_add_form(&form("p1", "5.50")).unwrap();
        assert_eq!(id.as_str(), "p1");
        assert_eq!(name, UNNAMED_PRODUCT);
        assert_eq!(price.to_string(), "5.50");
    }
}
