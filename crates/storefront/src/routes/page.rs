//! Data every page layout needs.

use tower_sessions::Session;
use tuckshop_core::cart::CART_STORAGE_KEY;
use tuckshop_core::{CartStore, CartView, CurrencyCode, Notice, Role};

use crate::middleware::take_flash;
use crate::state::AppState;
use crate::storage::SessionStorage;

/// Layout context: the pending notice, the visitor's role and the cart.
#[derive(Debug, Clone)]
pub struct PageContext {
    pub notice: Option<Notice>,
    pub role: Option<Role>,
    pub cart: CartView,
    /// Currency catalog prices are shown in.
    pub currency: CurrencyCode,
    /// Whether the cart modal is rendered open.
    pub cart_open: bool,
}

impl PageContext {
    /// Load the cart from the session and take the pending notice.
    pub async fn load(
        state: &AppState,
        session: &Session,
        role: Option<Role>,
        cart_open: bool,
    ) -> Self {
        let notice = take_flash(session).await;
        Self::build(state, session, role, cart_open, notice).await
    }

    /// Load the cart and show `notice`, produced by this request.
    ///
    /// The pending notice is left in the session for the next page.
    pub async fn load_with_notice(
        state: &AppState,
        session: &Session,
        role: Option<Role>,
        notice: Notice,
    ) -> Self {
        Self::build(state, session, role, false, Some(notice)).await
    }

    async fn build(
        state: &AppState,
        session: &Session,
        role: Option<Role>,
        cart_open: bool,
        notice: Option<Notice>,
    ) -> Self {
        let storage = SessionStorage::load(session, &[CART_STORAGE_KEY]).await;
        let currency = state.config().currency;
        let cart = CartStore::load(storage).render(currency);

        Self {
            notice,
            role,
            cart,
            currency,
            cart_open,
        }
    }
}
