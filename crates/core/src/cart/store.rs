//! Cart state mirrored to storage.

use rust_decimal::Decimal;
use tracing::{debug, info};

use super::view::{Badge, CartView};
use super::{Cart, CartError, LineItem};
use crate::notice::Notice;
use crate::storage::Storage;
use crate::types::{CurrencyCode, Price, ProductId};

/// Storage key of the cart record.
pub const CART_STORAGE_KEY: &str = "shoppingCart";

/// Message acknowledging a successful checkout.
const CHECKOUT_MESSAGE: &str = "Checkout simulation: Proceeding to payment. Cart cleared.";

/// A cart that persists itself after every change.
///
/// The store owns the in-memory [`Cart`] and a [`Storage`] backend. It is
/// loaded once per page (or request), mutated through the command methods,
/// and each command writes the whole cart back under [`CART_STORAGE_KEY`]
/// as a JSON array before returning.
///
/// ```
/// use tuckshop_core::{CartStore, MemoryStorage, Price, ProductId};
///
/// let mut store = CartStore::load(MemoryStorage::new());
/// store.add_item(ProductId::parse("p1")?, "Widget", Price::parse("10.00")?);
/// assert_eq!(store.item_count(), 1);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct CartStore<S> {
    cart: Cart,
    storage: S,
}

impl<S: Storage> CartStore<S> {
    /// Load the cart from storage.
    ///
    /// A missing record, or one that does not parse as a valid cart, yields
    /// an empty cart. The failure is logged and otherwise ignored.
    pub fn load(storage: S) -> Self {
        let cart = match storage.get(CART_STORAGE_KEY) {
            None => Cart::new(),
            Some(record) => serde_json::from_str(&record).unwrap_or_else(|e| {
                debug!(error = %e, "discarding unreadable cart record");
                Cart::new()
            }),
        };

        Self { cart, storage }
    }

    /// The current cart.
    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Add one unit of a product and persist.
    ///
    /// A product already in the cart keeps the name and price it was first
    /// added with. Returns the acknowledgment to show the user.
    pub fn add_item(&mut self, id: ProductId, name: &str, price: Price) -> Notice {
        let line = self.cart.add(id, name.to_owned(), price);
        info!(product_id = %line.id, quantity = line.quantity, "item added to cart");
        let notice = Notice::success(format!("Added 1x {} to cart.", line.name));
        self.persist();
        notice
    }

    /// Remove a product's line and persist. Absent products are a no-op.
    pub fn remove_item(&mut self, id: &ProductId) -> Option<LineItem> {
        let removed = self.cart.remove(id);
        if removed.is_some() {
            info!(product_id = %id, "item removed from cart");
        }
        self.persist();
        removed
    }

    /// Take one unit of a product off the cart and persist.
    ///
    /// Returns the remaining quantity (zero when the line was dropped), or
    /// `None` if the product is not in the cart.
    pub fn decrement_item(&mut self, id: &ProductId) -> Option<u32> {
        let remaining = self.cart.decrement(id);
        self.persist();
        remaining
    }

    /// Sum of price times quantity; zero for an empty cart.
    #[must_use]
    pub fn compute_total(&self) -> Decimal {
        self.cart.total()
    }

    /// Sum of quantities.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.cart.item_count()
    }

    /// Cart badge state derived from the item count.
    #[must_use]
    pub fn badge(&self) -> Badge {
        Badge::new(self.item_count())
    }

    /// Render the cart for display.
    #[must_use]
    pub fn render(&self, currency: CurrencyCode) -> CartView {
        CartView::render(&self.cart, currency)
    }

    /// Empty the cart and persist.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Empty`] without touching storage if the cart is
    /// already empty.
    pub fn checkout(&mut self) -> Result<Notice, CartError> {
        if self.cart.is_empty() {
            return Err(CartError::Empty);
        }

        info!(
            lines = self.cart.len(),
            items = self.cart.item_count(),
            "checkout completed"
        );
        self.cart.clear();
        self.persist();
        Ok(Notice::success(CHECKOUT_MESSAGE))
    }

    /// Give back the storage backend, e.g. to flush it.
    pub fn into_storage(self) -> S {
        self.storage
    }

    fn persist(&mut self) {
        match serde_json::to_string(&self.cart) {
            Ok(record) => self.storage.set(CART_STORAGE_KEY, record),
            Err(e) => tracing::warn!(error = %e, "failed to serialize cart"),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::cart::CartRow;
    use crate::storage::MemoryStorage;

    fn id(s: &str) -> ProductId {
        ProductId::parse(s).unwrap()
    }

    fn price(s: &str) -> Price {
        Price::parse(s).unwrap()
    }

    fn empty_store() -> CartStore<MemoryStorage> {
        CartStore::load(MemoryStorage::new())
    }

    #[test]
    fn load_without_record_is_empty() {
        let store = empty_store();
        assert!(store.cart().is_empty());
        assert_eq!(store.item_count(), 0);
        assert!(!store.badge().visible);
    }

    #[test]
    fn load_corrupted_record_is_empty() {
        let storage = MemoryStorage::with_entry(CART_STORAGE_KEY, "{not json[");
        let store = CartStore::load(storage);
        assert!(store.cart().is_empty());
    }

    #[test]
    fn load_invalid_lines_is_empty() {
        for record in [
            r#"[{"id":"","name":"x","price":1,"quantity":1}]"#,
            r#"[{"id":"p1","name":"x","price":-1,"quantity":1}]"#,
            r#"[{"id":"p1","name":"x","price":1,"quantity":0}]"#,
            r#"[{"id":"p1","name":"x","price":1,"quantity":1},{"id":"p1","name":"y","price":2,"quantity":1}]"#,
            r#"{"id":"p1"}"#,
            "null",
        ] {
            let store = CartStore::load(MemoryStorage::with_entry(CART_STORAGE_KEY, record));
            assert!(store.cart().is_empty(), "record should be discarded: {record}");
        }
    }

    #[test]
    fn load_reads_persisted_record() {
        let mut store = empty_store();
        store.add_item(id("p1"), "Widget", price("10.00"));
        store.add_item(id("p1"), "Widget", price("10.00"));

        let reloaded = CartStore::load(store.into_storage());
        assert_eq!(reloaded.item_count(), 2);
        assert_eq!(reloaded.cart().get(&id("p1")).unwrap().name, "Widget");
    }

    #[test]
    fn widget_gadget_scenario() {
        let mut store = empty_store();
        store.add_item(id("p1"), "Widget", price("10.00"));
        store.add_item(id("p2"), "Gadget", price("5.50"));
        store.add_item(id("p1"), "Widget", price("10.00"));

        let items = store.cart().items();
        assert_eq!(items.len(), 2);
        assert_eq!(
            items.first().map(|i| (i.id.as_str(), i.name.as_str(), i.quantity)),
            Some(("p1", "Widget", 2))
        );
        assert_eq!(
            items.get(1).map(|i| (i.id.as_str(), i.name.as_str(), i.quantity)),
            Some(("p2", "Gadget", 1))
        );
        assert_eq!(store.compute_total(), Decimal::new(2550, 2));
        assert_eq!(store.item_count(), 3);
        assert!(store.badge().visible);
    }

    #[test]
    fn add_item_acknowledges_with_original_name() {
        let mut store = empty_store();
        let first = store.add_item(id("p1"), "Widget", price("10"));
        let second = store.add_item(id("p1"), "Other", price("12"));

        assert_eq!(first.message, "Added 1x Widget to cart.");
        assert_eq!(second.message, "Added 1x Widget to cart.");
        assert!(!second.is_error());
    }

    #[test]
    fn add_item_persists_json_array() {
        let mut store = empty_store();
        store.add_item(id("p2"), "Gadget", price("5.50"));

        let storage = store.into_storage();
        let record: serde_json::Value =
            serde_json::from_str(&storage.get(CART_STORAGE_KEY).unwrap()).unwrap();
        assert_eq!(
            record,
            serde_json::json!([{"id": "p2", "name": "Gadget", "price": "5.50", "quantity": 1}])
        );
    }

    #[test]
    fn reload_keeps_every_line_and_exact_prices() {
        let mut store = empty_store();
        store.add_item(id("p1"), "Widget", price("10.00"));
        store.add_item(id("big"), "Big", price("79228162514264337593543950335"));
        store.add_item(id("fine"), "Fine", price("1234567.123456789012345"));
        let total = store.compute_total();

        let reloaded = CartStore::load(store.into_storage());
        assert_eq!(reloaded.item_count(), 3);
        assert_eq!(
            reloaded.cart().get(&id("fine")).unwrap().price,
            price("1234567.123456789012345")
        );
        assert_eq!(reloaded.compute_total(), total);
    }

    #[test]
    fn ids_match_exactly() {
        let mut store = empty_store();
        store.add_item(id("p1"), "Widget", price("1"));
        store.add_item(id(" p1"), "Spaced", price("1"));
        assert_eq!(store.cart().len(), 2);
    }

    #[test]
    fn load_accepts_numeric_prices() {
        let record = r#"[{"id":"p1","name":"Widget","price":10.5,"quantity":2}]"#;
        let store = CartStore::load(MemoryStorage::with_entry(CART_STORAGE_KEY, record));
        assert_eq!(store.compute_total(), Decimal::new(21, 0));
    }

    #[test]
    fn remove_item_twice_is_idempotent() {
        let mut store = empty_store();
        store.add_item(id("p1"), "Widget", price("10"));
        store.add_item(id("p2"), "Gadget", price("5"));

        assert!(store.remove_item(&id("p1")).is_some());
        let after_first = store.cart().clone();
        assert!(store.remove_item(&id("p1")).is_none());
        assert_eq!(store.cart(), &after_first);
        assert_eq!(store.item_count(), 1);
    }

    #[test]
    fn decrement_item_removes_at_zero_and_persists() {
        let mut store = empty_store();
        store.add_item(id("p1"), "Widget", price("10"));
        assert_eq!(store.decrement_item(&id("p1")), Some(0));

        let reloaded = CartStore::load(store.into_storage());
        assert!(reloaded.cart().is_empty());
    }

    #[test]
    fn checkout_clears_non_empty_cart() {
        let mut store = empty_store();
        store.add_item(id("p1"), "Widget", price("10"));

        let notice = store.checkout().unwrap();
        assert_eq!(notice.message, CHECKOUT_MESSAGE);
        assert_eq!(store.item_count(), 0);
        assert_eq!(store.compute_total(), Decimal::ZERO);

        let storage = store.into_storage();
        assert_eq!(storage.get(CART_STORAGE_KEY).as_deref(), Some("[]"));
    }

    #[test]
    fn checkout_empty_cart_is_rejected_without_writing() {
        let mut store = empty_store();
        let err = store.checkout().unwrap_err();

        assert_eq!(err, CartError::Empty);
        assert_eq!(err.to_string(), "Your cart is empty!");
        assert!(store.into_storage().is_empty());
    }

    #[test]
    fn render_empty_has_single_placeholder() {
        let view = empty_store().render(CurrencyCode::GHS);
        assert_eq!(view.rows.len(), 1);
        assert!(matches!(view.rows.first(), Some(CartRow::Placeholder(_))));
        assert_eq!(view.total, "GH₵0.00");
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 128,
            ..ProptestConfig::default()
        })]

        /// Distinct ids: one unit per call and the total is the price sum.
        #[test]
        fn distinct_adds_count_and_sum(cents in prop::collection::vec(0u32..1_000_000, 0..20)) {
            let mut store = empty_store();
            let mut expected = Decimal::ZERO;

            for (index, amount) in cents.iter().enumerate() {
                let price = Price::from_minor_units(*amount);
                expected += price.amount();
                store.add_item(id(&format!("p{index}")), "Item", price);
            }

            prop_assert_eq!(store.item_count() as usize, cents.len());
            prop_assert_eq!(store.compute_total(), expected);
        }

        /// Repeated ids only bump quantity and never rewrite name or price.
        #[test]
        fn repeated_adds_keep_first_entry(
            repeats in prop::collection::vec((0u32..10_000, "[a-z]{1,8}"), 1..10)
        ) {
            let mut store = empty_store();
            store.add_item(id("p1"), "Original", price("3.25"));

            for (amount, name) in &repeats {
                store.add_item(id("p1"), name, Price::from_minor_units(*amount));
            }

            let line = store.cart().get(&id("p1")).unwrap();
            prop_assert_eq!(line.quantity as usize, repeats.len() + 1);
            prop_assert_eq!(line.name.as_str(), "Original");
            prop_assert_eq!(line.price, price("3.25"));
        }

        /// Checkout always leaves nothing behind.
        #[test]
        fn checkout_always_empties(cents in prop::collection::vec(0u32..100_000, 1..10)) {
            let mut store = empty_store();
            for (index, amount) in cents.iter().enumerate() {
                store.add_item(id(&format!("p{}", index % 3)), "Item", Price::from_minor_units(*amount));
            }

            prop_assert!(store.checkout().is_ok());
            prop_assert_eq!(store.item_count(), 0);
            prop_assert_eq!(store.compute_total(), Decimal::ZERO);
        }
    }
}
