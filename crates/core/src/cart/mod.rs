//! The shopping cart.
//!
//! - [`Cart`] is the pure, ordered collection of line items
//! - [`CartStore`] owns a cart and mirrors every change into [`Storage`]
//! - [`CartView`] is the rendered projection shown in the cart modal
//!
//! [`Storage`]: crate::Storage

mod store;
mod view;

pub use store::{CART_STORAGE_KEY, CartStore};
pub use view::{Badge, CartRow, CartView, EMPTY_CART_MESSAGE, LineRow};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{Price, ProductId};

/// Errors produced by cart operations and cart records.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CartError {
    /// Checkout was requested with nothing in the cart.
    #[error("Your cart is empty!")]
    Empty,
    /// A cart record lists the same product twice.
    #[error("duplicate line for product {0}")]
    DuplicateLine(ProductId),
    /// A cart record contains a line with quantity zero.
    #[error("line for product {0} has zero quantity")]
    ZeroQuantity(ProductId),
}

/// One product entry in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    pub quantity: u32,
}

impl LineItem {
    /// Price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price.times(self.quantity)
    }
}

/// Ordered collection of line items, at most one per product.
///
/// Insertion order is display order. Every line has a quantity of at least
/// one; a line whose quantity would reach zero is removed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<LineItem>", into = "Vec<LineItem>")]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Build a cart from stored lines, checking the cart invariants.
    ///
    /// # Errors
    ///
    /// Returns an error if a product appears twice or a line has zero
    /// quantity.
    pub fn from_items(items: Vec<LineItem>) -> Result<Self, CartError> {
        for (index, item) in items.iter().enumerate() {
            if item.quantity == 0 {
                return Err(CartError::ZeroQuantity(item.id.clone()));
            }
            if items.iter().take(index).any(|earlier| earlier.id == item.id) {
                return Err(CartError::DuplicateLine(item.id.clone()));
            }
        }
        Ok(Self { items })
    }

    /// Lines in display order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns the line for `id`, if present.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&LineItem> {
        self.items.iter().find(|item| &item.id == id)
    }

    /// Add one unit of a product.
    ///
    /// An existing line keeps its original name and price and only gains
    /// quantity; otherwise a new line with quantity one is appended.
    #[allow(clippy::indexing_slicing)] // index from `position`
    pub fn add(&mut self, id: ProductId, name: String, price: Price) -> &LineItem {
        let index = match self.position(&id) {
            Some(index) => {
                let item = &mut self.items[index];
                item.quantity = item.quantity.saturating_add(1);
                index
            }
            None => {
                self.items.push(LineItem {
                    id,
                    name,
                    price,
                    quantity: 1,
                });
                self.items.len() - 1
            }
        };
        &self.items[index]
    }

    /// Remove the line for `id`. Returns the removed line, if any.
    pub fn remove(&mut self, id: &ProductId) -> Option<LineItem> {
        self.position(id).map(|index| self.items.remove(index))
    }

    /// Take one unit off the line for `id`, dropping the line at zero.
    ///
    /// Returns the remaining quantity, or `None` if the product is not in
    /// the cart.
    #[allow(clippy::indexing_slicing)] // index from `position`
    pub fn decrement(&mut self, id: &ProductId) -> Option<u32> {
        let index = self.position(id)?;
        let remaining = self.items[index].quantity.saturating_sub(1);
        if remaining == 0 {
            self.items.remove(index);
        } else {
            self.items[index].quantity = remaining;
        }
        Some(remaining)
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Sum of price times quantity over all lines.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.items
            .iter()
            .fold(Decimal::ZERO, |acc, item| acc.saturating_add(item.line_total()))
    }

    /// Sum of quantities over all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items
            .iter()
            .fold(0u32, |acc, item| acc.saturating_add(item.quantity))
    }

    fn position(&self, id: &ProductId) -> Option<usize> {
        self.items.iter().position(|item| &item.id == id)
    }
}

impl TryFrom<Vec<LineItem>> for Cart {
    type Error = CartError;

    fn try_from(items: Vec<LineItem>) -> Result<Self, Self::Error> {
        Self::from_items(items)
    }
}

impl From<Cart> for Vec<LineItem> {
    fn from(cart: Cart) -> Self {
        cart.items
    }
}
