//! Display projection of a cart.

use rust_decimal::Decimal;

use super::Cart;
use crate::types::CurrencyCode;

/// Text of the row shown in place of an empty list.
pub const EMPTY_CART_MESSAGE: &str = "Cart is empty.";

/// Cart count badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Badge {
    pub count: u32,
    /// The badge is only shown when the cart has something in it.
    pub visible: bool,
}

impl Badge {
    #[must_use]
    pub const fn new(count: u32) -> Self {
        Self {
            count,
            visible: count > 0,
        }
    }
}

/// One rendered cart line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineRow {
    pub id: String,
    pub name: String,
    pub quantity: u32,
    /// Unit price, e.g. `₵10.00`.
    pub unit_price: String,
    /// Unit price times quantity, e.g. `₵20.00`.
    pub line_total: String,
}

/// A row of the cart listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartRow {
    Line(LineRow),
    Placeholder(&'static str),
}

/// The cart as shown in the cart modal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartView {
    /// Lines in cart order, or a single placeholder when empty.
    pub rows: Vec<CartRow>,
    pub total_amount: Decimal,
    /// Formatted total, e.g. `GH₵25.50`.
    pub total: String,
    pub badge: Badge,
}

impl CartView {
    /// Render `cart`. Deterministic and order-preserving.
    #[must_use]
    pub fn render(cart: &Cart, currency: CurrencyCode) -> Self {
        let rows = if cart.is_empty() {
            vec![CartRow::Placeholder(EMPTY_CART_MESSAGE)]
        } else {
            cart.items()
                .iter()
                .map(|item| {
                    CartRow::Line(LineRow {
                        id: item.id.to_string(),
                        name: item.name.clone(),
                        quantity: item.quantity,
                        unit_price: currency.format(item.price.amount()),
                        line_total: currency.format(item.line_total()),
                    })
                })
                .collect()
        };

        let total_amount = cart.total();
        Self {
            rows,
            total_amount,
            total: currency.format_qualified(total_amount),
            badge: Badge::new(cart.item_count()),
        }
    }

    /// True when only the placeholder row is present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self.rows.as_slice(), [CartRow::Placeholder(_)])
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::{Price, ProductId};

    fn sample_cart() -> Cart {
        let mut cart = Cart::new();
        for (id, name, price) in [("p1", "Widget", "10.00"), ("p2", "Gadget", "5.50")] {
            cart.add(
                ProductId::parse(id).unwrap(),
                name.to_string(),
                Price::parse(price).unwrap(),
            );
        }
        cart.add(
            ProductId::parse("p1").unwrap(),
            "Widget".to_string(),
            Price::parse("10.00").unwrap(),
        );
        cart
    }

    #[test]
    fn test_render_empty() {
        let view = CartView::render(&Cart::new(), CurrencyCode::GHS);
        assert_eq!(view.rows, vec![CartRow::Placeholder(EMPTY_CART_MESSAGE)]);
        assert_eq!(view.total_amount, Decimal::ZERO);
        assert_eq!(view.total, "GH₵0.00");
        assert!(view.is_empty());
        assert!(!view.badge.visible);
    }

    #[test]
    fn test_render_lines_in_order() {
        let view = CartView::render(&sample_cart(), CurrencyCode::GHS);

        assert_eq!(
            view.rows,
            vec![
                CartRow::Line(LineRow {
                    id: "p1".to_string(),
                    name: "Widget".to_string(),
                    quantity: 2,
                    unit_price: "₵10.00".to_string(),
                    line_total: "₵20.00".to_string(),
                }),
                CartRow::Line(LineRow {
                    id: "p2".to_string(),
                    name: "Gadget".to_string(),
                    quantity: 1,
                    unit_price: "₵5.50".to_string(),
                    line_total: "₵5.50".to_string(),
                }),
            ]
        );
        assert_eq!(view.total, "GH₵25.50");
        assert_eq!(view.badge, Badge::new(3));
    }

    #[test]
    fn test_render_is_deterministic() {
        let cart = sample_cart();
        assert_eq!(
            CartView::render(&cart, CurrencyCode::GHS),
            CartView::render(&cart, CurrencyCode::GHS)
        );
    }

    #[test]
    fn test_badge_visibility() {
        assert!(!Badge::new(0).visible);
        assert!(Badge::new(1).visible);
    }
}
