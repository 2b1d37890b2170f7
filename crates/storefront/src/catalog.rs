//! Static product catalog shown on the home page.
//!
//! Products are listed either as cards (which carry a visible title) or as
//! banner promotions (which only declare a name). The add-to-cart form sends
//! both, and the cart handler resolves the display name from them.

use tuckshop_core::{Price, ProductId};

/// How a product is presented on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Card,
    Banner,
}

/// A product offered on the home page.
#[derive(Debug, Clone)]
pub struct Product {
    pub id: ProductId,
    /// Title rendered on the product card.
    pub title: Option<String>,
    /// Declared name used where no card title is shown.
    pub name: Option<String>,
    pub price: Price,
    pub blurb: String,
    pub placement: Placement,
}

impl Product {
    /// Text shown as the product heading.
    #[must_use]
    pub fn heading(&self) -> &str {
        self.title
            .as_deref()
            .or(self.name.as_deref())
            .unwrap_or_default()
    }

    /// Card title as submitted with the add-to-cart form; empty if none.
    #[must_use]
    pub fn card_title(&self) -> &str {
        self.title.as_deref().unwrap_or_default()
    }

    /// Declared name as submitted with the add-to-cart form; empty if none.
    #[must_use]
    pub fn declared_name(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }

    #[must_use]
    pub fn is_banner(&self) -> bool {
        self.placement == Placement::Banner
    }
}

/// The products on sale.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    #[must_use]
    pub const fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// The demo shop's fixed product list.
    #[must_use]
    pub fn demo() -> Self {
        let card = |id: &str, title: &str, pesewas: u32, blurb: &str| Product {
            id: demo_id(id),
            title: Some(title.to_string()),
            name: None,
            price: Price::from_minor_units(pesewas),
            blurb: blurb.to_string(),
            placement: Placement::Card,
        };

        Self::new(vec![
            Product {
                id: demo_id("promo-hamper"),
                title: None,
                name: Some("Festive Snack Hamper".to_string()),
                price: Price::from_minor_units(15_000),
                blurb: "This week only: the full tuck shop in one box.".to_string(),
                placement: Placement::Banner,
            },
            card("p-groundnuts", "Roasted Groundnuts", 500, "Salted, 250 g bag."),
            card("p-plantain", "Plantain Chips", 750, "Crisp and lightly spiced."),
            card("p-sobolo", "Sobolo Drink", 1_000, "Chilled hibiscus, 500 ml."),
            card("p-chinchin", "Chin Chin", 650, "Sweet fried dough bites."),
            card("p-kelewele", "Kelewele Mix", 1_250, "Spice blend for fried plantain."),
            card("p-toffee", "Coconut Toffee", 300, "Chewy, individually wrapped."),
        ])
    }

    /// All products in display order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Banner promotions.
    pub fn banners(&self) -> impl Iterator<Item = &Product> {
        self.products.iter().filter(|p| p.is_banner())
    }

    /// Regular product cards.
    pub fn cards(&self) -> impl Iterator<Item = &Product> {
        self.products.iter().filter(|p| !p.is_banner())
    }
}

/// Demo ids are compile-time literals; an invalid one is a programming error.
#[allow(clippy::expect_used)]
fn demo_id(id: &str) -> ProductId {
    ProductId::parse(id).expect("demo product ids are valid")
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_demo_catalog_ids_are_unique() {
        let catalog = Catalog::demo();
        let ids: HashSet<_> = catalog.products().iter().map(|p| &p.id).collect();
        assert_eq!(ids.len(), catalog.products().len());
    }

    #[test]
    fn test_demo_catalog_split() {
        let catalog = Catalog::demo();
        assert_eq!(catalog.banners().count(), 1);
        assert!(catalog.cards().all(|p| p.title.is_some()));
        assert!(catalog.banners().all(|p| p.title.is_none() && p.name.is_some()));
    }

    #[test]
    fn test_heading_prefers_title() {
        let catalog = Catalog::demo();
        let banner = catalog.banners().next().map(Product::heading);
        assert_eq!(banner, Some("Festive Snack Hamper"));
    }
}
