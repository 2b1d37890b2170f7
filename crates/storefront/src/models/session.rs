//! Keys of the values kept in the session.
//!
//! The cart record itself is stored under
//! [`tuckshop_core::cart::CART_STORAGE_KEY`], shared with the core.

/// Session keys for storefront data.
pub mod keys {
    /// Key for the notice shown on the next rendered page.
    pub const FLASH: &str = "flash";
}
