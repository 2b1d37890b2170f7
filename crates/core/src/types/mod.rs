//! Core types for Tuck Shop.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod price;
pub mod role;

pub use id::{ProductId, ProductIdError};
pub use price::{CurrencyCode, Price, PriceError};
pub use role::{Role, RoleError};
