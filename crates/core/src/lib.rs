//! Tuck Shop Core - cart and role-gate domain library.
//!
//! This crate provides the state and rules used by the Tuck Shop storefront:
//! - [`cart`] - The session cart, its persistence and its rendered view
//! - [`gate`] - The demo role gate for staff dashboards
//! - [`storage`] - The key-value storage seam both of them persist through
//! - [`types`] - Newtype wrappers for product IDs, prices and roles
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no HTTP, no
//! framework types. Storage is injected through the [`Storage`] trait, so the
//! same cart logic runs against an in-memory map in tests and against a
//! session record in the storefront.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod gate;
pub mod notice;
pub mod storage;
pub mod types;

pub use cart::{Badge, Cart, CartError, CartRow, CartStore, CartView, LineItem, LineRow};
pub use gate::{AccessDenied, RoleGate};
pub use notice::{Notice, NoticeLevel};
pub use storage::{MemoryStorage, Storage};
pub use types::*;
