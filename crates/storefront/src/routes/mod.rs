//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home page
//! GET  /health                 - Health check
//!
//! # Cart (session-scoped)
//! GET  /cart                   - Home page with the cart modal open
//! POST /cart/add               - Add one unit (redirects home)
//! POST /cart/remove            - Remove a line (redirects to /cart)
//! POST /cart/decrement         - Take one unit off a line (redirects to /cart)
//! GET  /cart/count             - Cart count badge (fragment)
//!
//! # Checkout
//! POST /checkout               - Simulated checkout, clears the cart
//!
//! # Role gate
//! GET  /login                  - Role selection page
//! POST /login                  - Store the role flag
//! POST /logout                 - Clear the role flag
//!
//! # Dashboards (role required)
//! GET  /clerk_dashboard        - Clerk dashboard
//! GET  /owner_dashboard        - Owner dashboard
//! ```

pub mod auth;
pub mod cart;
pub mod dashboard;
pub mod home;
pub mod page;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::cart))
        .route("/add", post(cart::add))
        .route("/remove", post(cart::remove))
        .route("/decrement", post(cart::decrement))
        .route("/count", get(cart::count))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .nest("/cart", cart_routes())
        .route("/checkout", post(cart::checkout))
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/clerk_dashboard", get(dashboard::clerk))
        .route("/owner_dashboard", get(dashboard::owner))
}
