//! HTTP middleware stack for storefront.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layers (capture errors, added in `main`)
//! 2. Request ID (set `x-request-id` if missing, propagate to the response)
//! 3. `TraceLayer` (request span carrying the request ID)
//! 4. Security headers
//! 5. Session layer (tower-sessions with in-memory store)
//!
//! Role checks are extractors rather than layers: see [`RequireRole`].

pub mod flash;
pub mod gate;
pub mod security_headers;
pub mod session;

pub use flash::{set_flash, take_flash};
pub use gate::{ClerkOnly, CurrentRole, OwnerOnly, RequireRole, RequiredRole};
pub use security_headers::security_headers_middleware;
pub use session::create_session_layer;
