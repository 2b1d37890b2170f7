//! One-shot notices carried across a redirect.
//!
//! Handlers that redirect after a command store the command's [`Notice`] in
//! the session; the next rendered page takes it out and shows it once.

use tower_sessions::Session;
use tuckshop_core::Notice;

use crate::models::session_keys;

/// Store `notice` to be shown on the next page.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_flash(
    session: &Session,
    notice: &Notice,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::FLASH, notice).await
}

/// Take the pending notice, if any. Unreadable notices are dropped.
pub async fn take_flash(session: &Session) -> Option<Notice> {
    session
        .remove::<Notice>(session_keys::FLASH)
        .await
        .ok()
        .flatten()
}
