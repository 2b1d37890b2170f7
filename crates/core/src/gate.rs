//! Demo role gate for the staff dashboards.
//!
//! This is not authentication: anyone can pick a role on the login page.
//! The gate only remembers the choice in persistent storage and decides
//! where a visitor may go.

use tracing::info;

use crate::notice::Notice;
use crate::storage::Storage;
use crate::types::{Role, RoleError};

/// Storage key of the role flag.
pub const ROLE_STORAGE_KEY: &str = "userRole";

/// Where visitors are sent when a dashboard rejects them.
pub const LOGIN_PATH: &str = "/login";

/// Where visitors land after logging out.
pub const HOME_PATH: &str = "/";

/// A restricted page was requested without the required role.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Access Denied: {} login required.", .required.label())]
pub struct AccessDenied {
    pub required: Role,
}

impl AccessDenied {
    /// Page to redirect the visitor to.
    #[must_use]
    pub const fn redirect_to(&self) -> &'static str {
        LOGIN_PATH
    }

    /// Notice explaining the redirect.
    #[must_use]
    pub fn notice(&self) -> Notice {
        Notice::error(self.to_string())
    }
}

/// Reads and writes the role flag.
#[derive(Debug)]
pub struct RoleGate<S> {
    storage: S,
}

impl<S: Storage> RoleGate<S> {
    pub const fn new(storage: S) -> Self {
        Self { storage }
    }

    /// The stored role, if the flag holds a known value.
    #[must_use]
    pub fn current_role(&self) -> Option<Role> {
        Role::from_flag(self.storage.get(ROLE_STORAGE_KEY).as_deref())
    }

    /// Check that the stored role is `required`.
    ///
    /// # Errors
    ///
    /// Returns [`AccessDenied`] when there is no role or a different one.
    pub fn guard(&self, required: Role) -> Result<Role, AccessDenied> {
        match self.current_role() {
            Some(role) if role == required => Ok(role),
            _ => Err(AccessDenied { required }),
        }
    }

    /// Store the selected role. The caller redirects to
    /// [`Role::dashboard_path`] on success.
    ///
    /// # Errors
    ///
    /// Returns [`RoleError::Invalid`] for anything but a known role; the
    /// stored flag is left untouched.
    pub fn login(&mut self, selection: &str) -> Result<Role, RoleError> {
        let role: Role = selection.parse()?;
        self.storage.set(ROLE_STORAGE_KEY, role.as_str().to_owned());
        info!(role = %role, "role selected");
        Ok(role)
    }

    /// Clear the role flag. The caller redirects to [`HOME_PATH`].
    pub fn logout(&mut self) -> Notice {
        self.storage.remove(ROLE_STORAGE_KEY);
        info!("role cleared");
        Notice::success("Logged out successfully.")
    }

    /// Give back the storage backend, e.g. to flush it.
    pub fn into_storage(self) -> S {
        self.storage
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    #[test]
    fn test_no_flag_means_no_role() {
        let gate = RoleGate::new(MemoryStorage::new());
        assert_eq!(gate.current_role(), None);
        assert_eq!(
            gate.guard(Role::Clerk),
            Err(AccessDenied {
                required: Role::Clerk
            })
        );
    }

    #[test]
    fn test_unknown_flag_means_no_role() {
        let gate = RoleGate::new(MemoryStorage::with_entry(ROLE_STORAGE_KEY, "admin"));
        assert_eq!(gate.current_role(), None);
    }

    #[test]
    fn test_guard_mismatch() {
        let gate = RoleGate::new(MemoryStorage::with_entry(ROLE_STORAGE_KEY, "clerk"));
        let denied = gate.guard(Role::Owner).unwrap_err();

        assert_eq!(denied.to_string(), "Access Denied: Owner login required.");
        assert_eq!(denied.redirect_to(), LOGIN_PATH);
        assert!(denied.notice().is_error());
        assert_eq!(gate.guard(Role::Clerk), Ok(Role::Clerk));
    }

    #[test]
    fn test_login_persists_role() {
        let mut gate = RoleGate::new(MemoryStorage::new());
        let role = gate.login("owner").unwrap();

        assert_eq!(role.dashboard_path(), "/owner_dashboard");
        assert_eq!(gate.current_role(), Some(Role::Owner));
        assert_eq!(
            gate.into_storage().get(ROLE_STORAGE_KEY).as_deref(),
            Some("owner")
        );
    }

    #[test]
    fn test_invalid_login_leaves_flag() {
        let mut gate = RoleGate::new(MemoryStorage::with_entry(ROLE_STORAGE_KEY, "clerk"));
        let err = gate.login("").unwrap_err();

        assert_eq!(err.to_string(), "Please select a valid role.");
        assert_eq!(gate.current_role(), Some(Role::Clerk));
    }

    #[test]
    fn test_logout_clears_flag() {
        let mut gate = RoleGate::new(MemoryStorage::with_entry(ROLE_STORAGE_KEY, "owner"));
        let notice = gate.logout();

        assert_eq!(notice.message, "Logged out successfully.");
        assert_eq!(gate.current_role(), None);
        assert!(gate.into_storage().is_empty());
    }
}
