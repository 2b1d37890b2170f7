//! Staff roles recognised by the role gate.

use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when a role selection is not one of the known roles.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RoleError {
    /// The selection is empty or not a known role.
    #[error("Please select a valid role.")]
    Invalid(String),
}

/// A staff role.
///
/// The stored flag is the lowercase name (`clerk` or `owner`); any other
/// value, including differently cased ones, means "no role".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Clerk,
    Owner,
}

impl Role {
    /// All known roles, in the order the login form lists them.
    pub const ALL: [Self; 2] = [Self::Clerk, Self::Owner];

    /// Returns the stored flag value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Clerk => "clerk",
            Self::Owner => "owner",
        }
    }

    /// Returns the human-readable role name.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Clerk => "Clerk",
            Self::Owner => "Owner",
        }
    }

    /// Returns the landing page for this role.
    #[must_use]
    pub const fn dashboard_path(self) -> &'static str {
        match self {
            Self::Clerk => "/clerk_dashboard",
            Self::Owner => "/owner_dashboard",
        }
    }

    /// Interpret a stored flag; unknown values mean no role.
    #[must_use]
    pub fn from_flag(flag: Option<&str>) -> Option<Self> {
        flag.and_then(|value| value.parse().ok())
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = RoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "clerk" => Ok(Self::Clerk),
            "owner" => Ok(Self::Owner),
            other => Err(RoleError::Invalid(other.to_owned())),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_roles() {
        assert_eq!("clerk".parse::<Role>().unwrap(), Role::Clerk);
        assert_eq!("owner".parse::<Role>().unwrap(), Role::Owner);
    }

    #[test]
    fn test_parse_is_exact() {
        assert!("Owner".parse::<Role>().is_err());
        assert!("".parse::<Role>().is_err());
        assert!(" clerk".parse::<Role>().is_err());
    }

    #[test]
    fn test_from_flag() {
        assert_eq!(Role::from_flag(Some("owner")), Some(Role::Owner));
        assert_eq!(Role::from_flag(Some("admin")), None);
        assert_eq!(Role::from_flag(None), None);
    }

    #[test]
    fn test_dashboard_paths() {
        assert_eq!(Role::Clerk.dashboard_path(), "/clerk_dashboard");
        assert_eq!(Role::Owner.dashboard_path(), "/owner_dashboard");
    }

    #[test]
    fn test_error_message() {
        let err = "manager".parse::<Role>().unwrap_err();
        assert_eq!(err.to_string(), "Please select a valid role.");
    }
}
