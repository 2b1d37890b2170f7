//! Product identifier type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`ProductId`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ProductIdError {
    /// The input is empty or only whitespace.
    #[error("product id cannot be empty")]
    Empty,
    /// The input is too long.
    #[error("product id must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
}

/// Identifier of a product in the catalog and of its line in the cart.
///
/// ## Constraints
///
/// - Not empty or whitespace only
/// - Kept exactly as given: `" p1"` and `"p1"` are different products
/// - At most 128 characters
///
/// ## Examples
///
/// ```
/// use tuckshop_core::ProductId;
///
/// assert_eq!(ProductId::parse("p1").unwrap().as_str(), "p1");
/// assert!(ProductId::parse("").is_err());
/// assert!(ProductId::parse("   ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProductId(String);

impl ProductId {
    /// Maximum length of a product identifier.
    pub const MAX_LENGTH: usize = 128;

    /// Parse a `ProductId` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is blank or longer than
    /// [`Self::MAX_LENGTH`].
    pub fn parse(s: &str) -> Result<Self, ProductIdError> {
        if s.trim().is_empty() {
            return Err(ProductIdError::Empty);
        }
        if s.chars().count() > Self::MAX_LENGTH {
            return Err(ProductIdError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }
        Ok(Self(s.to_owned()))
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for ProductId {
    type Err = ProductIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ProductId {
    type Error = ProductIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ProductId> for String {
    fn from(id: ProductId) -> Self {
        id.0
    }
}

impl AsRef<str> for ProductId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_keeps_id_exact() {
        assert_eq!(ProductId::parse(" sku-42").unwrap().as_str(), " sku-42");
        assert_ne!(ProductId::parse(" p1").unwrap(), ProductId::parse("p1").unwrap());
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(ProductId::parse(""), Err(ProductIdError::Empty));
        assert_eq!(ProductId::parse(" \t "), Err(ProductIdError::Empty));
    }

    #[test]
    fn test_parse_too_long() {
        let long = "x".repeat(ProductId::MAX_LENGTH + 1);
        assert!(matches!(
            ProductId::parse(&long),
            Err(ProductIdError::TooLong { .. })
        ));
    }

    #[test]
    fn test_deserialize_rejects_empty() {
        assert!(serde_json::from_str::<ProductId>("\"\"").is_err());
        let id: ProductId = serde_json::from_str("\"p1\"").unwrap();
        assert_eq!(id.to_string(), "p1");
    }
}
