//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//! - `TUCKSHOP_HOST` - Bind address (default: 127.0.0.1)
//! - `TUCKSHOP_PORT` - Listen port (default: 3000)
//! - `TUCKSHOP_BASE_URL` - Public URL (default: <http://localhost:3000>);
//!   an `https://` URL marks cookies as secure
//! - `TUCKSHOP_STATIC_DIR` - Static asset directory (default: crates/storefront/static)
//! - `TUCKSHOP_CURRENCY` - ISO 4217 display currency (default: GHS)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use thiserror::Error;
use tuckshop_core::CurrencyCode;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_BASE_URL: &str = "http://localhost:3000";
const DEFAULT_STATIC_DIR: &str = "crates/storefront/static";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the storefront
    pub base_url: String,
    /// Directory served under `/static`
    pub static_dir: PathBuf,
    /// Currency prices are displayed in
    pub currency: CurrencyCode,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g. "production")
    pub sentry_environment: Option<String>,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: DEFAULT_PORT,
            base_url: DEFAULT_BASE_URL.to_string(),
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
            currency: CurrencyCode::default(),
            sentry_dsn: None,
            sentry_environment: None,
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unparsable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("TUCKSHOP_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("TUCKSHOP_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("TUCKSHOP_PORT", &DEFAULT_PORT.to_string())
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("TUCKSHOP_PORT".to_string(), e.to_string()))?;
        let base_url = get_env_or_default("TUCKSHOP_BASE_URL", DEFAULT_BASE_URL);
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ConfigError::InvalidEnvVar(
                "TUCKSHOP_BASE_URL".to_string(),
                "must start with http:// or https://".to_string(),
            ));
        }
        let static_dir = PathBuf::from(get_env_or_default("TUCKSHOP_STATIC_DIR", DEFAULT_STATIC_DIR));
        let currency = get_env_or_default("TUCKSHOP_CURRENCY", "GHS")
            .parse::<CurrencyCode>()
            .map_err(|e| ConfigError::InvalidEnvVar("TUCKSHOP_CURRENCY".to_string(), e))?;

        Ok(Self {
            host,
            port,
            base_url,
            static_dir,
            currency,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether cookies should carry the `Secure` attribute.
    #[must_use]
    pub fn secure_cookies(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable, treating empty values as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_socket_addr() {
        let config = StorefrontConfig::default();
        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3000);
    }

    #[test]
    fn test_secure_cookies_follow_base_url() {
        let mut config = StorefrontConfig::default();
        assert!(!config.secure_cookies());

        config.base_url = "https://shop.example".to_string();
        assert!(config.secure_cookies());
    }

    #[test]
    fn test_default_currency_is_cedi() {
        assert_eq!(StorefrontConfig::default().currency, CurrencyCode::GHS);
    }
}
