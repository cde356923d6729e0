//! Server configuration for the withholding API.
//!
//! This module provides configuration types for the REST server, supporting
//! both programmatic configuration and environment variable overrides.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `RETENCIONES_PORT` | 8080 | Server port |
//! | `RETENCIONES_HOST` | 127.0.0.1 | Host to bind |
//! | `RETENCIONES_LOG_LEVEL` | info | Log level |
//! | `RETENCIONES_REQUEST_TIMEOUT` | 30 | Request timeout (seconds) |
//! | `RETENCIONES_ENABLE_CORS` | false | Enable CORS |
//! | `RETENCIONES_CORS_ORIGINS` | * | Allowed origins |
//! | `RETENCIONES_CORS_METHODS` | GET,POST,OPTIONS | Allowed methods |
//! | `RETENCIONES_CORS_HEADERS` | Content-Type,Accept | Allowed headers |
//! | `RETENCIONES_DATABASE_PATH` | retenciones.db | SQLite database file |
//! | `RETENCIONES_DB_POOL_SIZE` | 10 | Maximum pooled connections |
//! | `RETENCIONES_DB_POOL_TIMEOUT_MS` | 30000 | Wait for a pooled connection (ms) |
//! | `RETENCIONES_DEFAULT_PAGE_SIZE` | 15 | Listing page size when `limit` is absent |
//! | `RETENCIONES_MAX_PAGE_SIZE` | 1000 | Upper bound for `limit` |
//! | `RETENCIONES_SECURE_COOKIES` | false | Mark session cookies `Secure` |
//! | `RETENCIONES_SESSION_MAX_AGE` | 604800 | Session cookie lifetime (seconds) |
//! | `RETENCIONES_AGENT_RIF` | J-00000000-0 | Issuing agent RIF on certificates |
//! | `RETENCIONES_AGENT_NAME` | Mi Empresa C.A. | Issuing agent name |
//! | `RETENCIONES_AGENT_ADDRESS` | Av. Principal, Edif. X, Piso Y, Caracas | Issuing agent address |
//!
//! # Example
//!
//! ```rust
//! use retenciones_rest::ServerConfig;
//!
//! let config = ServerConfig {
//!     port: 3000,
//!     host: "0.0.0.0".to_string(),
//!     secure_cookies: true,
//!     ..Default::default()
//! };
//! assert!(config.validate().is_ok());
//! ```

use clap::Parser;

const DEFAULT_AGENT_RIF: &str = "J-00000000-0";
const DEFAULT_AGENT_NAME: &str = "Mi Empresa C.A.";
const DEFAULT_AGENT_ADDRESS: &str = "Av. Principal, Edif. X, Piso Y, Caracas";

/// Server configuration for the withholding API.
///
/// This struct can be constructed from environment variables using [`ServerConfig::from_env`],
/// from command line arguments using [`ServerConfig::parse`], or programmatically.
#[derive(Debug, Clone, Parser)]
#[command(name = "retenciones")]
#[command(about = "ISLR and IVA withholding certificates server")]
pub struct ServerConfig {
    /// Port to listen on.
    #[arg(short, long, env = "RETENCIONES_PORT", default_value = "8080")]
    pub port: u16,

    /// Host address to bind to.
    #[arg(long, env = "RETENCIONES_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, env = "RETENCIONES_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Request timeout in seconds.
    #[arg(long, env = "RETENCIONES_REQUEST_TIMEOUT", default_value = "30")]
    pub request_timeout: u64,

    /// Enable CORS.
    #[arg(long, env = "RETENCIONES_ENABLE_CORS", default_value = "false")]
    pub enable_cors: bool,

    /// Allowed CORS origins (comma-separated, or * for all).
    #[arg(long, env = "RETENCIONES_CORS_ORIGINS", default_value = "*")]
    pub cors_origins: String,

    /// Allowed CORS methods (comma-separated, or * for all).
    #[arg(long, env = "RETENCIONES_CORS_METHODS", default_value = "GET,POST,OPTIONS")]
    pub cors_methods: String,

    /// Allowed CORS headers (comma-separated, or * for all).
    #[arg(long, env = "RETENCIONES_CORS_HEADERS", default_value = "Content-Type,Accept")]
    pub cors_headers: String,

    /// Path of the SQLite database file (`:memory:` for a throwaway database).
    #[arg(long, env = "RETENCIONES_DATABASE_PATH", default_value = "retenciones.db")]
    pub database_path: String,

    /// Maximum number of pooled database connections.
    #[arg(long, env = "RETENCIONES_DB_POOL_SIZE", default_value = "10")]
    pub db_pool_size: u32,

    /// How long a request waits for a pooled connection, in milliseconds.
    #[arg(long, env = "RETENCIONES_DB_POOL_TIMEOUT_MS", default_value = "30000")]
    pub db_pool_timeout_ms: u64,

    /// Listing page size when the request omits `limit`.
    #[arg(long, env = "RETENCIONES_DEFAULT_PAGE_SIZE", default_value = "15")]
    pub default_page_size: u32,

    /// Maximum accepted `limit`.
    #[arg(long, env = "RETENCIONES_MAX_PAGE_SIZE", default_value = "1000")]
    pub max_page_size: u32,

    /// Mark session cookies `Secure` (enable behind HTTPS).
    #[arg(long, env = "RETENCIONES_SECURE_COOKIES", default_value = "false")]
    pub secure_cookies: bool,

    /// Session cookie lifetime in seconds.
    #[arg(long, env = "RETENCIONES_SESSION_MAX_AGE", default_value = "604800")]
    pub session_max_age: u64,

    /// RIF printed in the issuing-agent block of certificates.
    #[arg(long, env = "RETENCIONES_AGENT_RIF", default_value = DEFAULT_AGENT_RIF)]
    pub agent_rif: String,

    /// Name printed in the issuing-agent block of certificates.
    #[arg(long, env = "RETENCIONES_AGENT_NAME", default_value = DEFAULT_AGENT_NAME)]
    pub agent_name: String,

    /// Address printed in the issuing-agent block of certificates.
    #[arg(long, env = "RETENCIONES_AGENT_ADDRESS", default_value = DEFAULT_AGENT_ADDRESS)]
    pub agent_address: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            host: "127.0.0.1".to_string(),
            log_level: "info".to_string(),
            request_timeout: 30,
            enable_cors: false,
            cors_origins: "*".to_string(),
            cors_methods: "GET,POST,OPTIONS".to_string(),
            cors_headers: "Content-Type,Accept".to_string(),
            database_path: "retenciones.db".to_string(),
            db_pool_size: 10,
            db_pool_timeout_ms: 30_000,
            default_page_size: 15,
            max_page_size: 1000,
            secure_cookies: false,
            session_max_age: 604_800, // 7 days
            agent_rif: DEFAULT_AGENT_RIF.to_string(),
            agent_name: DEFAULT_AGENT_NAME.to_string(),
            agent_address: DEFAULT_AGENT_ADDRESS.to_string(),
        }
    }
}

impl ServerConfig {
    /// Creates a new ServerConfig from environment variables.
    ///
    /// Falls back to defaults if parsing fails.
    pub fn from_env() -> Self {
        Self::try_parse().unwrap_or_default()
    }

    /// Returns the socket address to bind to.
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Validates the configuration and returns errors if any.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.port == 0 {
            errors.push("Port cannot be 0".to_string());
        }

        if self.request_timeout == 0 {
            errors.push("Request timeout cannot be 0".to_string());
        }

        if self.db_pool_size == 0 {
            errors.push("Database pool size cannot be 0".to_string());
        }

        if self.database_path.trim().is_empty() {
            errors.push("Database path cannot be empty".to_string());
        }

        if self.default_page_size == 0 {
            errors.push("Default page size cannot be 0".to_string());
        }

        if self.default_page_size > self.max_page_size {
            errors.push("Default page size cannot exceed max page size".to_string());
        }

        if self.session_max_age == 0 {
            errors.push("Session max age cannot be 0".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Creates a configuration suitable for testing.
    ///
    /// Uses ephemeral port 0 and an in-memory database.
    pub fn for_testing() -> Self {
        Self {
            port: 0, // Let OS assign port
            log_level: "debug".to_string(),
            request_timeout: 5, // Shorter timeout for tests
            database_path: ":memory:".to_string(),
            db_pool_size: 1,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.port, 8080);
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.default_page_size, 15);
        assert_eq!(config.session_max_age, 604_800);
        assert_eq!(config.agent_rif, "J-00000000-0");
        assert!(!config.secure_cookies);
    }

    #[test]
    fn test_clap_defaults_match_default_impl() {
        let parsed = ServerConfig::try_parse_from(["retenciones"]).unwrap();
        let default = ServerConfig::default();
        assert_eq!(parsed.port, default.port);
        assert_eq!(parsed.db_pool_size, default.db_pool_size);
        assert_eq!(parsed.agent_name, default.agent_name);
        assert_eq!(parsed.agent_address, default.agent_address);
        assert_eq!(parsed.max_page_size, default.max_page_size);
    }

    #[test]
    fn test_socket_addr() {
        let config = ServerConfig {
            port: 3000,
            host: "0.0.0.0".to_string(),
            ..Default::default()
        };
        assert_eq!(config.socket_addr(), "0.0.0.0:3000");
    }

    #[test]
    fn test_validate_valid() {
        let config = ServerConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_invalid_port() {
        let config = ServerConfig {
            port: 0,
            ..Default::default()
        };
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().iter().any(|e| e.contains("Port")));
    }

    #[test]
    fn test_validate_reports_every_problem() {
        let config = ServerConfig {
            default_page_size: 100,
            max_page_size: 50,
            db_pool_size: 0,
            ..Default::default()
        };
        let errors = config.validate().unwrap_err();
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_for_testing() {
        let config = ServerConfig::for_testing();
        assert_eq!(config.port, 0);
        assert_eq!(config.database_path, ":memory:");
        assert!(!config.enable_cors);
    }
}
