//! API server configuration.
//!
//! Configuration is loaded from environment variables with fallback to
//! defaults (a `.env` file is picked up in `main` before loading).

use std::env;

/// API server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP listen port
    pub port: u16,

    /// HTTP bind address
    pub host: String,

    /// PostgreSQL connection string
    pub database_url: String,

    /// Public base URL used when shaping absolute file URLs,
    /// e.g. `http://localhost:3000/api`
    pub host_api: String,

    /// Root directory for uploaded product images
    pub static_dir: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// `HOST_API` defaults to `http://{host}:{port}/api` so locally the
    /// upload endpoint returns URLs that resolve against this same server.
    pub fn load() -> Result<Self, ConfigError> {
        let port: u16 = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("PORT".to_string()))?;

        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());

        let database_url = env::var("DATABASE_URL")
            .map_err(|_| ConfigError::MissingRequired("DATABASE_URL".to_string()))?;

        let host_api = env::var("HOST_API").unwrap_or_else(|_| {
            let url_host = if host == "0.0.0.0" { "localhost" } else { host.as_str() };
            format!("http://{}:{}/api", url_host, port)
        });

        let static_dir =
            env::var("STATIC_DIR").unwrap_or_else(|_| "./static/products".to_string());

        Ok(Config {
            port,
            host,
            database_url,
            host_api,
            static_dir,
        })
    }

    /// The socket address string to bind, e.g. `0.0.0.0:3000`.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_addr_format() {
        let config = Config {
            port: 3000,
            host: "0.0.0.0".to_string(),
            database_url: "postgres://localhost/tienda".to_string(),
            host_api: "http://localhost:3000/api".to_string(),
            static_dir: "./static/products".to_string(),
        };

        assert_eq!(config.bind_addr(), "0.0.0.0:3000");
    }
}
