//! Server configuration read from the environment.

use std::env;
use std::net::SocketAddr;

/// Network and cross-origin settings for the HTTP server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Interface to bind (default: 0.0.0.0)
    pub host: String,
    /// Port to bind (default: 8080)
    pub port: u16,
    /// Single origin allowed to make credentialed cross-origin requests
    pub cors_origin: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            cors_origin: None,
        }
    }
}

impl ServerConfig {
    /// Create a configuration from environment variables.
    ///
    /// # Environment Variables
    /// - `HOST`: Server host (default: 0.0.0.0)
    /// - `PORT`: Server port (default: 8080)
    /// - `CORS_ORIGIN`: Allowed cross-origin caller, e.g. `http://localhost:3000` (optional)
    ///
    /// # Errors
    /// Returns an error if `PORT` is set but is not a valid port number.
    pub fn from_env() -> Result<Self, String> {
        let defaults = Self::default();
        let host = env::var("HOST").unwrap_or(defaults.host);
        let port = match env::var("PORT") {
            Ok(raw) => raw
                .parse()
                .map_err(|_| format!("PORT must be a valid port number, got '{}'", raw))?,
            Err(_) => defaults.port,
        };
        let cors_origin = env::var("CORS_ORIGIN")
            .ok()
            .filter(|origin| !origin.trim().is_empty());

        Ok(Self {
            host,
            port,
            cors_origin,
        })
    }

    /// Resolve the socket address to bind.
    pub fn socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| format!("Invalid bind address {}:{}: {}", self.host, self.port, e))
    }
}
