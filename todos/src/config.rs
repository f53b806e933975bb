//! Configuration loaded from the environment.
//!
//! | Variable | Default | Meaning |
//! |---|---|---|
//! | `TODO_SERVICE_URL` | `http://localhost:3030/api/todos` | Collection URL, or `memory` for the in-memory service |
//! | `TODO_REQUEST_TIMEOUT_SECS` | `10` | Per-request timeout of the HTTP service |
//!
//! # Example
//!
//! ```no_run
//! use todos::config::TodoConfig;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = TodoConfig::from_env()?;
//! let service = config.build_service()?;
//! # Ok(())
//! # }
//! ```

use crate::service::{HttpTodoService, InMemoryTodoService, ServiceError, TodoService};
use reqwest::Url;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Environment variable holding the service URL
pub const SERVICE_URL_VAR: &str = "TODO_SERVICE_URL";
/// Environment variable holding the request timeout in seconds
pub const REQUEST_TIMEOUT_VAR: &str = "TODO_REQUEST_TIMEOUT_SECS";
/// Service URL used when none is configured
pub const DEFAULT_SERVICE_URL: &str = "http://localhost:3030/api/todos";
/// Request timeout used when none is configured
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration error
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The service URL does not parse or is not http(s)
    #[error("invalid service URL {url:?}: {reason}")]
    InvalidUrl {
        /// The rejected value
        url: String,
        /// Why it was rejected
        reason: String,
    },

    /// The timeout is not a positive whole number of seconds
    #[error("invalid request timeout {0:?}: expected a positive number of seconds")]
    InvalidTimeout(String),
}

/// Where the todos live
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ServiceBackend {
    /// REST collection at this URL
    Http {
        /// Collection URL
        base_url: String,
    },
    /// Process-local storage
    InMemory,
}

/// Todo service configuration
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TodoConfig {
    /// Service to talk to
    pub backend: ServiceBackend,
    /// Per-request timeout for the HTTP service
    pub request_timeout: Duration,
}

impl Default for TodoConfig {
    fn default() -> Self {
        Self {
            backend: ServiceBackend::Http {
                base_url: DEFAULT_SERVICE_URL.to_string(),
            },
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

impl TodoConfig {
    /// Load configuration from process environment variables
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Load configuration through `lookup`, which maps variable names to values
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a variable is set to an invalid value.
    pub fn from_vars<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup(SERVICE_URL_VAR) {
            config = config.with_service_url(url.trim())?;
        }

        if let Some(raw) = lookup(REQUEST_TIMEOUT_VAR) {
            let secs = raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or_else(|| ConfigError::InvalidTimeout(raw.clone()))?;
            config = config.with_request_timeout(Duration::from_secs(secs));
        }

        Ok(config)
    }

    /// Use the service at `url`; `memory` selects the in-memory service
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidUrl`] if `url` is not an http(s) URL.
    pub fn with_service_url(mut self, url: &str) -> Result<Self, ConfigError> {
        if url.eq_ignore_ascii_case("memory") {
            self.backend = ServiceBackend::InMemory;
            return Ok(self);
        }

        let parsed = Url::parse(url).map_err(|e| ConfigError::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidUrl {
                url: url.to_string(),
                reason: format!("unsupported scheme {}", parsed.scheme()),
            });
        }

        self.backend = ServiceBackend::Http {
            base_url: url.to_string(),
        };
        Ok(self)
    }

    /// Use the in-memory service
    #[must_use]
    pub fn with_in_memory_service(mut self) -> Self {
        self.backend = ServiceBackend::InMemory;
        self
    }

    /// Override the per-request timeout
    #[must_use]
    pub const fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Build the configured service
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Request`] if the HTTP client cannot be built.
    pub fn build_service(&self) -> Result<Arc<dyn TodoService>, ServiceError> {
        match &self.backend {
            ServiceBackend::Http { base_url } => {
                tracing::info!(%base_url, timeout = ?self.request_timeout, "Using HTTP todo service");
                Ok(Arc::new(HttpTodoService::with_timeout(
                    base_url.as_str(),
                    self.request_timeout,
                )?))
            },
            ServiceBackend::InMemory => {
                tracing::info!("Using in-memory todo service");
                Ok(Arc::new(InMemoryTodoService::new()))
            },
        }
    }
}
