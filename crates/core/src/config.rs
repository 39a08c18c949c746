//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into the
//! store and services. Request handlers never read process-wide environment
//! variables, which keeps behaviour consistent across multi-threaded runtimes
//! and test harnesses.

use crate::{FrontDeskError, FrontDeskResult};

/// Database URL used when `DATABASE_URL` is not set.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://hospital.db";

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    database_url: String,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    pub fn new(database_url: String) -> FrontDeskResult<Self> {
        if database_url.trim().is_empty() {
            return Err(FrontDeskError::InvalidInput(
                "database_url cannot be empty".into(),
            ));
        }

        Ok(Self { database_url })
    }

    pub fn database_url(&self) -> &str {
        &self.database_url
    }
}

/// Resolve the database URL from an optional environment value.
///
/// If `value` is `None` or empty/whitespace, returns [`DEFAULT_DATABASE_URL`].
pub fn database_url_from_env_value(value: Option<String>) -> String {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string())
}
