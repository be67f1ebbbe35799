//! Connection configuration for the remote content store
//!
//! Two parameters are required before any remote call: the integration API
//! key and the id of the journal database. Callers validate up front and
//! short-circuit to an empty result instead of raising.

use thiserror::Error;

/// Environment variable holding the integration API key
pub const API_KEY_ENV: &str = "NOTION_API_KEY";

/// Environment variable holding the journal database id
pub const DATABASE_ID_ENV: &str = "NOTION_DATABASE_ID";

/// Missing connection parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("NOTION_API_KEY is not configured")]
    MissingApiKey,

    #[error("NOTION_DATABASE_ID is not configured")]
    MissingDatabaseId,
}

/// Content store connection parameters
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub api_key: String,
    pub database_id: String,
}

impl StoreConfig {
    pub fn new(api_key: impl Into<String>, database_id: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            database_id: database_id.into(),
        }
    }

    /// Read both parameters from the process environment.
    ///
    /// Absent variables become empty strings; `validate` reports them.
    pub fn from_env() -> Self {
        Self {
            api_key: std::env::var(API_KEY_ENV).unwrap_or_default(),
            database_id: std::env::var(DATABASE_ID_ENV).unwrap_or_default(),
        }
    }

    /// Check both required parameters are present.
    ///
    /// Blank or whitespace-only values count as missing.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_key.trim().is_empty() {
            return Err(ConfigError::MissingApiKey);
        }
        if self.database_id.trim().is_empty() {
            return Err(ConfigError::MissingDatabaseId);
        }
        Ok(())
    }
}
