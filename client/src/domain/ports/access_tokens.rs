//! Port for the persisted authentication token source.
//!
//! Token storage (keychain, encrypted preferences) is an external
//! collaborator; the REST adapter only needs the current bearer token, if
//! any, at request time.

use async_trait::async_trait;
use thiserror::Error;

/// Errors surfaced by token storage adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessTokenError {
    /// The backing store could not be read.
    #[error("token storage failed: {message}")]
    Storage {
        /// Adapter-supplied failure description.
        message: String,
    },
}

impl AccessTokenError {
    /// Helper for storage read failures.
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }
}

/// Port supplying the current bearer token for outbound requests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccessTokens: Send + Sync {
    /// Read the current bearer token; `None` means unauthenticated.
    async fn bearer_token(&self) -> Result<Option<String>, AccessTokenError>;
}

/// Fixture implementation for tests that run unauthenticated.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureAccessTokens;

#[async_trait]
impl AccessTokens for FixtureAccessTokens {
    async fn bearer_token(&self) -> Result<Option<String>, AccessTokenError> {
        Ok(None)
    }
}
