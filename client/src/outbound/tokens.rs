//! Access token adapters.

use async_trait::async_trait;

use crate::domain::ports::{AccessTokenError, AccessTokens};

/// Token source holding one optional bearer token for the process lifetime.
///
/// Suits CLI and test wiring; an interactive client would swap in an adapter
/// backed by its session storage.
#[derive(Debug, Default, Clone)]
pub struct StaticAccessTokens {
    token: Option<String>,
}

impl StaticAccessTokens {
    /// Source that always authenticates with `token`.
    #[must_use]
    pub fn bearer(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
        }
    }

    /// Source that never attaches a token.
    #[must_use]
    pub fn anonymous() -> Self {
        Self { token: None }
    }
}

#[async_trait]
impl AccessTokens for StaticAccessTokens {
    async fn bearer_token(&self) -> Result<Option<String>, AccessTokenError> {
        Ok(self.token.clone())
    }
}
