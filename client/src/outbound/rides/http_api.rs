//! Reqwest-backed ride API adapter.
//!
//! This adapter owns transport details only: endpoint construction, bearer
//! authentication, timeout and HTTP error mapping, and JSON decoding into
//! domain rides.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde::Serialize;
use tracing::warn;

use crate::domain::ports::{AccessTokens, RideApi, RideApiError};
use crate::domain::{Ride, RideId, RideStatus};

const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const DEFAULT_USER_AGENT: &str = "ride-client/0.1";

/// Transport settings for the ride API adapter.
pub struct RideHttpConfig {
    /// Base URL the `rides` endpoints hang off, typically ending in `/api`.
    pub base_url: Url,
    /// Whole-request timeout applied to every call.
    pub timeout: Duration,
    /// HTTP user-agent sent to the ride service.
    pub user_agent: String,
}

impl RideHttpConfig {
    /// Settings with the default timeout and user-agent.
    #[must_use]
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            timeout: DEFAULT_REQUEST_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

/// Ride API adapter that performs HTTP requests against one base URL.
pub struct RideHttpApi<T> {
    client: Client,
    base_url: Url,
    tokens: Arc<T>,
}

impl<T: AccessTokens> RideHttpApi<T> {
    /// Build an adapter using a reqwest client with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(config: RideHttpConfig, tokens: Arc<T>) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent)
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url,
            tokens,
        })
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, RideApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| RideApiError::transport("ride api base URL cannot carry path segments"))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn authorise(&self, request: RequestBuilder) -> RequestBuilder {
        match self.tokens.bearer_token().await {
            Ok(Some(token)) => request.bearer_auth(token),
            Ok(None) => request,
            Err(error) => {
                warn!(%error, "access token unavailable, sending anonymous request");
                request
            }
        }
    }

    async fn send(&self, request: RequestBuilder) -> Result<reqwest::Response, RideApiError> {
        let response = self
            .authorise(request)
            .await
            .send()
            .await
            .map_err(map_transport_error)?;
        let status = response.status();
        if !status.is_success() {
            let body = response.bytes().await.unwrap_or_default();
            return Err(map_status_error(status, body.as_ref()));
        }
        Ok(response)
    }
}

#[derive(Serialize)]
struct StatusUpdateBody {
    status: RideStatus,
}

#[async_trait]
impl<T: AccessTokens> RideApi for RideHttpApi<T> {
    async fn list_available(&self) -> Result<Vec<Ride>, RideApiError> {
        let url = self.endpoint(&["rides", "available"])?;
        let response = self.send(self.client.get(url)).await?;
        decode_json(response).await
    }

    async fn accept(&self, ride_id: &RideId) -> Result<(), RideApiError> {
        let url = self.endpoint(&["rides", ride_id.as_str(), "accept"])?;
        self.send(self.client.post(url)).await?;
        Ok(())
    }

    async fn update_status(
        &self,
        ride_id: &RideId,
        status: RideStatus,
    ) -> Result<(), RideApiError> {
        let url = self.endpoint(&["rides", ride_id.as_str(), "status"])?;
        let request = self.client.put(url).json(&StatusUpdateBody { status });
        self.send(request).await?;
        Ok(())
    }

    async fn details(&self, ride_id: &RideId) -> Result<Ride, RideApiError> {
        let url = self.endpoint(&["rides", ride_id.as_str()])?;
        let response = self.send(self.client.get(url)).await?;
        decode_json(response).await
    }
}

async fn decode_json<D>(response: reqwest::Response) -> Result<D, RideApiError>
where
    D: serde::de::DeserializeOwned,
{
    let body = response.bytes().await.map_err(map_transport_error)?;
    serde_json::from_slice(body.as_ref())
        .map_err(|error| RideApiError::decode(format!("invalid ride payload: {error}")))
}

fn map_transport_error(error: reqwest::Error) -> RideApiError {
    RideApiError::transport(error.to_string())
}

fn map_status_error(status: StatusCode, body: &[u8]) -> RideApiError {
    let preview = body_preview(body);
    let message = if preview.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("unexpected status")
            .to_owned()
    } else {
        preview
    };
    RideApiError::status(status.as_u16(), message)
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
