//! Port for the ride REST collaborator.
//!
//! The store consumes these four calls as opaque network operations; the
//! adapter owns its own timeout and authentication. Ride matching, fare
//! calculation, and dispatch all live server-side behind this boundary.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::ride::{Ride, RideId, RideStatus};

/// Errors surfaced by ride API adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RideApiError {
    /// Connection, DNS, or timeout failure before a response arrived.
    #[error("ride api transport failure: {message}")]
    Transport {
        /// Adapter-supplied failure description.
        message: String,
    },
    /// The server answered with a non-success status.
    #[error("ride api returned status {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Trimmed response body or status reason.
        message: String,
    },
    /// The response body could not be decoded into the domain model.
    #[error("ride api response could not be decoded: {message}")]
    Decode {
        /// Decoder failure description.
        message: String,
    },
}

impl RideApiError {
    /// Helper for transport-level failures.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Helper for non-success HTTP statuses.
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self::Status {
            status,
            message: message.into(),
        }
    }

    /// Helper for decode failures.
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }
}

/// Port for the ride service's REST surface.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RideApi: Send + Sync {
    /// Fetch the full snapshot of rides visible to this client.
    async fn list_available(&self) -> Result<Vec<Ride>, RideApiError>;

    /// Accept a ride on behalf of the current driver.
    async fn accept(&self, ride_id: &RideId) -> Result<(), RideApiError>;

    /// Ask the server to move a ride to `status`.
    async fn update_status(&self, ride_id: &RideId, status: RideStatus)
    -> Result<(), RideApiError>;

    /// Fetch a single ride snapshot for detail views.
    async fn details(&self, ride_id: &RideId) -> Result<Ride, RideApiError>;
}

/// Fixture implementation for tests that do not exercise the network.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureRideApi;

#[async_trait]
impl RideApi for FixtureRideApi {
    async fn list_available(&self) -> Result<Vec<Ride>, RideApiError> {
        Ok(Vec::new())
    }

    async fn accept(&self, _ride_id: &RideId) -> Result<(), RideApiError> {
        Ok(())
    }

    async fn update_status(
        &self,
        _ride_id: &RideId,
        _status: RideStatus,
    ) -> Result<(), RideApiError> {
        Ok(())
    }

    async fn details(&self, ride_id: &RideId) -> Result<Ride, RideApiError> {
        Err(RideApiError::status(404, format!("no ride {ride_id}")))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::rstest;

    use super::*;

    #[rstest]
    fn fixture_returns_empty_snapshot() {
        let api = FixtureRideApi;
        tokio::runtime::Builder::new_current_thread()
            .build()
            .expect("runtime builds")
            .block_on(async {
                let rides = api.list_available().await.expect("fixture succeeds");
                assert!(rides.is_empty());
            });
    }

    #[rstest]
    fn error_helpers_preserve_fields() {
        let error = RideApiError::status(503, "service unavailable");
        assert_eq!(
            error,
            RideApiError::Status {
                status: 503,
                message: "service unavailable".to_owned(),
            }
        );
        assert!(error.to_string().contains("503"));
    }
}
