//! Domain ports defining the edges of the hexagon.
//!
//! Ports describe how the domain expects to interact with driven adapters
//! (the ride REST service, the persisted token store). Each trait exposes
//! strongly typed errors so adapters map their failures into predictable
//! variants instead of returning `anyhow::Result`.

mod access_tokens;
mod ride_api;

pub use access_tokens::{AccessTokenError, AccessTokens, FixtureAccessTokens};
#[cfg(test)]
pub use access_tokens::MockAccessTokens;
pub use ride_api::{FixtureRideApi, RideApi, RideApiError};
#[cfg(test)]
pub use ride_api::MockRideApi;
