//! Wire-level message definitions for the push-event adapter.
//!
//! The server frames every push as a JSON envelope `{"event": ..., "data":
//! ...}`. Ride payloads share the REST wire shape, so they deserialize
//! straight into the domain [`Ride`]. The canonical field for the
//! status-update payload is `rideId`; the `id` spelling seen at some legacy
//! call sites is accepted as an alias.

use serde::Deserialize;
use serde_json::Value;

use crate::domain::ride::{Ride, RideId, RideStatus};

/// A decoded push envelope.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum PushMessage {
    /// A new ride request with the full ride payload.
    RideRequest(Ride),
    /// An existing ride changed status server-side.
    RideStatusUpdate(RideStatusUpdatePayload),
    /// Driver position telemetry; not consumed by the ride store.
    DriverLocationUpdate(Value),
    /// Hazard-zone telemetry; not consumed by the ride store.
    HazardZoneUpdate(Value),
}

/// Payload of a `ride-status-update` event.
#[derive(Debug, Clone, Deserialize)]
pub struct RideStatusUpdatePayload {
    /// Identifier of the affected ride.
    #[serde(rename = "rideId", alias = "id")]
    pub ride_id: RideId,
    /// The ride's new status.
    pub status: RideStatus,
}
