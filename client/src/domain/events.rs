//! Push events consumed by the ride store.
//!
//! The inbound session decodes wire frames into these domain events; the
//! store applies them without caring which transport delivered them.
//! Driver-location and hazard-zone updates never reach the store — they are
//! routed to telemetry subscribers at the session edge.

use crate::domain::ride::{Ride, RideId, RideStatus};

/// A server-to-client message relevant to ride synchronization.
#[derive(Debug, Clone, PartialEq)]
pub enum PushEvent {
    /// A new ride request became available.
    RideRequested(Ride),
    /// An existing ride changed status server-side.
    RideStatusChanged {
        /// Identifier of the affected ride.
        ride_id: RideId,
        /// The ride's new status.
        status: RideStatus,
    },
    /// The push transport lost its connection.
    Disconnected,
}
