//! Ride data model and status state machine.
//!
//! Rides are materialized client-side from REST snapshots or push events and
//! mutated in place by status updates. They are never deleted; cancelled
//! rides stay in the collection with status [`RideStatus::Cancelled`].

use std::fmt;

use serde::{Deserialize, Serialize};

/// Validation errors returned when constructing a [`RideId`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RideValidationError {
    /// Identifier is empty.
    EmptyId,
    /// Identifier carries leading or trailing whitespace.
    PaddedId,
}

impl fmt::Display for RideValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "ride id must not be empty"),
            Self::PaddedId => write!(f, "ride id must not contain surrounding whitespace"),
        }
    }
}

impl std::error::Error for RideValidationError {}

/// Server-assigned ride identifier, stable for the ride's lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RideId(String);

impl RideId {
    /// Validate and construct a [`RideId`] from borrowed input.
    pub fn new(id: impl Into<String>) -> Result<Self, RideValidationError> {
        let id = id.into();
        if id.is_empty() {
            return Err(RideValidationError::EmptyId);
        }
        if id.trim() != id {
            return Err(RideValidationError::PaddedId);
        }
        Ok(Self(id))
    }

    /// Borrow the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl TryFrom<String> for RideId {
    type Error = RideValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<RideId> for String {
    fn from(value: RideId) -> Self {
        value.0
    }
}

impl AsRef<str> for RideId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for RideId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ride lifecycle status.
///
/// The legal transitions are:
///
/// - open (`Requested`/`Pending`/`Available`) → `Accepted` or `Cancelled`
/// - `Accepted` → `InProgress`
/// - `InProgress` → `Completed`
///
/// `Completed` and `Cancelled` are terminal. The store validates mutation
/// requests against this table; push-delivered statuses are applied as-is
/// because the server is authoritative for its own transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RideStatus {
    /// Passenger submitted the ride order.
    Requested,
    /// Order is awaiting driver assignment.
    Pending,
    /// Order is visible to drivers.
    Available,
    /// A driver accepted the order.
    Accepted,
    /// The trip is underway.
    InProgress,
    /// The trip finished.
    Completed,
    /// The order was cancelled before the trip started.
    Cancelled,
}

impl RideStatus {
    /// Whether the ride is still awaiting a driver.
    #[must_use]
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Requested | Self::Pending | Self::Available)
    }

    /// Whether no further transition is legal.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    /// Whether `next` is a legal successor of this status.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        match next {
            Self::Accepted | Self::Cancelled => self.is_open(),
            Self::InProgress => matches!(self, Self::Accepted),
            Self::Completed => matches!(self, Self::InProgress),
            Self::Requested | Self::Pending | Self::Available => false,
        }
    }

    /// Wire spelling of the status, shared with notification messages.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Requested => "requested",
            Self::Pending => "pending",
            Self::Available => "available",
            Self::Accepted => "accepted",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for RideStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Geographic coordinates of a pickup or dropoff point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Longitude in decimal degrees.
    pub longitude: f64,
}

/// A pickup or dropoff location as the server describes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Human-readable address.
    pub address: String,
    /// Map coordinates for the address.
    pub coordinates: GeoPoint,
}

/// A single passenger transport order tracked through its status lifecycle.
///
/// Serialisation matches the server's wire shape; the same payload arrives
/// through the REST snapshot endpoints and the `ride-request` push event.
/// `fare` and `eta` are display strings on the wire and the store performs
/// no arithmetic on them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ride {
    /// Unique ride identifier.
    pub id: RideId,
    /// Current lifecycle status.
    pub status: RideStatus,
    /// Assigned driver identifier.
    pub driver: String,
    /// Passenger identifier.
    pub passenger: String,
    /// Fare in display currency units.
    pub fare: String,
    /// Estimated time of arrival, as a display string.
    pub eta: String,
    /// Pickup location.
    pub pickup: Location,
    /// Dropoff location.
    pub dropoff: Location,
}

#[cfg(test)]
mod tests {
    //! Regression coverage for ride identifiers and the status table.

    use rstest::rstest;
    use rstest_bdd_macros::{given, then, when};

    use super::*;

    #[rstest]
    #[case("")]
    #[case(" ride-1")]
    #[case("ride-1 ")]
    fn ride_id_rejects_blank_or_padded(#[case] value: &str) {
        let error = RideId::new(value).expect_err("invalid id rejected");
        let expected = if value.is_empty() {
            RideValidationError::EmptyId
        } else {
            RideValidationError::PaddedId
        };
        assert_eq!(error, expected);
    }

    #[rstest]
    fn ride_id_accepts_clean_input() {
        let id = RideId::new("ride-42").expect("valid id");
        assert_eq!(id.as_str(), "ride-42");
        assert_eq!(id.to_string(), "ride-42");
    }

    #[rstest]
    #[case(RideStatus::Requested, RideStatus::Accepted, true)]
    #[case(RideStatus::Pending, RideStatus::Accepted, true)]
    #[case(RideStatus::Available, RideStatus::Cancelled, true)]
    #[case(RideStatus::Pending, RideStatus::Cancelled, true)]
    #[case(RideStatus::Accepted, RideStatus::InProgress, true)]
    #[case(RideStatus::InProgress, RideStatus::Completed, true)]
    #[case(RideStatus::Accepted, RideStatus::Cancelled, false)]
    #[case(RideStatus::Completed, RideStatus::Accepted, false)]
    #[case(RideStatus::Cancelled, RideStatus::Accepted, false)]
    #[case(RideStatus::Requested, RideStatus::Completed, false)]
    #[case(RideStatus::InProgress, RideStatus::Accepted, false)]
    fn transition_table(
        #[case] from: RideStatus,
        #[case] to: RideStatus,
        #[case] allowed: bool,
    ) {
        assert_eq!(from.can_transition_to(to), allowed);
    }

    #[given("a ride in a terminal status")]
    fn a_ride_in_a_terminal_status() -> RideStatus {
        RideStatus::Completed
    }

    #[when("any successor status is proposed")]
    fn any_successor_status_is_proposed(status: RideStatus) -> Vec<(RideStatus, bool)> {
        [
            RideStatus::Accepted,
            RideStatus::InProgress,
            RideStatus::Completed,
            RideStatus::Cancelled,
        ]
        .into_iter()
        .map(|next| (next, status.can_transition_to(next)))
        .collect()
    }

    #[then("every transition is rejected")]
    fn every_transition_is_rejected(outcomes: Vec<(RideStatus, bool)>) {
        for (next, allowed) in outcomes {
            assert!(!allowed, "terminal status must not transition to {next}");
        }
    }

    #[rstest]
    fn terminal_statuses_have_no_successors() {
        let status = a_ride_in_a_terminal_status();
        let outcomes = any_successor_status_is_proposed(status);
        every_transition_is_rejected(outcomes);
    }

    #[rstest]
    fn status_serialises_snake_case() {
        let json = serde_json::to_value(RideStatus::InProgress).expect("status serialises");
        assert_eq!(json, serde_json::json!("in_progress"));
        let parsed: RideStatus =
            serde_json::from_value(serde_json::json!("cancelled")).expect("status parses");
        assert_eq!(parsed, RideStatus::Cancelled);
    }

    #[rstest]
    fn ride_round_trips_through_wire_shape() {
        let payload = serde_json::json!({
            "id": "ride-7",
            "status": "pending",
            "driver": "driver-2",
            "passenger": "passenger-9",
            "fare": "12.50",
            "eta": "5 min",
            "pickup": {
                "address": "1 Castle St",
                "coordinates": { "latitude": 53.3498, "longitude": -6.2603 }
            },
            "dropoff": {
                "address": "2 Dame St",
                "coordinates": { "latitude": 53.3441, "longitude": -6.2675 }
            }
        });
        let ride: Ride = serde_json::from_value(payload.clone()).expect("ride parses");
        assert_eq!(ride.id.as_str(), "ride-7");
        assert_eq!(ride.status, RideStatus::Pending);
        let back = serde_json::to_value(&ride).expect("ride serialises");
        assert_eq!(back, payload);
    }
}
