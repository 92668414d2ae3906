//! Test utilities for the client crate.
//!
//! Shared helpers for unit tests (in `src/`) and integration tests (in
//! `tests/`). Compiled only for tests or when the `test-support` feature is
//! enabled.

use std::sync::Mutex;
use std::time::Duration;

use chrono::{DateTime, Local, TimeDelta, Utc};
use mockable::Clock;

use crate::domain::ride::{GeoPoint, Location, Ride, RideId, RideStatus};

/// A manually advanced clock for simulated-time tests.
pub struct MutableClock(Mutex<DateTime<Utc>>);

impl MutableClock {
    /// Create a clock frozen at `now`.
    #[must_use]
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    /// Advance the clock by `delta`.
    pub fn advance(&self, delta: Duration) {
        let delta = match TimeDelta::from_std(delta) {
            Ok(delta) => delta,
            Err(error) => {
                panic!("failed to convert Duration to TimeDelta: {error}; delta={delta:?}")
            }
        };
        *self.lock_clock() += delta;
    }

    /// Advance the clock by whole milliseconds.
    pub fn advance_millis(&self, millis: i64) {
        *self.lock_clock() += TimeDelta::milliseconds(millis);
    }

    fn lock_clock(&self) -> std::sync::MutexGuard<'_, DateTime<Utc>> {
        match self.0.lock() {
            Ok(guard) => guard,
            Err(_) => panic!("clock mutex"),
        }
    }
}

impl Clock for MutableClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.lock_clock()
    }
}

/// An arbitrary fixed instant for deterministic timestamps.
#[must_use]
pub fn anchor_instant() -> DateTime<Utc> {
    match DateTime::from_timestamp(1_700_000_000, 0) {
        Some(instant) => instant,
        None => panic!("static timestamp is valid"),
    }
}

/// Build a ride fixture with the given id and status.
#[must_use]
pub fn ride_fixture(id: &str, status: RideStatus) -> Ride {
    let ride_id = match RideId::new(id) {
        Ok(ride_id) => ride_id,
        Err(error) => panic!("fixture ride id must be valid: {error}"),
    };
    Ride {
        id: ride_id,
        status,
        driver: "driver-1".to_owned(),
        passenger: "passenger-1".to_owned(),
        fare: "12.50".to_owned(),
        eta: "5 min".to_owned(),
        pickup: Location {
            address: "1 Castle St".to_owned(),
            coordinates: GeoPoint {
                latitude: 53.3498,
                longitude: -6.2603,
            },
        },
        dropoff: Location {
            address: "2 Dame St".to_owned(),
            coordinates: GeoPoint {
                latitude: 53.3441,
                longitude: -6.2675,
            },
        },
    }
}
