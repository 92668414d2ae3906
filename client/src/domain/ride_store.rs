//! Ride synchronization store.
//!
//! Single source of truth for ride state visible to the UI layer. The store
//! reconciles pull (REST snapshot) and push (socket event) sources, owns
//! notification emission and expiry, and publishes a fresh [`RideSnapshot`]
//! through a watch channel after every mutation.
//!
//! Collaborators are injected at construction: the [`RideApi`] port for REST
//! calls and a [`Clock`] for notification timestamps. Network failures never
//! escape a store operation — they degrade to an [`Error`]-kind notification
//! (plus a sticky error string for snapshot fetches) so one failed call
//! cannot wedge the rest of the UI.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use mockable::Clock;
use tokio::sync::watch;
use tokio::time;
use tracing::{debug, warn};

use crate::domain::error::Error;
use crate::domain::events::PushEvent;
use crate::domain::notification::{Notification, NotificationId, NotificationKind};
use crate::domain::ports::{RideApi, RideApiError};
use crate::domain::ride::{Ride, RideId, RideStatus};

/// Cadence of the notification expiry sweep (shorter in tests).
#[cfg(not(test))]
const SWEEP_INTERVAL: Duration = Duration::from_millis(500);
#[cfg(test)]
const SWEEP_INTERVAL: Duration = Duration::from_millis(10);

/// Immutable view of store state handed to subscribers.
///
/// Rides keep arrival/fetch order; the UI surfaces the first entry as the
/// current ride in the simplified model.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RideSnapshot {
    /// All known rides, unique by id, in insertion order.
    pub rides: Vec<Ride>,
    /// Live (unexpired, uncleared) notifications.
    pub notifications: Vec<Notification>,
    /// Whether a snapshot fetch is in flight.
    pub loading: bool,
    /// Sticky error from the most recent failed snapshot fetch.
    pub error: Option<String>,
}

#[derive(Debug, Default)]
struct StoreState {
    rides: Vec<Ride>,
    notifications: Vec<Notification>,
    loading: bool,
    error: Option<String>,
    // Generation of the most recently issued fetch; responses from older
    // generations are discarded so a stale snapshot cannot clobber
    // push-driven state that arrived after a newer fetch resolved.
    issued_fetches: u64,
    next_notification_id: u64,
}

/// The ride synchronization core.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use client::domain::ports::FixtureRideApi;
/// use client::domain::RideStore;
/// use mockable::DefaultClock;
///
/// let store = RideStore::new(Arc::new(FixtureRideApi), Arc::new(DefaultClock));
/// assert!(store.snapshot().rides.is_empty());
/// ```
pub struct RideStore<A> {
    api: Arc<A>,
    clock: Arc<dyn Clock>,
    state: Mutex<StoreState>,
    snapshot_tx: watch::Sender<RideSnapshot>,
}

impl<A> RideStore<A> {
    /// Create a store over the given REST port and clock.
    pub fn new(api: Arc<A>, clock: Arc<dyn Clock>) -> Self {
        let (snapshot_tx, _initial_rx) = watch::channel(RideSnapshot::default());
        Self {
            api,
            clock,
            state: Mutex::new(StoreState::default()),
            snapshot_tx,
        }
    }

    /// Subscribe to snapshot updates.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<RideSnapshot> {
        self.snapshot_tx.subscribe()
    }

    /// Read the current snapshot.
    #[must_use]
    pub fn snapshot(&self) -> RideSnapshot {
        self.snapshot_tx.borrow().clone()
    }

    /// Apply a push-delivered event.
    ///
    /// Notification emission is unconditional; the ride mutation is
    /// conditional on the ride being known (a status update for an unknown
    /// ride is silently dropped). A duplicate ride request replaces the
    /// existing entry rather than appending a second one, since
    /// at-least-once transports make duplicate delivery routine.
    pub fn apply_event(&self, event: PushEvent) {
        let mut state = self.lock_state();
        match event {
            PushEvent::RideRequested(ride) => {
                let message = format!("New ride request: {}", ride.id);
                Self::upsert(&mut state.rides, ride);
                self.push_notification(&mut state, NotificationKind::RideRequest, message);
            }
            PushEvent::RideStatusChanged { ride_id, status } => {
                if !Self::set_status(&mut state.rides, &ride_id, status) {
                    debug!(ride = %ride_id, "status update for unknown ride dropped");
                }
                let message = format!("Ride {ride_id} status updated to: {status}");
                self.push_notification(&mut state, NotificationKind::StatusUpdate, message);
            }
            PushEvent::Disconnected => {
                self.push_notification(
                    &mut state,
                    NotificationKind::Error,
                    "Ride service connection lost",
                );
            }
        }
        self.publish(&state);
    }

    /// Remove every notification whose display window has elapsed.
    pub fn sweep_expired_notifications(&self) {
        let now = self.clock.utc();
        let mut state = self.lock_state();
        let live_before = state.notifications.len();
        state.notifications.retain(|n| !n.is_expired(now));
        if state.notifications.len() != live_before {
            self.publish(&state);
        }
    }

    /// Drop all live notifications at once.
    pub fn clear_notifications(&self) {
        let mut state = self.lock_state();
        state.notifications.clear();
        self.publish(&state);
    }

    /// Run the periodic expiry sweep until the store is dropped.
    ///
    /// A single sweep task replaces the original design's per-notification
    /// timers, which proliferate under high notification volume.
    pub async fn run_notification_sweeper(&self) {
        let mut sweep = time::interval(SWEEP_INTERVAL);
        loop {
            sweep.tick().await;
            self.sweep_expired_notifications();
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, StoreState> {
        // Mutations never panic while holding the lock, but a poisoned
        // state is still preferable to wedging every screen.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self, state: &StoreState) {
        self.snapshot_tx.send_replace(RideSnapshot {
            rides: state.rides.clone(),
            notifications: state.notifications.clone(),
            loading: state.loading,
            error: state.error.clone(),
        });
    }

    fn push_notification(
        &self,
        state: &mut StoreState,
        kind: NotificationKind,
        message: impl Into<String>,
    ) {
        state.next_notification_id += 1;
        let notification = Notification::new(
            NotificationId(state.next_notification_id),
            kind,
            message,
            self.clock.utc(),
        );
        state.notifications.push(notification);
    }

    fn upsert(rides: &mut Vec<Ride>, ride: Ride) {
        if let Some(existing) = rides.iter_mut().find(|r| r.id == ride.id) {
            *existing = ride;
        } else {
            rides.push(ride);
        }
    }

    fn set_status(rides: &mut [Ride], ride_id: &RideId, status: RideStatus) -> bool {
        if let Some(ride) = rides.iter_mut().find(|r| r.id == *ride_id) {
            ride.status = status;
            true
        } else {
            false
        }
    }

    fn dedup_snapshot(snapshot: Vec<Ride>) -> Vec<Ride> {
        let mut rides = Vec::with_capacity(snapshot.len());
        for ride in snapshot {
            Self::upsert(&mut rides, ride);
        }
        rides
    }

    fn require_legal_transition(&self, ride_id: &RideId, next: RideStatus) -> Result<(), Error> {
        let state = self.lock_state();
        // Unknown rides still go to the server: the collection may simply
        // not have materialized the ride yet.
        let Some(current) = state
            .rides
            .iter()
            .find(|r| r.id == *ride_id)
            .map(|r| r.status)
        else {
            return Ok(());
        };
        if current.can_transition_to(next) {
            Ok(())
        } else {
            Err(Error::invalid_transition(ride_id, current, next))
        }
    }
}

impl<A> RideStore<A>
where
    A: RideApi,
{
    /// Replace the local collection with a fresh server snapshot.
    ///
    /// The snapshot is authoritative: on success the whole collection is
    /// replaced verbatim rather than merged. A response belonging to a
    /// superseded fetch is discarded. On failure the collection is left
    /// untouched, the sticky error string is set, and an error
    /// notification is emitted.
    pub async fn fetch_rides(&self) {
        let generation = {
            let mut state = self.lock_state();
            state.loading = true;
            state.issued_fetches += 1;
            self.publish(&state);
            state.issued_fetches
        };

        let result = self.api.list_available().await;

        let mut state = self.lock_state();
        if generation != state.issued_fetches {
            debug!(
                generation,
                newest = state.issued_fetches,
                "discarding superseded ride fetch"
            );
            return;
        }
        state.loading = false;
        match result {
            Ok(snapshot) => {
                state.rides = Self::dedup_snapshot(snapshot);
                state.error = None;
            }
            Err(error) => {
                warn!(error = %error, "ride snapshot fetch failed");
                state.error = Some("Failed to fetch rides".to_owned());
                self.push_notification(
                    &mut state,
                    NotificationKind::Error,
                    "Failed to fetch available rides",
                );
            }
        }
        self.publish(&state);
    }

    /// Accept a ride on behalf of the current driver.
    ///
    /// Rejects transitions the state machine forbids before any network
    /// call is made. REST failures do not propagate: they surface as a
    /// single error notification and leave local state untouched.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorCode::InvalidTransition`](crate::domain::ErrorCode)
    /// when the ride is known and not in an open status.
    pub async fn accept_ride(&self, ride_id: &RideId) -> Result<(), Error> {
        self.require_legal_transition(ride_id, RideStatus::Accepted)?;
        match self.api.accept(ride_id).await {
            Ok(()) => {
                let mut state = self.lock_state();
                Self::set_status(&mut state.rides, ride_id, RideStatus::Accepted);
                let message = format!("Ride {ride_id} accepted successfully");
                self.push_notification(&mut state, NotificationKind::StatusUpdate, message);
                self.publish(&state);
            }
            Err(error) => {
                warn!(error = %error, ride = %ride_id, "ride accept failed");
                let mut state = self.lock_state();
                self.push_notification(&mut state, NotificationKind::Error, "Failed to accept ride");
                self.publish(&state);
            }
        }
        Ok(())
    }

    /// Ask the server to move a ride to `status` and mirror the change
    /// locally on success.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorCode::InvalidTransition`](crate::domain::ErrorCode)
    /// when the ride is known and the requested transition is illegal.
    pub async fn update_ride_status(
        &self,
        ride_id: &RideId,
        status: RideStatus,
    ) -> Result<(), Error> {
        self.require_legal_transition(ride_id, status)?;
        match self.api.update_status(ride_id, status).await {
            Ok(()) => {
                let mut state = self.lock_state();
                Self::set_status(&mut state.rides, ride_id, status);
                let message = format!("Ride {ride_id} status updated to {status}");
                self.push_notification(&mut state, NotificationKind::StatusUpdate, message);
                self.publish(&state);
            }
            Err(error) => {
                warn!(error = %error, ride = %ride_id, "ride status update failed");
                let mut state = self.lock_state();
                self.push_notification(
                    &mut state,
                    NotificationKind::Error,
                    "Failed to update ride status",
                );
                self.publish(&state);
            }
        }
        Ok(())
    }

    /// Fetch a single ride snapshot for detail views.
    ///
    /// # Errors
    ///
    /// Maps a 404 to [`ErrorCode::NotFound`](crate::domain::ErrorCode) and
    /// every other adapter failure to `Upstream`.
    pub async fn ride_details(&self, ride_id: &RideId) -> Result<Ride, Error> {
        self.api.details(ride_id).await.map_err(|error| match error {
            RideApiError::Status { status: 404, .. } => {
                Error::not_found(format!("ride {ride_id} not found"))
            }
            other => Error::upstream(other.to_string()),
        })
    }
}

#[cfg(test)]
#[path = "ride_store_tests.rs"]
mod tests;
