//! Domain model and core services.
//!
//! Purpose: define the ride data model, its status state machine, the
//! transient notification feed, and the synchronization store that owns
//! both. Ports describing the REST collaborator and the token source live
//! under [`ports`]; adapters stay outside the domain.
//!
//! Public surface:
//! - `Ride`, `RideId`, `RideStatus` — ride aggregate and lifecycle.
//! - `Notification`, `NotificationKind` — transient user-facing records.
//! - `RideStore`, `RideSnapshot` — the synchronization core.
//! - `Error` / `ErrorCode` — domain error payloads.

pub mod error;
pub mod events;
pub mod notification;
pub mod ports;
pub mod ride;
pub mod ride_store;

pub use self::error::{Error, ErrorCode};
pub use self::events::PushEvent;
pub use self::notification::{Notification, NotificationId, NotificationKind, NOTIFICATION_TTL};
pub use self::ride::{GeoPoint, Location, Ride, RideId, RideStatus, RideValidationError};
pub use self::ride_store::{RideSnapshot, RideStore};
