//! Ride synchronization client library.
//!
//! The crate holds the client-side source of truth for ride state: a store
//! that merges REST-fetched snapshots with WebSocket push events, derives a
//! transient notification feed, and exposes status-transition operations to
//! the presentation layer. Modules follow the hexagonal layout: `domain`
//! owns the model, state machine, and ports; `outbound` holds the driven
//! reqwest adapter for the ride API; `inbound` holds the driving push-event
//! session.

pub mod config;
pub mod domain;
pub mod inbound;
pub mod outbound;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
