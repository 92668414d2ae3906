//! Ride API outbound adapters.
//!
//! This module provides a thin HTTP implementation of the `RideApi` port.

mod http_api;

pub use http_api::{RideHttpApi, RideHttpConfig};
