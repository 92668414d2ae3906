//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! Adapters are thin translators between the domain model and the ride
//! service's HTTP surface. They own transport details only: endpoint
//! construction, authentication headers, timeouts, and error mapping. They
//! contain no business logic.

pub mod rides;
pub mod tokens;
