//! Driving adapters feeding the domain.

pub mod push;
