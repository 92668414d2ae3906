//! Domain-level error types.
//!
//! These errors are transport agnostic: the store returns them for rejected
//! mutations (illegal status transitions) and detail lookups, and screens
//! map them to whatever surface they render. Network failures inside store
//! operations are *not* reported through this type; they degrade to
//! notifications so a failed button press never blocks the rest of the UI.

use serde::Serialize;

use crate::domain::ride::{RideId, RideStatus};

/// Stable machine-readable error code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The request is malformed or fails validation.
    InvalidRequest,
    /// The requested status change is not legal from the ride's current status.
    InvalidTransition,
    /// The requested resource does not exist.
    NotFound,
    /// The ride service reported or caused a failure.
    Upstream,
    /// An unexpected error occurred inside the domain.
    InternalError,
}

/// Domain error payload carrying a stable code and a display message.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Error {
    code: ErrorCode,
    message: String,
}

impl Error {
    /// Create a new error with the given code and message.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Stable machine-readable error code.
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Convenience constructor for [`ErrorCode::InvalidRequest`].
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// Convenience constructor for [`ErrorCode::InvalidTransition`].
    #[must_use]
    pub fn invalid_transition(ride_id: &RideId, from: RideStatus, to: RideStatus) -> Self {
        Self::new(
            ErrorCode::InvalidTransition,
            format!("ride {ride_id} cannot transition from {from} to {to}"),
        )
    }

    /// Convenience constructor for [`ErrorCode::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Convenience constructor for [`ErrorCode::Upstream`].
    pub fn upstream(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Upstream, message)
    }

    /// Convenience constructor for [`ErrorCode::InternalError`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}
