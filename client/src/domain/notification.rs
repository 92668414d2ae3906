//! Transient user-facing notification records.
//!
//! Notifications are UI artifacts, not domain records: they reference rides
//! only through their message text and self-expire a fixed interval after
//! creation. The store owns their lifecycle; see
//! [`RideStore`](crate::domain::RideStore) for the sweep that removes
//! expired entries.

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use serde::Serialize;

/// Display lifetime of every notification.
pub const NOTIFICATION_TTL: Duration = Duration::from_millis(5000);

/// Process-monotonic notification identifier.
///
/// The original client derived ids from the creation timestamp, which
/// collides for notifications created within the same millisecond; a
/// sequence keeps uniqueness without losing the creation time, which is
/// still recorded on the notification itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct NotificationId(pub(crate) u64);

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Category of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum NotificationKind {
    /// A new ride request arrived.
    RideRequest,
    /// A ride changed status.
    StatusUpdate,
    /// An operation or the transport failed.
    Error,
}

/// An ephemeral user-facing event record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    /// Unique identifier within the process.
    pub id: NotificationId,
    /// Human-readable message shown to the user.
    pub message: String,
    /// Notification category.
    pub kind: NotificationKind,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Instant after which the notification is removed from the feed.
    pub expires_at: DateTime<Utc>,
}

impl Notification {
    /// Build a notification expiring [`NOTIFICATION_TTL`] after `created_at`.
    #[must_use]
    pub fn new(
        id: NotificationId,
        kind: NotificationKind,
        message: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        let ttl = TimeDelta::milliseconds(NOTIFICATION_TTL.as_millis() as i64);
        Self {
            id,
            message: message.into(),
            kind,
            created_at,
            expires_at: created_at + ttl,
        }
    }

    /// Whether the display window has elapsed at `now`.
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for the notification display window.

    use chrono::TimeDelta;
    use rstest::rstest;

    use super::*;

    fn anchor() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).expect("static timestamp is valid")
    }

    #[rstest]
    fn expires_exactly_at_ttl() {
        let created = anchor();
        let notification = Notification::new(
            NotificationId(1),
            NotificationKind::StatusUpdate,
            "Ride ride-1 accepted successfully",
            created,
        );

        assert!(!notification.is_expired(created));
        assert!(!notification.is_expired(created + TimeDelta::milliseconds(4999)));
        assert!(notification.is_expired(created + TimeDelta::milliseconds(5000)));
        assert!(notification.is_expired(created + TimeDelta::milliseconds(9000)));
    }

    #[rstest]
    fn kind_serialises_kebab_case() {
        let json = serde_json::to_value(NotificationKind::RideRequest).expect("kind serialises");
        assert_eq!(json, serde_json::json!("ride-request"));
    }
}
