//! Push-event inbound adapter.
//!
//! Responsibilities:
//! - connect the WebSocket transport (`awc`) to the ride service
//! - decode wire envelopes into domain push events
//! - keep WebSocket-specific concerns at the edge of the system
//!
//! The transport's own reconnection policy governs reconnects; the store
//! simply resumes receiving events once a fresh session is running.

use actix_codec::Framed;
use awc::BoxedSocket;
use awc::ws::Codec;
use thiserror::Error;
use tracing::debug;
use url::Url;

mod session;

pub mod messages;

pub use session::{PushSession, TelemetryUpdate};

/// Framed WebSocket stream over the boxed awc transport.
pub type PushSocket = Framed<BoxedSocket, Codec>;

/// Errors raised while establishing the push channel.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PushConnectError {
    /// The WebSocket handshake failed.
    #[error("push channel handshake failed: {message}")]
    Handshake {
        /// Transport-supplied failure description.
        message: String,
    },
}

impl PushConnectError {
    /// Helper for handshake failures.
    pub fn handshake(message: impl Into<String>) -> Self {
        Self::Handshake {
            message: message.into(),
        }
    }
}

/// Open the push channel against `ws_url`.
///
/// # Errors
///
/// Returns [`PushConnectError::Handshake`] when the upgrade fails.
pub async fn connect(ws_url: &Url) -> Result<PushSocket, PushConnectError> {
    let (response, socket) = awc::Client::new()
        .ws(ws_url.as_str())
        .connect()
        .await
        .map_err(|error| PushConnectError::handshake(error.to_string()))?;
    debug!(status = %response.status(), "push channel connected");
    Ok(socket)
}
