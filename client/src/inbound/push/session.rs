//! Push-event session pumping WebSocket frames into the ride store.
//!
//! Keeps WebSocket framing at the edge while deferring application
//! behaviour to the store. The session answers server pings, decodes text
//! frames into [`PushMessage`] envelopes, and reports transport loss to the
//! store exactly once when the stream ends for any reason. Reconnection is
//! the transport owner's concern; a fresh session is run over each new
//! socket.

use std::sync::Arc;

use awc::error::WsProtocolError as ProtocolError;
use awc::ws::{CloseReason, Frame, Message};
use futures_util::{Sink, SinkExt, Stream, StreamExt};
use tokio::sync::broadcast;
use tracing::{debug, warn};

use crate::domain::{PushEvent, RideStore};
use crate::inbound::push::messages::PushMessage;

/// Buffered telemetry updates per subscriber before lag kicks in.
const TELEMETRY_BUFFER: usize = 16;

/// Telemetry events delivered alongside ride pushes.
///
/// The ride store never consumes these; map and hazard overlays subscribe
/// through [`PushSession::subscribe_telemetry`].
#[derive(Debug, Clone, PartialEq)]
pub enum TelemetryUpdate {
    /// Raw `driver-location-update` payload.
    DriverLocation(serde_json::Value),
    /// Raw `hazard-zone-update` payload.
    HazardZone(serde_json::Value),
}

enum SessionEnd {
    StreamClosed,
    ServerClosed(Option<CloseReason>),
    Protocol(ProtocolError),
    Send(ProtocolError),
}

/// Per-connection push session bound to one store.
pub struct PushSession<A> {
    store: Arc<RideStore<A>>,
    telemetry: broadcast::Sender<TelemetryUpdate>,
}

impl<A> PushSession<A> {
    /// Create a session forwarding events into `store`.
    pub fn new(store: Arc<RideStore<A>>) -> Self {
        let (telemetry, _initial_rx) = broadcast::channel(TELEMETRY_BUFFER);
        Self { store, telemetry }
    }

    /// Subscribe to driver-location and hazard-zone telemetry.
    #[must_use]
    pub fn subscribe_telemetry(&self) -> broadcast::Receiver<TelemetryUpdate> {
        self.telemetry.subscribe()
    }

    /// Pump `socket` until it ends, then report the disconnect.
    pub async fn run<S>(&self, mut socket: S)
    where
        S: Stream<Item = Result<Frame, ProtocolError>>
            + Sink<Message, Error = ProtocolError>
            + Unpin,
    {
        let end = self.pump(&mut socket).await;
        self.log_session_end(&end);
        self.store.apply_event(PushEvent::Disconnected);
    }

    async fn pump<S>(&self, socket: &mut S) -> SessionEnd
    where
        S: Stream<Item = Result<Frame, ProtocolError>>
            + Sink<Message, Error = ProtocolError>
            + Unpin,
    {
        loop {
            let Some(frame) = socket.next().await else {
                return SessionEnd::StreamClosed;
            };
            match frame {
                Ok(Frame::Text(body)) => self.handle_text(&body),
                Ok(Frame::Ping(payload)) => {
                    if let Err(error) = socket.send(Message::Pong(payload)).await {
                        return SessionEnd::Send(error);
                    }
                }
                Ok(Frame::Pong(_) | Frame::Binary(_) | Frame::Continuation(_)) => {}
                Ok(Frame::Close(reason)) => return SessionEnd::ServerClosed(reason),
                Err(error) => return SessionEnd::Protocol(error),
            }
        }
    }

    fn handle_text(&self, body: &[u8]) {
        match serde_json::from_slice::<PushMessage>(body) {
            Ok(PushMessage::RideRequest(ride)) => {
                self.store.apply_event(PushEvent::RideRequested(ride));
            }
            Ok(PushMessage::RideStatusUpdate(payload)) => {
                self.store.apply_event(PushEvent::RideStatusChanged {
                    ride_id: payload.ride_id,
                    status: payload.status,
                });
            }
            Ok(PushMessage::DriverLocationUpdate(payload)) => {
                self.forward_telemetry(TelemetryUpdate::DriverLocation(payload));
            }
            Ok(PushMessage::HazardZoneUpdate(payload)) => {
                self.forward_telemetry(TelemetryUpdate::HazardZone(payload));
            }
            Err(error) => {
                warn!(error = %error, "Rejected malformed push payload");
            }
        }
    }

    fn forward_telemetry(&self, update: TelemetryUpdate) {
        if self.telemetry.send(update).is_err() {
            debug!("telemetry update dropped: no subscribers");
        }
    }

    fn log_session_end(&self, end: &SessionEnd) {
        match end {
            SessionEnd::StreamClosed => {
                warn!("push stream ended; connection lost");
            }
            SessionEnd::ServerClosed(reason) => {
                warn!(reason = ?reason, "push channel closed by server");
            }
            SessionEnd::Protocol(error) => {
                warn!(error = %error, "push channel protocol error");
            }
            SessionEnd::Send(error) => {
                warn!(error = %error, "push channel send failed");
            }
        }
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
