//! Tests for the push session frame pump.

use std::collections::VecDeque;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};

use awc::ws::CloseCode;
use bytes::Bytes;
use serde_json::json;

use super::*;
use crate::domain::ports::FixtureRideApi;
use crate::domain::{NotificationKind, RideStatus, RideStore};
use crate::test_support::{MutableClock, anchor_instant};

/// Socket double replaying a fixed frame script and recording sends.
struct ScriptedSocket {
    frames: VecDeque<Result<Frame, ProtocolError>>,
    sent: Arc<Mutex<Vec<Message>>>,
}

impl ScriptedSocket {
    fn new(frames: Vec<Result<Frame, ProtocolError>>) -> (Self, Arc<Mutex<Vec<Message>>>) {
        let sent = Arc::new(Mutex::new(Vec::new()));
        (
            Self {
                frames: frames.into(),
                sent: sent.clone(),
            },
            sent,
        )
    }
}

impl Stream for ScriptedSocket {
    type Item = Result<Frame, ProtocolError>;

    fn poll_next(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Poll::Ready(self.get_mut().frames.pop_front())
    }
}

impl Sink<Message> for ScriptedSocket {
    type Error = ProtocolError;

    fn poll_ready(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn start_send(self: Pin<&mut Self>, item: Message) -> Result<(), Self::Error> {
        self.get_mut().sent.lock().expect("sent mutex").push(item);
        Ok(())
    }

    fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn poll_close(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }
}

fn make_store() -> Arc<RideStore<FixtureRideApi>> {
    Arc::new(RideStore::new(
        Arc::new(FixtureRideApi),
        Arc::new(MutableClock::new(anchor_instant())),
    ))
}

fn text_frame(body: &serde_json::Value) -> Result<Frame, ProtocolError> {
    Ok(Frame::Text(Bytes::from(body.to_string())))
}

fn ride_request_body(id: &str) -> serde_json::Value {
    json!({
        "event": "ride-request",
        "data": {
            "id": id,
            "status": "requested",
            "driver": "",
            "passenger": "passenger-1",
            "fare": "9.00",
            "eta": "3 min",
            "pickup": {
                "address": "1 Castle St",
                "coordinates": { "latitude": 53.3498, "longitude": -6.2603 }
            },
            "dropoff": {
                "address": "2 Dame St",
                "coordinates": { "latitude": 53.3441, "longitude": -6.2675 }
            }
        }
    })
}

fn error_notifications(store: &RideStore<FixtureRideApi>) -> Vec<String> {
    store
        .snapshot()
        .notifications
        .iter()
        .filter(|n| n.kind == NotificationKind::Error)
        .map(|n| n.message.clone())
        .collect()
}

#[tokio::test]
async fn forwards_ride_events_into_store() {
    let store = make_store();
    let session = PushSession::new(store.clone());
    let (socket, _sent) = ScriptedSocket::new(vec![
        text_frame(&ride_request_body("ride-1")),
        text_frame(&json!({
            "event": "ride-status-update",
            "data": { "rideId": "ride-1", "status": "accepted" }
        })),
    ]);

    session.run(socket).await;

    let snapshot = store.snapshot();
    assert_eq!(snapshot.rides.len(), 1);
    assert_eq!(
        snapshot.rides.first().expect("ride present").status,
        RideStatus::Accepted
    );
    // One disconnect report once the script runs out.
    assert_eq!(error_notifications(&store).len(), 1);
}

#[tokio::test]
async fn answers_server_pings() {
    let store = make_store();
    let session = PushSession::new(store);
    let (socket, sent) = ScriptedSocket::new(vec![Ok(Frame::Ping(Bytes::from_static(b"hb")))]);

    session.run(socket).await;

    let sent = sent.lock().expect("sent mutex");
    assert_eq!(sent.len(), 1);
    assert!(matches!(&sent[0], Message::Pong(p) if p.as_ref() == b"hb"));
}

#[tokio::test]
async fn close_frame_reports_connection_lost_once() {
    let store = make_store();
    let session = PushSession::new(store.clone());
    let (socket, _sent) = ScriptedSocket::new(vec![Ok(Frame::Close(Some(CloseReason {
        code: CloseCode::Away,
        description: None,
    })))]);

    session.run(socket).await;

    let errors = error_notifications(&store);
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("connection lost"));
}

#[tokio::test]
async fn protocol_error_still_reports_disconnect() {
    let store = make_store();
    let session = PushSession::new(store.clone());
    let (socket, _sent) = ScriptedSocket::new(vec![Err(ProtocolError::Overflow)]);

    session.run(socket).await;

    assert_eq!(error_notifications(&store).len(), 1);
}

#[tokio::test]
async fn malformed_payloads_are_dropped_without_mutation() {
    let store = make_store();
    let session = PushSession::new(store.clone());
    let (socket, _sent) = ScriptedSocket::new(vec![text_frame(&json!({ "event": 42 }))]);

    session.run(socket).await;

    let snapshot = store.snapshot();
    assert!(snapshot.rides.is_empty());
    // Only the end-of-stream disconnect is reported.
    assert_eq!(snapshot.notifications.len(), 1);
}

#[tokio::test]
async fn telemetry_is_routed_to_subscribers_not_the_store() {
    let store = make_store();
    let session = PushSession::new(store.clone());
    let mut telemetry = session.subscribe_telemetry();
    let payload = json!({ "driverId": "driver-2", "latitude": 53.0, "longitude": -6.0 });
    let (socket, _sent) = ScriptedSocket::new(vec![text_frame(&json!({
        "event": "driver-location-update",
        "data": payload
    }))]);

    session.run(socket).await;

    let update = telemetry.recv().await.expect("update buffered");
    assert_eq!(update, TelemetryUpdate::DriverLocation(payload));
    assert!(store.snapshot().rides.is_empty());
}
