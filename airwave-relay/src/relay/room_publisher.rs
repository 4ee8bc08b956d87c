use crate::relay::EventRelay;
use airwave_core::{RoomId, Signal, SignalingOutput};
use async_trait::async_trait;
use tracing::error;

/// Publishes signals into one room of an in-process relay. Failures are
/// logged and swallowed: signaling is best effort end to end.
#[derive(Clone)]
pub struct RoomPublisher {
    relay: EventRelay,
    room_id: RoomId,
}

impl RoomPublisher {
    pub fn new(relay: EventRelay, room_id: RoomId) -> Self {
        Self { relay, room_id }
    }
}

#[async_trait]
impl SignalingOutput for RoomPublisher {
    async fn publish(&self, signal: Signal) {
        if let Err(e) = self.relay.publish(&self.room_id, signal.into()) {
            error!("Failed to publish into room {}: {}", self.room_id, e);
        }
    }
}
