use crate::relay::event_relay::EventRelay;
use airwave_core::{ParticipantId, RoomId, SignalFrame};
use futures::Stream;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::sync::mpsc;

/// One attached subscriber. The first frame is always `identity-assigned`
/// with the id minted for this subscription. Dropping the subscription
/// releases its room slot immediately.
pub struct Subscription {
    room_id: RoomId,
    participant_id: ParticipantId,
    frames: mpsc::UnboundedReceiver<SignalFrame>,
    relay: EventRelay,
}

impl Subscription {
    pub(crate) fn new(
        room_id: RoomId,
        participant_id: ParticipantId,
        frames: mpsc::UnboundedReceiver<SignalFrame>,
        relay: EventRelay,
    ) -> Self {
        Self {
            room_id,
            participant_id,
            frames,
            relay,
        }
    }

    pub fn room_id(&self) -> &RoomId {
        &self.room_id
    }

    pub fn participant_id(&self) -> &ParticipantId {
        &self.participant_id
    }

    pub async fn recv(&mut self) -> Option<SignalFrame> {
        self.frames.recv().await
    }
}

impl Stream for Subscription {
    type Item = SignalFrame;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.frames.poll_recv(cx)
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.relay.remove_subscriber(&self.room_id, &self.participant_id);
    }
}
