use crate::error::RelayError;
use crate::registry::RoomRegistry;
use crate::relay::subscription::Subscription;
use airwave_core::{ParticipantId, RoomId, Signal, SignalFrame};
use dashmap::DashMap;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info};

#[derive(Default)]
struct RoomBus {
    subscribers: HashMap<ParticipantId, mpsc::UnboundedSender<SignalFrame>>,
}

struct RelayInner {
    registry: Arc<RoomRegistry>,
    rooms: DashMap<RoomId, RoomBus>,
}

/// Fans published frames out to every live subscriber of a room. Frames are
/// never replayed: a subscriber only sees what was published after it
/// attached. Cheap to clone, all clones share the same rooms.
#[derive(Clone)]
pub struct EventRelay {
    inner: Arc<RelayInner>,
}

impl EventRelay {
    pub fn new(registry: Arc<RoomRegistry>) -> Self {
        Self {
            inner: Arc::new(RelayInner {
                registry,
                rooms: DashMap::new(),
            }),
        }
    }

    /// Attach to a room: mints a participant id, claims the host slot if it
    /// is still free, and queues the `identity-assigned` frame so it is the
    /// first thing the subscriber reads. The room's bus entry stays locked
    /// for the whole attach, so no publish can slip in front of the identity
    /// frame.
    pub fn subscribe(&self, room_id: &RoomId) -> Result<Subscription, RelayError> {
        if !self.inner.registry.exists(room_id) {
            return Err(RelayError::RoomNotFound(room_id.to_string()));
        }

        let participant_id = ParticipantId::new();
        let (tx, rx) = mpsc::unbounded_channel();

        {
            let mut bus = self.inner.rooms.entry(room_id.clone()).or_default();
            self.inner.registry.claim_host(room_id, &participant_id)?;

            let identity = SignalFrame::from(Signal::IdentityAssigned(participant_id.clone()));
            let _ = tx.send(identity);
            bus.subscribers.insert(participant_id.clone(), tx);
        }

        info!("Participant {} subscribed to room {}", participant_id, room_id);

        Ok(Subscription::new(
            room_id.clone(),
            participant_id,
            rx,
            self.clone(),
        ))
    }

    /// Clone the frame into every live subscriber queue. Publishes to the
    /// same room are serialized by the bus entry lock, so all subscribers
    /// observe the same order. Queues whose reader is gone are pruned on the
    /// way through.
    pub fn publish(&self, room_id: &RoomId, frame: SignalFrame) -> Result<(), RelayError> {
        if !self.inner.registry.exists(room_id) {
            return Err(RelayError::RoomNotFound(room_id.to_string()));
        }

        let Some(mut bus) = self.inner.rooms.get_mut(room_id) else {
            // Registered room nobody has attached to yet.
            return Ok(());
        };

        bus.subscribers.retain(|participant_id, tx| {
            if tx.send(frame.clone()).is_ok() {
                return true;
            }
            debug!("Pruning dead subscriber {} of room {}", participant_id, room_id);
            false
        });

        Ok(())
    }

    pub fn subscriber_count(&self, room_id: &RoomId) -> usize {
        self.inner
            .rooms
            .get(room_id)
            .map_or(0, |bus| bus.subscribers.len())
    }

    pub(crate) fn remove_subscriber(&self, room_id: &RoomId, participant_id: &ParticipantId) {
        let Some(mut bus) = self.inner.rooms.get_mut(room_id) else {
            return;
        };

        if bus.subscribers.remove(participant_id).is_some() {
            debug!("Participant {} left room {}", participant_id, room_id);
        }
    }
}
