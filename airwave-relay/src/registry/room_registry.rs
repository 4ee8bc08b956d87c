use crate::error::RelayError;
use airwave_core::{ParticipantId, RoomId};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tracing::info;

/// Authoritative set of live rooms and their host slots. Rooms never expire
/// and a host, once set, is never reassigned.
#[derive(Default)]
pub struct RoomRegistry {
    rooms: DashMap<RoomId, Option<ParticipantId>>,
}

impl RoomRegistry {
    pub fn new() -> Self {
        Self {
            rooms: DashMap::new(),
        }
    }

    pub fn create_room(&self) -> Result<RoomId, RelayError> {
        let room_id = RoomId::new();

        match self.rooms.entry(room_id.clone()) {
            Entry::Occupied(_) => Err(RelayError::RoomAlreadyExists(room_id.to_string())),
            Entry::Vacant(slot) => {
                slot.insert(None);
                info!("Created room {}", room_id);
                Ok(room_id)
            }
        }
    }

    /// The first claimer becomes the host; every later claim is a no-op.
    pub fn claim_host(
        &self,
        room_id: &RoomId,
        participant_id: &ParticipantId,
    ) -> Result<(), RelayError> {
        let Some(mut host) = self.rooms.get_mut(room_id) else {
            return Err(RelayError::RoomNotFound(room_id.to_string()));
        };

        if host.is_none() {
            info!("Participant {} claimed host of room {}", participant_id, room_id);
            *host = Some(participant_id.clone());
        }

        Ok(())
    }

    pub fn exists(&self, room_id: &RoomId) -> bool {
        self.rooms.contains_key(room_id)
    }

    pub fn host_of(&self, room_id: &RoomId) -> Result<Option<ParticipantId>, RelayError> {
        match self.rooms.get(room_id) {
            Some(host) => Ok(host.clone()),
            None => Err(RelayError::RoomNotFound(room_id.to_string())),
        }
    }
}
