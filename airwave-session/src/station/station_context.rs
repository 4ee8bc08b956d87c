use crate::channel::ChannelMultiplexer;
use airwave_core::{ChatMessage, MediaDescription, ParticipantId};
use dashmap::DashMap;
use std::sync::Arc;
use tracing::debug;

/// Live view of the connected listeners. Safe to clone and hold across
/// awaits; the station keeps the map current.
#[derive(Clone)]
pub struct StationContext {
    listeners: Arc<DashMap<ParticipantId, ChannelMultiplexer>>,
}

impl StationContext {
    pub(crate) fn new(listeners: Arc<DashMap<ParticipantId, ChannelMultiplexer>>) -> Self {
        Self { listeners }
    }

    /// Send a chat message to one listener. Detached listeners lose it.
    pub async fn send_chat(&self, listener: &ParticipantId, message: &ChatMessage) {
        let mux = match self.listeners.get(listener) {
            Some(entry) => entry.value().clone(),
            None => {
                debug!("Chat to detached listener {} dropped", listener);
                return;
            }
        };

        mux.chat().send(message).await;
    }

    /// Send a chat message to every connected listener, the author included
    /// when it is one of them.
    pub async fn broadcast_chat(&self, message: &ChatMessage) {
        // Collect first so no map guard is held across an await.
        let muxes: Vec<ChannelMultiplexer> = self
            .listeners
            .iter()
            .map(|entry| entry.value().clone())
            .collect();

        for mux in muxes {
            mux.chat().send(message).await;
        }
    }

    /// Push a metadata snapshot to every connected listener.
    pub async fn push_metadata(&self, description: &MediaDescription) {
        let muxes: Vec<ChannelMultiplexer> = self
            .listeners
            .iter()
            .map(|entry| entry.value().clone())
            .collect();

        for mux in muxes {
            mux.metadata().push(description).await;
        }
    }

    /// Push a metadata snapshot to one listener.
    pub async fn push_metadata_to(&self, listener: &ParticipantId, description: &MediaDescription) {
        let mux = match self.listeners.get(listener) {
            Some(entry) => entry.value().clone(),
            None => {
                debug!("Metadata for detached listener {} dropped", listener);
                return;
            }
        };

        mux.metadata().push(description).await;
    }

    pub fn listeners(&self) -> Vec<ParticipantId> {
        self.listeners
            .iter()
            .map(|entry| entry.key().clone())
            .collect()
    }

    pub fn is_connected(&self, listener: &ParticipantId) -> bool {
        self.listeners.contains_key(listener)
    }
}
