use crate::transport::{DirectTransport, SubChannel};
use airwave_core::{ChatMessage, MediaDescription};
use bytes::Bytes;
use std::sync::Arc;
use tracing::{error, trace};

/// Splits one established transport into its typed lanes. An endpoint builds
/// a multiplexer only once the counterpart is connected and drops it when the
/// link goes, so holding one means sends have somewhere to go.
#[derive(Clone)]
pub struct ChannelMultiplexer {
    transport: Arc<dyn DirectTransport>,
}

impl ChannelMultiplexer {
    pub fn new(transport: Arc<dyn DirectTransport>) -> Self {
        Self { transport }
    }

    pub fn chat(&self) -> ChatChannel {
        ChatChannel {
            transport: self.transport.clone(),
        }
    }

    pub fn metadata(&self) -> MetadataChannel {
        MetadataChannel {
            transport: self.transport.clone(),
        }
    }
}

/// The bidirectional chat lane.
#[derive(Clone)]
pub struct ChatChannel {
    transport: Arc<dyn DirectTransport>,
}

impl ChatChannel {
    /// Fire and forget: a transport that refuses the send loses the message.
    pub async fn send(&self, message: &ChatMessage) {
        let data = match serde_json::to_vec(message) {
            Ok(data) => data,
            Err(e) => {
                error!("Failed to serialize chat message: {}", e);
                return;
            }
        };

        if let Err(e) = self.transport.send(SubChannel::Chat, Bytes::from(data)).await {
            trace!("Chat send dropped: {}", e);
        }
    }

    pub fn decode(data: &[u8]) -> serde_json::Result<ChatMessage> {
        serde_json::from_slice(data)
    }
}

/// The host-to-peer metadata lane. Full snapshots only, never deltas.
#[derive(Clone)]
pub struct MetadataChannel {
    transport: Arc<dyn DirectTransport>,
}

impl MetadataChannel {
    pub async fn push(&self, description: &MediaDescription) {
        let data = match serde_json::to_vec(description) {
            Ok(data) => data,
            Err(e) => {
                error!("Failed to serialize media description: {}", e);
                return;
            }
        };

        if let Err(e) = self
            .transport
            .send(SubChannel::Metadata, Bytes::from(data))
            .await
        {
            trace!("Metadata push dropped: {}", e);
        }
    }

    pub fn decode(data: &[u8]) -> serde_json::Result<MediaDescription> {
        serde_json::from_slice(data)
    }
}
