use crate::transport::{SubChannel, TransportEvent};
use airwave_core::ParticipantId;
use anyhow::Result;
use async_trait::async_trait;
use bytes::Bytes;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::mpsc;

/// The peer-to-peer pipe the platform supplies. Session descriptions and
/// candidates stay opaque JSON; the transport is the only thing that reads
/// them. Inbound traffic and lifecycle changes come back through the event
/// sender handed to the factory.
#[async_trait]
pub trait DirectTransport: Send + Sync {
    async fn create_offer(&self) -> Result<Value>;

    async fn apply_remote_offer(&self, offer: Value) -> Result<()>;

    async fn create_answer(&self) -> Result<Value>;

    async fn apply_remote_answer(&self, answer: Value) -> Result<()>;

    async fn add_ice_candidate(&self, candidate: Value) -> Result<()>;

    async fn send(&self, channel: SubChannel, data: Bytes) -> Result<()>;

    async fn close(&self);
}

/// Builds one transport per counterpart.
#[async_trait]
pub trait TransportFactory: Send + Sync {
    async fn create(
        &self,
        remote: ParticipantId,
        events: mpsc::Sender<TransportEvent>,
    ) -> Result<Arc<dyn DirectTransport>>;
}
