use airwave_core::{ChatMessage, MediaDescription};
use async_trait::async_trait;

/// Application hooks for a receiver, invoked from its event loop.
#[async_trait]
pub trait ReceiverBehavior: Send + Sync + 'static {
    /// The link to the station is up.
    async fn on_connected(&self);

    /// A full replacement snapshot of what the station is playing.
    async fn on_metadata(&self, description: MediaDescription);

    async fn on_chat(&self, message: ChatMessage);

    /// The link to the station is gone. The receiver stays terminated;
    /// rejoining is the application's call.
    async fn on_disconnected(&self);
}
