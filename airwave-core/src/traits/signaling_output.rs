use crate::model::Signal;
use async_trait::async_trait;

/// Implemented by whatever carries signals back into the room: the
/// in-process relay, or a client posting to a remote one.
#[async_trait]
pub trait SignalingOutput: Send + Sync {
    /// Publish one signal into the room. Best effort: delivery failures are
    /// the implementor's to log, endpoints never observe them.
    async fn publish(&self, signal: Signal);
}
