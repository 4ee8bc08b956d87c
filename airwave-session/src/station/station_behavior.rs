use crate::station::StationContext;
use airwave_core::{ChatMessage, ParticipantId};
use async_trait::async_trait;

/// Application hooks for a station, invoked from its event loop one at a
/// time.
#[async_trait]
pub trait StationBehavior: Send + Sync + 'static {
    /// A listener finished negotiating and its lanes are open.
    async fn on_listener_connected(&self, ctx: &StationContext, listener: ParticipantId);

    /// Chat arrived from a listener. `message.from` is set from the lane it
    /// came in on, not from whatever the payload claimed.
    async fn on_chat(&self, ctx: &StationContext, message: ChatMessage);

    /// A connected listener logged off or its transport dropped.
    async fn on_listener_left(&self, ctx: &StationContext, listener: ParticipantId);
}
