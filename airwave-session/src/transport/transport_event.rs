use crate::transport::SubChannel;
use airwave_core::ParticipantId;
use bytes::Bytes;
use serde_json::Value;

/// Events a transport pushes back into its endpoint's loop.
#[derive(Debug)]
pub enum TransportEvent {
    /// The pair is live and its sub-channels are usable.
    Connected(ParticipantId),

    /// The pair is gone (network failure or deliberate close).
    Disconnected(ParticipantId),

    /// Bytes arrived on one of the sub-channels.
    ChannelMessage(ParticipantId, SubChannel, Bytes),

    /// A local candidate surfaced and should be signaled to the counterpart.
    CandidateGenerated(ParticipantId, Value),
}
