pub mod model;
pub mod traits;

pub use model::{ChatMessage, MediaDescription, ParticipantId, RoomId, Signal, SignalFrame};
pub use traits::SignalingOutput;
