mod chat;
mod media;
mod participant;
mod room;
mod signal;

pub use chat::ChatMessage;
pub use media::MediaDescription;
pub use participant::ParticipantId;
pub use room::RoomId;
pub use signal::{Signal, SignalFrame};
