use crate::model::participant::ParticipantId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    pub from: ParticipantId,
    pub message: String,
}

impl ChatMessage {
    pub fn new(from: ParticipantId, message: impl Into<String>) -> Self {
        Self {
            from,
            message: message.into(),
        }
    }
}
