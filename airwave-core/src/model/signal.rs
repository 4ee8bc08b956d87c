use crate::model::chat::ChatMessage;
use crate::model::media::MediaDescription;
use crate::model::participant::ParticipantId;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Everything that moves through a room's signaling stream. Offer, answer
/// and candidate payloads stay opaque `Value`s: the relay and the
/// negotiation machinery route them, the transport is the only reader.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "value", rename_all = "kebab-case")]
pub enum Signal {
    IdentityAssigned(ParticipantId),
    Logon {
        from: ParticipantId,
    },
    Logoff {
        from: ParticipantId,
    },
    Offer {
        to: ParticipantId,
        from: ParticipantId,
        offer: Value,
    },
    Answer {
        to: ParticipantId,
        from: ParticipantId,
        answer: Value,
    },
    IceCandidate {
        to: ParticipantId,
        from: ParticipantId,
        candidate: Value,
    },
    Chat(ChatMessage),
    MetadataUpdate(MediaDescription),
}

impl Signal {
    pub fn kind(&self) -> &'static str {
        match self {
            Signal::IdentityAssigned(_) => "identity-assigned",
            Signal::Logon { .. } => "logon",
            Signal::Logoff { .. } => "logoff",
            Signal::Offer { .. } => "offer",
            Signal::Answer { .. } => "answer",
            Signal::IceCandidate { .. } => "ice-candidate",
            Signal::Chat(_) => "chat",
            Signal::MetadataUpdate(_) => "metadata-update",
        }
    }
}

/// The untyped wire envelope. The relay transports frames verbatim and never
/// validates anything beyond the `{type, value}` pair, so application-defined
/// kinds pass through untouched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SignalFrame {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub value: Value,
}

impl SignalFrame {
    pub fn new(kind: impl Into<String>, value: Value) -> Self {
        Self {
            kind: kind.into(),
            value,
        }
    }

    /// Frames with kinds or shapes this crate does not know decode to `None`
    /// and are left to the caller to skip.
    pub fn decode(&self) -> Option<Signal> {
        let tagged = serde_json::json!({ "type": self.kind, "value": self.value });
        serde_json::from_value(tagged).ok()
    }
}

impl From<Signal> for SignalFrame {
    fn from(signal: Signal) -> Self {
        let kind = signal.kind().to_owned();
        let value = match serde_json::to_value(&signal) {
            Ok(Value::Object(mut tagged)) => tagged.remove("value").unwrap_or(Value::Null),
            _ => Value::Null,
        };
        Self { kind, value }
    }
}
