pub use airwave_core::model::{ParticipantId, RoomId};

pub mod model {
    pub use airwave_core::model::*;
}

#[cfg(feature = "relay")]
pub mod relay {
    pub use airwave_relay::*;
}

#[cfg(feature = "session")]
pub mod session {
    pub use airwave_session::*;
}
