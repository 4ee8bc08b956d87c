pub mod error;
pub mod http;
pub mod registry;
pub mod relay;

pub use error::RelayError;
pub use http::{AppState, router};
pub use registry::RoomRegistry;
pub use relay::{EventRelay, RoomPublisher, Subscription};
