mod event_relay;
mod room_publisher;
mod subscription;

pub use event_relay::EventRelay;
pub use room_publisher::RoomPublisher;
pub use subscription::Subscription;
