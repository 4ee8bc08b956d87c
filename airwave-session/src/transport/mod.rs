mod direct_transport;
mod sub_channel;
mod transport_event;

pub use direct_transport::*;
pub use sub_channel::*;
pub use transport_event::*;
