pub mod channel;
pub mod negotiation;
pub mod receiver;
pub mod station;
pub mod transport;

pub use channel::{ChannelMultiplexer, ChatChannel, MetadataChannel};
pub use negotiation::{CandidateAction, Negotiation, NegotiationState};
pub use receiver::{Receiver, ReceiverBehavior, ReceiverCommand, ReceiverHandle};
pub use station::{Station, StationBehavior, StationCommand, StationContext, StationHandle};
pub use transport::{DirectTransport, SubChannel, TransportEvent, TransportFactory};
