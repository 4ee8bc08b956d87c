/// One of the lanes multiplexed over a direct transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubChannel {
    Chat,
    Metadata,
}

impl SubChannel {
    /// Wire label of the lane.
    pub fn label(&self) -> &'static str {
        match self {
            SubChannel::Chat => "chat",
            SubChannel::Metadata => "metadata",
        }
    }
}
