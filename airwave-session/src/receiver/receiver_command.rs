/// Commands the owning application feeds into a running receiver.
#[derive(Debug)]
pub enum ReceiverCommand {
    /// Say something in chat. Silently dropped until connected.
    Chat(String),

    /// Announce logoff and wind the receiver down.
    Logoff,
}
