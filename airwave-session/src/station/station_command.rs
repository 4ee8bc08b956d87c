use airwave_core::MediaDescription;

/// Commands the owning application feeds into a running station.
#[derive(Debug)]
pub enum StationCommand {
    /// Replace the media description and push the snapshot to every
    /// connected listener.
    UpdateMedia(MediaDescription),

    /// Say something in chat as the station itself.
    Chat(String),
}
