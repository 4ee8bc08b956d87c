use thiserror::Error;

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("room {0} is not registered")]
    RoomNotFound(String),

    #[error("room {0} already exists")]
    RoomAlreadyExists(String),
}
