use thiserror::Error;

use crate::connection::ConnectionId;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RoomError {
    #[error("connection {0} is closed")]
    Disconnected(ConnectionId),
}
