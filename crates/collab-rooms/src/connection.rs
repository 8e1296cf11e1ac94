//! Connection handles
//!
//! A handle is the room manager's side of one participant: outbound frames go
//! into a bounded channel drained by the transport's writer task. Once that
//! task drops its receiver every send fails and the handle counts as dead.

use std::fmt;

use shared_types::ServerMessage;
use tokio::sync::mpsc;

use crate::error::RoomError;

/// Frames buffered per connection before `send` waits on the transport
pub const OUTBOUND_BUFFER: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConnectionId(pub u64);

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone)]
pub struct ConnectionHandle {
    id: ConnectionId,
    sender: mpsc::Sender<ServerMessage>,
}

impl ConnectionHandle {
    /// Create a handle and the receiver its transport drains
    pub fn channel(id: ConnectionId) -> (Self, mpsc::Receiver<ServerMessage>) {
        let (sender, receiver) = mpsc::channel(OUTBOUND_BUFFER);
        (Self { id, sender }, receiver)
    }

    #[inline]
    #[must_use]
    pub fn id(&self) -> ConnectionId {
        self.id
    }

    /// Queue a frame, waiting while the buffer is full
    pub async fn send(&self, message: ServerMessage) -> Result<(), RoomError> {
        self.sender
            .send(message)
            .await
            .map_err(|_| RoomError::Disconnected(self.id))
    }

    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_send_reaches_receiver() {
        let (handle, mut rx) = ConnectionHandle::channel(ConnectionId(7));
        handle.send(ServerMessage::alert("hi")).await.unwrap();
        assert_eq!(rx.recv().await, Some(ServerMessage::alert("hi")));
    }

    #[tokio::test]
    async fn test_send_after_receiver_drop_fails() {
        let (handle, rx) = ConnectionHandle::channel(ConnectionId(3));
        drop(rx);
        assert!(handle.is_closed());
        assert_eq!(
            handle.send(ServerMessage::alert("hi")).await,
            Err(RoomError::Disconnected(ConnectionId(3)))
        );
    }
}
