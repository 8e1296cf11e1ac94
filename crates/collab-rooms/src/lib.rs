//! Live collaboration rooms
//!
//! Participants join a room by key, receive its current document and chat
//! log, then get every later update in order. A background task sends a
//! fixed reminder to all rooms on an interval.

pub mod broadcaster;
pub mod connection;
pub mod error;
pub mod manager;

pub use broadcaster::{run_alert_broadcaster, BroadcasterConfig};
pub use connection::{ConnectionHandle, ConnectionId};
pub use error::RoomError;
pub use manager::RoomManager;
