//! Live room wire protocol
//!
//! Every frame is a JSON object tagged by `type`. Inbound frames come from a
//! participant, outbound frames are fanned out by the room manager.

use serde::{Deserialize, Serialize};

fn anonymous() -> String {
    "anon".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatEntry {
    pub user: String,
    pub text: String,
}

/// Shared state of a room, sent whole to a participant when it joins
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomState {
    pub document: String,
    pub chat: Vec<ChatEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertNotice {
    pub message: String,
}

/// Frame received from a participant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ClientMessage {
    Document {
        #[serde(default)]
        payload: String,
    },
    Chat {
        #[serde(default = "anonymous")]
        user: String,
        #[serde(default)]
        payload: String,
    },
}

/// Frame sent to participants
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "lowercase")]
pub enum ServerMessage {
    State(RoomState),
    Document(String),
    Chat(ChatEntry),
    Alert(AlertNotice),
}

impl ServerMessage {
    pub fn alert(message: impl Into<String>) -> Self {
        ServerMessage::Alert(AlertNotice {
            message: message.into(),
        })
    }
}
