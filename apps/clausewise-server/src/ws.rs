//! WebSocket glue for live review rooms
//!
//! Each socket gets a writer task draining its room handle and a reader loop
//! applying inbound frames in arrival order. Disconnects always end in
//! `leave`.

use std::fmt::Display;
use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Path, State,
    },
    response::Response,
};
use collab_rooms::RoomManager;
use futures::{Sink, SinkExt, Stream, StreamExt};
use shared_types::ClientMessage;
use tracing::{debug, info, warn};

use crate::AppState;

/// Handler: GET /ws/:room_id
pub async fn handle_ws(
    ws: WebSocketUpgrade,
    Path(room_id): Path<String>,
    State(state): State<AppState>,
) -> Response {
    ws.on_upgrade(move |socket| run_connection(socket, room_id, state.rooms))
}

/// Apply one inbound text frame; malformed or unknown frames are ignored
pub async fn apply_client_frame(rooms: &RoomManager, room_id: &str, raw: &str) {
    match serde_json::from_str::<ClientMessage>(raw) {
        Ok(ClientMessage::Document { payload }) => {
            rooms.update_document(room_id, payload).await;
        }
        Ok(ClientMessage::Chat { user, payload }) => {
            rooms.add_chat(room_id, user, payload).await;
        }
        Err(e) => debug!("Ignoring frame in room {:?}: {}", room_id, e),
    }
}

async fn run_connection(socket: WebSocket, room_id: String, rooms: Arc<RoomManager>) {
    let (sink, stream) = socket.split();
    serve_room(sink, stream, room_id, rooms).await;
}

/// Drive one connection's halves until the peer goes away, then leave
pub async fn serve_room<S, R, E>(
    mut sink: S,
    mut stream: R,
    room_id: String,
    rooms: Arc<RoomManager>,
) where
    S: Sink<Message> + Unpin + Send + 'static,
    R: Stream<Item = Result<Message, E>> + Unpin,
    E: Display,
{
    let (handle, mut outbound) = rooms.connect();
    let id = handle.id();

    let writer = tokio::spawn(async move {
        while let Some(message) = outbound.recv().await {
            let text = match serde_json::to_string(&message) {
                Ok(text) => text,
                Err(e) => {
                    warn!("Dropping unserializable frame: {}", e);
                    continue;
                }
            };
            if sink.send(Message::Text(text)).await.is_err() {
                break;
            }
        }
    });

    if let Err(e) = rooms.join(&room_id, handle).await {
        warn!("Join to room {:?} failed: {}", room_id, e);
        writer.abort();
        return;
    }
    info!("Connection {} joined room {:?}", id, room_id);

    while let Some(frame) = stream.next().await {
        match frame {
            Ok(Message::Text(text)) => apply_client_frame(&rooms, &room_id, &text).await,
            Ok(Message::Close(_)) => break,
            Ok(_) => {}
            Err(e) => {
                debug!("Connection {} read error: {}", id, e);
                break;
            }
        }
    }

    rooms.leave(&room_id, id).await;
    writer.abort();
    info!("Connection {} left room {:?}", id, room_id);
}
