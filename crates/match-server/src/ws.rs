//! WebSocket feed of match events.
//!
//! Every connected client receives a `welcome` message on connect and then a
//! `match_created` message for each match created while it is connected.

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
};
use futures_util::{SinkExt, StreamExt};
use match_core::Match;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast::{self, error::RecvError};

/// Messages sent to feed clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FeedMessage {
    /// Sent once when a client connects.
    Welcome,
    /// A match was created.
    MatchCreated {
        /// The created match, as stored.
        data: Match,
    },
}

/// Broadcast channel sender for feed messages.
pub type FeedBroadcast = broadcast::Sender<FeedMessage>;

/// Creates a new broadcast channel for feed messages.
///
/// Returns the sender half. Clients that fall more than `capacity` messages
/// behind skip the oldest ones.
pub fn create_broadcast(capacity: usize) -> FeedBroadcast {
    let (tx, _) = broadcast::channel(capacity.max(1));
    tx
}

/// Axum handler for WebSocket upgrade requests.
pub async fn ws_handler(ws: WebSocketUpgrade, State(feed): State<FeedBroadcast>) -> Response {
    ws.on_upgrade(|socket| handle_socket(socket, feed))
}

async fn handle_socket(socket: WebSocket, feed: FeedBroadcast) {
    let (mut sender, mut receiver) = socket.split();
    let mut rx = feed.subscribe();

    let send_task = tokio::spawn(async move {
        if send_json(&mut sender, &FeedMessage::Welcome).await.is_err() {
            return;
        }

        loop {
            match rx.recv().await {
                Ok(msg) => {
                    if send_json(&mut sender, &msg).await.is_err() {
                        break;
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::debug!(skipped, "Feed client lagged behind");
                }
                Err(RecvError::Closed) => break,
            }
        }
    });

    // Clients only listen; drain their frames until the socket closes.
    while let Some(Ok(msg)) = receiver.next().await {
        if let Message::Close(_) = msg {
            break;
        }
    }

    send_task.abort();
}

/// Sends `msg` as a JSON text frame.
///
/// Fails if the message cannot be serialized or the socket is gone; either
/// way the caller stops feeding this client.
async fn send_json<S, T>(sender: &mut S, msg: &T) -> Result<(), ()>
where
    S: SinkExt<Message> + Unpin,
    T: Serialize,
{
    let json = serde_json::to_string(msg).map_err(|e| {
        tracing::error!("Failed to serialize feed message: {}", e);
    })?;
    sender.send(Message::Text(json)).await.map_err(|_| ())
}
