use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::IntoResponse,
};
use futures::{sink::SinkExt, stream::StreamExt};
use tokio::sync::broadcast::error::RecvError;
use tracing::{info, warn};
use uuid::Uuid;

use crate::state::AppState;

pub async fn handler(State(state): State<AppState>, ws: WebSocketUpgrade) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Streams game events to one client until either side hangs up. The socket
/// is read-only; anything the client sends apart from a close is ignored.
pub async fn handle_socket(ws: WebSocket, state: AppState) {
    let connection_id = Uuid::new_v4();
    info!("New WebSocket connection established: {}", connection_id);

    let (mut sender, mut receiver) = ws.split();
    let mut rx = state.channel.subscribe();

    let mut send_task = tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(msg) => {
                    if let Err(e) = sender.send(msg).await {
                        warn!("Error sending message to {}: {}", connection_id, e);
                        break;
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    warn!("Connection {} lagged, {} events dropped", connection_id, skipped);
                }
                Err(RecvError::Closed) => break,
            }
        }
    });

    let mut receive_task = tokio::spawn(async move {
        while let Some(Ok(msg)) = receiver.next().await {
            if let Message::Close(_) = msg {
                break;
            }
        }
    });

    tokio::select! {
        _ = &mut send_task => receive_task.abort(),
        _ = &mut receive_task => send_task.abort(),
    }
    info!("WebSocket connection closed: {}", connection_id);
}
