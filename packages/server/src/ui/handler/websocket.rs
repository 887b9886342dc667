//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        Path, State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    http::StatusCode,
    response::IntoResponse,
};
use futures_util::stream::StreamExt;
use tokio::sync::mpsc;

use crate::{
    domain::{RoomId, User},
    infrastructure::{
        connection::{WebSocketConnection, pusher_loop},
        dto::websocket::InboundFrame,
    },
    ui::{auth::AuthenticatedUser, handler::http::parse_room_id, state::AppState},
    usecase::{ConnectError, SendMessageError},
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<String>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<impl IntoResponse, StatusCode> {
    let room_id = parse_room_id(&room_id)?;

    Ok(ws.on_upgrade(move |socket| handle_socket(socket, state, user, room_id)))
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>, user: User, room_id: RoomId) {
    let (sender, mut receiver) = socket.split();

    // 1. Per-connection scope, cancelled on close or server shutdown
    let scope = state.shutdown.child_token();

    // 2. Outbound queue drained by the pusher task
    let (tx, rx) = mpsc::channel(state.outbound_buffer);
    let pusher = pusher_loop(rx, sender, scope.clone());
    let connection = Arc::new(WebSocketConnection::new(tx, scope.clone()));

    // 3. Register. A session that is already attached elsewhere keeps that
    // attachment; this connection may still send but receives nothing.
    let user_name = user.name.clone();
    let client = match state
        .connect_participant_usecase
        .execute(user, room_id, connection.clone(), scope.clone())
        .await
    {
        Ok(client) => Some(client),
        Err(ConnectError::DuplicateSession(_)) => {
            tracing::warn!(
                "User '{}' is already connected. Continuing without registering.",
                user_name
            );
            None
        }
        Err(e) => {
            tracing::error!("Failed to register user '{}': {}", user_name, e);
            scope.cancel();
            let _ = pusher.await;
            return;
        }
    };

    // 4. Read loop
    loop {
        let frame = tokio::select! {
            _ = scope.cancelled() => break,
            frame = receiver.next() => frame,
        };

        let msg = match frame {
            Some(Ok(msg)) => msg,
            Some(Err(e)) => {
                tracing::warn!("WebSocket error from '{}': {}", user_name, e);
                break;
            }
            None => break,
        };

        match msg {
            Message::Text(text) => {
                let frame = match InboundFrame::decode(&text) {
                    Ok(frame) => frame,
                    Err(e) => {
                        tracing::warn!("Malformed frame from '{}': {}", user_name, e);
                        break;
                    }
                };

                match state
                    .send_message_usecase
                    .execute(&frame.message, &frame.room_id, &frame.user_id)
                    .await
                {
                    Ok(_) => {}
                    Err(SendMessageError::Delivery(e)) => {
                        tracing::warn!(
                            "Message from '{}' was not fully delivered: {}",
                            user_name,
                            e
                        );
                    }
                    Err(e) => {
                        tracing::warn!("Closing connection of '{}': {}", user_name, e);
                        break;
                    }
                }
            }
            Message::Binary(_) => {
                tracing::warn!("Binary frame from '{}' is not supported", user_name);
                break;
            }
            Message::Close(_) => {
                tracing::info!("User '{}' requested close", user_name);
                break;
            }
            // Ping/pong is handled automatically by the WebSocket protocol
            Message::Ping(_) | Message::Pong(_) => {}
        }
    }

    // 5. Deregister our own entry only, then wait for the socket to close
    if let Some(client) = client {
        state
            .disconnect_participant_usecase
            .execute(client.session_token())
            .await;
    }
    scope.cancel();
    let _ = pusher.await;
}
