//! WebSocket transport for the change notifier.
//!
//! Each socket gets a [`ChannelHandle`] registered with the notifier. The
//! connection task forwards queued events to the socket as text frames and
//! watches the read side for the client going away.

use super::AppState;
use crate::notifier::ChannelHandle;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::Response;
use futures::{SinkExt, StreamExt};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// `GET /hub`: upgrade to a WebSocket and join the broadcast set.
pub async fn hub_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    ws.on_upgrade(move |socket| serve_client(socket, state))
}

async fn serve_client(socket: WebSocket, state: AppState) {
    let (handle, mut events) = ChannelHandle::pair(state.client_queue_capacity);
    let id = state.notifier.connect(Arc::new(handle));
    info!(subscription = %id, "Hub client connected");

    let (mut sender, mut receiver) = socket.split();

    loop {
        tokio::select! {
            event = events.recv() => {
                let Some(event) = event else {
                    // Hub let go of this client (drained on shutdown)
                    let _ = sender.send(Message::Close(None)).await;
                    break;
                };

                let send = sender.send(Message::Text(event.into()));
                match tokio::time::timeout(state.client_send_timeout, send).await {
                    Ok(Ok(())) => {}
                    Ok(Err(e)) => {
                        warn!(subscription = %id, error = %e, "Hub send failed");
                        break;
                    }
                    Err(_) => {
                        warn!(
                            subscription = %id,
                            timeout_secs = state.client_send_timeout.as_secs(),
                            "Hub send timed out"
                        );
                        break;
                    }
                }
            }

            incoming = receiver.next() => {
                match incoming {
                    Some(Ok(Message::Close(_))) | None => break,
                    // Clients have nothing to say; pings are answered by the socket
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        debug!(subscription = %id, error = %e, "Hub receive failed");
                        break;
                    }
                }
            }
        }
    }

    state.notifier.disconnect(id);
    info!(subscription = %id, "Hub client disconnected");
}
