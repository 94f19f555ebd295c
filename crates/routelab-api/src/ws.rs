//! WebSocket echo handler with backpressure support.

use std::sync::atomic::{AtomicI64, Ordering};

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::IntoResponse;
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::metrics;

/// Prefix added to every echoed frame.
pub const ECHO_PREFIX: &str = "Echo: ";

/// Outbound frames buffered before the reader waits on the sender.
const WS_SEND_BUFFER_SIZE: usize = 32;

/// Global counter for active WebSocket connections.
static ACTIVE_WS_CONNECTIONS: AtomicI64 = AtomicI64::new(0);

/// Reply for a received text frame.
pub fn echo_reply(text: &str) -> String {
    format!("{}{}", ECHO_PREFIX, text)
}

/// Number of sockets currently open.
pub fn active_connections() -> i64 {
    ACTIVE_WS_CONNECTIONS.load(Ordering::SeqCst)
}

/// WebSocket echo endpoint.
pub async fn ws_echo(ws: WebSocketUpgrade) -> impl IntoResponse {
    ws.on_failed_upgrade(|e| warn!("WebSocket upgrade failed: {}", e))
        .on_upgrade(|socket| async move {
            // Counted only once the upgrade has completed
            let count = ACTIVE_WS_CONNECTIONS.fetch_add(1, Ordering::SeqCst) + 1;
            metrics::set_ws_active_connections(count);
            metrics::record_ws_connection("echo");
            info!("WebSocket connection established");

            handle_echo_socket(socket).await;

            let count = ACTIVE_WS_CONNECTIONS.fetch_sub(1, Ordering::SeqCst) - 1;
            metrics::set_ws_active_connections(count);
            info!("WebSocket connection closed");
        })
}

/// Handle an echo connection until the peer closes it.
async fn handle_echo_socket(socket: WebSocket) {
    let (ws_sender, mut receiver) = socket.split();

    // Bounded channel so a slow reader applies backpressure to the echo loop
    let (tx, mut rx) = mpsc::channel::<Message>(WS_SEND_BUFFER_SIZE);

    let send_task = tokio::spawn(async move {
        let mut ws_sender = ws_sender;
        while let Some(msg) = rx.recv().await {
            if ws_sender.send(msg).await.is_err() {
                break;
            }
            metrics::record_ws_message_sent("echo");
        }
        let _ = ws_sender.close().await;
    });

    while let Some(frame) = receiver.next().await {
        let msg = match frame {
            Ok(msg) => msg,
            Err(e) => {
                warn!("WebSocket receive error: {}", e);
                break;
            }
        };

        match msg {
            Message::Text(text) => {
                metrics::record_ws_message_received("echo");
                debug!(message = %text, "Received message");
                if tx.send(Message::Text(echo_reply(&text))).await.is_err() {
                    break;
                }
            }
            Message::Binary(data) => {
                debug!(bytes = data.len(), "Ignoring binary frame");
            }
            Message::Close(_) => break,
            // Pings are answered by axum
            Message::Ping(_) | Message::Pong(_) => {}
        }
    }

    drop(tx);
    let _ = send_task.await;
}
