//! WebSocket app tests.

mod common;

use std::time::Duration;

use axum::http::StatusCode;
use futures_util::{SinkExt, StreamExt};
use routelab_api::ws::{active_connections, echo_reply};
use routelab_api::AppKind;
use serde_json::json;
use tokio::time::timeout;
use tokio_tungstenite::{connect_async, tungstenite::Message};

use common::{app, get};

#[tokio::test]
async fn test_ping() {
    let app = app(AppKind::WebSocket);
    let resp = get(&app, "/ping").await;

    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.json(), json!({ "msg": "Pong" }));
}

#[tokio::test]
async fn test_ws_requires_upgrade() {
    let app = app(AppKind::WebSocket);
    let resp = get(&app, "/ws").await;
    assert!(resp.status.is_client_error());
}

#[test]
fn test_echo_format() {
    assert_eq!(echo_reply("hi"), "Echo: hi");
}

#[tokio::test]
async fn test_echo_over_live_socket() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = tokio::spawn(async move {
        axum::serve(listener, app(AppKind::WebSocket)).await.unwrap();
    });

    let (mut socket, _) = connect_async(format!("ws://{}/ws", addr)).await.unwrap();

    socket.send(Message::Text("hi".into())).await.unwrap();
    let reply = timeout(Duration::from_secs(5), socket.next())
        .await
        .unwrap()
        .unwrap()
        .unwrap();
    assert_eq!(reply, Message::Text("Echo: hi".into()));
    assert_eq!(active_connections(), 1);

    // Binary frames get no reply, so the next frame answers the text after it
    socket.send(Message::Binary(vec![1, 2, 3])).await.unwrap();
    socket.send(Message::Text("after".into())).await.unwrap();
    let reply = timeout(Duration::from_secs(5), socket.next())
        .await
        .unwrap()
        .unwrap()
        .unwrap();
    assert_eq!(reply, Message::Text("Echo: after".into()));

    socket.close(None).await.unwrap();
    while let Ok(Some(Ok(_))) = timeout(Duration::from_secs(5), socket.next()).await {}

    let closed = timeout(Duration::from_secs(5), async {
        while active_connections() != 0 {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await;
    assert!(closed.is_ok(), "connection was not released");

    server.abort();
}
