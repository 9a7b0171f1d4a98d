//! End-to-end broadcast over a live socket.

#![allow(clippy::panic)]

mod common;

use std::net::SocketAddr;
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_test::assert_ok;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};

use arena_gateway::api;

type Client = WebSocketStream<MaybeTlsStream<TcpStream>>;

async fn spawn_server() -> SocketAddr {
    let app = api::build_app(common::app_state());
    let Ok(listener) = tokio::net::TcpListener::bind("127.0.0.1:0").await else {
        panic!("bind failed");
    };
    let Ok(addr) = listener.local_addr() else {
        panic!("no local addr");
    };
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    addr
}

async fn connect(addr: SocketAddr, channels: &str) -> Client {
    let url = format!("ws://{addr}/ws?channels={channels}");
    let Ok((client, _)) = connect_async(url).await else {
        panic!("ws connect failed");
    };
    client
}

async fn next_json(client: &mut Client) -> serde_json::Value {
    loop {
        let Ok(Some(Ok(msg))) = tokio::time::timeout(Duration::from_secs(5), client.next()).await
        else {
            panic!("no message within timeout");
        };
        if let Message::Text(text) = msg {
            let Ok(value) = serde_json::from_str(text.as_str()) else {
                panic!("frame is not JSON: {}", text.as_str());
            };
            return value;
        }
    }
}

#[tokio::test]
async fn late_joiner_gets_snapshot_then_updates() {
    let addr = spawn_server().await;
    let http = reqwest::Client::new();

    let response = assert_ok!(
        http.put(format!("http://{addr}/api/v1/displays/audience"))
            .json(&serde_json::json!({"mode": "intro"}))
            .send()
            .await
    );
    assert_eq!(response.status(), reqwest::StatusCode::NO_CONTENT);

    let mut client = connect(addr, "audienceDisplayMode").await;
    let initial = next_json(&mut client).await;
    assert_eq!(initial["type"], "event");
    assert_eq!(initial["payload"]["channel"], "audienceDisplayMode");
    assert_eq!(initial["payload"]["data"], "intro");

    assert_ok!(
        http.put(format!("http://{addr}/api/v1/displays/audience"))
            .json(&serde_json::json!({"mode": "match"}))
            .send()
            .await
    );
    let update = next_json(&mut client).await;
    assert_eq!(update["payload"]["data"], "match");
}

#[tokio::test]
async fn subscribe_command_joins_generatorless_channel() {
    let addr = spawn_server().await;
    let http = reqwest::Client::new();
    let mut client = connect(addr, "").await;

    let command = serde_json::json!({
        "id": "sub-1",
        "type": "command",
        "timestamp": "2026-03-01T12:00:00Z",
        "payload": {"command": "subscribe", "channels": ["reload", "nope"]},
    });
    assert_ok!(client.send(Message::text(command.to_string())).await);

    let reply = next_json(&mut client).await;
    assert_eq!(reply["id"], "sub-1");
    assert_eq!(reply["type"], "response");
    assert_eq!(reply["payload"]["applied"], serde_json::json!(["reload"]));
    assert_eq!(reply["payload"]["unknown"], serde_json::json!(["nope"]));

    let response = assert_ok!(
        http.post(format!("http://{addr}/api/v1/displays/reload"))
            .send()
            .await
    );
    let delivery: serde_json::Value = assert_ok!(response.json().await);
    assert_eq!(delivery["delivered"], 1);

    let frame = next_json(&mut client).await;
    assert_eq!(frame["payload"]["channel"], "reload");
    assert!(frame["payload"]["data"].is_null());
}

#[tokio::test]
async fn closing_the_socket_detaches_subscriber() {
    let addr = spawn_server().await;
    let http = reqwest::Client::new();
    let mut client = connect(addr, "matchTime,arenaStatus").await;
    let _ = next_json(&mut client).await;
    let _ = next_json(&mut client).await;

    assert_ok!(client.close(None).await);
    drop(client);

    let mut attached = usize::MAX;
    for _ in 0..50 {
        let response = assert_ok!(http.get(format!("http://{addr}/config/channels")).send().await);
        let catalog: serde_json::Value = assert_ok!(response.json().await);
        attached = catalog
            .as_array()
            .map(|all| {
                all.iter()
                    .filter_map(|c| c["subscriber_count"].as_u64())
                    .sum::<u64>()
            })
            .and_then(|sum| usize::try_from(sum).ok())
            .unwrap_or(usize::MAX);
        if attached == 0 {
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    assert_eq!(attached, 0);
}
